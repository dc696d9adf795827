use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::entities::optional_string_or_number;

/// Catalog product ID as sent by the API (a JSON integer).
pub type ProductId = i64;

/// A product listing returned by `/ss/products`.
///
/// Products are shared as `Arc<Product>` once they enter the product index;
/// the same id always resolves to the same allocation for the rest of the
/// session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// List price. Sent as a JSON number; may be `null` or absent.
    #[serde(default)]
    pub price: Option<Decimal>,
    /// Display price, e.g. `"$129.00"`.
    #[serde(default)]
    pub price_label: Option<String>,
    #[serde(default, deserialize_with = "optional_string_or_number")]
    pub brand_id: Option<String>,
    #[serde(default, deserialize_with = "optional_string_or_number")]
    pub retailer_id: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Retailer product page.
    #[serde(default)]
    pub url: Option<String>,
    /// Medium image, used in the result grid.
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub thumb_url: Option<String>,
    /// Original-size image, shown by the large image viewer.
    #[serde(default)]
    pub large_url: Option<String>,
    #[serde(default)]
    pub in_stock: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Product {
    /// Minimal product, mostly useful for tests and fixtures.
    #[must_use]
    pub fn new(id: ProductId, name: impl Into<String>, price: Decimal) -> Self {
        Self {
            id,
            name: name.into(),
            price: Some(price),
            price_label: None,
            brand_id: None,
            retailer_id: None,
            description: None,
            url: None,
            image_url: None,
            thumb_url: None,
            large_url: None,
            in_stock: false,
            extra: Map::new(),
        }
    }
}

/// Result ordering for a product listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortOrder {
    /// Server order.
    #[default]
    Relevance,
    PriceAscending,
    PriceDescending,
}

impl SortOrder {
    pub const ALL: [SortOrder; 3] = [
        SortOrder::Relevance,
        SortOrder::PriceAscending,
        SortOrder::PriceDescending,
    ];

    /// Numeric code used by the browse UI (`0`, `1`, `2`).
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            SortOrder::Relevance => 0,
            SortOrder::PriceAscending => 1,
            SortOrder::PriceDescending => 2,
        }
    }

    #[must_use]
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(SortOrder::Relevance),
            1 => Some(SortOrder::PriceAscending),
            2 => Some(SortOrder::PriceDescending),
            _ => None,
        }
    }

    /// Short label shown in the sort picker.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            SortOrder::Relevance => "relevance",
            SortOrder::PriceAscending => "lo-hi",
            SortOrder::PriceDescending => "hi-lo",
        }
    }

    /// Sorts `products` in place. Stable, so equal prices keep server order.
    /// A missing price sorts as zero.
    pub fn apply<P: AsRef<Product>>(self, products: &mut [P]) {
        fn price_of<P: AsRef<Product>>(product: &P) -> Decimal {
            product.as_ref().price.unwrap_or(Decimal::ZERO)
        }
        match self {
            SortOrder::Relevance => {}
            SortOrder::PriceAscending => {
                products.sort_by(|a, b| price_of(a).cmp(&price_of(b)));
            }
            SortOrder::PriceDescending => {
                products.sort_by(|a, b| price_of(b).cmp(&price_of(a)));
            }
        }
    }
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "relevance" | "0" => Ok(SortOrder::Relevance),
            "lo-hi" | "1" => Ok(SortOrder::PriceAscending),
            "hi-lo" | "2" => Ok(SortOrder::PriceDescending),
            other => Err(format!(
                "unknown sort order '{other}'; expected relevance, lo-hi or hi-lo"
            )),
        }
    }
}
