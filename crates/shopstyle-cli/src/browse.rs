//! Catalog command handlers: reference listings and the browse flow.
//!
//! Output is plain tab-separated text, one record per line.

use std::sync::Arc;

use shopstyle_browse::{BrowseController, BrowseOptions, CompareView, Location};
use shopstyle_catalog::{CatalogClient, SsData};
use shopstyle_core::display::clip;
use shopstyle_core::{Entity, Product, ProductId, SortOrder};

/// Product names are clipped to this many characters in listings.
const NAME_WIDTH: usize = 25;

type Session = Arc<SsData<CatalogClient>>;

fn print_entities<T: Entity>(entities: &[Arc<T>]) {
    for entity in entities {
        println!("{}\t{}", entity.id(), entity.name());
    }
}

pub(crate) async fn list_retailers(data: &Session) -> anyhow::Result<()> {
    print_entities(&data.require_retailers().await?);
    Ok(())
}

pub(crate) async fn list_brands(data: &Session, limit: Option<usize>) -> anyhow::Result<()> {
    let all = data.require_brands().await?;
    match limit {
        Some(n) => print_entities(&data.brands().first_n(n)),
        None => print_entities(&all),
    }
    Ok(())
}

pub(crate) async fn list_colors(data: &Session) -> anyhow::Result<()> {
    print_entities(&data.require_colors().await?);
    Ok(())
}

pub(crate) async fn list_categories(data: &Session) -> anyhow::Result<()> {
    print_entities(&data.require_categories().await?);
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct BrowseRequest {
    pub category: Option<String>,
    pub color: Option<String>,
    pub brand: Option<String>,
    pub sort: SortOrder,
    pub choose: Vec<ProductId>,
}

impl BrowseRequest {
    /// Route URL that a browser would show for this request.
    pub(crate) fn location(&self) -> Location {
        let params = [
            ("cat", self.category.as_deref()),
            ("color", self.color.as_deref()),
            ("brand", self.brand.as_deref()),
        ];
        let mut location = Location::new("/browse");
        location.set_search(
            params
                .into_iter()
                .filter_map(|(key, value)| value.map(|v| (key, v))),
        );
        location
    }
}

fn price_text(product: &Product) -> String {
    product
        .price_label
        .clone()
        .or_else(|| product.price.map(|price| price.to_string()))
        .unwrap_or_default()
}

/// Runs one search through the browse controller, then prints the results
/// and, if any ids were chosen, the compare list.
///
/// # Errors
///
/// Returns an error if reference data or the product query cannot be loaded.
pub(crate) async fn run_browse(
    data: Session,
    options: BrowseOptions,
    request: BrowseRequest,
) -> anyhow::Result<()> {
    let mut controller = BrowseController::new(Arc::clone(&data), request.location(), options);
    // Recorded before initialize so the first search already uses it.
    controller.set_sort_order(request.sort).await?;
    controller.initialize().await?;

    println!("# {}", controller.breadcrumb().trim());
    println!("# {}", controller.location().url());
    let products = controller.products().unwrap_or_default();
    for product in products {
        let brand = product
            .brand_id
            .as_deref()
            .and_then(|id| data.brand_by_id(id))
            .map(|b| b.name.clone())
            .unwrap_or_default();
        println!(
            "{}\t{}\t{}\t{}",
            product.id,
            clip(&product.name, NAME_WIDTH),
            price_text(product),
            brand
        );
    }
    tracing::info!(
        count = products.len(),
        sort = %controller.filter().sort_order,
        color = ?controller.filter().color.as_id(),
        brand = ?controller.filter().brand.as_id(),
        "browse finished"
    );

    if request.choose.is_empty() {
        return Ok(());
    }
    for id in &request.choose {
        if !controller.add_to_selection(*id) {
            tracing::warn!(id, "product not in results, not added to compare list");
        }
    }

    let compare = CompareView::load(data).await?;
    println!("# compare ({})", compare.chosen().len());
    for product in compare.chosen() {
        println!(
            "{}\t{}\t{}\t{}\t{}",
            product.id,
            clip(&product.name, NAME_WIDTH),
            price_text(product),
            compare.brand_name(product),
            compare.retailer_name(product)
        );
    }
    Ok(())
}

