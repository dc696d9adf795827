//! Reference entities served by the catalog API.
//!
//! Retailers, brands, colors and categories share one shape: a string `id`,
//! a display `name`, and whatever else the API chose to include. Unknown
//! fields are kept in `extra` so nothing the API sends is lost.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// The four kinds of reference data, each served from a fixed endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Retailer,
    Brand,
    Color,
    Category,
}

impl EntityKind {
    /// Path of the catalog endpoint listing every entity of this kind.
    #[must_use]
    pub fn endpoint(self) -> &'static str {
        match self {
            EntityKind::Retailer => "/ss/retailers",
            EntityKind::Brand => "/ss/brands",
            EntityKind::Color => "/ss/colors",
            EntityKind::Category => "/ss/wCategories",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityKind::Retailer => write!(f, "retailer"),
            EntityKind::Brand => write!(f, "brand"),
            EntityKind::Color => write!(f, "color"),
            EntityKind::Category => write!(f, "category"),
        }
    }
}

/// Common view over reference entities, used by the generic caches.
pub trait Entity: serde::de::DeserializeOwned + Send + Sync + 'static {
    const KIND: EntityKind;

    fn id(&self) -> &str;

    fn name(&self) -> &str;
}

macro_rules! reference_entity {
    ($(#[$meta:meta])* $ty:ident, $kind:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        pub struct $ty {
            #[serde(deserialize_with = "string_or_number")]
            pub id: String,
            pub name: String,
            #[serde(flatten)]
            pub extra: Map<String, Value>,
        }

        impl $ty {
            #[must_use]
            pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
                Self {
                    id: id.into(),
                    name: name.into(),
                    extra: Map::new(),
                }
            }
        }

        impl Entity for $ty {
            const KIND: EntityKind = $kind;

            fn id(&self) -> &str {
                &self.id
            }

            fn name(&self) -> &str {
                &self.name
            }
        }
    };
}

reference_entity!(
    /// A store that sells products listed in the catalog.
    Retailer,
    EntityKind::Retailer
);
reference_entity!(
    /// A product brand, e.g. a designer label.
    Brand,
    EntityKind::Brand
);
reference_entity!(
    /// A color facet value.
    Color,
    EntityKind::Color
);
reference_entity!(
    /// A (women's) product category such as `dresses`.
    Category,
    EntityKind::Category
);

/// Accepts ids sent either as JSON strings or as bare numbers.
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number id, got {other}"
        ))),
    }
}

/// Optional variant of [`string_or_number`]; `null` becomes `None`.
pub(crate) fn optional_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected string or number id, got {other}"
        ))),
    }
}
