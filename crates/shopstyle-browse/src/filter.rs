use shopstyle_core::SortOrder;

/// Breadcrumb shown before the first search has resolved.
pub const INITIAL_BREADCRUMB: &str = "Anything";

/// Value the URL and UI use for an unrestricted facet.
pub const ANY: &str = "any";

/// One filter facet (color or brand): unrestricted, or a specific entity id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Facet {
    #[default]
    Any,
    Id(String),
}

impl Facet {
    /// Decodes a URL parameter value. Absent, empty and `"any"` all mean [`Facet::Any`].
    #[must_use]
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            None | Some("" | ANY) => Self::Any,
            Some(id) => Self::Id(id.to_owned()),
        }
    }

    #[must_use]
    pub fn as_id(&self) -> Option<&str> {
        match self {
            Self::Any => None,
            Self::Id(id) => Some(id),
        }
    }

    #[must_use]
    pub fn is_any(&self) -> bool {
        matches!(self, Self::Any)
    }
}

impl From<&str> for Facet {
    fn from(value: &str) -> Self {
        Self::from_param(Some(value))
    }
}

/// The user's current browse selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrowseFilter {
    pub color: Facet,
    pub brand: Facet,
    /// `None` until a category is chosen or decoded from the URL.
    pub category: Option<String>,
    pub sort_order: SortOrder,
}

impl BrowseFilter {
    /// Opaque filter clause for the product endpoint, e.g. `fl=c7&fl=b12`.
    ///
    /// Color comes first. Category never contributes a clause; it is part of
    /// the endpoint path. `None` when both facets are unrestricted.
    #[must_use]
    pub fn filter_expression(&self) -> Option<String> {
        let clauses: Vec<String> = [
            self.color.as_id().map(|id| format!("fl=c{id}")),
            self.brand.as_id().map(|id| format!("fl=b{id}")),
        ]
        .into_iter()
        .flatten()
        .collect();
        (!clauses.is_empty()).then(|| clauses.join("&"))
    }

    /// URL parameters that describe this filter after a user-driven change.
    ///
    /// `cat` is always written, with `fallback_category` standing in for an
    /// unset category. Unrestricted facets are omitted.
    #[must_use]
    pub fn location_params(&self, fallback_category: &str) -> Vec<(&'static str, String)> {
        let category = self
            .category
            .as_deref()
            .filter(|c| !c.is_empty())
            .unwrap_or(fallback_category);
        let mut params = vec![("cat", category.to_owned())];
        if let Some(color) = self.color.as_id() {
            params.push(("color", color.to_owned()));
        }
        if let Some(brand) = self.brand.as_id() {
            params.push(("brand", brand.to_owned()));
        }
        params
    }
}

/// Joins the display names of color, brand and category with single spaces.
///
/// Missing names are empty strings, so the result can carry leading or
/// doubled spaces; trimming is up to whoever renders it.
#[must_use]
pub fn breadcrumb(color_name: &str, brand_name: &str, category_name: &str) -> String {
    format!("{color_name} {brand_name} {category_name}")
}
