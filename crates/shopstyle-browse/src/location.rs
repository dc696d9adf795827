//! The browse view's address: a route URL whose query carries the filter.

use shopstyle_core::query_string::{build_url, decode_value, get_parameter, split_url};

/// Filter parameters decoded from a [`Location`]. Empty values count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationSearch {
    pub category: Option<String>,
    pub color: Option<String>,
    pub brand: Option<String>,
}

/// Current route URL, e.g. `/browse?brand=12&cat=dresses`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    url: String,
}

impl Location {
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    fn param(&self, name: &str) -> Option<String> {
        get_parameter(&self.url, name)
            .map(|raw| decode_value(&raw))
            .filter(|v| !v.is_empty())
    }

    #[must_use]
    pub fn search(&self) -> LocationSearch {
        LocationSearch {
            category: self.param("cat"),
            color: self.param("color"),
            brand: self.param("brand"),
        }
    }

    /// Replaces the whole query with `params` (sorted by key), keeping the
    /// path and any fragment.
    pub fn set_search<I, K, V>(&mut self, params: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        let (path, _, fragment) = split_url(&self.url);
        let mut url = build_url(path, params, false);
        url.push_str(fragment);
        self.url = url;
    }
}
