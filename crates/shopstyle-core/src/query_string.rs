//! Query-string helpers for reading and rewriting URLs as plain strings.
//!
//! These work on relative URLs (`/browse?cat=dresses#top`) as well as
//! absolute ones, which is why they scan strings instead of going through
//! `reqwest::Url`. None of them fail: input that cannot be interpreted is
//! reported as an absent parameter or handed back unchanged.
//!
//! Every function assumes a parameter name occurs at most once in a URL.

use std::collections::BTreeMap;

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use rand::Rng;

/// Name of the cache-busting parameter appended by [`build_url`].
pub const CACHE_BUSTER_PARAM: &str = "zzcb";

/// Exclusive upper bound of the cache-busting token.
pub const CACHE_BUSTER_RANGE: u32 = 10_000;

/// Characters left alone by `encodeURIComponent`.
pub(crate) const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Splits a URL into `(path, query, fragment)`.
///
/// `query` excludes the leading `?`; `fragment` keeps its leading `#` so it
/// can be re-appended verbatim.
#[must_use]
pub fn split_url(url: &str) -> (&str, Option<&str>, &str) {
    let (head, fragment) = match url.find('#') {
        Some(i) => url.split_at(i),
        None => (url, ""),
    };
    match head.find('?') {
        Some(i) => (&head[..i], Some(&head[i + 1..]), fragment),
        None => (head, None, fragment),
    }
}

fn segments(query: Option<&str>) -> Vec<&str> {
    match query {
        Some(q) if !q.is_empty() => q.split('&').collect(),
        _ => Vec::new(),
    }
}

fn value_of<'a>(segment: &'a str, name: &str) -> Option<&'a str> {
    segment.strip_prefix(name)?.strip_prefix('=')
}

fn assemble(path: &str, segments: &[&str], fragment: &str) -> String {
    let mut out = String::with_capacity(path.len() + fragment.len() + 16);
    out.push_str(path);
    if !segments.is_empty() {
        out.push('?');
        out.push_str(&segments.join("&"));
    }
    out.push_str(fragment);
    out
}

/// Returns the raw (still percent-encoded) value of `name` in the query
/// component of `url`.
///
/// Anything after `#` is ignored. Returns `None` when the URL has no query
/// or the parameter is absent.
#[must_use]
pub fn get_parameter(url: &str, name: &str) -> Option<String> {
    if name.is_empty() {
        return None;
    }
    let (_, query, _) = split_url(url);
    segments(query)
        .into_iter()
        .find_map(|segment| value_of(segment, name))
        .map(str::to_owned)
}

/// Sets, appends, or removes `name` in the query of `url`.
///
/// A non-empty `value` replaces the existing value or appends `name=value`
/// ahead of any fragment. `None` or an empty value removes the parameter and
/// its separator; the `?` is dropped when no parameters remain. The value is
/// inserted as given, without encoding.
///
/// An empty `url`, or a removal of a parameter that is not there, returns
/// the input unchanged.
#[must_use]
pub fn set_parameter(url: &str, name: &str, value: Option<&str>) -> String {
    if url.is_empty() || name.is_empty() {
        return url.to_owned();
    }

    let (path, query, fragment) = split_url(url);
    let mut parts = segments(query);
    let position = parts.iter().position(|s| value_of(s, name).is_some());

    match value.filter(|v| !v.is_empty()) {
        Some(value) => {
            let pair = format!("{name}={value}");
            match position {
                Some(i) => parts[i] = &pair,
                None => parts.push(&pair),
            }
            assemble(path, &parts, fragment)
        }
        None => match position {
            Some(i) => {
                parts.remove(i);
                assemble(path, &parts, fragment)
            }
            None => url.to_owned(),
        },
    }
}

/// Builds `path?k1=v1&k2=v2...` with keys in ascending order.
///
/// Values are percent-encoded the way `encodeURIComponent` does it; keys are
/// written as given. A repeated key keeps its last value. With `break_cache`
/// a `zzcb=<random>` parameter is appended after the sorted parameters.
#[must_use]
pub fn build_url<I, K, V>(path: &str, params: I, break_cache: bool) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: AsRef<str>,
{
    let sorted: BTreeMap<String, String> = params
        .into_iter()
        .map(|(k, v)| (k.into(), utf8_percent_encode(v.as_ref(), COMPONENT).to_string()))
        .collect();

    let mut url = path.to_owned();
    let mut separator = if path.contains('?') { '&' } else { '?' };
    for (key, value) in &sorted {
        url.push(separator);
        url.push_str(key);
        url.push('=');
        url.push_str(value);
        separator = '&';
    }

    if break_cache {
        url.push(separator);
        url.push_str(CACHE_BUSTER_PARAM);
        url.push('=');
        url.push_str(&cache_buster().to_string());
    }

    url
}

/// Random cache-busting token in `[0, CACHE_BUSTER_RANGE)`.
#[must_use]
pub fn cache_buster() -> u32 {
    rand::rng().random_range(0..CACHE_BUSTER_RANGE)
}

/// Percent-decodes a raw parameter value, replacing invalid UTF-8.
#[must_use]
pub fn decode_value(raw: &str) -> String {
    percent_decode_str(raw).decode_utf8_lossy().into_owned()
}
