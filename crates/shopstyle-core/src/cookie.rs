//! Session cookie codec.
//!
//! The cookie value is a one-character version marker `a` followed by the
//! percent-encoding of `key=value;` repeated for each entry. A value with any
//! other marker is treated as foreign and yields no data.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use percent_encoding::{percent_decode_str, utf8_percent_encode};

use crate::query_string::COMPONENT;

/// Version marker prefixed to every cookie value this module writes.
pub const COOKIE_VERSION: char = 'a';

/// Encodes `pairs` into a versioned cookie value.
#[must_use]
pub fn encode_cookie_value<I, K, V>(pairs: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut plain = String::new();
    for (key, value) in pairs {
        plain.push_str(key.as_ref());
        plain.push('=');
        plain.push_str(value.as_ref());
        plain.push(';');
    }
    format!(
        "{COOKIE_VERSION}{}",
        utf8_percent_encode(&plain, COMPONENT)
    )
}

/// Builds a `Set-Cookie`-style string scoped to `/`.
///
/// With `max_age` an `expires` attribute is added, computed from `now` and
/// rendered as an RFC 1123 GMT date.
#[must_use]
pub fn set_cookie_header<I, K, V>(
    name: &str,
    pairs: I,
    max_age: Option<Duration>,
    now: DateTime<Utc>,
) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let value = encode_cookie_value(pairs);
    let expires = max_age
        .map(|age| {
            let at = now + age;
            format!("; expires={}", at.format("%a, %d %b %Y %H:%M:%S GMT"))
        })
        .unwrap_or_default();
    format!("{name}={value}{expires}; path=/")
}

/// Reads the cookie called `name` out of a `Cookie` header (or
/// `document.cookie`-style string) and decodes its entries.
///
/// Returns `None` when the cookie is missing or carries a foreign version
/// marker. Tokens without a key (`=x`) or without `=` are skipped.
#[must_use]
pub fn read_cookie(all_cookies: &str, name: &str) -> Option<BTreeMap<String, String>> {
    let raw = all_cookies
        .split(';')
        .map(str::trim_start)
        .find_map(|c| c.strip_prefix(name)?.strip_prefix('='))?;

    let encoded = raw.strip_prefix(COOKIE_VERSION)?;
    let decoded = percent_decode_str(encoded).decode_utf8_lossy();

    let entries = decoded
        .split(';')
        .filter_map(|token| {
            let index = token.find('=')?;
            if index < 1 {
                return None;
            }
            Some((token[..index].to_owned(), token[index + 1..].to_owned()))
        })
        .collect();

    Some(entries)
}
