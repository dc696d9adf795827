//! The `{action, message}` envelope wrapped around every catalog response.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::CatalogError;

const SUCCESS: &str = "success";

/// A decoded response envelope.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiEnvelope<T> {
    /// `action == "success"`; holds the `message` payload.
    Success(T),
    /// Any other `action` (or none at all). `raw` is the whole body.
    Failure { action: Option<String>, raw: Value },
}

impl ApiEnvelope<Value> {
    /// Classifies a response body by its `action` field.
    #[must_use]
    pub fn from_json(mut body: Value) -> Self {
        let action = body
            .get("action")
            .and_then(Value::as_str)
            .map(str::to_owned);
        if action.as_deref() == Some(SUCCESS) {
            let payload = body
                .get_mut("message")
                .map(Value::take)
                .unwrap_or(Value::Null);
            ApiEnvelope::Success(payload)
        } else {
            ApiEnvelope::Failure { action, raw: body }
        }
    }
}

impl<T> ApiEnvelope<T> {
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, ApiEnvelope::Success(_))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiEnvelope<U> {
        match self {
            ApiEnvelope::Success(payload) => ApiEnvelope::Success(f(payload)),
            ApiEnvelope::Failure { action, raw } => ApiEnvelope::Failure { action, raw },
        }
    }

    /// The payload, or `None` for a failure envelope.
    pub fn into_success(self) -> Option<T> {
        match self {
            ApiEnvelope::Success(payload) => Some(payload),
            ApiEnvelope::Failure { .. } => None,
        }
    }
}

/// Decodes a success payload that must be a JSON array.
///
/// Array items that do not deserialize as `T` are skipped with a warning;
/// a payload that is not an array at all is a [`CatalogError::Deserialize`].
///
/// # Errors
///
/// Returns [`CatalogError::Deserialize`] when `payload` is not an array.
pub fn decode_list<T: DeserializeOwned>(
    payload: Value,
    context: &str,
) -> Result<Vec<T>, CatalogError> {
    let items: Vec<Value> =
        serde_json::from_value(payload).map_err(|e| CatalogError::Deserialize {
            context: context.to_owned(),
            source: e,
        })?;

    let total = items.len();
    let decoded: Vec<T> = items
        .into_iter()
        .enumerate()
        .filter_map(|(position, item)| match serde_json::from_value::<T>(item) {
            Ok(value) => Some(value),
            Err(error) => {
                tracing::warn!(context, position, error = %error, "skipping malformed record");
                None
            }
        })
        .collect();

    if decoded.len() < total {
        tracing::warn!(
            context,
            total,
            kept = decoded.len(),
            "dropped malformed records from catalog response"
        );
    }

    Ok(decoded)
}
