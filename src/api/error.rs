//! Expense API-specific error types.

/// Errors that can occur while talking to the expense API.
///
/// Every variant is treated the same way by callers: the request failed and
/// local state is left as it was.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// HTTP request failed before a response arrived
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// API answered with a non-2xx status
    #[error(
        "API error (status {status}){}",
        detail.as_deref().map(|d| format!(": {}", d)).unwrap_or_default()
    )]
    Status { status: u16, detail: Option<String> },

    /// Failed to deserialize API response
    #[error("Failed to deserialize API response: {0}")]
    Deserialization(#[from] serde_json::Error),
}

impl ApiError {
    /// Return the server-provided `detail` message, if any.
    ///
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Status { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    /// Return the message to show the user: the server `detail` when present,
    /// otherwise the given fallback.
    ///
    pub fn user_message(&self, fallback: &str) -> String {
        self.detail().unwrap_or(fallback).to_owned()
    }
}

/// Extract a user-facing message from an error response body.
///
/// `detail` is either a plain string or a list of validation entries each
/// carrying a `msg`.
pub(crate) fn detail_from_body(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    match value.get("detail")? {
        serde_json::Value::String(message) if !message.trim().is_empty() => {
            Some(message.to_owned())
        }
        serde_json::Value::Array(entries) => {
            let messages: Vec<&str> = entries
                .iter()
                .filter_map(|entry| entry.get("msg").and_then(|m| m.as_str()))
                .collect();
            if messages.is_empty() {
                None
            } else {
                Some(messages.join("; "))
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_display() {
        let error = ApiError::Status {
            status: 400,
            detail: Some("Category already exists".to_string()),
        };
        let error_str = error.to_string();
        assert!(error_str.contains("400"));
        assert!(error_str.contains("Category already exists"));

        let error = ApiError::Status {
            status: 500,
            detail: None,
        };
        assert_eq!(error.to_string(), "API error (status 500)");
    }

    #[test]
    fn test_user_message_prefers_detail() {
        let error = ApiError::Status {
            status: 409,
            detail: Some("Duplicate name".to_string()),
        };
        assert_eq!(error.user_message("Failed to save category"), "Duplicate name");

        let error = ApiError::Status {
            status: 404,
            detail: None,
        };
        assert_eq!(
            error.user_message("Failed to delete expense"),
            "Failed to delete expense"
        );
    }

    #[test]
    fn test_detail_from_string_body() {
        let body = br#"{"detail": "Category not found"}"#;
        assert_eq!(
            detail_from_body(body),
            Some("Category not found".to_string())
        );
    }

    #[test]
    fn test_detail_from_validation_list() {
        let body = br#"{"detail": [
            {"loc": ["body", "amount"], "msg": "value is not a valid float"},
            {"loc": ["body", "date"], "msg": "field required"}
        ]}"#;
        assert_eq!(
            detail_from_body(body),
            Some("value is not a valid float; field required".to_string())
        );
    }

    #[test]
    fn test_detail_missing_or_unreadable() {
        assert_eq!(detail_from_body(b"Internal Server Error"), None);
        assert_eq!(detail_from_body(br#"{"message": "nope"}"#), None);
        assert_eq!(detail_from_body(br#"{"detail": "  "}"#), None);
        assert_eq!(detail_from_body(b""), None);
    }
}
