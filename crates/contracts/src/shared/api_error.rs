use serde_json::Value;
use thiserror::Error;

/// Failure of a call to the REST API.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Unauthorized")]
    Unauthorized { body: Option<Value> },

    #[error("Not found")]
    NotFound,

    #[error("Server error: {status}")]
    Server { status: u16, body: Option<Value> },

    #[error("Failed to parse response: {0}")]
    Parse(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// Builds the error for a non-2xx response from its status and raw body.
    ///
    /// JSON bodies are kept as JSON; any other non-blank body is kept as a
    /// JSON string so it can still be shown to the user.
    pub fn from_status(status: u16, body_text: &str) -> Self {
        let body = parse_body(body_text);
        match status {
            401 => ApiError::Unauthorized { body },
            404 => ApiError::NotFound,
            _ => ApiError::Server { status, body },
        }
    }

    pub fn body(&self) -> Option<&Value> {
        match self {
            ApiError::Unauthorized { body } | ApiError::Server { body, .. } => body.as_ref(),
            _ => None,
        }
    }

    /// The server body serialized verbatim, or `fallback` when there is none.
    pub fn user_message(&self, fallback: &str) -> String {
        match self.body() {
            Some(Value::String(text)) => text.clone(),
            Some(value) => value.to_string(),
            None => fallback.to_string(),
        }
    }

    /// The body's `error` field when present, otherwise [`Self::user_message`].
    pub fn error_field_or_body(&self, fallback: &str) -> String {
        match self.body().and_then(|b| b.get("error")).and_then(Value::as_str) {
            Some(message) => message.to_string(),
            None => self.user_message(fallback),
        }
    }

    /// Every message of a field-error body (`{"field": ["msg", ...]}`),
    /// one per line. Falls back when the body is not an object.
    pub fn field_messages(&self, fallback: &str) -> String {
        match self.body() {
            Some(Value::Object(map)) => {
                let messages: Vec<String> = map.values().flat_map(flatten_messages).collect();
                if messages.is_empty() {
                    fallback.to_string()
                } else {
                    messages.join("\n")
                }
            }
            _ => fallback.to_string(),
        }
    }
}

fn parse_body(body_text: &str) -> Option<Value> {
    let trimmed = body_text.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(serde_json::from_str(trimmed).unwrap_or_else(|_| Value::String(trimmed.to_string())))
}

fn flatten_messages(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items.iter().flat_map(flatten_messages).collect(),
        Value::String(text) => vec![text.clone()],
        Value::Null => Vec::new(),
        other => vec![other.to_string()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_maps_to_variant() {
        assert!(matches!(ApiError::from_status(401, ""), ApiError::Unauthorized { body: None }));
        assert_eq!(ApiError::from_status(404, "{}"), ApiError::NotFound);
        assert!(matches!(
            ApiError::from_status(500, ""),
            ApiError::Server { status: 500, body: None }
        ));
    }

    #[test]
    fn user_message_serializes_structured_body() {
        let err = ApiError::from_status(400, r#"{"year":["Ensure this value is valid."]}"#);
        assert_eq!(
            err.user_message("generic"),
            r#"{"year":["Ensure this value is valid."]}"#
        );
    }

    #[test]
    fn user_message_falls_back_without_body() {
        assert_eq!(ApiError::Network("offline".into()).user_message("generic"), "generic");
        assert_eq!(ApiError::from_status(502, "  ").user_message("generic"), "generic");
    }

    #[test]
    fn plain_text_body_is_kept() {
        let err = ApiError::from_status(500, "Internal Server Error");
        assert_eq!(err.user_message("generic"), "Internal Server Error");
    }

    #[test]
    fn error_field_is_preferred() {
        let err = ApiError::from_status(400, r#"{"error":"No file uploaded"}"#);
        assert_eq!(err.error_field_or_body("generic"), "No file uploaded");

        let err = ApiError::from_status(400, r#"{"detail":"x"}"#);
        assert_eq!(err.error_field_or_body("generic"), r#"{"detail":"x"}"#);
    }

    #[test]
    fn field_messages_are_flattened() {
        let err = ApiError::from_status(
            400,
            r#"{"email":["Email taken."],"username":["Name taken.","Too short."]}"#,
        );
        assert_eq!(
            err.field_messages("generic"),
            "Email taken.\nName taken.\nToo short."
        );
        assert_eq!(ApiError::NotAuthenticated.field_messages("generic"), "generic");
    }
}
