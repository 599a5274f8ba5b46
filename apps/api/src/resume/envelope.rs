use axum::{
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;

/// The `{success, message?, error?, result?}` wrapper every JSON endpoint answers with.
///
/// Lookups that find nothing still report `success: true` and carry the reason
/// in `error` or `message`; only transport failures use HTTP error statuses.
/// A `result` of `Some(None)` serializes as an explicit `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope<T: Serialize = Value> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<T>,
}

impl<T: Serialize> Envelope<T> {
    pub fn ok(result: T) -> Self {
        Envelope {
            success: true,
            message: None,
            error: None,
            result: Some(result),
        }
    }

    /// Success without a result field.
    pub fn empty() -> Self {
        Envelope {
            success: true,
            message: None,
            error: None,
            result: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}
