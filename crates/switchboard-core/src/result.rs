//! The uniform result shape returned by handlers and by the dispatcher.
//!
//! On the wire a [`WsResult`] is one of exactly three JSON objects:
//!
//! ```text
//! {"success": true,  "data": <payload>}
//! {"success": true,  "message": "<text>"}
//! {"success": false, "error": "<text>"}
//! ```
//!
//! Callers branch on [`WsResult::is_success`]; the error side is always a
//! plain string, never a transport error value.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Result of a webservice operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "WsResultRepr", try_from = "WsResultRepr")]
pub enum WsResult {
    /// Success carrying a payload
    Data(Value),
    /// Success for operations with no payload
    Message(String),
    /// Failure with a human-readable message
    Error(String),
}

impl WsResult {
    /// Successful result with a payload.
    pub fn ok(data: impl Into<Value>) -> Self {
        Self::Data(data.into())
    }

    /// Successful result with only a message.
    pub fn message(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }

    /// Failed result.
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error(message.into())
    }

    /// `true` for `Data` and `Message`.
    pub fn is_success(&self) -> bool {
        !matches!(self, Self::Error(_))
    }

    /// Payload, if this is a `Data` result.
    pub fn data(&self) -> Option<&Value> {
        match self {
            Self::Data(data) => Some(data),
            _ => None,
        }
    }

    /// Success message, if this is a `Message` result.
    pub fn success_message(&self) -> Option<&str> {
        match self {
            Self::Message(message) => Some(message),
            _ => None,
        }
    }

    /// Error message, if this is an `Error` result.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Error(error) => Some(error),
            _ => None,
        }
    }

    /// Take the payload out, if any.
    pub fn into_data(self) -> Option<Value> {
        match self {
            Self::Data(data) => Some(data),
            _ => None,
        }
    }

    /// Decode the payload into a concrete type.
    ///
    /// Returns `None` when there is no payload.
    pub fn data_as<T: DeserializeOwned>(&self) -> Option<Result<T, serde_json::Error>> {
        self.data().map(|data| T::deserialize(data))
    }
}

impl std::fmt::Display for WsResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Data(_) => write!(f, "success"),
            Self::Message(message) => write!(f, "success: {}", message),
            Self::Error(error) => write!(f, "error: {}", error),
        }
    }
}

#[derive(Serialize, Deserialize)]
struct WsResultRepr {
    success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl From<WsResult> for WsResultRepr {
    fn from(result: WsResult) -> Self {
        let mut repr = WsResultRepr {
            success: result.is_success(),
            data: None,
            message: None,
            error: None,
        };
        match result {
            WsResult::Data(data) => repr.data = Some(data),
            WsResult::Message(message) => repr.message = Some(message),
            WsResult::Error(error) => repr.error = Some(error),
        }
        repr
    }
}

impl TryFrom<WsResultRepr> for WsResult {
    type Error = String;

    fn try_from(repr: WsResultRepr) -> Result<Self, String> {
        match repr {
            WsResultRepr {
                success: true,
                data: Some(data),
                message: None,
                error: None,
            } => Ok(WsResult::Data(data)),
            WsResultRepr {
                success: true,
                data: None,
                message: Some(message),
                error: None,
            } => Ok(WsResult::Message(message)),
            // `"data": null` deserializes to `None`
            WsResultRepr {
                success: true,
                data: None,
                message: None,
                error: None,
            } => Ok(WsResult::Data(Value::Null)),
            WsResultRepr {
                success: false,
                data: None,
                message: None,
                error: Some(error),
            } => Ok(WsResult::Error(error)),
            WsResultRepr { success, .. } => Err(format!(
                "result with success={} must carry exactly one of {}",
                success,
                if success { "data or message" } else { "error" }
            )),
        }
    }
}
