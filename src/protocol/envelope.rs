//! Request and response envelopes.
//!
//! Requests are decoded leniently: any valid JSON is accepted, and a field
//! of the wrong JSON type is treated as absent. `requestId` and `name` are
//! kept as raw JSON values so they can be echoed back unchanged.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::protocol::error::RelayError;

/// `type` of every error reply.
pub const ERROR_TYPE: &str = "error";

/// Suffix appended to a request type to form its success reply type.
pub const RESPONSE_SUFFIX: &str = "Response";

/// An inbound request.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestEnvelope {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub request_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub battle_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub trainer: Option<String>,
}

impl RequestEnvelope {
    /// Decode a frame payload. Fails only if the bytes are not JSON.
    pub fn parse(payload: &[u8]) -> Result<Self, RelayError> {
        let value: Value =
            serde_json::from_slice(payload).map_err(|_| RelayError::MalformedPayload)?;
        Ok(Self::from_value(value))
    }

    /// Extract the known fields from any JSON value. Non-objects yield an empty envelope.
    pub fn from_value(value: Value) -> Self {
        let Value::Object(mut fields) = value else {
            return Self::default();
        };

        Self {
            request_type: take_string(&mut fields, "type"),
            request_id: fields.remove("requestId"),
            name: fields.remove("name"),
            battle_type: take_string(&mut fields, "battleType"),
            trainer: take_string(&mut fields, "trainer"),
        }
    }

    /// The subject name for lookups, or "" when absent or not a string.
    pub fn name_or_empty(&self) -> &str {
        self.name.as_ref().and_then(Value::as_str).unwrap_or_default()
    }
}

fn take_string(fields: &mut Map<String, Value>, key: &str) -> Option<String> {
    match fields.remove(key) {
        Some(Value::String(s)) => Some(s),
        _ => None,
    }
}

/// An outbound reply. Absent fields are omitted from the JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<Value>,

    #[serde(rename = "type")]
    pub response_type: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ResponseEnvelope {
    /// Success reply carrying `data`.
    pub fn success(
        response_type: impl Into<String>,
        request_id: Option<Value>,
        name: Option<Value>,
        data: Value,
    ) -> Self {
        Self {
            request_id,
            response_type: response_type.into(),
            name,
            data: Some(data),
            message: None,
        }
    }

    /// Error reply carrying the error's wire message.
    pub fn error(request_id: Option<Value>, error: &RelayError) -> Self {
        Self {
            request_id,
            response_type: ERROR_TYPE.to_string(),
            name: None,
            data: None,
            message: Some(error.to_string()),
        }
    }

    /// Reply to a frame that could not be decoded.
    pub fn malformed() -> Self {
        Self::error(None, &RelayError::MalformedPayload)
    }

    pub fn is_error(&self) -> bool {
        self.response_type == ERROR_TYPE
    }
}
