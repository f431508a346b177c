//! Response envelope shared by every API endpoint.
//!
//! The server wraps every payload as `{ "status": ..., "data": ..., "httpStatus": ... }`.
//! [`ApiEnvelope::unwrap`] is the only place that envelope is peeled off; callers
//! never see `status` or `httpStatus`.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Errors raised while unwrapping an [`ApiEnvelope`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EnvelopeError {
    /// The envelope carried no `data` field (or `data: null`).
    #[error("response envelope has no data (status {status}, httpStatus {http_status:?})")]
    MissingData {
        /// The envelope `status` rendered as text.
        status: String,
        /// The envelope `httpStatus`, if present.
        http_status: Option<u16>,
    },
}

/// The `{ status, data, httpStatus }` wrapper around every response body.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiEnvelope<T> {
    /// Free-form status marker (`"ok"`, `"success"`, a number...).
    #[serde(default)]
    pub status: Value,
    /// The payload.
    pub data: Option<T>,
    /// HTTP status echoed by the server.
    #[serde(default)]
    pub http_status: Option<u16>,
}

impl<T> ApiEnvelope<T> {
    /// Extract the payload and discard the envelope.
    ///
    /// # Errors
    ///
    /// Returns [`EnvelopeError::MissingData`] if the envelope has no payload.
    pub fn unwrap(self) -> Result<T, EnvelopeError> {
        match self.data {
            Some(data) => Ok(data),
            None => Err(EnvelopeError::MissingData {
                status: status_text(&self.status),
                http_status: self.http_status,
            }),
        }
    }
}

fn status_text(status: &Value) -> String {
    match status {
        Value::String(s) => s.clone(),
        Value::Null => "none".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde::Serialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, Serialize, PartialEq)]
    struct Named {
        id: String,
        name: String,
    }

    #[test]
    fn test_unwrap_returns_only_payload() {
        let body = json!({"status": "ok", "data": {"id": "1", "name": "Acme"}, "httpStatus": 200});
        let envelope: ApiEnvelope<Named> = serde_json::from_value(body).unwrap();
        let named = envelope.unwrap().unwrap();

        assert_eq!(
            named,
            Named {
                id: "1".to_string(),
                name: "Acme".to_string()
            }
        );
        // Re-serialising the payload shows no envelope field leaks through.
        assert_eq!(
            serde_json::to_value(&named).unwrap(),
            json!({"id": "1", "name": "Acme"})
        );
    }

    #[test]
    fn test_unwrap_as_raw_value() {
        let body = json!({"status": "ok", "data": {"id": "1", "name": "Acme"}, "httpStatus": 200});
        let envelope: ApiEnvelope<Value> = serde_json::from_value(body).unwrap();
        assert_eq!(envelope.unwrap().unwrap(), json!({"id": "1", "name": "Acme"}));
    }

    #[test]
    fn test_missing_data_is_an_error() {
        let body = json!({"status": "error", "httpStatus": 200});
        let envelope: ApiEnvelope<Named> = serde_json::from_value(body).unwrap();
        assert_eq!(
            envelope.unwrap(),
            Err(EnvelopeError::MissingData {
                status: "error".to_string(),
                http_status: Some(200)
            })
        );
    }

    #[test]
    fn test_null_data_is_an_error() {
        let body = json!({"status": 1, "data": null});
        let envelope: ApiEnvelope<Named> = serde_json::from_value(body).unwrap();
        let err = envelope.unwrap().unwrap_err();
        assert_eq!(
            err.to_string(),
            "response envelope has no data (status 1, httpStatus None)"
        );
    }

    #[test]
    fn test_envelope_fields_are_optional() {
        let envelope: ApiEnvelope<u32> = serde_json::from_value(json!({"data": 7})).unwrap();
        assert_eq!(envelope.unwrap().unwrap(), 7);
    }
}
