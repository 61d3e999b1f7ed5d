//
//  pyramid-api
//  api/common/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Common API Types
//!
//! Error handling and response envelope types shared by every endpoint.
//!
//! # Overview
//!
//! The Pyramid REST API wraps results in an envelope:
//!
//! ```json
//! {"data": {"success": true, "modifiedList": []}}
//! ```
//!
//! A request can fail on two tiers:
//!
//! - **Transport**: a non-2xx status, reported as [`ApiError::Http`]
//! - **Logical**: a 2xx response whose body carries an `error` field,
//!   reported as [`ApiError::Server`]
//!
//! # Example
//!
//! ```rust
//! use pyramid_api::api::common::ApiError;
//!
//! fn handle_result<T>(result: Result<T, ApiError>) {
//!     match result {
//!         Ok(_) => println!("Success!"),
//!         Err(ApiError::InvalidCredentials) => println!("Check the user name and password"),
//!         Err(ApiError::Server(message)) => println!("Server rejected the request: {}", message),
//!         Err(e) => println!("Error: {}", e),
//!     }
//! }
//! ```

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Unified error type for all Pyramid API operations.
///
/// # Variants
///
/// | Variant | Description |
/// |---------|-------------|
/// | `Http` | Non-2xx status |
/// | `Network` | Connection or transport failure |
/// | `InvalidCredentials` | Password grant rejected |
/// | `InvalidToken` | Token grant rejected |
/// | `Server` | 2xx body with an `error` field |
/// | `MissingData` | 2xx body without the `data` envelope |
/// | `Decode` | JSON (de)serialization failure |
///
/// # Notes
///
/// - `Network` and `Decode` convert automatically from their source errors
#[derive(Error, Debug)]
pub enum ApiError {
    /// The server answered with a non-success status.
    ///
    /// # Parameters
    ///
    /// - `status` - The HTTP status
    /// - `body` - The raw response body
    #[error("HTTP {status}: {body}")]
    Http {
        /// Returned status
        status: StatusCode,
        /// Raw response body
        body: String,
    },

    /// A network-level error occurred during the request.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The password grant was rejected.
    #[error("Invalid Credentials")]
    InvalidCredentials,

    /// The token grant was rejected.
    #[error("Invalid Token")]
    InvalidToken,

    /// The server reported a logical error inside a successful response.
    ///
    /// # Parameters
    ///
    /// - `0` - The `error` field rendered as text
    #[error("Unexpected error returned from server: {0}")]
    Server(String),

    /// The response has no `data` envelope.
    #[error("Response has no data field")]
    MissingData,

    /// A payload or response could not be converted.
    #[error("JSON error: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// Whether the error means the stored credential is no longer usable.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Self::InvalidCredentials | Self::InvalidToken)
            || matches!(self, Self::Http { status, .. } if *status == StatusCode::UNAUTHORIZED)
    }
}

/// A successful response body.
///
/// Bodies that parse as JSON are kept as [`Value`]; anything else is kept as
/// text.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiBody {
    Json(Value),
    Text(String),
}

impl ApiBody {
    /// Deserializes the `data` field of the envelope.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::MissingData`] when the body is not a JSON object
    /// with a `data` field, and [`ApiError::Decode`] when `data` does not
    /// match `T`.
    pub fn into_data<T: DeserializeOwned>(self) -> Result<T, ApiError> {
        match self {
            Self::Json(Value::Object(mut map)) => {
                let data = map.remove("data").ok_or(ApiError::MissingData)?;
                Ok(serde_json::from_value(data)?)
            }
            _ => Err(ApiError::MissingData),
        }
    }

    /// Reads the body as a single string.
    ///
    /// Plain text is returned as is. A JSON string is unquoted, and an
    /// envelope whose `data` is a string yields that string.
    pub fn into_text(self) -> Result<String, ApiError> {
        match self {
            Self::Text(text) => Ok(text),
            Self::Json(Value::String(text)) => Ok(text),
            json => json.into_data::<String>(),
        }
    }

    /// Renders the body for display.
    pub fn to_pretty(&self) -> String {
        match self {
            Self::Json(value) => serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string()),
            Self::Text(text) => text.clone(),
        }
    }
}

/// Serializes a record and drops its top-level `null` fields.
///
/// Nested objects are left untouched.
pub fn to_payload<T: Serialize>(record: &T) -> Result<Value, ApiError> {
    let mut value = serde_json::to_value(record)?;
    if let Value::Object(map) = &mut value {
        map.retain(|_, field| !field.is_null());
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_into_data() {
        let body = ApiBody::Json(json!({"data": {"success": true}}));
        let value: Value = body.into_data().unwrap();
        assert_eq!(value, json!({"success": true}));
    }

    #[test]
    fn test_into_data_missing() {
        let err = ApiBody::Json(json!({"result": 1})).into_data::<Value>().unwrap_err();
        assert!(matches!(err, ApiError::MissingData));
        let err = ApiBody::Text("ok".to_string()).into_data::<Value>().unwrap_err();
        assert!(matches!(err, ApiError::MissingData));
    }

    #[test]
    fn test_into_text() {
        assert_eq!(ApiBody::Text("tok".into()).into_text().unwrap(), "tok");
        assert_eq!(ApiBody::Json(json!("tok")).into_text().unwrap(), "tok");
        assert_eq!(ApiBody::Json(json!({"data": "tok"})).into_text().unwrap(), "tok");
        assert!(ApiBody::Json(json!(42)).into_text().is_err());
    }

    #[test]
    fn test_to_payload_strips_top_level_nulls() {
        #[derive(Serialize)]
        struct Folder {
            name: &'static str,
            id: Option<&'static str>,
            nested: Value,
        }

        let payload = to_payload(&Folder {
            name: "reports",
            id: None,
            nested: json!({"keep": null}),
        })
        .unwrap();
        assert_eq!(payload, json!({"name": "reports", "nested": {"keep": null}}));
    }

    #[test]
    fn test_is_auth_error() {
        assert!(ApiError::InvalidToken.is_auth_error());
        assert!(ApiError::Http {
            status: StatusCode::UNAUTHORIZED,
            body: String::new()
        }
        .is_auth_error());
        assert!(!ApiError::MissingData.is_auth_error());
    }
}
