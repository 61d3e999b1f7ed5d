//
//  pyramid-api
//  api/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # HTTP Client Wrapper for the Pyramid REST API
//!
//! This module provides [`PyramidApi`], an authenticated session against a
//! Pyramid server. Every endpoint is a POST of a JSON body carrying the
//! session token in an `auth` field; responses come back in a `data`
//! envelope.
//!
//! ## Features
//!
//! - Password and token grants, validated at construction
//! - Envelope unwrapping into typed records
//! - Transport and logical error separation
//! - Endpoint recording while debug logging is enabled
//! - Custom User-Agent header

use std::collections::BTreeSet;
use std::sync::Mutex;

use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use super::common::{ApiBody, ApiError};
use super::endpoints::{self, Endpoint};
use crate::api::types::User;
use crate::auth::Grant;

/// An authenticated session against a Pyramid server.
///
/// # Creating a Session
///
/// ```rust,no_run
/// use pyramid_api::api::PyramidApi;
/// use pyramid_api::auth::Grant;
///
/// # async fn example() -> Result<(), pyramid_api::api::ApiError> {
/// let api = PyramidApi::connect(Grant::password(
///     "https://pyramid.example.com",
///     "admin",
///     "secret",
/// ))
/// .await?;
///
/// let me = api.get_me().await?;
/// println!("Logged in as {}", me.user_name);
/// # Ok(())
/// # }
/// ```
///
/// # Debug Recording
///
/// When `DEBUG` logging is enabled at construction time, every endpoint path
/// the session calls is recorded and can be listed with
/// [`PyramidApi::called_endpoints`]. Request and response bodies are logged
/// too, credentials included.
pub struct PyramidApi {
    /// The underlying HTTP client
    http: Client,
    /// Server root, without a trailing `/`
    domain: String,
    /// Session token sent as `auth`
    token: String,
    /// Paths called so far; `None` unless debug logging was on at construction
    called_endpoints: Option<Mutex<BTreeSet<String>>>,
}

impl std::fmt::Debug for PyramidApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PyramidApi")
            .field("domain", &self.domain)
            .field("token", &"<redacted>")
            .finish()
    }
}

impl PyramidApi {
    /// Builds an unauthenticated session for `domain`.
    fn new(domain: &str) -> Result<Self, ApiError> {
        let called_endpoints = if tracing::enabled!(tracing::Level::DEBUG) {
            tracing::warn!("Log level is DEBUG! The API client will log ALL requests and responses!");
            tracing::warn!("Unless you are debugging you do not want this!");
            Some(Mutex::new(BTreeSet::new()))
        } else {
            None
        };

        Ok(Self {
            http: Client::builder()
                .user_agent(format!("pyramid-api/{}", crate::VERSION))
                .build()?,
            domain: domain.trim_end_matches('/').to_string(),
            token: String::new(),
            called_endpoints,
        })
    }

    /// Consumes a grant and returns a validated session.
    ///
    /// # Errors
    ///
    /// - [`ApiError::InvalidCredentials`] if a password grant is rejected
    /// - [`ApiError::InvalidToken`] if a token grant is rejected
    /// - any other [`ApiError`] for failures unrelated to the credential
    pub async fn connect(grant: Grant) -> Result<Self, ApiError> {
        match grant {
            Grant::Password {
                domain,
                username,
                password,
            } => {
                let mut api = Self::new(&domain)?;
                api.token = api.authenticate(&username, &password).await?;
                Ok(api)
            }
            Grant::Token { domain, token } => {
                let mut api = Self::new(&domain)?;
                api.token = token;
                api.validate_token().await?;
                Ok(api)
            }
        }
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// Paths called so far, sorted. Empty unless debug recording is on.
    pub fn called_endpoints(&self) -> Vec<String> {
        self.called_endpoints
            .as_ref()
            .map(|called| {
                called
                    .lock()
                    .unwrap_or_else(|poisoned| poisoned.into_inner())
                    .iter()
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Sends one request to `path` with `body` as JSON.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Network`] if the request cannot be sent
    /// - [`ApiError::Http`] for a non-2xx status
    /// - [`ApiError::Server`] if the JSON body has an `error` field
    pub async fn call(&self, path: &str, body: &Value, method: Method) -> Result<ApiBody, ApiError> {
        if let Some(called) = &self.called_endpoints {
            called
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner())
                .insert(path.to_string());
        }

        let url = format!("{}{}", self.domain, path);
        let response = self.http.request(method, &url).json(body).send().await?;
        tracing::debug!("{}", path);
        tracing::debug!("{}", pretty(body));

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            tracing::error!("{} {} for {}", status.as_u16(), status.canonical_reason().unwrap_or(""), url);
            tracing::error!("error content: {}", text);
            return Err(ApiError::Http { status, body: text });
        }
        tracing::debug!("status -> {}", status.as_u16());

        match serde_json::from_str::<Value>(&text) {
            Ok(json) => {
                if let Some(error) = json.get("error") {
                    let message = match error {
                        Value::String(message) => message.clone(),
                        other => other.to_string(),
                    };
                    return Err(ApiError::Server(message));
                }
                tracing::debug!("{}", pretty(&json));
                Ok(ApiBody::Json(json))
            }
            Err(_) => {
                tracing::debug!("{}", text);
                Ok(ApiBody::Text(text))
            }
        }
    }

    /// POSTs `body` to `endpoint` and deserializes the `data` field.
    pub(crate) async fn post_data<T: DeserializeOwned>(&self, endpoint: &Endpoint, body: Value) -> Result<T, ApiError> {
        self.call(endpoint.path, &body, Method::POST).await?.into_data()
    }

    /// Exchanges a user name and password for a session token.
    ///
    /// Any HTTP failure is reported as [`ApiError::InvalidCredentials`].
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<String, ApiError> {
        let body = json!({
            "data": {
                "userName": username,
                "password": password,
            }
        });

        match self.call(endpoints::auth::AUTHENTICATE_USER.path, &body, Method::POST).await {
            Ok(response) => response.into_text(),
            Err(ApiError::Http { .. }) => Err(ApiError::InvalidCredentials),
            Err(e) => Err(e),
        }
    }

    /// Checks the session token by fetching the current user.
    ///
    /// Any HTTP failure is reported as [`ApiError::InvalidToken`].
    pub async fn validate_token(&self) -> Result<User, ApiError> {
        match self.get_me().await {
            Err(ApiError::Http { .. }) => Err(ApiError::InvalidToken),
            other => other,
        }
    }
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}
