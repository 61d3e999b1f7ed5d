//
//  pyramid-api
//  auth/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Authentication Module
//!
//! A Pyramid session is opened from a [`Grant`]: either a user name and
//! password exchanged for a token, or an existing token that is validated
//! against the server. Tokens obtained by `pyramid auth login` are kept in
//! the system keyring through [`KeyringStore`], one entry per domain.
//!
//! ## Example
//!
//! ```rust,no_run
//! use pyramid_api::auth::{Grant, KeyringStore};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let api = Grant::password("https://pyramid.example.com", "admin", "secret")
//!     .into_api()
//!     .await?;
//!
//! KeyringStore::new().store(api.domain(), api.token())?;
//! # Ok(())
//! # }
//! ```

mod keyring;

pub use keyring::*;

use crate::api::{ApiError, PyramidApi};

/// Credentials for opening a session, together with the server they belong to.
///
/// # Variants
///
/// - `Password`: exchanged for a token through `authenticateUser`
/// - `Token`: used as-is after a `getMe` round-trip confirms it
#[derive(Clone, PartialEq, Eq)]
pub enum Grant {
    /// User name and password login.
    Password {
        /// Server root, e.g. `https://pyramid.example.com`.
        domain: String,
        /// The Pyramid user name.
        username: String,
        /// The user's password.
        password: String,
    },
    /// An already issued session token.
    Token {
        /// Server root, e.g. `https://pyramid.example.com`.
        domain: String,
        /// The session token.
        token: String,
    },
}

impl std::fmt::Debug for Grant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Password { domain, username, .. } => f
                .debug_struct("Password")
                .field("domain", domain)
                .field("username", username)
                .field("password", &"<redacted>")
                .finish(),
            Self::Token { domain, .. } => f
                .debug_struct("Token")
                .field("domain", domain)
                .field("token", &"<redacted>")
                .finish(),
        }
    }
}

impl Grant {
    /// Creates a password grant.
    pub fn password(domain: impl Into<String>, username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Password {
            domain: domain.into(),
            username: username.into(),
            password: password.into(),
        }
    }

    /// Creates a token grant.
    pub fn token(domain: impl Into<String>, token: impl Into<String>) -> Self {
        Self::Token {
            domain: domain.into(),
            token: token.into(),
        }
    }

    /// The server this grant targets.
    pub fn domain(&self) -> &str {
        match self {
            Self::Password { domain, .. } | Self::Token { domain, .. } => domain,
        }
    }

    /// Opens a validated session.
    ///
    /// # Errors
    ///
    /// [`ApiError::InvalidCredentials`] or [`ApiError::InvalidToken`] when
    /// the server rejects the grant. See [`PyramidApi::connect`].
    pub async fn into_api(self) -> Result<PyramidApi, ApiError> {
        PyramidApi::connect(self).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain() {
        assert_eq!(Grant::password("https://a", "u", "p").domain(), "https://a");
        assert_eq!(Grant::token("https://b", "t").domain(), "https://b");
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let printed = format!("{:?}", Grant::password("https://a", "admin", "hunter2"));
        assert!(printed.contains("admin"));
        assert!(!printed.contains("hunter2"));

        let printed = format!("{:?}", Grant::token("https://a", "abc123"));
        assert!(!printed.contains("abc123"));
    }

    #[tokio::test]
    async fn test_into_api_uses_token() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/API2/access/getMe")
            .with_body(r#"{"data": {"tenantId": "t", "userName": "admin"}}"#)
            .create_async()
            .await;

        let api = Grant::token(server.url(), "tok").into_api().await.unwrap();
        assert_eq!(api.token(), "tok");
    }
}
