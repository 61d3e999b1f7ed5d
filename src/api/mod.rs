//
//  pyramid-api
//  api/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # API Client Layer
//!
//! This module provides a typed client for the Pyramid Analytics REST API
//! (`/API2/...`).
//!
//! ## Architecture
//!
//! - [`client`]: The authenticated session and raw request handling
//! - [`endpoints`]: Constants naming every endpoint the client calls
//! - [`types`]: Records and integer enums exchanged with the server
//! - [`common`]: Errors, response bodies, and payload helpers
//!
//! The endpoint methods themselves live on [`PyramidApi`], one source file
//! per endpoint group (access, content, data sources, notification, tasks).
//!
//! ## Usage
//!
//! ```rust,no_run
//! use pyramid_api::api::{ApiError, PyramidApi};
//! use pyramid_api::api::types::NewTenant;
//! use pyramid_api::auth::Grant;
//!
//! # async fn example() -> Result<(), ApiError> {
//! let api = PyramidApi::connect(Grant::token("https://pyramid.example.com", "token")).await?;
//! let result = api.create_tenant(&NewTenant::new("tid", "acme")).await?;
//! println!("created {:?}", result.first_id());
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Transport failures, non-2xx statuses, and `error` fields in otherwise
//! successful responses are all reported as [`ApiError`] variants. Rejected
//! credentials are mapped to [`ApiError::InvalidCredentials`] and
//! [`ApiError::InvalidToken`].

/// The authenticated session ([`PyramidApi`]).
pub mod client;

/// Shared error and response types.
pub mod common;

/// Endpoint path constants grouped by API section.
pub mod endpoints;

/// Records and enums exchanged with the server.
pub mod types;

mod access;
mod content;
mod data_sources;
mod notification;
mod tasks;

pub use client::PyramidApi;
pub use common::{ApiBody, ApiError};
pub use endpoints::Endpoint;
