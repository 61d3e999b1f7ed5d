//
//  pyramid-api
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Pyramid API Library
//!
//! A typed client for the Pyramid Analytics REST API, together with the
//! tooling that keeps it in step with the vendor's documentation.
//!
//! ## Overview
//!
//! This library provides the core functionality for the `pyramid` CLI tool:
//! opening authenticated sessions, calling the `/API2/...` endpoints with
//! typed records, storing records as templated files, and generating Rust
//! bindings by scraping the published REST reference.
//!
//! ## Features
//!
//! - **Typed Client**: One method per endpoint, records and integer enums in and out
//! - **Code Generation**: Objects, enums, and endpoint constants scraped from the API reference
//! - **Page Cache**: Documentation pages are cached on disk and reused across runs
//! - **Record Files**: Wrapped records with `$name` placeholder substitution
//! - **Secure Sessions**: Session tokens kept in the system keyring
//!
//! ## Module Structure
//!
//! - [`cli`]: Command-line interface definitions using clap
//! - [`api`]: The session, endpoints, and typed records
//! - [`auth`]: Grants and keyring token storage
//! - [`codegen`]: Documentation scraper and code generator
//! - [`record`]: Record files and placeholder substitution
//! - [`config`]: Configuration file management
//! - [`output`]: Table and JSON output
//! - [`interactive`]: Interactive prompts
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use pyramid_api::api::types::{AccessType, Role};
//! use pyramid_api::auth::Grant;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let api = Grant::password("https://pyramid.example.com", "admin", "secret")
//!     .into_api()
//!     .await?;
//!
//! let role = api.create_role(&Role::new("tenant-id", "analysts")).await?;
//! if let Some(role_id) = role.first_id() {
//!     api.add_role_to_server("server-id", role_id, AccessType::Read).await?;
//! }
//! # Ok(())
//! # }
//! ```

/// Command-line interface definitions and handlers.
///
/// Each command lives in its own submodule and implements an async `run`
/// method taking the [`cli::GlobalOptions`].
pub mod cli;

/// The Pyramid REST client.
///
/// Contains the authenticated session, the endpoint table, the typed records
/// and enums, and the shared error type.
pub mod api;

/// Grants and session token storage.
pub mod auth;

/// Documentation scraper and code generator.
///
/// Turns the vendor's HTML reference into Rust source files. See
/// [`codegen::Generator`].
pub mod codegen;

/// Wrapped record files with placeholder substitution.
pub mod record;

/// Configuration management.
///
/// Handles loading and saving the TOML configuration from the platform
/// config directory.
pub mod config;

/// Output formatting for tables and JSON.
pub mod output;

/// Interactive prompts built on `dialoguer`.
pub mod interactive;

/// Re-export of the main CLI struct for convenient access.
///
/// # Example
///
/// ```rust,no_run
/// use clap::Parser;
/// use pyramid_api::Cli;
///
/// let cli = Cli::parse();
/// // Handle cli.command...
/// ```
pub use cli::Cli;

/// Re-export of the configuration struct.
pub use config::Config;

/// Application name constant.
///
/// The name of the CLI binary, used for completions and configuration paths.
///
/// # Value
///
/// `"pyramid"`
pub const APP_NAME: &str = "pyramid";

/// Application version constant, from `CARGO_PKG_VERSION`.
///
/// Also sent in the client's `User-Agent` header.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Exit codes for the CLI.
///
/// # Example
///
/// ```rust,no_run
/// use pyramid_api::exit_codes;
/// use std::process;
///
/// process::exit(exit_codes::AUTH_ERROR);
/// ```
pub mod exit_codes {
    /// Successful execution.
    ///
    /// # Value
    ///
    /// `0`
    pub const SUCCESS: i32 = 0;

    /// General error, including generation runs with failed definitions.
    ///
    /// # Value
    ///
    /// `1`
    pub const ERROR: i32 = 1;

    /// The server rejected the credentials or the session token.
    ///
    /// Run `pyramid auth login` to obtain a new session.
    ///
    /// # Value
    ///
    /// `4`
    pub const AUTH_ERROR: i32 = 4;
}
