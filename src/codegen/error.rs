//
//  pyramid-api
//  codegen/error.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Error type for the documentation scraper and code generator.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors raised while fetching, extracting, or rendering documentation pages.
///
/// Any of these aborts processing of the schema currently being generated.
/// None of them are retried: a human has to look at the offending page (or
/// its cached copy) and adjust either the extraction rule or the cache.
#[derive(Error, Debug)]
pub enum ScrapeError {
    /// The page could not be downloaded.
    #[error("Failed to fetch {url}: {source}")]
    Fetch {
        /// The page URL
        url: String,
        /// The underlying transport error
        #[source]
        source: reqwest::Error,
    },

    /// The documentation server answered with a non-success status.
    #[error("Fetching {url} returned HTTP {status}")]
    FetchStatus {
        /// The page URL
        url: String,
        /// The returned status
        status: StatusCode,
    },

    /// The page is not in the cache and network access is disabled.
    #[error("Page '{0}' is not cached and fetching is disabled")]
    NotCached(String),

    /// Reading or writing the page cache (or an output unit) failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A CSS selector failed to compile.
    #[error("Invalid selector `{0}`")]
    Selector(String),

    /// An element the page layout is expected to contain is missing.
    #[error("Page '{page}' has no element matching `{selector}`")]
    MissingElement {
        /// Logical page name
        page: String,
        /// The selector that matched nothing
        selector: String,
    },

    /// A table row lacks a column the schema builder needs.
    #[error("Row {row} of '{schema}' has no '{column}' column")]
    MissingColumn {
        /// Schema being built
        schema: String,
        /// 1-based data row index
        row: usize,
        /// Column name
        column: String,
    },

    /// An enum member's value is not an integer.
    #[error("Enum '{schema}' member '{member}' has non-integer value '{value}'")]
    InvalidEnumValue {
        /// Enum being built
        schema: String,
        /// Member name
        member: String,
        /// Raw cell text
        value: String,
    },

    /// A documented name cannot be turned into a Rust identifier.
    #[error("'{0}' is not a valid Rust identifier")]
    InvalidIdentifier(String),

    /// The rendered tokens do not form valid Rust.
    #[error("Generated code for '{name}' does not parse: {source}")]
    Render {
        /// Schema or unit name
        name: String,
        /// Parser error
        #[source]
        source: syn::Error,
    },

    /// A documentation URL could not be built.
    #[error("Invalid documentation URL: {0}")]
    Url(#[from] url::ParseError),
}
