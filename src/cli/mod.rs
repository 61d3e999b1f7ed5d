//
//  pyramid-api
//  cli/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! CLI command definitions using clap derive macros

mod api;
mod auth;
mod completion;
mod config;
mod gen;
mod record;

pub use api::ApiCommand;
pub use auth::AuthCommand;
pub use completion::CompletionCommand;
pub use config::ConfigCommand;
pub use gen::GenCommand;
pub use record::RecordCommand;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use crate::api::{ApiError, PyramidApi};
use crate::auth::{Grant, KeyringStore};
use crate::config::Config;
use crate::interactive::{prompt_input, prompt_input_with_default, prompt_password};

/// Pyramid Analytics REST client and code generator
#[derive(Parser, Debug)]
#[command(
    name = "pyramid",
    version,
    about = "Work with the Pyramid Analytics REST API from the command line",
    long_about = "pyramid calls the Pyramid Analytics REST API, manages record files,\n\
                  and generates typed Rust bindings from the vendor's API reference.",
    propagate_version = true,
    after_help = "Use 'pyramid <command> --help' for more information about a command."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOptions,
}

/// Global options available to all commands
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Pyramid server root, e.g. https://pyramid.example.com
    #[arg(long, short = 'd', global = true, env = "PYRAMID_DOMAIN")]
    pub domain: Option<String>,

    /// User name for password login
    #[arg(long, short = 'u', global = true, env = "PYRAMID_USER")]
    pub user: Option<String>,

    /// Session token; skips the keyring and password login
    #[arg(long, global = true, env = "PYRAMID_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Output format as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable interactive prompts
    #[arg(long, global = true, env = "PYRAMID_NO_PROMPT")]
    pub no_prompt: bool,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate Rust bindings from the API reference
    #[command(visible_alias = "generate")]
    Gen(GenCommand),

    /// Manage the stored session
    #[command(visible_alias = "login")]
    Auth(AuthCommand),

    /// Call an endpoint directly
    Api(ApiCommand),

    /// Work with record files
    Record(RecordCommand),

    /// Manage CLI configuration
    Config(ConfigCommand),

    /// Generate shell completion scripts
    Completion(CompletionCommand),

    /// Show version information
    Version,
}

impl GlobalOptions {
    /// The server to talk to: `--domain`, then the config file, then a prompt.
    pub fn resolve_domain(&self, config: &Config) -> Result<String> {
        let domain = match self.domain.clone().or_else(|| config.server.domain.clone()) {
            Some(domain) => domain,
            None if self.no_prompt => {
                bail!("No Pyramid domain configured. Pass --domain or run 'pyramid config set server.domain <url>'")
            }
            None => prompt_input("Pyramid domain (e.g., https://pyramid.example.com):")?,
        };
        Ok(normalize_domain(&domain))
    }

    /// The user name: `--user`, then the config file, then a prompt.
    pub fn resolve_user(&self, config: &Config) -> Result<String> {
        match self.user.clone() {
            Some(user) => Ok(user),
            None if self.no_prompt => config
                .server
                .username
                .clone()
                .context("No user name configured. Pass --user or set PYRAMID_USER"),
            None => prompt_input_with_default("User name:", config.server.username.as_deref()),
        }
    }

    /// Opens a session for commands that need one.
    ///
    /// Tries `--token`, then the keyring token for the domain, then a
    /// password login. A stored token the server rejects is skipped in favor
    /// of a password login.
    pub async fn connect(&self, config: &Config) -> Result<PyramidApi> {
        let domain = self.resolve_domain(config)?;

        if let Some(token) = &self.token {
            return Ok(Grant::token(domain, token.as_str()).into_api().await?);
        }

        if let Some(token) = KeyringStore::new().get(&domain)? {
            match Grant::token(domain.as_str(), token).into_api().await {
                Ok(api) => return Ok(api),
                Err(ApiError::InvalidToken) => {
                    tracing::warn!("stored session for {} was rejected", domain);
                }
                Err(e) => return Err(e.into()),
            }
        }

        if self.no_prompt {
            bail!("Not logged in to {}. Run 'pyramid auth login' first.", domain);
        }
        let user = self.resolve_user(config)?;
        let password = prompt_password("Password:")?;
        Ok(Grant::password(domain, user, password).into_api().await?)
    }
}

/// Adds `https://` when no scheme is given and drops trailing slashes.
pub fn normalize_domain(domain: &str) -> String {
    let domain = domain.trim();
    let domain = if domain.starts_with("http://") || domain.starts_with("https://") {
        domain.to_string()
    } else {
        format!("https://{}", domain)
    };
    domain.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_normalize_domain() {
        assert_eq!(normalize_domain("pyramid.example.com/"), "https://pyramid.example.com");
        assert_eq!(normalize_domain(" http://localhost:8181 "), "http://localhost:8181");
    }

    #[test]
    fn test_resolve_domain_prefers_flag() {
        let mut config = Config::default();
        config.server.domain = Some("https://from-config".to_string());

        let global = GlobalOptions {
            domain: Some("https://from-flag/".to_string()),
            no_prompt: true,
            ..Default::default()
        };
        assert_eq!(global.resolve_domain(&config).unwrap(), "https://from-flag");

        let global = GlobalOptions {
            no_prompt: true,
            ..Default::default()
        };
        assert_eq!(global.resolve_domain(&config).unwrap(), "https://from-config");
        assert!(global.resolve_domain(&Config::default()).is_err());
    }

    #[test]
    fn test_resolve_user_without_prompt() {
        let global = GlobalOptions {
            no_prompt: true,
            ..Default::default()
        };
        assert!(global.resolve_user(&Config::default()).is_err());

        let mut config = Config::default();
        config.server.username = Some("admin".to_string());
        assert_eq!(global.resolve_user(&config).unwrap(), "admin");
    }

    #[tokio::test]
    async fn test_connect_with_token_flag() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/API2/access/getMe")
            .match_body(mockito::Matcher::Json(serde_json::json!({"auth": "flag-token"})))
            .with_body(r#"{"data": {"tenantId": "t", "userName": "admin"}}"#)
            .create_async()
            .await;

        let global = GlobalOptions {
            domain: Some(server.url()),
            token: Some("flag-token".to_string()),
            no_prompt: true,
            ..Default::default()
        };
        let api = global.connect(&Config::default()).await.unwrap();
        assert_eq!(api.token(), "flag-token");
    }
}
