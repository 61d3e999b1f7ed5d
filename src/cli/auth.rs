//
//  pyramid-api
//  cli/auth.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Authentication commands.
//!
//! `login` exchanges a user name and password (or a pasted token) for a
//! session token and keeps it in the system keyring under the domain.

use std::io::BufRead;

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};
use console::style;

use crate::auth::{Grant, KeyringStore};
use crate::config::Config;
use crate::interactive::{prompt_confirm_with_default, prompt_password};
use crate::output::write_json;

use super::GlobalOptions;

/// Manage the stored session.
#[derive(Args, Debug)]
pub struct AuthCommand {
    #[command(subcommand)]
    pub command: AuthSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum AuthSubcommand {
    /// Log in and store the session token
    Login(LoginArgs),

    /// Forget the stored session token
    Logout,

    /// Check the stored session
    Status(StatusArgs),
}

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Read a session token from standard input instead of logging in
    #[arg(long)]
    pub with_token: bool,
}

#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Show the session token (masked)
    #[arg(long, short = 't')]
    pub show_token: bool,
}

impl AuthCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            AuthSubcommand::Login(args) => login(args, global).await,
            AuthSubcommand::Logout => logout(global).await,
            AuthSubcommand::Status(args) => status(args, global).await,
        }
    }
}

async fn login(args: &LoginArgs, global: &GlobalOptions) -> Result<()> {
    let keyring = KeyringStore::new();
    let mut config = Config::load()?;
    let domain = global.resolve_domain(&config)?;

    if !global.no_prompt {
        if let Some(existing) = keyring.get(&domain)? {
            if let Ok(api) = Grant::token(domain.as_str(), existing).into_api().await {
                let me = api.get_me().await?;
                println!("Already logged in to {} as {}", domain, me.user_name);
                if !prompt_confirm_with_default("Re-authenticate?", false)? {
                    return Ok(());
                }
            }
        }
    }

    let grant = if args.with_token {
        println!("Paste your session token:");
        Grant::token(domain.as_str(), read_token_from_stdin()?)
    } else if let Some(token) = &global.token {
        Grant::token(domain.as_str(), token.as_str())
    } else {
        let user = global.resolve_user(&config)?;
        if global.no_prompt {
            bail!("A password prompt is required; pass --token or --with-token instead");
        }
        let password = prompt_password("Password:")?;
        Grant::password(domain.as_str(), user, password)
    };

    println!("Validating...");
    let api = grant.into_api().await.context("Login failed")?;
    let me = api.get_me().await?;

    keyring.store(&domain, api.token())?;
    config.server.domain = Some(domain.clone());
    config.server.username = Some(me.user_name.clone());
    config.save()?;

    println!("{} Logged in to {} as {}", style("✓").green(), domain, style(&me.user_name).cyan());
    Ok(())
}

async fn logout(global: &GlobalOptions) -> Result<()> {
    let config = Config::load()?;
    let domain = global.resolve_domain(&config)?;

    KeyringStore::new().delete(&domain)?;
    println!("Logged out of {}", domain);
    Ok(())
}

async fn status(args: &StatusArgs, global: &GlobalOptions) -> Result<()> {
    let config = Config::load()?;
    let domain = global.resolve_domain(&config)?;

    let Some(token) = KeyringStore::new().get(&domain)? else {
        println!("Not logged in to {}", domain);
        println!();
        println!("Run 'pyramid auth login' to authenticate");
        return Ok(());
    };

    let user = match Grant::token(domain.as_str(), token.as_str()).into_api().await {
        Ok(api) => Some(api.get_me().await?),
        Err(e) if e.is_auth_error() => None,
        Err(e) => return Err(e.into()),
    };

    if global.json {
        let result = serde_json::json!({
            "domain": domain,
            "active": user.is_some(),
            "user": user.as_ref().map(|u| u.user_name.clone()),
        });
        write_json(&result)?;
        return Ok(());
    }

    println!("{}", domain);
    match &user {
        Some(user) => {
            println!("  Logged in as: {}", user.user_name);
            println!("  Status: {}", style("Active").green());
        }
        None => println!("  Status: {}", style("Invalid/Expired").red()),
    }
    if args.show_token {
        println!("  Token: {}", mask_token(&token));
    }

    Ok(())
}

fn read_token_from_stdin() -> Result<String> {
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    let token = line.trim().to_string();
    if token.is_empty() {
        bail!("No token provided");
    }
    Ok(token)
}

/// Keeps the first and last four characters of a token.
fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}{}", head, "*".repeat(chars.len() - 8), tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_token() {
        assert_eq!(mask_token("abcd1234efgh"), "abcd****efgh");
        assert_eq!(mask_token("short"), "*****");
    }
}
