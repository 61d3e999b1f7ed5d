//
//  pyramid-api
//  cli/config.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! CLI configuration commands
//!
//! Keys are dotted (`server.domain`, `generator.output_dir`); list values
//! are given comma separated.

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use console::style;

use crate::config::{Config, CONFIG_KEYS};
use crate::output::write_json;

use super::GlobalOptions;

/// Manage CLI configuration
#[derive(Args, Debug)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigSubcommand {
    /// Print a configuration value
    Get(GetArgs),

    /// Set a configuration value
    Set(SetArgs),

    /// List all configuration values
    #[command(visible_alias = "ls")]
    List,

    /// Print the configuration file path
    Path,
}

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Configuration key
    pub key: String,
}

#[derive(Args, Debug)]
pub struct SetArgs {
    /// Configuration key
    pub key: String,

    /// Value to set
    pub value: String,
}

impl ConfigCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            ConfigSubcommand::Get(args) => get(args, global),
            ConfigSubcommand::Set(args) => set(args, global),
            ConfigSubcommand::List => list(global),
            ConfigSubcommand::Path => path(global),
        }
    }
}

fn check_key(key: &str) -> Result<()> {
    if !CONFIG_KEYS.contains(&key) {
        bail!("Unknown configuration key '{}'. Valid keys: {}", key, CONFIG_KEYS.join(", "));
    }
    Ok(())
}

fn get(args: &GetArgs, global: &GlobalOptions) -> Result<()> {
    check_key(&args.key)?;
    let value = Config::load()?.get(&args.key);

    if global.json {
        let result = serde_json::json!({
            "key": args.key,
            "value": value,
        });
        write_json(&result)?;
    } else if let Some(v) = value {
        println!("{}", v);
    }
    Ok(())
}

fn set(args: &SetArgs, global: &GlobalOptions) -> Result<()> {
    check_key(&args.key)?;
    if args.key == "generator.docs_base_url" {
        url::Url::parse(&args.value)?;
    }

    let mut config = Config::load()?;
    config.set(&args.key, &args.value);
    config.save()?;

    if global.json {
        let result = serde_json::json!({
            "success": true,
            "key": args.key,
            "value": config.get(&args.key),
        });
        write_json(&result)?;
    } else {
        println!("{} Set {} = {}", style("✓").green(), style(&args.key).cyan(), args.value);
    }
    Ok(())
}

fn list(global: &GlobalOptions) -> Result<()> {
    let config = Config::load()?;

    if global.json {
        write_json(&config)?;
        return Ok(());
    }

    println!();
    println!("{}", style("Configuration").bold());
    println!("{}", "-".repeat(50));
    for key in CONFIG_KEYS {
        let value = config.get(key);
        println!("  {}: {}", style(key).cyan(), value.as_deref().unwrap_or("-"));
    }
    println!();
    Ok(())
}

fn path(global: &GlobalOptions) -> Result<()> {
    let config_path = Config::config_path()?;

    if global.json {
        let result = serde_json::json!({
            "path": config_path.display().to_string(),
            "exists": config_path.exists(),
        });
        write_json(&result)?;
    } else {
        println!("{}", config_path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_key() {
        assert!(check_key("server.domain").is_ok());
        assert!(check_key("core.editor").is_err());
    }
}
