//
//  pyramid-api
//  cli/record.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Record file commands
//!
//! ```bash
//! # Fill in placeholders and print the result
//! pyramid record render tenant.json --set tenantId=t-1 --set tenantName=acme
//!
//! # Values from a JSON object, unresolved placeholders left in place
//! pyramid record render tenant.json --values values.json --permissive -o out.json
//!
//! # Check that a file holds a known record type
//! pyramid record wrap-check tenant.json
//! ```

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};
use console::style;
use serde_json::Value;

use crate::output::write_json;
use crate::record::{SubstitutionMode, WrappedRecord};

use super::GlobalOptions;

/// Work with record files
#[derive(Args, Debug)]
pub struct RecordCommand {
    #[command(subcommand)]
    pub command: RecordSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum RecordSubcommand {
    /// Fill in a record file's placeholders
    Render(RenderArgs),

    /// Check that a record file holds a valid, known record
    #[command(name = "wrap-check")]
    WrapCheck(WrapCheckArgs),
}

#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Record file to read
    pub file: PathBuf,

    /// Placeholder value (name=value, repeatable)
    #[arg(long = "set", short = 's', action = clap::ArgAction::Append)]
    pub values: Vec<String>,

    /// JSON object file with placeholder values
    #[arg(long = "values")]
    pub values_file: Option<PathBuf>,

    /// Leave unresolved placeholders instead of failing
    #[arg(long)]
    pub permissive: bool,

    /// Write the rendered record here instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct WrapCheckArgs {
    /// Record file to check
    pub file: PathBuf,
}

impl RecordCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            RecordSubcommand::Render(args) => render(args),
            RecordSubcommand::WrapCheck(args) => wrap_check(args, global),
        }
    }
}

fn render(args: &RenderArgs) -> Result<()> {
    let values = collect_values(args)?;
    let mode = if args.permissive {
        SubstitutionMode::Permissive
    } else {
        SubstitutionMode::Strict
    };

    let record = WrappedRecord::from_file(&args.file, Some(&values), mode)
        .with_context(|| format!("Failed to render {}", args.file.display()))?;

    match &args.output {
        Some(path) => {
            record.to_file(path)?;
            eprintln!("{} Wrote {}", style("✓").green(), path.display());
        }
        None => write_json(&record)?,
    }
    Ok(())
}

fn wrap_check(args: &WrapCheckArgs, global: &GlobalOptions) -> Result<()> {
    let record = WrappedRecord::from_file(&args.file, None, SubstitutionMode::Strict)?;
    let result = record.validate();

    if global.json {
        let report = serde_json::json!({
            "file": args.file.display().to_string(),
            "className": record.class_name,
            "valid": result.is_ok(),
            "error": result.as_ref().err().map(|e| e.to_string()),
        });
        write_json(&report)?;
    } else if result.is_ok() {
        println!("{} {} holds a valid {}", style("✓").green(), args.file.display(), record.class_name);
    }

    result.with_context(|| format!("{} is not a valid record", args.file.display()))
}

/// Merges `--values` and `--set`; `--set` wins on conflicts.
fn collect_values(args: &RenderArgs) -> Result<HashMap<String, String>> {
    let mut values = HashMap::new();

    if let Some(path) = &args.values_file {
        let content = std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
        let Value::Object(map) = serde_json::from_str::<Value>(&content)? else {
            bail!("{} must hold a JSON object", path.display());
        };
        for (key, value) in map {
            let value = match value {
                Value::String(s) => s,
                other => other.to_string(),
            };
            values.insert(key, value);
        }
    }

    for pair in &args.values {
        let Some((key, value)) = pair.split_once('=') else {
            bail!("Invalid value format: {}. Expected name=value", pair);
        };
        values.insert(key.to_string(), value.to_string());
    }

    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn args(values: &[&str], values_file: Option<PathBuf>) -> RenderArgs {
        RenderArgs {
            file: PathBuf::from("record.json"),
            values: values.iter().map(|v| v.to_string()).collect(),
            values_file,
            permissive: false,
            output: None,
        }
    }

    #[test]
    fn test_collect_values() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("values.json");
        std::fs::write(&path, r#"{"tenantId": "from-file", "seats": 3}"#).unwrap();

        let values = collect_values(&args(&["tenantId=from-flag", "x=a=b"], Some(path))).unwrap();
        assert_eq!(values["tenantId"], "from-flag");
        assert_eq!(values["seats"], "3");
        assert_eq!(values["x"], "a=b");
    }

    #[test]
    fn test_collect_values_rejects_bad_pair() {
        assert!(collect_values(&args(&["novalue"], None)).is_err());
    }
}
