//
//  pyramid-api
//  cli/gen.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Code generation command
//!
//! Scrapes the vendor's REST reference (cache first) and writes Rust
//! bindings to the output directory. The command fails when any schema
//! could not be generated, after writing everything that could.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::codegen::{DocSource, FsCacheStore, Generator, HttpFetcher, OfflineFetcher};
use crate::config::Config;
use crate::output::{report_json, report_table, write_json};

use super::GlobalOptions;

/// Generate Rust bindings from the API reference
#[derive(Args, Debug)]
pub struct GenCommand {
    /// Directory to write the generated files to
    #[arg(long, short = 'o')]
    pub output_dir: Option<PathBuf>,

    /// Directory holding cached documentation pages
    #[arg(long)]
    pub cache_dir: Option<PathBuf>,

    /// Root URL of the REST API reference
    #[arg(long)]
    pub docs_url: Option<String>,

    /// Method group to generate (repeatable; replaces the configured list)
    #[arg(long = "group", short = 'g', action = clap::ArgAction::Append)]
    pub groups: Vec<String>,

    /// Only use cached pages; never touch the network
    #[arg(long)]
    pub offline: bool,
}

impl GenCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let config = Config::load()?;

        let mut settings = config.generator_settings(self.output_dir.clone())?;
        if let Some(url) = &self.docs_url {
            settings = settings.with_docs_base_url(url)?;
        }
        if !self.groups.is_empty() {
            settings.method_groups = self.groups.clone();
        }

        let cache_dir = match &self.cache_dir {
            Some(dir) => dir.clone(),
            None => config.cache_dir()?,
        };
        tracing::info!("page cache at {}", cache_dir.display());
        let cache = FsCacheStore::new(cache_dir);

        let source = if self.offline {
            DocSource::new(OfflineFetcher, cache)
        } else {
            DocSource::new(HttpFetcher::new()?, cache)
        };

        let output_dir = settings.output_dir.clone();
        let mut generator = Generator::new(source, settings);
        if !global.json {
            generator = generator.with_progress(progress_bar());
        }

        let report = generator
            .run()
            .await
            .with_context(|| format!("Generation into {} aborted", output_dir.display()))?;

        if global.json {
            write_json(&report_json(&report))?;
        } else {
            println!("{}", report_table(&report, console::colors_enabled()));
            println!(
                "{} {} definitions written to {}",
                if report.is_success() {
                    style("✓").green()
                } else {
                    style("!").yellow()
                },
                report.items(),
                output_dir.display()
            );
        }

        if !report.is_success() {
            bail!("{} definition(s) could not be generated", report.failures.len());
        }
        Ok(())
    }
}

fn progress_bar() -> ProgressBar {
    let pb = ProgressBar::new(0);
    if let Ok(progress_style) =
        ProgressStyle::default_bar().template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
    {
        pb.set_style(progress_style.progress_chars("#>-"));
    }
    pb
}
