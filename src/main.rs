//
//  pyramid-api
//  main.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use pyramid_api::api::ApiError;
use pyramid_api::cli::{Cli, Commands};
use pyramid_api::exit_codes;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    init_logging();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Execute command
    let result = run(cli).await;

    // Handle result and exit
    match result {
        Ok(()) => std::process::exit(exit_codes::SUCCESS),
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(exit_code(&e));
        }
    }
}

/// Initialize logging based on environment
fn init_logging() {
    let filter = EnvFilter::try_from_env("PYRAMID_DEBUG").unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();
}

/// Maps rejected credentials anywhere in the error chain to `AUTH_ERROR`.
fn exit_code(error: &anyhow::Error) -> i32 {
    let auth_failed = error
        .chain()
        .any(|cause| cause.downcast_ref::<ApiError>().is_some_and(ApiError::is_auth_error));
    if auth_failed {
        exit_codes::AUTH_ERROR
    } else {
        exit_codes::ERROR
    }
}

/// Main command dispatcher
async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Gen(cmd) => cmd.run(&cli.global).await,
        Commands::Auth(cmd) => cmd.run(&cli.global).await,
        Commands::Api(cmd) => cmd.run(&cli.global).await,
        Commands::Record(cmd) => cmd.run(&cli.global).await,
        Commands::Config(cmd) => cmd.run(&cli.global).await,
        Commands::Completion(cmd) => cmd.run(&cli.global).await,
        Commands::Version => {
            println!("pyramid version {}", pyramid_api::VERSION);
            Ok(())
        }
    }
}
