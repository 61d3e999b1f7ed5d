//
//  pyramid-api
//  cli/completion.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Shell completion commands

use anyhow::Result;
use clap::{Args, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use super::{Cli, GlobalOptions};

/// Generate shell completion scripts
#[derive(Args, Debug)]
pub struct CompletionCommand {
    #[command(subcommand)]
    pub command: CompletionSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum CompletionSubcommand {
    /// Generate bash completion script
    Bash,

    /// Generate zsh completion script
    Zsh,

    /// Generate fish completion script
    Fish,

    /// Generate PowerShell completion script
    Powershell,
}

impl CompletionSubcommand {
    fn shell(&self) -> Shell {
        match self {
            Self::Bash => Shell::Bash,
            Self::Zsh => Shell::Zsh,
            Self::Fish => Shell::Fish,
            Self::Powershell => Shell::PowerShell,
        }
    }
}

impl CompletionCommand {
    pub async fn run(&self, _global: &GlobalOptions) -> Result<()> {
        let mut cmd = Cli::command();
        generate(self.command.shell(), &mut cmd, crate::APP_NAME, &mut std::io::stdout());
        Ok(())
    }
}
