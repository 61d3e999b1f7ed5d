//
//  pyramid-api
//  interactive/prompt.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Interactive Prompts Module
//!
//! Thin wrappers over `dialoguer` for text input, masked passwords, and
//! confirmations.
//!
//! # Example
//!
//! ```no_run
//! use pyramid_api::interactive::prompt::{prompt_input, prompt_password};
//!
//! let domain = prompt_input("Pyramid domain:").unwrap();
//! let password = prompt_password("Password:").unwrap();
//! ```

use anyhow::Result;
use dialoguer::{Confirm, Input, Password};

/// Prompts for a line of text.
pub fn prompt_input(message: &str) -> Result<String> {
    let input: String = Input::new().with_prompt(message).interact_text()?;
    Ok(input)
}

/// Prompts for a line of text, offering `default` when one is known.
pub fn prompt_input_with_default(message: &str, default: Option<&str>) -> Result<String> {
    let mut input = Input::<String>::new().with_prompt(message);
    if let Some(default) = default {
        input = input.default(default.to_string());
    }
    Ok(input.interact_text()?)
}

/// Prompts for a password without echoing it.
pub fn prompt_password(message: &str) -> Result<String> {
    let password = Password::new().with_prompt(message).interact()?;
    Ok(password)
}

pub fn prompt_confirm_with_default(message: &str, default: bool) -> Result<bool> {
    let confirmed = Confirm::new()
        .with_prompt(message)
        .default(default)
        .interact()?;
    Ok(confirmed)
}
