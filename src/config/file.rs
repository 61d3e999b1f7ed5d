//
//  pyramid-api
//  config/file.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Raw config file access.

use std::path::Path;

use anyhow::{Context, Result};

/// Reads the config file, or `None` if it does not exist yet.
pub fn read_config_file(path: &Path) -> Result<Option<String>> {
    if !path.exists() {
        return Ok(None);
    }
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read config file {}", path.display()))?;
    Ok(Some(content))
}

/// Writes the config file, creating parent directories as needed.
pub fn write_config_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory {}", parent.display()))?;
    }
    std::fs::write(path, content).with_context(|| format!("Failed to write config file {}", path.display()))?;
    Ok(())
}
