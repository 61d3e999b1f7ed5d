//
//  pyramid-api
//  config/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Configuration Module
//!
//! Settings for the `pyramid` binary, stored as TOML in the platform config
//! directory:
//!
//! - **Linux**: `~/.config/pyramid/config.toml`
//! - **macOS**: `~/Library/Application Support/pyramid/config.toml`
//! - **Windows**: `C:\Users\<User>\AppData\Roaming\pyramid\config\config.toml`
//!
//! ## Example Configuration File
//!
//! ```toml
//! [server]
//! domain = "https://pyramid.example.com"
//! username = "admin"
//!
//! [generator]
//! output_dir = "src/generated"
//! method_groups = ["access", "content"]
//! skip_enums = ["QueryResultMessageExtraData"]
//! ```
//!
//! Every field is optional. Unset generator fields fall back to the
//! generator's defaults, and the server domain and user can also come from
//! `PYRAMID_DOMAIN` and `PYRAMID_USER`.

mod file;

pub use file::*;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::codegen::GeneratorSettings;

/// Keys accepted by [`Config::get`] and [`Config::set`].
pub const CONFIG_KEYS: &[&str] = &[
    "server.domain",
    "server.username",
    "generator.docs_base_url",
    "generator.output_dir",
    "generator.cache_dir",
    "generator.method_groups",
    "generator.skip_enums",
];

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub generator: GeneratorConfig,
}

/// The Pyramid server the CLI talks to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

/// Code generator settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docs_base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
    /// Page cache; defaults to the platform cache directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_dir: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method_groups: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip_enums: Option<Vec<String>>,
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("", "", "pyramid").ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect()
}

impl Config {
    /// Loads the configuration from the default location, or defaults if
    /// no file exists yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Loads the configuration from `path`.
    pub fn load_from(path: &Path) -> Result<Self> {
        match read_config_file(path)? {
            Some(content) => toml::from_str(&content).with_context(|| format!("Invalid config file {}", path.display())),
            None => Ok(Self::default()),
        }
    }

    /// Saves the configuration to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        write_config_file(path, &content)
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(project_dirs()?.config_dir().join("config.toml"))
    }

    /// The documentation page cache directory.
    pub fn cache_dir(&self) -> Result<PathBuf> {
        match &self.generator.cache_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(project_dirs()?.cache_dir().join("docs")),
        }
    }

    /// Generator settings with configured values over the defaults.
    ///
    /// `output_dir` takes precedence over `generator.output_dir`; with
    /// neither set the output goes to `./generated`.
    pub fn generator_settings(&self, output_dir: Option<PathBuf>) -> Result<GeneratorSettings> {
        let output_dir = output_dir
            .or_else(|| self.generator.output_dir.clone())
            .unwrap_or_else(|| PathBuf::from("generated"));

        let mut settings = GeneratorSettings::new(output_dir)?;
        if let Some(base) = &self.generator.docs_base_url {
            settings = settings.with_docs_base_url(base)?;
        }
        if let Some(groups) = &self.generator.method_groups {
            settings.method_groups = groups.clone();
        }
        if let Some(skip) = &self.generator.skip_enums {
            settings.skip_enums = skip.clone();
        }
        Ok(settings)
    }

    /// Gets a value by dotted key. Lists are joined with `,`.
    pub fn get(&self, key: &str) -> Option<String> {
        let path = |p: &Option<PathBuf>| p.as_ref().map(|p| p.display().to_string());
        match key {
            "server.domain" => self.server.domain.clone(),
            "server.username" => self.server.username.clone(),
            "generator.docs_base_url" => self.generator.docs_base_url.clone(),
            "generator.output_dir" => path(&self.generator.output_dir),
            "generator.cache_dir" => path(&self.generator.cache_dir),
            "generator.method_groups" => self.generator.method_groups.as_ref().map(|g| g.join(",")),
            "generator.skip_enums" => self.generator.skip_enums.as_ref().map(|s| s.join(",")),
            _ => None,
        }
    }

    /// Sets a value by dotted key. Lists are given comma separated.
    ///
    /// Returns `false` for an unknown key.
    pub fn set(&mut self, key: &str, value: &str) -> bool {
        match key {
            "server.domain" => self.server.domain = Some(value.trim_end_matches('/').to_string()),
            "server.username" => self.server.username = Some(value.to_string()),
            "generator.docs_base_url" => self.generator.docs_base_url = Some(value.to_string()),
            "generator.output_dir" => self.generator.output_dir = Some(PathBuf::from(value)),
            "generator.cache_dir" => self.generator.cache_dir = Some(PathBuf::from(value)),
            "generator.method_groups" => self.generator.method_groups = Some(split_list(value)),
            "generator.skip_enums" => self.generator.skip_enums = Some(split_list(value)),
            _ => return false,
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_default() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        assert!(config.set("server.domain", "https://pyramid.example.com/"));
        assert!(config.set("generator.method_groups", "access, content,"));
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.server.domain.as_deref(), Some("https://pyramid.example.com"));
        assert_eq!(
            loaded.generator.method_groups,
            Some(vec!["access".to_string(), "content".to_string()])
        );
        assert_eq!(loaded.get("generator.method_groups").as_deref(), Some("access,content"));
    }

    #[test]
    fn test_unknown_key() {
        let mut config = Config::default();
        assert!(!config.set("core.editor", "vim"));
        assert_eq!(config.get("core.editor"), None);
        for key in CONFIG_KEYS {
            assert_eq!(config.get(key), None);
        }
    }

    #[test]
    fn test_partial_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server]\nusername = \"admin\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.server.username.as_deref(), Some("admin"));
        assert_eq!(config.generator, GeneratorConfig::default());
    }

    #[test]
    fn test_generator_settings() {
        let mut config = Config::default();
        config.set("generator.output_dir", "from-config");
        config.set("generator.skip_enums", "");
        config.set("generator.docs_base_url", "http://localhost:9000/docs");

        let settings = config.generator_settings(None).unwrap();
        assert_eq!(settings.output_dir, PathBuf::from("from-config"));
        assert!(settings.skip_enums.is_empty());
        assert_eq!(settings.docs_base_url.as_str(), "http://localhost:9000/docs/");
        assert!(settings.method_groups.contains(&"dataSources".to_string()));

        let settings = config.generator_settings(Some(PathBuf::from("cli"))).unwrap();
        assert_eq!(settings.output_dir, PathBuf::from("cli"));
    }
}
