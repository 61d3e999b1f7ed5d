//
//  pyramid-api
//  record/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Record Files
//!
//! A record file stores one API record together with its class name and
//! some free-form metadata, so that payloads can be prepared ahead of time
//! and checked into a repository:
//!
//! ```json
//! {
//!   "className": "NewTenant",
//!   "metaData": { "name": null, "dstPath": null, "modified": null },
//!   "data": { "id": "$tenantId", "name": "$tenantName", ... }
//! }
//! ```
//!
//! Files may contain `$name` placeholders, filled in when the file is read
//! (see [`WrappedRecord::from_file`]).

mod template;

pub use template::{substitute, SubstitutionMode};

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::api::types::{self, ApiRecord};

/// Checks `$record` against each listed type until the class name matches.
macro_rules! validate_as {
    ($record:expr; $($ty:ident),* $(,)?) => {{
        let record: &WrappedRecord = $record;
        $(
            if record.class_name == <types::$ty as ApiRecord>::CLASS_NAME {
                return record.to_instance::<types::$ty>().map(|_| ());
            }
        )*
        Err(RecordError::UnknownClass(record.class_name.clone()))
    }};
}

/// Errors from reading, writing, or unwrapping record files.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("failed to access record file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid record JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no value for placeholder ${0}")]
    MissingPlaceholder(String),

    #[error("invalid placeholder in line {line}, col {column}")]
    InvalidPlaceholder { line: usize, column: usize },

    #[error("record holds a {found}, expected {expected}")]
    ClassMismatch { expected: &'static str, found: String },

    #[error("unknown record class '{0}'")]
    UnknownClass(String),
}

/// Free-form metadata stored next to a record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaData {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub dst_path: Option<String>,
    #[serde(default)]
    pub modified: Option<String>,
}

/// An API record tagged with its class name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WrappedRecord {
    pub class_name: String,
    #[serde(default)]
    pub meta_data: MetaData,
    pub data: Value,
}

impl WrappedRecord {
    /// Wraps a record with empty metadata.
    pub fn create<T: ApiRecord>(record: &T) -> Result<Self, RecordError> {
        Ok(Self {
            class_name: T::CLASS_NAME.to_string(),
            meta_data: MetaData::default(),
            data: serde_json::to_value(record)?,
        })
    }

    /// Sets the metadata name and destination path, and stamps `modified`
    /// with the current UTC time.
    pub fn with_meta(mut self, name: impl Into<String>, dst_path: impl Into<String>) -> Self {
        self.meta_data = MetaData {
            name: Some(name.into()),
            dst_path: Some(dst_path.into()),
            modified: Some(Utc::now().to_rfc3339()),
        };
        self
    }

    /// Deserializes the wrapped data as `T`.
    ///
    /// # Errors
    ///
    /// [`RecordError::ClassMismatch`] if the record was not created from a `T`.
    pub fn to_instance<T: ApiRecord>(&self) -> Result<T, RecordError> {
        if self.class_name != T::CLASS_NAME {
            return Err(RecordError::ClassMismatch {
                expected: T::CLASS_NAME,
                found: self.class_name.clone(),
            });
        }
        Ok(T::deserialize(&self.data)?)
    }

    /// Checks that the class name is a known record type and that the data
    /// deserializes as that type.
    pub fn validate(&self) -> Result<(), RecordError> {
        validate_as!(
            self;
            ItemId,
            Role,
            User,
            Server,
            TenantSettings,
            TenantData,
            NewTenant,
            NotificationIndicatorsResult,
            NewFolder,
            SearchParams,
            ConnectionStringProperties,
            ContentItem,
            ModifiedItemsResult,
            MaterializedItemObject,
            PieApiObject,
            ImportApiResultObject,
        )
    }

    /// Writes the record as JSON indented by two spaces.
    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<(), RecordError> {
        let path = path.as_ref();
        let text = serde_json::to_string_pretty(self)?;
        std::fs::write(path, text).map_err(|source| RecordError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Reads a record file, filling in placeholders from `values`.
    ///
    /// Substitution runs on the compact re-serialization of the file and
    /// only when `values` is non-empty; without values the file is read
    /// as-is and placeholders stay untouched.
    pub fn from_file(
        path: impl AsRef<Path>,
        values: Option<&HashMap<String, String>>,
        mode: SubstitutionMode,
    ) -> Result<Self, RecordError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| RecordError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let raw: Value = serde_json::from_str(&text)?;

        match values {
            Some(values) if !values.is_empty() => {
                let compact = serde_json::to_string(&raw)?;
                let filled = substitute(&compact, values, mode)?;
                tracing::debug!("substituted {} placeholder values in {}", values.len(), path.display());
                Ok(serde_json::from_str(&filled)?)
            }
            _ => Ok(serde_json::from_value(raw)?),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{NewTenant, Role};
    use tempfile::TempDir;

    fn templated() -> NewTenant {
        let mut tenant = NewTenant::new("$tenantId", "$tenantName");
        tenant.viewer_seats = 1;
        tenant.pro_seats = 1;
        tenant.show_group_folder = true;
        tenant
    }

    fn values() -> HashMap<String, String> {
        HashMap::from([
            ("tenantId".to_string(), "id-1".to_string()),
            ("tenantName".to_string(), "acme".to_string()),
        ])
    }

    #[test]
    fn test_round_trip_without_values() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tenant.json");

        let wrapped = WrappedRecord::create(&templated()).unwrap();
        wrapped.to_file(&path).unwrap();

        let loaded = WrappedRecord::from_file(&path, None, SubstitutionMode::Strict).unwrap();
        assert_eq!(loaded, wrapped);
        assert_eq!(loaded.to_instance::<NewTenant>().unwrap(), templated());

        let empty = HashMap::new();
        let loaded = WrappedRecord::from_file(&path, Some(&empty), SubstitutionMode::Strict).unwrap();
        assert_eq!(loaded, wrapped);
        assert_eq!(loaded.to_instance::<NewTenant>().unwrap(), templated());
    }

    #[test]
    fn test_file_layout() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tenant.json");
        WrappedRecord::create(&templated()).unwrap().to_file(&path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("{\n  \"className\": \"NewTenant\",\n  \"metaData\": {"));
        assert!(text.contains("\"dstPath\": null"));
    }

    #[test]
    fn test_substitution_resolves_instance() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tenant.json");
        let wrapped = WrappedRecord::create(&templated()).unwrap();
        wrapped.to_file(&path).unwrap();

        let values = values();
        let loaded = WrappedRecord::from_file(&path, Some(&values), SubstitutionMode::Strict).unwrap();
        assert_ne!(loaded, wrapped);

        let tenant: NewTenant = loaded.to_instance().unwrap();
        assert_eq!(tenant.id, "id-1");
        assert_eq!(tenant.name, "acme");
        assert_eq!(tenant.viewer_seats, 1);
    }

    #[test]
    fn test_incomplete_values() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tenant.json");
        WrappedRecord::create(&templated()).unwrap().to_file(&path).unwrap();

        let partial = HashMap::from([("tenantId".to_string(), "id-1".to_string())]);
        let err = WrappedRecord::from_file(&path, Some(&partial), SubstitutionMode::Strict).unwrap_err();
        assert!(matches!(err, RecordError::MissingPlaceholder(ref name) if name == "tenantName"));

        let loaded = WrappedRecord::from_file(&path, Some(&partial), SubstitutionMode::Permissive).unwrap();
        let tenant: NewTenant = loaded.to_instance().unwrap();
        assert_eq!(tenant.id, "id-1");
        assert_eq!(tenant.name, "$tenantName");
    }

    #[test]
    fn test_class_mismatch() {
        let wrapped = WrappedRecord::create(&templated()).unwrap();
        let err = wrapped.to_instance::<Role>().unwrap_err();
        assert!(matches!(
            err,
            RecordError::ClassMismatch { expected: "Role", ref found } if found == "NewTenant"
        ));
    }

    #[test]
    fn test_validate() {
        let wrapped = WrappedRecord::create(&templated()).unwrap();
        assert!(wrapped.validate().is_ok());

        let mut broken = wrapped.clone();
        broken.data = serde_json::json!({"id": 1});
        assert!(matches!(broken.validate(), Err(RecordError::Json(_))));

        broken.class_name = "Tenant".to_string();
        assert!(matches!(broken.validate(), Err(RecordError::UnknownClass(ref c)) if c == "Tenant"));
    }

    #[test]
    fn test_with_meta() {
        let wrapped = WrappedRecord::create(&templated())
            .unwrap()
            .with_meta("tenant", "tenants/acme");
        assert_eq!(wrapped.meta_data.name.as_deref(), Some("tenant"));
        assert_eq!(wrapped.meta_data.dst_path.as_deref(), Some("tenants/acme"));
        assert!(wrapped.meta_data.modified.is_some());
    }

    #[test]
    fn test_missing_file() {
        let err = WrappedRecord::from_file("/nonexistent/record.json", None, SubstitutionMode::Strict).unwrap_err();
        assert!(matches!(err, RecordError::Io { .. }));
    }
}
