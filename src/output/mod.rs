//
//  pyramid-api
//  output/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Output Module
//!
//! Terminal output for the `pyramid` binary:
//!
//! - [`table`]: `comfy_table` tables for human-readable output
//! - [`json`]: pretty JSON for `--json` and scripting
//!
//! Generation reports have both renderings here, [`report_table`] and
//! [`report_json`].

mod json;
mod table;

pub use json::*;
pub use table::*;

use comfy_table::Table;
use serde_json::{json, Value};

use crate::codegen::GenerationReport;

/// Renders a generation report: one row per written unit, then one per failure.
pub fn report_table(report: &GenerationReport, color: bool) -> Table {
    let mut builder = TableBuilder::new()
        .color(color)
        .headers(["Unit", "Items", "Status"]);

    for unit in &report.units {
        let file = unit
            .file
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| unit.file.display().to_string());
        builder = builder.outcome_row([file, unit.items.to_string()], "written", true);
    }
    for failure in &report.failures {
        builder = builder.outcome_row(
            [format!("{} / {}", failure.unit, failure.schema), "-".to_string()],
            &truncate(&failure.error.to_string(), 60),
            false,
        );
    }

    builder.build()
}

/// Machine-readable form of a generation report.
pub fn report_json(report: &GenerationReport) -> Value {
    json!({
        "success": report.is_success(),
        "items": report.items(),
        "units": report
            .units
            .iter()
            .map(|u| json!({"file": u.file.display().to_string(), "items": u.items}))
            .collect::<Vec<_>>(),
        "failures": report
            .failures
            .iter()
            .map(|f| json!({"unit": f.unit, "schema": f.schema, "error": f.error.to_string()}))
            .collect::<Vec<_>>(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::{ScrapeError, SchemaFailure, UnitReport};
    use std::path::PathBuf;

    fn report() -> GenerationReport {
        GenerationReport {
            units: vec![UnitReport {
                file: PathBuf::from("out/enums.rs"),
                items: 3,
            }],
            failures: vec![SchemaFailure {
                unit: "objects".to_string(),
                schema: "Broken".to_string(),
                error: ScrapeError::NotCached("Broken".to_string()),
            }],
        }
    }

    #[test]
    fn test_report_table() {
        let rendered = report_table(&report(), false).to_string();
        assert!(rendered.contains("enums.rs"));
        assert!(rendered.contains("objects / Broken"));
        assert!(!rendered.contains("out/enums.rs"));
    }

    #[test]
    fn test_report_json() {
        let value = report_json(&report());
        assert_eq!(value["success"], false);
        assert_eq!(value["items"], 3);
        assert_eq!(value["failures"][0]["schema"], "Broken");
    }
}
