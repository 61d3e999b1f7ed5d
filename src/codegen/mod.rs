//
//  pyramid-api
//  codegen/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Documentation Scraper and Code Generator
//!
//! Reads the vendor's HTML REST reference and writes typed Rust definitions
//! for every documented object, enum, and method.
//!
//! ## Pipeline
//!
//! ```text
//! index page ──► names ──► definition page ──► rows / sections ──► schema ──► tokens ──► unit file
//!      (fetch)      (extract)        (fetch)          (extract)        (schema)   (emit)
//! ```
//!
//! Every page goes through a [`DocSource`], which consults a [`CacheStore`]
//! before touching the network.
//!
//! ## Output Units
//!
//! | File | Contents |
//! |------|----------|
//! | `enums.rs` | one integer-valued enum per documented enum, members named as documented |
//! | `objects.rs` | one struct per documented object |
//! | `<group>.rs` | one endpoint constant per method in the group |
//! | `mod.rs` | module declarations |
//!
//! ## Failure Handling
//!
//! A failure while building or rendering one schema is recorded in the
//! [`GenerationReport`] and the run moves on to the next schema. Failing to
//! fetch an index page aborts the run, since nothing in that unit can be
//! discovered. Units already written stay on disk either way.

mod cache;
mod emit;
mod error;
mod extract;
mod fetch;
mod schema;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use heck::ToSnakeCase;
use indicatif::ProgressBar;
use proc_macro2::TokenStream;
use url::Url;

pub use cache::{CacheStore, FsCacheStore, MemoryCacheStore};
pub use emit::{render_enum, render_method, render_object, render_unit, UnitKind, GENERATED_NOTICE};
pub use error::ScrapeError;
pub use extract::{extract_index_links, extract_method_page, extract_table_rows, pair_up, MethodPage, TableRow};
pub use fetch::{DocSource, HtmlPage, HttpFetcher, OfflineFetcher, PageFetcher};
pub use schema::{
    build_enum_schema, build_method_schema, build_object_schema, escape_reserved, EnumMember,
    EnumSchema, FieldType, MethodSchema, ObjectSchema, SchemaAttribute,
};

/// Root of the vendor's REST API reference.
pub const DEFAULT_DOCS_BASE_URL: &str =
    "https://help.pyramidanalytics.com/Content/Root/developer/reference/APIs/REST%20API/";

/// Method groups generated when none are configured.
pub const DEFAULT_METHOD_GROUPS: &[&str] = &[
    "auth",
    "access",
    "content",
    "query",
    "dataSources",
    "tasks",
    "notification",
];

/// Enums skipped when none are configured. Their pages do not follow the
/// usual enum table layout.
pub const DEFAULT_SKIP_ENUMS: &[&str] = &["QueryResultMessageExtraData"];

/// What to generate and where.
#[derive(Debug, Clone)]
pub struct GeneratorSettings {
    /// Reference root; must end with `/`
    pub docs_base_url: Url,
    /// Directory the units are written to
    pub output_dir: PathBuf,
    pub method_groups: Vec<String>,
    pub skip_enums: Vec<String>,
}

impl GeneratorSettings {
    /// Settings with the default reference URL, groups, and skip list.
    pub fn new(output_dir: impl Into<PathBuf>) -> Result<Self, ScrapeError> {
        Ok(Self {
            docs_base_url: Url::parse(DEFAULT_DOCS_BASE_URL)?,
            output_dir: output_dir.into(),
            method_groups: DEFAULT_METHOD_GROUPS.iter().map(|g| g.to_string()).collect(),
            skip_enums: DEFAULT_SKIP_ENUMS.iter().map(|e| e.to_string()).collect(),
        })
    }

    /// Overrides the reference root. A missing trailing `/` is added so
    /// relative joins stay under it.
    pub fn with_docs_base_url(mut self, base: &str) -> Result<Self, ScrapeError> {
        let base = if base.ends_with('/') {
            base.to_string()
        } else {
            format!("{base}/")
        };
        self.docs_base_url = Url::parse(&base)?;
        Ok(self)
    }

    fn page_url(&self, relative: &str) -> Result<String, ScrapeError> {
        Ok(self.docs_base_url.join(relative)?.to_string())
    }
}

/// One unit written by a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitReport {
    pub file: PathBuf,
    /// Number of schemas rendered into the unit
    pub items: usize,
}

/// A schema that could not be generated.
#[derive(Debug)]
pub struct SchemaFailure {
    /// Unit the schema belonged to
    pub unit: String,
    pub schema: String,
    pub error: ScrapeError,
}

/// Outcome of a generator run.
#[derive(Debug, Default)]
pub struct GenerationReport {
    pub units: Vec<UnitReport>,
    pub failures: Vec<SchemaFailure>,
}

impl GenerationReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Total schemas rendered across all units.
    pub fn items(&self) -> usize {
        self.units.iter().map(|u| u.items).sum()
    }

    fn fail(&mut self, unit: &str, schema: &str, error: ScrapeError) {
        tracing::warn!("skipping {} in {}: {}", schema, unit, error);
        self.failures.push(SchemaFailure {
            unit: unit.to_string(),
            schema: schema.to_string(),
            error,
        });
    }
}

/// Output file stem of a method group (`dataSources` → `data_sources`).
pub fn group_module_name(group: &str) -> String {
    group.to_snake_case()
}

/// Drives a full generation run.
pub struct Generator {
    source: DocSource,
    settings: GeneratorSettings,
    progress: Option<ProgressBar>,
}

impl Generator {
    pub fn new(source: DocSource, settings: GeneratorSettings) -> Self {
        Self {
            source,
            settings,
            progress: None,
        }
    }

    /// Reports each processed page on `progress`.
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn settings(&self) -> &GeneratorSettings {
        &self.settings
    }

    /// Runs every stage: enums, objects, each method group, then `mod.rs`.
    pub async fn run(&self) -> Result<GenerationReport, ScrapeError> {
        std::fs::create_dir_all(&self.settings.output_dir)?;
        let mut report = GenerationReport::default();
        let mut modules = vec!["enums".to_string(), "objects".to_string()];

        self.generate_enums(&mut report).await?;
        self.generate_objects(&mut report).await?;
        for group in &self.settings.method_groups {
            self.generate_group(group, &mut report).await?;
            modules.push(group_module_name(group));
        }

        let file = self.write_unit("mod", &emit::render_mod(&modules)?)?;
        report.units.push(UnitReport {
            file,
            items: modules.len(),
        });

        if let Some(progress) = &self.progress {
            progress.finish_and_clear();
        }
        Ok(report)
    }

    /// Fetches an index page and lists the names it links to.
    async fn index(&self, key: &str, relative: &str) -> Result<Vec<String>, ScrapeError> {
        let page = self
            .source
            .fetch_page(&format!("index/{key}"), &self.settings.page_url(relative)?)
            .await?;
        let names = extract_index_links(&page)?;
        tracing::info!("{} lists {} definitions", relative, names.len());
        if let Some(progress) = &self.progress {
            progress.inc_length(names.len() as u64);
        }
        Ok(names)
    }

    async fn definition_rows(&self, name: &str) -> Result<(String, Vec<TableRow>), ScrapeError> {
        let url = self.settings.page_url(&format!("definitions/{name}.htm"))?;
        let page = self.source.fetch_page(name, &url).await?;
        Ok((url, extract_table_rows(&page)?))
    }

    fn tick(&self, name: &str) {
        if let Some(progress) = &self.progress {
            progress.set_message(name.to_string());
            progress.inc(1);
        }
    }

    /// Generates `enums.rs`.
    pub async fn generate_enums(&self, report: &mut GenerationReport) -> Result<(), ScrapeError> {
        let names = self.index("enums", "enums.htm").await?;
        let mut items = Vec::with_capacity(names.len());

        for name in &names {
            self.tick(name);
            if self.settings.skip_enums.iter().any(|skip| skip == name) {
                tracing::info!("skipping enum {}", name);
                continue;
            }
            let rendered = async {
                let (url, rows) = self.definition_rows(name).await?;
                render_enum(&build_enum_schema(name, &url, &rows)?)
            }
            .await;
            match rendered {
                Ok(tokens) => items.push(tokens),
                Err(e) => report.fail("enums", name, e),
            }
        }

        self.finish_unit(
            "enums",
            "Integer-backed enums of the Pyramid REST API.",
            UnitKind::Enums,
            &items,
            report,
        )
    }

    /// Generates `objects.rs`.
    pub async fn generate_objects(&self, report: &mut GenerationReport) -> Result<(), ScrapeError> {
        let names = self.index("objects", "objects.htm").await?;
        let mut items = Vec::with_capacity(names.len());
        let mut helpers = HashSet::new();

        for name in &names {
            self.tick(name);
            let rendered = async {
                let (url, rows) = self.definition_rows(name).await?;
                render_object(&build_object_schema(name, &url, &rows))
            }
            .await;
            match rendered {
                Ok(object) => {
                    helpers.extend(object.helpers);
                    items.push(object.tokens);
                }
                Err(e) => report.fail("objects", name, e),
            }
        }

        items.push(emit::default_helpers(&helpers));
        let count = items.len() - 1;
        self.finish_unit_counted(
            "objects",
            "Records of the Pyramid REST API.",
            UnitKind::Objects,
            &items,
            count,
            report,
        )
    }

    /// Generates the unit for one method group.
    pub async fn generate_group(&self, group: &str, report: &mut GenerationReport) -> Result<(), ScrapeError> {
        let methods = self.index(group, &format!("API2/{group}.htm")).await?;
        let mut items = Vec::with_capacity(methods.len());
        let mut seen = HashSet::new();

        for method in &methods {
            self.tick(method);
            let rendered = async {
                let url = self.settings.page_url(&format!("API2/{method}.htm"))?;
                let page = self.source.fetch_page(&format!("method/{method}"), &url).await?;
                let schema = build_method_schema(method, &page)?;
                Ok::<_, ScrapeError>((emit::method_const_name(&schema.name), render_method(&schema)?))
            }
            .await;
            match rendered {
                Ok((constant, tokens)) if seen.insert(constant.clone()) => items.push(tokens),
                Ok((constant, _)) => report.fail(
                    group,
                    method,
                    ScrapeError::InvalidIdentifier(format!("{method} (duplicate constant {constant})")),
                ),
                Err(e) => report.fail(group, method, e),
            }
        }

        self.finish_unit(
            &group_module_name(group),
            &format!("Endpoints of the `{group}` method group."),
            UnitKind::Methods,
            &items,
            report,
        )
    }

    fn finish_unit(
        &self,
        name: &str,
        doc: &str,
        kind: UnitKind,
        items: &[TokenStream],
        report: &mut GenerationReport,
    ) -> Result<(), ScrapeError> {
        self.finish_unit_counted(name, doc, kind, items, items.len(), report)
    }

    fn finish_unit_counted(
        &self,
        name: &str,
        doc: &str,
        kind: UnitKind,
        items: &[TokenStream],
        count: usize,
        report: &mut GenerationReport,
    ) -> Result<(), ScrapeError> {
        let source = render_unit(name, doc, kind, items)?;
        let file = self.write_unit(name, &source)?;
        tracing::info!("wrote {} ({} items)", file.display(), count);
        report.units.push(UnitReport { file, items: count });
        Ok(())
    }

    fn write_unit(&self, name: &str, source: &str) -> Result<PathBuf, ScrapeError> {
        let file = unit_path(&self.settings.output_dir, name);
        std::fs::write(&file, source)?;
        Ok(file)
    }
}

fn unit_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{name}.rs"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://docs.test/REST/";

    fn index(links: &[&str]) -> String {
        let rows: String = links
            .iter()
            .map(|l| format!(r#"<tr><td><a href="{l}.htm">{l}</a></td></tr>"#))
            .collect();
        format!(r#"<table class="fxlist">{rows}</table>"#)
    }

    fn table(headers: &[&str], rows: &[&[&str]]) -> String {
        let head: String = headers.iter().map(|h| format!("<th><p>{h}</p></th>")).collect();
        let body: String = rows
            .iter()
            .map(|r| {
                let cells: String = r.iter().map(|c| format!("<td>{c}</td>")).collect();
                format!("<tr>{cells}</tr>")
            })
            .collect();
        format!(r#"<table class="apiCode"><tr>{head}</tr>{body}</table>"#)
    }

    fn fixture_cache() -> MemoryCacheStore {
        MemoryCacheStore::new()
            .with_page("index/enums", index(&["definitions/AccessType", "definitions/QueryResultMessageExtraData", "definitions/Broken"]))
            .with_page(
                "AccessType",
                table(&["Name", "Enumerated Name", "Value"], &[&["Read Access", "read", "1"], &["Write", "write", "2"]]),
            )
            .with_page(
                "Broken",
                table(&["Name", "Enumerated Name", "Value"], &[&["Bad", "bad", "x"]]),
            )
            .with_page("index/objects", index(&["definitions/User"]))
            .with_page(
                "User",
                table(
                    &["Name", "Type", "Required", "Description"],
                    &[
                        &["userName", "string", "Y", "the user name"],
                        &["active", "boolean", "N", "Default:true - whether active"],
                        &["accessType", "AccessType", "N", ""],
                    ],
                ),
            )
            .with_page("index/access", index(&["access/getMe"]))
            .with_page(
                "method/access/getMe",
                r#"<h1>Get the current user</h1>
                   <div class="apiCode">/API2/access/getMe</div>
                   <h5>Output Response</h5>
                   <div class="apihead">Response Type</div><div class="apidetail">User</div>"#,
            )
    }

    #[tokio::test]
    async fn test_offline_run_from_cache() {
        let dir = tempfile::tempdir().unwrap();
        let mut settings = GeneratorSettings::new(dir.path())
            .unwrap()
            .with_docs_base_url(BASE)
            .unwrap();
        settings.method_groups = vec!["access".to_string()];

        let generator = Generator::new(DocSource::new(OfflineFetcher, fixture_cache()), settings);
        let report = generator.run().await.unwrap();

        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].schema, "Broken");
        assert!(matches!(report.failures[0].error, ScrapeError::InvalidEnumValue { .. }));

        let enums = std::fs::read_to_string(dir.path().join("enums.rs")).unwrap();
        assert!(enums.contains("pub enum AccessType"));
        assert!(enums.contains("read = 1,"));
        assert!(!enums.contains("QueryResultMessageExtraData"));

        let objects = std::fs::read_to_string(dir.path().join("objects.rs")).unwrap();
        assert!(objects.contains("pub struct User"));
        assert!(objects.contains("pub access_type: Option<AccessType>"));
        assert!(objects.contains("fn default_some_true()"));

        let access = std::fs::read_to_string(dir.path().join("access.rs")).unwrap();
        assert!(access.contains("pub const GET_ME: Endpoint"));

        let module = std::fs::read_to_string(dir.path().join("mod.rs")).unwrap();
        assert!(module.contains("pub mod access;"));
        assert_eq!(report.units.len(), 4);
    }

    #[tokio::test]
    async fn test_colliding_method_constants() {
        let dir = tempfile::tempdir().unwrap();
        let mut settings = GeneratorSettings::new(dir.path())
            .unwrap()
            .with_docs_base_url(BASE)
            .unwrap();
        settings.method_groups = vec!["access".to_string()];

        let page = r#"<h1>Get the current user</h1>
                      <div class="apiCode">/API2/access/getMe</div>"#;
        let cache = fixture_cache()
            .with_page("index/access", index(&["access/getMe", "access/get_me"]))
            .with_page("method/access/get_me", page);
        let generator = Generator::new(DocSource::new(OfflineFetcher, cache), settings);
        let report = generator.run().await.unwrap();

        let failure = report
            .failures
            .iter()
            .find(|f| f.unit == "access")
            .expect("duplicate constant reported");
        assert_eq!(failure.schema, "access/get_me");
        assert!(matches!(failure.error, ScrapeError::InvalidIdentifier(_)));

        let access = std::fs::read_to_string(dir.path().join("access.rs")).unwrap();
        assert_eq!(access.matches("pub const GET_ME: Endpoint").count(), 1);
    }

    #[tokio::test]
    async fn test_missing_index_aborts() {
        let dir = tempfile::tempdir().unwrap();
        let settings = GeneratorSettings::new(dir.path()).unwrap();
        let generator = Generator::new(DocSource::new(OfflineFetcher, MemoryCacheStore::new()), settings);

        let err = generator.run().await.unwrap_err();
        assert!(matches!(err, ScrapeError::NotCached(_)));
    }

    #[test]
    fn test_page_urls() {
        let settings = GeneratorSettings::new("out")
            .unwrap()
            .with_docs_base_url("https://docs.test/REST")
            .unwrap();
        assert_eq!(
            settings.page_url("definitions/User.htm").unwrap(),
            "https://docs.test/REST/definitions/User.htm"
        );
        assert_eq!(
            settings.page_url("API2/access/getMe.htm").unwrap(),
            "https://docs.test/REST/API2/access/getMe.htm"
        );
    }

    #[test]
    fn test_group_module_name() {
        assert_eq!(group_module_name("dataSources"), "data_sources");
        assert_eq!(group_module_name("auth"), "auth");
    }
}
