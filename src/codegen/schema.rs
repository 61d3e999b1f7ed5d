//
//  pyramid-api
//  codegen/schema.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Schema Building
//!
//! Turns extracted table rows and method page text into schema descriptions
//! ready for rendering. Object and enum tables are handled by two separate
//! builders on purpose: the reference documents lay them out differently
//! and the two rule sets are kept apart.
//!
//! ## Object Rules
//!
//! | Column | Effect |
//! |--------|--------|
//! | `Type` | `word[]` becomes a list of `word`; known primitives are mapped |
//! | `Required` | `Y` keeps the type, anything else wraps it in an option |
//! | `Description` | contains `default:false` / `default:true` (any case) → boolean default |
//!
//! ## Enum Rules
//!
//! The `Enumerated Name` column names the member; a reserved word gets one
//! trailing `_`. The `Value` column is the integer discriminant.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use super::{extract, HtmlPage, ScrapeError, TableRow};

static LIST_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\w+)\s*\[\s*\]").expect("list pattern is a valid regex"));

/// Words that cannot be used as plain Rust identifiers.
pub const RESERVED_WORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum",
    "extern", "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move",
    "mut", "pub", "ref", "return", "self", "Self", "static", "struct", "super", "trait", "true",
    "type", "unsafe", "use", "where", "while", "abstract", "become", "box", "do", "final", "gen",
    "macro", "override", "priv", "try", "typeof", "unsized", "virtual", "yield",
];

pub fn is_reserved(word: &str) -> bool {
    RESERVED_WORDS.contains(&word)
}

/// Appends a single `_` to reserved words.
///
/// There is no counter: `type` and a literal `type_` member would collide.
pub fn escape_reserved(name: &str) -> String {
    if is_reserved(name) {
        format!("{name}_")
    } else {
        name.to_string()
    }
}

/// Language-neutral type token derived from a documented type string.
///
/// `Display` renders the Rust spelling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldType {
    String,
    Integer,
    Boolean,
    Number,
    /// Free-form JSON object
    Object,
    /// Another documented object or enum
    Named(String),
    List(Box<FieldType>),
    Optional(Box<FieldType>),
}

impl FieldType {
    /// Derives a type from a documented `Type` cell.
    ///
    /// A `word[]` anywhere in the text (whitespace allowed around the
    /// brackets) yields a list of `word`; everything else maps through
    /// [`FieldType::primitive`].
    pub fn from_documented(raw: &str) -> Self {
        match LIST_PATTERN.captures(raw) {
            Some(caps) => Self::List(Box::new(Self::primitive(&caps[1]))),
            None => Self::primitive(raw),
        }
    }

    /// Maps a single documented word to a type, without the list rule.
    pub fn primitive(word: &str) -> Self {
        let word = word.trim();
        match word.to_ascii_lowercase().as_str() {
            "string" => Self::String,
            "integer" | "int" | "long" => Self::Integer,
            "boolean" | "bool" => Self::Boolean,
            "number" | "double" | "float" | "decimal" => Self::Number,
            "object" => Self::Object,
            _ => Self::Named(word.to_string()),
        }
    }

    pub fn optional(inner: FieldType) -> Self {
        Self::Optional(Box::new(inner))
    }

    pub fn list(inner: FieldType) -> Self {
        Self::List(Box::new(inner))
    }

    pub fn is_optional(&self) -> bool {
        matches!(self, Self::Optional(_))
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => write!(f, "String"),
            Self::Integer => write!(f, "i64"),
            Self::Boolean => write!(f, "bool"),
            Self::Number => write!(f, "f64"),
            Self::Object => write!(f, "serde_json::Value"),
            Self::Named(name) => write!(f, "{name}"),
            Self::List(inner) => write!(f, "Vec<{inner}>"),
            Self::Optional(inner) => write!(f, "Option<{inner}>"),
        }
    }
}

/// One attribute row of an object definition table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaAttribute {
    /// Documented attribute name (empty when the row had no `Name` cell)
    pub name: String,
    /// `Type` cell as written
    pub raw_type: String,
    /// Derived type
    pub field_type: FieldType,
    pub required: bool,
    pub description: String,
    /// `Format` cell, when the table has one
    pub format: Option<String>,
    /// Boolean default encoded in the description
    pub default: Option<bool>,
}

/// A documented object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectSchema {
    pub name: String,
    pub url: String,
    pub attributes: Vec<SchemaAttribute>,
}

/// One member of a documented enum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumMember {
    pub name: String,
    pub value: i64,
}

/// A documented enum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumSchema {
    pub name: String,
    pub url: String,
    pub members: Vec<EnumMember>,
}

/// A documented API method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSchema {
    /// Method name (last path segment of the definition link)
    pub name: String,
    pub url: String,
    /// Raw endpoint path template
    pub endpoint: String,
    /// Page title
    pub description: String,
    /// Input parameter name → description, in page order
    pub inputs: Vec<(String, String)>,
    /// Output entry name → description, in page order
    pub outputs: Vec<(String, String)>,
    /// Derived response type; `None` when the page documents none
    pub response: Option<FieldType>,
}

/// Detects a boolean default encoded in a description.
///
/// Plain case-insensitive substring match; `default:false` is checked first.
pub fn default_from_description(description: &str) -> Option<bool> {
    let lowered = description.to_lowercase();
    if lowered.contains("default:false") {
        Some(false)
    } else if lowered.contains("default:true") {
        Some(true)
    } else {
        None
    }
}

/// Builds the attribute for one object table row.
pub fn build_attribute(row: &TableRow) -> SchemaAttribute {
    let raw_type = row.get("Type").unwrap_or("unknown").to_string();
    let required = row.get("Required") == Some("Y");
    let description = row.get("Description").unwrap_or_default().to_string();

    let base = FieldType::from_documented(&raw_type);
    let field_type = if required { base } else { FieldType::optional(base) };

    SchemaAttribute {
        name: row.get("Name").unwrap_or_default().to_string(),
        raw_type,
        field_type,
        required,
        default: default_from_description(&description),
        format: row.get("Format").map(str::to_string),
        description,
    }
}

/// Builds an object schema from its definition table rows.
pub fn build_object_schema(name: &str, url: &str, rows: &[TableRow]) -> ObjectSchema {
    ObjectSchema {
        name: name.to_string(),
        url: url.to_string(),
        attributes: rows.iter().map(build_attribute).collect(),
    }
}

/// Builds an enum schema from its definition table rows.
///
/// # Errors
///
/// A row without an `Enumerated Name` cell, or with a non-integer `Value`,
/// fails the whole enum.
pub fn build_enum_schema(name: &str, url: &str, rows: &[TableRow]) -> Result<EnumSchema, ScrapeError> {
    let members = rows
        .iter()
        .enumerate()
        .map(|(index, row)| {
            let column = |column: &str| {
                row.get(column).ok_or_else(|| ScrapeError::MissingColumn {
                    schema: name.to_string(),
                    row: index + 1,
                    column: column.to_string(),
                })
            };

            let member = escape_reserved(column("Enumerated Name")?);
            let raw_value = column("Value")?;
            let value = raw_value
                .parse::<i64>()
                .map_err(|_| ScrapeError::InvalidEnumValue {
                    schema: name.to_string(),
                    member: member.clone(),
                    value: raw_value.to_string(),
                })?;

            Ok(EnumMember { name: member, value })
        })
        .collect::<Result<Vec<_>, ScrapeError>>()?;

    Ok(EnumSchema {
        name: name.to_string(),
        url: url.to_string(),
        members,
    })
}

/// Derives a method's response type from its output entries.
///
/// `Response Type` is kept verbatim as a single type. Otherwise
/// `Response List Type` goes through the list rule. Neither means no
/// response.
pub fn response_type(outputs: &[(String, String)]) -> Option<FieldType> {
    let lookup = |key: &str| {
        outputs
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
            .filter(|value| !value.is_empty())
    };

    if let Some(single) = lookup("Response Type") {
        return Some(FieldType::Named(single.to_string()));
    }
    lookup("Response List Type").map(FieldType::from_documented)
}

/// Builds a method schema from its reference page.
///
/// `name` is the definition link (e.g. `access/getMe`); only its last
/// segment is kept.
pub fn build_method_schema(name: &str, page: &HtmlPage) -> Result<MethodSchema, ScrapeError> {
    let method = extract::extract_method_page(page)?;
    let outputs = extract::pair_up(&method.output);

    Ok(MethodSchema {
        name: name.rsplit('/').next().unwrap_or(name).to_string(),
        url: page.url.clone(),
        endpoint: method.endpoint,
        description: method.title,
        inputs: extract::pair_up(&method.input),
        response: response_type(&outputs),
        outputs,
    })
}
