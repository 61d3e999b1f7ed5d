//
//  pyramid-api
//  record/template.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! `$name` placeholder substitution.
//!
//! - `$$` is an escaped `$`
//! - `$name` and `${name}` are replaced by the value of `name`
//! - a name starts with a letter or `_` followed by letters, digits, or `_`
//! - any other `$` is an invalid placeholder

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::RecordError;

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\$(?:(\$)|([_a-zA-Z][_a-zA-Z0-9]*)|\{([_a-zA-Z][_a-zA-Z0-9]*)\}|())")
        .expect("placeholder pattern is valid")
});

/// What to do with placeholders that cannot be resolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubstitutionMode {
    /// Fail on a missing value or a malformed placeholder.
    #[default]
    Strict,
    /// Leave unresolved placeholders in the text.
    Permissive,
}

/// Replaces the placeholders in `text` with entries of `values`.
pub fn substitute(text: &str, values: &HashMap<String, String>, mode: SubstitutionMode) -> Result<String, RecordError> {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;

    for caps in PLACEHOLDER.captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };
        out.push_str(&text[last..whole.start()]);
        last = whole.end();

        out.push_str(&replacement(&caps, text, values, mode)?);
    }
    out.push_str(&text[last..]);

    Ok(out)
}

fn replacement(
    caps: &Captures<'_>,
    text: &str,
    values: &HashMap<String, String>,
    mode: SubstitutionMode,
) -> Result<String, RecordError> {
    let whole = caps.get(0).map_or("", |m| m.as_str());

    if caps.get(1).is_some() {
        return Ok("$".to_string());
    }

    if let Some(name) = caps.get(2).or_else(|| caps.get(3)) {
        return match (values.get(name.as_str()), mode) {
            (Some(value), _) => Ok(value.clone()),
            (None, SubstitutionMode::Permissive) => Ok(whole.to_string()),
            (None, SubstitutionMode::Strict) => Err(RecordError::MissingPlaceholder(name.as_str().to_string())),
        };
    }

    match mode {
        SubstitutionMode::Permissive => Ok(whole.to_string()),
        SubstitutionMode::Strict => {
            let offset = caps.get(0).map_or(0, |m| m.start());
            let (line, column) = position(text, offset);
            Err(RecordError::InvalidPlaceholder { line, column })
        }
    }
}

/// 1-based line and column of a byte offset.
fn position(text: &str, offset: usize) -> (usize, usize) {
    let before = &text[..offset];
    let line = before.matches('\n').count() + 1;
    let column = before.rfind('\n').map_or(offset, |nl| offset - nl - 1) + 1;
    (line, column)
}
