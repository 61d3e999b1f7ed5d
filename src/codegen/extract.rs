//
//  pyramid-api
//  codegen/extract.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # HTML Extraction
//!
//! Every assumption about the shape of the vendor's reference pages lives in
//! this module. The rest of the generator only sees [`TableRow`]s, link names,
//! and [`MethodPage`] text.
//!
//! ## Page Layouts
//!
//! - **Index pages** list definitions as links inside `table.fxlist`.
//! - **Definition pages** describe an object or enum in `table.apiCode`;
//!   the first row holds `th` header cells, every later row `td` cells.
//! - **Method pages** carry the endpoint in `div.apiCode`, the title in
//!   `h1`, and `h5` section headings (`Input Parameters`,
//!   `Output Response`) followed by alternating `div.apihead` /
//!   `div.apidetail` siblings, separated by `clear:left` spacer divs.
//!
//! If the vendor changes its layout, this is the file to change.

use std::collections::HashMap;

use scraper::{ElementRef, Selector};

use super::{HtmlPage, ScrapeError};

const SPACER_STYLE: &str = "clear:left";
const SECTION_TAG: &str = "h5";

/// One data row of a documentation table, keyed by header name.
///
/// Columns keep the table's order. A row with fewer cells than headers
/// simply lacks the trailing columns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableRow {
    cells: Vec<(String, String)>,
}

impl TableRow {
    /// Zips header names with cell texts, stopping at the shorter side.
    pub fn zip<H, C>(headers: H, cells: C) -> Self
    where
        H: IntoIterator,
        H::Item: Into<String>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        Self {
            cells: headers
                .into_iter()
                .zip(cells)
                .map(|(h, c)| (h.into(), c.into()))
                .collect(),
        }
    }

    /// Returns the cell under `column`.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// The text content of a method reference page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MethodPage {
    /// Endpoint path template, e.g. `/API2/access/getMe`
    pub endpoint: String,
    /// Page title
    pub title: String,
    /// Alternating heading/detail texts of the `Input Parameters` section
    pub input: Vec<String>,
    /// Alternating heading/detail texts of the `Output Response` section
    pub output: Vec<String>,
}

fn selector(css: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(css).map_err(|_| ScrapeError::Selector(css.to_string()))
}

fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn missing(page: &HtmlPage, css: &str) -> ScrapeError {
    ScrapeError::MissingElement {
        page: page.name.clone(),
        selector: css.to_string(),
    }
}

/// Extracts the rows of the page's `table.apiCode`.
///
/// # Errors
///
/// Returns [`ScrapeError::MissingElement`] if the page has no such table.
pub fn extract_table_rows(page: &HtmlPage) -> Result<Vec<TableRow>, ScrapeError> {
    let document = page.document();
    let table_sel = selector("table.apiCode")?;
    let row_sel = selector("tr")?;
    let header_sel = selector("th")?;
    let cell_sel = selector("td")?;

    let table = document
        .select(&table_sel)
        .next()
        .ok_or_else(|| missing(page, "table.apiCode"))?;

    let mut rows = table.select(&row_sel);
    let headers: Vec<String> = match rows.next() {
        Some(first) => first.select(&header_sel).map(text_of).collect(),
        None => return Ok(Vec::new()),
    };

    Ok(rows
        .map(|row| TableRow::zip(headers.iter().cloned(), row.select(&cell_sel).map(text_of)))
        .collect())
}

/// Extracts definition names linked from an index page's `table.fxlist`.
///
/// `definitions/User.htm` becomes `User`; `access/getMe.htm` becomes
/// `access/getMe`.
pub fn extract_index_links(page: &HtmlPage) -> Result<Vec<String>, ScrapeError> {
    let document = page.document();
    let table_sel = selector("table.fxlist")?;
    let link_sel = selector("a")?;

    let table = document
        .select(&table_sel)
        .next()
        .ok_or_else(|| missing(page, "table.fxlist"))?;

    Ok(table
        .select(&link_sel)
        .filter_map(|a| a.value().attr("href"))
        .map(|href| href.replace("definitions/", "").replace(".htm", ""))
        .collect())
}

/// Extracts the endpoint, title, and parameter sections of a method page.
pub fn extract_method_page(page: &HtmlPage) -> Result<MethodPage, ScrapeError> {
    let document = page.document();
    let endpoint_sel = selector("div.apiCode")?;
    let title_sel = selector("h1")?;
    let section_sel = selector(SECTION_TAG)?;

    let endpoint = document
        .select(&endpoint_sel)
        .next()
        .map(text_of)
        .ok_or_else(|| missing(page, "div.apiCode"))?;
    let title = document
        .select(&title_sel)
        .next()
        .map(text_of)
        .ok_or_else(|| missing(page, "h1"))?;

    // Later headings with the same text win.
    let sections: HashMap<String, ElementRef<'_>> = document
        .select(&section_sel)
        .map(|heading| (text_of(heading), heading))
        .collect();

    let section = |name: &str| {
        sections
            .get(name)
            .map(|heading| section_texts(*heading))
            .unwrap_or_default()
    };

    Ok(MethodPage {
        endpoint,
        title,
        input: section("Input Parameters"),
        output: section("Output Response"),
    })
}

/// Walks the siblings after a section heading.
///
/// Starts at the first following `div`, skips spacers, and stops at the next
/// section heading or at the first element that is neither an `apihead` nor
/// an `apidetail`.
fn section_texts(heading: ElementRef<'_>) -> Vec<String> {
    let mut siblings = heading.next_siblings().filter_map(ElementRef::wrap);
    let Some(first) = siblings.by_ref().find(|el| el.value().name() == "div") else {
        return Vec::new();
    };

    let mut texts = Vec::new();
    for node in std::iter::once(first).chain(siblings) {
        let element = node.value();
        if element.name() == SECTION_TAG {
            break;
        }
        if element.attr("style") == Some(SPACER_STYLE) {
            continue;
        }
        if element.classes().any(|c| c == "apihead" || c == "apidetail") {
            texts.push(text_of(node));
        } else {
            break;
        }
    }
    texts
}

/// Pairs an alternating `name, description, name, description, ...` list.
///
/// Pairing is positional: a trailing unpaired text is dropped, and a broken
/// alternation in the source silently shifts every following pair. A
/// repeated name keeps its first position and takes the latest description.
pub fn pair_up(texts: &[String]) -> Vec<(String, String)> {
    let mut pairs: Vec<(String, String)> = Vec::new();
    for chunk in texts.chunks_exact(2) {
        let (name, description) = (&chunk[0], &chunk[1]);
        match pairs.iter_mut().find(|(existing, _)| existing == name) {
            Some(entry) => entry.1 = description.clone(),
            None => pairs.push((name.clone(), description.clone())),
        }
    }
    pairs
}
