//
//  pyramid-api
//  output/table.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Table Output Formatting
//!
//! Terminal tables rendered with `comfy_table`, using UTF-8 box-drawing
//! characters and dynamic column arrangement.
//!
//! ```rust,ignore
//! use pyramid_api::output::TableBuilder;
//!
//! TableBuilder::new()
//!     .headers(["Unit", "Items"])
//!     .row(["enums.rs", "14"])
//!     .print();
//! ```

use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};

/// Creates an empty table with the standard preset.
pub fn create_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Builder for tables with optionally colored headers.
pub struct TableBuilder {
    table: Table,
    color: bool,
}

impl TableBuilder {
    /// Creates a builder; colors follow the terminal's capabilities.
    pub fn new() -> Self {
        Self {
            table: create_table(),
            color: console::colors_enabled(),
        }
    }

    pub fn color(mut self, enabled: bool) -> Self {
        self.color = enabled;
        self
    }

    pub fn headers<I, S>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let headers: Vec<String> = headers.into_iter().map(|s| s.into()).collect();
        if self.color {
            let header_cells: Vec<Cell> = headers.iter().map(|h| Cell::new(h).fg(Color::Cyan)).collect();
            self.table.set_header(header_cells);
        } else {
            self.table.set_header(headers);
        }
        self
    }

    pub fn row<I, S>(mut self, cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let row: Vec<String> = cells.into_iter().map(|s| s.into()).collect();
        self.table.add_row(row);
        self
    }

    /// Adds a row whose last cell is colored green or red by `ok`.
    pub fn outcome_row<I, S>(mut self, cells: I, outcome: &str, ok: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut row: Vec<Cell> = cells.into_iter().map(|s| Cell::new(s.into())).collect();
        let mut last = Cell::new(outcome);
        if self.color {
            last = last.fg(if ok { Color::Green } else { Color::Red });
        }
        row.push(last);
        self.table.add_row(row);
        self
    }

    pub fn print(self) {
        println!("{}", self.table);
    }

    pub fn build(self) -> Table {
        self.table
    }
}

impl Default for TableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Truncates `s` to `max_len` characters, ending with `...` when cut.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let cut: String = s.chars().take(max_len - 3).collect();
        format!("{cut}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("this is a long error message", 10), "this is...");
        assert_eq!(truncate("abc", 2), "ab");
    }

    #[test]
    fn test_table_contents() {
        let table = TableBuilder::new()
            .color(false)
            .headers(["Unit", "Items", "Status"])
            .outcome_row(["enums.rs", "2"], "ok", true)
            .build()
            .to_string();
        assert!(table.contains("enums.rs"));
        assert!(table.contains("Status"));
        assert!(table.contains("ok"));
    }
}
