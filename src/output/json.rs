//
//  pyramid-api
//  output/json.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! JSON output for `--json` and the `api` command.

use std::io::Write;

use serde::Serialize;

/// Prints `value` as pretty JSON on stdout.
pub fn write_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    write_json_to(&mut std::io::stdout().lock(), value)
}

pub fn write_json_to<W: Write, T: Serialize>(writer: &mut W, value: &T) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, value)?;
    writeln!(writer)?;
    Ok(())
}
