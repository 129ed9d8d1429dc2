//! The line-delimited snippets artifact.
//!
//! One snippet per line, no escaping: Gmail snippets are single-line preview
//! strings. The report path writes this file and then re-reads it, so the
//! printed totals always come from exactly what landed on disk.

use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::Path;

pub fn write_snippets(path: &Path, snippets: &[String]) -> Result<()> {
    let mut file =
        fs::File::create(path).with_context(|| format!("write {}", path.display()))?;
    for snippet in snippets {
        writeln!(file, "{snippet}").with_context(|| format!("write {}", path.display()))?;
    }
    Ok(())
}

pub fn read_snippets(path: &Path) -> Result<Vec<String>> {
    let text = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    Ok(text.lines().map(str::to_string).collect())
}
