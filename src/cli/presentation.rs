//! CLI presentation: text and json formatters per command.

use crate::cli::parse::OutputFormat;
use crate::error::CatalogError;
use crate::store::shared::{CatalogMatchRecords, CatalogSearchHit};
use crate::tree::{BuildStats, Catalog};
use chrono::{DateTime, Utc};
use comfy_table::Table;
use serde::Serialize;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// One row of `list` output
#[derive(Debug, Clone, Serialize)]
pub struct CatalogListRow {
    pub name: String,
    pub root: String,
    pub directories: usize,
    pub files: usize,
}

impl From<&Catalog> for CatalogListRow {
    fn from(catalog: &Catalog) -> Self {
        let stats = catalog.stats();
        Self {
            name: catalog.name.clone(),
            root: catalog.root.name.clone(),
            directories: stats.directories,
            files: stats.files,
        }
    }
}

fn table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.set_header(header);
    table
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, CatalogError> {
    serde_json::to_string_pretty(value).map_err(|e| CatalogError::Serialization(e.to_string()))
}

fn date(timestamp: &DateTime<Utc>) -> String {
    timestamp.format(DATE_FORMAT).to_string()
}

pub fn format_scan_summary(name: &str, stats: &BuildStats) -> String {
    let mut out = format!(
        "Cataloged '{}': {} directories, {} files in {} ms",
        name,
        stats.directories,
        stats.files,
        stats.duration.as_millis()
    );
    if !stats.faults.is_empty() {
        out.push_str(&format!("\n{} entries could not be read:", stats.faults.len()));
        for fault in &stats.faults {
            match &fault.path {
                Some(path) => out.push_str(&format!("\n  {}: {}", path.display(), fault.message)),
                None => out.push_str(&format!("\n  {}", fault.message)),
            }
        }
    }
    out
}

pub fn format_catalog_list(
    rows: &[CatalogListRow],
    format: OutputFormat,
) -> Result<String, CatalogError> {
    if format == OutputFormat::Json {
        return to_json(rows);
    }
    if rows.is_empty() {
        return Ok("No catalogs".to_string());
    }
    let mut table = table(vec!["Catalog", "Root", "Directories", "Files"]);
    for row in rows {
        table.add_row(vec![
            row.name.clone(),
            row.root.clone(),
            row.directories.to_string(),
            row.files.to_string(),
        ]);
    }
    Ok(table.to_string())
}

pub fn format_find_hits(
    query: &str,
    hits: &[CatalogSearchHit],
    format: OutputFormat,
) -> Result<String, CatalogError> {
    if format == OutputFormat::Json {
        let rows: Vec<serde_json::Value> = hits
            .iter()
            .map(|hit| {
                serde_json::json!({
                    "catalog": hit.catalog_name,
                    "name": hit.node.name,
                    "kind": hit.node.kind,
                    "timestamp": hit.node.timestamp,
                    "children": hit.node.child_count,
                })
            })
            .collect();
        return to_json(&rows);
    }
    if hits.is_empty() {
        return Ok(format!("No match for '{}'", query));
    }
    let mut table = table(vec!["Catalog", "Name", "Kind", "Date"]);
    for hit in hits {
        table.add_row(vec![
            hit.catalog_name.clone(),
            hit.node.name.clone(),
            hit.node.kind.as_str().to_string(),
            date(&hit.node.timestamp),
        ]);
    }
    Ok(table.to_string())
}

pub fn format_fuzzy_results(
    query: &str,
    results: &[CatalogMatchRecords],
    format: OutputFormat,
) -> Result<String, CatalogError> {
    if format == OutputFormat::Json {
        let rows: Vec<serde_json::Value> = results
            .iter()
            .map(|result| {
                serde_json::json!({
                    "catalog": result.catalog_name,
                    "matches": result.matches,
                })
            })
            .collect();
        return to_json(&rows);
    }

    let total: usize = results.iter().map(|r| r.matches.len()).sum();
    if total == 0 {
        return Ok(format!("No files similar to '{}'", query));
    }
    let mut table = table(vec!["Catalog", "File Name", "Path", "Date"]);
    for result in results {
        for record in &result.matches {
            table.add_row(vec![
                result.catalog_name.clone(),
                record.name.clone(),
                record.path.clone(),
                date(&record.timestamp),
            ]);
        }
    }
    Ok(table.to_string())
}
