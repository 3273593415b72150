//! Index output writers, with trait-based format dispatch.

pub mod json;
pub mod minimal;

use crate::error::{Error, Result};
use crate::index::{IndexCollection, IndexStats};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const INDEX_VERSION: &str = "1.0.0";

/// Writes an [`IndexCollection`] to disk in one format.
pub trait IndexOutput {
    fn file_name(&self) -> &str;
    fn write(&self, index: &IndexCollection) -> Result<PathBuf>;
}

/// Header shared by every output format.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub generated_at: String,
    pub version: String,
    pub base_url: String,
    pub total_documents: usize,
    pub stats: IndexStats,
}

impl Metadata {
    pub fn new(index: &IndexCollection, base_url: &str) -> Self {
        Self {
            generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            version: INDEX_VERSION.to_string(),
            base_url: base_url.to_string(),
            total_documents: index.len(),
            stats: index.stats(),
        }
    }
}

/// Create the writers for a format name: `full`, `minimal` or `all`.
pub fn create_outputs(format: &str, out_dir: &Path, base_url: &str) -> Result<Vec<Box<dyn IndexOutput>>> {
    let full = || -> Box<dyn IndexOutput> { Box::new(json::FullJsonOutput::new(out_dir, base_url)) };
    let minimal = || -> Box<dyn IndexOutput> { Box::new(minimal::MinimalJsonOutput::new(out_dir, base_url)) };
    match format {
        "full" | "json" => Ok(vec![full()]),
        "minimal" => Ok(vec![minimal()]),
        "all" => Ok(vec![full(), minimal()]),
        _ => Err(Error::Config {
            path: "--format".to_string(),
            message: format!("unknown format: {}. Use full, minimal, or all", format),
        }),
    }
}

/// The output directory must already exist; nothing is written otherwise.
pub fn ensure_output_dir(dir: &Path) -> Result<()> {
    if dir.is_dir() {
        Ok(())
    } else {
        Err(Error::OutputDirMissing {
            path: dir.display().to_string(),
        })
    }
}

/// Pretty-print `value` as JSON into `path`, logging the size.
pub(crate) fn write_json<T: Serialize>(path: &Path, value: &T, label: &str) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, &json)?;
    tracing::info!("Generated {}: {}", label, path.display());
    tracing::info!("File size: {} bytes", json.len());
    Ok(())
}
