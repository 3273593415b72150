//! Full index: every document with all of its fields.

use crate::error::Result;
use crate::index::{IndexCollection, IndexedDocument};
use crate::render::{write_json, IndexOutput, Metadata};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const FILE_NAME: &str = "orama-index.json";

#[derive(Debug, Serialize, Deserialize)]
pub struct FullIndex {
    pub metadata: Metadata,
    pub documents: Vec<IndexedDocument>,
}

pub struct FullJsonOutput {
    out_dir: PathBuf,
    base_url: String,
}

impl FullJsonOutput {
    pub fn new(out_dir: &Path, base_url: &str) -> Self {
        Self {
            out_dir: out_dir.to_path_buf(),
            base_url: base_url.to_string(),
        }
    }
}

impl IndexOutput for FullJsonOutput {
    fn file_name(&self) -> &str {
        FILE_NAME
    }

    fn write(&self, index: &IndexCollection) -> Result<PathBuf> {
        let data = FullIndex {
            metadata: Metadata::new(index, &self.base_url),
            documents: index.documents.clone(),
        };
        let path = self.out_dir.join(FILE_NAME);
        write_json(&path, &data, "Orama index")?;
        Ok(path)
    }
}
