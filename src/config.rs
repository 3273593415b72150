//! TOML configuration. Every key is optional; defaults describe the standard
//! docs site layout.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "refindex.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub base_url: String,
    /// Where the search index artifacts are written.
    pub output_dir: PathBuf,
    pub index: IndexConfig,
    pub reference: ReferenceConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "https://docs.deno.com".to_string(),
            output_dir: PathBuf::from("static"),
            index: IndexConfig::default(),
            reference: ReferenceConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    pub root: PathBuf,
    pub include_dirs: Vec<String>,
    pub exclude_files: Vec<String>,
    pub extensions: Vec<String>,
    pub min_content_length: usize,
    pub reference_files: Vec<ReferenceFile>,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            include_dirs: ["runtime", "deploy", "examples", "subhosting", "lint"]
                .map(String::from)
                .to_vec(),
            exclude_files: ["README.md", "deno.json", "deno.lock", "lume.ts", "server.ts"]
                .map(String::from)
                .to_vec(),
            extensions: ["md", "mdx"].map(String::from).to_vec(),
            min_content_length: 50,
            reference_files: ["deno", "web", "node"]
                .iter()
                .map(|name| ReferenceFile {
                    path: PathBuf::from(format!("reference_gen/gen/{}.json", name)),
                    package: capitalize(name),
                    base_url: format!("/api/{}", name),
                })
                .collect(),
        }
    }
}

/// A generated reference artifact fed into the search index.
#[derive(Debug, Clone, Deserialize)]
pub struct ReferenceFile {
    pub path: PathBuf,
    pub package: String,
    pub base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReferenceConfig {
    pub output_dir: PathBuf,
    pub url_root: String,
    pub packages: Vec<PackageConfig>,
}

impl Default for ReferenceConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("reference_gen/gen"),
            url_root: "/api".to_string(),
            packages: vec![
                PackageConfig {
                    name: "Web".to_string(),
                    files: vec!["reference_gen/types/web.json".to_string()],
                    category_docs: Some(PathBuf::from("reference/_categories/web-categories.json")),
                },
                PackageConfig {
                    name: "Deno".to_string(),
                    files: vec!["reference_gen/types/deno.json".to_string()],
                    category_docs: Some(PathBuf::from("reference/_categories/deno-categories.json")),
                },
                PackageConfig {
                    name: "Node".to_string(),
                    files: vec!["reference_gen/types/node/[!_]*.json".to_string()],
                    category_docs: None,
                },
            ],
        }
    }
}

/// One API surface and the symbol-tree files it is built from.
#[derive(Debug, Clone, Deserialize)]
pub struct PackageConfig {
    pub name: String,
    /// Paths or glob patterns.
    pub files: Vec<String>,
    /// Flat JSON object of category name → description.
    #[serde(default)]
    pub category_docs: Option<PathBuf>,
}

impl Config {
    /// Load `path`, or `refindex.toml` if present, or the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => {
                let candidate = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !candidate.is_file() {
                    tracing::debug!("no {} found, using defaults", DEFAULT_CONFIG_FILE);
                    return Ok(Self::default());
                }
                candidate
            }
        };

        let text = fs::read_to_string(&path).map_err(|e| Error::Config {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::parse(&text).map_err(|message| Error::Config {
            path: path.display().to_string(),
            message,
        })
    }

    pub fn parse(text: &str) -> std::result::Result<Self, String> {
        toml::from_str(text).map_err(|e| e.to_string())
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
