//! Picks the files that go into the search index.

use crate::config::{IndexConfig, ReferenceFile};
use crate::index::{DocType, InputFile};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub struct FileSelector {
    include_dirs: Vec<String>,
    exclude_files: Vec<String>,
    extensions: Vec<String>,
    reference_files: Vec<ReferenceFile>,
}

impl FileSelector {
    pub fn new(config: &IndexConfig) -> Self {
        Self {
            include_dirs: config.include_dirs.clone(),
            exclude_files: config.exclude_files.clone(),
            extensions: config.extensions.clone(),
            reference_files: config.reference_files.clone(),
        }
    }

    /// Markdown files under the include dirs, in directory order, followed
    /// by whichever reference artifacts exist.
    pub fn select(&self, root: &Path) -> Vec<InputFile> {
        let mut files = Vec::new();

        for dir in &self.include_dirs {
            let dir_path = root.join(dir);
            if !dir_path.is_dir() {
                tracing::warn!("skipping missing directory: {}", dir_path.display());
                continue;
            }

            for entry in WalkDir::new(&dir_path)
                .follow_links(true)
                .sort_by_file_name()
                .into_iter()
                .filter_map(|e| match e {
                    Ok(entry) => Some(entry),
                    Err(err) => {
                        tracing::warn!("skipping unreadable entry: {}", err);
                        None
                    }
                })
            {
                if !entry.file_type().is_file() {
                    continue;
                }
                let Some(relative) = relative_path(root, entry.path()) else {
                    continue;
                };
                if !self.is_eligible(&relative) {
                    continue;
                }
                tracing::debug!("Selected file: {}", relative);
                files.push(InputFile {
                    path: relative,
                    full_path: entry.path().to_path_buf(),
                    doc_type: DocType::Markdown,
                });
            }
        }

        for reference in &self.reference_files {
            let full_path = root.join(&reference.path);
            if !full_path.is_file() {
                tracing::warn!("Reference file not found: {}", full_path.display());
                continue;
            }
            files.push(InputFile {
                path: reference.path.to_string_lossy().replace('\\', "/"),
                full_path,
                doc_type: DocType::ApiReference {
                    package: reference.package.clone(),
                    base_url: reference.base_url.clone(),
                },
            });
        }

        files
    }

    /// Extension allowed, file name not excluded, no `_`-prefixed segment.
    pub fn is_eligible(&self, relative: &str) -> bool {
        let file_name = relative.rsplit('/').next().unwrap_or(relative);
        let has_extension = file_name
            .rsplit_once('.')
            .is_some_and(|(_, ext)| self.extensions.iter().any(|e| e == ext));
        if !has_extension {
            return false;
        }
        if self.exclude_files.iter().any(|ex| ex == file_name) {
            return false;
        }
        !relative.split('/').any(|segment| segment.starts_with('_'))
    }
}

/// `/`-separated path of `path` below `root`.
fn relative_path(root: &Path, path: &Path) -> Option<String> {
    let rel: PathBuf = path.strip_prefix(root).ok()?.to_path_buf();
    let parts: Vec<String> = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy().to_string())
        .collect();
    Some(parts.join("/"))
}
