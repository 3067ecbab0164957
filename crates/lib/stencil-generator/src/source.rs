//! Where template files are read from.
//!
//! The template tree is embedded into the binary with `rust-embed`, so a
//! built `stencil` works without its source checkout. A directory on disk can
//! be used instead, for working on the templates themselves.

use crate::error::{GeneratorError, GeneratorResult};
use rust_embed::RustEmbed;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

#[derive(RustEmbed)]
#[folder = "$CARGO_MANIFEST_DIR/templates"]
struct BundledTemplates;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    /// The template tree compiled into this crate.
    Bundled,
    /// A template tree on disk.
    Directory(PathBuf),
}

impl TemplateSource {
    /// Base path source paths are planned from.
    ///
    /// Bundled templates use an empty base, so planned paths are the
    /// embedded file names themselves.
    pub fn root(&self) -> PathBuf {
        match self {
            TemplateSource::Bundled => PathBuf::new(),
            TemplateSource::Directory(root) => root.clone(),
        }
    }

    pub fn is_file(&self, path: &Path) -> bool {
        match self {
            TemplateSource::Bundled => BundledTemplates::get(&embedded_key(path)).is_some(),
            TemplateSource::Directory(_) => path.is_file(),
        }
    }

    pub fn is_dir(&self, path: &Path) -> bool {
        match self {
            TemplateSource::Bundled => {
                let prefix = embedded_prefix(path);
                BundledTemplates::iter().any(|file| file.starts_with(&prefix))
            }
            TemplateSource::Directory(_) => path.is_dir(),
        }
    }

    /// Every file beneath `dir`, relative to it, sorted by path.
    pub fn list_files(&self, dir: &Path) -> GeneratorResult<Vec<PathBuf>> {
        let mut files = match self {
            TemplateSource::Bundled => {
                let prefix = embedded_prefix(dir);
                BundledTemplates::iter()
                    .filter_map(|file| file.strip_prefix(&prefix).map(PathBuf::from))
                    .collect::<Vec<_>>()
            }
            TemplateSource::Directory(_) => {
                let mut files = Vec::new();
                for entry in WalkDir::new(dir).follow_links(true) {
                    let entry = entry?;
                    if !entry.file_type().is_file() {
                        continue;
                    }

                    // WalkDir only yields paths beneath its root.
                    if let Ok(relative) = entry.path().strip_prefix(dir) {
                        files.push(relative.to_path_buf());
                    }
                }
                files
            }
        };

        files.sort();
        Ok(files)
    }

    pub async fn read(&self, path: &Path) -> GeneratorResult<Vec<u8>> {
        match self {
            TemplateSource::Bundled => BundledTemplates::get(&embedded_key(path))
                .map(|file| file.data.into_owned())
                .ok_or_else(|| GeneratorError::MissingTemplate(path.to_path_buf())),
            TemplateSource::Directory(_) => match tokio::fs::read(path).await {
                Ok(bytes) => Ok(bytes),
                Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
                    Err(GeneratorError::MissingTemplate(path.to_path_buf()))
                }
                Err(error) => Err(GeneratorError::io(path, error)),
            },
        }
    }
}

// Embedded names always use `/`, whatever the host separator is.
fn embedded_key(path: &Path) -> String {
    path.components()
        .filter_map(|component| match component {
            Component::Normal(segment) => Some(segment.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

fn embedded_prefix(dir: &Path) -> String {
    let key = embedded_key(dir);
    if key.is_empty() { key } else { format!("{key}/") }
}
