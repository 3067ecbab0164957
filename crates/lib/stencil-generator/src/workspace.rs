use crate::error::{GeneratorError, GeneratorResult};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Fails when wiping `destination` would also wipe the templates, or when the
/// templates would be written into themselves.
pub fn check_overlap(destination_root: &Path, template_root: &Path) -> GeneratorResult<()> {
    let destination = normalize(destination_root);
    let templates = normalize(template_root);

    if destination.starts_with(&templates) || templates.starts_with(&destination) {
        return Err(GeneratorError::DestinationOverlapsTemplates {
            destination,
            templates,
        });
    }

    Ok(())
}

/// Absolute form of `path` with symlinks resolved on the part that exists.
///
/// The destination usually does not exist yet, so only its deepest existing
/// ancestor is canonicalized and the missing components are appended back.
fn normalize(path: &Path) -> PathBuf {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());

    let mut existing = absolute.as_path();
    let mut missing = Vec::new();
    loop {
        if let Ok(resolved) = existing.canonicalize() {
            return missing
                .iter()
                .rev()
                .fold(resolved, |resolved, name| resolved.join(name));
        }

        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                missing.push(name);
                existing = parent;
            }
            _ => break,
        }
    }

    absolute
}

pub async fn is_empty(destination_root: &Path) -> GeneratorResult<bool> {
    let mut entries = match tokio::fs::read_dir(destination_root).await {
        Ok(entries) => entries,
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Ok(true),
        Err(error) => return Err(GeneratorError::io(destination_root, error)),
    };

    let first = entries
        .next_entry()
        .await
        .map_err(|error| GeneratorError::io(destination_root, error))?;

    Ok(first.is_none())
}

/// Deletes everything beneath `destination_root`, keeping the directory itself.
///
/// The directory is created when it does not exist yet.
#[tracing::instrument(skip_all, fields(destination = ?destination_root))]
pub async fn reset(destination_root: &Path) -> GeneratorResult<()> {
    info!("START Clean workspace");

    tokio::fs::create_dir_all(destination_root)
        .await
        .map_err(|error| GeneratorError::io(destination_root, error))?;

    let mut entries = tokio::fs::read_dir(destination_root)
        .await
        .map_err(|error| GeneratorError::io(destination_root, error))?;

    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|error| GeneratorError::io(destination_root, error))?
    {
        let path = entry.path();
        // Symlinks are removed, never followed.
        let file_type = entry
            .file_type()
            .await
            .map_err(|error| GeneratorError::io(&path, error))?;

        let removal = if file_type.is_dir() {
            tokio::fs::remove_dir_all(&path).await
        } else {
            tokio::fs::remove_file(&path).await
        };
        removal.map_err(|error| GeneratorError::io(&path, error))?;

        debug!(path = ?path, "Removed");
    }

    info!("COMPLETED Clean workspace");
    Ok(())
}
