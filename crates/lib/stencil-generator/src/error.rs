use std::path::PathBuf;
use thiserror::Error;

pub type GeneratorResult<T> = Result<T, GeneratorError>;

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Template file not found: {}", .0.display())]
    MissingTemplate(PathBuf),

    #[error("Template error in {}: {source}", .path.display())]
    Template {
        path: PathBuf,
        #[source]
        source: TemplateError,
    },

    #[error("Failed to walk template directory: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Prompt failed: {0}")]
    Prompt(String),

    #[error("Invalid answer, expected Y or N: {0:?}")]
    InvalidAnswer(String),

    #[error("The project name must not be empty")]
    EmptyProjectName,

    #[error("Workspace reset of {} was declined", .0.display())]
    ResetDeclined(PathBuf),

    #[error(
        "Destination {} overlaps the template directory {}",
        .destination.display(),
        .templates.display()
    )]
    DestinationOverlapsTemplates {
        destination: PathBuf,
        templates: PathBuf,
    },

    #[error("Failed to decode run configuration: {0}")]
    ConfigDecoding(#[from] toml::de::Error),

    #[error("Failed to encode run configuration: {0}")]
    ConfigEncoding(#[from] toml::ser::Error),

    #[error("A write task failed to complete: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl GeneratorError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Errors raised while rendering a single template file.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemplateError {
    #[error("Unknown template variable: {0}")]
    UnknownVariable(String),

    #[error("Unterminated tag starting at byte {0}")]
    Unterminated(usize),

    #[error("Unsupported tag at byte {offset}: {tag}")]
    UnsupportedTag { offset: usize, tag: String },
}
