use crate::error::{GeneratorError, GeneratorResult};
use crate::prompt::Prompter;
use crate::slug::slugify;
use crate::template::TemplateVars;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

/// File the answers are persisted to, at the destination root.
pub const CONFIG_FILE_NAME: &str = ".stencil.toml";

pub const DEFAULT_COPY_UTILITIES: &str = "Y";

/// Answers collected for one generator run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunConfig {
    pub project_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_name_slug: Option<String>,
    pub copy_utilities: bool,
}

impl RunConfig {
    pub fn new(project_name: impl Into<String>, copy_utilities: bool) -> Self {
        let project_name = project_name.into();
        let project_name_slug = slugify(Some(&project_name));

        Self {
            project_name,
            project_name_slug,
            copy_utilities,
        }
    }

    /// Runs the configuration prompts and builds the config from the answers.
    ///
    /// `default_name` seeds the project name prompt. Answers are validated
    /// here as well as in the prompter so that scripted prompters cannot
    /// slip a blank name or an unparseable flag through.
    #[tracing::instrument(skip_all)]
    pub fn from_prompts<P: Prompter + ?Sized>(
        prompter: &mut P,
        default_name: &str,
    ) -> GeneratorResult<Self> {
        let project_name = prompter.project_name(default_name)?;
        validate_project_name(&project_name)?;

        let copy_utilities = prompter.copy_utilities(DEFAULT_COPY_UTILITIES)?;
        let copy_utilities = parse_yes_no(&copy_utilities)?;

        let config = Self::new(project_name, copy_utilities);
        info!(
            project_name = %config.project_name,
            project_name_slug = ?config.project_name_slug,
            copy_utilities = config.copy_utilities,
            "Run configuration collected"
        );

        Ok(config)
    }

    pub fn template_vars(&self) -> TemplateVars {
        TemplateVars {
            project_name: self.project_name.clone(),
            project_name_slug: self.project_name_slug.clone().unwrap_or_default(),
        }
    }

    pub fn path_in(destination_root: &Path) -> PathBuf {
        destination_root.join(CONFIG_FILE_NAME)
    }

    /// Loads a previously persisted config, if the destination has one.
    pub async fn load(destination_root: &Path) -> GeneratorResult<Option<Self>> {
        let path = Self::path_in(destination_root);

        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(error) => return Err(GeneratorError::io(path, error)),
        };

        Ok(Some(toml::from_str(&content)?))
    }

    pub async fn save(&self, destination_root: &Path) -> GeneratorResult<PathBuf> {
        let path = Self::path_in(destination_root);
        let content = toml::to_string(self)?;

        tokio::fs::write(&path, content)
            .await
            .map_err(|error| GeneratorError::io(&path, error))?;

        Ok(path)
    }
}

/// Parses a Y/N answer: `y` or `n` in either case, surrounding whitespace ignored.
pub fn parse_yes_no(answer: &str) -> GeneratorResult<bool> {
    match answer.trim().to_lowercase().as_str() {
        "y" => Ok(true),
        "n" => Ok(false),
        _ => Err(GeneratorError::InvalidAnswer(answer.to_string())),
    }
}

/// Rejects names made only of whitespace. Other names are used as typed.
pub fn validate_project_name(name: &str) -> GeneratorResult<()> {
    if name.trim().is_empty() {
        return Err(GeneratorError::EmptyProjectName);
    }

    Ok(())
}

/// Default project name: the base name of the destination directory.
pub fn default_project_name(destination_root: &Path) -> String {
    destination_root
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default()
}
