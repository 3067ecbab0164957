use crate::config::{RunConfig, default_project_name};
use crate::error::{GeneratorError, GeneratorResult};
use crate::paths::PathTable;
use crate::prompt::Prompter;
use crate::source::TemplateSource;
use crate::toolchain::Toolchain;
use crate::workspace;
use crate::writer::{FileWriter, WriteReport};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[cfg(test)]
mod tests;

#[derive(Debug, Clone)]
pub struct GeneratorOptions {
    pub templates: TemplateSource,
    pub destination_root: PathBuf,
    /// Skip the confirmation before a non-empty destination is wiped.
    pub assume_yes: bool,
    pub install: bool,
    pub launch: bool,
}

impl GeneratorOptions {
    pub fn new(destination_root: impl Into<PathBuf>) -> Self {
        Self {
            templates: TemplateSource::Bundled,
            destination_root: destination_root.into(),
            assume_yes: false,
            install: true,
            launch: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageOutcome {
    Skipped,
    Succeeded,
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub config: RunConfig,
    pub written: WriteReport,
    pub install: StageOutcome,
    pub dev_server: StageOutcome,
}

/// Runs the generator stages in order: reset, prompts, writes, install, launch.
///
/// Each stage only starts once the previous one finished; fatal errors stop
/// the run where they happen and leave the destination as it is.
pub struct Generator<P, T> {
    options: GeneratorOptions,
    prompter: P,
    toolchain: T,
}

impl<P: Prompter, T: Toolchain> Generator<P, T> {
    pub fn new(options: GeneratorOptions, prompter: P, toolchain: T) -> Self {
        Self {
            options,
            prompter,
            toolchain,
        }
    }

    #[tracing::instrument(skip_all, fields(destination = ?self.options.destination_root))]
    pub async fn run(mut self) -> GeneratorResult<RunSummary> {
        let default_name = self.initialize().await?;
        let config = self.configure(&default_name).await?;

        let templates = &self.options.templates;
        let table = PathTable::plan(&templates.root(), &self.options.destination_root);
        let written = FileWriter::new(templates, &table, &config).write().await?;

        let install = self.install().await;
        let dev_server = self.launch().await;

        Ok(RunSummary {
            config,
            written,
            install,
            dev_server,
        })
    }

    /// Clears the destination and returns the default project name.
    async fn initialize(&mut self) -> GeneratorResult<String> {
        let destination = &self.options.destination_root;
        if let TemplateSource::Directory(template_root) = &self.options.templates {
            workspace::check_overlap(destination, template_root)?;
        }

        // Answers from an earlier run only seed the defaults; the file is
        // removed by the reset below like everything else.
        let previous = match RunConfig::load(destination).await {
            Ok(previous) => previous,
            Err(error) => {
                warn!(%error, "Ignoring unreadable run configuration");
                None
            }
        };

        if !self.options.assume_yes
            && !workspace::is_empty(destination).await?
            && !self.prompter.confirm_reset(destination)?
        {
            return Err(GeneratorError::ResetDeclined(destination.clone()));
        }

        workspace::reset(destination).await?;

        Ok(previous
            .map(|config| config.project_name)
            .unwrap_or_else(|| default_project_name(destination)))
    }

    // Prompts block the current task; nothing else runs while waiting on the operator.
    async fn configure(&mut self, default_name: &str) -> GeneratorResult<RunConfig> {
        let config = RunConfig::from_prompts(&mut self.prompter, default_name)?;

        let path = config.save(&self.options.destination_root).await?;
        info!(path = ?path, "Run configuration saved");

        Ok(config)
    }

    async fn install(&self) -> StageOutcome {
        if !self.options.install {
            return StageOutcome::Skipped;
        }

        info!("START Installing dependencies");
        let outcome = match self.toolchain.install(self.project_root()).await {
            Ok(status) if status.success() => StageOutcome::Succeeded,
            Ok(status) => StageOutcome::Failed(format!("installer exited with {status}")),
            Err(error) => StageOutcome::Failed(format!("installer could not be started: {error}")),
        };

        match &outcome {
            StageOutcome::Failed(reason) => warn!(%reason, "Dependency installation failed"),
            _ => info!("COMPLETED Installing dependencies"),
        }

        outcome
    }

    async fn launch(&self) -> StageOutcome {
        if !self.options.launch {
            return StageOutcome::Skipped;
        }

        match self.toolchain.launch_dev_server(self.project_root()).await {
            Ok(pid) => {
                info!(?pid, "Dev server started");
                StageOutcome::Succeeded
            }
            Err(error) => {
                warn!(%error, "Dev server could not be started");
                StageOutcome::Failed(error.to_string())
            }
        }
    }

    fn project_root(&self) -> &Path {
        &self.options.destination_root
    }
}
