use crate::config::RunConfig;
use crate::error::{GeneratorError, GeneratorResult};
use crate::paths::{PathTable, Role};
use crate::source::TemplateSource;
use crate::template::{TemplateVars, render};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, info};

/// Top-level files copied with substitution from the template root.
pub const FILE_MANIFEST: [&str; 11] = [
    ".babelrc",
    ".env.example",
    ".eslintignore",
    ".eslintrc",
    ".gitignore",
    ".prettierrc.json",
    "cypress.json",
    "next.config.js",
    "nodemon.json",
    "package.json",
    "README.md",
];

/// Directories copied recursively with substitution.
pub const DIR_MANIFEST: [Role; 4] = [Role::VsCode, Role::Cypress, Role::Public, Role::Src];

pub const ENV_FILE_NAME: &str = ".env";
pub const ENV_FILE_CONTENT: &str = "API_URL=https://swapi.dev/api\nNODE_ENV=local";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyMode {
    Templated,
    Verbatim,
}

/// A single file to materialize in the destination tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyJob {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub mode: CopyMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteReport {
    pub files_copied: usize,
}

pub struct FileWriter<'a> {
    templates: &'a TemplateSource,
    table: &'a PathTable,
    config: &'a RunConfig,
}

impl<'a> FileWriter<'a> {
    pub fn new(templates: &'a TemplateSource, table: &'a PathTable, config: &'a RunConfig) -> Self {
        Self {
            templates,
            table,
            config,
        }
    }

    /// Lists every copy this run performs, without touching the destination.
    pub fn plan(&self) -> GeneratorResult<Vec<CopyJob>> {
        let mut jobs = Vec::new();

        self.plan_files(&mut jobs)?;

        for role in DIR_MANIFEST {
            self.plan_directory(role, CopyMode::Templated, &mut jobs)?;
        }

        if self.config.copy_utilities {
            self.plan_directory(Role::Utilities, CopyMode::Verbatim, &mut jobs)?;
        } else {
            debug!("Utilities directory skipped");
        }

        Ok(jobs)
    }

    fn plan_files(&self, jobs: &mut Vec<CopyJob>) -> GeneratorResult<()> {
        let source_root = self.table.source.get(Role::Root);
        let destination_root = self.table.destination.get(Role::Root);

        for file in FILE_MANIFEST {
            let source = source_root.join(file);
            if !self.templates.is_file(&source) {
                return Err(GeneratorError::MissingTemplate(source));
            }

            jobs.push(CopyJob {
                source,
                destination: destination_root.join(file),
                mode: CopyMode::Templated,
            });
        }

        Ok(())
    }

    fn plan_directory(
        &self,
        role: Role,
        mode: CopyMode,
        jobs: &mut Vec<CopyJob>,
    ) -> GeneratorResult<()> {
        let source_dir = self.table.source.get(role);
        let destination_dir = self.table.destination.get(role);

        if !self.templates.is_dir(source_dir) {
            return Err(GeneratorError::MissingTemplate(source_dir.to_path_buf()));
        }

        for relative in self.templates.list_files(source_dir)? {
            jobs.push(CopyJob {
                source: source_dir.join(&relative),
                destination: destination_dir.join(relative),
                mode,
            });
        }

        debug!(role = role.name(), "Directory planned");
        Ok(())
    }

    /// Performs every write of the run and returns once all of them finished.
    #[tracing::instrument(skip_all, fields(destination = ?self.table.destination.get(Role::Root)))]
    pub async fn write(&self) -> GeneratorResult<WriteReport> {
        info!("START Copy static files and directories");
        let jobs = self.plan()?;

        info!("START Writing files");
        write_env_file(self.table.destination.get(Role::Root)).await?;
        info!("COMPLETED Writing files");

        let files_copied = jobs.len();
        let templates = Arc::new(self.templates.clone());
        let vars = Arc::new(self.config.template_vars());
        let mut tasks = JoinSet::new();

        // Destinations are disjoint, so the copies can run side by side.
        for job in jobs {
            let templates = Arc::clone(&templates);
            let vars = Arc::clone(&vars);
            tasks.spawn(async move { copy_file(&templates, &job, &vars).await });
        }

        while let Some(result) = tasks.join_next().await {
            result??;
        }

        info!(files_copied, "COMPLETED Copy static files and directories");
        Ok(WriteReport { files_copied })
    }
}

pub async fn write_env_file(destination_root: &Path) -> GeneratorResult<PathBuf> {
    let path = destination_root.join(ENV_FILE_NAME);

    tokio::fs::write(&path, ENV_FILE_CONTENT)
        .await
        .map_err(|error| GeneratorError::io(&path, error))?;

    Ok(path)
}

async fn copy_file(
    templates: &TemplateSource,
    job: &CopyJob,
    vars: &TemplateVars,
) -> GeneratorResult<()> {
    let bytes = templates.read(&job.source).await?;

    let content = match job.mode {
        CopyMode::Verbatim => bytes,
        CopyMode::Templated => match String::from_utf8(bytes) {
            Ok(text) => render(&text, vars)
                .map_err(|source| GeneratorError::Template {
                    path: job.source.clone(),
                    source,
                })?
                .into_bytes(),
            Err(error) => {
                debug!(path = ?job.source, "Binary file copied without substitution");
                error.into_bytes()
            }
        },
    };

    if let Some(parent) = job.destination.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|error| GeneratorError::io(parent, error))?;
    }

    tokio::fs::write(&job.destination, content)
        .await
        .map_err(|error| GeneratorError::io(&job.destination, error))?;

    debug!(path = ?job.destination, mode = ?job.mode, "Written");
    Ok(())
}
