use async_trait::async_trait;
use std::path::Path;
use std::process::{ExitStatus, Stdio};
use tokio::process::Command;
use tracing::info;

pub const DEFAULT_PACKAGE_MANAGER: &str = "npm";

/// External tooling the generator hands the project over to once it is written.
#[async_trait]
pub trait Toolchain: Send + Sync {
    /// Installs the project's dependencies and waits for the installer to exit.
    async fn install(&self, project_root: &Path) -> std::io::Result<ExitStatus>;

    /// Starts the development server and returns its process id.
    ///
    /// The server is left running after the generator exits.
    async fn launch_dev_server(&self, project_root: &Path) -> std::io::Result<Option<u32>>;
}

/// Runs `<program> install` and `<program> run dev`.
#[derive(Debug, Clone)]
pub struct PackageManager {
    program: String,
}

impl PackageManager {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn command(&self, project_root: &Path) -> Command {
        let mut command = Command::new(&self.program);
        command
            .current_dir(project_root)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        command
    }
}

impl Default for PackageManager {
    fn default() -> Self {
        Self::new(DEFAULT_PACKAGE_MANAGER)
    }
}

#[async_trait]
impl Toolchain for PackageManager {
    async fn install(&self, project_root: &Path) -> std::io::Result<ExitStatus> {
        info!(program = %self.program, "Running install");
        self.command(project_root).arg("install").status().await
    }

    async fn launch_dev_server(&self, project_root: &Path) -> std::io::Result<Option<u32>> {
        info!(program = %self.program, "Spawning dev server");
        let child = self
            .command(project_root)
            .args(["run", "dev"])
            .kill_on_drop(false)
            .spawn()?;

        Ok(child.id())
    }
}
