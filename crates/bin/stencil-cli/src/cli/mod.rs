use crate::error::CliError;
use clap::Parser;
use std::path::PathBuf;
use stencil_generator::prelude::{DEFAULT_PACKAGE_MANAGER, GeneratorOptions, TemplateSource};

pub mod prompt;

/// Scaffolds a Next.js project into the destination directory.
///
/// Everything inside the destination is deleted before the templates are written.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Directory the project is generated into. Defaults to the current directory.
    #[arg(short, long, env = "STENCIL_DESTINATION")]
    pub destination: Option<PathBuf>,

    /// Directory holding the project templates. Defaults to the templates built into stencil.
    #[arg(short, long, env = "STENCIL_TEMPLATES")]
    pub templates: Option<PathBuf>,

    /// Program used to install dependencies and start the dev server.
    #[arg(long, env = "STENCIL_PACKAGE_MANAGER", default_value = DEFAULT_PACKAGE_MANAGER)]
    pub package_manager: String,

    /// Wipe a non-empty destination without asking.
    #[arg(short, long)]
    pub yes: bool,

    /// Do not install dependencies.
    #[arg(long)]
    pub skip_install: bool,

    /// Do not start the dev server once done.
    #[arg(long)]
    pub no_launch: bool,
}

impl Cli {
    pub fn generator_options(&self) -> Result<GeneratorOptions, CliError> {
        let destination_root = match &self.destination {
            Some(destination) => destination.clone(),
            None => std::env::current_dir().map_err(CliError::CurrentDirectory)?,
        };

        Ok(GeneratorOptions {
            templates: self
                .templates
                .clone()
                .map(TemplateSource::Directory)
                .unwrap_or(TemplateSource::Bundled),
            destination_root,
            assume_yes: self.yes,
            install: !self.skip_install,
            launch: !self.no_launch,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments_use_defaults() {
        let cli = Cli::try_parse_from(["stencil"]).unwrap();
        let options = cli.generator_options().unwrap();

        assert_eq!(options.destination_root, std::env::current_dir().unwrap());
        assert_eq!(options.templates, TemplateSource::Bundled);
        assert!(!options.assume_yes);
        assert!(options.install);
        assert!(options.launch);
        assert_eq!(cli.package_manager, "npm");
    }

    #[test]
    fn test_flags_map_onto_options() {
        let cli = Cli::try_parse_from([
            "stencil",
            "--destination",
            "/tmp/site",
            "--templates",
            "/opt/templates",
            "--package-manager",
            "pnpm",
            "--yes",
            "--skip-install",
            "--no-launch",
        ])
        .unwrap();
        let options = cli.generator_options().unwrap();

        assert_eq!(options.destination_root, PathBuf::from("/tmp/site"));
        assert_eq!(
            options.templates,
            TemplateSource::Directory(PathBuf::from("/opt/templates"))
        );
        assert!(options.assume_yes);
        assert!(!options.install);
        assert!(!options.launch);
        assert_eq!(cli.package_manager, "pnpm");
    }
}
