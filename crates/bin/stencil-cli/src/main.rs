use crate::cli::Cli;
use crate::cli::prompt::TerminalPrompter;
use crate::error::CliError;
use clap::Parser;
use stencil_generator::prelude::{Generator, GeneratorError, PackageManager, StageOutcome};
use tracing::info;
use tracing_subscriber::Layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod cli;
mod error;

const GREETING: &str = "\
************************************************************
*                                                          *
*  This will set up all the basic files and tools          *
*  you will need to build a UI.                            *
*                                                          *
*  Please wait while we clean your working directory...    *
*                                                          *
************************************************************
";

const FAREWELL: &str = "
********************************
*                              *
*  ALL DONE!                   *
*  Starting application        *
*                              *
********************************
";

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(env_filter);
    tracing_subscriber::registry().with(fmt_layer).init();

    let cli = Cli::parse();

    match run(&cli).await {
        Ok(()) => Ok(()),
        Err(error) => {
            report(&error);
            Err(error.into())
        }
    }
}

async fn run(cli: &Cli) -> Result<(), CliError> {
    let options = cli.generator_options()?;
    let toolchain = PackageManager::new(&cli.package_manager);

    println!("{GREETING}");
    let summary = Generator::new(options, TerminalPrompter::new(), toolchain)
        .run()
        .await?;

    info!(
        project = %summary.config.project_name,
        files_copied = summary.written.files_copied,
        install = ?summary.install,
        dev_server = ?summary.dev_server,
        "Project generated"
    );

    if let StageOutcome::Failed(reason) = &summary.install {
        eprintln!("😢 Dependencies were not installed: {reason}");
    }

    match &summary.dev_server {
        StageOutcome::Succeeded => println!("{FAREWELL}"),
        StageOutcome::Failed(reason) => eprintln!("😢 Dev server could not be started: {reason}"),
        StageOutcome::Skipped => println!("🚀 {} is ready!", summary.config.project_name),
    }

    Ok(())
}

fn report(error: &CliError) {
    match error {
        CliError::CurrentDirectory(_) => {
            eprintln!("😭 Unable to read the current directory");
        }
        CliError::Generator(GeneratorError::ResetDeclined(path)) => {
            eprintln!("🤔 Nothing was changed in {}", path.display());
        }
        CliError::Generator(GeneratorError::DestinationOverlapsTemplates { destination, .. }) => {
            eprintln!(
                "😢 Refusing to generate into {}: it overlaps the templates",
                destination.display()
            );
        }
        CliError::Generator(GeneratorError::MissingTemplate(path)) => {
            eprintln!("😢 Template file is missing: {}", path.display());
        }
        CliError::Generator(GeneratorError::Prompt(_)) => {
            eprintln!("😢 Answers could not be read, is this an interactive terminal?");
        }
        CliError::Generator(_) => {
            eprintln!("😭 Project generation failed");
        }
    }
}
