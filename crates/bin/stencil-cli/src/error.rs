use stencil_generator::prelude::GeneratorError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Unable to determine the current directory: {0}")]
    CurrentDirectory(std::io::Error),

    #[error(transparent)]
    Generator(#[from] GeneratorError),
}
