use crate::error::GeneratorResult;
use std::path::Path;

pub const PROJECT_NAME_PROMPT: &str = "Your project name";
pub const COPY_UTILITIES_PROMPT: &str =
    "Do you want to copy the utilities directory (a library of handy JS functions)? (Y/N)";

/// Source of the operator's answers.
///
/// The terminal implementation lives in the CLI; the generator only relies on
/// this interface so that runs can be scripted.
pub trait Prompter {
    /// Asks for the project name. `default` is offered when the answer is empty.
    fn project_name(&mut self, default: &str) -> GeneratorResult<String>;

    /// Asks whether the utilities directory should be copied, as a raw Y/N answer.
    fn copy_utilities(&mut self, default: &str) -> GeneratorResult<String>;

    /// Asks before a non-empty destination is wiped.
    fn confirm_reset(&mut self, destination: &Path) -> GeneratorResult<bool>;
}

#[cfg(test)]
pub(crate) use scripted::ScriptedPrompter;
