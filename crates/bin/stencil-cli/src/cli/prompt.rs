use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input};
use std::path::Path;
use stencil_generator::config::{parse_yes_no, validate_project_name};
use stencil_generator::prelude::{
    COPY_UTILITIES_PROMPT, GeneratorError, GeneratorResult, PROJECT_NAME_PROMPT, Prompter,
};

/// Asks the operator on the terminal, re-asking until answers are valid.
pub struct TerminalPrompter {
    theme: ColorfulTheme,
}

impl TerminalPrompter {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }

    fn ask(
        &self,
        prompt: &str,
        default: &str,
        validate: fn(&str) -> GeneratorResult<()>,
    ) -> GeneratorResult<String> {
        Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(default.to_string())
            .validate_with(|input: &String| validate(input).map_err(|error| error.to_string()))
            .interact_text()
            .map_err(prompt_error)
    }
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for TerminalPrompter {
    fn project_name(&mut self, default: &str) -> GeneratorResult<String> {
        self.ask(PROJECT_NAME_PROMPT, default, validate_project_name)
    }

    fn copy_utilities(&mut self, default: &str) -> GeneratorResult<String> {
        self.ask(COPY_UTILITIES_PROMPT, default, |input| {
            parse_yes_no(input).map(|_| ())
        })
    }

    fn confirm_reset(&mut self, destination: &Path) -> GeneratorResult<bool> {
        Confirm::with_theme(&self.theme)
            .with_prompt(format!(
                "Everything inside {} will be deleted. Continue?",
                destination.display()
            ))
            .default(false)
            .interact()
            .map_err(prompt_error)
    }
}

fn prompt_error(error: dialoguer::Error) -> GeneratorError {
    GeneratorError::Prompt(error.to_string())
}
