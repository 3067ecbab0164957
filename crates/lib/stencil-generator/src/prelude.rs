pub use crate::config::RunConfig;
pub use crate::error::*;
pub use crate::pipeline::{Generator, GeneratorOptions, RunSummary, StageOutcome};
pub use crate::prompt::{COPY_UTILITIES_PROMPT, PROJECT_NAME_PROMPT, Prompter};
pub use crate::source::TemplateSource;
pub use crate::toolchain::{DEFAULT_PACKAGE_MANAGER, PackageManager, Toolchain};
