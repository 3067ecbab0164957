use super::*;
use crate::config::CONFIG_FILE_NAME;
use crate::paths::Role;
use crate::prompt::ScriptedPrompter;
use crate::writer::{ENV_FILE_CONTENT, ENV_FILE_NAME, FILE_MANIFEST};
use async_trait::async_trait;
use std::collections::BTreeSet;
use std::process::ExitStatus;
use std::sync::{Arc, Mutex};
use tempfile::{Builder, TempDir};
use walkdir::WalkDir;

/// Toolchain that records calls and checks the project is complete when installing.
#[derive(Clone, Default)]
struct RecordingToolchain {
    calls: Arc<Mutex<Vec<String>>>,
    fail_install: bool,
}

impl RecordingToolchain {
    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[cfg(unix)]
fn exit_status(code: i32) -> ExitStatus {
    use std::os::unix::process::ExitStatusExt;
    ExitStatus::from_raw(code << 8)
}

#[cfg(windows)]
fn exit_status(code: i32) -> ExitStatus {
    use std::os::windows::process::ExitStatusExt;
    ExitStatus::from_raw(code as u32)
}

#[async_trait]
impl Toolchain for RecordingToolchain {
    async fn install(&self, project_root: &Path) -> std::io::Result<ExitStatus> {
        let env_ready = project_root.join(ENV_FILE_NAME).is_file();
        let manifest_ready = FILE_MANIFEST
            .iter()
            .all(|file| project_root.join(file).is_file());
        self.calls
            .lock()
            .unwrap()
            .push(format!("install env={env_ready} manifest={manifest_ready}"));

        Ok(exit_status(if self.fail_install { 1 } else { 0 }))
    }

    async fn launch_dev_server(&self, _project_root: &Path) -> std::io::Result<Option<u32>> {
        self.calls.lock().unwrap().push("launch".to_string());
        Ok(Some(4242))
    }
}

fn relative_files(root: &Path) -> BTreeSet<PathBuf> {
    WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.path().strip_prefix(root).unwrap().to_path_buf())
        .collect()
}

fn destination_with_stale_file() -> TempDir {
    let temp_dir = Builder::new().prefix("demo").tempdir().unwrap();
    std::fs::write(temp_dir.path().join("stale.txt"), "left over").unwrap();
    temp_dir
}

fn options(destination: &Path) -> GeneratorOptions {
    GeneratorOptions {
        assume_yes: true,
        ..GeneratorOptions::new(destination)
    }
}

#[test]
fn test_bundled_templates_are_complete() {
    let templates = TemplateSource::Bundled;
    let table = PathTable::plan(&templates.root(), Path::new("/unused"));

    for file in FILE_MANIFEST {
        let path = table.source.get(Role::Root).join(file);
        assert!(templates.is_file(&path), "missing template file {path:?}");
    }
    for role in [Role::VsCode, Role::Cypress, Role::Public, Role::Src, Role::Utilities] {
        let path = table.source.get(role);
        assert!(templates.is_dir(path), "missing template directory {path:?}");
    }
}

#[tokio::test]
async fn test_end_to_end_with_utilities() {
    let destination = destination_with_stale_file();
    let toolchain = RecordingToolchain::default();
    let prompter = ScriptedPrompter::new("Demo Project", "Y");

    let summary = Generator::new(options(destination.path()), prompter, toolchain.clone())
        .run()
        .await
        .unwrap();

    assert_eq!(
        summary.config,
        RunConfig {
            project_name: "Demo Project".to_string(),
            project_name_slug: Some("demo-project".to_string()),
            copy_utilities: true,
        }
    );
    assert_eq!(summary.install, StageOutcome::Succeeded);
    assert_eq!(summary.dev_server, StageOutcome::Succeeded);
    assert_eq!(
        toolchain.calls(),
        vec!["install env=true manifest=true".to_string(), "launch".to_string()]
    );

    let root = destination.path();
    assert!(!root.join("stale.txt").exists());
    for file in FILE_MANIFEST {
        assert!(root.join(file).is_file(), "missing {file}");
    }
    for dir in [".vscode", "cypress", "public", "src", "src/utilities"] {
        assert!(root.join(dir).is_dir(), "missing {dir}");
    }
    assert_eq!(
        std::fs::read_to_string(root.join(ENV_FILE_NAME)).unwrap(),
        ENV_FILE_CONTENT
    );

    let package = std::fs::read_to_string(root.join("package.json")).unwrap();
    assert!(package.contains("\"name\": \"demo-project\""));
    assert!(!package.contains("<%"));

    let saved = RunConfig::load(root).await.unwrap();
    assert_eq!(saved, Some(summary.config));

    let templates = TemplateSource::Bundled;
    let utilities = Path::new("utilities");
    let bundled = templates.list_files(utilities).unwrap();
    assert_eq!(
        relative_files(&root.join("src/utilities")),
        bundled.iter().cloned().collect::<BTreeSet<_>>()
    );
    for file in bundled {
        assert_eq!(
            std::fs::read(root.join("src/utilities").join(&file)).unwrap(),
            templates.read(&utilities.join(&file)).await.unwrap(),
            "utilities file {file:?} was altered"
        );
    }
}

#[tokio::test]
async fn test_end_to_end_without_utilities() {
    let destination = destination_with_stale_file();
    let prompter = ScriptedPrompter::new("Demo Project", "n");

    let summary = Generator::new(
        options(destination.path()),
        prompter,
        RecordingToolchain::default(),
    )
    .run()
    .await
    .unwrap();

    assert!(!summary.config.copy_utilities);
    assert!(destination.path().join("src").is_dir());
    assert!(!destination.path().join("src/utilities").exists());
}

#[tokio::test]
async fn test_install_failure_still_launches() {
    let destination = Builder::new().prefix("install_failure").tempdir().unwrap();
    let toolchain = RecordingToolchain {
        fail_install: true,
        ..Default::default()
    };

    let summary = Generator::new(
        options(destination.path()),
        ScriptedPrompter::new("Demo", "y"),
        toolchain.clone(),
    )
    .run()
    .await
    .unwrap();

    assert!(matches!(summary.install, StageOutcome::Failed(_)));
    assert_eq!(summary.dev_server, StageOutcome::Succeeded);
    assert!(destination.path().join("package.json").is_file());
}

#[tokio::test]
async fn test_skipped_finalization() {
    let destination = Builder::new().prefix("skipped").tempdir().unwrap();
    let toolchain = RecordingToolchain::default();
    let options = GeneratorOptions {
        install: false,
        launch: false,
        ..options(destination.path())
    };

    let summary = Generator::new(options, ScriptedPrompter::new("Demo", "y"), toolchain.clone())
        .run()
        .await
        .unwrap();

    assert_eq!(summary.install, StageOutcome::Skipped);
    assert_eq!(summary.dev_server, StageOutcome::Skipped);
    assert!(toolchain.calls().is_empty());
}

#[tokio::test]
async fn test_declined_reset_leaves_destination_untouched() {
    let destination = destination_with_stale_file();
    let mut prompter = ScriptedPrompter::new("Demo", "y");
    prompter.confirm = false;

    let result = Generator::new(
        GeneratorOptions::new(destination.path()),
        prompter,
        RecordingToolchain::default(),
    )
    .run()
    .await;

    assert!(matches!(result, Err(GeneratorError::ResetDeclined(_))));
    assert!(destination.path().join("stale.txt").exists());
    assert!(!destination.path().join("package.json").exists());
}

#[tokio::test]
async fn test_empty_destination_is_not_confirmed() {
    let destination = Builder::new().prefix("fresh").tempdir().unwrap();
    let toolchain = RecordingToolchain::default();
    let options = GeneratorOptions {
        install: false,
        launch: false,
        ..GeneratorOptions::new(destination.path())
    };
    let mut prompter = ScriptedPrompter::new("Demo", "n");
    prompter.confirm = false;

    let summary = Generator::new(options, prompter, toolchain).run().await;

    assert!(summary.is_ok());
}

#[tokio::test]
async fn test_previous_answers_seed_the_default_name() {
    let destination = Builder::new().prefix("rerun").tempdir().unwrap();
    RunConfig::new("Earlier Name", true)
        .save(destination.path())
        .await
        .unwrap();

    let mut generator = Generator::new(
        options(destination.path()),
        ScriptedPrompter::new("New Name", "n"),
        RecordingToolchain::default(),
    );

    let default_name = generator.initialize().await.unwrap();

    assert_eq!(default_name, "Earlier Name");
    assert!(!destination.path().join(CONFIG_FILE_NAME).exists());
}

#[tokio::test]
async fn test_default_name_falls_back_to_directory_name() {
    let parent = Builder::new().prefix("parent").tempdir().unwrap();
    let destination = parent.path().join("my-site");

    let mut generator = Generator::new(
        options(&destination),
        ScriptedPrompter::new("New Name", "n"),
        RecordingToolchain::default(),
    );

    assert_eq!(generator.initialize().await.unwrap(), "my-site");
    assert!(destination.is_dir());
}

#[tokio::test]
async fn test_destination_inside_templates_is_refused() {
    let templates = Builder::new().prefix("templates").tempdir().unwrap();
    std::fs::write(templates.path().join("keep.txt"), "keep").unwrap();
    let options = GeneratorOptions {
        templates: TemplateSource::Directory(templates.path().to_path_buf()),
        ..options(templates.path())
    };

    let result = Generator::new(
        options,
        ScriptedPrompter::new("Demo", "y"),
        RecordingToolchain::default(),
    )
    .run()
    .await;

    assert!(matches!(
        result,
        Err(GeneratorError::DestinationOverlapsTemplates { .. })
    ));
    assert!(templates.path().join("keep.txt").exists());
}

#[tokio::test]
async fn test_missing_template_aborts_before_install() {
    let templates = Builder::new().prefix("partial_templates").tempdir().unwrap();
    std::fs::write(templates.path().join("package.json"), "{}").unwrap();
    let destination = Builder::new().prefix("partial").tempdir().unwrap();
    let toolchain = RecordingToolchain::default();
    let options = GeneratorOptions {
        templates: TemplateSource::Directory(templates.path().to_path_buf()),
        ..options(destination.path())
    };

    let result = Generator::new(options, ScriptedPrompter::new("Demo", "y"), toolchain.clone())
        .run()
        .await;

    assert!(matches!(result, Err(GeneratorError::MissingTemplate(_))));
    assert!(toolchain.calls().is_empty());
}
