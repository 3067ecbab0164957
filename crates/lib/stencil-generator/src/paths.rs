use std::path::{Path, PathBuf};

/// Logical directories of the template tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Root,
    VsCode,
    Cypress,
    Public,
    Src,
    Utilities,
}

impl Role {
    pub const ALL: [Role; 6] = [
        Role::Root,
        Role::VsCode,
        Role::Cypress,
        Role::Public,
        Role::Src,
        Role::Utilities,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Role::Root => "root",
            Role::VsCode => ".vscode",
            Role::Cypress => "cypress",
            Role::Public => "public",
            Role::Src => "src",
            Role::Utilities => "utilities",
        }
    }

    fn source_segments(self) -> &'static [&'static str] {
        match self {
            Role::Root => &[],
            Role::VsCode => &[".vscode"],
            Role::Cypress => &["cypress"],
            Role::Public => &["public"],
            Role::Src => &["src"],
            Role::Utilities => &["utilities"],
        }
    }

    // Utilities ship at the template root but land inside `src`.
    fn destination_segments(self) -> &'static [&'static str] {
        match self {
            Role::Utilities => &["src", "utilities"],
            other => other.source_segments(),
        }
    }
}

/// Absolute directory of every role on one side of the copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleTree {
    root: PathBuf,
    vscode: PathBuf,
    cypress: PathBuf,
    public: PathBuf,
    src: PathBuf,
    utilities: PathBuf,
}

impl RoleTree {
    fn build(base: &Path, segments: fn(Role) -> &'static [&'static str]) -> Self {
        let resolve = |role: Role| {
            segments(role)
                .iter()
                .fold(base.to_path_buf(), |path, segment| path.join(segment))
        };

        Self {
            root: resolve(Role::Root),
            vscode: resolve(Role::VsCode),
            cypress: resolve(Role::Cypress),
            public: resolve(Role::Public),
            src: resolve(Role::Src),
            utilities: resolve(Role::Utilities),
        }
    }

    pub fn get(&self, role: Role) -> &Path {
        match role {
            Role::Root => &self.root,
            Role::VsCode => &self.vscode,
            Role::Cypress => &self.cypress,
            Role::Public => &self.public,
            Role::Src => &self.src,
            Role::Utilities => &self.utilities,
        }
    }
}

/// Source and destination directories for every role.
///
/// Built purely from the two base paths, so it can be recomputed at will.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTable {
    pub source: RoleTree,
    pub destination: RoleTree,
}

impl PathTable {
    pub fn plan(template_root: &Path, destination_root: &Path) -> Self {
        Self {
            source: RoleTree::build(template_root, Role::source_segments),
            destination: RoleTree::build(destination_root, Role::destination_segments),
        }
    }
}
