use regex::Regex;
use std::sync::LazyLock;

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Derives a URL-safe slug from a human readable project name.
///
/// Every run of whitespace collapses into a single `-` and the result is
/// lower-cased. Absent or empty names have no slug.
pub fn slugify(name: Option<&str>) -> Option<String> {
    let name = name.filter(|name| !name.is_empty())?;

    Some(WHITESPACE_RUN.replace_all(name, "-").to_lowercase())
}
