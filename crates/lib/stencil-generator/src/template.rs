//! Placeholder substitution for template files.
//!
//! Templates use EJS-style tags so that they can carry JSX and CSS-in-JS
//! without escaping braces:
//!
//! - `<%= name %>` inserts a variable, HTML-escaped
//! - `<%- name %>` inserts a variable as is
//! - `<%%` produces a literal `<%`
//!
//! Any other tag is rejected.

use crate::error::TemplateError;

const OPEN: &str = "<%";
const CLOSE: &str = "%>";

/// Values available to templates.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TemplateVars {
    pub project_name: String,
    pub project_name_slug: String,
}

impl TemplateVars {
    fn lookup(&self, name: &str) -> Option<&str> {
        match name {
            "projectName" => Some(&self.project_name),
            "projectNameSlug" => Some(&self.project_name_slug),
            _ => None,
        }
    }
}

pub fn render(source: &str, vars: &TemplateVars) -> Result<String, TemplateError> {
    let mut output = String::with_capacity(source.len());
    let mut rest = source;
    let mut offset = 0;

    while let Some(start) = rest.find(OPEN) {
        output.push_str(&rest[..start]);
        let tag_offset = offset + start;
        let after_open = &rest[start + OPEN.len()..];

        if let Some(after_literal) = after_open.strip_prefix('%') {
            output.push_str(OPEN);
            offset = tag_offset + OPEN.len() + 1;
            rest = after_literal;
            continue;
        }

        let end = after_open
            .find(CLOSE)
            .ok_or(TemplateError::Unterminated(tag_offset))?;
        let tag = &after_open[..end];

        let (escape, name) = if let Some(name) = tag.strip_prefix('=') {
            (true, name.trim())
        } else if let Some(name) = tag.strip_prefix('-') {
            (false, name.trim())
        } else {
            return Err(TemplateError::UnsupportedTag {
                offset: tag_offset,
                tag: format!("{OPEN}{tag}{CLOSE}"),
            });
        };

        let value = vars
            .lookup(name)
            .ok_or_else(|| TemplateError::UnknownVariable(name.to_string()))?;

        if escape {
            push_escaped(&mut output, value);
        } else {
            output.push_str(value);
        }

        let consumed = OPEN.len() + end + CLOSE.len();
        offset = tag_offset + consumed;
        rest = &rest[start + consumed..];
    }

    output.push_str(rest);
    Ok(output)
}

fn push_escaped(output: &mut String, value: &str) {
    for character in value.chars() {
        match character {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            '"' => output.push_str("&#34;"),
            '\'' => output.push_str("&#39;"),
            other => output.push(other),
        }
    }
}
