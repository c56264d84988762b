//! Validation Engine
//!
//! Core validation logic separated from parsing and presentation concerns.
//! All rule data comes from the active schema profile.

use std::collections::HashSet;

use serde::Serialize;

use crate::parser::block::{Block, BlockKind};
use crate::parser::frontmatter::DocumentVersion;
use crate::parser::{extract_blocks, parse_version};
use crate::profile::Profile;
use crate::report::{self, Report};
use crate::validation::dialogue;

/// Severity of a diagnostic message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// A diagnostic message for a validation issue
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    /// 1-based line of the block's opening fence (or of the offending line
    /// for extraction diagnostics).
    pub line: usize,
    pub message: String,
    pub severity: Severity,
}

/// Ordered diagnostics accumulated over a document
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ValidationResult {
    pub diagnostics: Vec<Diagnostic>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_error(&mut self, line: usize, message: String) {
        self.diagnostics.push(Diagnostic {
            line,
            message,
            severity: Severity::Error,
        });
    }

    pub fn add_warning(&mut self, line: usize, message: String) {
        self.diagnostics.push(Diagnostic {
            line,
            message,
            severity: Severity::Warning,
        });
    }

    pub fn is_valid(&self) -> bool {
        !self
            .diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }
}

/// Validate an entire document against a schema profile.
///
/// Runs the version gate, block extraction, duplicate-id detection, and
/// per-block validation, then assembles the structured report.
pub fn validate_document(content: &str, profile: &Profile) -> Report {
    let version = parse_version(content);
    let (blocks, extraction_diagnostics) = extract_blocks(content);

    let mut result = ValidationResult {
        diagnostics: extraction_diagnostics,
    };

    let mut seen_ids: HashSet<&str> = HashSet::new();
    for block in &blocks {
        if !block.id.is_empty() && !seen_ids.insert(block.id.as_str()) {
            result.add_error(block.start_line, format!("Duplicate id '{}'.", block.id));
        }
        validate_block(block, version, profile, &mut result);
    }

    report::assemble(blocks, result, profile)
}

/// Validate a single block using the schema profile.
pub fn validate_block(
    block: &Block,
    version: Option<DocumentVersion>,
    profile: &Profile,
    result: &mut ValidationResult,
) {
    let line = block.start_line;

    if let BlockKind::Unknown(text) = &block.kind {
        result.add_error(line, format!("Unknown block type '{}'.", text));
        return;
    }

    let rule = profile.rule(&block.kind);

    // Version gate: gated types error when the document declares no version
    // or one below the threshold.
    if let Some(required_version) = rule.and_then(|r| r.requires) {
        let satisfied = version.is_some_and(|v| v >= required_version);
        if !satisfied {
            result.add_error(
                line,
                format!(
                    "{} blocks require hopscotchVersion >= {}.",
                    block.kind, required_version
                ),
            );
        }
    }

    if block.id.is_empty() {
        result.add_error(line, "Block missing id.".to_string());
    }

    let Some(rule) = rule else {
        result.add_warning(
            line,
            format!("No schema field list for type '{}'.", block.kind),
        );
        return;
    };

    // Unknown-field warnings come out sorted because keys is an ordered set.
    for key in &block.keys {
        if !rule.fields.contains(key) {
            result.add_warning(
                line,
                format!(
                    "Field '{}' is not defined in the schema for type '{}'.",
                    key, block.kind
                ),
            );
        }
    }

    for field in &rule.required {
        if !block.keys.contains(field) {
            result.add_error(
                line,
                format!("{} missing required field '{}'.", block.kind, field),
            );
        }
    }

    for (field, domain) in &rule.enums {
        // Absent keys are already covered by the required list.
        if !block.keys.contains(field) {
            continue;
        }
        let value = block.value(field);
        if value.is_empty() {
            result.add_error(
                line,
                format!("{} missing required field '{}'.", block.kind, field),
            );
        } else if !domain.contains(value) {
            result.add_error(
                line,
                format!("{} {} '{}' is not valid.", block.kind, field, value),
            );
        }
    }

    // Parent-prefix check by string convention, independent of whether the
    // referenced id exists; dangling parents surface later as orphans.
    if rule.is_node() && !rule.parents.is_empty() {
        let parent = block.value("parent");
        if !parent.is_empty() && !has_type_prefix(parent, &rule.parents) {
            let message = if let [expected] = rule.parents.as_slice() {
                format!(
                    "{} parent '{}' must start with {}.",
                    block.kind, parent, expected
                )
            } else {
                format!(
                    "{} parent '{}' must be a {} id.",
                    block.kind,
                    parent,
                    prefix_alternatives(&rule.parents)
                )
            };
            result.add_error(line, message);
        }
    }

    for (field, prefixes) in &rule.refs {
        let value = block.value(field);
        if !value.is_empty() && !has_type_prefix(value, prefixes) {
            result.add_error(
                line,
                format!(
                    "{} {} '{}' must be a {} id.",
                    block.kind,
                    field,
                    value,
                    prefix_alternatives(prefixes)
                ),
            );
        }
    }

    if rule.dialogue {
        dialogue::check_dialogue(block, result);
    }
}

/// Does `value` start with `<type>.` for any of the given type names?
fn has_type_prefix(value: &str, types: &[String]) -> bool {
    types
        .iter()
        .any(|t| value.starts_with(t.as_str()) && value[t.len()..].starts_with('.'))
}

/// `["destination", "location"]` -> `destination.* or location.*`
fn prefix_alternatives(types: &[String]) -> String {
    types
        .iter()
        .map(|t| format!("{t}.*"))
        .collect::<Vec<_>>()
        .join(" or ")
}
