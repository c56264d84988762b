//! Report assembly
//!
//! Aggregates diagnostics, per-entity counts, the hierarchy walk, and the
//! orphan list into the structured report handed to the presentation layer.

pub mod hierarchy;

use std::collections::BTreeMap;

use crate::parser::block::Block;
use crate::profile::Profile;
use crate::validation::engine::{Diagnostic, Severity, ValidationResult};

pub use hierarchy::{HierarchyRow, HierarchyView};

/// The structured outcome of validating one document.
#[derive(Debug, Clone)]
pub struct Report {
    /// Block and extraction errors, in extraction order.
    pub errors: Vec<Diagnostic>,
    /// Schema warnings, in extraction order. Never affect status.
    pub warnings: Vec<Diagnostic>,
    /// Per-entity-type counts, zero-initialized for every known entity type.
    pub counts: BTreeMap<String, usize>,
    /// Rendered containment tree rows.
    pub hierarchy: Vec<HierarchyRow>,
    /// Node blocks never reached by the hierarchy walk.
    pub orphans: Vec<Block>,
}

impl Report {
    /// Overall status: failure iff any error was recorded.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn orphan_labels(&self) -> Vec<String> {
        self.orphans.iter().map(Block::label).collect()
    }
}

/// Assemble the final report from the extracted blocks and diagnostics.
pub fn assemble(blocks: Vec<Block>, result: ValidationResult, profile: &Profile) -> Report {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    for diagnostic in result.diagnostics {
        match diagnostic.severity {
            Severity::Error => errors.push(diagnostic),
            Severity::Warning => warnings.push(diagnostic),
        }
    }

    let mut counts: BTreeMap<String, usize> = profile
        .entity_kinds()
        .iter()
        .map(|kind| (kind.as_str().to_string(), 0))
        .collect();
    for block in &blocks {
        if let Some(count) = counts.get_mut(block.kind.as_str()) {
            *count += 1;
        }
    }

    let view = hierarchy::build(&blocks, profile);

    Report {
        errors,
        warnings,
        counts,
        hierarchy: view.rows,
        orphans: view.orphans,
    }
}
