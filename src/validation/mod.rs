//! Validation
//!
//! Schema-driven block validation and the dialogue structure checker.

pub mod dialogue;
pub mod engine;

pub use engine::{validate_block, validate_document, Diagnostic, Severity};

// Re-export common types
pub use engine::ValidationResult;
