//! Document parsing
//!
//! Extraction of fenced Hopscotch blocks and the front-matter version gate.
//! Parsing is deliberately shallow: only zero-indentation `key: value` pairs
//! are captured, and field values stay raw strings.

pub mod block;
pub mod frontmatter;
pub mod scanner;

pub use block::{Block, BlockKind};
pub use frontmatter::{parse_version, DocumentVersion};
pub use scanner::extract_blocks;
