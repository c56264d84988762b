//! Schema Profiles
//!
//! The schema registry as externally supplied configuration: block type
//! rules live in TOML profiles, with one profile embedded in the binary.

pub mod registry;
pub mod schema;

pub use registry::{ProfileRegistry, DEFAULT_PROFILE};
pub use schema::{BlockRole, BlockRule, Profile, ProfileFile};
