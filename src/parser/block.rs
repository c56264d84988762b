//! Block data types
//!
//! Clean, minimal types representing extracted Hopscotch blocks.
//! No validation logic - pure data representation.

use std::collections::{BTreeSet, HashMap};
use std::fmt;

/// The closed set of block type tags.
///
/// Node kinds form the containment hierarchy; entity kinds attach to nodes
/// by scope/location references. Anything else scanned out of a document
/// lands in `Unknown` with the original text kept for error reporting.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BlockKind {
    World,
    Continent,
    Region,
    Destination,
    Location,
    Area,
    Scene,
    Link,
    Encounter,
    Check,
    Hazard,
    Secret,
    Loot,
    Creature,
    Clock,
    Travel,
    Milestone,
    Map,
    Npc,
    Unknown(String),
}

impl BlockKind {
    /// Map a raw info-string type token onto a kind.
    pub fn parse(token: &str) -> Self {
        match token {
            "world" => Self::World,
            "continent" => Self::Continent,
            "region" => Self::Region,
            "destination" => Self::Destination,
            "location" => Self::Location,
            "area" => Self::Area,
            "scene" => Self::Scene,
            "link" => Self::Link,
            "encounter" => Self::Encounter,
            "check" => Self::Check,
            "hazard" => Self::Hazard,
            "secret" => Self::Secret,
            "loot" => Self::Loot,
            "creature" => Self::Creature,
            "clock" => Self::Clock,
            "travel" => Self::Travel,
            "milestone" => Self::Milestone,
            "map" => Self::Map,
            "npc" => Self::Npc,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// The canonical type tag as it appears in documents.
    pub fn as_str(&self) -> &str {
        match self {
            Self::World => "world",
            Self::Continent => "continent",
            Self::Region => "region",
            Self::Destination => "destination",
            Self::Location => "location",
            Self::Area => "area",
            Self::Scene => "scene",
            Self::Link => "link",
            Self::Encounter => "encounter",
            Self::Check => "check",
            Self::Hazard => "hazard",
            Self::Secret => "secret",
            Self::Loot => "loot",
            Self::Creature => "creature",
            Self::Clock => "clock",
            Self::Travel => "travel",
            Self::Milestone => "milestone",
            Self::Map => "map",
            Self::Npc => "npc",
            Self::Unknown(text) => text,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown(_))
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fenced, typed, identified region of a document.
///
/// Immutable once constructed by the scanner. `keys`/`values` hold only the
/// shallow zero-indentation fields; nested content is visible only through
/// `content` (and is walked solely by the dialogue checker).
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub kind: BlockKind,
    /// Declared id; empty when the info string had no `id=` token.
    pub id: String,
    /// Field names present at zero indentation.
    pub keys: BTreeSet<String>,
    /// Field name -> raw value, quotes stripped, last occurrence wins.
    pub values: HashMap<String, String>,
    /// Verbatim content lines between the fences.
    pub content: Vec<String>,
    /// 1-based line number of the opening fence.
    pub start_line: usize,
}

impl Block {
    /// Field value lookup, defaulting to the empty string like absent keys.
    pub fn value(&self, key: &str) -> &str {
        self.values.get(key).map(String::as_str).unwrap_or("")
    }

    /// Summary label: `type: id (name)`, name part omitted when absent.
    pub fn label(&self) -> String {
        let name = self.value("name");
        if name.is_empty() {
            format!("{}: {}", self.kind, self.id)
        } else {
            format!("{}: {} ({})", self.kind, self.id, name)
        }
    }
}
