//! Profile schema types
//!
//! Serde types for profile TOML files and the validated runtime profile.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use anyhow::{bail, Result};
use serde::Deserialize;

use crate::parser::block::BlockKind;
use crate::parser::frontmatter::DocumentVersion;

/// Root profile file structure (matches TOML)
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ProfileFile {
    pub profile: ProfileMeta,
    pub blocks: Vec<BlockDefFile>,
}

/// Profile metadata
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ProfileMeta {
    pub name: String,
    pub version: Option<String>,
    pub description: Option<String>,
}

/// Whether a block type participates in the containment hierarchy.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BlockRole {
    Node,
    Entity,
}

/// Block type definition as written in a profile file
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BlockDefFile {
    pub name: String,
    pub role: BlockRole,
    /// Acceptable parent type names; doubles as the hierarchy chain.
    #[serde(default)]
    pub parents: Vec<String>,
    #[serde(default)]
    pub fields: Vec<String>,
    #[serde(default)]
    pub required: Vec<String>,
    /// Enumerated value domain per constrained field.
    #[serde(default)]
    pub enums: BTreeMap<String, Vec<String>>,
    /// Reference fields whose value must carry one of these type prefixes.
    #[serde(default)]
    pub refs: BTreeMap<String, Vec<String>>,
    /// Minimum document version for this type (e.g. "0.3.0").
    pub requires: Option<String>,
    /// Run the dialogue structure checker on this type's content.
    #[serde(default)]
    pub dialogue: bool,
}

/// Runtime rule for one block type (optimized for lookups)
#[derive(Debug, Clone, PartialEq)]
pub struct BlockRule {
    pub kind: BlockKind,
    pub role: BlockRole,
    pub parents: Vec<String>,
    pub fields: BTreeSet<String>,
    pub required: Vec<String>,
    pub enums: BTreeMap<String, BTreeSet<String>>,
    pub refs: BTreeMap<String, Vec<String>>,
    pub requires: Option<DocumentVersion>,
    pub dialogue: bool,
}

impl BlockRule {
    pub fn is_node(&self) -> bool {
        self.role == BlockRole::Node
    }
}

/// Runtime profile (validated, keyed by block kind)
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub name: String,
    pub version: Option<String>,
    pub description: Option<String>,
    rules: HashMap<BlockKind, BlockRule>,
    /// Node kinds in declaration order; drives sibling-type order in the walk.
    node_order: Vec<BlockKind>,
    entity_order: Vec<BlockKind>,
}

impl Profile {
    pub fn rule(&self, kind: &BlockKind) -> Option<&BlockRule> {
        self.rules.get(kind)
    }

    pub fn is_node(&self, kind: &BlockKind) -> bool {
        self.rule(kind).is_some_and(BlockRule::is_node)
    }

    pub fn node_kinds(&self) -> &[BlockKind] {
        &self.node_order
    }

    pub fn entity_kinds(&self) -> &[BlockKind] {
        &self.entity_order
    }

    /// Node kinds with no declared parent; the walk starts from these.
    pub fn roots(&self) -> Vec<&BlockKind> {
        self.node_order
            .iter()
            .filter(|kind| {
                self.rules
                    .get(kind)
                    .is_some_and(|rule| rule.parents.is_empty())
            })
            .collect()
    }

    /// Expected child kinds of a node kind, in profile declaration order.
    ///
    /// Derived from the same `parents` table as the parent-prefix check, so
    /// the two cannot diverge.
    pub fn children_of(&self, kind: &BlockKind) -> Vec<&BlockKind> {
        let parent_name = kind.as_str();
        self.node_order
            .iter()
            .filter(|child| {
                self.rules
                    .get(child)
                    .is_some_and(|rule| rule.parents.iter().any(|p| p == parent_name))
            })
            .collect()
    }
}

impl TryFrom<ProfileFile> for Profile {
    type Error = anyhow::Error;

    fn try_from(file: ProfileFile) -> Result<Self> {
        let mut rules = HashMap::new();
        let mut node_order = Vec::new();
        let mut entity_order = Vec::new();

        for def in file.blocks {
            let kind = BlockKind::parse(&def.name);
            if kind.is_unknown() {
                bail!(
                    "profile '{}' defines unknown block type '{}'",
                    file.profile.name,
                    def.name
                );
            }
            if rules.contains_key(&kind) {
                bail!(
                    "profile '{}' defines block type '{}' twice",
                    file.profile.name,
                    def.name
                );
            }

            let requires = match &def.requires {
                Some(raw) => match DocumentVersion::parse_prefix(raw) {
                    Some(version) => Some(version),
                    None => bail!(
                        "profile '{}' block '{}' has malformed requires '{}'",
                        file.profile.name,
                        def.name,
                        raw
                    ),
                },
                None => None,
            };

            match def.role {
                BlockRole::Node => node_order.push(kind.clone()),
                BlockRole::Entity => entity_order.push(kind.clone()),
            }

            rules.insert(
                kind.clone(),
                BlockRule {
                    kind,
                    role: def.role,
                    parents: def.parents,
                    fields: def.fields.into_iter().collect(),
                    required: def.required,
                    enums: def
                        .enums
                        .into_iter()
                        .map(|(field, domain)| (field, domain.into_iter().collect()))
                        .collect(),
                    refs: def.refs,
                    requires,
                    dialogue: def.dialogue,
                },
            );
        }

        Ok(Self {
            name: file.profile.name,
            version: file.profile.version,
            description: file.profile.description,
            rules,
            node_order,
            entity_order,
        })
    }
}
