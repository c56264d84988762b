//! Profile Registry
//!
//! In-memory registry of schema profiles: the embedded built-in profile plus
//! any user profiles loaded from disk. Later loads override earlier ones, so
//! the load order built-in < user-global < explicit directory gives explicit
//! directories the highest priority.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};

use super::schema::{Profile, ProfileFile};

/// Name of the profile used when none is selected.
pub const DEFAULT_PROFILE: &str = "hopscotch";

#[derive(Debug, Clone, Default)]
pub struct ProfileRegistry {
    profiles: HashMap<String, Profile>,
    active_profile: Option<String>,
}

impl ProfileRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry preloaded with the embedded built-in profile.
    pub fn with_builtin() -> Result<Self> {
        let mut registry = Self::new();
        registry.add_embedded_hopscotch_profile()?;
        Ok(registry)
    }

    /// Add a profile, replacing any existing profile with the same name.
    pub fn add_profile(&mut self, profile: Profile) {
        self.profiles.insert(profile.name.clone(), profile);
    }

    /// Set the active profile. Returns false if the name is not registered.
    pub fn set_active_profile(&mut self, name: &str) -> bool {
        if self.profiles.contains_key(name) {
            self.active_profile = Some(name.to_string());
            true
        } else {
            false
        }
    }

    /// The currently active profile, falling back to the default name.
    pub fn active_profile(&self) -> Option<&Profile> {
        let name = self.active_profile.as_deref().unwrap_or(DEFAULT_PROFILE);
        self.profiles.get(name)
    }

    pub fn get_profile(&self, name: &str) -> Option<&Profile> {
        self.profiles.get(name)
    }

    pub fn list_profiles(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.profiles.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Load the built-in Hopscotch profile embedded in the binary.
    pub fn add_embedded_hopscotch_profile(&mut self) -> Result<()> {
        let embedded_toml = include_str!("../../resources/profiles/hopscotch.toml");
        let profile =
            parse_profile_content(embedded_toml).context("failed to load built-in profile")?;
        self.add_profile(profile);
        Ok(())
    }

    /// Load every `*.toml` profile in a directory.
    ///
    /// A missing directory is not an error. Individual files that fail to
    /// parse are logged and skipped so one broken profile cannot take down
    /// the rest. Returns the number of profiles loaded.
    pub fn load_from_directory(&mut self, dir: &Path) -> Result<usize> {
        if !dir.exists() {
            return Ok(0);
        }

        let entries = std::fs::read_dir(dir)
            .with_context(|| format!("failed to read profile directory: {}", dir.display()))?;

        let mut loaded = 0;
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|s| s.to_str()) != Some("toml") {
                continue;
            }
            match load_profile_file(&path) {
                Ok(profile) => {
                    log::debug!(
                        "loaded profile '{}' from {}",
                        profile.name,
                        path.display()
                    );
                    self.add_profile(profile);
                    loaded += 1;
                }
                Err(e) => {
                    log::warn!("skipping profile file {}: {:#}", path.display(), e);
                }
            }
        }
        Ok(loaded)
    }
}

/// Load and validate a single profile file.
pub fn load_profile_file(path: &Path) -> Result<Profile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read profile file: {}", path.display()))?;
    parse_profile_content(&content)
        .with_context(|| format!("failed to parse profile file: {}", path.display()))
}

/// Parse profile content from a TOML string.
pub fn parse_profile_content(content: &str) -> Result<Profile> {
    let file: ProfileFile = toml::from_str(content).context("malformed profile TOML")?;
    Profile::try_from(file)
}
