//! Configuration for a game shell.

use std::collections::BTreeMap;
use std::path::PathBuf;

use cs_dialogue::PlayerState;

/// Configuration for a game shell.
#[derive(Debug, Clone)]
pub struct ShellConfig {
    /// Directory holding the content JSON files.
    pub data_dir: PathBuf,
    /// Key used to obfuscate save data.
    pub save_key: String,
    /// Slot name saves are written to.
    pub save_slot: String,
    /// Resource amounts for a new player, on top of the defaults.
    pub starting_resources: BTreeMap<String, i64>,
    /// Save after every state change when a store is attached.
    pub autosave: bool,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            save_key: "corsair".to_string(),
            save_slot: "autosave".to_string(),
            starting_resources: BTreeMap::new(),
            autosave: true,
        }
    }
}

impl ShellConfig {
    /// Set the content directory.
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    /// Set the save obfuscation key.
    pub fn with_save_key(mut self, key: impl Into<String>) -> Self {
        self.save_key = key.into();
        self
    }

    /// Set the save slot name.
    pub fn with_save_slot(mut self, slot: impl Into<String>) -> Self {
        self.save_slot = slot.into();
        self
    }

    /// Give new players some of a resource (clamped at zero).
    pub fn with_resource(mut self, name: impl Into<String>, amount: i64) -> Self {
        self.starting_resources.insert(name.into(), amount.max(0));
        self
    }

    /// Enable or disable autosave.
    pub fn with_autosave(mut self, autosave: bool) -> Self {
        self.autosave = autosave;
        self
    }

    /// A fresh player with the configured starting resources.
    pub fn new_player(&self) -> PlayerState {
        self.starting_resources
            .iter()
            .fold(PlayerState::new(), |player, (name, amount)| {
                player.with_resource(name.clone(), *amount)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let cfg = ShellConfig::default();
        assert_eq!(cfg.data_dir, PathBuf::from("data"));
        assert_eq!(cfg.save_slot, "autosave");
        assert!(cfg.autosave);
        assert!(cfg.starting_resources.is_empty());
    }

    #[test]
    fn builder_methods() {
        let cfg = ShellConfig::default()
            .with_data_dir("content")
            .with_save_key("parrot")
            .with_save_slot("slot-one")
            .with_autosave(false);
        assert_eq!(cfg.data_dir, PathBuf::from("content"));
        assert_eq!(cfg.save_key, "parrot");
        assert_eq!(cfg.save_slot, "slot-one");
        assert!(!cfg.autosave);
    }

    #[test]
    fn starting_resources_are_clamped() {
        let player = ShellConfig::default()
            .with_resource("silver", 10)
            .with_resource("rum", -4)
            .new_player();
        assert_eq!(player.resource("silver"), 10);
        assert_eq!(player.resource("rum"), 0);
        assert_eq!(player.resource("gold"), 0);
    }
}
