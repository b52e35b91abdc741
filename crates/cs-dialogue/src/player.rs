//! Player state management.

use std::collections::BTreeMap;

use cs_core::{Item, Value};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::notification::Notification;

/// Resources every new player starts with.
pub const DEFAULT_RESOURCES: [&str; 3] = ["gold", "silver", "rum"];

/// Everything the engine reads and the host mutates.
///
/// The dialogue engine only reads this; changes arrive as [`Notification`]s
/// applied with [`PlayerState::apply`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerState {
    /// Named stats (strength, reputation, ...).
    #[serde(default)]
    pub stats: BTreeMap<String, Value>,
    /// Story flags.
    #[serde(default)]
    pub game_state: BTreeMap<String, Value>,
    /// Counted resources. Never negative.
    #[serde(default)]
    pub resources: BTreeMap<String, i64>,
    /// Carried items, unique by id.
    #[serde(default)]
    pub inventory: Vec<Item>,
    /// Quest id to status.
    #[serde(default)]
    pub quests: BTreeMap<String, String>,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            stats: BTreeMap::new(),
            game_state: BTreeMap::new(),
            resources: DEFAULT_RESOURCES
                .iter()
                .map(|name| (name.to_string(), 0))
                .collect(),
            inventory: Vec::new(),
            quests: BTreeMap::new(),
        }
    }
}

impl PlayerState {
    /// Create a fresh player.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a stat.
    pub fn with_stat(mut self, stat: impl Into<String>, value: impl Into<Value>) -> Self {
        self.stats.insert(stat.into(), value.into());
        self
    }

    /// Set a game-state flag.
    pub fn with_flag(mut self, variable: impl Into<String>, value: impl Into<Value>) -> Self {
        self.game_state.insert(variable.into(), value.into());
        self
    }

    /// Set a resource amount.
    pub fn with_resource(mut self, name: impl Into<String>, amount: i64) -> Self {
        self.resources.insert(name.into(), amount.max(0));
        self
    }

    /// Add an item.
    pub fn with_item(mut self, item: Item) -> Self {
        self.add_item(item);
        self
    }

    /// Record a quest status.
    pub fn with_quest(mut self, quest_id: impl Into<String>, status: impl Into<String>) -> Self {
        self.quests.insert(quest_id.into(), status.into());
        self
    }

    /// A stat's value.
    pub fn stat(&self, stat: &str) -> Option<&Value> {
        self.stats.get(stat)
    }

    /// A flag's value.
    pub fn flag(&self, variable: &str) -> Option<&Value> {
        self.game_state.get(variable)
    }

    /// A resource amount; unknown resources count as zero.
    pub fn resource(&self, name: &str) -> i64 {
        self.resources.get(name).copied().unwrap_or(0)
    }

    /// A quest's status.
    pub fn quest(&self, quest_id: &str) -> Option<&str> {
        self.quests.get(quest_id).map(String::as_str)
    }

    /// Whether an item with this id is carried.
    pub fn has_item(&self, item_id: &str) -> bool {
        self.inventory.iter().any(|item| item.id == *item_id)
    }

    /// Add an item unless one with the same id is already carried.
    pub fn add_item(&mut self, item: Item) -> bool {
        if self.has_item(item.id.as_str()) {
            return false;
        }
        self.inventory.push(item);
        true
    }

    /// Remove an item by id.
    pub fn remove_item(&mut self, item_id: &str) -> Option<Item> {
        let pos = self.inventory.iter().position(|item| item.id == *item_id)?;
        Some(self.inventory.remove(pos))
    }

    /// Apply one notification.
    pub fn apply(&mut self, notification: &Notification) {
        match notification {
            Notification::UpdatePlayerStat {
                stat,
                change,
                value,
            } => self.update_stat(stat, change.as_ref(), value.as_ref()),
            Notification::SetGameState { variable, value } => {
                self.game_state.insert(variable.clone(), value.clone());
            }
            Notification::UpdateResources(deltas) => {
                for (name, delta) in deltas {
                    let current = self.resources.entry(name.clone()).or_insert(0);
                    *current = current.saturating_add(*delta).max(0);
                }
            }
            Notification::AddToInventory { item } => {
                if !self.add_item(item.clone()) {
                    debug!(item = %item.id, "item already carried");
                }
            }
            Notification::RemoveFromInventory { item_id } => {
                if self.remove_item(item_id.as_str()).is_none() {
                    debug!(item = %item_id, "item not carried; nothing removed");
                }
            }
            Notification::GameEvent { .. }
            | Notification::TriggerPuzzle(_)
            | Notification::Message(_) => {}
        }
    }

    /// Apply notifications in order.
    pub fn apply_all<'a>(&mut self, notifications: impl IntoIterator<Item = &'a Notification>) {
        for notification in notifications {
            self.apply(notification);
        }
    }

    fn update_stat(&mut self, stat: &str, change: Option<&Value>, value: Option<&Value>) {
        if let Some(value) = value {
            self.stats.insert(stat.to_string(), value.clone());
            return;
        }
        let Some(change) = change else {
            warn!(stat, "stat update has neither change nor value");
            return;
        };
        let current = self.stats.get(stat).cloned().unwrap_or(Value::Integer(0));
        match current.add(change) {
            Some(updated) => {
                self.stats.insert(stat.to_string(), updated);
            }
            None => warn!(stat, %current, %change, "cannot add a non-numeric stat change"),
        }
    }
}
