//! Effect vocabularies.
//!
//! Dialogue choices and puzzle outcomes were authored with two different tag
//! sets. Both end up as [`Effect`]; puzzle outcomes are parsed as
//! [`OutcomeEffect`] and normalized with `From`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::id::{ItemId, PuzzleId};
use crate::item::Item;
use crate::value::Value;

/// A side effect attached to a dialogue choice or a puzzle outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Effect {
    /// Change a player stat by a delta or set it outright.
    #[serde(rename = "updatePlayerStat")]
    UpdatePlayerStat {
        /// Stat name.
        stat: String,
        /// Relative change.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        change: Option<Value>,
        /// Absolute value.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<Value>,
    },
    /// Set a game-state flag.
    #[serde(rename = "setGameState")]
    SetGameState {
        /// Flag name.
        variable: String,
        /// New value.
        value: Value,
    },
    /// Fire a named game event for the host.
    #[serde(rename = "gameEvent")]
    GameEvent {
        /// Event name.
        #[serde(rename = "eventName")]
        event_name: String,
        /// Free-form payload.
        #[serde(default)]
        detail: serde_json::Value,
    },
    /// Suspend the conversation and open a puzzle.
    #[serde(rename = "TRIGGER_PUZZLE")]
    TriggerPuzzle {
        /// Puzzle to open. Content without one is skipped at runtime.
        #[serde(rename = "puzzleId", default, skip_serializing_if = "Option::is_none")]
        puzzle_id: Option<PuzzleId>,
    },
    /// Give the player an item.
    #[serde(rename = "addItem")]
    AddItem {
        /// The item granted.
        item: Item,
    },
    /// Take an item from the player.
    #[serde(rename = "removeItem")]
    RemoveItem {
        /// Item to remove.
        #[serde(rename = "itemId")]
        item_id: ItemId,
    },
    /// Adjust resource counters (gold, silver, rum, ...).
    #[serde(rename = "updateResources")]
    UpdateResources {
        /// Resource name to delta.
        resources: BTreeMap<String, i64>,
    },
    /// An effect type this engine does not know. Skipped.
    #[serde(other)]
    Unknown,
}

/// Puzzle-outcome effect, as authored in `puzzles.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OutcomeEffect {
    /// Set a game-state flag.
    SetGameState {
        /// Flag name.
        variable: String,
        /// New value.
        value: Value,
    },
    /// Change a stat. A bare `change` is a resource reward.
    UpdatePlayerStat {
        /// Stat or resource name.
        stat: String,
        /// Relative change.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        change: Option<Value>,
        /// Absolute value.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<Value>,
    },
    /// Give the player an item.
    AddItem {
        /// The item granted.
        item: Item,
    },
    /// Take an item from the player.
    RemoveItem {
        /// Item to remove.
        #[serde(rename = "itemId")]
        item_id: ItemId,
    },
    /// Unknown outcome effect. Skipped.
    #[serde(other)]
    Unknown,
}

impl From<OutcomeEffect> for Effect {
    fn from(effect: OutcomeEffect) -> Self {
        match effect {
            OutcomeEffect::SetGameState { variable, value } => {
                Effect::SetGameState { variable, value }
            }
            OutcomeEffect::UpdatePlayerStat {
                stat,
                change: Some(Value::Integer(delta)),
                value: None,
            } => Effect::UpdateResources {
                resources: BTreeMap::from([(stat, delta)]),
            },
            OutcomeEffect::UpdatePlayerStat {
                stat,
                change,
                value,
            } => Effect::UpdatePlayerStat {
                stat,
                change,
                value,
            },
            OutcomeEffect::AddItem { item } => Effect::AddItem { item },
            OutcomeEffect::RemoveItem { item_id } => Effect::RemoveItem { item_id },
            OutcomeEffect::Unknown => Effect::Unknown,
        }
    }
}
