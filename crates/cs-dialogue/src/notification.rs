//! Outbound instructions for whoever owns player state.

use std::collections::BTreeMap;

use cs_core::{Item, ItemId, NpcId, PuzzleId, Value};
use serde::{Deserialize, Serialize};

/// A puzzle opened by an effect or a scene object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PuzzleTrigger {
    /// Puzzle to present.
    pub puzzle_id: PuzzleId,
    /// NPC whose conversation resumes after the puzzle, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub npc_id: Option<NpcId>,
}

impl PuzzleTrigger {
    /// Create a trigger.
    pub fn new(puzzle_id: impl Into<PuzzleId>, npc_id: Option<NpcId>) -> Self {
        Self {
            puzzle_id: puzzle_id.into(),
            npc_id,
        }
    }
}

/// One `{kind, payload}` instruction emitted by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "payload", rename_all = "kebab-case")]
pub enum Notification {
    /// Change or set a stat.
    UpdatePlayerStat {
        /// Stat name.
        stat: String,
        /// Delta.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        change: Option<Value>,
        /// Absolute value. Wins over `change`.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<Value>,
    },
    /// Overwrite a game-state flag.
    SetGameState {
        /// Flag name.
        variable: String,
        /// New value.
        value: Value,
    },
    /// A named event for the host.
    #[serde(rename_all = "camelCase")]
    GameEvent {
        /// Event name.
        event_name: String,
        /// Free-form payload.
        detail: serde_json::Value,
    },
    /// Present a puzzle.
    TriggerPuzzle(PuzzleTrigger),
    /// Add resource deltas.
    UpdateResources(BTreeMap<String, i64>),
    /// Give an item.
    AddToInventory {
        /// The item.
        item: Item,
    },
    /// Take an item.
    #[serde(rename_all = "camelCase")]
    RemoveFromInventory {
        /// Item to take.
        item_id: ItemId,
    },
    /// Informational text for the player.
    Message(String),
}

impl Notification {
    /// Kind string as it appears on the wire.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UpdatePlayerStat { .. } => "update-player-stat",
            Self::SetGameState { .. } => "set-game-state",
            Self::GameEvent { .. } => "game-event",
            Self::TriggerPuzzle(_) => "trigger-puzzle",
            Self::UpdateResources(_) => "update-resources",
            Self::AddToInventory { .. } => "add-to-inventory",
            Self::RemoveFromInventory { .. } => "remove-from-inventory",
            Self::Message(_) => "message",
        }
    }

    /// Create a message notification.
    pub fn message(text: impl Into<String>) -> Self {
        Self::Message(text.into())
    }

    /// Create a single-resource update.
    pub fn resource(name: impl Into<String>, delta: i64) -> Self {
        Self::UpdateResources(BTreeMap::from([(name.into(), delta)]))
    }
}
