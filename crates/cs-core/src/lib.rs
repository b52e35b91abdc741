//! Content model for Corsair: dialogue trees, conditions, effects, puzzles,
//! NPCs, items and locations, plus the read-only [`ContentStore`].
//!
//! Nothing here mutates game state. The dialogue engine in `cs-dialogue`
//! reads these types and emits notifications for the state owner.

/// Visibility conditions and comparison operators.
pub mod condition;
/// Dialogue nodes, choices and ordered trees.
pub mod dialogue;
/// Dialogue and puzzle-outcome effect vocabularies.
pub mod effect;
/// Error types used throughout the crate.
pub mod error;
/// String identifier newtypes.
pub mod id;
/// Inventory items.
pub mod item;
/// Map locations, hidden objects and markets.
pub mod location;
/// Non-player character details.
pub mod npc;
/// Puzzle definitions and outcome routing.
pub mod puzzle;
/// Content loading, lookups and validation.
pub mod store;
/// Dynamic content values.
pub mod value;

/// Re-export condition types.
pub use condition::{Condition, Operator};
/// Re-export dialogue types.
pub use dialogue::{Choice, DialogueNode, DialogueTree, Target};
/// Re-export effect types.
pub use effect::{Effect, OutcomeEffect};
/// Re-export error types.
pub use error::{ContentError, ContentResult};
/// Re-export identifier types.
pub use id::{END_NODE, ItemId, LocationId, NodeId, NpcId, PuzzleId};
/// Re-export item types.
pub use item::Item;
/// Re-export location types.
pub use location::{Good, GoodKind, Interaction, Location, Market, Price, SceneObject};
/// Re-export NPC types.
pub use npc::{NpcDetails, UNKNOWN_NPC_NAME};
/// Re-export puzzle types.
pub use puzzle::{OutcomeRoute, Puzzle, PuzzleOutcome};
/// Re-export store types.
pub use store::{ContentStore, Finding, Severity};
/// Re-export the value type.
pub use value::Value;
