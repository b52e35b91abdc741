//! Dialogue engine for Corsair.
//!
//! Walks an NPC's dialogue tree, hides choices whose conditions the player
//! does not meet, turns choice effects into [`Notification`]s, and suspends
//! the conversation while a puzzle is played. The engine never mutates
//! player state itself; the host applies notifications with
//! [`PlayerState::apply`].

/// Puzzle request/report hand-off.
pub mod bridge;
/// Effect interpretation.
pub mod effects;
/// Outbound notifications.
pub mod notification;
/// Player state and notification application.
pub mod player;
/// Choice visibility predicates.
pub mod predicate;
/// The dialogue session state machine.
pub mod session;

pub use bridge::{PuzzleBridge, PuzzleReport, PuzzleRequest};
pub use effects::{EffectReport, apply_effects};
pub use notification::{Notification, PuzzleTrigger};
pub use player::PlayerState;
pub use predicate::{filter_node, is_available};
pub use session::{DialogueSession, SessionState, Step};
