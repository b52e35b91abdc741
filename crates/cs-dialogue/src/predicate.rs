//! Choice visibility.

use std::cmp::Ordering;

use cs_core::{Choice, Condition, DialogueNode, Operator, Value};
use tracing::warn;

use crate::player::PlayerState;

/// Whether a choice should be offered to the player right now.
pub fn is_available(choice: &Choice, player: &PlayerState) -> bool {
    match &choice.condition {
        None => true,
        Some(condition) => evaluate(condition, player),
    }
}

/// Evaluate one condition. Anything missing or malformed is unsatisfied.
pub fn evaluate(condition: &Condition, player: &PlayerState) -> bool {
    match condition {
        Condition::PlayerStat {
            stat,
            operator,
            value,
        } => player
            .stat(stat)
            .is_some_and(|current| compare(current, operator, value)),
        Condition::GameState {
            variable,
            operator,
            value,
        } => {
            if !operator.is_equality() {
                warn!(variable, %operator, "game-state conditions only support === and !==");
                return false;
            }
            player
                .flag(variable)
                .is_some_and(|current| compare(current, operator, value))
        }
        Condition::HasItem { item_id } => player.has_item(item_id.as_str()),
        Condition::QuestStatus { quest_id, status } => {
            player.quest(quest_id) == Some(status.as_str())
        }
        Condition::Unknown => false,
    }
}

fn compare(current: &Value, operator: &Operator, expected: &Value) -> bool {
    match operator {
        Operator::Eq => current.strict_eq(expected),
        Operator::Ne => !current.strict_eq(expected),
        Operator::Ge => matches!(
            current.partial_order(expected),
            Some(Ordering::Greater | Ordering::Equal)
        ),
        Operator::Le => matches!(
            current.partial_order(expected),
            Some(Ordering::Less | Ordering::Equal)
        ),
        Operator::Gt => current.partial_order(expected) == Some(Ordering::Greater),
        Operator::Lt => current.partial_order(expected) == Some(Ordering::Less),
        Operator::Unsupported(raw) => {
            warn!(operator = %raw, "unsupported condition operator");
            false
        }
    }
}

/// A copy of `node` holding only the choices available to `player`.
pub fn filter_node(node: &DialogueNode, player: &PlayerState) -> DialogueNode {
    DialogueNode {
        id: node.id.clone(),
        npc_text: node.npc_text.clone(),
        player_choices: node
            .player_choices
            .iter()
            .filter(|choice| is_available(choice, player))
            .cloned()
            .collect(),
    }
}
