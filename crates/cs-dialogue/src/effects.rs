//! The effect interpreter: turns effects into notifications.

use cs_core::{Effect, NpcId};
use tracing::{debug, warn};

use crate::notification::{Notification, PuzzleTrigger};

/// Result of running an effect list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EffectReport {
    /// Notifications in effect order.
    pub notifications: Vec<Notification>,
    /// Set when a puzzle cut the list short.
    pub trigger: Option<PuzzleTrigger>,
}

impl EffectReport {
    /// Whether a puzzle trigger stopped processing.
    pub fn aborted(&self) -> bool {
        self.trigger.is_some()
    }
}

/// Interpret `effects` in order. `owner` is the NPC whose conversation a
/// triggered puzzle should resume.
pub fn apply_effects(effects: &[Effect], owner: Option<&NpcId>) -> EffectReport {
    let mut report = EffectReport::default();

    for (i, effect) in effects.iter().enumerate() {
        let notification = match effect {
            Effect::UpdatePlayerStat {
                stat,
                change,
                value,
            } => Notification::UpdatePlayerStat {
                stat: stat.clone(),
                change: change.clone(),
                value: value.clone(),
            },
            Effect::SetGameState { variable, value } => Notification::SetGameState {
                variable: variable.clone(),
                value: value.clone(),
            },
            Effect::GameEvent { event_name, detail } => Notification::GameEvent {
                event_name: event_name.clone(),
                detail: detail.clone(),
            },
            Effect::TriggerPuzzle {
                puzzle_id: Some(puzzle_id),
            } => {
                let trigger = PuzzleTrigger::new(puzzle_id.clone(), owner.cloned());
                let skipped = effects.len() - i - 1;
                if skipped > 0 {
                    debug!(puzzle = %puzzle_id, skipped, "puzzle trigger stops the remaining effects");
                }
                report
                    .notifications
                    .push(Notification::TriggerPuzzle(trigger.clone()));
                report.trigger = Some(trigger);
                return report;
            }
            Effect::TriggerPuzzle { puzzle_id: None } => {
                warn!("TRIGGER_PUZZLE effect without a puzzleId; skipped");
                continue;
            }
            Effect::AddItem { item } => Notification::AddToInventory { item: item.clone() },
            Effect::RemoveItem { item_id } => Notification::RemoveFromInventory {
                item_id: item_id.clone(),
            },
            Effect::UpdateResources { resources } => {
                Notification::UpdateResources(resources.clone())
            }
            Effect::Unknown => {
                warn!("unknown effect type; skipped");
                continue;
            }
        };
        report.notifications.push(notification);
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use cs_core::{ItemId, PuzzleId, Value};

    fn flag(variable: &str) -> Effect {
        Effect::SetGameState {
            variable: variable.into(),
            value: Value::Boolean(true),
        }
    }

    fn trigger(puzzle_id: &str) -> Effect {
        Effect::TriggerPuzzle {
            puzzle_id: Some(PuzzleId::new(puzzle_id)),
        }
    }

    #[test]
    fn one_notification_per_effect_in_order() {
        let effects = [
            flag("metSilas"),
            Effect::UpdatePlayerStat {
                stat: "reputation".into(),
                change: Some(Value::Integer(5)),
                value: None,
            },
            Effect::RemoveItem {
                item_id: ItemId::new("item_rum"),
            },
        ];
        let report = apply_effects(&effects, None);
        assert!(!report.aborted());
        let kinds: Vec<&str> = report.notifications.iter().map(|n| n.kind()).collect();
        assert_eq!(
            kinds,
            ["set-game-state", "update-player-stat", "remove-from-inventory"]
        );
    }

    #[test]
    fn trigger_suppresses_later_effects() {
        let owner = NpcId::new("npc_silas");
        for position in 0..3 {
            let mut effects = vec![flag("a"), flag("b"), flag("c")];
            effects.insert(position, trigger("RIDDLE_01"));
            let report = apply_effects(&effects, Some(&owner));

            assert_eq!(report.notifications.len(), position + 1);
            assert_eq!(
                report.notifications.last(),
                Some(&Notification::TriggerPuzzle(PuzzleTrigger::new(
                    "RIDDLE_01",
                    Some(owner.clone())
                )))
            );
            assert_eq!(
                report.trigger.as_ref().map(|t| t.puzzle_id.as_str()),
                Some("RIDDLE_01")
            );
        }
    }

    #[test]
    fn skips_unknown_and_idless_triggers() {
        let effects = [
            Effect::Unknown,
            Effect::TriggerPuzzle { puzzle_id: None },
            flag("stillHere"),
        ];
        let report = apply_effects(&effects, None);
        assert!(!report.aborted());
        assert_eq!(report.notifications.len(), 1);
    }
}
