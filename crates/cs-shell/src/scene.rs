//! Hidden-object scene interactions.

use cs_core::SceneObject;
use cs_dialogue::{Notification, PlayerState, PuzzleTrigger};

/// Result of clicking a scene object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClickResult {
    /// Notifications to apply, in order.
    pub notifications: Vec<Notification>,
    /// Text for the player.
    pub message: Option<String>,
}

/// Click `object`. Opened locks and gathered caches are updated in place.
pub fn click(object: &mut SceneObject, player: &PlayerState) -> ClickResult {
    if !object.handled {
        if let Some(interaction) = object.interaction.clone() {
            if !player.has_item(interaction.required_item_id.as_str()) {
                return ClickResult {
                    notifications: Vec::new(),
                    message: Some(format!(
                        "You need a {} to use the {}.",
                        item_words(interaction.required_item_id.as_str()),
                        object.name
                    )),
                };
            }

            let mut notifications = Vec::new();
            if let Some(item) = &interaction.revealed_item {
                notifications.push(Notification::AddToInventory { item: item.clone() });
            }
            if interaction.consumes_required_item {
                notifications.push(Notification::RemoveFromInventory {
                    item_id: interaction.required_item_id.clone(),
                });
            }
            object.name = format!("Opened {}", object.name);
            object.description = Some(if interaction.revealed_item.is_some() {
                "It's now empty.".to_string()
            } else {
                "You've interacted with this.".to_string()
            });
            object.icon = Some("lock_open".to_string());
            object.interaction = None;
            object.handled = true;
            return ClickResult {
                notifications,
                message: Some(interaction.success_message),
            };
        }

        if let Some(resources) = &object.grants_resources {
            let notifications = vec![Notification::UpdateResources(resources.clone())];
            let message = found_message(object);
            object.description = Some("The resources have been gathered.".to_string());
            object.handled = true;
            return ClickResult {
                notifications,
                message: Some(message),
            };
        }
    }

    if object.handled {
        return ClickResult {
            notifications: Vec::new(),
            message: Some(format!(
                "{}: {}",
                object.name,
                object.description.as_deref().unwrap_or_default()
            )),
        };
    }

    if let Some(puzzle_id) = &object.triggers_puzzle_id {
        return ClickResult {
            notifications: vec![Notification::TriggerPuzzle(PuzzleTrigger::new(
                puzzle_id.clone(),
                None,
            ))],
            message: object.found_message.clone(),
        };
    }

    ClickResult {
        notifications: vec![Notification::AddToInventory {
            item: object.to_item(),
        }],
        message: Some(found_message(object)),
    }
}

fn found_message(object: &SceneObject) -> String {
    object
        .found_message
        .clone()
        .unwrap_or_else(|| format!("You found: {}!", object.name))
}

/// `item_rusty_key` reads as "rusty key".
fn item_words(item_id: &str) -> String {
    item_id.replacen("item_", "", 1).replace('_', " ")
}
