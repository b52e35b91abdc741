use serde::{Deserialize, Serialize};

use crate::id::{LocationId, NpcId};

/// Name shown for an NPC whose details are unknown.
pub const UNKNOWN_NPC_NAME: &str = "Mysterious Figure";

/// Static description of a non-player character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NpcDetails {
    /// Unique NPC id.
    pub id: NpcId,
    /// Display name.
    pub name: String,
    /// Background text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Portrait image path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub portrait_image: Option<String>,
    /// Moral alignment, if authored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alignment: Option<String>,
    /// Where the NPC is usually found.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_location_id: Option<LocationId>,
}

impl NpcDetails {
    /// Create details with an id and a name.
    pub fn new(id: impl Into<NpcId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            portrait_image: None,
            alignment: None,
            default_location_id: None,
        }
    }

    /// The name to show, falling back when the name is blank.
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            UNKNOWN_NPC_NAME
        } else {
            &self.name
        }
    }
}
