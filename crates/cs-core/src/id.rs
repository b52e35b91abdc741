use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create an identifier from any string-like value.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// The identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }
    };
}

string_id!(
    /// Identifier of a non-player character.
    NpcId
);
string_id!(
    /// Identifier of a dialogue node, unique within one NPC's tree.
    NodeId
);
string_id!(
    /// Identifier of a puzzle definition.
    PuzzleId
);
string_id!(
    /// Identifier of an inventory item.
    ItemId
);
string_id!(
    /// Identifier of a location on the map.
    LocationId
);

/// Reserved node id that ends a conversation.
pub const END_NODE: &str = "END";

impl NodeId {
    /// Whether this id is the reserved end marker.
    pub fn is_end(&self) -> bool {
        self.0 == END_NODE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_serialize_as_plain_strings() {
        let id = NpcId::new("npc_silas_blackwood");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"npc_silas_blackwood\"");
        let back: NpcId = serde_json::from_str("\"npc_silas_blackwood\"").unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn end_marker() {
        assert!(NodeId::from("END").is_end());
        assert!(!NodeId::from("end").is_end());
    }
}
