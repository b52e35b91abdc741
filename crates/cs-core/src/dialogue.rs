//! Dialogue trees and choice structures.
//!
//! A tree keeps its nodes in source order. The first node is the
//! conversation's start node, so loading must never reorder keys.

use std::collections::HashMap;
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::condition::Condition;
use crate::effect::Effect;
use crate::id::NodeId;

/// One beat of NPC speech plus the player's possible replies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogueNode {
    /// Node id, unique within its tree.
    #[serde(default)]
    pub id: NodeId,
    /// What the NPC says.
    pub npc_text: String,
    /// Replies offered to the player.
    #[serde(default)]
    pub player_choices: Vec<Choice>,
}

impl DialogueNode {
    /// Create a node with no choices.
    pub fn new(id: impl Into<NodeId>, npc_text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            npc_text: npc_text.into(),
            player_choices: Vec::new(),
        }
    }

    /// Add a choice.
    pub fn with_choice(mut self, choice: Choice) -> Self {
        self.player_choices.push(choice);
        self
    }
}

/// Where a choice leads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target<'a> {
    /// The conversation ends.
    End,
    /// Continue at this node.
    Node(&'a NodeId),
}

/// A selectable reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Choice {
    /// Text shown to the player.
    pub text: String,
    /// Next node. Absent means `END`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_node_id: Option<NodeId>,
    /// Visibility condition.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<Condition>,
    /// Effects applied when chosen, in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub effects: Vec<Effect>,
}

impl Choice {
    /// Create a choice that ends the conversation.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            next_node_id: None,
            condition: None,
            effects: Vec::new(),
        }
    }

    /// Set the next node.
    pub fn with_next(mut self, node_id: impl Into<NodeId>) -> Self {
        self.next_node_id = Some(node_id.into());
        self
    }

    /// Set the visibility condition.
    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    /// Add an effect.
    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    /// Resolve the transition target; absent and `"END"` both end.
    pub fn target(&self) -> Target<'_> {
        match &self.next_node_id {
            Some(id) if !id.is_end() => Target::Node(id),
            _ => Target::End,
        }
    }
}

/// All dialogue nodes of one NPC, in source order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DialogueTree {
    nodes: Vec<DialogueNode>,
    index: HashMap<NodeId, usize>,
    duplicates: Vec<NodeId>,
}

impl DialogueTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tree from nodes in order. The first node starts the conversation.
    pub fn from_nodes(nodes: impl IntoIterator<Item = DialogueNode>) -> Self {
        let mut tree = Self::new();
        for node in nodes {
            tree.push(node);
        }
        tree
    }

    /// Append a node. A repeated id keeps the first node and is recorded.
    pub fn push(&mut self, node: DialogueNode) {
        if self.index.contains_key(&node.id) {
            tracing::warn!(node = %node.id, "duplicate dialogue node id; keeping the first");
            self.duplicates.push(node.id);
            return;
        }
        self.index.insert(node.id.clone(), self.nodes.len());
        self.nodes.push(node);
    }

    /// The start node: the first node in source order.
    pub fn start_node(&self) -> Option<&DialogueNode> {
        self.nodes.first()
    }

    /// Look up a node by id.
    pub fn node(&self, id: &str) -> Option<&DialogueNode> {
        self.index.get(id).map(|&i| &self.nodes[i])
    }

    /// Whether a node with this id exists.
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Nodes in source order.
    pub fn nodes(&self) -> impl Iterator<Item = &DialogueNode> {
        self.nodes.iter()
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node ids that appeared more than once while building.
    pub fn duplicate_ids(&self) -> &[NodeId] {
        &self.duplicates
    }
}

impl Serialize for DialogueTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.nodes.len()))?;
        for node in &self.nodes {
            map.serialize_entry(&node.id, node)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for DialogueTree {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TreeVisitor;

        impl<'de> Visitor<'de> for TreeVisitor {
            type Value = DialogueTree;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of node id to dialogue node")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut tree = DialogueTree::new();
                while let Some((key, mut node)) = access.next_entry::<NodeId, DialogueNode>()? {
                    if node.id != key {
                        if !node.id.as_str().is_empty() {
                            tracing::debug!(key = %key, id = %node.id, "node id differs from its key; using the key");
                        }
                        node.id = key;
                    }
                    tree.push(node);
                }
                Ok(tree)
            }
        }

        deserializer.deserialize_map(TreeVisitor)
    }
}
