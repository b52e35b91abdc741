use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::effect::OutcomeEffect;
use crate::id::{NodeId, NpcId, PuzzleId};

/// How an external puzzle attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PuzzleOutcome {
    /// The player solved it.
    Success,
    /// The player failed it.
    Failure,
    /// The player gave up.
    Skipped,
}

impl fmt::Display for PuzzleOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Failure => write!(f, "failure"),
            Self::Skipped => write!(f, "skipped"),
        }
    }
}

impl FromStr for PuzzleOutcome {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "success" | "s" => Ok(Self::Success),
            "failure" | "fail" | "f" => Ok(Self::Failure),
            "skipped" | "skip" | "k" => Ok(Self::Skipped),
            other => Err(format!("unknown puzzle outcome: {other}")),
        }
    }
}

/// A puzzle mini-game definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Puzzle {
    /// Unique puzzle id.
    pub id: PuzzleId,
    /// Text shown by the puzzle presenter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Kind of mini-game (riddle, cipher, ...).
    #[serde(default, rename = "puzzle_type", alias = "puzzleType", skip_serializing_if = "Option::is_none")]
    pub puzzle_type: Option<String>,
    /// NPC whose tree holds the outcome nodes, for puzzles opened outside a conversation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub npc_id: Option<NpcId>,
    /// Node to resume at on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success_dialog_node_id: Option<NodeId>,
    /// Node to resume at on failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_dialog_node_id: Option<NodeId>,
    /// Node to resume at when skipped; falls back to the failure node.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip_dialog_node_id: Option<NodeId>,
    /// Effects applied on success.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub success_effects: Vec<OutcomeEffect>,
    /// Effects applied on failure.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failure_effects: Vec<OutcomeEffect>,
}

/// The node and effects an outcome leads to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutcomeRoute<'a> {
    /// Node to resume at, if any.
    pub next_node_id: Option<&'a NodeId>,
    /// Effects to apply first.
    pub effects: &'a [OutcomeEffect],
}

impl Puzzle {
    /// Create a puzzle with no routing.
    pub fn new(id: impl Into<PuzzleId>) -> Self {
        Self {
            id: id.into(),
            description: None,
            puzzle_type: None,
            npc_id: None,
            success_dialog_node_id: None,
            failure_dialog_node_id: None,
            skip_dialog_node_id: None,
            success_effects: Vec::new(),
            failure_effects: Vec::new(),
        }
    }

    /// Set the success, failure, and skip nodes.
    pub fn with_nodes(
        mut self,
        success: impl Into<NodeId>,
        failure: impl Into<NodeId>,
        skip: Option<&str>,
    ) -> Self {
        self.success_dialog_node_id = Some(success.into());
        self.failure_dialog_node_id = Some(failure.into());
        self.skip_dialog_node_id = skip.map(NodeId::from);
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Map an outcome to its continuation. Skipping never applies effects.
    pub fn route(&self, outcome: PuzzleOutcome) -> OutcomeRoute<'_> {
        match outcome {
            PuzzleOutcome::Success => OutcomeRoute {
                next_node_id: self.success_dialog_node_id.as_ref(),
                effects: &self.success_effects,
            },
            PuzzleOutcome::Failure => OutcomeRoute {
                next_node_id: self.failure_dialog_node_id.as_ref(),
                effects: &self.failure_effects,
            },
            PuzzleOutcome::Skipped => OutcomeRoute {
                next_node_id: self
                    .skip_dialog_node_id
                    .as_ref()
                    .or(self.failure_dialog_node_id.as_ref()),
                effects: &[],
            },
        }
    }

    /// Description for the presenter, with a placeholder when absent.
    pub fn description_or_default(&self) -> &str {
        self.description
            .as_deref()
            .unwrap_or("No puzzle description loaded.")
    }
}
