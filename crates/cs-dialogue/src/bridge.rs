//! Hand-off between the dialogue session and the puzzle presenter.

use cs_core::{ContentStore, PuzzleId, PuzzleOutcome};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use crate::notification::{Notification, PuzzleTrigger};
use crate::player::PlayerState;
use crate::session::DialogueSession;

/// What the puzzle presenter is asked to show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PuzzleRequest {
    /// Puzzle to show.
    pub puzzle_id: PuzzleId,
    /// Text for the presenter.
    pub description: String,
    /// Kind of mini-game, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub puzzle_type: Option<String>,
}

/// What the puzzle presenter reports back, once per request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PuzzleReport {
    /// Puzzle that finished.
    pub puzzle_id: PuzzleId,
    /// How it ended.
    pub outcome: PuzzleOutcome,
}

impl PuzzleReport {
    /// Create a report.
    pub fn new(puzzle_id: impl Into<PuzzleId>, outcome: PuzzleOutcome) -> Self {
        Self {
            puzzle_id: puzzle_id.into(),
            outcome,
        }
    }
}

/// Remembers the one puzzle currently awaiting a report.
#[derive(Debug, Clone, Default)]
pub struct PuzzleBridge {
    pending: Option<PuzzleTrigger>,
}

impl PuzzleBridge {
    /// Create a bridge with nothing pending.
    pub fn new() -> Self {
        Self::default()
    }

    /// The puzzle awaiting a report.
    pub fn pending(&self) -> Option<&PuzzleTrigger> {
        self.pending.as_ref()
    }

    /// Open a puzzle. Unknown puzzles are logged and nothing becomes pending.
    pub fn request(
        &mut self,
        trigger: PuzzleTrigger,
        content: &ContentStore,
    ) -> Option<PuzzleRequest> {
        let Some(puzzle) = content.puzzle(trigger.puzzle_id.as_str()) else {
            error!(puzzle = %trigger.puzzle_id, "puzzle definition not found");
            return None;
        };
        if let Some(previous) = &self.pending {
            warn!(previous = %previous.puzzle_id, next = %trigger.puzzle_id, "replacing an unresolved puzzle");
        }
        let request = PuzzleRequest {
            puzzle_id: puzzle.id.clone(),
            description: puzzle.description_or_default().to_string(),
            puzzle_type: puzzle.puzzle_type.clone(),
        };
        debug!(puzzle = %puzzle.id, npc = ?trigger.npc_id, "puzzle requested");
        self.pending = Some(trigger);
        Some(request)
    }

    /// Feed a report back into the session.
    pub fn resolve(
        &mut self,
        report: &PuzzleReport,
        content: &ContentStore,
        session: &mut DialogueSession,
        player: &PlayerState,
    ) -> Vec<Notification> {
        let Some(pending) = &self.pending else {
            warn!(puzzle = %report.puzzle_id, "puzzle report with nothing pending; ignored");
            return Vec::new();
        };
        if pending.puzzle_id != report.puzzle_id {
            warn!(
                expected = %pending.puzzle_id,
                reported = %report.puzzle_id,
                "puzzle report does not match the pending puzzle; ignored"
            );
            return Vec::new();
        }
        let Some(puzzle) = content.puzzle(report.puzzle_id.as_str()) else {
            error!(puzzle = %report.puzzle_id, "puzzle definition not found");
            return Vec::new();
        };

        let owner = pending.npc_id.clone().or_else(|| puzzle.npc_id.clone());
        self.pending = None;
        session.resolve_puzzle(content, owner.as_ref(), puzzle, report.outcome, player)
    }

    /// Forget the pending puzzle.
    pub fn cancel(&mut self) {
        if let Some(pending) = self.pending.take() {
            debug!(puzzle = %pending.puzzle_id, "pending puzzle cancelled");
        }
    }
}
