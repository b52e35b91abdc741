//! The dialogue session state machine.
//!
//! A session is either [`SessionState::Idle`] or talking to one NPC at one
//! node. Every operation is total: lookups that fail degrade to `Idle` and
//! log, and the only output is a list of notifications for the state owner.
//!
//! A puzzle triggered by a choice leaves the session active at the node the
//! choice was made on. The [`PuzzleBridge`](crate::bridge::PuzzleBridge)
//! remembers the pending puzzle and later calls
//! [`DialogueSession::resolve_puzzle`].

use cs_core::{
    Choice, ContentStore, DialogueNode, Effect, NodeId, NpcId, Puzzle, PuzzleOutcome, Target,
    UNKNOWN_NPC_NAME,
};
use tracing::{debug, error, info, warn};

use crate::effects::apply_effects;
use crate::notification::{Notification, PuzzleTrigger};
use crate::player::PlayerState;
use crate::predicate::filter_node;

/// Where a session is.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SessionState {
    /// No conversation.
    #[default]
    Idle,
    /// Talking to `npc_id`, showing `node` (choices already filtered).
    Active {
        /// NPC being talked to.
        npc_id: NpcId,
        /// Current node id.
        node_id: NodeId,
        /// Filtered copy of the current node.
        node: DialogueNode,
    },
}

/// What choosing did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Step {
    /// Notifications to apply, in order.
    pub notifications: Vec<Notification>,
    /// The puzzle that suspended the conversation, if any.
    pub suspended: Option<PuzzleTrigger>,
}

/// A conversation with one NPC at a time.
#[derive(Debug, Clone, Default)]
pub struct DialogueSession {
    state: SessionState,
}

impl DialogueSession {
    /// Create an idle session.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current state.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Whether a conversation is open.
    pub fn is_active(&self) -> bool {
        matches!(self.state, SessionState::Active { .. })
    }

    /// NPC being talked to.
    pub fn active_npc_id(&self) -> Option<&NpcId> {
        match &self.state {
            SessionState::Active { npc_id, .. } => Some(npc_id),
            SessionState::Idle => None,
        }
    }

    /// Id of the node on screen.
    pub fn current_node_id(&self) -> Option<&NodeId> {
        match &self.state {
            SessionState::Active { node_id, .. } => Some(node_id),
            SessionState::Idle => None,
        }
    }

    /// The node on screen, with unavailable choices removed.
    pub fn current_node(&self) -> Option<&DialogueNode> {
        match &self.state {
            SessionState::Active { node, .. } => Some(node),
            SessionState::Idle => None,
        }
    }

    /// Open a conversation at the NPC's start node.
    ///
    /// Always starts from the beginning, whatever happened in earlier
    /// conversations. Returns a message when the NPC has nothing to say.
    pub fn start(
        &mut self,
        content: &ContentStore,
        npc_id: &str,
        player: &PlayerState,
    ) -> Vec<Notification> {
        self.state = SessionState::Idle;
        let name = content
            .npc(npc_id)
            .map_or(UNKNOWN_NPC_NAME, |npc| npc.display_name());

        let Some(tree) = content.tree(npc_id) else {
            info!(npc = npc_id, "no dialogue tree");
            return vec![Notification::message(format!("{name} has nothing to say."))];
        };
        let Some(start) = tree.start_node() else {
            warn!(npc = npc_id, "dialogue tree has no nodes");
            return vec![Notification::message(format!(
                "{name} doesn't seem to want to talk."
            ))];
        };

        debug!(npc = npc_id, node = %start.id, "dialogue started");
        self.state = SessionState::Active {
            npc_id: NpcId::new(npc_id),
            node_id: start.id.clone(),
            node: filter_node(start, player),
        };
        Vec::new()
    }

    /// Select a choice: apply its effects, then move on.
    ///
    /// A puzzle trigger suspends the conversation on the current node.
    pub fn choose(
        &mut self,
        content: &ContentStore,
        choice: &Choice,
        player: &PlayerState,
    ) -> Step {
        let Some(npc_id) = self.active_npc_id().cloned() else {
            warn!(choice = %choice.text, "choice made with no active dialogue; ignored");
            return Step::default();
        };

        let report = apply_effects(&choice.effects, Some(&npc_id));
        if let Some(trigger) = report.trigger {
            debug!(npc = %npc_id, puzzle = %trigger.puzzle_id, "dialogue suspended for puzzle");
            return Step {
                notifications: report.notifications,
                suspended: Some(trigger),
            };
        }

        match choice.target() {
            Target::End => {
                debug!(npc = %npc_id, "dialogue ended");
                self.state = SessionState::Idle;
            }
            Target::Node(next) => self.go_to(content, &npc_id, next, player),
        }
        Step {
            notifications: report.notifications,
            suspended: None,
        }
    }

    /// Select the `index`th visible choice of the current node.
    pub fn choose_index(
        &mut self,
        content: &ContentStore,
        index: usize,
        player: &PlayerState,
    ) -> Option<Step> {
        let choice = self.current_node()?.player_choices.get(index)?.clone();
        Some(self.choose(content, &choice, player))
    }

    /// Close the conversation without applying anything.
    pub fn dismiss(&mut self) {
        if let Some(npc_id) = self.active_npc_id() {
            debug!(npc = %npc_id, "dialogue dismissed");
        }
        self.state = SessionState::Idle;
    }

    /// Resume after a puzzle. `owner` names the NPC whose tree holds the
    /// outcome node; when absent the active NPC is used.
    pub fn resolve_puzzle(
        &mut self,
        content: &ContentStore,
        owner: Option<&NpcId>,
        puzzle: &Puzzle,
        outcome: PuzzleOutcome,
        player: &PlayerState,
    ) -> Vec<Notification> {
        let route = puzzle.route(outcome);
        let effects: Vec<Effect> = route.effects.iter().cloned().map(Effect::from).collect();
        let notifications = apply_effects(&effects, owner).notifications;
        info!(puzzle = %puzzle.id, %outcome, effects = notifications.len(), "puzzle resolved");

        let next = match route.next_node_id {
            Some(next) if !next.is_end() => next,
            _ => {
                self.state = SessionState::Idle;
                return notifications;
            }
        };

        let Some(npc_id) = owner.or(self.active_npc_id()).cloned() else {
            error!(puzzle = %puzzle.id, node = %next, "no NPC owns the puzzle outcome node");
            self.state = SessionState::Idle;
            return notifications;
        };
        self.go_to(content, &npc_id, next, player);
        notifications
    }

    /// Re-filter the current node against fresh player state.
    pub fn refresh(&mut self, content: &ContentStore, player: &PlayerState) {
        let SessionState::Active {
            npc_id, node_id, ..
        } = &self.state
        else {
            return;
        };
        let (npc_id, node_id) = (npc_id.clone(), node_id.clone());
        self.go_to(content, &npc_id, &node_id, player);
    }

    fn go_to(
        &mut self,
        content: &ContentStore,
        npc_id: &NpcId,
        node_id: &NodeId,
        player: &PlayerState,
    ) {
        let Some(tree) = content.tree(npc_id.as_str()) else {
            error!(npc = %npc_id, "dialogue tree vanished");
            self.state = SessionState::Idle;
            return;
        };
        let Some(node) = tree.node(node_id.as_str()) else {
            error!(npc = %npc_id, node = %node_id, "next dialogue node not found");
            self.state = SessionState::Idle;
            return;
        };
        self.state = SessionState::Active {
            npc_id: npc_id.clone(),
            node_id: node_id.clone(),
            node: filter_node(node, player),
        };
    }
}
