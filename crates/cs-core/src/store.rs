//! The content store: every dialogue tree, NPC, puzzle, item and location,
//! loaded once and read-only during play.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::condition::{Condition, Operator};
use crate::dialogue::{DialogueTree, Target};
use crate::effect::{Effect, OutcomeEffect};
use crate::error::{ContentError, ContentResult};
use crate::id::{ItemId, LocationId, NpcId, PuzzleId};
use crate::item::Item;
use crate::location::Location;
use crate::npc::NpcDetails;
use crate::puzzle::Puzzle;

/// NPC details file name.
pub const NPCS_FILE: &str = "npcs.json";
/// Dialogue trees file name.
pub const DIALOGUES_FILE: &str = "dialogues.json";
/// Puzzle definitions file name.
pub const PUZZLES_FILE: &str = "puzzles.json";
/// Item catalogue file name.
pub const ITEMS_FILE: &str = "items.json";
/// Locations file name.
pub const LOCATIONS_FILE: &str = "locations.json";

/// Loaded game content.
#[derive(Debug, Clone, Default)]
pub struct ContentStore {
    npcs: BTreeMap<NpcId, NpcDetails>,
    dialogues: BTreeMap<NpcId, DialogueTree>,
    puzzles: BTreeMap<PuzzleId, Puzzle>,
    items: BTreeMap<ItemId, Item>,
    locations: BTreeMap<LocationId, Location>,
}

impl ContentStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every content file from a directory. Missing files are empty.
    pub fn load_dir(dir: impl AsRef<Path>) -> ContentResult<Self> {
        let dir = dir.as_ref();
        let npcs: Vec<NpcDetails> = read_collection(dir, NPCS_FILE)?;
        let dialogues: BTreeMap<NpcId, DialogueTree> = read_collection(dir, DIALOGUES_FILE)?;
        let puzzles: Vec<Puzzle> = read_collection(dir, PUZZLES_FILE)?;
        let items: Vec<Item> = read_collection(dir, ITEMS_FILE)?;
        let locations: Vec<Location> = read_collection(dir, LOCATIONS_FILE)?;

        let mut store = Self::new();
        for npc in npcs {
            store = store.with_npc(npc);
        }
        for (npc_id, tree) in dialogues {
            store = store.with_dialogue(npc_id, tree);
        }
        for puzzle in puzzles {
            store = store.with_puzzle(puzzle);
        }
        for item in items {
            store = store.with_item(item);
        }
        for location in locations {
            store = store.with_location(location);
        }

        info!(
            dir = %dir.display(),
            npcs = store.npcs.len(),
            dialogues = store.dialogues.len(),
            puzzles = store.puzzles.len(),
            items = store.items.len(),
            locations = store.locations.len(),
            "content loaded"
        );
        Ok(store)
    }

    /// Add NPC details.
    pub fn with_npc(mut self, npc: NpcDetails) -> Self {
        self.npcs.insert(npc.id.clone(), npc);
        self
    }

    /// Add an NPC's dialogue tree.
    pub fn with_dialogue(mut self, npc_id: impl Into<NpcId>, tree: DialogueTree) -> Self {
        self.dialogues.insert(npc_id.into(), tree);
        self
    }

    /// Add a puzzle definition.
    pub fn with_puzzle(mut self, puzzle: Puzzle) -> Self {
        self.puzzles.insert(puzzle.id.clone(), puzzle);
        self
    }

    /// Add a catalogue item.
    pub fn with_item(mut self, item: Item) -> Self {
        self.items.insert(item.id.clone(), item);
        self
    }

    /// Add a location.
    pub fn with_location(mut self, location: Location) -> Self {
        self.locations.insert(location.id.clone(), location);
        self
    }

    /// Dialogue tree of an NPC.
    pub fn tree(&self, npc_id: &str) -> Option<&DialogueTree> {
        self.dialogues.get(npc_id)
    }

    /// NPC details.
    pub fn npc(&self, npc_id: &str) -> Option<&NpcDetails> {
        self.npcs.get(npc_id)
    }

    /// Puzzle definition.
    pub fn puzzle(&self, puzzle_id: &str) -> Option<&Puzzle> {
        self.puzzles.get(puzzle_id)
    }

    /// Catalogue item.
    pub fn item(&self, item_id: &str) -> Option<&Item> {
        self.items.get(item_id)
    }

    /// Location.
    pub fn location(&self, location_id: &str) -> Option<&Location> {
        self.locations.get(location_id)
    }

    /// All NPC details, ordered by id.
    pub fn npcs(&self) -> impl Iterator<Item = &NpcDetails> {
        self.npcs.values()
    }

    /// All dialogue trees keyed by NPC, ordered by id.
    pub fn dialogues(&self) -> impl Iterator<Item = (&NpcId, &DialogueTree)> {
        self.dialogues.iter()
    }

    /// All puzzles, ordered by id.
    pub fn puzzles(&self) -> impl Iterator<Item = &Puzzle> {
        self.puzzles.values()
    }

    /// All locations, ordered by id.
    pub fn locations(&self) -> impl Iterator<Item = &Location> {
        self.locations.values()
    }

    /// Check cross-references between collections.
    pub fn validate(&self) -> Vec<Finding> {
        let mut findings = Vec::new();

        for (npc_id, tree) in &self.dialogues {
            if self.npcs.get(npc_id).is_none() {
                findings.push(Finding::warning(format!(
                    "dialogue tree '{npc_id}' has no NPC details"
                )));
            }
            if tree.is_empty() {
                findings.push(Finding::warning(format!("dialogue tree '{npc_id}' is empty")));
            }
            for dup in tree.duplicate_ids() {
                findings.push(Finding::warning(format!(
                    "{npc_id}: duplicate node id '{dup}' (first one kept)"
                )));
            }

            for node in tree.nodes() {
                for (i, choice) in node.player_choices.iter().enumerate() {
                    let at = format!("{npc_id}/{}#{}", node.id, i + 1);
                    match choice.target() {
                        Target::Node(next) if !tree.contains(next.as_str()) => {
                            findings.push(Finding::error(format!(
                                "{at}: next node '{next}' does not exist"
                            )));
                        }
                        _ => {}
                    }
                    if let Some(condition) = &choice.condition {
                        self.check_condition(&at, condition, &mut findings);
                    }
                    for effect in &choice.effects {
                        self.check_effect(&at, effect, &mut findings);
                    }
                }
            }
        }

        for puzzle in self.puzzles.values() {
            let outcomes = [
                &puzzle.success_dialog_node_id,
                &puzzle.failure_dialog_node_id,
                &puzzle.skip_dialog_node_id,
            ];
            for node_id in outcomes.into_iter().flatten() {
                if node_id.is_end() {
                    continue;
                }
                let found = match &puzzle.npc_id {
                    Some(owner) => self
                        .tree(owner.as_str())
                        .is_some_and(|t| t.contains(node_id.as_str())),
                    None => self.dialogues.values().any(|t| t.contains(node_id.as_str())),
                };
                if !found {
                    findings.push(Finding::warning(format!(
                        "puzzle '{}': outcome node '{node_id}' is not in any dialogue tree",
                        puzzle.id
                    )));
                }
            }
            for effect in puzzle.success_effects.iter().chain(&puzzle.failure_effects) {
                if *effect == OutcomeEffect::Unknown {
                    findings.push(Finding::warning(format!(
                        "puzzle '{}': unknown outcome effect type",
                        puzzle.id
                    )));
                }
            }
        }

        for location in self.locations.values() {
            for npc_id in &location.npc_ids {
                if self.npcs.get(npc_id).is_none() {
                    findings.push(Finding::warning(format!(
                        "location '{}': unknown NPC '{npc_id}'",
                        location.id
                    )));
                }
            }
            for object in &location.hidden_objects {
                let Some(puzzle_id) = &object.triggers_puzzle_id else {
                    continue;
                };
                if self.puzzles.get(puzzle_id).is_none() {
                    findings.push(Finding::error(format!(
                        "location '{}': object '{}' triggers unknown puzzle '{puzzle_id}'",
                        location.id, object.id
                    )));
                }
            }
        }

        debug!(count = findings.len(), "content validated");
        findings
    }

    fn check_condition(&self, at: &str, condition: &Condition, findings: &mut Vec<Finding>) {
        match condition {
            Condition::PlayerStat { operator, .. } => {
                if let Operator::Unsupported(raw) = operator {
                    findings.push(Finding::warning(format!(
                        "{at}: unsupported operator '{raw}' hides this choice"
                    )));
                }
            }
            Condition::GameState { operator, .. } => {
                if !operator.is_equality() {
                    findings.push(Finding::warning(format!(
                        "{at}: game-state conditions only support === and !==, found '{operator}'"
                    )));
                }
            }
            Condition::Unknown => {
                findings.push(Finding::warning(format!(
                    "{at}: unknown condition type hides this choice"
                )));
            }
            Condition::HasItem { .. } | Condition::QuestStatus { .. } => {}
        }
    }

    fn check_effect(&self, at: &str, effect: &Effect, findings: &mut Vec<Finding>) {
        match effect {
            Effect::TriggerPuzzle {
                puzzle_id: Some(puzzle_id),
            } if self.puzzles.get(puzzle_id).is_none() => {
                findings.push(Finding::error(format!(
                    "{at}: TRIGGER_PUZZLE names unknown puzzle '{puzzle_id}'"
                )));
            }
            Effect::TriggerPuzzle { puzzle_id: None } => {
                findings.push(Finding::warning(format!(
                    "{at}: TRIGGER_PUZZLE without a puzzleId is skipped"
                )));
            }
            Effect::Unknown => {
                findings.push(Finding::warning(format!("{at}: unknown effect type is skipped")));
            }
            _ => {}
        }
    }
}

fn read_collection<T: DeserializeOwned + Default>(dir: &Path, file: &str) -> ContentResult<T> {
    let path = dir.join(file);
    let text = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(file, "content file missing; using an empty collection");
            return Ok(T::default());
        }
        Err(source) => return Err(ContentError::Io { path, source }),
    };
    serde_json::from_str(&text).map_err(|source| ContentError::Parse {
        file: file.to_string(),
        source,
    })
}

/// Severity level for validation findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Content that will misbehave at runtime.
    Error,
    /// Content that degrades gracefully but is probably a mistake.
    Warning,
}

/// One validation finding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    /// How serious the finding is.
    pub severity: Severity,
    /// Human-readable description.
    pub message: String,
}

impl Finding {
    /// Create an error finding.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }

    /// Create a warning finding.
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
        }
    }

    /// Whether this finding is an error.
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{prefix}: {}", self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialogue::{Choice, DialogueNode};

    fn write(dir: &Path, file: &str, text: &str) {
        fs::write(dir.join(file), text).unwrap();
    }

    #[test]
    fn load_dir_reads_every_collection() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            NPCS_FILE,
            r#"[{"id":"npc_silas","name":"Silas Blackwood","alignment":"neutral"}]"#,
        );
        write(
            dir.path(),
            DIALOGUES_FILE,
            r#"{"npc_silas":{
                "silas_intro":{"npcText":"Ahoy.","playerChoices":[{"text":"Bye","nextNodeId":"END"}]},
                "again":{"npcText":"Back so soon?"}
            }}"#,
        );
        write(
            dir.path(),
            PUZZLES_FILE,
            r#"[{"id":"PUZZLE1","successDialogNodeId":"again"}]"#,
        );

        let store = ContentStore::load_dir(dir.path()).unwrap();
        assert_eq!(store.npc("npc_silas").unwrap().name, "Silas Blackwood");
        let tree = store.tree("npc_silas").unwrap();
        assert_eq!(tree.start_node().unwrap().id, "silas_intro");
        assert!(store.puzzle("PUZZLE1").is_some());
        assert!(store.item("anything").is_none());
        assert!(store.location("anywhere").is_none());
        assert!(store.validate().is_empty());
    }

    #[test]
    fn missing_directory_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = ContentStore::load_dir(dir.path().join("nope")).unwrap();
        assert_eq!(store.npcs().count(), 0);
    }

    #[test]
    fn null_operands_load() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            DIALOGUES_FILE,
            r#"{"npc_silas":{"start":{"npcText":"Well?","playerChoices":[
                {"text":"Forget it","condition":{"type":"gameState","variable":"grudge","value":null},
                 "effects":[{"type":"setGameState","variable":"grudge","value":null}]}
            ]}}}"#,
        );
        let store = ContentStore::load_dir(dir.path()).unwrap();
        let choice = &store.tree("npc_silas").unwrap().nodes().next().unwrap().player_choices[0];
        assert!(matches!(
            &choice.condition,
            Some(Condition::GameState { value: crate::value::Value::Null, .. })
        ));
        assert_eq!(
            choice.effects,
            [Effect::SetGameState {
                variable: "grudge".into(),
                value: crate::value::Value::Null,
            }]
        );
    }

    #[test]
    fn malformed_file_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), PUZZLES_FILE, "[{not json");
        let err = ContentStore::load_dir(dir.path()).unwrap_err();
        assert!(matches!(&err, ContentError::Parse { file, .. } if file == PUZZLES_FILE));
        assert!(err.to_string().starts_with("malformed puzzles.json"));
    }

    #[test]
    fn validate_reports_broken_references() {
        let tree = DialogueTree::from_nodes([
            DialogueNode::new("start", "Hm?")
                .with_choice(Choice::new("Where?").with_next("nowhere"))
                .with_choice(Choice::new("Riddle").with_effect(Effect::TriggerPuzzle {
                    puzzle_id: Some(PuzzleId::new("GHOST")),
                })),
            DialogueNode::new("start", "again"),
        ]);
        let store = ContentStore::new()
            .with_dialogue("npc_orphan", tree)
            .with_dialogue("npc_empty", DialogueTree::new())
            .with_puzzle(Puzzle::new("P").with_nodes("missing_win", "missing_loss", None));

        let findings = store.validate();
        let messages: Vec<String> = findings.iter().map(|f| f.to_string()).collect();

        assert!(messages.contains(&"error: npc_orphan/start#1: next node 'nowhere' does not exist".to_string()));
        assert!(messages.contains(&"error: npc_orphan/start#2: TRIGGER_PUZZLE names unknown puzzle 'GHOST'".to_string()));
        assert!(messages.contains(&"warning: dialogue tree 'npc_orphan' has no NPC details".to_string()));
        assert!(messages.contains(&"warning: dialogue tree 'npc_empty' is empty".to_string()));
        assert!(messages.contains(&"warning: npc_orphan: duplicate node id 'start' (first one kept)".to_string()));
        assert!(messages.iter().any(|m| m.contains("outcome node 'missing_win'")));
        assert_eq!(findings.iter().filter(|f| f.is_error()).count(), 2);
    }
}
