//! The game shell: owns player state and routes every inbound action.
//!
//! `GameShell` is the single owner of [`PlayerState`]. Dialogue, puzzles,
//! scenes, and markets only ever hand back notifications, which are applied
//! here in emission order.

use std::collections::BTreeMap;

use cs_core::{ContentStore, DialogueNode, Good, LocationId, PuzzleOutcome, SceneObject};
use cs_dialogue::{
    DialogueSession, Notification, PlayerState, PuzzleBridge, PuzzleReport, PuzzleRequest,
};
use tracing::{debug, info, warn};

use crate::config::ShellConfig;
use crate::error::{ShellError, ShellResult};
use crate::market::{self, Trade};
use crate::save::{self, GameSave, SaveStore};
use crate::scene;
use crate::view::{Router, View};

/// A running game.
pub struct GameShell {
    config: ShellConfig,
    content: ContentStore,
    player: PlayerState,
    router: Router,
    session: DialogueSession,
    bridge: PuzzleBridge,
    scenes: BTreeMap<LocationId, Vec<SceneObject>>,
    active_puzzle: Option<PuzzleRequest>,
    last_message: Option<String>,
    store: Option<Box<dyn SaveStore>>,
}

impl GameShell {
    /// Create a shell over loaded content with a fresh player.
    pub fn new(content: ContentStore, config: ShellConfig) -> Self {
        let player = config.new_player();
        Self {
            config,
            content,
            player,
            router: Router::new(),
            session: DialogueSession::new(),
            bridge: PuzzleBridge::new(),
            scenes: BTreeMap::new(),
            active_puzzle: None,
            last_message: None,
            store: None,
        }
    }

    /// Load content from the configured data directory.
    pub fn load(config: ShellConfig) -> ShellResult<Self> {
        let content = ContentStore::load_dir(&config.data_dir)?;
        Ok(Self::new(content, config))
    }

    /// Attach a save store.
    pub fn with_store(mut self, store: impl SaveStore + 'static) -> Self {
        self.store = Some(Box::new(store));
        self
    }

    /// Replace the player.
    pub fn with_player(mut self, player: PlayerState) -> Self {
        self.player = player;
        self
    }

    /// The configuration.
    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    /// The loaded content.
    pub fn content(&self) -> &ContentStore {
        &self.content
    }

    /// Current player state.
    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    /// The current view.
    pub fn view(&self) -> View {
        self.router.current()
    }

    /// The dialogue session.
    pub fn session(&self) -> &DialogueSession {
        &self.session
    }

    /// The dialogue node on screen, if a conversation is open.
    pub fn current_node(&self) -> Option<&DialogueNode> {
        self.session.current_node()
    }

    /// The puzzle awaiting a result.
    pub fn active_puzzle(&self) -> Option<&PuzzleRequest> {
        self.active_puzzle.as_ref()
    }

    /// The most recent message for the player.
    pub fn last_message(&self) -> Option<&str> {
        self.last_message.as_deref()
    }

    /// Take the most recent message, leaving none.
    pub fn take_message(&mut self) -> Option<String> {
        self.last_message.take()
    }

    /// Objects at a location, as changed by play so far.
    pub fn scene(&self, location_id: &str) -> ShellResult<&[SceneObject]> {
        if let Some(objects) = self.scenes.get(location_id) {
            return Ok(objects);
        }
        self.content
            .location(location_id)
            .map(|location| location.hidden_objects.as_slice())
            .ok_or_else(|| ShellError::UnknownLocation(location_id.to_string()))
    }

    /// Talk to an NPC, abandoning any conversation or puzzle in progress.
    pub fn start_dialogue(&mut self, npc_id: &str) {
        self.bridge.cancel();
        self.active_puzzle = None;
        let notifications = self.session.start(&self.content, npc_id, &self.player);
        self.dispatch(notifications);
    }

    /// Select the `index`th visible choice. Refused while a puzzle is open.
    pub fn select_choice(&mut self, index: usize) -> ShellResult<()> {
        if !self.session.is_active() {
            return Err(ShellError::NoActiveDialogue);
        }
        if let Some(pending) = self.bridge.pending() {
            return Err(ShellError::PuzzlePending(pending.puzzle_id.to_string()));
        }
        let step = self
            .session
            .choose_index(&self.content, index, &self.player)
            .ok_or(ShellError::InvalidChoice(index))?;
        let suspended = step.suspended.is_some();
        self.dispatch(step.notifications);
        // A suspended choice leaves the node on screen as it was shown.
        if !suspended {
            self.session.refresh(&self.content, &self.player);
        }
        self.autosave();
        Ok(())
    }

    /// Close the conversation and forget any pending puzzle.
    pub fn dismiss_dialogue(&mut self) {
        self.session.dismiss();
        self.bridge.cancel();
        self.active_puzzle = None;
    }

    /// Report a puzzle result. Reports for a puzzle that is not pending are
    /// ignored.
    pub fn resolve_puzzle(&mut self, puzzle_id: &str, outcome: PuzzleOutcome) {
        if self.bridge.pending().is_none_or(|p| p.puzzle_id != *puzzle_id) {
            warn!(puzzle = puzzle_id, "report for a puzzle that is not open; ignored");
            return;
        }
        let report = PuzzleReport::new(puzzle_id, outcome);
        let notifications =
            self.bridge
                .resolve(&report, &self.content, &mut self.session, &self.player);
        if self.bridge.pending().is_some() {
            return;
        }
        self.active_puzzle = None;
        self.dispatch(notifications);
        self.session.refresh(&self.content, &self.player);
        self.autosave();
    }

    /// Click a hidden object. Returns the message for the player.
    pub fn click_object(
        &mut self,
        location_id: &str,
        object_id: &str,
    ) -> ShellResult<Option<String>> {
        let location = self
            .content
            .location(location_id)
            .ok_or_else(|| ShellError::UnknownLocation(location_id.to_string()))?;
        let objects = self
            .scenes
            .entry(location.id.clone())
            .or_insert_with(|| location.hidden_objects.clone());
        let index = objects
            .iter()
            .position(|object| object.id == *object_id)
            .ok_or_else(|| ShellError::UnknownObject {
                location: location_id.to_string(),
                object: object_id.to_string(),
            })?;

        let result = scene::click(&mut objects[index], &self.player);
        let picked_up = result.notifications.iter().any(|n| {
            matches!(n, Notification::AddToInventory { item } if item.id == *object_id)
        });
        if picked_up {
            debug!(location = location_id, object = object_id, "object picked up");
            objects.remove(index);
        }

        self.dispatch(result.notifications);
        if let Some(message) = &result.message {
            self.last_message = Some(message.clone());
        }
        self.autosave();
        Ok(result.message)
    }

    /// Buy one unit of a good at a location's market.
    pub fn buy(&mut self, location_id: &str, good_id: &str) -> ShellResult<Trade> {
        let trade = market::buy(self.good(location_id, good_id)?, &self.player);
        Ok(self.settle(trade))
    }

    /// Sell one unit of a good at a location's market.
    pub fn sell(&mut self, location_id: &str, good_id: &str) -> ShellResult<Trade> {
        let trade = market::sell(self.good(location_id, good_id)?, &self.player);
        Ok(self.settle(trade))
    }

    /// Switch views by route name.
    pub fn navigate(&mut self, view: &str) -> ShellResult<View> {
        let view = self.router.navigate(view)?;
        self.autosave();
        Ok(view)
    }

    /// Write the current state to the save slot.
    pub fn save(&mut self) -> ShellResult<()> {
        let save = GameSave {
            scenes: self.scenes.clone(),
            ..GameSave::new(self.player.clone(), self.router.current())
        };
        let data = save::encode(&save, &self.config.save_key)?;
        let store = self.store.as_mut().ok_or(ShellError::NoSaveStore)?;
        store.write(&self.config.save_slot, &data)?;
        debug!(slot = %self.config.save_slot, "game saved");
        Ok(())
    }

    /// Restore state from the save slot. Returns `false` when the slot is
    /// empty.
    pub fn load_save(&mut self) -> ShellResult<bool> {
        let store = self.store.as_ref().ok_or(ShellError::NoSaveStore)?;
        let Some(data) = store.read(&self.config.save_slot)? else {
            return Ok(false);
        };
        let save = save::decode(&data, &self.config.save_key)?;

        self.dismiss_dialogue();
        self.player = save.player;
        self.router = Router::at(save.view);
        self.scenes = save.scenes;
        info!(slot = %self.config.save_slot, saved_at = %save.saved_at, "game loaded");
        Ok(true)
    }

    fn good(&self, location_id: &str, good_id: &str) -> ShellResult<&Good> {
        let location = self
            .content
            .location(location_id)
            .ok_or_else(|| ShellError::UnknownLocation(location_id.to_string()))?;
        location
            .market
            .as_ref()
            .and_then(|market| market.goods.iter().find(|good| good.good_id == good_id))
            .ok_or_else(|| ShellError::UnknownGood {
                location: location_id.to_string(),
                good: good_id.to_string(),
            })
    }

    fn settle(&mut self, trade: Trade) -> Trade {
        self.dispatch(trade.notifications.clone());
        if let Some(message) = &trade.message {
            self.last_message = Some(message.clone());
        }
        if trade.completed() {
            self.autosave();
        }
        trade
    }

    fn dispatch(&mut self, notifications: Vec<Notification>) {
        for notification in notifications {
            self.player.apply(&notification);
            match notification {
                Notification::TriggerPuzzle(trigger) => {
                    self.active_puzzle = self.bridge.request(trigger, &self.content);
                }
                Notification::Message(text) => self.last_message = Some(text),
                Notification::GameEvent { event_name, detail } => {
                    info!(event = %event_name, %detail, "game event");
                }
                _ => {}
            }
        }
    }

    fn autosave(&mut self) {
        if !self.config.autosave || self.store.is_none() {
            return;
        }
        if let Err(e) = self.save() {
            warn!(error = %e, "autosave failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::save::MemoryStore;
    use cs_core::{
        Choice, Condition, DialogueTree, Effect, Location, NpcDetails, Operator, OutcomeEffect,
        Puzzle, PuzzleId, Value,
    };

    fn content() -> ContentStore {
        let silas = DialogueTree::from_nodes([
            DialogueNode::new("start", "Ahoy, sailor.")
                .with_choice(Choice::new("Riddle me").with_effect(Effect::TriggerPuzzle {
                    puzzle_id: Some(PuzzleId::new("RIDDLE_01")),
                }))
                .with_choice(
                    Choice::new("Take the gold")
                        .with_next("thanks")
                        .with_effect(Effect::UpdateResources {
                            resources: BTreeMap::from([("gold".to_string(), 10)]),
                        })
                        .with_effect(Effect::SetGameState {
                            variable: "tookGold".into(),
                            value: Value::Boolean(true),
                        }),
                )
                .with_choice(Choice::new("Farewell")),
            DialogueNode::new("thanks", "Don't spend it all.")
                .with_choice(Choice::new("Goodbye").with_next("end"))
                .with_choice(Choice::new("About that gold...").with_condition(
                    Condition::GameState {
                        variable: "tookGold".into(),
                        operator: Operator::Eq,
                        value: Value::Boolean(true),
                    },
                )),
            DialogueNode::new("solved", "Clever one."),
            DialogueNode::new("failed", "Hah! Wrong."),
        ]);

        let mut riddle = Puzzle::new("RIDDLE_01")
            .with_description("What has keys but opens no locks?")
            .with_nodes("solved", "failed", None);
        riddle.success_effects = vec![OutcomeEffect::UpdatePlayerStat {
            stat: "silver".into(),
            change: Some(Value::Integer(5)),
            value: None,
        }];

        let port: Location = serde_json::from_str(
            r#"{"id":"port_royal","name":"Port Royal",
                "hiddenObjects":[
                    {"id":"item_rusty_key","name":"Rusty Key"},
                    {"id":"found_cache","name":"Cache","grantsResources":{"gold":50}}
                ],
                "market":{"goods":[
                    {"goodId":"rum","name":"Bottle of Rum","type":"resource","resourceType":"rum",
                     "quantity":1,"marketSellsToPlayerPrice":{"silver":5}}
                ]}}"#,
        )
        .unwrap();

        ContentStore::new()
            .with_npc(NpcDetails::new("npc_silas", "Silas"))
            .with_dialogue("npc_silas", silas)
            .with_puzzle(riddle)
            .with_location(port)
    }

    fn shell() -> GameShell {
        GameShell::new(content(), ShellConfig::default())
    }

    #[test]
    fn choices_apply_effects_and_refresh() {
        let mut shell = shell();
        shell.start_dialogue("npc_silas");
        assert_eq!(shell.current_node().unwrap().player_choices.len(), 3);

        shell.select_choice(1).unwrap();
        assert_eq!(shell.player().resource("gold"), 10);
        let node = shell.current_node().unwrap();
        assert_eq!(node.id, "thanks");
        assert_eq!(node.player_choices.len(), 2);

        shell.select_choice(0).unwrap();
        assert!(!shell.session().is_active());
    }

    #[test]
    fn choice_errors() {
        let mut shell = shell();
        assert!(matches!(
            shell.select_choice(0),
            Err(ShellError::NoActiveDialogue)
        ));
        shell.start_dialogue("npc_silas");
        assert!(matches!(
            shell.select_choice(7),
            Err(ShellError::InvalidChoice(7))
        ));
    }

    #[test]
    fn unknown_npc_leaves_a_message() {
        let mut shell = shell();
        shell.start_dialogue("npc_ghost");
        assert!(!shell.session().is_active());
        assert_eq!(
            shell.take_message().as_deref(),
            Some("Mysterious Figure has nothing to say.")
        );
        assert_eq!(shell.last_message(), None);
    }

    #[test]
    fn puzzle_round_trip() {
        let mut shell = shell();
        shell.start_dialogue("npc_silas");
        shell.select_choice(0).unwrap();

        let request = shell.active_puzzle().unwrap();
        assert_eq!(request.puzzle_id, "RIDDLE_01");
        assert_eq!(request.description, "What has keys but opens no locks?");
        assert_eq!(shell.current_node().unwrap().id, "start");

        shell.resolve_puzzle("RIDDLE_01", PuzzleOutcome::Success);
        assert!(shell.active_puzzle().is_none());
        assert_eq!(shell.player().resource("silver"), 5);
        assert_eq!(shell.current_node().unwrap().id, "solved");
    }

    #[test]
    fn mismatched_report_keeps_puzzle_open() {
        let mut shell = shell();
        shell.start_dialogue("npc_silas");
        shell.select_choice(0).unwrap();

        shell.resolve_puzzle("OTHER", PuzzleOutcome::Success);
        assert!(shell.active_puzzle().is_some());
        assert_eq!(shell.current_node().unwrap().id, "start");

        shell.dismiss_dialogue();
        assert!(shell.active_puzzle().is_none());
        shell.resolve_puzzle("RIDDLE_01", PuzzleOutcome::Success);
        assert_eq!(shell.player().resource("silver"), 0);
    }

    #[test]
    fn choices_wait_for_the_open_puzzle() {
        let mut shell = shell();
        shell.start_dialogue("npc_silas");
        shell.select_choice(0).unwrap();

        assert!(matches!(
            shell.select_choice(1),
            Err(ShellError::PuzzlePending(id)) if id == "RIDDLE_01"
        ));
        assert_eq!(shell.player().resource("gold"), 0);
        assert_eq!(shell.current_node().unwrap().id, "start");
        assert!(shell.active_puzzle().is_some());

        shell.resolve_puzzle("RIDDLE_01", PuzzleOutcome::Success);
        assert_eq!(shell.current_node().unwrap().id, "solved");
        assert!(shell.select_choice(0).is_err());
    }

    #[test]
    fn suspended_node_is_not_refiltered() {
        let dock = DialogueTree::from_nodes([DialogueNode::new("dock", "Think you're clever?")
            .with_choice(
                Choice::new("Try me")
                    .with_effect(Effect::SetGameState {
                        variable: "dared".into(),
                        value: Value::Boolean(true),
                    })
                    .with_effect(Effect::TriggerPuzzle {
                        puzzle_id: Some(PuzzleId::new("RIDDLE_01")),
                    }),
            )
            .with_choice(Choice::new("Told you so").with_condition(
                Condition::GameState {
                    variable: "dared".into(),
                    operator: Operator::Eq,
                    value: Value::Boolean(true),
                },
            ))]);
        let content = content()
            .with_npc(NpcDetails::new("npc_mara", "Mara"))
            .with_dialogue("npc_mara", dock);
        let mut shell = GameShell::new(content, ShellConfig::default());

        shell.start_dialogue("npc_mara");
        shell.select_choice(0).unwrap();
        assert_eq!(shell.player().flag("dared"), Some(&Value::Boolean(true)));
        assert_eq!(shell.current_node().unwrap().player_choices.len(), 1);

        shell.resolve_puzzle("OTHER", PuzzleOutcome::Failure);
        assert_eq!(shell.current_node().unwrap().player_choices.len(), 1);
        assert!(shell.active_puzzle().is_some());
    }

    #[test]
    fn clicking_objects() {
        let mut shell = shell();
        let message = shell.click_object("port_royal", "item_rusty_key").unwrap();
        assert_eq!(message.as_deref(), Some("You found: Rusty Key!"));
        assert!(shell.player().has_item("item_rusty_key"));
        assert_eq!(shell.scene("port_royal").unwrap().len(), 1);

        shell.click_object("port_royal", "found_cache").unwrap();
        shell.click_object("port_royal", "found_cache").unwrap();
        assert_eq!(shell.player().resource("gold"), 50);

        assert!(matches!(
            shell.click_object("port_royal", "item_rusty_key"),
            Err(ShellError::UnknownObject { .. })
        ));
        assert!(matches!(
            shell.click_object("tortuga", "x"),
            Err(ShellError::UnknownLocation(_))
        ));
    }

    #[test]
    fn trading() {
        let mut shell = shell().with_player(PlayerState::new().with_resource("silver", 7));
        let trade = shell.buy("port_royal", "rum").unwrap();
        assert!(trade.completed());
        assert_eq!(shell.player().resource("rum"), 1);
        assert_eq!(shell.player().resource("silver"), 2);

        let trade = shell.buy("port_royal", "rum").unwrap();
        assert!(!trade.completed());
        assert_eq!(
            shell.last_message(),
            Some("Not enough silver for Bottle of Rum.")
        );

        assert!(matches!(
            shell.sell("port_royal", "parrot"),
            Err(ShellError::UnknownGood { .. })
        ));
    }

    #[test]
    fn save_and_load() {
        let config = ShellConfig::default().with_autosave(false);
        let mut shell = GameShell::new(content(), config).with_store(MemoryStore::new());
        assert!(!shell.load_save().unwrap());

        shell.navigate("map").unwrap();
        shell.click_object("port_royal", "item_rusty_key").unwrap();
        shell.save().unwrap();

        shell.navigate("inventory").unwrap();
        shell.dismiss_dialogue();
        let mut restored = GameShell::new(content(), ShellConfig::default());
        restored.store = shell.store.take();
        assert!(restored.load_save().unwrap());
        assert_eq!(restored.view(), View::Map);
        assert!(restored.player().has_item("item_rusty_key"));
        assert_eq!(restored.scene("port_royal").unwrap().len(), 1);
    }

    #[test]
    fn autosave_follows_state_changes() {
        let mut shell = shell().with_store(MemoryStore::new());
        shell.start_dialogue("npc_silas");
        shell.select_choice(1).unwrap();

        let data = shell
            .store
            .as_ref()
            .and_then(|store| store.read("autosave").unwrap())
            .unwrap();
        let save = save::decode(&data, "corsair").unwrap();
        assert_eq!(save.player.resource("gold"), 10);
    }

    #[test]
    fn saving_needs_a_store() {
        let mut shell = shell();
        assert!(matches!(shell.save(), Err(ShellError::NoSaveStore)));
        shell.navigate("map").unwrap();
    }

    #[test]
    fn unknown_view_is_an_error() {
        let mut shell = shell();
        assert!(shell.navigate("tavern").is_err());
        assert_eq!(shell.view(), View::Splash);
    }
}
