//! Game shell for Corsair.
//!
//! Owns the player's state and turns inbound actions (talking, choosing,
//! finishing puzzles, clicking scene objects, trading, navigating) into
//! notifications from the dialogue engine and the scene and market rules,
//! applying each one in order. State can be saved to an obfuscated,
//! checksummed slot.

pub mod config;
pub mod error;
pub mod market;
pub mod save;
pub mod scene;
pub mod shell;
pub mod view;

pub use config::ShellConfig;
pub use error::{SaveError, SaveResult, ShellError, ShellResult};
pub use market::Trade;
pub use save::{FileStore, GameSave, MemoryStore, SaveStore};
pub use scene::ClickResult;
pub use shell::GameShell;
pub use view::{Router, View};
