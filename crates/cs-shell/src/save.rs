//! Save-state encoding and storage.
//!
//! A save is the JSON of a [`GameSave`], XOR-ed with a key, followed by a
//! big-endian 32-bit additive checksum of the XOR-ed bytes, all hex-encoded.
//! The checksum catches corruption and casual edits; the XOR only keeps the
//! text from being trivially readable.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use cs_core::{LocationId, SceneObject};
use cs_dialogue::PlayerState;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{SaveError, SaveResult};
use crate::view::View;

/// Everything persisted between sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSave {
    /// Player state.
    pub player: PlayerState,
    /// View the player was on.
    pub view: View,
    /// When the save was written.
    pub saved_at: DateTime<Utc>,
    /// Scene objects that have been changed by play, per location.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub scenes: BTreeMap<LocationId, Vec<SceneObject>>,
}

impl GameSave {
    /// Snapshot state now.
    pub fn new(player: PlayerState, view: View) -> Self {
        Self {
            player,
            view,
            saved_at: Utc::now(),
            scenes: BTreeMap::new(),
        }
    }
}

/// Encode a save.
pub fn encode(save: &GameSave, key: &str) -> SaveResult<String> {
    let mut bytes = serde_json::to_vec(save)?;
    xor(&mut bytes, key.as_bytes());
    let sum = checksum(&bytes);
    bytes.extend_from_slice(&sum.to_be_bytes());
    Ok(hex::encode(bytes))
}

/// Decode a save, rejecting bad hex, a bad checksum, or bad JSON.
pub fn decode(data: &str, key: &str) -> SaveResult<GameSave> {
    let mut bytes = hex::decode(data.trim())?;
    if bytes.len() < 4 {
        return Err(SaveError::Truncated);
    }
    let tail = bytes.split_off(bytes.len() - 4);
    let stored = u32::from_be_bytes([tail[0], tail[1], tail[2], tail[3]]);
    let computed = checksum(&bytes);
    if stored != computed {
        return Err(SaveError::ChecksumMismatch { stored, computed });
    }
    xor(&mut bytes, key.as_bytes());
    Ok(serde_json::from_slice(&bytes)?)
}

fn xor(bytes: &mut [u8], key: &[u8]) {
    if key.is_empty() {
        return;
    }
    for (byte, k) in bytes.iter_mut().zip(key.iter().cycle()) {
        *byte ^= k;
    }
}

fn checksum(bytes: &[u8]) -> u32 {
    bytes
        .iter()
        .fold(0u32, |sum, &b| sum.wrapping_add(u32::from(b)))
}

/// A key-value store for encoded saves.
pub trait SaveStore {
    /// Read a slot. `None` when the slot is empty.
    fn read(&self, slot: &str) -> SaveResult<Option<String>>;

    /// Write a slot, replacing its contents.
    fn write(&mut self, slot: &str, data: &str) -> SaveResult<()>;

    /// Empty a slot. Emptying an empty slot is not an error.
    fn remove(&mut self, slot: &str) -> SaveResult<()>;
}

/// In-memory save slots.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slots: HashMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl SaveStore for MemoryStore {
    fn read(&self, slot: &str) -> SaveResult<Option<String>> {
        Ok(self.slots.get(slot).cloned())
    }

    fn write(&mut self, slot: &str, data: &str) -> SaveResult<()> {
        self.slots.insert(slot.to_string(), data.to_string());
        Ok(())
    }

    fn remove(&mut self, slot: &str) -> SaveResult<()> {
        self.slots.remove(slot);
        Ok(())
    }
}

/// Save slots as `<slot>.save` files in a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Store slots under `dir`, created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the slot files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, slot: &str) -> PathBuf {
        self.dir.join(format!("{slot}.save"))
    }
}

impl SaveStore for FileStore {
    fn read(&self, slot: &str) -> SaveResult<Option<String>> {
        let path = self.path(slot);
        match fs::read_to_string(&path) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(SaveError::Io { path, source }),
        }
    }

    fn write(&mut self, slot: &str, data: &str) -> SaveResult<()> {
        let path = self.path(slot);
        fs::create_dir_all(&self.dir).map_err(|source| SaveError::Io {
            path: self.dir.clone(),
            source,
        })?;
        fs::write(&path, data).map_err(|source| SaveError::Io {
            path: path.clone(),
            source,
        })?;
        debug!(path = %path.display(), bytes = data.len(), "save written");
        Ok(())
    }

    fn remove(&mut self, slot: &str) -> SaveResult<()> {
        let path = self.path(slot);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(SaveError::Io { path, source }),
        }
    }
}
