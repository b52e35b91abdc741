pub mod check;
pub mod npcs;
pub mod talk;
pub mod tree;

use std::path::Path;

use cs_core::ContentStore;

/// Load every content file in `dir`.
fn load_content(dir: &Path) -> Result<ContentStore, String> {
    ContentStore::load_dir(dir).map_err(|e| e.to_string())
}

/// Split a `name=value` argument.
fn split_pair(raw: &str) -> Result<(&str, &str), String> {
    raw.split_once('=')
        .filter(|(name, _)| !name.is_empty())
        .ok_or_else(|| format!("expected NAME=VALUE, got \"{raw}\""))
}
