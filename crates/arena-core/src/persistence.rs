//! Saving and loading worlds as JSON.
//!
//! Saves are wrapped in a [`SaveFile`] envelope carrying the schema version
//! and a timestamp. Loading also accepts a bare [`World`] serialized
//! directly, as long as its `meta.version` matches. Exports from the browser
//! client use a different log and inventory layout and are not read here.

use std::path::Path;

use arena_types::{WORLD_VERSION, World};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Errors that can occur while saving or loading a world.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    /// Reading or writing the file failed.
    #[error("save file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The document is not a valid save.
    #[error("invalid save JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The save was written by an incompatible schema.
    #[error("save version {found} is not supported (expected {expected})")]
    VersionMismatch {
        /// Version found in the file.
        found: u32,
        /// Version this build reads.
        expected: u32,
    },
}

/// A saved game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveFile {
    /// Schema version of `world`.
    pub version: u32,
    /// When the save was written.
    pub saved_at: DateTime<Utc>,
    /// The saved world.
    pub world: World,
}

impl SaveFile {
    /// Wrap a world, stamped with the current time.
    pub fn new(world: World) -> Self {
        Self {
            version: WORLD_VERSION,
            saved_at: Utc::now(),
            world,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Document {
    Envelope(Box<SaveFile>),
    Bare(Box<World>),
}

/// Serialize a world into a save document.
pub fn to_json(world: &World) -> Result<String, PersistenceError> {
    Ok(serde_json::to_string_pretty(&SaveFile::new(world.clone()))?)
}

/// Parse a save document or a bare world.
pub fn from_json(json: &str) -> Result<World, PersistenceError> {
    let world = match serde_json::from_str::<Document>(json)? {
        Document::Envelope(save) => {
            check_version(save.version)?;
            save.world
        }
        Document::Bare(world) => *world,
    };
    check_version(world.meta.version)?;
    Ok(world)
}

fn check_version(found: u32) -> Result<(), PersistenceError> {
    if found == WORLD_VERSION {
        Ok(())
    } else {
        Err(PersistenceError::VersionMismatch {
            found,
            expected: WORLD_VERSION,
        })
    }
}

/// Write a world to `path`.
pub fn save_world(path: &Path, world: &World) -> Result<(), PersistenceError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, to_json(world)?)?;
    tracing::info!(path = %path.display(), day = world.meta.day, "saved world");
    Ok(())
}

/// Read a world from `path`.
pub fn load_world(path: &Path) -> Result<World, PersistenceError> {
    let json = std::fs::read_to_string(path)?;
    from_json(&json)
}

/// Default file name for an exported world.
pub fn export_file_name(world: &World) -> String {
    format!(
        "arena_save_day{}_seed{}.json",
        world.meta.day, world.meta.seed
    )
}
