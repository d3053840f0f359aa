//! Error types for the arena runner binary.
//!
//! [`EngineError`] wraps every failure that can stop a headless run, so
//! `main` can propagate with `?`.

/// Top-level error for the arena runner.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: arena_core::ConfigError,
    },

    /// Building or validating the map failed.
    #[error("world error: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: arena_world::WorldError,
    },

    /// Writing the final save failed.
    #[error("persistence error: {source}")]
    Persistence {
        /// The underlying persistence error.
        #[from]
        source: arena_core::PersistenceError,
    },
}
