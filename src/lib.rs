/// Public library interface for the MoodBloom progression engine
///
/// This module exports the engine, its persistence layer and the MCP server
/// that exposes the engine's operations as tools.

use std::path::PathBuf;
use thiserror::Error;

pub mod domain;
pub mod engine;
pub mod storage;
pub mod summary;
pub mod tools;
pub mod mcp;

// Re-export the types most callers need
pub use domain::*;
pub use engine::{AppState, Clock, EngineError, ManualClock, ProgressionEngine, SystemClock, Unlocks};
pub use storage::{KeyValueStore, MemoryStore, PersistenceGateway, SqliteStorage, StorageError};

/// Errors that can occur during server operation
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Database error: {0}")]
    Database(#[from] storage::StorageError),

    #[error("Domain validation error: {0}")]
    Domain(#[from] domain::DomainError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// The progression engine paired with the source of the premium flag
///
/// By default the engine is backed by SQLite and reads the system clock.
pub struct MoodBloomServer<S = SqliteStorage, C = SystemClock> {
    engine: ProgressionEngine<S, C>,
    entitlement: Box<dyn EntitlementSource>,
}

impl MoodBloomServer {
    /// Open (or create) the database at `db_path` and load saved progress
    pub async fn new(
        db_path: PathBuf,
        entitlement: Box<dyn EntitlementSource>,
    ) -> Result<Self, ServerError> {
        tracing::info!("Initializing MoodBloom server with database: {:?}", db_path);

        let storage = SqliteStorage::new(db_path)?;
        let engine = ProgressionEngine::load(storage, SystemClock);

        Ok(Self::with_engine(engine, entitlement))
    }
}

impl<S: KeyValueStore, C: Clock> MoodBloomServer<S, C> {
    pub fn with_engine(engine: ProgressionEngine<S, C>, entitlement: Box<dyn EntitlementSource>) -> Self {
        Self { engine, entitlement }
    }

    /// Run the MCP server, handling JSON-RPC requests over stdin/stdout
    ///
    /// This method will block until stdin closes or an error occurs.
    pub async fn run(self) -> Result<(), ServerError> {
        let state = self.engine.state();
        tracing::info!(
            "Loaded progress: {} XP, streak {}, {} mood entries",
            state.current_xp,
            state.streak.current_streak,
            state.mood_entries.len()
        );

        let mut mcp_server = mcp::McpServer::new(self);
        mcp_server.run().await?;

        Ok(())
    }

    pub fn engine(&self) -> &ProgressionEngine<S, C> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut ProgressionEngine<S, C> {
        &mut self.engine
    }

    /// The current premium flag, asked fresh on every call
    pub async fn entitlement(&self) -> Entitlement {
        self.entitlement.current().await
    }
}
