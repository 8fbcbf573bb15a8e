/// MCP tools that drive the progression engine
///
/// Each tool parses its arguments, checks the preconditions the app's screens
/// would normally enforce (one mood per day, no blank journal entries, one
/// completion per ritual per day), consults the entitlement flag and then
/// calls the engine.

pub mod log;
pub mod journal;
pub mod ritual;
pub mod status;
pub mod list;
pub mod today;
pub mod update;

// Re-export tool functions for easy access
pub use log::*;
pub use journal::*;
pub use ritual::*;
pub use status::*;
pub use list::*;
pub use today::*;
pub use update::*;

use thiserror::Error;

use crate::domain::DomainError;
use crate::engine::{EngineError, Unlocks};

/// Errors a tool call can report back to the client
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Already done today: {0}")]
    AlreadyDoneToday(String),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Human-readable lines announcing fresh unlocks, empty if nothing unlocked
pub fn describe_unlocks(unlocks: &Unlocks) -> String {
    let mut lines = Vec::new();
    for achievement in &unlocks.achievements {
        lines.push(format!(
            "🏆 Achievement unlocked: {} (+{} XP)",
            achievement.title, achievement.xp_reward
        ));
    }
    for plant in &unlocks.plants {
        lines.push(format!("🌱 New plant in your garden: {}", plant.name));
    }
    lines.join("\n")
}

/// Append unlock announcements to a message
pub(crate) fn with_unlocks(message: String, unlocks: &Unlocks) -> String {
    let extra = describe_unlocks(unlocks);
    if extra.is_empty() {
        message
    } else {
        format!("{}\n\n{}", message, extra)
    }
}
