/// Domain module containing the core entities and catalogs
///
/// This module defines the logged records (moods, journal entries, ritual
/// completions), the unlockable content (plants, achievements, themes), the
/// streak rules and the entitlement boundary.

pub mod types;
pub mod entry;
pub mod streak;
pub mod garden;
pub mod achievement;
pub mod ritual;
pub mod profile;
pub mod entitlement;

// Re-export public types for easy access
pub use types::*;
pub use entry::*;
pub use streak::*;
pub use garden::*;
pub use achievement::*;
pub use ritual::*;
pub use profile::*;
pub use entitlement::*;

use thiserror::Error;

/// Errors that can occur during domain operations
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Invalid mood: {0}")]
    InvalidMood(String),

    #[error("Unknown ritual: {0}")]
    UnknownRitual(String),

    #[error("Unknown garden theme: {0}")]
    UnknownTheme(String),
}
