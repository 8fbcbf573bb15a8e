/// Tool for writing journal entries
///
/// This module implements the journal_add MCP tool.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::{Entitlement, PremiumFeature};
use crate::engine::{Clock, EngineError, ProgressionEngine};
use crate::storage::KeyValueStore;
use crate::tools::{with_unlocks, ToolError};

/// Parameters for adding a journal entry
#[derive(Debug, Deserialize, JsonSchema)]
pub struct AddJournalParams {
    /// Entry text, must not be blank
    pub content: String,
    /// Optional tags (premium only)
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct AddJournalResponse {
    pub success: bool,
    pub entry_id: String,
    pub message: String,
}

pub fn add_journal_entry<S: KeyValueStore, C: Clock>(
    engine: &mut ProgressionEngine<S, C>,
    entitlement: Entitlement,
    params: AddJournalParams,
) -> Result<AddJournalResponse, ToolError> {
    let content = params.content.trim();
    if content.is_empty() {
        return Err(ToolError::Validation(
            "Journal entry cannot be empty".to_string(),
        ));
    }

    let tags: Vec<String> = params
        .tags
        .iter()
        .map(|tag| tag.trim().to_string())
        .filter(|tag| !tag.is_empty())
        .collect();
    if !tags.is_empty() && entitlement.requires_upgrade(PremiumFeature::JournalTags) {
        return Err(EngineError::PremiumRequired(PremiumFeature::JournalTags).into());
    }

    let entry = engine.add_journal_entry(content, tags);
    let unlocks = engine.take_new_unlocks();

    let message = format!(
        "📖 Journal entry saved (+{} XP). You've written {} entr{} so far.",
        entry.xp_earned,
        engine.state().journal_entries.len(),
        if engine.state().journal_entries.len() == 1 { "y" } else { "ies" }
    );

    Ok(AddJournalResponse {
        success: true,
        entry_id: entry.id.to_string(),
        message: with_unlocks(message, &unlocks),
    })
}
