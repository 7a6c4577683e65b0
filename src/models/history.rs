//! Generation history entries.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Mode;

/// Maximum number of entries kept in the session history.
pub const HISTORY_CAPACITY: usize = 20;

/// Record of one completed generation. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct HistoryEntry {
    pub id: String,
    /// Creation time, milliseconds since the Unix epoch.
    pub timestamp: i64,
    /// Image reference shown in the history strip.
    pub thumbnail: String,
    /// Prompt snapshot at generation time.
    pub prompt: String,
    pub attachments: Vec<String>,
    /// Mode active when the entry was created.
    pub mode: Mode,
}

impl HistoryEntry {
    /// Create an entry with a fresh UUIDv4 id stamped with the current time.
    pub fn new(thumbnail: impl Into<String>, prompt: impl Into<String>, mode: Mode) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            timestamp: chrono::Utc::now().timestamp_millis(),
            thumbnail: thumbnail.into(),
            prompt: prompt.into(),
            attachments: Vec::new(),
            mode,
        }
    }
}

/// Prepend `entry` to `history` and truncate to [`HISTORY_CAPACITY`].
///
/// Eviction is by position, not timestamp: the entries inserted earliest fall
/// off the end.
pub fn prepend_capped(history: &[HistoryEntry], entry: HistoryEntry) -> Vec<HistoryEntry> {
    let mut next = Vec::with_capacity(HISTORY_CAPACITY.min(history.len() + 1));
    next.push(entry);
    next.extend(
        history
            .iter()
            .take(HISTORY_CAPACITY.saturating_sub(1))
            .cloned(),
    );
    next
}
