use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{Level, Question};

/// Serialized snapshot of an in-flight practice question.
///
/// This mirrors the live session state so the store can serialize it without
/// leaking storage concerns into the domain layer. One draft exists per
/// practice type; it is overwritten on every input change and answer check,
/// and deleted when advancing to a new question. Its presence at mount time
/// suppresses proficiency-based re-leveling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionDraft {
    pub level: Level,
    pub question: Question,
    pub input: String,
    pub message: String,
    pub scoring_suppressed: bool,
    pub saved_at: DateTime<Utc>,
}
