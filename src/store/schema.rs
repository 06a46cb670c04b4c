use serde::{Deserialize, Serialize};

use crate::advice::chat::ChatTurn;
use crate::store::history::PredictionRecord;

pub const SCHEMA_VERSION: u32 = 1;

fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

/// Persisted prediction log. Record order on disk is insertion order.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HistoryData {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub records: Vec<PredictionRecord>,
}

impl Default for HistoryData {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            records: Vec::new(),
        }
    }
}

/// Persisted advice-conversation transcript.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChatData {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub turns: Vec<ChatTurn>,
}

impl Default for ChatData {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            turns: Vec::new(),
        }
    }
}

/// Small persisted flags: dark mode and the local session identity label.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionData {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    #[serde(default)]
    pub dark_mode: bool,
    #[serde(default)]
    pub current_user: Option<String>,
}

impl Default for SessionData {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            dark_mode: false,
            current_user: None,
        }
    }
}
