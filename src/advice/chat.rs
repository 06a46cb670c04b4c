use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::json_store::{CHAT_SLOT, JsonStore};
use crate::store::schema::ChatData;

/// Appended as the assistant turn whenever the advice request fails.
pub const CHAT_FALLBACK_REPLY: &str = "Sorry, I could not get a response.";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One message in the advice conversation. Immutable once appended;
/// transcript order is insertion order.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: Role,
    pub content: String,
    pub sent_at: DateTime<Utc>,
}

/// Persisted multi-turn advice conversation. This is only the state
/// machine: `begin_send` appends the user turn and hands the question back
/// for dispatch, `complete` appends the reply (or the fixed fallback). The
/// busy flag allows exactly one outstanding request, which keeps turns from
/// reordering. The transcript is persisted after every mutation.
pub struct ChatSession {
    turns: Vec<ChatTurn>,
    busy: bool,
    store: Option<JsonStore>,
}

impl ChatSession {
    pub fn load(store: Option<JsonStore>) -> Self {
        let turns = store
            .as_ref()
            .map(|s| s.load::<ChatData>(CHAT_SLOT).turns)
            .unwrap_or_default();
        Self {
            turns,
            busy: false,
            store,
        }
    }

    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Append the user turn and return the trimmed question for dispatch.
    /// Blank or whitespace-only input is a no-op, as is any send while a
    /// request is already outstanding.
    pub fn begin_send(&mut self, question: &str) -> Option<String> {
        let question = question.trim();
        if question.is_empty() || self.busy {
            return None;
        }
        self.turns.push(ChatTurn {
            role: Role::User,
            content: question.to_string(),
            sent_at: Utc::now(),
        });
        self.busy = true;
        self.persist();
        Some(question.to_string())
    }

    /// Append the assistant turn: the server's answer on success, the fixed
    /// fallback on failure. Ignored if no request is outstanding.
    pub fn complete(&mut self, reply: Result<String, String>) {
        if !self.busy {
            return;
        }
        let content = reply.unwrap_or_else(|_| CHAT_FALLBACK_REPLY.to_string());
        self.turns.push(ChatTurn {
            role: Role::Assistant,
            content,
            sent_at: Utc::now(),
        });
        self.busy = false;
        self.persist();
    }

    fn persist(&self) {
        if let Some(ref store) = self.store {
            let _ = store.save(
                CHAT_SLOT,
                &ChatData {
                    turns: self.turns.clone(),
                    ..ChatData::default()
                },
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_blank_question_is_a_no_op() {
        let mut chat = ChatSession::load(None);
        assert!(chat.begin_send("").is_none());
        assert!(chat.begin_send("   ").is_none());
        assert!(chat.turns().is_empty());
        assert!(!chat.is_busy());
    }

    #[test]
    fn test_send_appends_user_then_assistant_in_order() {
        let mut chat = ChatSession::load(None);
        let question = chat.begin_send("How can I improve?").unwrap();
        assert_eq!(question, "How can I improve?");
        assert_eq!(chat.turns().len(), 1);
        assert_eq!(chat.turns()[0].role, Role::User);
        assert!(chat.is_busy());

        // Reply resolves later; still exactly one assistant turn, after the
        // user turn.
        chat.complete(Ok("Study a little every day.".to_string()));
        assert_eq!(chat.turns().len(), 2);
        assert_eq!(chat.turns()[1].role, Role::Assistant);
        assert_eq!(chat.turns()[1].content, "Study a little every day.");
        assert!(!chat.is_busy());
    }

    #[test]
    fn test_busy_flag_blocks_overlapping_sends() {
        let mut chat = ChatSession::load(None);
        chat.begin_send("first").unwrap();
        assert!(chat.begin_send("second").is_none());
        assert_eq!(chat.turns().len(), 1);

        chat.complete(Ok("ok".to_string()));
        assert!(chat.begin_send("second").is_some());
    }

    #[test]
    fn test_failure_appends_fixed_fallback() {
        let mut chat = ChatSession::load(None);
        chat.begin_send("help").unwrap();
        chat.complete(Err("connection refused".to_string()));
        assert_eq!(chat.turns()[1].content, CHAT_FALLBACK_REPLY);
        assert_eq!(chat.turns()[1].role, Role::Assistant);
    }

    #[test]
    fn test_complete_without_outstanding_request_is_ignored() {
        let mut chat = ChatSession::load(None);
        chat.complete(Ok("stray".to_string()));
        assert!(chat.turns().is_empty());
    }

    #[test]
    fn test_question_is_trimmed() {
        let mut chat = ChatSession::load(None);
        let question = chat.begin_send("  why?  ").unwrap();
        assert_eq!(question, "why?");
        assert_eq!(chat.turns()[0].content, "why?");
    }

    #[test]
    fn test_transcript_restored_across_reload() {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();

        let mut chat = ChatSession::load(Some(store.clone()));
        chat.begin_send("hello").unwrap();
        chat.complete(Ok("hi".to_string()));

        let reloaded = ChatSession::load(Some(store));
        assert_eq!(reloaded.turns().len(), 2);
        assert_eq!(reloaded.turns()[0].content, "hello");
        assert!(!reloaded.is_busy());
    }
}
