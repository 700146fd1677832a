use serde::{Deserialize, Serialize};

/// Who authored a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

/// One entry in the advice-chat transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub text: String,
}

/// Caller-held, append-only chat transcript. Display state only: entries are
/// never replayed to the model and never persisted across restarts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatSession {
    pub id: String,
    pub started_at: String,
    messages: Vec<ChatMessage>,
}

impl ChatSession {
    pub fn new() -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            started_at: chrono::Utc::now().to_rfc3339(),
            messages: Vec::new(),
        }
    }

    pub fn push_user(&mut self, text: impl Into<String>) {
        self.messages.push(ChatMessage {
            role: Role::User,
            text: text.into(),
        });
    }

    pub fn push_model(&mut self, text: impl Into<String>) {
        self.messages.push(ChatMessage {
            role: Role::Model,
            text: text.into(),
        });
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transcript_preserves_append_order() {
        let mut session = ChatSession::new();
        session.push_user("How do I price a planter?");
        session.push_model("Start with three tiers.");
        session.push_user("And the ad budget?");

        let messages = session.messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0].role, Role::User);
        assert_eq!(messages[1].role, Role::Model);
        assert_eq!(messages[2].text, "And the ad budget?");
    }

    #[test]
    fn roles_serialize_lowercase() {
        let message = ChatMessage {
            role: Role::Model,
            text: "hi".to_string(),
        };
        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(value["role"], "model");
    }

    #[test]
    fn fresh_sessions_have_unique_ids() {
        let a = ChatSession::new();
        let b = ChatSession::new();
        assert_ne!(a.id, b.id);
        assert!(a.is_empty());
    }
}
