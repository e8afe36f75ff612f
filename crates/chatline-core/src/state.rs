//! UI-agnostic message types
//!
//! Shared by the transcript, the controller and whatever front end renders
//! them. Nothing here depends on a UI framework.

use serde::{Deserialize, Serialize};

/// One entry in the chat transcript
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

/// The role of a chat message sender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChatRole {
    #[serde(rename = "user")]
    User,
    #[serde(rename = "ai")]
    Assistant,
}

impl ChatRole {
    /// Label shown above the entry's text
    pub fn label(&self) -> &'static str {
        match self {
            ChatRole::User => "You:",
            ChatRole::Assistant => "AI:",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_per_role() {
        assert_eq!(ChatRole::User.label(), "You:");
        assert_eq!(ChatRole::Assistant.label(), "AI:");
    }

    #[test]
    fn test_role_serializes_as_sender_name() {
        let msg = ChatMessage {
            role: ChatRole::Assistant,
            content: "Hello!".to_string(),
        };
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["role"], "ai");
        assert_eq!(json["content"], "Hello!");

        let back: ChatRole = serde_json::from_str("\"user\"").unwrap();
        assert_eq!(back, ChatRole::User);
    }
}
