//! Chat message model and the message list sent to the language model.
//!
//! Live conversation state lives in the browser. Each request carries the
//! full history plus the idea and its documents.

use serde::{Deserialize, Serialize};

use crate::prompt::Category;
use crate::types::Timestamp;

/// Who authored a message in the client-side conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    User,
    Ai,
    /// UI-only section marker. Never forwarded to the model.
    Section,
}

/// Optional annotations the client attaches to a message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pinned: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tone: Option<String>,
}

/// One entry of the client-side conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    #[serde(rename = "type")]
    pub kind: MessageKind,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<MessageMetadata>,
}

/// The idea a conversation is about, as sent by the client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IdeaContext {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

impl IdeaContext {
    pub fn category(&self) -> Category {
        Category::from_key(self.category.as_deref())
    }
}

/// A research document attached to the idea.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentContext {
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
}

/// Role of a message in the provider's chat-completion format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A message in the provider's chat-completion format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptMessage {
    pub role: Role,
    pub content: String,
}

impl PromptMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// Build the message list for the model.
///
/// Order: system prompt, the category's opening assistant message, then the
/// conversation with `section` markers dropped.
pub fn build_prompt_messages(
    history: &[ChatMessage],
    system_prompt: &str,
    idea: &IdeaContext,
) -> Vec<PromptMessage> {
    let mut messages = Vec::with_capacity(history.len() + 2);
    messages.push(PromptMessage::new(Role::System, system_prompt));
    messages.push(PromptMessage::new(
        Role::Assistant,
        idea.category().opening_message(&idea.title),
    ));

    messages.extend(history.iter().filter_map(|msg| {
        let role = match msg.kind {
            MessageKind::User => Role::User,
            MessageKind::Ai => Role::Assistant,
            MessageKind::Section => return None,
        };
        Some(PromptMessage::new(role, msg.content.clone()))
    }));

    messages
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg(kind: MessageKind, content: &str) -> ChatMessage {
        ChatMessage {
            kind,
            content: content.to_string(),
            timestamp: None,
            metadata: None,
        }
    }

    #[test]
    fn prompt_messages_start_with_system_and_opening() {
        let idea = IdeaContext {
            title: "Seed Library".into(),
            category: Some("social".into()),
            ..Default::default()
        };
        let messages = build_prompt_messages(&[], "SYSTEM", &idea);

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0], PromptMessage::new(Role::System, "SYSTEM"));
        assert_eq!(messages[1].role, Role::Assistant);
        assert!(messages[1].content.contains("Seed Library"));
    }

    #[test]
    fn section_messages_are_dropped_and_roles_mapped() {
        let idea = IdeaContext {
            title: "X".into(),
            ..Default::default()
        };
        let history = vec![
            msg(MessageKind::User, "hello"),
            msg(MessageKind::Section, "## Vision"),
            msg(MessageKind::Ai, "hi there"),
        ];

        let messages = build_prompt_messages(&history, "S", &idea);
        let tail: Vec<(Role, &str)> = messages[2..]
            .iter()
            .map(|m| (m.role, m.content.as_str()))
            .collect();
        assert_eq!(tail, vec![(Role::User, "hello"), (Role::Assistant, "hi there")]);
    }

    #[test]
    fn chat_message_uses_type_field() {
        let json = r#"{"type":"ai","content":"ok","timestamp":"2025-07-28T12:16:58.000Z"}"#;
        let parsed: ChatMessage = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.kind, MessageKind::Ai);
        assert!(parsed.timestamp.is_some());
    }
}
