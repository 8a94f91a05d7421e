//! Chat history entries

use serde::{Deserialize, Serialize};

/// Role of a chat history entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Standing instructions, exempt from budget trimming
    System,
    /// End-user turn
    User,
    /// Model turn
    Assistant,
}

/// One chat history entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Who produced this entry
    pub role: Role,
    /// The entry text
    pub content: String,
}

impl Message {
    /// Create a system message
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Create an assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_serialize_lowercase() {
        let rendered = toml::to_string(&Message::user("hi")).unwrap();
        assert!(rendered.contains("role = \"user\""));
    }

    #[test]
    fn roles_deserialize_lowercase() {
        let message: Message = toml::from_str("role = \"assistant\"\ncontent = \"ok\"").unwrap();
        assert_eq!(message.role, Role::Assistant);
    }
}
