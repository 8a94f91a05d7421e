//! Token-budget enforcement for chat histories

use crate::message::{Message, Role};

/// Rough token count for a piece of text.
///
/// Four bytes per token tracks the usual byte-pair encodings closely enough
/// for budget enforcement.
pub fn estimate_tokens(text: &str) -> usize {
    text.len().div_ceil(4)
}

/// Maximum-token budget applied to a message history before each request
///
/// Trimming drops the oldest non-system messages first; system messages are
/// never dropped, even when they alone exceed the budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenBudget {
    max_tokens: usize,
}

impl TokenBudget {
    /// Create a budget with the given maximum
    pub fn new(max_tokens: usize) -> Self {
        Self { max_tokens }
    }

    /// The configured maximum
    pub fn max_tokens(&self) -> usize {
        self.max_tokens
    }

    /// Estimated token total for a history
    pub fn total(&self, messages: &[Message]) -> usize {
        messages
            .iter()
            .map(|message| estimate_tokens(&message.content))
            .sum()
    }

    /// Drop the oldest non-system messages until the history fits
    pub fn clamp(&self, messages: &mut Vec<Message>) {
        while self.total(messages) > self.max_tokens {
            let Some(oldest) = messages
                .iter()
                .position(|message| message.role != Role::System)
            else {
                break;
            };
            let dropped = messages.remove(oldest);
            log::debug!(
                "dropped {} message of ~{} tokens to fit budget",
                match dropped.role {
                    Role::User => "user",
                    Role::Assistant => "assistant",
                    Role::System => "system",
                },
                estimate_tokens(&dropped.content),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn estimate_rounds_up() {
        assert_eq!(estimate_tokens(""), 0);
        assert_eq!(estimate_tokens("abc"), 1);
        assert_eq!(estimate_tokens("abcd"), 1);
        assert_eq!(estimate_tokens("abcde"), 2);
    }

    #[test]
    fn clamp_is_a_no_op_within_budget() {
        let mut messages = vec![Message::user("short")];
        TokenBudget::new(100).clamp(&mut messages);
        assert_eq!(messages.len(), 1);
    }

    #[test]
    fn clamp_drops_oldest_non_system_first() {
        let mut messages = vec![
            Message::system("keep me"),
            Message::user("x".repeat(40)),
            Message::assistant("y".repeat(40)),
            Message::user("z".repeat(40)),
        ];
        // Budget of 15 tokens: the system message (2) plus one 10-token turn.
        TokenBudget::new(15).clamp(&mut messages);
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::System);
        assert!(messages[1].content.starts_with('z'));
    }

    #[test]
    fn system_messages_survive_an_impossible_budget() {
        let mut messages = vec![Message::system("w".repeat(400)), Message::user("hello")];
        TokenBudget::new(10).clamp(&mut messages);
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].role, Role::System);
    }
}
