//! In-memory transcript of a single chat session.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Assistant,
}

impl Sender {
    pub fn label(&self) -> &'static str {
        match self {
            Sender::User => "You",
            Sender::Assistant => "Agent",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub sender: Sender,
    pub text: String,
}

impl fmt::Display for Turn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.sender.label(), self.text)
    }
}

/// Append-only list of turns.
#[derive(Debug, Clone, Default)]
pub struct Conversation {
    turns: Vec<Turn>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, sender: Sender, text: impl Into<String>) {
        self.turns.push(Turn { sender, text: text.into() });
    }

    /// Records a user message and the reply it produced.
    pub fn record_exchange(&mut self, question: &str, reply: &str) {
        self.push(Sender::User, question);
        self.push(Sender::Assistant, reply);
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exchanges_keep_order() {
        let mut convo = Conversation::new();
        assert!(convo.is_empty());

        convo.record_exchange("hi", "You said → hi");
        convo.record_exchange("weather?", "Sunny");

        let rendered: Vec<String> = convo.turns().iter().map(Turn::to_string).collect();
        assert_eq!(
            rendered,
            ["You: hi", "Agent: You said → hi", "You: weather?", "Agent: Sunny"]
        );
        assert_eq!(convo.len(), 4);
    }
}
