//! Scripted guru chat: the message log and the canned reply pool.

use serde::Serialize;

use crate::prng::Prng;
use crate::time::ClockTime;

/// The closed set of assistant replies. Choice is uniform; order carries no meaning.
pub const CANNED_RESPONSES: [&str; 10] = [
    "Thank you for sharing. Let's explore this together through mindful practice.",
    "Your awareness is beautiful. How does this make you feel in your body?",
    "Remember to breathe deeply. Every breath is a new beginning.",
    "That's a wonderful insight. Trust your inner wisdom to guide you.",
    "Let's approach this with compassion for yourself. You are exactly where you need to be.",
    "Consider taking a moment to sit in stillness with this feeling.",
    "Your practice is a journey, not a destination. Be patient with yourself.",
    "How might we bring more presence to this situation?",
    "I sense your dedication to growth. What does your heart tell you?",
    "Let's honor this moment with gratitude for your willingness to explore.",
];

pub fn pick_response(rng: &mut Prng) -> &'static str {
    CANNED_RESPONSES[rng.gen_range_usize(0, CANNED_RESPONSES.len())]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Author {
    User,
    Assistant,
}

impl Author {
    /// Styling hook on the message element.
    pub fn css_class(self) -> &'static str {
        match self {
            Author::User => "user-message",
            Author::Assistant => "guru-message",
        }
    }

    /// Font Awesome icon shown in the avatar.
    pub fn icon_class(self) -> &'static str {
        match self {
            Author::User => "fa-user",
            Author::Assistant => "fa-om",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub text: String,
    pub author: Author,
    pub timestamp: ClockTime,
}

impl ChatMessage {
    pub fn timestamp_label(&self) -> String {
        self.timestamp.to_string()
    }
}

/// Append-only message log plus the contents of the input field.
#[derive(Debug, Clone, Default)]
pub struct ChatLog {
    messages: Vec<ChatMessage>,
    input: String,
}

impl ChatLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: &str) {
        self.input.clear();
        self.input.push_str(text);
    }

    /// Takes the trimmed input for sending. Leaves whitespace-only input in
    /// place and returns `None`.
    pub fn take_input(&mut self) -> Option<String> {
        let trimmed = self.input.trim();
        if trimmed.is_empty() {
            return None;
        }
        let text = trimmed.to_string();
        self.input.clear();
        Some(text)
    }

    pub fn push(&mut self, message: ChatMessage) -> &ChatMessage {
        self.messages.push(message);
        &self.messages[self.messages.len() - 1]
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_pool_is_ten_distinct_lines() {
        let mut v: Vec<&str> = CANNED_RESPONSES.to_vec();
        v.sort_unstable();
        v.dedup();
        assert_eq!(v.len(), 10);
        assert!(v.iter().all(|s| !s.trim().is_empty()));
    }

    #[test]
    fn picks_cover_the_pool() {
        let mut rng = Prng::new(3);
        let mut seen = [false; 10];
        for _ in 0..500 {
            let r = pick_response(&mut rng);
            let i = CANNED_RESPONSES.iter().position(|c| *c == r).unwrap();
            seen[i] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn blank_input_is_kept() {
        let mut log = ChatLog::new();
        log.set_input("   ");
        assert_eq!(log.take_input(), None);
        assert_eq!(log.input(), "   ");
    }

    #[test]
    fn input_is_trimmed_and_cleared() {
        let mut log = ChatLog::new();
        log.set_input("  hello \n");
        assert_eq!(log.take_input().as_deref(), Some("hello"));
        assert_eq!(log.input(), "");
    }

    #[test]
    fn author_hooks() {
        assert_eq!(Author::User.css_class(), "user-message");
        assert_eq!(Author::Assistant.css_class(), "guru-message");
        assert_eq!(Author::Assistant.icon_class(), "fa-om");
    }
}
