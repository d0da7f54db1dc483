//! Greetings in the supported languages.

use serde::{Deserialize, Serialize};

/// Greeting language.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Ko,
    #[default]
    En,
}

impl Language {
    /// Wire codes of every supported language.
    pub const CODES: [&'static str; 2] = ["ko", "en"];

    /// Greet `name` in this language.
    pub fn greet(self, name: &str) -> String {
        match self {
            Language::Ko => format!("안녕하세요, {name}님!"),
            Language::En => format!("Hey there, {name}! 👋 Nice to meet you!"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn korean_greeting() {
        assert_eq!(Language::Ko.greet("민수"), "안녕하세요, 민수님!");
    }

    #[test]
    fn english_is_default() {
        assert_eq!(
            Language::default().greet("Alice"),
            "Hey there, Alice! 👋 Nice to meet you!"
        );
    }
}
