use unicode_normalization::UnicodeNormalization;

/// A user question normalized for trigger matching
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub original: String,
    pub text: String,
}

impl Question {
    pub fn new(raw: &str) -> Self {
        Self {
            original: raw.to_string(),
            text: Self::normalize(raw),
        }
    }

    /// Whether any phrase occurs as a substring of the normalized text
    pub fn contains_any(&self, phrases: &[&str]) -> bool {
        phrases.iter().any(|phrase| self.text.contains(phrase))
    }

    fn normalize(text: &str) -> String {
        text.nfkc()
            .filter(|c| !c.is_control())
            .collect::<String>()
            .to_lowercase()
    }
}

/// Remove every occurrence of each phrase, in the given order
pub fn strip_phrases(text: &str, phrases: &[&str]) -> String {
    phrases
        .iter()
        .fold(text.to_string(), |acc, phrase| acc.replace(phrase, ""))
}

/// Remove whole words, leaving words that merely contain them alone
pub fn strip_words(text: &str, words: &[&str]) -> String {
    text.split(' ')
        .filter(|word| !words.contains(word))
        .collect::<Vec<_>>()
        .join(" ")
}
