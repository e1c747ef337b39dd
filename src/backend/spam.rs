//! Sensitive word filter for user-submitted text

/// Error message returned when content trips the filter
pub const SENSITIVE_CONTENT: &str = "4001:sensitive content!";

/// Case-insensitive substring blocklist
#[derive(Debug, Clone, Default)]
pub struct ContentFilter {
    words: Vec<String>,
}

impl ContentFilter {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        Self { words }
    }

    /// `true` when `text` contains none of the sensitive words
    pub fn validate(&self, text: &str) -> bool {
        if self.words.is_empty() {
            return true;
        }
        let text = text.to_lowercase();
        match self.words.iter().find(|w| text.contains(w.as_str())) {
            Some(word) => {
                tracing::warn!("[Spam] Rejected content containing {:?}", word);
                false
            }
            None => true,
        }
    }
}
