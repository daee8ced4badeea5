use std::path::Path;

use crate::errors::BackendError;

/// Words that may not appear anywhere in a comment.
#[derive(Clone, Debug, Default)]
pub struct Blocklist {
    /// Each entry as written in the file, trimmed.
    words: Vec<String>,

    /// The same entries, lowercased for matching.
    lowercased: Vec<String>,
}

impl Blocklist {
    /// Parses a newline-delimited list. Blank lines are ignored.
    pub fn from_lines(raw: &str) -> Self {
        let words: Vec<String> = raw
            .lines()
            .map(str::trim)
            .filter(|word| !word.is_empty())
            .map(str::to_owned)
            .collect();
        let lowercased = words.iter().map(|word| word.to_lowercase()).collect();

        Blocklist { words, lowercased }
    }

    /// Reads the list from disk. The file is read on every call so that
    /// moderators can edit it without restarting the service.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, BackendError> {
        let path = path.as_ref();

        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| BackendError::BlocklistUnavailable {
                path: path.to_owned(),
                source,
            })?;

        Ok(Blocklist::from_lines(&raw))
    }

    /// Returns the first listed word contained in `content`, ignoring case.
    pub fn find_in(&self, content: &str) -> Option<&str> {
        let content = content.to_lowercase();

        self.lowercased
            .iter()
            .position(|word| content.contains(word.as_str()))
            .map(|i| self.words[i].as_str())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
