// ============================================================
// Layer 4 — Vocabulary
// ============================================================
// A vocabulary is a newline-delimited token file: the line number
// is the token's id. The same type serves both the word vocabulary
// (words.txt, which must carry <pad> and UNK entries) and the tag
// vocabulary (tags.txt, which gains a <pad> class if the file does
// not already provide one).

use anyhow::{anyhow, Context, Result};
use std::collections::HashMap;
use std::path::Path;

/// Reserved padding token in words.txt
pub const PAD_WORD: &str = "<pad>";

/// Reserved unknown-word token in words.txt
pub const UNK_WORD: &str = "UNK";

/// Padding class appended to the tag vocabulary when absent
pub const PAD_TAG: &str = "<pad>";

/// An immutable token ↔ id mapping loaded from disk.
#[derive(Debug, Clone)]
pub struct Vocab {
    tokens: Vec<String>,
    index:  HashMap<String, usize>,
}

impl Vocab {
    /// Load a vocabulary from a one-token-per-line file.
    /// Blank lines are skipped; ids follow file order.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot read vocabulary file '{}'", path.display()))?;

        let tokens: Vec<String> = contents
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect();

        if tokens.is_empty() {
            return Err(anyhow!("Vocabulary file '{}' is empty", path.display()));
        }

        tracing::debug!("Loaded {} tokens from '{}'", tokens.len(), path.display());
        Ok(Self::from_tokens(tokens))
    }

    /// Build a vocabulary from an in-memory token list.
    /// Duplicate tokens keep their first id.
    pub fn from_tokens(tokens: Vec<String>) -> Self {
        let mut index = HashMap::with_capacity(tokens.len());
        for (id, token) in tokens.iter().enumerate() {
            index.entry(token.clone()).or_insert(id);
        }
        Self { tokens, index }
    }

    /// Append `token` if absent, returning its id either way.
    /// Used to guarantee the tag vocabulary has a padding class.
    pub fn push_if_absent(&mut self, token: &str) -> usize {
        if let Some(&id) = self.index.get(token) {
            return id;
        }
        let id = self.tokens.len();
        self.tokens.push(token.to_string());
        self.index.insert(token.to_string(), id);
        id
    }

    /// Look up a token's id
    pub fn id(&self, token: &str) -> Option<usize> {
        self.index.get(token).copied()
    }

    /// Look up a token that the vocabulary is required to contain
    /// (reserved entries, known tag names). Fails with the token
    /// named so the message points at the broken vocabulary file.
    pub fn require(&self, token: &str) -> Result<usize> {
        self.id(token)
            .ok_or_else(|| anyhow!("Token '{}' missing from vocabulary", token))
    }

    pub fn token(&self, id: usize) -> Option<&str> {
        self.tokens.get(id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn vocab_of(tokens: &[&str]) -> Vocab {
        Vocab::from_tokens(tokens.iter().map(|t| t.to_string()).collect())
    }

    #[test]
    fn test_ids_follow_order() {
        let v = vocab_of(&["<pad>", "UNK", "the"]);
        assert_eq!(v.id("<pad>"), Some(0));
        assert_eq!(v.id("the"), Some(2));
        assert_eq!(v.id("missing"), None);
        assert_eq!(v.token(1), Some("UNK"));
    }

    #[test]
    fn test_push_if_absent() {
        let mut v = vocab_of(&["O", "B-PER"]);
        let pad = v.push_if_absent(PAD_TAG);
        assert_eq!(pad, 2);
        // A second push is a no-op
        assert_eq!(v.push_if_absent(PAD_TAG), 2);
        assert_eq!(v.len(), 3);
    }

    #[test]
    fn test_require_names_missing_token() {
        let v = vocab_of(&["O"]);
        let err = v.require("B-LOC").unwrap_err();
        assert!(err.to_string().contains("B-LOC"));
    }

    #[test]
    fn test_load_skips_blank_lines() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("words.txt");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, "<pad>\nUNK\n\nthe").unwrap();

        let v = Vocab::load(&path).unwrap();
        assert_eq!(v.len(), 3);
        assert_eq!(v.id("the"), Some(2));
    }

    #[test]
    fn test_load_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Vocab::load(&dir.path().join("nope.txt")).is_err());
    }
}
