// ============================================================
// Layer 4 — Split Loader
// ============================================================
// Reads one split of the corpus from disk. A split is a directory
// holding two aligned files:
//
//   <data_dir>/<split>/sentences.txt   one sentence per line,
//                                      whitespace-tokenised words
//   <data_dir>/<split>/labels.txt      one tag per word, same
//                                      line and token order
//
// Words are encoded against the word vocabulary with UNK fallback;
// tags must all be known — an unknown tag means the tag vocabulary
// and the labels file disagree, which is a data bug, not something
// to paper over.
//
// Reference: Rust Book §9 (Error Handling)

use anyhow::{anyhow, ensure, Context, Result};
use std::path::Path;

use crate::data::dataset::TagSample;
use crate::data::vocab::{Vocab, UNK_WORD};

/// Read and encode one split of the corpus.
/// Sequences longer than `max_len` tokens are truncated.
pub fn read_split(
    data_dir: &Path,
    split:    &str,
    words:    &Vocab,
    tags:     &Vocab,
    max_len:  usize,
) -> Result<Vec<TagSample>> {
    let split_dir      = data_dir.join(split);
    let sentences_path = split_dir.join("sentences.txt");
    let labels_path    = split_dir.join("labels.txt");

    let sentences = std::fs::read_to_string(&sentences_path)
        .with_context(|| format!("Cannot read '{}'", sentences_path.display()))?;
    let labels = std::fs::read_to_string(&labels_path)
        .with_context(|| format!("Cannot read '{}'", labels_path.display()))?;

    let unk = words.require(UNK_WORD)
        .with_context(|| "Word vocabulary is missing the reserved UNK entry")?;

    let mut samples = Vec::new();

    for (line_no, (sentence, label_line)) in
        sentences.lines().zip(labels.lines()).enumerate()
    {
        let tokens: Vec<&str> = sentence.split_whitespace().collect();
        let tag_names: Vec<&str> = label_line.split_whitespace().collect();

        if tokens.is_empty() {
            continue;
        }

        ensure!(
            tokens.len() == tag_names.len(),
            "Line {} of '{}': {} words but {} tags",
            line_no + 1,
            split,
            tokens.len(),
            tag_names.len(),
        );

        let token_ids: Vec<usize> = tokens
            .iter()
            .take(max_len)
            .map(|t| words.id(t).unwrap_or(unk))
            .collect();

        let tag_ids: Vec<usize> = tag_names
            .iter()
            .take(max_len)
            .map(|t| {
                tags.id(t).ok_or_else(|| {
                    anyhow!(
                        "Line {} of '{}': unknown tag '{}'",
                        line_no + 1, split, t
                    )
                })
            })
            .collect::<Result<_>>()?;

        samples.push(TagSample { tokens: token_ids, tags: tag_ids });
    }

    ensure!(
        !samples.is_empty(),
        "Split '{}' under '{}' contains no sentences",
        split,
        data_dir.display(),
    );

    tracing::info!("Loaded {} sentences from the '{}' split", samples.len(), split);
    Ok(samples)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::vocab::Vocab;
    use std::fs;

    fn write_split(dir: &Path, sentences: &str, labels: &str) {
        let split = dir.join("test");
        fs::create_dir_all(&split).unwrap();
        fs::write(split.join("sentences.txt"), sentences).unwrap();
        fs::write(split.join("labels.txt"), labels).unwrap();
    }

    fn vocabs() -> (Vocab, Vocab) {
        let words = Vocab::from_tokens(
            ["<pad>", "UNK", "john", "lives", "here"]
                .iter().map(|t| t.to_string()).collect(),
        );
        let tags = Vocab::from_tokens(
            ["O", "B-PER"].iter().map(|t| t.to_string()).collect(),
        );
        (words, tags)
    }

    #[test]
    fn test_encodes_words_and_tags() {
        let dir = tempfile::tempdir().unwrap();
        write_split(dir.path(), "john lives here\n", "B-PER O O\n");
        let (words, tags) = vocabs();

        let samples = read_split(dir.path(), "test", &words, &tags, 64).unwrap();
        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].tokens, vec![2, 3, 4]);
        assert_eq!(samples[0].tags, vec![1, 0, 0]);
    }

    #[test]
    fn test_unknown_word_maps_to_unk() {
        let dir = tempfile::tempdir().unwrap();
        write_split(dir.path(), "zanzibar lives\n", "O O\n");
        let (words, tags) = vocabs();

        let samples = read_split(dir.path(), "test", &words, &tags, 64).unwrap();
        assert_eq!(samples[0].tokens, vec![1, 3]); // UNK id is 1
    }

    #[test]
    fn test_unknown_tag_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        write_split(dir.path(), "john\n", "B-GEO\n");
        let (words, tags) = vocabs();

        let err = read_split(dir.path(), "test", &words, &tags, 64).unwrap_err();
        assert!(err.to_string().contains("B-GEO"));
    }

    #[test]
    fn test_misaligned_line_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        write_split(dir.path(), "john lives\n", "O\n");
        let (words, tags) = vocabs();

        assert!(read_split(dir.path(), "test", &words, &tags, 64).is_err());
    }

    #[test]
    fn test_truncates_to_max_len() {
        let dir = tempfile::tempdir().unwrap();
        write_split(dir.path(), "john lives here\n", "O O O\n");
        let (words, tags) = vocabs();

        let samples = read_split(dir.path(), "test", &words, &tags, 2).unwrap();
        assert_eq!(samples[0].tokens.len(), 2);
        assert_eq!(samples[0].tags.len(), 2);
    }

    #[test]
    fn test_missing_split_dir_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let (words, tags) = vocabs();
        assert!(read_split(dir.path(), "test", &words, &tags, 64).is_err());
    }
}
