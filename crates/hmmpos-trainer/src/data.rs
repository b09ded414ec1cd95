//! Corpus loading for tag-labelled training data.
//!
//! One `token<TAB>tag` pair per line, a blank line between sentences, and
//! `#` comment lines ignored.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use hmmpos_core::{TaggedSentence, TaggedToken};
use tracing::warn;

/// Load a corpus file.
pub fn load_corpus<P: AsRef<Path>>(path: P) -> std::io::Result<Vec<TaggedSentence>> {
    let file = File::open(path)?;
    parse_corpus(BufReader::new(file))
}

/// Parse a corpus from any buffered reader.
pub fn parse_corpus<R: BufRead>(reader: R) -> std::io::Result<Vec<TaggedSentence>> {
    let mut sentences = Vec::new();
    let mut current = Vec::new();

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();

        if line.is_empty() {
            if !current.is_empty() {
                sentences.push(std::mem::take(&mut current));
            }
            continue;
        }

        if line.starts_with('#') {
            continue;
        }

        match split_pair(line) {
            Some((token, tag)) => current.push(TaggedToken::new(token, tag)),
            None => warn!(line = line_no + 1, content = line, "skipping malformed corpus line"),
        }
    }

    // Don't forget the last sentence
    if !current.is_empty() {
        sentences.push(current);
    }

    Ok(sentences)
}

fn split_pair(line: &str) -> Option<(&str, &str)> {
    if let Some((token, tag)) = line.split_once('\t') {
        let (token, tag) = (token.trim(), tag.trim());
        return (!token.is_empty() && !tag.is_empty() && !tag.contains('\t')).then_some((token, tag));
    }

    let mut parts = line.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(token), Some(tag), None) => Some((token, tag)),
        _ => None,
    }
}

/// Shuffle with a fixed seed and split off `fraction` of the sentences as a
/// held-out set. The training side always keeps at least one sentence.
pub fn split_holdout(
    mut corpus: Vec<TaggedSentence>,
    fraction: f64,
    seed: u64,
) -> (Vec<TaggedSentence>, Vec<TaggedSentence>) {
    let fraction = fraction.clamp(0.0, 1.0);
    if fraction == 0.0 || corpus.len() < 2 {
        return (corpus, Vec::new());
    }

    let mut rng = oorandom::Rand64::new(u128::from(seed));
    for i in (1..corpus.len()).rev() {
        let j = rng.rand_range(0..(i as u64 + 1)) as usize;
        corpus.swap(i, j);
    }

    let held = ((corpus.len() as f64 * fraction).round() as usize).min(corpus.len() - 1);
    let holdout = corpus.split_off(corpus.len() - held);
    (corpus, holdout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};

    const SAMPLE: &str = "# toy corpus\n\
        the\tDET\n\
        dog\tNOUN\n\
        runs\tVERB\n\
        \n\
        \n\
        a\tDET\n\
        cat\tNOUN\n\
        this line is malformed\n\
        sleeps VERB\n";

    fn numbered(n: usize) -> Vec<TaggedSentence> {
        (0..n)
            .map(|i| vec![TaggedToken::new(format!("w{i}"), "X")])
            .collect()
    }

    #[test]
    fn test_parse_corpus() {
        let corpus = parse_corpus(Cursor::new(SAMPLE)).unwrap();

        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus[0].len(), 3);
        assert_eq!(corpus[0][1], TaggedToken::new("dog", "NOUN"));
        assert_eq!(corpus[1].len(), 3);
        assert_eq!(corpus[1][2], TaggedToken::new("sleeps", "VERB"));
    }

    #[test]
    fn test_parse_keeps_case() {
        let corpus = parse_corpus(Cursor::new("The\tDET\nDog\tNOUN\n")).unwrap();
        assert_eq!(corpus[0][0].token, "The");
    }

    #[test]
    fn test_parse_empty() {
        let corpus = parse_corpus(Cursor::new("# nothing\n\n\n")).unwrap();
        assert!(corpus.is_empty());
    }

    #[test]
    fn test_load_corpus_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let corpus = load_corpus(file.path()).unwrap();
        assert_eq!(corpus.len(), 2);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_corpus(dir.path().join("missing.tsv")).is_err());
    }

    #[test]
    fn test_split_is_seeded() {
        let (train_a, held_a) = split_holdout(numbered(20), 0.25, 7);
        let (train_b, held_b) = split_holdout(numbered(20), 0.25, 7);

        assert_eq!(train_a.len(), 15);
        assert_eq!(held_a.len(), 5);
        assert_eq!(train_a, train_b);
        assert_eq!(held_a, held_b);
    }

    #[test]
    fn test_split_partitions_corpus() {
        let (train, held) = split_holdout(numbered(10), 0.3, 42);
        let mut all: Vec<String> = train
            .iter()
            .chain(held.iter())
            .map(|s| s[0].token.clone())
            .collect();
        all.sort();
        let mut expected: Vec<String> = (0..10).map(|i| format!("w{i}")).collect();
        expected.sort();
        assert_eq!(all, expected);
    }

    #[test]
    fn test_split_edge_fractions() {
        let (train, held) = split_holdout(numbered(4), 0.0, 1);
        assert_eq!((train.len(), held.len()), (4, 0));
        assert_eq!(train, numbered(4));

        let (train, held) = split_holdout(numbered(4), 1.0, 1);
        assert_eq!((train.len(), held.len()), (1, 3));

        let (train, held) = split_holdout(numbered(1), 0.5, 1);
        assert_eq!((train.len(), held.len()), (1, 0));
    }
}
