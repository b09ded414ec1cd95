//! # HMM Trainer
//!
//! Relative-frequency estimation of initial, transition and emission
//! probabilities from tag-labelled sentences.

use std::collections::HashMap;

use tracing::debug;

use crate::error::{HmmError, Result};
use crate::model::{HmmParams, ProbabilityRow, ProbabilityTable};
use crate::types::{TaggedSentence, TaggedToken};

/// Count accumulator borrowing tokens and tags from the corpus.
///
/// Sentences can be counted in separate trainers and folded together with
/// [`Trainer::merge`] before a single [`Trainer::build`].
#[derive(Debug, Clone, Default)]
pub struct Trainer<'a> {
    unigrams: HashMap<&'a str, usize>,
    bigrams: HashMap<(&'a str, &'a str), usize>,
    // Keyed by (tag, token).
    emissions: HashMap<(&'a str, &'a str), usize>,
    starts: HashMap<&'a str, usize>,
    sentences: usize,
}

impl<'a> Trainer<'a> {
    /// Create an empty trainer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of sentences counted so far.
    pub fn sentence_count(&self) -> usize {
        self.sentences
    }

    /// Count one sentence. An empty sentence is rejected and leaves the
    /// counters untouched.
    pub fn add_sentence(&mut self, sentence: &'a [TaggedToken]) -> Result<()> {
        let Some(first) = sentence.first() else {
            return Err(HmmError::invalid_input("training sentence is empty"));
        };

        self.sentences += 1;
        *self.starts.entry(first.tag.as_str()).or_default() += 1;

        for item in sentence {
            *self.unigrams.entry(item.tag.as_str()).or_default() += 1;
            *self
                .emissions
                .entry((item.tag.as_str(), item.token.as_str()))
                .or_default() += 1;
        }

        for pair in sentence.windows(2) {
            *self
                .bigrams
                .entry((pair[0].tag.as_str(), pair[1].tag.as_str()))
                .or_default() += 1;
        }

        Ok(())
    }

    /// Fold another trainer's counts into this one.
    pub fn merge(&mut self, other: Trainer<'a>) {
        fn fold<K: std::hash::Hash + Eq>(into: &mut HashMap<K, usize>, from: HashMap<K, usize>) {
            for (key, count) in from {
                *into.entry(key).or_default() += count;
            }
        }

        fold(&mut self.unigrams, other.unigrams);
        fold(&mut self.bigrams, other.bigrams);
        fold(&mut self.emissions, other.emissions);
        fold(&mut self.starts, other.starts);
        self.sentences += other.sentences;
    }

    /// Estimate the parameter set from the accumulated counts.
    pub fn build(&self) -> Result<HmmParams> {
        if self.sentences == 0 {
            return Err(HmmError::invalid_input("training corpus is empty"));
        }

        // Every tag seen in a bigram or emission has a unigram count of at
        // least one, so none of the divisions below can hit zero.
        let total = self.sentences as f64;
        let initial: ProbabilityRow = self
            .starts
            .iter()
            .map(|(tag, &count)| (tag.to_string(), count as f64 / total))
            .collect();

        let mut transition = ProbabilityTable::new();
        for (&(prev, curr), &count) in &self.bigrams {
            let p = count as f64 / self.unigrams[prev] as f64;
            transition
                .entry(prev.to_string())
                .or_default()
                .insert(curr.to_string(), p);
        }

        let mut emission = ProbabilityTable::new();
        for (&(tag, token), &count) in &self.emissions {
            let p = count as f64 / self.unigrams[tag] as f64;
            emission
                .entry(tag.to_string())
                .or_default()
                .insert(token.to_string(), p);
        }

        debug!(
            sentences = self.sentences,
            tags = self.unigrams.len(),
            bigrams = self.bigrams.len(),
            emissions = self.emissions.len(),
            "estimated HMM parameters"
        );

        Ok(HmmParams::from_tables(
            self.unigrams.keys().map(|tag| tag.to_string()),
            initial,
            transition,
            emission,
        ))
    }
}

/// Train a parameter set from a corpus in one pass.
///
/// Fails with [`HmmError::InvalidInput`] when the corpus or any of its
/// sentences is empty.
///
/// # Examples
/// ```
/// use hmmpos_core::trainer::train;
/// use hmmpos_core::types::tagged_sentence;
///
/// let corpus = vec![tagged_sentence(&[("the", "DET"), ("dog", "NOUN")])];
/// let params = train(&corpus).unwrap();
/// assert_eq!(params.initial("DET"), Some(1.0));
/// ```
pub fn train(corpus: &[TaggedSentence]) -> Result<HmmParams> {
    if corpus.is_empty() {
        return Err(HmmError::invalid_input("training corpus is empty"));
    }
    if let Some(idx) = corpus.iter().position(|sentence| sentence.is_empty()) {
        return Err(HmmError::invalid_input(format!(
            "training sentence {idx} is empty"
        )));
    }

    let mut trainer = Trainer::new();
    for sentence in corpus {
        trainer.add_sentence(sentence)?;
    }
    trainer.build()
}
