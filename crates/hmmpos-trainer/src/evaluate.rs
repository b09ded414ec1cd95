//! Token-level accuracy of a tagger against gold-tagged sentences.

use hmmpos_core::{PosTagger, TaggedSentence};
use tracing::debug;

/// Accuracy counters over an evaluation set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Evaluation {
    pub sentences: usize,
    pub tokens: usize,
    pub correct: usize,
    /// Tokens never emitted by any tag during training.
    pub unknown_tokens: usize,
    pub unknown_correct: usize,
}

impl Evaluation {
    /// Fraction of tokens tagged correctly, `0.0` when nothing was scored.
    pub fn accuracy(&self) -> f64 {
        ratio(self.correct, self.tokens)
    }

    /// Accuracy restricted to unknown tokens.
    pub fn unknown_accuracy(&self) -> f64 {
        ratio(self.unknown_correct, self.unknown_tokens)
    }
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 { 0.0 } else { num as f64 / den as f64 }
}

/// Tag every sentence and compare against its gold tags.
pub fn evaluate(
    tagger: &PosTagger,
    sentences: &[TaggedSentence],
) -> hmmpos_core::Result<Evaluation> {
    let params = tagger.params();
    let mut eval = Evaluation::default();

    for sentence in sentences {
        if sentence.is_empty() {
            continue;
        }

        let tokens: Vec<&str> = sentence.iter().map(|t| t.token.as_str()).collect();
        let predicted = tagger.decoder().decode(&tokens)?;

        for (gold, pred) in sentence.iter().zip(predicted) {
            let hit = gold.tag == pred;
            eval.tokens += 1;
            eval.correct += usize::from(hit);
            if !params.is_known_token(&gold.token) {
                eval.unknown_tokens += 1;
                eval.unknown_correct += usize::from(hit);
            }
        }
        eval.sentences += 1;
    }

    debug!(
        sentences = eval.sentences,
        tokens = eval.tokens,
        correct = eval.correct,
        "evaluated tagger"
    );

    Ok(eval)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hmmpos_core::tagged_sentence;

    fn corpus() -> Vec<TaggedSentence> {
        vec![
            tagged_sentence(&[("the", "DET"), ("dog", "NOUN"), ("runs", "VERB")]),
            tagged_sentence(&[("a", "DET"), ("cat", "NOUN"), ("sleeps", "VERB")]),
        ]
    }

    #[test]
    fn test_training_set_is_perfect() {
        let corpus = corpus();
        let tagger = PosTagger::train(&corpus).unwrap();
        let eval = evaluate(&tagger, &corpus).unwrap();

        assert_eq!(eval.sentences, 2);
        assert_eq!(eval.tokens, 6);
        assert_eq!(eval.correct, 6);
        assert_eq!(eval.accuracy(), 1.0);
        assert_eq!(eval.unknown_tokens, 0);
        assert_eq!(eval.unknown_accuracy(), 0.0);
    }

    #[test]
    fn test_unknown_tokens_counted() {
        let tagger = PosTagger::train(&corpus()).unwrap();
        let held = vec![
            tagged_sentence(&[("the", "DET"), ("zebra", "NOUN"), ("runs", "VERB")]),
            Vec::new(),
        ];
        let eval = evaluate(&tagger, &held).unwrap();

        assert_eq!(eval.sentences, 1);
        assert_eq!(eval.tokens, 3);
        assert_eq!(eval.unknown_tokens, 1);
        // DET -> NOUN -> VERB carries the unknown middle token.
        assert_eq!(eval.unknown_correct, 1);
        assert_eq!(eval.accuracy(), 1.0);
    }

    #[test]
    fn test_empty_evaluation() {
        let eval = Evaluation::default();
        assert_eq!(eval.accuracy(), 0.0);
    }
}
