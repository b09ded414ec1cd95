//! # Viterbi Decoding for HMM Tagging
//!
//! Exact first-order Viterbi search over a trained [`HmmParams`]. Every
//! initial, transition or emission entry missing from the model is replaced
//! by the configured floor probability, so every path keeps a non-zero score.

use std::collections::HashMap;

use tracing::trace;

use crate::decoder::config::DecoderConfig;
use crate::error::{HmmError, Result};
use crate::model::HmmParams;

/// Best tag sequence for a token sequence together with its joint score.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded<'d> {
    /// One tag per input token, in input order.
    pub tags: Vec<&'d str>,
    /// Joint probability of the path, or its natural log in log space.
    pub score: f64,
}

/// Viterbi decoder over a fixed parameter set.
///
/// Tags are iterated in the model's lexicographic order and every argmax
/// keeps the first strictly greater score, so ties resolve to the
/// lexicographically smallest tag.
#[derive(Debug, Clone)]
pub struct ViterbiDecoder {
    tags: Vec<String>,
    config: DecoderConfig,
    floor_score: f64,
    initial: Vec<f64>,
    // Row-major [prev][curr].
    transition: Vec<f64>,
    emission: HashMap<String, Vec<(usize, f64)>>,
}

/// Per-call dynamic programming table.
struct Trellis {
    width: usize,
    scores: Vec<f64>,
    backptr: Vec<usize>,
}

impl Trellis {
    fn new(len: usize, width: usize) -> Self {
        Self {
            width,
            scores: vec![f64::NEG_INFINITY; len * width],
            backptr: vec![0; len * width],
        }
    }

    fn score(&self, pos: usize, tag: usize) -> f64 {
        self.scores[pos * self.width + tag]
    }

    fn set(&mut self, pos: usize, tag: usize, score: f64, prev: usize) {
        self.scores[pos * self.width + tag] = score;
        self.backptr[pos * self.width + tag] = prev;
    }

    fn prev(&self, pos: usize, tag: usize) -> usize {
        self.backptr[pos * self.width + tag]
    }
}

impl ViterbiDecoder {
    /// Create a decoder with the default floor and probability-space scores.
    pub fn new(params: &HmmParams) -> Result<Self> {
        Self::with_config(params, DecoderConfig::default())
    }

    /// Create a decoder with an explicit configuration.
    pub fn with_config(params: &HmmParams, config: DecoderConfig) -> Result<Self> {
        config.validate()?;
        let num_tags = params.num_tags();
        if num_tags == 0 {
            return Err(HmmError::invalid_input("model has an empty tag alphabet"));
        }

        let to_score = |p: f64| if config.log_space { p.ln() } else { p };
        let lookup = |p: Option<f64>| to_score(p.unwrap_or(config.floor));
        let tags = params.tags();

        let initial = tags.iter().map(|tag| lookup(params.initial(tag))).collect();

        let mut transition = Vec::with_capacity(num_tags * num_tags);
        for prev in tags {
            for curr in tags {
                transition.push(lookup(params.transition(prev, curr)));
            }
        }

        let mut emission: HashMap<String, Vec<(usize, f64)>> = HashMap::new();
        for (tag, row) in params.emission_table() {
            let Some(idx) = params.tag_index(tag) else {
                continue;
            };
            for (token, &p) in row {
                emission
                    .entry(token.clone())
                    .or_default()
                    .push((idx, to_score(p)));
            }
        }

        Ok(Self {
            tags: tags.to_vec(),
            config,
            floor_score: to_score(config.floor),
            initial,
            transition,
            emission,
        })
    }

    /// Number of tags the decoder chooses from.
    pub fn num_tags(&self) -> usize {
        self.tags.len()
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Decode the most probable tag sequence.
    ///
    /// # Arguments
    /// * `tokens` - Non-empty token sequence
    ///
    /// # Returns
    /// One tag per token, in input order.
    pub fn decode<S: AsRef<str>>(&self, tokens: &[S]) -> Result<Vec<&str>> {
        Ok(self.decode_scored(tokens)?.tags)
    }

    /// Decode the most probable tag sequence along with its joint score.
    pub fn decode_scored<S: AsRef<str>>(&self, tokens: &[S]) -> Result<Decoded<'_>> {
        let seq_len = tokens.len();
        if seq_len == 0 {
            return Err(HmmError::invalid_input("token sequence is empty"));
        }

        let num_tags = self.tags.len();
        let mut trellis = Trellis::new(seq_len, num_tags);
        let mut emissions = vec![self.floor_score; num_tags];

        // Base case
        self.fill_emissions(tokens[0].as_ref(), &mut emissions);
        for tag in 0..num_tags {
            let score = self.extend(self.initial[tag], emissions[tag]);
            trellis.set(0, tag, score, tag);
        }

        // Forward pass
        for pos in 1..seq_len {
            self.fill_emissions(tokens[pos].as_ref(), &mut emissions);

            for curr_tag in 0..num_tags {
                let mut best_score = f64::NEG_INFINITY;
                let mut best_prev = 0;

                for prev_tag in 0..num_tags {
                    let score = self.extend(
                        self.extend(
                            trellis.score(pos - 1, prev_tag),
                            self.transition[prev_tag * num_tags + curr_tag],
                        ),
                        emissions[curr_tag],
                    );

                    if score > best_score {
                        best_score = score;
                        best_prev = prev_tag;
                    }
                }

                trellis.set(pos, curr_tag, best_score, best_prev);
            }
        }

        // Find best final tag
        let mut best_final_tag = 0;
        let mut best_final_score = f64::NEG_INFINITY;
        for tag in 0..num_tags {
            let score = trellis.score(seq_len - 1, tag);
            if score > best_final_score {
                best_final_score = score;
                best_final_tag = tag;
            }
        }

        // Backtrack
        let mut path = vec![best_final_tag; seq_len];
        for pos in (1..seq_len).rev() {
            path[pos - 1] = trellis.prev(pos, path[pos]);
        }

        trace!(
            tokens = seq_len,
            score = best_final_score,
            log_space = self.config.log_space,
            "decoded sentence"
        );

        Ok(Decoded {
            tags: path.into_iter().map(|idx| self.tags[idx].as_str()).collect(),
            score: best_final_score,
        })
    }

    fn fill_emissions(&self, token: &str, column: &mut [f64]) {
        column.fill(self.floor_score);
        if let Some(entries) = self.emission.get(token) {
            for &(tag, score) in entries {
                column[tag] = score;
            }
        }
    }

    fn extend(&self, acc: f64, factor: f64) -> f64 {
        if self.config.log_space {
            acc + factor
        } else {
            acc * factor
        }
    }
}
