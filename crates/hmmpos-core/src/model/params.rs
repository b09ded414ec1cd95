use std::collections::{BTreeMap, BTreeSet};

/// Probability substituted for any initial, transition or emission entry the
/// training corpus never produced.
///
/// This is a flat floor, not additive smoothing: once floored, table rows no
/// longer sum to one. It only guarantees that no path scores exactly zero.
pub const FLOOR_PROBABILITY: f64 = 1e-7;

/// Sparse probability row keyed by tag or token.
pub type ProbabilityRow = BTreeMap<String, f64>;

/// Sparse probability table keyed by an outer tag.
pub type ProbabilityTable = BTreeMap<String, ProbabilityRow>;

/// Trained HMM parameter set.
///
/// Immutable once built. Only entries observed in training are stored;
/// absent entries are resolved by the decoder's floor probability.
#[derive(Debug, Clone, PartialEq)]
pub struct HmmParams {
    tags: Vec<String>,
    initial: ProbabilityRow,
    transition: ProbabilityTable,
    emission: ProbabilityTable,
}

impl HmmParams {
    /// Assembles a parameter set. The alphabet is sorted and deduplicated so
    /// iteration order is always lexicographic.
    pub(crate) fn from_tables(
        tags: impl IntoIterator<Item = String>,
        initial: ProbabilityRow,
        transition: ProbabilityTable,
        emission: ProbabilityTable,
    ) -> Self {
        let tags: BTreeSet<String> = tags.into_iter().collect();
        Self {
            tags: tags.into_iter().collect(),
            initial,
            transition,
            emission,
        }
    }

    /// The tag alphabet in lexicographic order.
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Number of distinct tags.
    pub fn num_tags(&self) -> usize {
        self.tags.len()
    }

    /// Position of `tag` in [`HmmParams::tags`].
    pub fn tag_index(&self, tag: &str) -> Option<usize> {
        self.tags.binary_search_by(|t| t.as_str().cmp(tag)).ok()
    }

    /// Stored probability that a sentence starts with `tag`.
    pub fn initial(&self, tag: &str) -> Option<f64> {
        self.initial.get(tag).copied()
    }

    /// Stored probability of `curr` immediately following `prev`.
    pub fn transition(&self, prev: &str, curr: &str) -> Option<f64> {
        self.transition.get(prev)?.get(curr).copied()
    }

    /// Stored probability of `tag` emitting `token`.
    pub fn emission(&self, tag: &str, token: &str) -> Option<f64> {
        self.emission.get(tag)?.get(token).copied()
    }

    pub fn initial_table(&self) -> &ProbabilityRow {
        &self.initial
    }

    pub fn transition_table(&self) -> &ProbabilityTable {
        &self.transition
    }

    pub fn emission_table(&self) -> &ProbabilityTable {
        &self.emission
    }

    /// Number of distinct tokens seen under any tag.
    pub fn vocabulary_size(&self) -> usize {
        self.emission
            .values()
            .flat_map(|row| row.keys())
            .collect::<BTreeSet<_>>()
            .len()
    }

    /// Whether `token` was emitted by any tag during training.
    pub fn is_known_token(&self, token: &str) -> bool {
        self.emission.values().any(|row| row.contains_key(token))
    }
}
