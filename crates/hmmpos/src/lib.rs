//! # hmmpos
//!
//! Hidden Markov Model part-of-speech tagging. Re-exports the core model
//! and decoder together with the corpus and training tooling.
//!
//! ```rust
//! use hmmpos::{PosTagger, tagged_sentence};
//!
//! let corpus = vec![tagged_sentence(&[("dogs", "NOUN"), ("bark", "VERB")])];
//! let tagger = PosTagger::train(&corpus).unwrap();
//! assert_eq!(tagger.predict(&["dogs", "bark"]).unwrap(), ["NOUN", "VERB"]);
//! ```

pub use hmmpos_core::*;
pub use hmmpos_trainer as tooling;
