//! # hmmpos Core
//!
//! Hidden Markov Model part-of-speech tagging: relative-frequency training
//! of initial, transition and emission tables, and exact Viterbi decoding
//! with a fixed floor probability for anything the corpus never showed.
//!
//! ## Quick Start
//!
//! ```rust
//! use hmmpos_core::{PosTagger, tagged_sentence};
//!
//! let corpus = vec![
//!     tagged_sentence(&[("the", "DET"), ("dog", "NOUN"), ("runs", "VERB")]),
//!     tagged_sentence(&[("a", "DET"), ("cat", "NOUN"), ("sleeps", "VERB")]),
//! ];
//! let tagger = PosTagger::train(&corpus).unwrap();
//!
//! assert_eq!(tagger.predict(&["the", "cat", "runs"]).unwrap(), ["DET", "NOUN", "VERB"]);
//! ```
pub mod decoder;
pub mod error;
pub mod model;
pub mod tagger;
pub mod trainer;
pub mod types;

// Re-export primary API
pub use decoder::{Decoded, DecoderConfig, ViterbiDecoder};
pub use error::{HmmError, Result};
pub use model::{FLOOR_PROBABILITY, HmmParams, MODEL_FORMAT_VERSION};
pub use tagger::PosTagger;
pub use trainer::{Trainer, train};
pub use types::{TaggedSentence, TaggedToken, tagged_sentence};
