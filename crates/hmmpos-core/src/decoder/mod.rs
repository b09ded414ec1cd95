pub mod config;
pub mod viterbi;

pub use config::DecoderConfig;
pub use viterbi::{Decoded, ViterbiDecoder};
