//! # hmmpos Trainer
//!
//! Tooling around the core model: corpus loading, held-out evaluation,
//! model files on disk and the training pipeline behind the `hmmpos` binary.

pub mod data;
pub mod evaluate;
pub mod trainer;

pub use data::{load_corpus, parse_corpus, split_holdout};
pub use evaluate::{Evaluation, evaluate};
pub use trainer::{
    TrainingConfig, TrainingReport, default_model_path, load_model, load_tagger, run_training,
    save_model,
};
