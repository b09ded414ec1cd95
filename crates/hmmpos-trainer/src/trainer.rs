//! Training pipeline: load a corpus, hold out a slice, estimate the model,
//! report accuracy and write the model file.

use std::path::{Path, PathBuf};

use anyhow::Context;
use hmmpos_core::{DecoderConfig, HmmParams, PosTagger, train};
use tracing::info;

use crate::data::{load_corpus, split_holdout};
use crate::evaluate::{Evaluation, evaluate};

/// Default model location under the user's data directory.
pub fn default_model_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("hmmpos")
        .join("model.json")
}

/// Configuration for a training run.
#[derive(Debug, Clone)]
pub struct TrainingConfig {
    /// Corpus file to train on
    pub corpus: PathBuf,
    /// Where the trained model is written
    pub model_path: PathBuf,
    /// Fraction of sentences held out for evaluation
    pub holdout: f64,
    /// Seed for the held-out shuffle
    pub seed: u64,
    /// Decoder settings used when evaluating
    pub decoder: DecoderConfig,
}

impl TrainingConfig {
    /// Create a configuration for `corpus` with default settings.
    pub fn new(corpus: impl Into<PathBuf>) -> Self {
        Self {
            corpus: corpus.into(),
            model_path: default_model_path(),
            holdout: 0.0,
            seed: 0,
            decoder: DecoderConfig::default(),
        }
    }

    pub fn with_model_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.model_path = path.into();
        self
    }

    /// Set the held-out fraction, clamped to `[0.0, 1.0]`.
    pub fn with_holdout(mut self, fraction: f64) -> Self {
        self.holdout = fraction.clamp(0.0, 1.0);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_decoder(mut self, decoder: DecoderConfig) -> Self {
        self.decoder = decoder;
        self
    }
}

/// Outcome of [`run_training`].
#[derive(Debug, Clone)]
pub struct TrainingReport {
    pub train_sentences: usize,
    pub holdout_sentences: usize,
    pub tags: usize,
    pub vocabulary: usize,
    pub evaluation: Option<Evaluation>,
    pub model_path: PathBuf,
}

/// Write a parameter set to disk, creating parent directories.
pub fn save_model<P: AsRef<Path>>(path: P, params: &HmmParams) -> anyhow::Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(path, params.to_bytes()?)
        .with_context(|| format!("failed to write model to {}", path.display()))?;
    info!(path = %path.display(), "model saved");
    Ok(())
}

/// Read a parameter set written by [`save_model`].
pub fn load_model<P: AsRef<Path>>(path: P) -> anyhow::Result<HmmParams> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)
        .with_context(|| format!("failed to read model from {}", path.display()))?;
    HmmParams::from_bytes(&bytes).with_context(|| format!("invalid model file {}", path.display()))
}

/// Load a model file and wrap it in a ready tagger.
pub fn load_tagger<P: AsRef<Path>>(path: P, config: DecoderConfig) -> anyhow::Result<PosTagger> {
    Ok(PosTagger::with_config(load_model(path)?, config)?)
}

/// Run a full training pass as described by `config`.
pub fn run_training(config: &TrainingConfig) -> anyhow::Result<TrainingReport> {
    if !config.corpus.exists() {
        anyhow::bail!("Training data not found: {}", config.corpus.display());
    }

    let corpus = load_corpus(&config.corpus)
        .with_context(|| format!("failed to read corpus {}", config.corpus.display()))?;
    info!(sentences = corpus.len(), "loaded training corpus");

    let (train_set, holdout) = split_holdout(corpus, config.holdout, config.seed);
    let params = train(&train_set).context("training failed")?;
    let tags = params.num_tags();
    let vocabulary = params.vocabulary_size();
    info!(sentences = train_set.len(), tags, vocabulary, "trained HMM");

    save_model(&config.model_path, &params)?;

    let evaluation = if holdout.is_empty() {
        None
    } else {
        let tagger = PosTagger::with_config(params, config.decoder)?;
        let eval = evaluate(&tagger, &holdout)?;
        info!(
            sentences = eval.sentences,
            accuracy = eval.accuracy(),
            unknown_accuracy = eval.unknown_accuracy(),
            "held-out evaluation"
        );
        Some(eval)
    };

    Ok(TrainingReport {
        train_sentences: train_set.len(),
        holdout_sentences: holdout.len(),
        tags,
        vocabulary,
        evaluation,
        model_path: config.model_path.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const CORPUS: &str = "\
the\tDET\ndog\tNOUN\nruns\tVERB\n\n\
a\tDET\ncat\tNOUN\nsleeps\tVERB\n\n\
the\tDET\ncat\tNOUN\nruns\tVERB\n\n\
a\tDET\ndog\tNOUN\nsleeps\tVERB\n";

    #[test]
    fn test_default_model_path() {
        let path = default_model_path();
        assert!(path.to_string_lossy().contains("hmmpos"));
        assert!(path.ends_with("model.json"));
    }

    #[test]
    fn test_config_builder() {
        let config = TrainingConfig::new("corpus.tsv")
            .with_model_path("out/model.json")
            .with_holdout(1.5)
            .with_seed(9);
        assert_eq!(config.holdout, 1.0);
        assert_eq!(config.seed, 9);
        assert_eq!(config.model_path, PathBuf::from("out/model.json"));
    }

    #[test]
    fn test_save_and_load_model() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("model.json");
        let corpus = vec![hmmpos_core::tagged_sentence(&[("dogs", "NOUN"), ("bark", "VERB")])];
        let params = train(&corpus).unwrap();

        save_model(&path, &params).unwrap();
        assert_eq!(load_model(&path).unwrap(), params);

        let tagger = load_tagger(&path, DecoderConfig::default()).unwrap();
        assert_eq!(tagger.predict(&["dogs", "bark"]).unwrap(), ["NOUN", "VERB"]);
    }

    #[test]
    fn test_load_corrupt_model() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        std::fs::write(&path, b"{\"format\":\"hmmpos-model\",\"version\":99,\"params\":{}}").unwrap();

        let err = load_model(&path).unwrap_err();
        assert!(format!("{err:#}").contains("unsupported model version 99"));
    }

    #[test]
    fn test_run_training() {
        let dir = tempfile::tempdir().unwrap();
        let corpus_path = dir.path().join("corpus.tsv");
        std::fs::write(&corpus_path, CORPUS).unwrap();
        let model_path = dir.path().join("model.json");

        let config = TrainingConfig::new(&corpus_path)
            .with_model_path(&model_path)
            .with_holdout(0.25)
            .with_seed(3);
        let report = run_training(&config).unwrap();

        assert_eq!(report.train_sentences, 3);
        assert_eq!(report.holdout_sentences, 1);
        assert_eq!(report.tags, 3);
        assert!(model_path.exists());

        let eval = report.evaluation.unwrap();
        assert_eq!(eval.sentences, 1);
        assert_eq!(eval.tokens, 3);
    }

    #[test]
    fn test_run_training_without_holdout() {
        let dir = tempfile::tempdir().unwrap();
        let corpus_path = dir.path().join("corpus.tsv");
        std::fs::write(&corpus_path, CORPUS).unwrap();

        let config =
            TrainingConfig::new(&corpus_path).with_model_path(dir.path().join("model.json"));
        let report = run_training(&config).unwrap();

        assert_eq!(report.train_sentences, 4);
        assert!(report.evaluation.is_none());
        assert_eq!(report.vocabulary, 6);
    }

    #[test]
    fn test_run_training_missing_corpus() {
        let dir = tempfile::tempdir().unwrap();
        let config = TrainingConfig::new(dir.path().join("missing.tsv"));
        let err = run_training(&config).unwrap_err();
        assert!(err.to_string().contains("Training data not found"));
    }

    #[test]
    fn test_run_training_empty_corpus() {
        let dir = tempfile::tempdir().unwrap();
        let corpus_path = dir.path().join("corpus.tsv");
        std::fs::write(&corpus_path, "# only comments\n").unwrap();

        let config = TrainingConfig::new(&corpus_path).with_model_path(dir.path().join("m.json"));
        let err = run_training(&config).unwrap_err();
        let root = err.downcast_ref::<hmmpos_core::HmmError>();
        assert!(matches!(root, Some(hmmpos_core::HmmError::InvalidInput(_))));
    }
}
