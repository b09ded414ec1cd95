//! # POS Tagger
//!
//! Owns a trained parameter set together with a ready decoder, covering the
//! train / predict / persist cycle in one type.

use crate::decoder::{DecoderConfig, ViterbiDecoder};
use crate::error::{HmmError, Result};
use crate::model::HmmParams;
use crate::trainer::train;
use crate::types::TaggedSentence;

/// Trained HMM part-of-speech tagger.
#[derive(Debug, Clone)]
pub struct PosTagger {
    params: HmmParams,
    decoder: ViterbiDecoder,
}

impl PosTagger {
    /// Train a tagger with the default decoder configuration.
    pub fn train(corpus: &[TaggedSentence]) -> Result<Self> {
        Self::train_with_config(corpus, DecoderConfig::default())
    }

    /// Train a tagger with an explicit decoder configuration.
    pub fn train_with_config(corpus: &[TaggedSentence], config: DecoderConfig) -> Result<Self> {
        Self::with_config(train(corpus)?, config)
    }

    /// Wrap an existing parameter set.
    pub fn from_params(params: HmmParams) -> Result<Self> {
        Self::with_config(params, DecoderConfig::default())
    }

    /// Wrap an existing parameter set with an explicit decoder configuration.
    pub fn with_config(params: HmmParams, config: DecoderConfig) -> Result<Self> {
        let decoder = ViterbiDecoder::with_config(&params, config)?;
        Ok(Self { params, decoder })
    }

    pub fn params(&self) -> &HmmParams {
        &self.params
    }

    pub fn decoder(&self) -> &ViterbiDecoder {
        &self.decoder
    }

    /// Predict one tag per token.
    pub fn predict<S: AsRef<str>>(&self, tokens: &[S]) -> Result<Vec<String>> {
        Ok(self
            .decoder
            .decode(tokens)?
            .into_iter()
            .map(str::to_string)
            .collect())
    }

    /// Split `text` on whitespace and pair every token with its tag.
    ///
    /// # Examples
    /// ```
    /// use hmmpos_core::{PosTagger, tagged_sentence};
    ///
    /// let corpus = vec![tagged_sentence(&[("dogs", "NOUN"), ("bark", "VERB")])];
    /// let tagger = PosTagger::train(&corpus).unwrap();
    ///
    /// let pairs = tagger.tag_text("  dogs   bark ").unwrap();
    /// assert_eq!(pairs[1], ("bark".to_string(), "VERB".to_string()));
    /// ```
    pub fn tag_text(&self, text: &str) -> Result<Vec<(String, String)>> {
        let tokens: Vec<&str> = text.split_whitespace().collect();
        if tokens.is_empty() {
            return Err(HmmError::invalid_input("input is empty or whitespace-only"));
        }

        let tags = self.decoder.decode(&tokens)?;
        Ok(tokens
            .into_iter()
            .zip(tags)
            .map(|(token, tag)| (token.to_string(), tag.to_string()))
            .collect())
    }

    /// Encode the parameter set as an opaque, versioned blob.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        self.params.to_bytes()
    }

    /// Restore a tagger from a blob produced by [`PosTagger::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_params(HmmParams::from_bytes(bytes)?)
    }
}
