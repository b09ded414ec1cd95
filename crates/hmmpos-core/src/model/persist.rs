//! Versioned encoding of [`HmmParams`].
//!
//! The blob is a JSON envelope holding a format marker, a version number and
//! the four tables. The on-disk shape is declared here separately from the
//! in-memory struct so either can change without silently breaking the other.

use serde::{Deserialize, Serialize};

use crate::error::{HmmError, Result};
use crate::model::params::{HmmParams, ProbabilityRow, ProbabilityTable};

/// Marker stored in every encoded model.
pub const MODEL_FORMAT: &str = "hmmpos-model";

/// Version written by [`HmmParams::to_bytes`] and the only one accepted by
/// [`HmmParams::from_bytes`].
pub const MODEL_FORMAT_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct Envelope<P> {
    format: String,
    version: u32,
    params: P,
}

#[derive(Serialize)]
struct ParamsV1Ref<'a> {
    tags: &'a [String],
    initial: &'a ProbabilityRow,
    transition: &'a ProbabilityTable,
    emission: &'a ProbabilityTable,
}

#[derive(Deserialize)]
struct ParamsV1 {
    tags: Vec<String>,
    initial: ProbabilityRow,
    transition: ProbabilityTable,
    emission: ProbabilityTable,
}

impl HmmParams {
    /// Encodes the parameter set as an opaque, versioned blob.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let envelope = Envelope {
            format: MODEL_FORMAT.to_string(),
            version: MODEL_FORMAT_VERSION,
            params: ParamsV1Ref {
                tags: self.tags(),
                initial: self.initial_table(),
                transition: self.transition_table(),
                emission: self.emission_table(),
            },
        };
        Ok(serde_json::to_vec(&envelope)?)
    }

    /// Restores a parameter set written by [`HmmParams::to_bytes`].
    ///
    /// The restored value compares equal to the encoded one, float for float.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let envelope: Envelope<serde_json::Value> = serde_json::from_slice(bytes)?;

        if envelope.format != MODEL_FORMAT {
            return Err(HmmError::model_load(format!(
                "unknown format marker {:?}",
                envelope.format
            )));
        }
        if envelope.version != MODEL_FORMAT_VERSION {
            return Err(HmmError::model_load(format!(
                "unsupported model version {} (expected {})",
                envelope.version, MODEL_FORMAT_VERSION
            )));
        }

        let raw: ParamsV1 = serde_json::from_value(envelope.params)?;
        validate(&raw)?;

        Ok(HmmParams::from_tables(
            raw.tags,
            raw.initial,
            raw.transition,
            raw.emission,
        ))
    }
}

fn validate(raw: &ParamsV1) -> Result<()> {
    if raw.tags.is_empty() {
        return Err(HmmError::model_load("tag alphabet is empty"));
    }
    if let Some(pair) = raw.tags.windows(2).find(|pair| pair[0] >= pair[1]) {
        return Err(HmmError::model_load(format!(
            "tag alphabet is not strictly sorted at {:?}",
            pair[1]
        )));
    }

    let known = |tag: &str| raw.tags.binary_search_by(|t| t.as_str().cmp(tag)).is_ok();
    let check_tag = |table: &str, tag: &str| {
        if known(tag) {
            Ok(())
        } else {
            Err(HmmError::model_load(format!(
                "{table} table references unknown tag {tag:?}"
            )))
        }
    };

    for (tag, &p) in &raw.initial {
        check_tag("initial", tag)?;
        check_probability("initial", p)?;
    }
    for (prev, row) in &raw.transition {
        check_tag("transition", prev)?;
        for (curr, &p) in row {
            check_tag("transition", curr)?;
            check_probability("transition", p)?;
        }
    }
    for (tag, row) in &raw.emission {
        check_tag("emission", tag)?;
        for &p in row.values() {
            check_probability("emission", p)?;
        }
    }

    Ok(())
}

fn check_probability(table: &str, p: f64) -> Result<()> {
    if p > 0.0 && p <= 1.0 {
        Ok(())
    } else {
        Err(HmmError::model_load(format!(
            "{table} table holds out-of-range probability {p}"
        )))
    }
}
