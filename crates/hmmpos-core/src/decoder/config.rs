use crate::error::{HmmError, Result};
use crate::model::FLOOR_PROBABILITY;

/// Configuration for the Viterbi decoder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecoderConfig {
    /// Probability used for any table entry absent from the model.
    pub floor: f64,
    /// Accumulate natural-log scores instead of raw probabilities.
    ///
    /// Raw products underflow to zero after a few dozen unseen tokens;
    /// log scores keep long sentences distinguishable.
    pub log_space: bool,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            floor: FLOOR_PROBABILITY,
            log_space: false,
        }
    }
}

impl DecoderConfig {
    /// Create a new decoder configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the floor probability.
    pub fn with_floor(mut self, floor: f64) -> Self {
        self.floor = floor;
        self
    }

    /// Enable or disable log-space scoring.
    pub fn with_log_space(mut self, enabled: bool) -> Self {
        self.log_space = enabled;
        self
    }

    /// Check that the floor is a usable probability.
    pub fn validate(&self) -> Result<()> {
        if self.floor > 0.0 && self.floor <= 1.0 {
            Ok(())
        } else {
            Err(HmmError::InvalidConfig(format!(
                "floor probability must be in (0, 1], got {}",
                self.floor
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DecoderConfig::new();
        assert_eq!(config.floor, 1e-7);
        assert!(!config.log_space);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = DecoderConfig::new().with_floor(1e-4).with_log_space(true);
        assert_eq!(config.floor, 1e-4);
        assert!(config.log_space);
    }

    #[test]
    fn test_validate_rejects_bad_floor() {
        for floor in [0.0, -1e-7, 1.5, f64::NAN, f64::INFINITY] {
            let err = DecoderConfig::new().with_floor(floor).validate().unwrap_err();
            assert!(matches!(err, HmmError::InvalidConfig(_)), "floor {floor}");
        }
    }
}
