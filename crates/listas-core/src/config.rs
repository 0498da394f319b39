use crate::error::ListasError;
use serde::{Deserialize, Serialize};

/// Default similarity cutoff for fuzzy sigla matching.
pub const DEFAULT_FUZZY_CUTOFF: f64 = 0.6;

/// Default minimum word count for a token to be guessed as a candidate name.
pub const DEFAULT_MIN_NAME_WORDS: usize = 2;

/// Tunable thresholds of the extraction heuristics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Minimum similarity in `[0, 1]` for an alias to count as a fuzzy match.
    pub fuzzy_cutoff: f64,
    /// Minimum number of words for the reverse-scan name guess.
    pub min_name_words: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            fuzzy_cutoff: DEFAULT_FUZZY_CUTOFF,
            min_name_words: DEFAULT_MIN_NAME_WORDS,
        }
    }
}

impl PipelineConfig {
    pub fn validate(&self) -> Result<(), ListasError> {
        if !(0.0..=1.0).contains(&self.fuzzy_cutoff) {
            return Err(ListasError::InvalidConfig(format!(
                "fuzzy_cutoff must be within [0, 1], got {}",
                self.fuzzy_cutoff
            )));
        }
        if self.min_name_words == 0 {
            return Err(ListasError::InvalidConfig(
                "min_name_words must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.fuzzy_cutoff, 0.6);
        assert_eq!(config.min_name_words, 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: PipelineConfig = serde_json::from_str(r#"{ "fuzzy_cutoff": 0.75 }"#).unwrap();
        assert_eq!(config.fuzzy_cutoff, 0.75);
        assert_eq!(config.min_name_words, 2);
    }

    #[test]
    fn test_out_of_range_cutoff_rejected() {
        let config = PipelineConfig {
            fuzzy_cutoff: 1.5,
            ..PipelineConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_name_words_rejected() {
        let config = PipelineConfig {
            min_name_words: 0,
            ..PipelineConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
