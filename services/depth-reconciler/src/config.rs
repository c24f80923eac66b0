//! Reconciler configuration
//!
//! Loaded from JSON; every field is optional and falls back to the default.

use serde::{Deserialize, Serialize};
use types::depth::PriceLevel;

/// Errors raised while loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse reconciler config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid reconciler config: {reason}")]
    Invalid { reason: String },
}

/// Configuration for the depth reconciler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconcilerConfig {
    /// Apply netting targets to incoming snapshots. When off, match events
    /// still accumulate targets but snapshots are applied at face value.
    pub netting_enabled: bool,
    /// Reconcile only this many leading ranks per side; deeper ranks are
    /// treated as absent.
    pub max_levels: Option<usize>,
}

impl Default for ReconcilerConfig {
    fn default() -> Self {
        Self {
            netting_enabled: true,
            max_levels: None,
        }
    }
}

impl ReconcilerConfig {
    /// Parse and validate a JSON configuration document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_levels == Some(0) {
            return Err(ConfigError::Invalid {
                reason: "max_levels must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// The leading ranks of one side that take part in reconciliation.
    pub fn levels<'a>(&self, levels: &'a [PriceLevel]) -> &'a [PriceLevel] {
        match self.max_levels {
            Some(max) if max < levels.len() => &levels[..max],
            _ => levels,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::numeric::Price;

    #[test]
    fn test_defaults() {
        let config = ReconcilerConfig::default();
        assert!(config.netting_enabled);
        assert_eq!(config.max_levels, None);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = ReconcilerConfig::from_json_str(r#"{"max_levels": 5}"#).unwrap();
        assert!(config.netting_enabled);
        assert_eq!(config.max_levels, Some(5));
    }

    #[test]
    fn test_rejects_zero_levels() {
        let err = ReconcilerConfig::from_json_str(r#"{"max_levels": 0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = ReconcilerConfig::from_json_str("{netting_enabled: yes}").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_levels_truncation() {
        let levels: Vec<PriceLevel> = (0..4)
            .map(|i| PriceLevel::new(Price::from_u64(100 + i), 10))
            .collect();

        let limited = ReconcilerConfig {
            max_levels: Some(2),
            ..Default::default()
        };
        assert_eq!(limited.levels(&levels).len(), 2);
        assert_eq!(ReconcilerConfig::default().levels(&levels).len(), 4);
    }
}
