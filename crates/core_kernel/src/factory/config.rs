//! Factory configuration

use serde::Deserialize;

/// Tunables for entity resolution
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FactoryConfig {
    /// Maximum depth of nested field resolution before giving up
    pub max_depth: usize,
    /// Separator used when joining unique-field values into a natural key
    pub key_separator: String,
}

impl Default for FactoryConfig {
    fn default() -> Self {
        Self {
            max_depth: 16,
            key_separator: " ".to_string(),
        }
    }
}

impl FactoryConfig {
    /// Loads configuration from `FACTORY_*` environment variables
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("FACTORY"))
            .build()?
            .try_deserialize()
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FactoryConfig::default();
        assert_eq!(config.max_depth, 16);
        assert_eq!(config.key_separator, " ");
    }

    #[test]
    fn test_from_env_falls_back_to_defaults() {
        let config = FactoryConfig::from_env().unwrap();
        assert_eq!(config.key_separator, FactoryConfig::default().key_separator);
    }
}
