// Configuration module

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::compression::{CompressionPreference, Flate2Codec};
use crate::constants::{DEFAULT_GZIP_THRESHOLD_BYTES, DEFAULT_MAX_DECOMPRESSED_SIZE_BYTES};
use crate::error::CompressionError;

/// Settings consumed by the content negotiator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NegotiationConfig {
    /// Payloads strictly larger than this are gzipped for capable clients (default: 4096)
    #[serde(default = "default_gzip_threshold_bytes")]
    pub gzip_threshold_bytes: usize,

    /// Preference given to units created through the negotiator (default: speed)
    #[serde(default)]
    pub compression_preference: CompressionPreference,

    /// Upper bound for a single decompression (default: 100MB)
    ///
    /// Payloads larger than this are never compressed by the negotiator.
    #[serde(default = "default_max_decompressed_size_bytes")]
    pub max_decompressed_size_bytes: usize,
}

fn default_gzip_threshold_bytes() -> usize {
    DEFAULT_GZIP_THRESHOLD_BYTES
}

fn default_max_decompressed_size_bytes() -> usize {
    DEFAULT_MAX_DECOMPRESSED_SIZE_BYTES
}

impl NegotiationConfig {
    /// Create a configuration with defaults
    pub fn new() -> Self {
        NegotiationConfig {
            gzip_threshold_bytes: default_gzip_threshold_bytes(),
            compression_preference: CompressionPreference::default(),
            max_decompressed_size_bytes: default_max_decompressed_size_bytes(),
        }
    }

    /// Same as [`Self::new`] with a different threshold
    pub fn with_threshold(gzip_threshold_bytes: usize) -> Self {
        NegotiationConfig {
            gzip_threshold_bytes,
            ..Self::new()
        }
    }

    pub fn from_yaml_with_env(yaml: &str) -> Result<Self, CompressionError> {
        // Replace ${VAR_NAME} with environment variable values
        let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
            .map_err(|e| CompressionError::InvalidConfig(e.to_string()))?;

        let mut missing = None;
        let substituted = re.replace_all(yaml, |caps: &regex::Captures| {
            let var_name = &caps[1];
            match std::env::var(var_name) {
                Ok(value) => value,
                Err(_) => {
                    if missing.is_none() {
                        missing = Some(var_name.to_string());
                    }
                    String::new()
                }
            }
        });
        if let Some(var_name) = missing {
            return Err(CompressionError::InvalidConfig(format!(
                "Environment variable '{}' is referenced but not set",
                var_name
            )));
        }

        let config: NegotiationConfig = serde_yaml::from_str(&substituted)
            .map_err(|e| CompressionError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, CompressionError> {
        let yaml = std::fs::read_to_string(path).map_err(|e| {
            CompressionError::InvalidConfig(format!("Failed to read config file: {}", e))
        })?;
        Self::from_yaml_with_env(&yaml)
    }

    pub fn validate(&self) -> Result<(), CompressionError> {
        if self.max_decompressed_size_bytes == 0 {
            return Err(CompressionError::InvalidConfig(
                "max_decompressed_size_bytes must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Codec honoring the configured size bound in both directions
    pub fn codec(&self) -> Flate2Codec {
        Flate2Codec::new(self.max_decompressed_size_bytes)
    }
}

impl Default for NegotiationConfig {
    fn default() -> Self {
        NegotiationConfig::new()
    }
}
