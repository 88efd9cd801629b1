use crate::core::digest::DigestAlgorithm;
use crate::core::file::DEFAULT_BUFFER_SIZE;
use crate::core::gzip::DEFAULT_LEVEL;
use crate::utils::error::{KitError, Result};
use crate::utils::validation::{validate_positive_number, validate_range, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct KitConfig {
    pub digest: DigestConfig,
    pub archive: ArchiveConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DigestConfig {
    pub algorithm: String,
}

impl Default for DigestConfig {
    fn default() -> Self {
        Self {
            algorithm: DigestAlgorithm::Sha256.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchiveConfig {
    pub compression_level: u32,
    pub buffer_size: usize,
    pub include_root: bool,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            compression_level: DEFAULT_LEVEL,
            buffer_size: DEFAULT_BUFFER_SIZE,
            include_root: false,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub json: bool,
}

impl KitConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content)?;

        toml::from_str(&processed).map_err(|e| KitError::Config {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are left as is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| KitError::Config {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.into_owned())
    }

    pub fn digest_algorithm(&self) -> Result<DigestAlgorithm> {
        self.digest.algorithm.parse().map_err(|e: KitError| KitError::Config {
            field: "digest.algorithm".to_string(),
            message: e.to_string(),
        })
    }

    pub fn validate_config(&self) -> Result<()> {
        self.digest_algorithm()?;

        validate_range("archive.compression_level", self.archive.compression_level, 0, 9)?;
        validate_positive_number("archive.buffer_size", self.archive.buffer_size, 1)?;

        if let Some(level) = &self.logging.level {
            if !LOG_LEVELS.contains(&level.to_ascii_lowercase().as_str()) {
                return Err(KitError::Config {
                    field: "logging.level".to_string(),
                    message: format!(
                        "Unsupported level {:?}. Valid levels: {}",
                        level,
                        LOG_LEVELS.join(", ")
                    ),
                });
            }
        }

        Ok(())
    }
}

impl Validate for KitConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
