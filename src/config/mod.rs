//! Editor configuration
//!
//! Loaded from a JSON file. Every key is optional:
//!
//! ```json
//! {
//!   "default_filename": "paysrp.nben902.sccea.input",
//!   "duplicate_deduction_code": "407",
//!   "duplicate_deduction_amount": "100",
//!   "strict_widths": false,
//!   "transfer": {
//!     "host": "sft.osc.state.ny.us",
//!     "remote_dir": "/inbound/",
//!     "remote_filename": "paysrp.nben902.sccea.input",
//!     "username": "sccea_paysr",
//!     "password_env": "NBEN902_TRANSFER_PASSWORD"
//!   }
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::codec::WidthPolicy;
use crate::observability::{Event, Logger};
use crate::record::Field;
use crate::store::DuplicateOverrides;
use crate::validation::Validator;

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditorConfig {
    /// File name offered when saving a session that has no path yet
    #[serde(default = "default_filename")]
    pub default_filename: String,

    /// Deduction Code written into duplicated and imported rows
    #[serde(default = "default_deduction_code")]
    pub duplicate_deduction_code: String,

    /// Deduction Amount written into duplicated and imported rows
    #[serde(default = "default_deduction_amount")]
    pub duplicate_deduction_amount: String,

    /// Reject over-wide values on save instead of clipping them
    #[serde(default)]
    pub strict_widths: bool,

    #[serde(default)]
    pub transfer: TransferConfig,
}

/// Destination for the finished file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_remote_dir")]
    pub remote_dir: String,

    /// Name the file is given at the destination
    #[serde(default = "default_filename")]
    pub remote_filename: String,

    #[serde(default = "default_username")]
    pub username: String,

    /// Environment variable holding the password; never stored in the file
    #[serde(default = "default_password_env")]
    pub password_env: String,
}

fn default_filename() -> String {
    "paysrp.nben902.sccea.input".to_string()
}
fn default_deduction_code() -> String {
    "407".to_string()
}
fn default_deduction_amount() -> String {
    "100".to_string()
}
fn default_host() -> String {
    "sft.osc.state.ny.us".to_string()
}
fn default_remote_dir() -> String {
    "/inbound/".to_string()
}
fn default_username() -> String {
    "sccea_paysr".to_string()
}
fn default_password_env() -> String {
    "NBEN902_TRANSFER_PASSWORD".to_string()
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            remote_dir: default_remote_dir(),
            remote_filename: default_filename(),
            username: default_username(),
            password_env: default_password_env(),
        }
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            default_filename: default_filename(),
            duplicate_deduction_code: default_deduction_code(),
            duplicate_deduction_amount: default_deduction_amount(),
            strict_widths: false,
            transfer: TransferConfig::default(),
        }
    }
}

impl EditorConfig {
    /// Load configuration from file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_json_str(&content)?;

        Logger::info(
            Event::ConfigLoaded,
            &[("path", path.display().to_string().as_str())],
        );
        Ok(config)
    }

    pub fn from_json_str(content: &str) -> ConfigResult<Self> {
        let config: EditorConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `path` when given, otherwise returns the defaults.
    pub fn load_or_default(path: Option<&Path>) -> ConfigResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Override values must themselves pass field validation, otherwise every
    /// duplicated row would be rejected on save.
    fn validate(&self) -> ConfigResult<()> {
        let validator = Validator::new();

        if self.default_filename.trim().is_empty() {
            return Err(ConfigError::Invalid {
                key: "default_filename",
                reason: "must not be empty".into(),
            });
        }
        if !validator.validate(Field::DeductionCode, &self.duplicate_deduction_code)
            || self.duplicate_deduction_code.chars().count() > Field::DeductionCode.width()
        {
            return Err(ConfigError::Invalid {
                key: "duplicate_deduction_code",
                reason: format!(
                    "'{}' must be non-empty and at most {} characters",
                    self.duplicate_deduction_code,
                    Field::DeductionCode.width()
                ),
            });
        }
        if !validator.validate(Field::DeductionAmount, &self.duplicate_deduction_amount)
            || self.duplicate_deduction_amount.chars().count() > Field::DeductionAmount.width()
        {
            return Err(ConfigError::Invalid {
                key: "duplicate_deduction_amount",
                reason: format!(
                    "'{}' must be an amount greater than zero, at most {} characters",
                    self.duplicate_deduction_amount,
                    Field::DeductionAmount.width()
                ),
            });
        }
        Ok(())
    }

    pub fn duplicate_overrides(&self) -> DuplicateOverrides {
        DuplicateOverrides {
            deduction_code: self.duplicate_deduction_code.clone(),
            deduction_amount: self.duplicate_deduction_amount.clone(),
        }
    }

    pub fn width_policy(&self) -> WidthPolicy {
        if self.strict_widths {
            WidthPolicy::Reject
        } else {
            WidthPolicy::Truncate
        }
    }
}
