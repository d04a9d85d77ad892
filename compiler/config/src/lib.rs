#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! Plugin Configuration
//!
//! The generator is configured solely through the parameter string the host compiler
//! forwards (`--twirp-swift_opt=ext=swift,models=false`). This crate parses that string
//! into a key/value map and maps the known keys onto [`PluginOptions`].
//!
//! The parameter format is a comma-separated list of `key=value` pairs. There is no
//! escaping: keys cannot contain `=` and neither keys nor values can contain `,`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// Errors that can occur while reading the parameter string
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParameterError {
    /// A comma-separated pair has no `=`
    #[error("malformed parameter `{pair}`: expected key=value")]
    MissingSeparator {
        /// The offending pair as written
        pair: String,
    },
    /// A pair has nothing before its `=`
    #[error("malformed parameter `{pair}`: empty key")]
    EmptyKey {
        /// The offending pair as written
        pair: String,
    },
    /// A known key carries a value it cannot take
    #[error("invalid value `{value}` for parameter `{key}`: {expected}")]
    InvalidValue {
        /// Parameter key
        key: String,
        /// Value as written
        value: String,
        /// What the key accepts
        expected: &'static str,
    },
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ParameterError>;

/// Parsed `key=value` pairs, iterated in key order
pub type ParameterMap = BTreeMap<String, String>;

/// Parse a parameter string such as `a=1,b=2`.
///
/// An absent or empty string yields an empty map. Every comma-separated pair must
/// contain `=`; the value is everything after the first `=`. Later duplicates
/// overwrite earlier ones.
pub fn parse_parameters(parameter: Option<&str>) -> Result<ParameterMap> {
    let mut map = ParameterMap::new();
    let parameter = match parameter {
        Some(p) if !p.is_empty() => p,
        _ => return Ok(map),
    };

    for pair in parameter.split(',') {
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| ParameterError::MissingSeparator { pair: pair.to_string() })?;
        let key = key.trim();
        if key.is_empty() {
            return Err(ParameterError::EmptyKey { pair: pair.to_string() });
        }
        map.insert(key.to_string(), value.to_string());
    }

    Ok(map)
}

/// Options recognised by the generator.
///
/// Serialized form uses the parameter keys, and missing keys take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginOptions {
    /// Extension of every generated file (`ext`)
    #[serde(rename = "ext")]
    pub target_ext: String,
    /// Emit a model file next to each stub file (`models`)
    #[serde(rename = "models")]
    pub emit_models: bool,
    /// Log level for diagnostics written to stderr (`log`)
    #[serde(rename = "log")]
    pub log_level: String,
}

impl Default for PluginOptions {
    fn default() -> Self {
        Self { target_ext: "swift".to_string(), emit_models: true, log_level: "warn".to_string() }
    }
}

impl PluginOptions {
    /// Parameter key for [`PluginOptions::target_ext`]
    pub const EXT: &'static str = "ext";
    /// Parameter key for [`PluginOptions::emit_models`]
    pub const MODELS: &'static str = "models";
    /// Parameter key for [`PluginOptions::log_level`]
    pub const LOG: &'static str = "log";

    /// Parse the raw parameter string straight into options
    pub fn from_parameter_string(parameter: Option<&str>) -> Result<Self> {
        Self::from_parameters(&parse_parameters(parameter)?)
    }

    /// Map known keys onto options; unknown keys are ignored
    pub fn from_parameters(params: &ParameterMap) -> Result<Self> {
        let mut options = Self::default();
        for (key, value) in params {
            match key.as_str() {
                Self::EXT => {
                    let ext = value.trim().trim_start_matches('.');
                    if ext.is_empty() || ext.contains('/') {
                        return Err(invalid(key, value, "a non-empty file extension"));
                    }
                    options.target_ext = ext.to_string();
                }
                Self::MODELS => options.emit_models = parse_bool(key, value)?,
                Self::LOG => {
                    let level = value.trim().to_ascii_lowercase();
                    if !matches!(level.as_str(), "trace" | "debug" | "info" | "warn" | "error" | "off")
                    {
                        return Err(invalid(key, value, "one of trace, debug, info, warn, error, off"));
                    }
                    options.log_level = level;
                }
                other => warn!(parameter = other, "ignoring unknown parameter"),
            }
        }
        Ok(options)
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(invalid(key, value, "true or false")),
    }
}

fn invalid(key: &str, value: &str, expected: &'static str) -> ParameterError {
    ParameterError::InvalidValue { key: key.to_string(), value: value.to_string(), expected }
}
