// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type consistency enforcement policy.
//!
//! Relaxations of the assignability rules a reader may opt into. The
//! default is strict.
//!
//! With the `config-loaders` feature the policy can be read from YAML:
//!
//! ```yaml
//! type_consistency:
//!   ignore_member_names: true
//!   ignore_string_bounds: false
//! ```

#[cfg(feature = "config-loaders")]
use serde::Deserialize;
#[cfg(feature = "config-loaders")]
use std::fmt;
#[cfg(feature = "config-loaders")]
use std::path::Path;

/// Relaxations applied by the assignability engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "config-loaders", derive(Deserialize))]
#[cfg_attr(feature = "config-loaders", serde(default))]
pub struct TypeConsistencyEnforcement {
    /// Match struct and union members by id only
    pub ignore_member_names: bool,
    /// Skip the bound check on string key members
    pub ignore_string_bounds: bool,
    /// Skip the bound check on sequence and map key members
    pub ignore_sequence_bounds: bool,
}

impl TypeConsistencyEnforcement {
    pub fn strict() -> Self {
        Self::default()
    }

    pub fn with_ignore_member_names(mut self, ignore: bool) -> Self {
        self.ignore_member_names = ignore;
        self
    }

    pub fn with_ignore_string_bounds(mut self, ignore: bool) -> Self {
        self.ignore_string_bounds = ignore;
        self
    }

    pub fn with_ignore_sequence_bounds(mut self, ignore: bool) -> Self {
        self.ignore_sequence_bounds = ignore;
        self
    }
}

/// Root YAML document
#[cfg(feature = "config-loaders")]
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigDocument {
    type_consistency: TypeConsistencyEnforcement,
}

#[cfg(feature = "config-loaders")]
impl TypeConsistencyEnforcement {
    /// Parse the `type_consistency` section of a YAML document.
    ///
    /// A document without the section yields the strict default.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let doc: ConfigDocument = serde_yaml::from_str(yaml)?;
        log::debug!("[ASSIGNABILITY] Loaded type consistency policy: {:?}", doc.type_consistency);
        Ok(doc.type_consistency)
    }

    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }
}

/// Configuration loading errors
#[cfg(feature = "config-loaders")]
#[derive(Debug)]
pub enum ConfigError {
    /// File could not be read
    Io(std::io::Error),
    /// YAML parsing failed
    Parse(serde_yaml::Error),
}

#[cfg(feature = "config-loaders")]
impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "I/O error: {}", e),
            ConfigError::Parse(e) => write!(f, "YAML parse error: {}", e),
        }
    }
}

#[cfg(feature = "config-loaders")]
impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
        }
    }
}

#[cfg(feature = "config-loaders")]
impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

#[cfg(feature = "config-loaders")]
impl From<serde_yaml::Error> for ConfigError {
    fn from(e: serde_yaml::Error) -> Self {
        ConfigError::Parse(e)
    }
}
