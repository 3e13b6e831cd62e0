//! Configuration schemas.
//!
//! All configuration structs are deserialized via the `config` crate from
//! TOML files and `WARDEN__*` environment variables. Each sub-module
//! represents a logical configuration section.

pub mod context;
pub mod logging;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

pub use self::context::{AuthContextConfig, ContextConfig, DestroyConfig, PathRuleConfig};
pub use self::logging::LoggingConfig;

use crate::error::AppError;

/// Separator between a context namespace and a field name in session keys.
pub const NAMESPACE_SEPARATOR: char = '/';

/// Field under which a replaced session identity records its destruction
/// deadline (Unix seconds).
pub const DESTROY_FIELD: &str = "destroy";

/// Root configuration.
///
/// Top-level deserialization target for the merged configuration
/// (default.toml + environment overlay + environment variables).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WardenConfig {
    /// Authentication contexts keyed by namespace name.
    #[serde(default)]
    pub contexts: BTreeMap<String, ContextConfig>,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl WardenConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges the default configuration with an environment-specific overlay
    /// and environment variables prefixed with `WARDEN`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("WARDEN")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let loaded: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;
        loaded.validate()?;
        Ok(loaded)
    }

    /// Parse configuration from an in-memory TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()?;

        let loaded: Self = config.try_deserialize()?;
        loaded.validate()?;
        Ok(loaded)
    }

    /// Check that every context owns a disjoint key namespace.
    ///
    /// Context keys are `"<name>/<field>"`, so a name must be non-empty and
    /// must not contain the separator; otherwise one context's prefix could
    /// be a prefix of another's.
    pub fn validate(&self) -> Result<(), AppError> {
        for name in self.contexts.keys() {
            validate_namespace(name)?;
        }

        let defaults: Vec<&str> = self
            .contexts
            .iter()
            .filter(|(_, ctx)| ctx.settings.is_default)
            .map(|(name, _)| name.as_str())
            .collect();
        if !self.contexts.is_empty() && defaults.is_empty() {
            warn!("No authentication context is marked as default");
        } else if defaults.len() > 1 {
            warn!(contexts = ?defaults, "Several authentication contexts are marked as default");
        }

        Ok(())
    }
}

/// Validate a single context namespace name.
pub fn validate_namespace(name: &str) -> Result<(), AppError> {
    if name.is_empty() {
        return Err(AppError::configuration(
            "Authentication context name must not be empty",
        ));
    }
    if name.contains(NAMESPACE_SEPARATOR) {
        return Err(AppError::configuration(format!(
            "Authentication context name '{name}' must not contain '{NAMESPACE_SEPARATOR}'"
        )));
    }
    Ok(())
}
