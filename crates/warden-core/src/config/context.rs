//! Authentication context configuration.

use serde::{Deserialize, Serialize};

/// Time-based policy of a single authentication context.
///
/// All durations are in seconds. Any subset may be supplied in configuration;
/// omitted options fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthContextConfig {
    /// Whether this context is the fallback when several contexts exist.
    #[serde(rename = "default", default = "default_true")]
    pub is_default: bool,
    /// Absolute session lifetime measured from login.
    #[serde(default = "default_ttl")]
    pub ttl: u64,
    /// Idle expiry measured from the last authenticated read. `0` disables it.
    #[serde(default)]
    pub timeout: u64,
    /// Deferred destruction of a session identity replaced on re-login.
    #[serde(default)]
    pub destroy: DestroyConfig,
}

impl Default for AuthContextConfig {
    fn default() -> Self {
        Self {
            is_default: true,
            ttl: default_ttl(),
            timeout: 0,
            destroy: DestroyConfig::default(),
        }
    }
}

impl AuthContextConfig {
    /// Idle timeout in seconds, or `None` when idle expiry is disabled.
    pub fn idle_timeout(&self) -> Option<u64> {
        (self.timeout > 0).then_some(self.timeout)
    }
}

/// Deferred destruction settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DestroyConfig {
    /// Grace window, in seconds, during which requests still holding the
    /// previous session identity keep working after a re-login.
    #[serde(default = "default_destroy_delay")]
    pub delay: u64,
}

impl Default for DestroyConfig {
    fn default() -> Self {
        Self {
            delay: default_destroy_delay(),
        }
    }
}

/// A protected path rule as written in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathRuleConfig {
    /// Regular expression searched for anywhere in the request path.
    pub pattern: String,
    /// Roles required when the pattern matches. Empty means unprotected.
    #[serde(default)]
    pub roles: Vec<String>,
}

/// Full configuration of one named context: policy plus path rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextConfig {
    /// Time-based policy.
    #[serde(flatten)]
    pub settings: AuthContextConfig,
    /// Ordered path rules; the first matching rule wins.
    #[serde(default)]
    pub paths: Vec<PathRuleConfig>,
}

fn default_true() -> bool {
    true
}

fn default_ttl() -> u64 {
    86_400
}

fn default_destroy_delay() -> u64 {
    30
}
