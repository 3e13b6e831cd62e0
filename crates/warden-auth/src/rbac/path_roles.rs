//! Ordered pattern → role-set rules.

use regex::Regex;

use warden_core::config::PathRuleConfig;
use warden_core::error::{AppError, ErrorKind};
use warden_core::types::{Role, RoleSet};

/// One protected-path rule.
#[derive(Debug, Clone)]
pub struct PathRule {
    /// Compiled pattern, searched anywhere in the path.
    pattern: Regex,
    /// Roles required when the pattern matches.
    roles: RoleSet,
}

impl PathRule {
    /// Compile a rule. Fails with a configuration error on a malformed pattern.
    pub fn new<I, R>(pattern: &str, roles: I) -> Result<Self, AppError>
    where
        I: IntoIterator<Item = R>,
        R: Into<Role>,
    {
        let compiled = Regex::new(pattern).map_err(|e| {
            AppError::with_source(
                ErrorKind::Configuration,
                format!("Invalid path pattern '{pattern}': {e}"),
                e,
            )
        })?;

        Ok(Self {
            pattern: compiled,
            roles: roles.into_iter().map(Into::into).collect(),
        })
    }

    /// The source pattern.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Roles required by this rule.
    pub fn roles(&self) -> &RoleSet {
        &self.roles
    }

    /// Whether the pattern occurs in `path`.
    pub fn matches(&self, path: &str) -> bool {
        self.pattern.is_match(path)
    }
}

/// Path rules evaluated in declaration order; the first match wins.
///
/// A matching rule with an empty role set marks the path as explicitly
/// unprotected and stops evaluation.
#[derive(Debug, Clone, Default)]
pub struct PathRoleMap {
    rules: Vec<PathRule>,
}

impl PathRoleMap {
    /// Compile `(pattern, roles)` pairs in declaration order, failing on the
    /// first malformed pattern. An empty list protects nothing.
    pub fn new<I, P, R, N>(rules: I) -> Result<Self, AppError>
    where
        I: IntoIterator<Item = (P, R)>,
        P: AsRef<str>,
        R: IntoIterator<Item = N>,
        N: Into<Role>,
    {
        let rules = rules
            .into_iter()
            .map(|(pattern, roles)| PathRule::new(pattern.as_ref(), roles))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { rules })
    }

    /// Compile configured rules, failing on the first malformed pattern.
    pub fn from_config(rules: &[PathRuleConfig]) -> Result<Self, AppError> {
        Self::new(
            rules
                .iter()
                .map(|rule| (rule.pattern.as_str(), rule.roles.iter().map(String::as_str))),
        )
    }

    /// Append a rule after the existing ones.
    pub fn with_rule<I, R>(mut self, pattern: &str, roles: I) -> Result<Self, AppError>
    where
        I: IntoIterator<Item = R>,
        R: Into<Role>,
    {
        self.rules.push(PathRule::new(pattern, roles)?);
        Ok(self)
    }

    /// Roles required by `path`: those of the first matching rule, or an
    /// empty set if no rule matches.
    pub fn roles_for(&self, path: &str) -> RoleSet {
        self.rules
            .iter()
            .find(|rule| rule.matches(path))
            .map(|rule| rule.roles.clone())
            .unwrap_or_default()
    }

    /// Whether `path` requires at least one role.
    pub fn is_protected(&self, path: &str) -> bool {
        !self.roles_for(path).is_empty()
    }

    /// Rules in evaluation order.
    pub fn iter(&self) -> impl Iterator<Item = &PathRule> {
        self.rules.iter()
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether there are no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
