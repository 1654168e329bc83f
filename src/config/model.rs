use serde::{Deserialize, Serialize};

/// Contract version written by `aocs init`.
pub const CONTRACT_VERSION: &str = "1.0";

/// Contract file, relative to the project root.
pub const CONTRACT_FILE: &str = ".aocs.json";

/// Agent-oriented README, relative to the project root.
pub const AGENT_README_FILE: &str = "AGENTS.md";

pub const VALID_MODES: &[&str] = &["lite", "strict"];
pub const VALID_MODULE_PATTERNS: &[&str] = &["feature", "layer", "flat"];
pub const VALID_STATE_OWNERSHIP: &[&str] = &["single-owner", "shared", "immutable"];
pub const VALID_SIDE_EFFECTS: &[&str] = &["isolated", "explicit", "unrestricted"];
pub const VALID_NAMING_SCHEMAS: &[&str] = &["camelCase", "PascalCase", "snake_case", "kebab-case"];

/// The six canonical file roles a source file may declare.
pub const CANONICAL_ROLES: &[&str] = &["entry", "service", "state", "ui", "util", "test"];

/// Enforcement mode.
///
/// `lite` checks only what a file declares; `strict` additionally requires
/// role declarations and module manifests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Lite,
    #[default]
    Strict,
}

impl Mode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lite => "lite",
            Self::Strict => "strict",
        }
    }

    #[must_use]
    pub const fn is_strict(self) -> bool {
        matches!(self, Self::Strict)
    }
}

impl std::str::FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lite" => Ok(Self::Lite),
            "strict" => Ok(Self::Strict),
            _ => Err(format!("Unknown mode: {s}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModulePattern {
    Feature,
    Layer,
    Flat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StateOwnership {
    SingleOwner,
    Shared,
    Immutable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SideEffects {
    Isolated,
    Explicit,
    Unrestricted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NamingSchema {
    #[serde(rename = "camelCase")]
    CamelCase,
    #[serde(rename = "PascalCase")]
    PascalCase,
    #[serde(rename = "snake_case")]
    SnakeCase,
    #[serde(rename = "kebab-case")]
    KebabCase,
}

/// Validated repository contract.
///
/// Only constructed from a contract that passed schema validation, so every
/// enum-valued field already holds a member of its closed set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    pub version: String,

    /// Declared languages, in contract order.
    pub languages: Vec<String>,

    pub mode: Mode,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module_pattern: Option<ModulePattern>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_ownership: Option<StateOwnership>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub side_effects: Option<SideEffects>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub naming_schema: Option<NamingSchema>,

    /// Pattern ids that stay permitted even when also forbidden.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allowed_patterns: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub forbidden_patterns: Vec<String>,

    /// Roles this project uses; empty means every canonical role.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub roles: Vec<String>,
}

impl Config {
    /// Minimal contract for the given languages and mode.
    #[must_use]
    pub fn new(languages: Vec<String>, mode: Mode) -> Self {
        Self {
            version: CONTRACT_VERSION.to_string(),
            languages,
            mode,
            module_pattern: None,
            state_ownership: None,
            side_effects: None,
            naming_schema: None,
            allowed_patterns: Vec::new(),
            forbidden_patterns: Vec::new(),
            roles: Vec::new(),
        }
    }

    /// Forbidden pattern ids that are not re-allowed by `allowedPatterns`.
    pub fn enforced_patterns(&self) -> impl Iterator<Item = &str> {
        self.forbidden_patterns
            .iter()
            .filter(|id| !self.allowed_patterns.contains(id))
            .map(String::as_str)
    }

    /// Whether `role` is permitted by this contract.
    #[must_use]
    pub fn allows_role(&self, role: &str) -> bool {
        CANONICAL_ROLES.contains(&role)
            && (self.roles.is_empty() || self.roles.iter().any(|r| r == role))
    }
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
