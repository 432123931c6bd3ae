//! Ordered literal substitutions applied to relative paths
//!
//! Every rule runs over the whole string produced by the previous rule, so
//! the order of the list is significant: `ArguAdmin` has to be rewritten
//! before the bare `Argu` rule gets a chance to see it.

use serde::{
    Deserialize,
    Serialize,
};

use crate::error::{
    AuditError,
    AuditResult,
};

/// A single case-sensitive literal replacement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameRule {
    /// Substring to look for
    pub from: String,
    /// Replacement text
    pub to:   String,
}

impl RenameRule {
    /// Create a new rule
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to:   to.into(),
        }
    }

    /// Replace every non-overlapping occurrence of `from`, scanning left to right
    pub fn apply(&self, input: &str) -> String {
        input.replace(&self.from, &self.to)
    }

    /// Byte-level counterpart of [`RenameRule::apply`] for names that are not UTF-8
    pub fn apply_bytes(&self, input: &[u8]) -> Vec<u8> {
        let from = self.from.as_bytes();
        if from.is_empty() {
            return input.to_vec();
        }

        let mut out = Vec::with_capacity(input.len());
        let mut rest = input;
        while let Some(pos) = rest.windows(from.len()).position(|window| window == from) {
            out.extend_from_slice(&rest[..pos]);
            out.extend_from_slice(self.to.as_bytes());
            rest = &rest[pos + from.len()..];
        }
        out.extend_from_slice(rest);
        out
    }
}

/// Ordered list of [`RenameRule`]s
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RenameRules {
    rules: Vec<RenameRule>,
}

impl RenameRules {
    /// Build a rule set, rejecting rules with an empty pattern
    pub fn new(rules: Vec<RenameRule>) -> AuditResult<Self> {
        if let Some(index) = rules.iter().position(|rule| rule.from.is_empty()) {
            return Err(AuditError::Config(format!(
                "rename rule #{} has an empty 'from' pattern",
                index + 1
            )));
        }
        Ok(Self { rules })
    }

    /// The rules, in application order
    pub fn rules(&self) -> &[RenameRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Run every rule in order, each over the full output of the previous one
    pub fn apply(&self, input: &str) -> String {
        self.rules
            .iter()
            .fold(input.to_string(), |current, rule| rule.apply(&current))
    }

    /// Same as [`RenameRules::apply`], over raw bytes
    pub fn apply_bytes(&self, input: &[u8]) -> Vec<u8> {
        self.rules
            .iter()
            .fold(input.to_vec(), |current, rule| rule.apply_bytes(&current))
    }
}

impl Default for RenameRules {
    fn default() -> Self {
        Self {
            rules: vec![
                RenameRule::new("ArguAdmin", "DebateAdmin"),
                RenameRule::new("ArguUser", "DebateUser"),
                RenameRule::new("argu", "debate"),
                RenameRule::new("Argu", "Debate"),
            ],
        }
    }
}
