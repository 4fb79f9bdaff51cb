use crate::error::{AgenticError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// Namespace the bundled catalog is authored in. Installed names are derived
/// by rewriting from this namespace to the user's.
pub const CANONICAL_NAMESPACE: &str = "agentic";

static NAMESPACE_RE: OnceLock<Regex> = OnceLock::new();

fn namespace_re() -> &'static Regex {
    NAMESPACE_RE.get_or_init(|| Regex::new(r"^[a-z][a-z0-9-]{1,29}$").unwrap())
}

/// Prefix applied to installed file names and colon identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Namespace(String);

impl Namespace {
    pub fn canonical() -> Self {
        Namespace(CANONICAL_NAMESPACE.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_canonical(&self) -> bool {
        self.0 == CANONICAL_NAMESPACE
    }

    /// First character upper-cased, rest untouched (`my-tools` → `My-tools`).
    pub fn capitalized(&self) -> String {
        let mut chars = self.0.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    /// Heading that delimits this namespace's section in CLAUDE.md / AGENTS.md.
    pub fn section_marker(&self) -> String {
        format!("# {} Framework", self.capitalized())
    }

    /// Default output folder name for this namespace (`_foo_output`).
    pub fn output_folder(&self) -> String {
        format!("_{}_output", self.0)
    }
}

impl Default for Namespace {
    fn default() -> Self {
        Namespace::canonical()
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Namespace {
    type Err = AgenticError;

    fn from_str(s: &str) -> Result<Self> {
        if !namespace_re().is_match(s) {
            return Err(AgenticError::InvalidNamespace(s.to_string()));
        }
        Ok(Namespace(s.to_string()))
    }
}

impl TryFrom<String> for Namespace {
    type Error = AgenticError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Namespace> for String {
    fn from(ns: Namespace) -> Self {
        ns.0
    }
}
