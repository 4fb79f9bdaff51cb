//! Installed-name rules: `{namespace}-{kind}-{base}`.
//!
//! Every installed agent file, skill directory and workflow directory is
//! reachable by exactly one of these rules, and stripping the prefix recovers
//! the catalog base-name.

use crate::namespace::{Namespace, CANONICAL_NAMESPACE};
use std::fmt;

/// What a piece of catalog content is. Drives both file naming and
/// frontmatter identifier prefixing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentKind {
    Agent,
    Skill,
    Workflow,
    Other,
}

impl ContentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ContentKind::Agent => "agent",
            ContentKind::Skill => "skill",
            ContentKind::Workflow => "workflow",
            ContentKind::Other => "other",
        }
    }

    /// Kinds that receive a `{ns}:{kind}:` identifier in frontmatter.
    pub fn is_namespaced(self) -> bool {
        !matches!(self, ContentKind::Other)
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn prefix(namespace: &str, kind: ContentKind) -> String {
    format!("{namespace}-{kind}-")
}

/// `cpo.md` + agent + `foo` → `foo-agent-cpo.md`. `Other` names pass through.
pub fn add_name_prefix(name: &str, kind: ContentKind, namespace: &Namespace) -> String {
    if !kind.is_namespaced() {
        return name.to_string();
    }
    format!("{}{name}", prefix(namespace.as_str(), kind))
}

/// Strip a `{namespace}-{kind}-` prefix, if present.
pub fn strip_name_prefix<'a>(name: &'a str, kind: ContentKind, namespace: &Namespace) -> &'a str {
    if !kind.is_namespaced() {
        return name;
    }
    name.strip_prefix(&prefix(namespace.as_str(), kind))
        .unwrap_or(name)
}

/// Catalog (canonical) name for a base-name: `editor` → `agentic-agent-editor.md`.
pub fn canonical_name(base: &str, kind: ContentKind) -> String {
    let name = add_name_prefix(base, kind, &Namespace::canonical());
    match kind {
        ContentKind::Agent => format!("{name}.md"),
        _ => name,
    }
}

/// Installed name for an entry given either in canonical form
/// (`agentic-skill-code`) or as a bare base-name (`code`).
pub fn destination_name(entry: &str, kind: ContentKind, namespace: &Namespace) -> String {
    let base = strip_name_prefix(entry, kind, &Namespace::canonical());
    add_name_prefix(base, kind, namespace)
}

/// Base-name recovered from a canonical catalog name, `None` when the name
/// doesn't carry the canonical prefix for `kind`.
pub fn catalog_base_name(name: &str, kind: ContentKind) -> Option<&str> {
    let rest = name.strip_prefix(&prefix(CANONICAL_NAMESPACE, kind))?;
    match kind {
        ContentKind::Agent => rest.strip_suffix(".md"),
        _ => Some(rest),
    }
}
