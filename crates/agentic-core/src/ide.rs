use crate::error::{AgenticError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

// ---------------------------------------------------------------------------
// TargetIde
// ---------------------------------------------------------------------------

/// One of the two integrations that receive installed content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetIde {
    Claude,
    Cursor,
}

/// Default model names for the three agent roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefaultModels {
    pub high_thinking: &'static str,
    pub code_writing: &'static str,
    pub qa: &'static str,
}

impl TargetIde {
    pub fn all() -> &'static [TargetIde] {
        &[TargetIde::Claude, TargetIde::Cursor]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TargetIde::Claude => "claude",
            TargetIde::Cursor => "cursor",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            TargetIde::Claude => "Claude Code",
            TargetIde::Cursor => "Cursor",
        }
    }

    /// Value of `{ide-folder}`: the project-relative config directory.
    pub fn folder(self) -> &'static str {
        match self {
            TargetIde::Claude => ".claude",
            TargetIde::Cursor => ".cursor",
        }
    }

    /// Value of `{ide-invoke-prefix}`: how a prompt asks the IDE to load a file.
    pub fn invoke_prefix(self) -> &'static str {
        match self {
            TargetIde::Claude => "Read ",
            TargetIde::Cursor => "@",
        }
    }

    /// Value of `{subagent-type}`.
    pub fn subagent_type(self) -> &'static str {
        match self {
            TargetIde::Claude => "general-purpose",
            TargetIde::Cursor => "generalPurpose",
        }
    }

    pub fn default_models(self) -> DefaultModels {
        match self {
            TargetIde::Claude => DefaultModels {
                high_thinking: "opus",
                code_writing: "opus",
                qa: "sonnet",
            },
            TargetIde::Cursor => DefaultModels {
                high_thinking: "gpt-5",
                code_writing: "gpt-5",
                qa: "gpt-5",
            },
        }
    }

    /// File at the project root that carries the framework section.
    pub fn marker_file(self) -> &'static str {
        match self {
            TargetIde::Claude => "CLAUDE.md",
            TargetIde::Cursor => "AGENTS.md",
        }
    }

    pub fn marker_backup_file(self) -> &'static str {
        match self {
            TargetIde::Claude => "CLAUDE.backup.md",
            TargetIde::Cursor => "AGENTS.backup.md",
        }
    }
}

impl fmt::Display for TargetIde {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TargetIde {
    type Err = AgenticError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "claude" => Ok(TargetIde::Claude),
            "cursor" => Ok(TargetIde::Cursor),
            _ => Err(AgenticError::InvalidIde(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// IdeSelection
// ---------------------------------------------------------------------------

/// What the user asked for on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdeSelection {
    Claude,
    Cursor,
    #[default]
    Both,
}

impl IdeSelection {
    pub fn targets(self) -> Vec<TargetIde> {
        match self {
            IdeSelection::Claude => vec![TargetIde::Claude],
            IdeSelection::Cursor => vec![TargetIde::Cursor],
            IdeSelection::Both => TargetIde::all().to_vec(),
        }
    }
}

impl std::str::FromStr for IdeSelection {
    type Err = AgenticError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "claude" => Ok(IdeSelection::Claude),
            "cursor" => Ok(IdeSelection::Cursor),
            "both" => Ok(IdeSelection::Both),
            _ => Err(AgenticError::InvalidIde(s.to_string())),
        }
    }
}

/// IDEs whose config directory already exists under `root`.
pub fn detect_ides(root: &Path) -> Vec<TargetIde> {
    TargetIde::all()
        .iter()
        .copied()
        .filter(|ide| root.join(ide.folder()).is_dir())
        .collect()
}

/// Explicit selection wins; otherwise fall back to detection.
pub fn resolve_targets(root: &Path, selection: Option<IdeSelection>) -> Result<Vec<TargetIde>> {
    let targets = match selection {
        Some(sel) => sel.targets(),
        None => detect_ides(root),
    };
    if targets.is_empty() {
        return Err(AgenticError::NoIdeDetected);
    }
    Ok(targets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn parse_selection() {
        assert_eq!("both".parse::<IdeSelection>().unwrap().targets().len(), 2);
        assert_eq!(
            "cursor".parse::<IdeSelection>().unwrap().targets(),
            vec![TargetIde::Cursor]
        );
        let err = "vim".parse::<IdeSelection>().unwrap_err();
        assert_eq!(err.code(), "INVALID_IDE");
    }

    #[test]
    fn detects_existing_folders_only() {
        let dir = TempDir::new().unwrap();
        assert!(detect_ides(dir.path()).is_empty());
        std::fs::create_dir(dir.path().join(".cursor")).unwrap();
        assert_eq!(detect_ides(dir.path()), vec![TargetIde::Cursor]);
    }

    #[test]
    fn resolve_targets_without_install_fails() {
        let dir = TempDir::new().unwrap();
        let err = resolve_targets(dir.path(), None).unwrap_err();
        assert_eq!(err.code(), "NO_IDE_DETECTED");
        let explicit = resolve_targets(dir.path(), Some(IdeSelection::Claude)).unwrap();
        assert_eq!(explicit, vec![TargetIde::Claude]);
    }
}
