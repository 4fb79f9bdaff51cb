//! Move artifacts from installs that predate namespaced names out of the
//! way, so a fresh install doesn't leave two copies of every agent.

use crate::error::{AgenticError, Result};
use crate::ide::TargetIde;
use crate::paths::{self, AGENTS_DIR, SKILLS_DIR};
use crate::workflows::KNOWN_WORKFLOWS;
use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Agent files installed without a namespace prefix.
pub const LEGACY_AGENTS: &[&str] = &[
    "cpo",
    "cto",
    "dx",
    "team-and-workflow",
    "analyst",
    "architect",
    "editor",
    "frontend-developer",
    "investigator",
    "pm",
    "qa",
    "security-qa",
    "security",
    "test-engineer",
    "test-qa",
    "ui-ux-designer",
];

/// Skill directories installed without a namespace prefix.
pub const LEGACY_SKILLS: &[&str] = &[
    "brainstorming",
    "clean-architecture",
    "code",
    "code-testing",
    "context7",
    "dx",
    "frontend-design",
    "gather-technical-context",
    "github",
    "observability",
    "product-discovery",
    "product-manager",
    "product-vision",
    "qa",
    "refactoring-ui",
    "security-context",
    "security-qa",
    "tech-vision",
    "technical-planning",
    "typescript-engineer",
    "typescript-imports",
    "ux-patterns",
];

/// Single directory that once held every workflow.
const LEGACY_AGGREGATED_DIR: &str = "agentic";
const LEGACY_CURSOR_RULE: &str = "rules/agentic.mdc";

/// `YYYYmmdd-HHMMSS` in local time, as used in backup directory names.
pub fn backup_timestamp(now: DateTime<Local>) -> String {
    now.format("%Y%m%d-%H%M%S").to_string()
}

/// Paths relative to the IDE directory that may hold legacy artifacts.
pub fn legacy_candidates(ide: TargetIde) -> Vec<PathBuf> {
    let mut out: Vec<PathBuf> = LEGACY_AGENTS
        .iter()
        .map(|a| Path::new(AGENTS_DIR).join(format!("{a}.md")))
        .collect();
    out.extend(LEGACY_SKILLS.iter().map(|s| Path::new(SKILLS_DIR).join(s)));
    out.extend(
        KNOWN_WORKFLOWS
            .iter()
            .map(|w| Path::new(SKILLS_DIR).join(format!("agentic-{w}"))),
    );
    out.push(Path::new(SKILLS_DIR).join(LEGACY_AGGREGATED_DIR));
    if ide == TargetIde::Cursor {
        out.push(PathBuf::from(LEGACY_CURSOR_RULE));
    }
    out
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupReport {
    pub ide: TargetIde,
    /// Directory name relative to the project root (`.claude_backup_...`).
    pub backup_dir: String,
    /// Moved entries, relative to the IDE directory.
    pub moved: Vec<PathBuf>,
}

/// Move every legacy artifact of `ide` under `root` into
/// `.{ide}_backup_{timestamp}/`, keeping relative layout. The backup
/// directory is only created when something is moved.
pub fn backup_legacy_artifacts(root: &Path, ide: TargetIde, timestamp: &str) -> Result<BackupReport> {
    let ide_dir = paths::ide_dir(root, ide);
    let backup_dir = paths::backup_dir_name(ide, timestamp);
    let backup_root = root.join(&backup_dir);
    let mut moved = Vec::new();

    for rel in legacy_candidates(ide) {
        let src = ide_dir.join(&rel);
        if src.symlink_metadata().is_err() {
            continue;
        }
        let dest = backup_root.join(&rel);
        let fail = |source: std::io::Error| AgenticError::BackupFailed {
            path: src.clone(),
            source,
        };
        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent).map_err(fail)?;
        }
        std::fs::rename(&src, &dest).map_err(fail)?;
        debug!(from = %src.display(), to = %dest.display(), "backed up legacy artifact");
        moved.push(rel);
    }

    Ok(BackupReport {
        ide,
        backup_dir,
        moved,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn timestamp_format() {
        let at = Local.with_ymd_and_hms(2025, 3, 7, 9, 5, 1).unwrap();
        assert_eq!(backup_timestamp(at), "20250307-090501");
    }

    #[test]
    fn moves_legacy_files_into_backup() {
        let dir = TempDir::new().unwrap();
        let cursor = dir.path().join(".cursor");
        fs::create_dir_all(cursor.join("agents")).unwrap();
        fs::create_dir_all(cursor.join("skills/code")).unwrap();
        fs::create_dir_all(cursor.join("skills/agentic-debug")).unwrap();
        fs::create_dir_all(cursor.join("rules")).unwrap();
        fs::write(cursor.join("agents/cpo.md"), "old").unwrap();
        fs::write(cursor.join("agents/agentic-agent-cpo.md"), "new").unwrap();
        fs::write(cursor.join("skills/code/SKILL.md"), "old").unwrap();
        fs::write(cursor.join("rules/agentic.mdc"), "rule").unwrap();

        let report =
            backup_legacy_artifacts(dir.path(), TargetIde::Cursor, "20250101-000000").unwrap();

        assert_eq!(report.backup_dir, ".cursor_backup_20250101-000000");
        assert_eq!(report.moved.len(), 4);
        let backup = dir.path().join(&report.backup_dir);
        assert_eq!(fs::read_to_string(backup.join("agents/cpo.md")).unwrap(), "old");
        assert!(backup.join("skills/code/SKILL.md").exists());
        assert!(backup.join("skills/agentic-debug").is_dir());
        assert!(backup.join("rules/agentic.mdc").exists());
        assert!(!cursor.join("agents/cpo.md").exists());
        assert!(cursor.join("agents/agentic-agent-cpo.md").exists());
    }

    #[test]
    fn nothing_to_move_creates_no_backup() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join(".claude/agents")).unwrap();
        let report =
            backup_legacy_artifacts(dir.path(), TargetIde::Claude, "20250101-000000").unwrap();
        assert!(report.moved.is_empty());
        assert!(!dir.path().join(&report.backup_dir).exists());
    }

    #[test]
    fn cursor_rule_only_for_cursor() {
        let claude = legacy_candidates(TargetIde::Claude);
        let cursor = legacy_candidates(TargetIde::Cursor);
        assert_eq!(cursor.len(), claude.len() + 1);
        assert!(cursor.contains(&PathBuf::from("rules/agentic.mdc")));
    }
}
