use crate::ide::TargetIde;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const AGENTS_DIR: &str = "agents";
pub const SKILLS_DIR: &str = "skills";
pub const TEMPLATES_DIR: &str = "templates";

pub const SETTINGS_FILE: &str = ".agentic.settings.json";
pub const MARKER_TEMPLATE: &str = "agents.md.template";
pub const SKILL_FILE: &str = "SKILL.md";

pub const DEFAULT_OUTPUT_FOLDER: &str = "_agentic_output";

// ---------------------------------------------------------------------------
// Installed layout
// ---------------------------------------------------------------------------

pub fn ide_dir(root: &Path, ide: TargetIde) -> PathBuf {
    root.join(ide.folder())
}

pub fn installed_agents_dir(ide_dir: &Path) -> PathBuf {
    ide_dir.join(AGENTS_DIR)
}

pub fn installed_skills_dir(ide_dir: &Path) -> PathBuf {
    ide_dir.join(SKILLS_DIR)
}

pub fn settings_path(ide_dir: &Path) -> PathBuf {
    ide_dir.join(SETTINGS_FILE)
}

pub fn marker_path(root: &Path, ide: TargetIde) -> PathBuf {
    root.join(ide.marker_file())
}

/// `.{ide}/{output}` as written into `.gitignore`.
pub fn gitignore_output_entry(ide: TargetIde, output_folder: &str) -> String {
    format!("{}/{}", ide.folder(), output_folder)
}

/// `.{ide}_backup_{timestamp}` used by `migrate`.
pub fn backup_dir_name(ide: TargetIde, timestamp: &str) -> String {
    format!("{}_backup_{timestamp}", ide.folder())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
