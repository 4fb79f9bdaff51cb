use agentic_core::ide::TargetIde;
use std::path::{Path, PathBuf};

fn find_upward(start: &Path, found: impl Fn(&Path) -> bool) -> Option<PathBuf> {
    start.ancestors().find(|dir| found(dir)).map(Path::to_path_buf)
}

/// Resolve the project root.
///
/// Priority:
/// 1. `--root` flag / `AGENTIC_ROOT` env var (passed in as `explicit`)
/// 2. Walk upward from `cwd` looking for `.claude/` or `.cursor/`
/// 3. Walk upward from `cwd` looking for `.git/`
/// 4. Fall back to `cwd`
pub fn resolve_root(explicit: Option<&Path>) -> PathBuf {
    if let Some(p) = explicit {
        return p.to_path_buf();
    }
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    resolve_from(&cwd)
}

fn resolve_from(cwd: &Path) -> PathBuf {
    find_upward(cwd, |dir| {
        TargetIde::all()
            .iter()
            .any(|ide| dir.join(ide.folder()).is_dir())
    })
    .or_else(|| find_upward(cwd, |dir| dir.join(".git").is_dir()))
    .unwrap_or_else(|| cwd.to_path_buf())
}
