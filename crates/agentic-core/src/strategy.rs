//! Per-IDE marker files (`CLAUDE.md`, `AGENTS.md`) that carry the
//! framework section rendered from the catalog template.

use crate::catalog::Catalog;
use crate::error::{AgenticError, Result};
use crate::ide::TargetIde;
use crate::io::atomic_write;
use crate::naming::ContentKind;
use crate::paths;
use crate::template::{process_template, strip_uninstalled_rows, TemplateOptions};
use crate::workflows::ResolvedDependencies;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StrategyMode {
    /// Leave an existing framework section alone.
    #[default]
    Init,
    /// Back up the file, then replace the section.
    Update,
}

/// What happened to the marker file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkerOutcome {
    Created(PathBuf),
    Appended(PathBuf),
    Skipped(PathBuf),
    Updated { path: PathBuf, backup: PathBuf },
}

pub struct StrategyContext<'a> {
    pub catalog: &'a Catalog,
    pub options: &'a TemplateOptions,
    /// Installed selection; rows for anything outside it are dropped.
    pub deps: Option<&'a ResolvedDependencies>,
    pub mode: StrategyMode,
}

pub trait IdeStrategy {
    fn ide(&self) -> TargetIde;

    fn marker_path(&self, root: &Path) -> PathBuf {
        paths::marker_path(root, self.ide())
    }

    fn backup_path(&self, root: &Path) -> PathBuf {
        root.join(self.ide().marker_backup_file())
    }

    /// Framework section for this IDE.
    fn render(&self, ctx: &StrategyContext<'_>) -> Result<String> {
        let template = ctx.catalog.read_template()?;
        let processed = process_template(&template, self.ide(), ctx.options, ContentKind::Other);
        Ok(match ctx.deps {
            Some(deps) => strip_uninstalled_rows(&processed, deps, &ctx.options.namespace),
            None => processed,
        })
    }

    fn setup(&self, root: &Path, ctx: &StrategyContext<'_>) -> Result<MarkerOutcome> {
        let section = self.render(ctx)?;
        write_section(
            &self.marker_path(root),
            &self.backup_path(root),
            &section,
            &ctx.options.namespace.section_marker(),
            ctx.mode,
        )
    }
}

pub struct ClaudeStrategy;

impl IdeStrategy for ClaudeStrategy {
    fn ide(&self) -> TargetIde {
        TargetIde::Claude
    }
}

pub struct CursorStrategy;

impl IdeStrategy for CursorStrategy {
    fn ide(&self) -> TargetIde {
        TargetIde::Cursor
    }
}

pub fn strategy_for(ide: TargetIde) -> &'static dyn IdeStrategy {
    match ide {
        TargetIde::Claude => &ClaudeStrategy,
        TargetIde::Cursor => &CursorStrategy,
    }
}

fn write_failed(path: &Path) -> impl Fn(std::io::Error) -> AgenticError + '_ {
    move |source| AgenticError::WriteFileFailed {
        path: path.to_path_buf(),
        source,
    }
}

fn write_section(
    path: &Path,
    backup: &Path,
    section: &str,
    marker: &str,
    mode: StrategyMode,
) -> Result<MarkerOutcome> {
    let existing = match std::fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            atomic_write(path, section.as_bytes()).map_err(write_failed(path))?;
            return Ok(MarkerOutcome::Created(path.to_path_buf()));
        }
        Err(e) => return Err(write_failed(path)(e)),
    };

    match mode {
        StrategyMode::Init => {
            if existing.contains(marker) {
                return Ok(MarkerOutcome::Skipped(path.to_path_buf()));
            }
            let updated = format!("{existing}\n\n{section}");
            atomic_write(path, updated.as_bytes()).map_err(write_failed(path))?;
            Ok(MarkerOutcome::Appended(path.to_path_buf()))
        }
        StrategyMode::Update => {
            atomic_write(backup, existing.as_bytes()).map_err(write_failed(backup))?;
            let updated = match existing.find(marker) {
                Some(idx) => {
                    let before = existing[..idx].trim_end();
                    if before.is_empty() {
                        section.to_string()
                    } else {
                        format!("{before}\n\n{section}")
                    }
                }
                None => format!("{existing}\n\n{section}"),
            };
            atomic_write(path, updated.as_bytes()).map_err(write_failed(path))?;
            Ok(MarkerOutcome::Updated {
                path: path.to_path_buf(),
                backup: backup.to_path_buf(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::namespace::Namespace;
    use crate::workflows::resolve_workflow_dependencies;
    use std::fs;
    use tempfile::TempDir;

    fn ctx<'a>(
        catalog: &'a Catalog,
        options: &'a TemplateOptions,
        mode: StrategyMode,
    ) -> StrategyContext<'a> {
        StrategyContext {
            catalog,
            options,
            deps: None,
            mode,
        }
    }

    #[test]
    fn strategy_lookup() {
        assert_eq!(strategy_for(TargetIde::Claude).ide(), TargetIde::Claude);
        assert_eq!(strategy_for(TargetIde::Cursor).ide(), TargetIde::Cursor);
        let root = Path::new("/p");
        assert_eq!(CursorStrategy.marker_path(root), PathBuf::from("/p/AGENTS.md"));
        assert_eq!(ClaudeStrategy.backup_path(root), PathBuf::from("/p/CLAUDE.backup.md"));
    }

    #[test]
    fn creates_marker_file() {
        let dir = TempDir::new().unwrap();
        let catalog = Catalog::bundled();
        let options = TemplateOptions::for_ide(TargetIde::Claude);
        let outcome = ClaudeStrategy
            .setup(dir.path(), &ctx(&catalog, &options, StrategyMode::Init))
            .unwrap();
        assert!(matches!(outcome, MarkerOutcome::Created(_)));
        let content = fs::read_to_string(dir.path().join("CLAUDE.md")).unwrap();
        assert!(content.starts_with("# Agentic Framework"));
        assert!(content.contains(".claude/_agentic_output/"));
        assert!(!content.contains("{ide-folder}"));
    }

    #[test]
    fn init_appends_then_skips() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("AGENTS.md");
        fs::write(&path, "# My Project\n").unwrap();
        let catalog = Catalog::bundled();
        let options = TemplateOptions::for_ide(TargetIde::Cursor);

        let first = CursorStrategy
            .setup(dir.path(), &ctx(&catalog, &options, StrategyMode::Init))
            .unwrap();
        assert!(matches!(first, MarkerOutcome::Appended(_)));
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("# My Project\n\n\n# Agentic Framework"));
        assert!(content.contains("`@.cursor/agents/<file>`"));

        let second = CursorStrategy
            .setup(dir.path(), &ctx(&catalog, &options, StrategyMode::Init))
            .unwrap();
        assert!(matches!(second, MarkerOutcome::Skipped(_)));
        assert_eq!(fs::read_to_string(&path).unwrap(), content);
    }

    #[test]
    fn update_replaces_section_and_backs_up() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("CLAUDE.md");
        let original = "# Project notes\n\nkeep me\n\n# Agentic Framework\nstale section\n";
        fs::write(&path, original).unwrap();
        let catalog = Catalog::bundled();
        let options = TemplateOptions::for_ide(TargetIde::Claude);

        let outcome = ClaudeStrategy
            .setup(dir.path(), &ctx(&catalog, &options, StrategyMode::Update))
            .unwrap();
        assert!(matches!(outcome, MarkerOutcome::Updated { .. }));
        assert_eq!(
            fs::read_to_string(dir.path().join("CLAUDE.backup.md")).unwrap(),
            original
        );
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("# Project notes\n\nkeep me\n\n# Agentic Framework\n"));
        assert!(!content.contains("stale section"));
    }

    #[test]
    fn namespaced_section_filtered_to_selection() {
        let dir = TempDir::new().unwrap();
        let catalog = Catalog::bundled();
        let options = TemplateOptions {
            namespace: "foo".parse::<Namespace>().unwrap(),
            ..TemplateOptions::for_ide(TargetIde::Claude)
        };
        let deps = resolve_workflow_dependencies(&["product-spec"]);
        let context = StrategyContext {
            catalog: &catalog,
            options: &options,
            deps: Some(&deps),
            mode: StrategyMode::Init,
        };
        ClaudeStrategy.setup(dir.path(), &context).unwrap();
        let content = fs::read_to_string(dir.path().join("CLAUDE.md")).unwrap();
        assert!(content.starts_with("# Foo Framework"));
        assert!(content.contains("/foo:workflow:product-spec"));
        assert!(!content.contains("/foo:workflow:debug"));
        assert!(!content.contains("foo:agent:editor"));
        assert!(!content.contains("agentic"));
    }

    #[test]
    fn unreadable_template_is_write_failure() {
        let dir = TempDir::new().unwrap();
        let catalog = Catalog::new(dir.path().join("no-catalog"));
        let options = TemplateOptions::for_ide(TargetIde::Claude);
        let err = ClaudeStrategy
            .setup(dir.path(), &ctx(&catalog, &options, StrategyMode::Init))
            .unwrap_err();
        assert_eq!(err.code(), "WRITE_FILE_FAILED");
    }
}
