use crate::catalog::Catalog;
use crate::error::{AgenticError, Result};
use crate::ide::TargetIde;
use crate::io::atomic_write;
use crate::naming::ContentKind;
use crate::template::{process_template, TemplateOptions};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Extensions run through the template processor. Everything else is copied
/// byte for byte.
const TEXT_EXTENSIONS: &[&str] = &["md", "yaml", "yml", "sh"];

fn is_text_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| TEXT_EXTENSIONS.contains(&e))
}

fn copy_failed(src: PathBuf, dest: &Path) -> impl Fn(std::io::Error) -> AgenticError + '_ {
    move |source| AgenticError::CopyFailed {
        src: src.clone(),
        dest: dest.to_path_buf(),
        source,
    }
}

fn invalid_text(e: std::string::FromUtf8Error) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::InvalidData, e)
}

/// Copy one catalog file to `dest`, processing it when it is a text template.
pub fn copy_file_and_process(
    catalog: &Catalog,
    src: &str,
    dest: &Path,
    ide: TargetIde,
    options: &TemplateOptions,
    kind: ContentKind,
) -> Result<()> {
    let err = copy_failed(catalog.source_path(src), dest);
    let bytes = catalog.read(src).map_err(&err)?;
    if is_text_file(Path::new(src)) {
        let content = String::from_utf8(bytes).map_err(invalid_text).map_err(&err)?;
        let processed = process_template(&content, ide, options, kind);
        atomic_write(dest, processed.as_bytes()).map_err(&err)?;
    } else {
        atomic_write(dest, &bytes).map_err(&err)?;
    }
    debug!(src, dest = %dest.display(), "copied");
    Ok(())
}

fn sorted_entries(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut entries = std::fs::read_dir(dir)?
        .map(|e| e.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort();
    Ok(entries)
}

/// Copy the catalog directory `src_dir` into `dest_dir`. Nested directory
/// names are kept as-is; only the caller names the top-level destination.
///
/// Returns the number of files written. Stops at the first failure without
/// undoing earlier writes.
pub fn copy_and_process(
    catalog: &Catalog,
    src_dir: &str,
    dest_dir: &Path,
    ide: TargetIde,
    options: &TemplateOptions,
    kind: ContentKind,
) -> Result<usize> {
    let err = copy_failed(catalog.source_path(src_dir), dest_dir);
    let files = catalog.files(src_dir).map_err(&err)?;
    std::fs::create_dir_all(dest_dir).map_err(&err)?;

    let prefix = format!("{}/", src_dir.trim_end_matches('/'));
    let mut written = 0;
    for src in &files {
        let Some(rel) = src.strip_prefix(&prefix) else {
            continue;
        };
        let dest = rel.split('/').fold(dest_dir.to_path_buf(), |p, part| p.join(part));
        copy_file_and_process(catalog, src, &dest, ide, options, kind)?;
        written += 1;
    }
    Ok(written)
}

/// Mark every `.sh` file under `dir` as `0o755`. Missing directories and
/// permission failures are not errors.
pub fn make_scripts_executable(dir: &Path) -> usize {
    let Ok(entries) = sorted_entries(dir) else {
        return 0;
    };
    let mut changed = 0;
    for path in entries {
        if path.is_dir() {
            changed += make_scripts_executable(&path);
        } else if path.extension().is_some_and(|e| e == "sh") {
            match set_executable(&path) {
                Ok(()) => changed += 1,
                Err(e) => warn!(path = %path.display(), error = %e, "could not mark script executable"),
            }
        }
    }
    changed
}

#[cfg(unix)]
fn set_executable(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))
}

#[cfg(not(unix))]
fn set_executable(_path: &Path) -> std::io::Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::namespace::Namespace;
    use std::fs;
    use tempfile::TempDir;

    fn foo_options() -> TemplateOptions {
        TemplateOptions {
            namespace: "foo".parse::<Namespace>().unwrap(),
            output_folder: "_foo_output".into(),
            ..TemplateOptions::for_ide(TargetIde::Claude)
        }
    }

    fn seed_skill(root: &Path) -> PathBuf {
        let skill = root.join("skills/agentic-skill-github");
        fs::create_dir_all(skill.join("scripts")).unwrap();
        fs::write(
            skill.join("SKILL.md"),
            "---\nname: github\n---\nSee {ide-folder}/skills/agentic-skill-github/scripts\n",
        )
        .unwrap();
        fs::write(skill.join("scripts/pr.sh"), "#!/bin/sh\necho {output-folder}\n").unwrap();
        fs::write(skill.join("logo.png"), [0u8, 159, 146, 150, b'{']).unwrap();
        skill
    }

    #[test]
    fn copies_tree_and_processes_text() {
        let src = TempDir::new().unwrap();
        let dest = TempDir::new().unwrap();
        seed_skill(src.path());
        let catalog = Catalog::new(src.path());
        let target = dest.path().join("foo-skill-github");

        let written = copy_and_process(
            &catalog,
            "skills/agentic-skill-github",
            &target,
            TargetIde::Claude,
            &foo_options(),
            ContentKind::Skill,
        )
        .unwrap();
        assert_eq!(written, 3);

        let doc = fs::read_to_string(target.join("SKILL.md")).unwrap();
        assert!(doc.starts_with("---\nname: foo:skill:github\n---\n"));
        assert!(doc.contains(".claude/skills/foo-skill-github/scripts"));

        let script = fs::read_to_string(target.join("scripts/pr.sh")).unwrap();
        assert!(script.contains("echo _foo_output"));

        let logo = fs::read(target.join("logo.png")).unwrap();
        assert_eq!(logo, vec![0u8, 159, 146, 150, b'{']);
    }

    #[test]
    fn copies_from_bundled_catalog() {
        let dest = TempDir::new().unwrap();
        let target = dest.path().join("foo-skill-github");
        let written = copy_and_process(
            &Catalog::bundled(),
            "skills/agentic-skill-github",
            &target,
            TargetIde::Cursor,
            &foo_options(),
            ContentKind::Skill,
        )
        .unwrap();
        assert_eq!(written, 6);

        let script = fs::read_to_string(target.join("scripts/sync-all.sh")).unwrap();
        assert!(script.contains("PLANS_DIR=\".cursor/_foo_output/plans\""));
        let doc = fs::read_to_string(target.join("SKILL.md")).unwrap();
        assert!(doc.contains("name: foo:skill:github"));
    }

    #[test]
    fn single_file_creates_parent() {
        let src = TempDir::new().unwrap();
        let dest = TempDir::new().unwrap();
        fs::create_dir_all(src.path().join("agents")).unwrap();
        fs::write(
            src.path().join("agents/agentic-agent-qa.md"),
            "---\nname: qa\nskills: [qa]\n---\n",
        )
        .unwrap();
        let out = dest.path().join("agents/foo-agent-qa.md");

        copy_file_and_process(
            &Catalog::new(src.path()),
            "agents/agentic-agent-qa.md",
            &out,
            TargetIde::Cursor,
            &foo_options(),
            ContentKind::Agent,
        )
        .unwrap();
        assert_eq!(
            fs::read_to_string(out).unwrap(),
            "---\nname: foo:agent:qa\nskills: [foo:skill:qa]\n---\n"
        );
    }

    #[test]
    fn missing_source_reports_both_paths() {
        let dest = TempDir::new().unwrap();
        let err = copy_and_process(
            &Catalog::new(dest.path()),
            "skills/nope",
            &dest.path().join("out"),
            TargetIde::Claude,
            &foo_options(),
            ContentKind::Skill,
        )
        .unwrap_err();
        assert_eq!(err.code(), "COPY_FAILED");
        let msg = err.to_string();
        assert!(msg.contains("nope"));
        assert!(msg.contains("out"));
    }

    #[cfg(unix)]
    #[test]
    fn scripts_become_executable() {
        use std::os::unix::fs::PermissionsExt;
        let dir = TempDir::new().unwrap();
        let skill = seed_skill(dir.path());
        assert_eq!(make_scripts_executable(dir.path()), 1);
        let mode = fs::metadata(skill.join("scripts/pr.sh"))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o755);
        assert_eq!(make_scripts_executable(&dir.path().join("missing")), 0);
    }
}
