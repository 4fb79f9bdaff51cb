//! The content catalog: agent files, skill and workflow directories, and the
//! marker-file template, all authored in the canonical namespace.
//!
//! The catalog is compiled into the binary. A directory on disk with the same
//! layout can stand in for it (`--catalog`).

use crate::error::{AgenticError, Result};
use crate::naming::{canonical_name, catalog_base_name, ContentKind};
use crate::paths::{AGENTS_DIR, MARKER_TEMPLATE, SKILLS_DIR, SKILL_FILE, TEMPLATES_DIR};
use crate::workflows::{workflow_dependencies, ResolvedDependencies, KNOWN_WORKFLOWS};
use rust_embed::Embed;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

#[derive(Embed)]
#[folder = "$CARGO_MANIFEST_DIR/catalog/"]
struct BundledContent;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Source {
    Bundled,
    Dir(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    source: Source,
}

#[derive(Debug, Default, Deserialize)]
struct Frontmatter {
    #[serde(default)]
    name: Option<String>,
}

/// Returns the YAML between the leading `---` fence and the next one.
fn extract_frontmatter(content: &str) -> Option<&str> {
    let rest = content.strip_prefix("---")?;
    let rest = if let Some(r) = rest.strip_prefix('\n') {
        r
    } else if let Some(r) = rest.strip_prefix("\r\n") {
        r
    } else {
        return None;
    };
    let end = rest.find("\n---")?;
    Some(&rest[..end])
}

fn not_found(rel: &str) -> std::io::Error {
    std::io::Error::new(
        std::io::ErrorKind::NotFound,
        format!("{rel} is not in the bundled catalog"),
    )
}

/// Every file below `dir`, as `/`-separated paths relative to `root`.
fn walk_files(root: &Path, dir: &Path, out: &mut Vec<String>) -> std::io::Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            walk_files(root, &path, out)?;
            continue;
        }
        let Ok(rel) = path.strip_prefix(root) else {
            continue;
        };
        let parts: Option<Vec<&str>> = rel.components().map(|c| c.as_os_str().to_str()).collect();
        if let Some(parts) = parts {
            out.push(parts.join("/"));
        }
    }
    Ok(())
}

impl Catalog {
    /// Catalog read from a directory on disk.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            source: Source::Dir(root.into()),
        }
    }

    /// Catalog compiled into this build.
    pub fn bundled() -> Self {
        Self {
            source: Source::Bundled,
        }
    }

    /// Explicit location if given, the bundled catalog otherwise.
    pub fn locate(explicit: Option<PathBuf>) -> Self {
        match explicit {
            Some(root) => Self::new(root),
            None => Self::bundled(),
        }
    }

    pub fn is_bundled(&self) -> bool {
        self.source == Source::Bundled
    }

    /// Human-readable location for messages.
    pub fn location(&self) -> String {
        match &self.source {
            Source::Bundled => "<bundled>".to_string(),
            Source::Dir(root) => root.display().to_string(),
        }
    }

    /// Path used to name `rel` in errors and logs.
    pub fn source_path(&self, rel: &str) -> PathBuf {
        match &self.source {
            Source::Bundled => Path::new("<bundled>").join(rel),
            Source::Dir(root) => root.join(rel),
        }
    }

    /// Catalog-relative path of a canonical agent file name.
    pub fn agent_file(name: &str) -> String {
        format!("{AGENTS_DIR}/{name}")
    }

    /// Catalog-relative path of a canonical skill or workflow directory name.
    pub fn skill_dir(name: &str) -> String {
        format!("{SKILLS_DIR}/{name}")
    }

    pub fn template_file() -> String {
        format!("{TEMPLATES_DIR}/{MARKER_TEMPLATE}")
    }

    /// Raw bytes of the catalog file at `rel`.
    pub fn read(&self, rel: &str) -> std::io::Result<Vec<u8>> {
        match &self.source {
            Source::Bundled => <BundledContent as Embed>::get(rel)
                .map(|file| file.data.into_owned())
                .ok_or_else(|| not_found(rel)),
            Source::Dir(root) => std::fs::read(root.join(rel)),
        }
    }

    pub fn read_text(&self, rel: &str) -> std::io::Result<String> {
        String::from_utf8(self.read(rel)?)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }

    /// Every file below the directory `rel`, sorted. A missing directory is
    /// `NotFound`.
    pub fn files(&self, rel: &str) -> std::io::Result<Vec<String>> {
        let mut files = match &self.source {
            Source::Bundled => {
                let prefix = format!("{}/", rel.trim_end_matches('/'));
                let files: Vec<String> = <BundledContent as Embed>::iter()
                    .filter(|path| path.starts_with(&prefix))
                    .map(|path| path.into_owned())
                    .collect();
                if files.is_empty() {
                    return Err(not_found(rel));
                }
                files
            }
            Source::Dir(root) => {
                let mut files = Vec::new();
                walk_files(root, &root.join(rel), &mut files)?;
                files
            }
        };
        files.sort();
        Ok(files)
    }

    /// Names directly inside the directory `rel`, sorted.
    fn entry_names(&self, rel: &str) -> std::io::Result<Vec<String>> {
        match &self.source {
            Source::Bundled => {
                let prefix = format!("{rel}/");
                let names: BTreeSet<String> = <BundledContent as Embed>::iter()
                    .filter_map(|path| {
                        let rest = path.strip_prefix(&prefix)?;
                        rest.split('/').next().map(str::to_string)
                    })
                    .collect();
                Ok(names.into_iter().collect())
            }
            Source::Dir(root) => {
                let mut names = Vec::new();
                for entry in std::fs::read_dir(root.join(rel))? {
                    if let Some(name) = entry?.file_name().to_str() {
                        names.push(name.to_string());
                    }
                }
                names.sort();
                Ok(names)
            }
        }
    }

    pub fn read_template(&self) -> Result<String> {
        let rel = Self::template_file();
        self.read_text(&rel)
            .map_err(|source| AgenticError::WriteFileFailed {
                path: self.source_path(&rel),
                source,
            })
    }

    /// Everything the catalog ships, as canonical names.
    pub fn full_manifest(&self) -> Result<ResolvedDependencies> {
        let agents = self
            .entry_names(AGENTS_DIR)?
            .into_iter()
            .filter(|n| catalog_base_name(n, ContentKind::Agent).is_some())
            .collect();
        let dirs = self.entry_names(SKILLS_DIR)?;
        let of_kind = |kind: ContentKind| -> Vec<String> {
            dirs.iter()
                .filter(|n| catalog_base_name(n, kind).is_some())
                .cloned()
                .collect()
        };
        Ok(ResolvedDependencies {
            agents,
            skills: of_kind(ContentKind::Skill),
            workflows: of_kind(ContentKind::Workflow),
        })
    }

    fn check_name(&self, rel: &str, expected: &str, problems: &mut Vec<String>) {
        let path = self.source_path(rel);
        let Ok(content) = self.read_text(rel) else {
            problems.push(format!("missing {}", path.display()));
            return;
        };
        let Some(yaml) = extract_frontmatter(&content) else {
            problems.push(format!("{} has no frontmatter", path.display()));
            return;
        };
        match serde_yaml::from_str::<Frontmatter>(yaml) {
            Ok(Frontmatter { name: Some(name) }) if name == expected => {}
            Ok(Frontmatter { name: Some(name) }) => problems.push(format!(
                "{} declares name '{name}', expected '{expected}'",
                path.display()
            )),
            Ok(Frontmatter { name: None }) => {
                problems.push(format!("{} has no name in frontmatter", path.display()))
            }
            Err(e) => problems.push(format!("{} frontmatter does not parse: {e}", path.display())),
        }
    }

    /// Check that every name the dependency map refers to exists here with a
    /// matching frontmatter `name`, and that the full manifest is well formed.
    pub fn verify(&self) -> Result<()> {
        let mut problems = Vec::new();

        let mut agents = BTreeSet::new();
        let mut skills = BTreeSet::new();
        let mut workflows = BTreeSet::new();
        for workflow in KNOWN_WORKFLOWS {
            workflows.insert(workflow.to_string());
            if let Some(deps) = workflow_dependencies(workflow) {
                agents.extend(deps.agents.iter().map(|a| a.to_string()));
                skills.extend(deps.skills.iter().map(|s| s.to_string()));
            }
        }

        if let Ok(manifest) = self.full_manifest() {
            let bases = |names: &[String], kind: ContentKind| -> Vec<String> {
                names
                    .iter()
                    .filter_map(|n| catalog_base_name(n, kind))
                    .map(str::to_string)
                    .collect()
            };
            agents.extend(bases(manifest.agents.as_slice(), ContentKind::Agent));
            skills.extend(bases(manifest.skills.as_slice(), ContentKind::Skill));
            workflows.extend(bases(manifest.workflows.as_slice(), ContentKind::Workflow));
        } else {
            problems.push(format!(
                "expected {}/ and {}/ under {}",
                AGENTS_DIR,
                SKILLS_DIR,
                self.location()
            ));
        }

        for base in &agents {
            let rel = Self::agent_file(&canonical_name(base, ContentKind::Agent));
            self.check_name(&rel, base, &mut problems);
        }
        for (bases, kind) in [(&skills, ContentKind::Skill), (&workflows, ContentKind::Workflow)] {
            for base in bases {
                let rel = format!("{}/{SKILL_FILE}", Self::skill_dir(&canonical_name(base, kind)));
                self.check_name(&rel, base, &mut problems);
            }
        }
        let template = Self::template_file();
        if self.read(&template).is_err() {
            problems.push(format!("missing {}", self.source_path(&template).display()));
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(AgenticError::CatalogInconsistent {
                location: self.location(),
                problems,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn bundled_catalog_is_consistent() {
        Catalog::bundled().verify().unwrap();
    }

    #[test]
    fn bundled_manifest_covers_every_workflow() {
        let manifest = Catalog::bundled().full_manifest().unwrap();
        for workflow in KNOWN_WORKFLOWS {
            let name = canonical_name(workflow, ContentKind::Workflow);
            assert!(manifest.workflows.contains(&name), "missing {name}");
        }
        assert!(manifest
            .agents
            .contains(&"agentic-agent-cpo.md".to_string()));
        assert!(manifest.skills.iter().all(|s| s.starts_with("agentic-skill-")));
    }

    #[test]
    fn bundled_content_is_compiled_in() {
        let bundled = Catalog::bundled();
        assert!(bundled.is_bundled());
        assert_eq!(bundled.location(), "<bundled>");
        assert!(!bundled
            .source_path("agents/agentic-agent-cpo.md")
            .starts_with(env!("CARGO_MANIFEST_DIR")));

        let rel = "agents/agentic-agent-cpo.md";
        let on_disk = fs::read(Path::new(env!("CARGO_MANIFEST_DIR")).join("catalog").join(rel))
            .unwrap();
        assert_eq!(bundled.read(rel).unwrap(), on_disk);
    }

    #[test]
    fn bundled_and_disk_listings_agree() {
        let bundled = Catalog::bundled();
        let disk = Catalog::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("catalog"));
        let github = Catalog::skill_dir("agentic-skill-github");
        assert_eq!(bundled.files(&github).unwrap(), disk.files(&github).unwrap());
        assert_eq!(
            bundled.files(&github).unwrap(),
            vec![
                "skills/agentic-skill-github/SKILL.md",
                "skills/agentic-skill-github/scripts/create-pr.sh",
                "skills/agentic-skill-github/scripts/resolve-parent.sh",
                "skills/agentic-skill-github/scripts/sync-all.sh",
                "skills/agentic-skill-github/scripts/sync-from-github.sh",
                "skills/agentic-skill-github/scripts/sync-to-github.sh",
            ]
        );
        assert_eq!(bundled.full_manifest().unwrap(), disk.full_manifest().unwrap());
    }

    #[test]
    fn missing_entries_are_not_found() {
        let bundled = Catalog::bundled();
        let err = bundled.files("skills/agentic-skill-nope").unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
        let err = bundled.read("agents/agentic-agent-nope.md").unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
    }

    #[test]
    fn empty_catalog_lists_every_problem() {
        let dir = TempDir::new().unwrap();
        let err = Catalog::new(dir.path()).verify().unwrap_err();
        assert_eq!(err.code(), "CATALOG_INCONSISTENT");
        let msg = err.to_string();
        assert!(msg.contains("agentic-agent-architect.md"));
        assert!(msg.contains("agentic-workflow-debug"));
        assert!(msg.contains("agents.md.template"));
    }

    #[test]
    fn name_mismatch_is_reported() {
        let dir = TempDir::new().unwrap();
        let agents = dir.path().join("agents");
        fs::create_dir_all(&agents).unwrap();
        fs::create_dir_all(dir.path().join("skills")).unwrap();
        fs::write(
            agents.join("agentic-agent-architect.md"),
            "---\nname: planner\n---\n",
        )
        .unwrap();
        let err = Catalog::new(dir.path()).verify().unwrap_err();
        assert!(err
            .to_string()
            .contains("declares name 'planner', expected 'architect'"));
    }

    #[test]
    fn frontmatter_extraction() {
        assert_eq!(extract_frontmatter("---\nname: x\n---\nbody"), Some("name: x"));
        assert_eq!(extract_frontmatter("no fence"), None);
    }
}
