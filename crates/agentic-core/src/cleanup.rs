use crate::error::Result;
use crate::io::{remove_dir_force, remove_file_force};
use crate::namespace::Namespace;
use crate::naming::{destination_name, ContentKind};
use crate::paths::{installed_agents_dir, installed_skills_dir};
use crate::workflows::ResolvedDependencies;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::debug;

fn installed_names<'a>(
    entries: impl IntoIterator<Item = (&'a String, ContentKind)>,
    namespace: &Namespace,
) -> Vec<String> {
    let mut seen = HashSet::new();
    entries
        .into_iter()
        .map(|(e, kind)| destination_name(e, kind, namespace))
        .filter(|n| seen.insert(n.clone()))
        .collect()
}

fn tagged(entries: &[String], kind: ContentKind) -> impl Iterator<Item = (&String, ContentKind)> {
    entries.iter().map(move |e| (e, kind))
}

/// Remove what `old` installed under `namespace` that `new` no longer wants.
///
/// Agent files go from `{ide_dir}/agents/`; skill and workflow directories
/// from `{ide_dir}/skills/`. Entries already gone are ignored. Returns the
/// paths actually removed.
pub fn cleanup_stale_files(
    ide_dir: &Path,
    old: &ResolvedDependencies,
    new: &ResolvedDependencies,
    namespace: &Namespace,
) -> Result<Vec<PathBuf>> {
    let mut removed = Vec::new();

    let keep_agents: HashSet<String> =
        installed_names(tagged(&new.agents, ContentKind::Agent), namespace)
            .into_iter()
            .collect();
    let agents_dir = installed_agents_dir(ide_dir);
    for name in installed_names(tagged(&old.agents, ContentKind::Agent), namespace) {
        if keep_agents.contains(&name) {
            continue;
        }
        let path = agents_dir.join(&name);
        if remove_file_force(&path)? {
            debug!(path = %path.display(), "removed stale agent");
            removed.push(path);
        }
    }

    let dirs = |deps: &ResolvedDependencies| {
        installed_names(
            tagged(&deps.skills, ContentKind::Skill)
                .chain(tagged(&deps.workflows, ContentKind::Workflow)),
            namespace,
        )
    };
    let keep_dirs: HashSet<String> = dirs(new).into_iter().collect();
    let skills_dir = installed_skills_dir(ide_dir);
    for name in dirs(old) {
        if keep_dirs.contains(&name) {
            continue;
        }
        let path = skills_dir.join(&name);
        if remove_dir_force(&path)? {
            debug!(path = %path.display(), "removed stale skill directory");
            removed.push(path);
        }
    }

    Ok(removed)
}

/// Cleanup after `settings apply` changed the selection, the namespace, or
/// both. Under a new namespace nothing from the old install is kept.
pub fn cleanup_after_reselect(
    ide_dir: &Path,
    old: &ResolvedDependencies,
    old_namespace: &Namespace,
    new: &ResolvedDependencies,
    new_namespace: &Namespace,
) -> Result<Vec<PathBuf>> {
    if old_namespace == new_namespace {
        cleanup_stale_files(ide_dir, old, new, new_namespace)
    } else {
        cleanup_stale_files(ide_dir, old, &ResolvedDependencies::default(), old_namespace)
    }
}
