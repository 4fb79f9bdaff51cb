//! Install orchestration for one IDE: copy catalog content, render the
//! marker file, ignore the output folder, record settings.

use crate::catalog::Catalog;
use crate::copy::{copy_and_process, copy_file_and_process, make_scripts_executable};
use crate::error::Result;
use crate::ide::TargetIde;
use crate::io::{ensure_dir, ensure_gitignore_entry};
use crate::naming::{destination_name, ContentKind};
use crate::paths;
use crate::settings::AgenticSettings;
use crate::strategy::{strategy_for, MarkerOutcome, StrategyContext, StrategyMode};
use crate::template::TemplateOptions;
use crate::workflows::{resolve_workflow_dependencies, ResolvedDependencies};
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct InstallOptions {
    pub template: TemplateOptions,
    /// Validated workflow names. `None` installs the whole catalog.
    pub workflows: Option<Vec<String>>,
    pub mode: StrategyMode,
}

#[derive(Debug, Clone)]
pub struct InstallReport {
    pub ide: TargetIde,
    pub ide_dir: PathBuf,
    /// Catalog names that were copied.
    pub installed: ResolvedDependencies,
    pub files_written: usize,
    pub scripts_marked: usize,
    pub marker: MarkerOutcome,
    pub gitignore_entry: Option<String>,
    pub settings: AgenticSettings,
}

/// What a previous install put on disk, as catalog names. A stored workflow
/// list resolves to its dependencies; no list means the full catalog.
pub fn installed_selection(
    catalog: &Catalog,
    workflows: Option<&[String]>,
) -> Result<ResolvedDependencies> {
    match workflows {
        Some(list) => Ok(resolve_workflow_dependencies(list)),
        None => catalog.full_manifest(),
    }
}

/// Copy `deps` from `catalog` into `ide_dir` under the options' namespace.
/// Returns the number of files written.
pub fn install_selection(
    catalog: &Catalog,
    ide: TargetIde,
    ide_dir: &Path,
    deps: &ResolvedDependencies,
    options: &TemplateOptions,
) -> Result<usize> {
    let ns = &options.namespace;
    let agents_dir = paths::installed_agents_dir(ide_dir);
    let skills_dir = paths::installed_skills_dir(ide_dir);
    let mut written = 0;

    for agent in &deps.agents {
        let dest = agents_dir.join(destination_name(agent, ContentKind::Agent, ns));
        let src = Catalog::agent_file(agent);
        copy_file_and_process(catalog, &src, &dest, ide, options, ContentKind::Agent)?;
        written += 1;
    }
    let dirs = deps
        .skills
        .iter()
        .map(|s| (s, ContentKind::Skill))
        .chain(deps.workflows.iter().map(|w| (w, ContentKind::Workflow)));
    for (name, kind) in dirs {
        let dest = skills_dir.join(destination_name(name, kind, ns));
        let src = Catalog::skill_dir(name);
        written += copy_and_process(catalog, &src, &dest, ide, options, kind)?;
    }
    Ok(written)
}

/// Install into one IDE under `root` without touching its settings file.
/// The settings that describe this install are returned in the report for
/// the caller to save once any follow-up work has succeeded.
///
/// Not transactional: a failure part way through leaves earlier writes in
/// place, and re-running converges.
pub fn install_ide(
    catalog: &Catalog,
    ide: TargetIde,
    root: &Path,
    options: &InstallOptions,
) -> Result<InstallReport> {
    let ide_dir = paths::ide_dir(root, ide);
    ensure_dir(&ide_dir)?;

    let installed = installed_selection(catalog, options.workflows.as_deref())?;
    let files_written = install_selection(catalog, ide, &ide_dir, &installed, &options.template)?;
    debug!(ide = %ide, files = files_written, "catalog copied");

    let scripts_marked = make_scripts_executable(&paths::installed_skills_dir(&ide_dir));

    let ctx = StrategyContext {
        catalog,
        options: &options.template,
        deps: options.workflows.as_ref().map(|_| &installed),
        mode: options.mode,
    };
    let marker = strategy_for(ide).setup(root, &ctx)?;

    let entry = paths::gitignore_output_entry(ide, &options.template.output_folder);
    let gitignore_entry = ensure_gitignore_entry(root, &entry)?.then_some(entry);

    let settings = AgenticSettings::new(&options.template, options.workflows.clone());

    Ok(InstallReport {
        ide,
        ide_dir,
        installed,
        files_written,
        scripts_marked,
        marker,
        gitignore_entry,
        settings,
    })
}

/// [`install_ide`], then record the settings.
pub fn setup_ide(
    catalog: &Catalog,
    ide: TargetIde,
    root: &Path,
    options: &InstallOptions,
) -> Result<InstallReport> {
    let report = install_ide(catalog, ide, root, options)?;
    report.settings.save(&report.ide_dir)?;
    Ok(report)
}
