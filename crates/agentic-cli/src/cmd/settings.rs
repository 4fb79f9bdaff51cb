use super::{print_options, print_report, print_settings_saved, InstallArgs};
use crate::output::display_rel;
use agentic_core::catalog::Catalog;
use agentic_core::cleanup::cleanup_after_reselect;
use agentic_core::ide::resolve_targets;
use agentic_core::install::{install_ide, installed_selection, InstallOptions};
use agentic_core::paths;
use agentic_core::settings::read_settings;
use agentic_core::strategy::StrategyMode;
use anyhow::Context;
use clap::Subcommand;
use std::path::Path;

// ---------------------------------------------------------------------------
// Subcommand types
// ---------------------------------------------------------------------------

#[derive(Subcommand)]
pub enum SettingsSubcommand {
    /// Merge the given flags over the recorded settings, reinstall, and
    /// remove anything the new selection no longer needs
    Apply(InstallArgs),
}

pub fn run(root: &Path, catalog: &Catalog, subcommand: SettingsSubcommand) -> anyhow::Result<()> {
    match subcommand {
        SettingsSubcommand::Apply(args) => apply(root, catalog, &args),
    }
}

fn apply(root: &Path, catalog: &Catalog, args: &InstallArgs) -> anyhow::Result<()> {
    let namespace = args.parsed_namespace()?;
    let requested = args.selected_workflows()?;
    let targets = resolve_targets(root, args.ide)?;
    catalog
        .verify()
        .context("content catalog failed its consistency check")?;

    println!("Applying settings in: {}", root.display());

    for ide in targets {
        let ide_dir = paths::ide_dir(root, ide);
        let stored = read_settings(&ide_dir)
            .with_context(|| format!("cannot apply settings for {}", ide.display_name()))?;

        let template = args.template_options(ide, namespace.as_ref(), Some(&stored));
        let workflows = requested.clone().or_else(|| stored.workflows.clone());

        println!("\n{}:", ide.display_name());
        print_options(&template, workflows.as_deref());

        let options = InstallOptions {
            template,
            workflows,
            mode: StrategyMode::Update,
        };
        let report = install_ide(catalog, ide, root, &options)
            .with_context(|| format!("failed to reinstall {}", ide.display_name()))?;
        print_report(root, &report);

        let previous = installed_selection(catalog, stored.workflows.as_deref())
            .context("failed to list the previous install")?;
        let removed = cleanup_after_reselect(
            &ide_dir,
            &previous,
            &stored.namespace,
            &report.installed,
            &options.template.namespace,
        )
        .with_context(|| format!("failed to remove stale files for {}", ide.display_name()))?;
        for path in &removed {
            println!("  removed: {}", display_rel(root, path));
        }

        // Recorded last, so a failed cleanup is retried from the old selection.
        report
            .settings
            .save(&ide_dir)
            .with_context(|| format!("failed to save settings for {}", ide.display_name()))?;
        print_settings_saved(root, &report);
    }

    println!("\nSettings applied.");
    Ok(())
}
