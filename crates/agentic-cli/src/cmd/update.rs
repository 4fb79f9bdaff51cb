use super::{print_options, print_report, print_settings_saved, InstallArgs};
use agentic_core::catalog::Catalog;
use agentic_core::ide::{resolve_targets, IdeSelection};
use agentic_core::install::{setup_ide, InstallOptions};
use agentic_core::paths;
use agentic_core::settings::read_settings;
use agentic_core::strategy::StrategyMode;
use agentic_core::workflows::validate_workflows;
use anyhow::Context;
use std::path::Path;

/// `agentic update`: reinstall into every detected (or requested) IDE using
/// the recorded namespace, models and workflow selection.
pub fn run(
    root: &Path,
    catalog: &Catalog,
    ide: Option<IdeSelection>,
    output: Option<String>,
) -> anyhow::Result<()> {
    let targets = resolve_targets(root, ide)?;
    catalog
        .verify()
        .context("content catalog failed its consistency check")?;

    let flags = InstallArgs {
        output,
        ..InstallArgs::default()
    };

    println!("Updating agentic in: {}", root.display());

    for ide in targets {
        let ide_dir = paths::ide_dir(root, ide);
        let stored = match read_settings(&ide_dir) {
            Ok(s) => Some(s),
            Err(e) => {
                tracing::warn!(ide = %ide, error = %e, "no usable settings, using defaults");
                None
            }
        };

        let template = flags.template_options(ide, None, stored.as_ref());
        let workflows = match stored.as_ref().and_then(|s| s.workflows.as_deref()) {
            Some(list) => Some(validate_workflows(list)?.known),
            None => None,
        };

        println!("\n{}:", ide.display_name());
        print_options(&template, workflows.as_deref());

        let options = InstallOptions {
            template,
            workflows,
            mode: StrategyMode::Update,
        };
        let report = setup_ide(catalog, ide, root, &options)
            .with_context(|| format!("failed to update {}", ide.display_name()))?;
        print_report(root, &report);
        print_settings_saved(root, &report);
    }

    println!("\nagentic updated to v{}.", agentic_core::settings::TOOL_VERSION);
    Ok(())
}
