use super::{print_options, print_report, print_settings_saved, InstallArgs};
use agentic_core::catalog::Catalog;
use agentic_core::install::{setup_ide, InstallOptions};
use agentic_core::strategy::StrategyMode;
use anyhow::Context;
use std::path::Path;

/// `agentic init`: install the catalog (or a workflow selection) into each
/// requested IDE. Defaults to both IDEs.
pub fn run(root: &Path, catalog: &Catalog, args: &InstallArgs) -> anyhow::Result<()> {
    let namespace = args.parsed_namespace()?;
    let workflows = args.selected_workflows()?;
    catalog
        .verify()
        .context("content catalog failed its consistency check")?;

    println!("Initializing agentic in: {}", root.display());

    for ide in args.ide.unwrap_or_default().targets() {
        let template = args.template_options(ide, namespace.as_ref(), None);
        println!("\n{}:", ide.display_name());
        print_options(&template, workflows.as_deref());

        let options = InstallOptions {
            template,
            workflows: workflows.clone(),
            mode: StrategyMode::Init,
        };
        let report = setup_ide(catalog, ide, root, &options)
            .with_context(|| format!("failed to set up {}", ide.display_name()))?;
        print_report(root, &report);
        print_settings_saved(root, &report);
    }

    println!("\nagentic initialized successfully.");
    Ok(())
}
