use super::InstallArgs;
use agentic_core::catalog::Catalog;
use agentic_core::ide::detect_ides;
use agentic_core::migrate::{backup_legacy_artifacts, backup_timestamp};
use agentic_core::workflows::{parse_workflow_list, validate_workflows};
use anyhow::Context;
use std::path::Path;

/// `agentic migrate`: move un-namespaced artifacts into a timestamped backup
/// directory per IDE, then run `init` with the same flags.
pub fn run(root: &Path, catalog: &Catalog, args: &InstallArgs) -> anyhow::Result<()> {
    // Fail on bad flags before anything is moved.
    args.parsed_namespace()?;
    if let Some(raw) = args.workflows.as_deref() {
        validate_workflows(&parse_workflow_list(raw))?;
    }

    let targets = match args.ide {
        Some(selection) => selection.targets(),
        None => detect_ides(root),
    };
    let timestamp = backup_timestamp(chrono::Local::now());
    let mut backups = Vec::new();

    if targets.is_empty() {
        println!("Warning: No IDE setup detected. Running init...\n");
    } else {
        println!("Migrating...\n");
        for ide in targets {
            let report = backup_legacy_artifacts(root, ide, &timestamp).with_context(|| {
                format!("failed to back up old artifacts in {}/", ide.folder())
            })?;
            if report.moved.is_empty() {
                println!("  No old artifacts found in {}/", ide.folder());
                continue;
            }
            for rel in &report.moved {
                println!(
                    "  Backed up: {}/{} -> {}/{}",
                    ide.folder(),
                    rel.display(),
                    report.backup_dir,
                    rel.display()
                );
            }
            backups.push(report.backup_dir);
        }
        println!();
    }

    super::init::run(root, catalog, args).context("init failed during migrate")?;

    if !backups.is_empty() {
        println!("\nReview backup dirs and delete when satisfied:");
        for dir in &backups {
            println!("  rm -rf {dir}");
        }
    }
    Ok(())
}
