pub mod init;
pub mod list;
pub mod migrate;
pub mod settings;
pub mod update;
pub mod version;

use crate::output::display_rel;
use agentic_core::ide::{IdeSelection, TargetIde};
use agentic_core::install::InstallReport;
use agentic_core::namespace::Namespace;
use agentic_core::settings::AgenticSettings;
use agentic_core::strategy::MarkerOutcome;
use agentic_core::template::TemplateOptions;
use agentic_core::workflows::{parse_workflow_list, validate_workflows};
use clap::Args;
use std::path::Path;

// ---------------------------------------------------------------------------
// Shared install flags
// ---------------------------------------------------------------------------

#[derive(Args, Debug, Clone, Default)]
pub struct InstallArgs {
    /// Target IDE: claude, cursor, or both
    #[arg(long)]
    pub ide: Option<IdeSelection>,

    /// Prefix for installed names (lowercase, 2-30 chars, default: agentic)
    #[arg(short = 'n', long)]
    pub namespace: Option<String>,

    /// Output folder inside the IDE directory (default: _<namespace>_output)
    #[arg(long)]
    pub output: Option<String>,

    /// Comma-separated workflows to install (default: everything)
    #[arg(short = 'w', long)]
    pub workflows: Option<String>,

    /// Model for planning and analysis agents
    #[arg(long)]
    pub high_thinking_model: Option<String>,

    /// Model for code-writing agents
    #[arg(long)]
    pub code_writing_model: Option<String>,

    /// Model for review agents
    #[arg(long)]
    pub qa_model: Option<String>,
}

impl InstallArgs {
    pub fn parsed_namespace(&self) -> anyhow::Result<Option<Namespace>> {
        Ok(self
            .namespace
            .as_deref()
            .map(str::parse::<Namespace>)
            .transpose()?)
    }

    /// Validated `-w` selection. Unknown names are dropped with a warning;
    /// if nothing is left the command fails.
    pub fn selected_workflows(&self) -> anyhow::Result<Option<Vec<String>>> {
        let Some(raw) = self.workflows.as_deref() else {
            return Ok(None);
        };
        let validated = validate_workflows(&parse_workflow_list(raw))?;
        if let Some(warning) = validated.warning() {
            eprintln!("{warning}");
        }
        Ok(Some(validated.known))
    }

    /// Flags layered over `stored` settings, then over IDE defaults.
    pub fn template_options(
        &self,
        ide: TargetIde,
        namespace: Option<&Namespace>,
        stored: Option<&AgenticSettings>,
    ) -> TemplateOptions {
        let base = match stored {
            Some(s) => s.template_options(ide),
            None => TemplateOptions::for_ide(ide),
        };
        let namespace = namespace.cloned().unwrap_or_else(|| base.namespace.clone());

        // A stored output folder that was only the old namespace's default
        // follows the namespace.
        let stored_is_default = stored
            .map(|s| s.output_folder == s.namespace.output_folder())
            .unwrap_or(true);
        let output_folder = match &self.output {
            Some(out) => out.clone(),
            None if stored_is_default => namespace.output_folder(),
            None => base.output_folder,
        };

        TemplateOptions {
            namespace,
            output_folder,
            high_thinking_model_name: self
                .high_thinking_model
                .clone()
                .unwrap_or(base.high_thinking_model_name),
            code_writing_model_name: self
                .code_writing_model
                .clone()
                .unwrap_or(base.code_writing_model_name),
            qa_model_name: self.qa_model.clone().unwrap_or(base.qa_model_name),
        }
    }
}

// ---------------------------------------------------------------------------
// Reporting
// ---------------------------------------------------------------------------

pub fn print_options(options: &TemplateOptions, workflows: Option<&[String]>) {
    println!("  namespace:     {}", options.namespace);
    println!("  output folder: {}", options.output_folder);
    match workflows {
        Some(list) => println!("  workflows:     {}", list.join(", ")),
        None => println!("  workflows:     all"),
    }
}

pub fn print_report(root: &Path, report: &InstallReport) {
    let ide_dir = display_rel(root, &report.ide_dir);
    println!(
        "  installed: {} files into {ide_dir}/ ({} agents, {} skills, {} workflows)",
        report.files_written,
        report.installed.agents.len(),
        report.installed.skills.len(),
        report.installed.workflows.len(),
    );
    if report.scripts_marked > 0 {
        println!("  updated: {} scripts marked executable", report.scripts_marked);
    }
    match &report.marker {
        MarkerOutcome::Created(path) => println!("  created: {}", display_rel(root, path)),
        MarkerOutcome::Appended(path) => {
            println!("  updated: {} ({} section added)", display_rel(root, path), report.settings.namespace)
        }
        MarkerOutcome::Skipped(path) => println!(
            "  exists:  {} ({} section already present)",
            display_rel(root, path),
            report.settings.namespace
        ),
        MarkerOutcome::Updated { path, backup } => println!(
            "  updated: {} (backup: {})",
            display_rel(root, path),
            display_rel(root, backup)
        ),
    }
    if let Some(entry) = &report.gitignore_entry {
        println!("  updated: .gitignore ({entry})");
    }
}

pub fn print_settings_saved(root: &Path, report: &InstallReport) {
    println!(
        "  updated: {}",
        display_rel(root, &agentic_core::paths::settings_path(&report.ide_dir))
    );
}
