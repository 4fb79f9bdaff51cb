use crate::output::print_json;
use agentic_core::ide::detect_ides;
use agentic_core::paths;
use agentic_core::settings::read_settings;
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
struct InstalledVersion {
    ide: &'static str,
    name: &'static str,
    version: Option<String>,
    installed: Option<String>,
}

/// `agentic version`: installed version and date per detected IDE.
pub fn run(root: &Path, json: bool) -> anyhow::Result<()> {
    let detected = detect_ides(root);

    let rows: Vec<InstalledVersion> = detected
        .iter()
        .map(|&ide| {
            let settings = read_settings(&paths::ide_dir(root, ide)).ok();
            InstalledVersion {
                ide: ide.as_str(),
                name: ide.display_name(),
                installed: settings.as_ref().map(|s| {
                    s.installed_date().unwrap_or_else(|| {
                        s.last_update.split('T').next().unwrap_or_default().to_string()
                    })
                }),
                version: settings.map(|s| s.version),
            }
        })
        .collect();

    if json {
        return print_json(&rows);
    }

    println!("agentic {}", agentic_core::settings::TOOL_VERSION);
    if rows.is_empty() {
        println!("No IDE setup detected. Run `agentic init` to get started.");
        return Ok(());
    }
    for row in &rows {
        match (&row.version, &row.installed) {
            (Some(version), Some(date)) => {
                println!("{}: {version} (installed {date})", row.name)
            }
            _ => println!("{}: settings not found", row.name),
        }
    }
    Ok(())
}
