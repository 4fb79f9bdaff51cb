use crate::output::{print_json, print_table};
use agentic_core::catalog::Catalog;
use agentic_core::naming::{catalog_base_name, ContentKind};
use agentic_core::workflows::{workflow_dependencies, KNOWN_WORKFLOWS};
use anyhow::Context;
use serde::Serialize;

#[derive(Serialize)]
struct WorkflowEntry {
    name: &'static str,
    agents: &'static [&'static str],
    skills: &'static [&'static str],
}

#[derive(Serialize)]
struct ScriptedSkill {
    name: String,
    scripts: Vec<String>,
}

#[derive(Serialize)]
struct Listing {
    workflows: Vec<WorkflowEntry>,
    agents: Vec<String>,
    scripted_skills: Vec<ScriptedSkill>,
}

fn scripts_in(catalog: &Catalog, skill: &str) -> Vec<String> {
    let dir = format!("{}/scripts/", Catalog::skill_dir(skill));
    let Ok(files) = catalog.files(&dir) else {
        return Vec::new();
    };
    files
        .iter()
        .filter_map(|f| f.strip_prefix(&dir))
        .filter(|n| !n.contains('/') && n.ends_with(".sh"))
        .map(str::to_string)
        .collect()
}

/// `agentic list`: workflows with what they install, every catalog agent,
/// and the skills that ship scripts.
pub fn run(catalog: &Catalog, json: bool) -> anyhow::Result<()> {
    let workflows: Vec<WorkflowEntry> = KNOWN_WORKFLOWS
        .iter()
        .filter_map(|&name| {
            workflow_dependencies(name).map(|deps| WorkflowEntry {
                name,
                agents: deps.agents,
                skills: deps.skills,
            })
        })
        .collect();

    let manifest = catalog
        .full_manifest()
        .with_context(|| format!("failed to read catalog at {}", catalog.location()))?;
    let agents: Vec<String> = manifest
        .agents
        .iter()
        .filter_map(|a| catalog_base_name(a, ContentKind::Agent))
        .map(str::to_string)
        .collect();
    let scripted_skills: Vec<ScriptedSkill> = manifest
        .skills
        .iter()
        .filter_map(|s| {
            let base = catalog_base_name(s, ContentKind::Skill)?;
            let scripts = scripts_in(catalog, s);
            (!scripts.is_empty()).then(|| ScriptedSkill {
                name: base.to_string(),
                scripts,
            })
        })
        .collect();

    let listing = Listing {
        workflows,
        agents,
        scripted_skills,
    };
    if json {
        return print_json(&listing);
    }

    println!("Workflows:\n");
    let rows: Vec<Vec<String>> = listing
        .workflows
        .iter()
        .map(|w| {
            vec![
                w.name.to_string(),
                w.agents.len().to_string(),
                w.skills.len().to_string(),
            ]
        })
        .collect();
    print_table(&["WORKFLOW", "AGENTS", "SKILLS"], &rows);

    for w in &listing.workflows {
        println!("\n{}", w.name);
        if w.agents.is_empty() {
            println!("  agents: none");
        } else {
            println!("  agents: {}", w.agents.join(", "));
        }
        println!("  skills: {}", w.skills.join(", "));
    }

    println!("\nAgents:");
    for agent in &listing.agents {
        println!("  - {agent}");
    }

    if !listing.scripted_skills.is_empty() {
        println!("\nSkills with scripts:");
        for skill in &listing.scripted_skills {
            println!("  - {} ({})", skill.name, skill.scripts.join(", "));
        }
    }
    Ok(())
}
