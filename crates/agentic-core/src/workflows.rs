//! Static workflow → agent/skill dependency catalog, the resolver that unions
//! requirements for a selection, and the validator that gates user input.

use crate::error::{AgenticError, Result};
use crate::namespace::Namespace;
use crate::naming::{canonical_name, destination_name, ContentKind};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

// ---------------------------------------------------------------------------
// Dependency catalog
// ---------------------------------------------------------------------------

/// Agents and skills a workflow needs, by catalog base-name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkflowDependencies {
    pub agents: &'static [&'static str],
    pub skills: &'static [&'static str],
}

const WORKFLOW_DEPENDENCY_MAP: &[(&str, WorkflowDependencies)] = &[
    (
        "product-spec",
        WorkflowDependencies {
            agents: &[],
            skills: &["product-discovery", "brainstorming"],
        },
    ),
    (
        "technical-planning",
        WorkflowDependencies {
            agents: &["architect"],
            skills: &[
                "gather-technical-context",
                "technical-planning",
                "code",
                "typescript-engineer",
                "typescript-imports",
                "clean-architecture",
                "observability",
                "code-testing",
                "dx",
                "ux-patterns",
                "context7",
            ],
        },
    ),
    (
        "auto-implement",
        WorkflowDependencies {
            agents: &["architect", "editor", "test-engineer", "qa", "test-qa", "security-qa"],
            skills: &[
                "gather-technical-context",
                "technical-planning",
                "code",
                "frontend-design",
                "typescript-engineer",
                "typescript-imports",
                "clean-architecture",
                "observability",
                "code-testing",
                "dx",
                "ux-patterns",
                "context7",
                "qa",
                "security-qa",
            ],
        },
    ),
    (
        "implement",
        WorkflowDependencies {
            agents: &["editor", "test-engineer", "qa", "test-qa", "security-qa"],
            skills: &[
                "code",
                "frontend-design",
                "typescript-engineer",
                "typescript-imports",
                "clean-architecture",
                "observability",
                "code-testing",
                "dx",
                "ux-patterns",
                "context7",
                "qa",
                "security-qa",
            ],
        },
    ),
    (
        "quick-spec-and-implement",
        WorkflowDependencies {
            agents: &[
                "pm",
                "architect",
                "security",
                "editor",
                "test-engineer",
                "qa",
                "test-qa",
                "security-qa",
            ],
            skills: &[
                "product-manager",
                "gather-technical-context",
                "technical-planning",
                "code",
                "frontend-design",
                "typescript-engineer",
                "typescript-imports",
                "clean-architecture",
                "observability",
                "code-testing",
                "dx",
                "ux-patterns",
                "context7",
                "qa",
                "security-qa",
                "security-context",
            ],
        },
    ),
    (
        "debug",
        WorkflowDependencies {
            agents: &["investigator", "analyst", "test-engineer", "editor", "qa", "test-qa"],
            skills: &[
                "code",
                "typescript-engineer",
                "typescript-imports",
                "clean-architecture",
                "observability",
                "code-testing",
                "dx",
                "ux-patterns",
                "context7",
                "qa",
                "frontend-design",
            ],
        },
    ),
    (
        "frontend-development",
        WorkflowDependencies {
            agents: &["ui-ux-designer", "frontend-developer", "qa"],
            skills: &[
                "frontend-design",
                "ux-patterns",
                "refactoring-ui",
                "code",
                "typescript-engineer",
                "typescript-imports",
                "clean-architecture",
                "observability",
                "dx",
                "context7",
                "qa",
            ],
        },
    ),
];

/// Every workflow name, in catalog order.
pub const KNOWN_WORKFLOWS: &[&str] = &[
    "product-spec",
    "technical-planning",
    "auto-implement",
    "implement",
    "quick-spec-and-implement",
    "debug",
    "frontend-development",
];

pub fn workflow_dependencies(name: &str) -> Option<&'static WorkflowDependencies> {
    WORKFLOW_DEPENDENCY_MAP
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, deps)| deps)
}

pub fn is_known_workflow(name: &str) -> bool {
    workflow_dependencies(name).is_some()
}

pub fn known_workflows() -> Vec<String> {
    KNOWN_WORKFLOWS.iter().map(|w| w.to_string()).collect()
}

// ---------------------------------------------------------------------------
// ResolvedDependencies
// ---------------------------------------------------------------------------

/// Union of agent files, skill directories and workflow directories required
/// by a workflow selection. Entries are catalog names (canonical namespace)
/// unless produced by [`ResolvedDependencies::in_namespace`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedDependencies {
    pub agents: Vec<String>,
    pub skills: Vec<String>,
    pub workflows: Vec<String>,
}

impl ResolvedDependencies {
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty() && self.skills.is_empty() && self.workflows.is_empty()
    }

    /// Same selection with every entry renamed for `namespace`.
    pub fn in_namespace(&self, namespace: &Namespace) -> ResolvedDependencies {
        let rename = |entries: &[String], kind: ContentKind| -> Vec<String> {
            entries
                .iter()
                .map(|e| destination_name(e, kind, namespace))
                .collect()
        };
        ResolvedDependencies {
            agents: rename(&self.agents, ContentKind::Agent),
            skills: rename(&self.skills, ContentKind::Skill),
            workflows: rename(&self.workflows, ContentKind::Workflow),
        }
    }
}

fn push_unique(out: &mut Vec<String>, seen: &mut HashSet<String>, value: String) {
    if seen.insert(value.clone()) {
        out.push(value);
    }
}

/// Union the requirements of `workflows`.
///
/// Agents and skills are deduplicated (first-seen order). Workflows echo the
/// input list verbatim, unknown names included, since callers validate first.
pub fn resolve_workflow_dependencies<S: AsRef<str>>(workflows: &[S]) -> ResolvedDependencies {
    let mut agents = Vec::new();
    let mut skills = Vec::new();
    let mut seen_agents = HashSet::new();
    let mut seen_skills = HashSet::new();

    for workflow in workflows {
        let Some(deps) = workflow_dependencies(workflow.as_ref()) else {
            continue;
        };
        for agent in deps.agents {
            push_unique(
                &mut agents,
                &mut seen_agents,
                canonical_name(agent, ContentKind::Agent),
            );
        }
        for skill in deps.skills {
            push_unique(
                &mut skills,
                &mut seen_skills,
                canonical_name(skill, ContentKind::Skill),
            );
        }
    }

    ResolvedDependencies {
        agents,
        skills,
        workflows: workflows
            .iter()
            .map(|w| canonical_name(w.as_ref(), ContentKind::Workflow))
            .collect(),
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Outcome of [`validate_workflows`] when at least one name is known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedWorkflows {
    pub known: Vec<String>,
    pub skipped: Vec<String>,
}

impl ValidatedWorkflows {
    /// Non-fatal warning for dropped names.
    pub fn warning(&self) -> Option<String> {
        if self.skipped.is_empty() {
            return None;
        }
        Some(format!(
            "Warning: unknown workflows skipped: {}",
            self.skipped.join(", ")
        ))
    }
}

/// Split `names` into known and unknown workflows.
///
/// All unknown → `ALL_WORKFLOWS_UNKNOWN`. Otherwise the known names in input
/// order, with a `warn!` for anything dropped.
pub fn validate_workflows<S: AsRef<str>>(names: &[S]) -> Result<ValidatedWorkflows> {
    let (known, unknown): (Vec<String>, Vec<String>) = names
        .iter()
        .map(|n| n.as_ref().to_string())
        .partition(|n| is_known_workflow(n));

    if known.is_empty() {
        return Err(AgenticError::AllWorkflowsUnknown {
            message: format!(
                "Unknown workflows: {}. Available: {}",
                unknown.join(", "),
                KNOWN_WORKFLOWS.join(", ")
            ),
            unknown,
        });
    }

    let validated = ValidatedWorkflows {
        known,
        skipped: unknown,
    };
    if !validated.skipped.is_empty() {
        tracing::warn!(skipped = ?validated.skipped, "unknown workflows skipped");
    }
    Ok(validated)
}

/// Split a comma-separated `-w` value, trimming whitespace and dropping empties.
pub fn parse_workflow_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
