//! Pure text transforms applied to catalog content on its way into a project.
//!
//! 1. Placeholder substitution (`{ide-folder}`, `{output-folder}`, model names, ...).
//! 2. Frontmatter identifier prefixing (`name: ns:kind:value`, agent `skills: [...]`).
//! 3. Namespace rewriting from the catalog's canonical namespace to the target.

use crate::ide::TargetIde;
use crate::namespace::{Namespace, CANONICAL_NAMESPACE};
use crate::naming::{catalog_base_name, ContentKind};
use crate::workflows::ResolvedDependencies;
use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// TemplateOptions
// ---------------------------------------------------------------------------

/// Caller-supplied values for one processing run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateOptions {
    pub namespace: Namespace,
    pub output_folder: String,
    pub high_thinking_model_name: String,
    pub code_writing_model_name: String,
    pub qa_model_name: String,
}

impl TemplateOptions {
    /// Canonical namespace, default output folder and the IDE's default models.
    pub fn for_ide(ide: TargetIde) -> Self {
        Self::for_namespace(ide, Namespace::canonical())
    }

    /// Defaults for `namespace`: its own output folder (`_foo_output`) and
    /// the IDE's default models.
    pub fn for_namespace(ide: TargetIde, namespace: Namespace) -> Self {
        let models = ide.default_models();
        Self {
            output_folder: namespace.output_folder(),
            namespace,
            high_thinking_model_name: models.high_thinking.to_string(),
            code_writing_model_name: models.code_writing.to_string(),
            qa_model_name: models.qa.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Step 1: placeholders
// ---------------------------------------------------------------------------

fn placeholder_table(ide: TargetIde, options: &TemplateOptions) -> [(&'static str, &str); 8] {
    [
        ("{ide-folder}", ide.folder()),
        ("{ide-invoke-prefix}", ide.invoke_prefix()),
        ("{subagent-type}", ide.subagent_type()),
        ("{output-folder}", options.output_folder.as_str()),
        ("{outputFolder}", options.output_folder.as_str()),
        ("{highThinkingModelName}", options.high_thinking_model_name.as_str()),
        ("{codeWritingModelName}", options.code_writing_model_name.as_str()),
        ("{qaModelName}", options.qa_model_name.as_str()),
    ]
}

fn substitute_placeholders(content: &str, ide: TargetIde, options: &TemplateOptions) -> String {
    let mut out = content.to_string();
    for (token, value) in placeholder_table(ide, options) {
        if out.contains(token) {
            out = out.replace(token, value);
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Step 2: frontmatter identifiers
// ---------------------------------------------------------------------------

static NAME_LINE_RE: OnceLock<Regex> = OnceLock::new();
static SKILLS_LINE_RE: OnceLock<Regex> = OnceLock::new();

fn name_line_re() -> &'static Regex {
    NAME_LINE_RE.get_or_init(|| Regex::new(r"^name:[ \t]*(\S.*?)[ \t]*$").unwrap())
}

fn skills_line_re() -> &'static Regex {
    SKILLS_LINE_RE.get_or_init(|| Regex::new(r"^skills:[ \t]*\[(.*)\][ \t]*$").unwrap())
}

/// Byte range of the YAML frontmatter body (between the `---` fences), if any.
fn frontmatter_range(content: &str) -> Option<(usize, usize)> {
    let start = if content.starts_with("---\n") {
        4
    } else if content.starts_with("---\r\n") {
        5
    } else {
        return None;
    };
    let end = content[start..]
        .find("\n---")
        .map(|i| start + i + 1)
        .or_else(|| content[start..].starts_with("---").then_some(start))?;
    Some((start, end))
}

fn prefix_skill_tokens(list: &str, namespace: &Namespace) -> String {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            if s.contains(':') {
                s.to_string()
            } else {
                format!("{namespace}:skill:{s}")
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn prefix_identifiers(content: &str, kind: ContentKind, namespace: &Namespace) -> String {
    let (start, end) = frontmatter_range(content).unwrap_or((0, content.len()));
    let mut out = String::with_capacity(content.len() + 32);
    out.push_str(&content[..start]);

    let mut name_done = false;
    let mut skills_done = kind != ContentKind::Agent;
    for line in content[start..end].split_inclusive('\n') {
        let (body, ending) = split_line_ending(line);
        if !name_done {
            if let Some(caps) = name_line_re().captures(body) {
                name_done = true;
                let value = &caps[1];
                if value.contains(':') {
                    out.push_str(line);
                } else {
                    out.push_str(&format!("name: {namespace}:{kind}:{value}{ending}"));
                }
                continue;
            }
        }
        if !skills_done {
            if let Some(caps) = skills_line_re().captures(body) {
                skills_done = true;
                let skills = prefix_skill_tokens(&caps[1], namespace);
                out.push_str(&format!("skills: [{skills}]{ending}"));
                continue;
            }
        }
        out.push_str(line);
    }

    out.push_str(&content[end..]);
    out
}

fn split_line_ending(line: &str) -> (&str, &str) {
    if let Some(body) = line.strip_suffix("\r\n") {
        (body, "\r\n")
    } else if let Some(body) = line.strip_suffix('\n') {
        (body, "\n")
    } else {
        (line, "")
    }
}

// ---------------------------------------------------------------------------
// Step 3: namespace rewriting
// ---------------------------------------------------------------------------

/// One literal rewrite. `bounded` rules only fire when the match is not
/// glued to a preceding identifier character, so already-rewritten text
/// (e.g. `my-agentic:skill:`) is left alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteRule {
    pub from: String,
    pub to: String,
    pub bounded: bool,
}

/// Ordered rules taking canonical-namespace text to `target`.
/// Empty when `target` is the canonical namespace.
pub fn namespace_rules(target: &Namespace) -> Vec<RewriteRule> {
    if target.is_canonical() {
        return Vec::new();
    }
    let canon = CANONICAL_NAMESPACE;
    let ns = target.as_str();
    let bounded = |from: String, to: String| RewriteRule {
        from,
        to,
        bounded: true,
    };
    let mut rules = Vec::with_capacity(9);
    for kind in ["skill", "workflow", "agent"] {
        rules.push(bounded(format!("{canon}:{kind}:"), format!("{ns}:{kind}:")));
    }
    rules.push(RewriteRule {
        from: format!("/{canon}:"),
        to: format!("/{ns}:"),
        bounded: false,
    });
    for kind in ["agent", "skill", "workflow"] {
        rules.push(bounded(format!("{canon}-{kind}-"), format!("{ns}-{kind}-")));
    }
    rules.push(RewriteRule {
        from: Namespace::canonical().section_marker(),
        to: target.section_marker(),
        bounded: false,
    });
    rules.push(RewriteRule {
        from: Namespace::canonical().output_folder(),
        to: target.output_folder(),
        bounded: false,
    });
    rules
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

fn apply_rule(content: &str, rule: &RewriteRule) -> String {
    let mut out = String::with_capacity(content.len());
    let mut last = 0;
    for (idx, _) in content.match_indices(rule.from.as_str()) {
        if rule.bounded && content[..idx].chars().next_back().is_some_and(is_ident_char) {
            continue;
        }
        out.push_str(&content[last..idx]);
        out.push_str(&rule.to);
        last = idx + rule.from.len();
    }
    out.push_str(&content[last..]);
    out
}

/// Rewrite canonical-namespace identifiers, file prefixes, the framework
/// heading and the default output folder to `target`.
pub fn rewrite_namespace(content: &str, target: &Namespace) -> String {
    namespace_rules(target)
        .iter()
        .fold(content.to_string(), |acc, rule| {
            if acc.contains(rule.from.as_str()) {
                apply_rule(&acc, rule)
            } else {
                acc
            }
        })
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

/// Run all three steps over `content`. Pure: no I/O.
pub fn process_template(
    content: &str,
    ide: TargetIde,
    options: &TemplateOptions,
    kind: ContentKind,
) -> String {
    let mut out = substitute_placeholders(content, ide, options);
    if kind.is_namespaced() {
        out = prefix_identifiers(&out, kind, &options.namespace);
    }
    rewrite_namespace(&out, &options.namespace)
}

// ---------------------------------------------------------------------------
// Marker template filtering
// ---------------------------------------------------------------------------

/// Drop markdown table rows that point at a workflow, skill or agent that is
/// not part of `deps` (catalog names). Rows without identifiers are kept.
pub fn strip_uninstalled_rows(
    content: &str,
    deps: &ResolvedDependencies,
    namespace: &Namespace,
) -> String {
    let installed = |entries: &[String], kind: ContentKind| -> HashSet<String> {
        entries
            .iter()
            .filter_map(|e| catalog_base_name(e, kind))
            .map(str::to_string)
            .collect()
    };
    let agents = installed(deps.agents.as_slice(), ContentKind::Agent);
    let skills = installed(deps.skills.as_slice(), ContentKind::Skill);
    let workflows = installed(deps.workflows.as_slice(), ContentKind::Workflow);

    let pattern = format!(
        r"{}[:-](agent|skill|workflow)[:-]([a-z0-9][a-z0-9-]*)",
        regex::escape(namespace.as_str())
    );
    let Ok(re) = Regex::new(&pattern) else {
        return content.to_string();
    };

    content
        .split_inclusive('\n')
        .filter(|line| {
            if !line.trim_start().starts_with('|') {
                return true;
            }
            re.captures_iter(line).all(|caps| {
                let base = caps[2].trim_end_matches('-');
                match &caps[1] {
                    "agent" => agents.contains(base),
                    "skill" => skills.contains(base),
                    _ => workflows.contains(base),
                }
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
