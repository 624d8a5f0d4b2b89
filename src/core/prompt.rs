//! XML prompt sections for injecting skills into an agent's context.

use std::fmt::Write as _;

use super::skill::{SkillContent, SkillMetadata};

/// `<available_skills>` block listing metadata only.
///
/// Returns an empty string when there is nothing to list.
#[must_use]
pub fn render_catalog_prompt<'a, I>(skills: I) -> String
where
    I: IntoIterator<Item = &'a SkillMetadata>,
{
    let mut body = String::new();
    for meta in skills {
        body.push_str("  <skill>\n");
        push_element(&mut body, 4, "name", &meta.name);
        push_element(&mut body, 4, "description", &meta.description);
        push_element(&mut body, 4, "category", &meta.category);
        if !meta.tools.is_empty() {
            push_element(&mut body, 4, "tools", &meta.tools.join(", "));
        }
        body.push_str("  </skill>\n");
    }
    if body.is_empty() {
        return body;
    }
    format!("<available_skills>\n{body}</available_skills>\n")
}

/// `<skill>` block carrying the full instructions of one loaded skill.
#[must_use]
pub fn render_skill_prompt(content: &SkillContent) -> String {
    let meta = &content.metadata;
    let mut out = format!("<skill name=\"{}\">\n", escape_xml(&meta.name));
    push_element(&mut out, 2, "description", &meta.description);
    if !meta.tools.is_empty() {
        out.push_str("  <tools>\n");
        for tool in &meta.tools {
            push_element(&mut out, 4, "tool", tool);
        }
        out.push_str("  </tools>\n");
    }
    if !content.resources.is_empty() {
        out.push_str("  <resources>\n");
        for resource in &content.resources {
            push_element(&mut out, 4, "resource", &resource.display().to_string());
        }
        out.push_str("  </resources>\n");
    }
    out.push_str("  <instructions>\n");
    out.push_str(&escape_xml(content.instructions.trim_end()));
    out.push_str("\n  </instructions>\n</skill>\n");
    out
}

fn push_element(out: &mut String, indent: usize, tag: &str, text: &str) {
    let _ = writeln!(out, "{:indent$}<{tag}>{}</{tag}>", "", escape_xml(text));
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
