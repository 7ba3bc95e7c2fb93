// Shared prompt fragments and the template type every analyzer uses.
// Each analyzer's concrete template lives in analysis/prompts.rs.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// A named prompt template. `role` opens the system prompt; the JSON-only
/// rule is appended to it for every call.
#[derive(Debug, Clone, Copy)]
pub struct PromptTemplate {
    pub name: &'static str,
    pub role: &'static str,
    pub template: &'static str,
}

impl PromptTemplate {
    pub fn system_prompt(&self) -> String {
        format!("{} {JSON_ONLY_SYSTEM}", self.role)
    }

    pub fn render(&self, vars: &[(&str, &str)]) -> String {
        render_template(self.template, vars)
    }
}

/// Replaces `{name}` placeholders in a single pass.
///
/// Only names present in `vars` are substituted; any other brace is copied
/// through untouched, so inline JSON examples survive. Substituted values are
/// never re-scanned.
pub fn render_template(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        let substitution = after.find('}').and_then(|close| {
            let name = &after[..close];
            vars.iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (close, *value))
        });

        match substitution {
            Some((close, value)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}
