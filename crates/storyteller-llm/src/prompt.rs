//! Variable substitution for prompt templates.

use std::collections::HashMap;

/// Variable substitution context for prompt templates.
///
/// Supports variable substitution in strings using the `{varname}` syntax.
/// Substitution is a single pass: inserted values are never re-scanned, and
/// placeholders with no value (including the braces of embedded JSON
/// examples) are left untouched.
///
/// # Example
///
/// ```
/// use storyteller_llm::PromptVars;
///
/// let vars = PromptVars::new()
///     .with_var("count", "3")
///     .with_var("complexity", "Short sentences.");
///
/// assert_eq!(
///     vars.render("Suggest {count} actions. {complexity}"),
///     "Suggest 3 actions. Short sentences."
/// );
/// assert_eq!(vars.render(r#"{"list": []} {unknown}"#), r#"{"list": []} {unknown}"#);
/// ```
#[derive(Debug, Clone)]
pub struct PromptVars {
    vars: HashMap<String, String>,
}

impl PromptVars {
    /// Create a new empty context.
    pub fn new() -> Self {
        Self {
            vars: HashMap::new(),
        }
    }

    /// Add a variable.
    pub fn with_var(mut self, key: &str, value: impl Into<String>) -> Self {
        self.vars.insert(key.to_string(), value.into());
        self
    }

    /// Set a variable.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.vars.insert(key.to_string(), value.into());
    }

    /// Get a variable value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(|s| s.as_str())
    }

    /// Substitute variables in a template.
    pub fn render(&self, template: &str) -> String {
        let mut out = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let after = &rest[open + 1..];

            let name_len = after
                .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                .unwrap_or(after.len());
            let name = &after[..name_len];

            match (after[name_len..].starts_with('}'), self.vars.get(name)) {
                (true, Some(value)) if !name.is_empty() => {
                    out.push_str(value);
                    rest = &after[name_len + 1..];
                }
                _ => {
                    out.push('{');
                    rest = after;
                }
            }
        }
        out.push_str(rest);
        out
    }
}

impl Default for PromptVars {
    fn default() -> Self {
        Self::new()
    }
}

/// A named instruction template.
#[derive(Debug, Clone, Copy)]
pub struct PromptTemplate {
    name: &'static str,
    text: &'static str,
}

impl PromptTemplate {
    pub const fn new(name: &'static str, text: &'static str) -> Self {
        Self { name, text }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn text(&self) -> &'static str {
        self.text
    }

    /// Render the template with the given variables, trimming the outer
    /// whitespace of the raw literal.
    pub fn render(&self, vars: &PromptVars) -> String {
        vars.render(self.text.trim())
    }

    /// Names of the `{placeholders}` this template expects.
    pub fn placeholders(&self) -> Vec<&'static str> {
        placeholders(self.text)
    }
}

/// List the identifier placeholders in a template, in order of first use.
pub fn placeholders(template: &str) -> Vec<&str> {
    let mut names: Vec<&str> = Vec::new();
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        let after = &rest[open + 1..];
        let name_len = after
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(after.len());
        if name_len > 0 && after[name_len..].starts_with('}') {
            let name = &after[..name_len];
            if !names.contains(&name) {
                names.push(name);
            }
        }
        rest = after;
    }
    names
}
