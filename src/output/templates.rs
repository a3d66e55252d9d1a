// Template engine for generating HTML output

use crate::error::Result;
use crate::model::{IndexEntry, PageModel};
use std::collections::HashMap;
use tera::{Context, Tera, Value};

/// Template engine wrapping Tera with custom filters and templates
pub struct TemplateEngine {
    tera: Tera,
}

impl TemplateEngine {
    /// Create a new template engine with embedded templates
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        tera.add_raw_templates(vec![
            ("base.html", include_str!("../../templates/base.html.tera")),
            ("page.html", include_str!("../../templates/page.html.tera")),
            ("index.html", include_str!("../../templates/index.html.tera")),
        ])?;

        register_filters(&mut tera);
        Ok(Self { tera })
    }

    /// Render one package page
    pub fn render_page(&self, page: &PageModel) -> Result<String> {
        let mut context = Context::new();
        context.insert("page", page);
        context.insert("methods", &page.methods().collect::<Vec<_>>());
        context.insert("entity_count", &page.entity_count());

        Ok(self.tera.render("page.html", &context)?)
    }

    /// Render the index page
    pub fn render_index(&self, entries: &[IndexEntry], project_name: &str) -> Result<String> {
        let mut context = Context::new();
        context.insert("project_name", project_name);
        context.insert("entries", entries);

        Ok(self.tera.render("index.html", &context)?)
    }
}

fn register_filters(tera: &mut Tera) {
    tera.register_filter("pluralize", pluralize);
    tera.register_filter("code_block", code_block);
    tera.register_filter("slugify", slugify_filter);
}

/// Pluralize a word based on count
fn pluralize(value: &Value, args: &HashMap<String, Value>) -> tera::Result<Value> {
    let count = value.as_u64().unwrap_or(0);
    let singular = args
        .get("singular")
        .and_then(|v| v.as_str())
        .unwrap_or("item");
    let default_plural = format!("{}s", singular);
    let plural = args
        .get("plural")
        .and_then(|v| v.as_str())
        .unwrap_or(&default_plural);

    if count == 1 {
        Ok(Value::String(format!("{} {}", count, singular)))
    } else {
        Ok(Value::String(format!("{} {}", count, plural)))
    }
}

/// Escaped Go source in a `pre` block; mark the result `safe` in templates
fn code_block(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let code = value.as_str().unwrap_or("");
    Ok(Value::String(format!(
        "<pre><code class=\"language-go\">{}</code></pre>",
        html_escape(code)
    )))
}

fn slugify_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let s = value.as_str().unwrap_or("");
    Ok(Value::String(slugify(s)))
}

/// Convert text to an anchor-friendly slug
pub fn slugify(s: &str) -> String {
    s.to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Escape HTML special characters
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
