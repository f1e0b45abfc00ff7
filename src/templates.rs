use std::path::Path;

use tera::Tera;

use crate::error::AppError;

/// Templates compiled into the binary, used when no template directory exists
const EMBEDDED_TEMPLATES: [(&str, &str); 3] = [
    ("base.html", include_str!("../templates/base.html")),
    ("index.html", include_str!("../templates/index.html")),
    ("info.html", include_str!("../templates/info.html")),
];

/// Initialize the Tera template engine.
///
/// Templates are loaded from `dir` when it exists so they can be customised
/// without rebuilding; otherwise the embedded copies are used.
pub fn init_templates(dir: &str) -> Result<Tera, AppError> {
    if Path::new(dir).is_dir() {
        let glob = format!("{}/**/*.html", dir.trim_end_matches('/'));
        tracing::debug!(%glob, "Loading templates from disk");
        let mut tera = Tera::new(&glob)?;
        tera.set_escape_fn(escape_html);
        ensure_required(&tera)?;
        Ok(tera)
    } else {
        tracing::info!(dir, "Template directory not found, using embedded templates");
        embedded_templates()
    }
}

/// Build a Tera instance from the embedded templates only.
pub fn embedded_templates() -> Result<Tera, AppError> {
    let mut tera = Tera::default();
    tera.add_raw_templates(EMBEDDED_TEMPLATES)?;
    tera.set_escape_fn(escape_html);
    Ok(tera)
}

/// HTML escaping that leaves `/` alone.
///
/// Tera's default escaper also encodes `/`, which mangles the `N/A`
/// placeholder and URLs in page source without adding safety in text or
/// quoted attribute contexts.
fn escape_html(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            '"' => output.push_str("&quot;"),
            '\'' => output.push_str("&#x27;"),
            _ => output.push(c),
        }
    }
    output
}

/// A template directory missing a page template would only fail at request
/// time, so check at startup.
fn ensure_required(tera: &Tera) -> Result<(), AppError> {
    let loaded: Vec<&str> = tera.get_template_names().collect();
    for (name, _) in EMBEDDED_TEMPLATES {
        if !loaded.contains(&name) {
            return Err(AppError::Internal(format!(
                "Template '{}' not found in template directory",
                name
            )));
        }
    }
    Ok(())
}
