//! Inspect command - show how a template parses

use std::path::Path;

use anyhow::Result;
use colored::Colorize;
use serde_json::json;
use tagtree_core::{Document, Engine, Template, TemplateSite};

use crate::output;

/// Parse a template file and describe its holes
///
/// # Arguments
///
/// * `file` - Template file to parse
/// * `svg` - Parse in SVG context
/// * `json` - Output as JSON if true
/// * `config` - Optional engine configuration file
pub fn run(file: &Path, svg: bool, json: bool, config: Option<&Path>) -> Result<()> {
    let config = super::load_config(config)?;
    let source = super::read_template(file)?;
    let engine = Engine::with_config(Document::new(), config);

    let site = TemplateSite::leak(source, svg);
    let template = engine.template(site)?;

    if json {
        render_json(&template)?;
    } else {
        render_human(&template)?;
    }
    Ok(())
}

fn render_json(template: &Template) -> Result<()> {
    let output = json!({
        "svg": template.is_svg(),
        "single_root": template.is_single_root(),
        "holes": template.hole_count(),
        "markup": template.markup(),
        "entries": template.entries(),
    });
    output::print_json(&output)?;
    Ok(())
}

fn render_human(template: &Template) -> Result<()> {
    let shape = if template.is_single_root() {
        "single root"
    } else {
        "fragment"
    };
    output::print_text(&format!(
        "{} {} hole(s), {}",
        "template:".bold(),
        template.hole_count(),
        shape
    ))?;
    output::print_text(&format!("{} {}", "markup:".bold(), template.markup()))?;

    for (index, entry) in template.entries().iter().enumerate() {
        let path = entry
            .path
            .iter()
            .map(usize::to_string)
            .collect::<Vec<_>>()
            .join("/");
        let name = entry
            .updater
            .name()
            .map(|name| format!(" {}", name.cyan()))
            .unwrap_or_default();
        output::print_text(&format!(
            "  #{index} [{path}] {}{name}",
            entry.updater.kind().green()
        ))?;
    }
    Ok(())
}
