//! Render command - render a template into a scratch container

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use colored::Colorize;
use serde_json::json;
use tagtree_core::dom::inner_html;
use tagtree_core::{Document, Hole, MutationCounts, Renderer, TemplateSite, Value};

use crate::output;
use crate::values::SiteRegistry;

/// Result of one pass.
struct Pass {
    html: String,
    counts: MutationCounts,
}

/// Render a template once per values file
///
/// Every pass renders into the same container, so later passes show what
/// an update costs compared to the first render.
///
/// # Arguments
///
/// * `file` - Template file to render
/// * `passes` - One JSON file per pass, each holding an array of hole values
/// * `svg` - Parse in SVG context
/// * `stats` - Report mutation counts per pass
/// * `json` - Output as JSON if true
/// * `config` - Optional engine configuration file
pub fn run(
    file: &Path,
    passes: &[PathBuf],
    svg: bool,
    stats: bool,
    json: bool,
    config: Option<&Path>,
) -> Result<()> {
    let config = super::load_config(config)?;
    let source = super::read_template(file)?;

    let renderer = Renderer::with_config(Document::new(), config);
    let container = renderer.document().create_element("body");
    let site = TemplateSite::leak(source, svg);
    let mut registry = SiteRegistry::default();

    let mut results = Vec::with_capacity(passes.len());
    for (index, path) in passes.iter().enumerate() {
        let number = index + 1;
        let values = load_values(path, &mut registry)
            .with_context(|| format!("Pass {number}: bad values file {}", path.display()))?;

        let before = renderer.document().stats();
        renderer
            .render(&container, Hole::new(site, values))
            .with_context(|| format!("Pass {number} failed"))?;
        let counts = renderer.document().stats().since(&before);
        log::debug!("pass {number}: {counts:?}");

        results.push(Pass {
            html: inner_html(&container),
            counts,
        });
    }

    if json {
        render_json(&renderer, &results)
    } else {
        render_human(&results, stats)
    }
}

fn load_values(path: &Path, registry: &mut SiteRegistry) -> Result<Vec<Value>> {
    let text = std::fs::read_to_string(path).context("Failed to read file")?;
    let parsed: serde_json::Value = serde_json::from_str(&text).context("Not valid JSON")?;
    let serde_json::Value::Array(items) = parsed else {
        bail!("Values must be a JSON array");
    };
    items.iter().map(|item| registry.to_value(item)).collect()
}

fn render_json(renderer: &Renderer, results: &[Pass]) -> Result<()> {
    let passes: Vec<serde_json::Value> = results
        .iter()
        .map(|pass| json!({ "html": pass.html, "stats": pass.counts }))
        .collect();
    let output = json!({
        "passes": passes,
        "templates": renderer.engine().templates().len(),
    });
    output::print_json(&output)?;
    Ok(())
}

fn render_human(results: &[Pass], stats: bool) -> Result<()> {
    for (index, pass) in results.iter().enumerate() {
        let label = format!("pass {}:", index + 1);
        let label = if pass.counts.is_quiet() {
            label.green()
        } else {
            label.yellow()
        };
        if stats {
            output::print_text(&format!("{} {}", label, describe(&pass.counts)))?;
        } else {
            output::print_text(&label.to_string())?;
        }
        output::print_text(&pass.html)?;
    }
    Ok(())
}

fn describe(counts: &MutationCounts) -> String {
    format!(
        "created {}, inserted {}, moved {}, removed {}, attributes {}, text {}, properties {}, listeners {}",
        counts.created,
        counts.inserted,
        counts.moved,
        counts.removed,
        counts.attributes_set + counts.attributes_removed,
        counts.data_written,
        counts.properties_set,
        counts.listeners_added + counts.listeners_removed,
    )
}
