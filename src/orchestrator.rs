//! Run orchestration.
//!
//! This module drives one run end to end: generate the topology, write the
//! seed header and manifest stream, and optionally write the graph
//! description next to it.

use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use log::info;
use std::fs;
use std::io::Write;

use crate::config::Settings;
use crate::manifest::ManifestRenderer;
use crate::topology::ServiceGraph;

/// Write the comment line recording which seed produced the stream
pub fn write_seed_header<W: Write + ?Sized>(sink: &mut W, seed: i64) -> std::io::Result<()> {
    writeln!(sink, "# Using seed: {}", seed)
}

/// Generate the topology for `settings` and write its manifests to `sink`.
///
/// Returns the generated graph so callers can inspect or describe it.
pub fn run<W: Write + ?Sized>(settings: &Settings, sink: &mut W) -> Result<ServiceGraph> {
    let renderer = ManifestRenderer::new().wrap_err("Failed to parse built-in templates")?;
    run_with_renderer(&renderer, settings, sink)
}

/// Same as [`run`], with a caller-supplied renderer
pub fn run_with_renderer<W: Write + ?Sized>(
    renderer: &ManifestRenderer,
    settings: &Settings,
    sink: &mut W,
) -> Result<ServiceGraph> {
    let params = &settings.generator;

    write_seed_header(sink, params.seed).wrap_err("Failed to write seed header")?;

    let graph = params.generate();

    renderer
        .render(&graph, &settings.render, sink)
        .wrap_err("Failed to render manifests")?;
    sink.flush().wrap_err("Failed to flush manifest output")?;

    if let Some(path) = &settings.dot_output {
        fs::write(path, graph.describe())
            .wrap_err_with(|| format!("Failed to write graph description '{}'", path.display()))?;
        info!("Wrote graph description to {:?}", path);
    }

    Ok(graph)
}
