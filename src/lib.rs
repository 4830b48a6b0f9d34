pub mod blog_stack;
pub mod diagram_ast;
pub mod dot_writer;
pub mod error;
pub mod graphviz;
pub mod output;
pub mod summary;

use std::path::PathBuf;

use crate::blog_stack::Variant;
use crate::diagram_ast::{Diagram, Direction, StyleConfig};
use crate::error::DiagramError;
use crate::graphviz::Graphviz;
use crate::output::OutputFormat;

pub fn build_and_render(
    output_base: &str,
    title: &str,
    direction: Direction,
    style: StyleConfig,
) -> Result<PathBuf, DiagramError> {
    let diagram = blog_stack::blog_architecture(Variant::default(), title, direction, style);
    render_to_file(&diagram, output_base, OutputFormat::Png, &Graphviz::default())
}

/// Render `diagram` and write it to `<output_base>.<ext>`. The filesystem is
/// only touched once the engine has produced the image.
pub fn render_to_file(
    diagram: &Diagram,
    output_base: &str,
    format: OutputFormat,
    engine: &Graphviz,
) -> Result<PathBuf, DiagramError> {
    let path = output::output_path(output_base, format)?;

    let source = dot_writer::render(diagram);
    tracing::debug!(
        nodes = diagram.nodes.len(),
        edges = diagram.edges.len(),
        clusters = diagram.clusters.len(),
        "diagram declared"
    );

    let bytes = if format.needs_engine() {
        engine.probe()?;
        engine.render(&source, format)?
    } else {
        source.into_bytes()
    };

    output::write_atomic(&path, &bytes)?;
    tracing::info!(path = %path.display(), "diagram written");
    Ok(path)
}
