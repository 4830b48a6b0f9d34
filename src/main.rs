use std::path::PathBuf;

use clap::Parser;

use archviz::blog_stack::{self, DEFAULT_OUTPUT, DEFAULT_TITLE, Variant};
use archviz::diagram_ast::{Direction, EdgeRouting, StyleConfig};
use archviz::graphviz::{DEFAULT_PROGRAM, Graphviz};
use archviz::output::OutputFormat;

#[derive(Parser)]
#[command(
    name = "archviz",
    about = "Render the blog hosting architecture (CloudFront + S3) as a Graphviz diagram"
)]
struct Cli {
    /// Output path without extension
    #[arg(long, short = 'o', default_value = DEFAULT_OUTPUT)]
    output: String,

    /// Diagram title
    #[arg(long, default_value = DEFAULT_TITLE)]
    title: String,

    #[arg(long, value_enum, default_value_t)]
    direction: Direction,

    /// Architecture revision to draw
    #[arg(long, value_enum, default_value_t)]
    variant: Variant,

    #[arg(long, short = 'f', value_enum, default_value_t)]
    format: OutputFormat,

    #[arg(long, default_value_t = 16)]
    title_font_size: u32,

    #[arg(long, default_value_t = 12)]
    node_font_size: u32,

    #[arg(long, default_value_t = 10)]
    edge_font_size: u32,

    /// Named Graphviz background color
    #[arg(long, default_value = "white")]
    background: String,

    /// Padding around the drawing, in inches
    #[arg(long, default_value_t = 0.5)]
    padding: f64,

    #[arg(long, value_enum, default_value_t)]
    routing: EdgeRouting,

    /// Graphviz `dot` executable
    #[arg(long, env = "GRAPHVIZ_DOT", default_value = DEFAULT_PROGRAM)]
    dot: PathBuf,
}

impl Cli {
    fn style(&self) -> StyleConfig {
        StyleConfig {
            title_font_size: self.title_font_size,
            node_font_size: self.node_font_size,
            edge_font_size: self.edge_font_size,
            background: self.background.clone(),
            padding: self.padding,
            routing: self.routing,
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let diagram = blog_stack::blog_architecture(cli.variant, &cli.title, cli.direction, cli.style());
    let engine = Graphviz::new(&cli.dot);

    match archviz::render_to_file(&diagram, &cli.output, cli.format, &engine) {
        Ok(path) => archviz::summary::report(&blog_stack::summary_lines(cli.variant, &path)),
        Err(e) => {
            eprintln!("ERROR: {e}");
            std::process::exit(1);
        }
    }
}
