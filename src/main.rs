//! pipeline-graph command line entrypoint

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use pipeline_graph::serialization::{read_document_bytes, write_document_file};
use pipeline_graph::{seed, Change, EditorConfig, EditorController, GraphError, NodeKind};

#[derive(Parser)]
#[command(name = "pipeline-graph")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Edit and export CtxOS pipeline diagrams")]
struct Cli {
    #[command(flatten)]
    global: GlobalOptions,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug, Clone)]
struct GlobalOptions {
    /// JSON editor config file
    #[arg(short, long, env = "PIPELINE_GRAPH_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Directory that exported documents are written to
    #[arg(short, long, default_value = ".", global = true)]
    out_dir: PathBuf,

    /// Accept edges from a node to itself
    #[arg(long, global = true)]
    allow_self_loops: bool,

    /// Accept a second edge along an already connected pair
    #[arg(long, global = true)]
    allow_parallel_edges: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Export the built-in CtxOS architecture graph
    Seed,

    /// Import a document and print a summary of it
    Inspect { file: PathBuf },

    /// Connect two nodes of a document and export the result
    Connect {
        file: PathBuf,
        source: String,
        target: String,
    },

    /// Remove a node (and its edges) from a document and export the result
    RemoveNode { file: PathBuf, id: String },

    /// Apply a JSON array of changes to a document and export the result
    Apply { file: PathBuf, changes: PathBuf },
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_env("PIPELINE_GRAPH_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(options: &GlobalOptions) -> Result<EditorConfig> {
    let mut config = match &options.config {
        Some(path) => EditorConfig::load(path)?,
        None => EditorConfig::default(),
    };

    config.connection.allow_self_loops |= options.allow_self_loops;
    config.connection.allow_parallel_edges |= options.allow_parallel_edges;
    Ok(config)
}

fn user_facing(err: GraphError) -> anyhow::Error {
    let message = err.user_message();
    anyhow::Error::new(err).context(message)
}

fn open(config: EditorConfig, file: &Path) -> Result<EditorController> {
    let bytes = read_document_bytes(file)?;
    let mut editor = EditorController::new(config);
    editor.import_document(&bytes).map_err(user_facing)?;
    Ok(editor)
}

fn export(editor: &EditorController, out_dir: &Path) -> Result<()> {
    let file_name = editor.export_file_name(Local::now().date_naive());
    let path = write_document_file(out_dir, &file_name, &editor.export_document())?;
    println!("Exported {}", path.display());
    Ok(())
}

fn print_summary(editor: &EditorController) {
    let store = editor.store();
    println!("Nodes: {}", store.node_count());
    for kind in NodeKind::ALL {
        let count = store.nodes().iter().filter(|n| n.kind() == kind).count();
        println!("  {:<9} {}", kind, count);
    }
    println!("Edges: {}", store.edge_count());

    let entry_points: Vec<&str> = store
        .nodes()
        .iter()
        .filter(|n| store.incoming_edges(n.id.as_str()).is_empty())
        .map(|n| n.id.as_str())
        .collect();
    println!("Entry points: {}", entry_points.join(", "));
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = load_config(&cli.global)?;
    let out_dir = cli.global.out_dir.as_path();

    match cli.command {
        Commands::Seed => {
            let editor = EditorController::with_document(config, seed::ctxos_architecture())?;
            export(&editor, out_dir)?;
        }
        Commands::Inspect { file } => {
            let editor = open(config, &file)?;
            print_summary(&editor);
        }
        Commands::Connect {
            file,
            source,
            target,
        } => {
            let mut editor = open(config, &file)?;
            let id = editor.connect(&source, &target).map_err(user_facing)?;
            println!("Added edge {}: {} -> {}", id, source, target);
            export(&editor, out_dir)?;
        }
        Commands::RemoveNode { file, id } => {
            let mut editor = open(config, &file)?;
            if !editor.remove_node(&id)? {
                println!("Node {} not present; nothing removed", id);
            }
            export(&editor, out_dir)?;
        }
        Commands::Apply { file, changes } => {
            let mut editor = open(config, &file)?;
            let bytes = read_document_bytes(&changes)?;
            let batch: Vec<Change> = serde_json::from_slice(&bytes)
                .with_context(|| format!("Failed to parse changes from: {}", changes.display()))?;
            let report = editor.apply_changes(batch)?;
            println!("Applied {} change(s), skipped {}", report.applied, report.skipped);
            export(&editor, out_dir)?;
        }
    }

    Ok(())
}
