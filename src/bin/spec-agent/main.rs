//! spec-agent CLI tool
//!
//! Command-line interface for building and publishing the dependency graph of a project's
//! markdown specifications.
//!
//! ## Commands
//!
//! - `init [PATH]`: scaffold `.spec_agent/` and `spec_changes/`
//! - `graph`: detect root specs and build the dependency graph
//! - `export`: build the graph and render it as static HTML
//! - `serve`: serve the exported HTML (requires the `service` feature)
//!
//! Every command except `init` reads `.spec_agent/config.yaml` from the project directory
//! (`--project`, default: current directory).

use clap::{Parser, Subcommand};
#[cfg(feature = "service")]
mod dev_server;
use spec_agent::{
    compiler::{Compilation, SpecCompiler},
    config::{build_dir, YamlConfigProvider},
    export::{ExportReport, HtmlExporter},
    init::init_project,
    paths::canonical_path,
};
use std::path::{Path, PathBuf};
#[cfg(feature = "service")]
use std::time::Duration;

#[derive(Parser)]
#[command(name = "spec-agent")]
#[command(author, version, about = "Dependency graphs and HTML docs for markdown specifications", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create .spec_agent/ (config, example specs, prompts) and spec_changes/
    Init {
        /// Project directory (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Overwrite an existing config.yaml
        #[arg(long)]
        force: bool,
    },

    /// Find root specs and build the dependency graph
    Graph {
        /// Project directory containing .spec_agent/
        #[arg(long, default_value = ".")]
        project: PathBuf,

        /// Print every edge and every spec that could not be read
        #[arg(short, long)]
        verbose: bool,
    },

    /// Build the graph and export it as static HTML
    Export {
        /// Project directory containing .spec_agent/
        #[arg(long, default_value = ".")]
        project: PathBuf,

        /// Output directory (default: .spec_agent/build under the project)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Serve the exported HTML, exporting first if needed
    #[cfg(feature = "service")]
    Serve {
        /// Project directory containing .spec_agent/
        #[arg(long, default_value = ".")]
        project: PathBuf,

        /// Host to bind
        #[arg(long, default_value = "localhost")]
        host: String,

        /// Port to listen on
        #[arg(short, long, default_value = "8080")]
        port: u16,

        /// Export again even if index.html already exists
        #[arg(long)]
        rebuild: bool,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init { path, force } => {
            let report = init_project(&path, force)?;
            println!("Initialized {}", report.config_dir.display());
            for file in &report.written {
                println!("  wrote {}", file.display());
            }
            if report.kept_config {
                println!("  kept existing config.yaml (use --force to overwrite)");
            }
        }

        Commands::Graph { project, verbose } => {
            let compilation = compile(&project)?;
            if verbose {
                for edge in compilation.graph.edges() {
                    println!("  {} -> {}", edge.from.display(), edge.to.display());
                }
                for path in compilation.graph.dangling() {
                    println!("  unreadable: {}", path.display());
                }
            }
        }

        Commands::Export { project, output } => {
            let compilation = compile(&project)?;
            let output = output.unwrap_or_else(|| build_dir(&project));
            let report = export(&compilation, &output)?;
            println!(
                "Open in a browser: file://{}",
                canonical_path(&report.index).display()
            );
        }

        #[cfg(feature = "service")]
        Commands::Serve {
            project,
            host,
            port,
            rebuild,
        } => {
            let output = build_dir(&project);
            if rebuild || !output.join(spec_agent::export::INDEX_FILE).exists() {
                println!("Exporting specifications first...\n");
                let compilation = compile(&project)?;
                export(&compilation, &output)?;
                println!();
            }

            let running = std::sync::Arc::new(std::sync::atomic::AtomicBool::new(true));
            let r = running.clone();
            ctrlc::set_handler(move || {
                println!("\nShutting down...");
                r.store(false, std::sync::atomic::Ordering::SeqCst);
            })?;

            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?;
            runtime.block_on(async {
                let server = dev_server::DevServer::new(output, host, port);
                let shutdown = async move {
                    while running.load(std::sync::atomic::Ordering::SeqCst) {
                        tokio::time::sleep(Duration::from_millis(100)).await;
                    }
                };
                server.serve(shutdown).await
            })?;
        }
    }

    Ok(())
}

/// Discovery, root detection and graph build for the project, with the summary printed.
fn compile(project: &Path) -> Result<Compilation, Box<dyn std::error::Error>> {
    let provider = YamlConfigProvider::new(project);
    let compilation = SpecCompiler::from_provider(&provider)?.compile()?;
    let stats = compilation.stats();

    println!("Found {} root specifications:", stats.root_specs);
    for root in &compilation.root_specs {
        println!("  - {}", root.display());
    }
    println!();
    println!(
        "Graph has {} nodes and {} edges ({} spec files scanned)",
        stats.nodes, stats.edges, stats.spec_files
    );
    if stats.dangling > 0 {
        println!("{} linked specs could not be read", stats.dangling);
    }
    Ok(compilation)
}

fn export(
    compilation: &Compilation,
    output: &Path,
) -> Result<ExportReport, Box<dyn std::error::Error>> {
    println!("Generating HTML in {}...", output.display());
    let report = HtmlExporter::new(output).export(&compilation.graph)?;
    println!(
        "Exported {} pages to {}",
        report.pages.len(),
        canonical_path(&report.output_dir).display()
    );
    Ok(report)
}
