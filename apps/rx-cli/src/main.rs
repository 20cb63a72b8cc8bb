use clap::{Parser, Subcommand};
use rx_expand::{
    ConcretePolicy, ExpandResult, PhasePolicy, PlanOptions, expand_resources, graph_builder,
};
use rx_graph::DuplicatePolicy;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "rx-cli")]
#[command(
    about = "rexpand CLI - expand resource declarations into instance graphs",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate resource file syntax and repetition arguments
    Validate {
        /// Path to the resource file (YAML, or JSON with a .json extension)
        path: PathBuf,
    },
    /// Expand every resource and print one vertex per instance
    Expand {
        /// Path to the resource file (YAML, or JSON with a .json extension)
        path: PathBuf,
        /// Wrap instances for a walk phase (plan, apply, refresh, destroy)
        #[arg(long)]
        phase: Option<rx_expand::Phase>,
        /// Fail when two vertices share a name
        #[arg(long)]
        reject_duplicates: bool,
        /// Maximum number of vertices in the graph
        #[arg(long)]
        max_vertices: Option<usize>,
        /// Expand resources one after another instead of in parallel
        #[arg(long)]
        sequential: bool,
        /// Print vertex names as a JSON array
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExpandResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { path } => cmd_validate(&path),
        Commands::Expand {
            path,
            phase,
            reject_duplicates,
            max_vertices,
            sequential,
            json,
        } => {
            let options = PlanOptions {
                duplicates: if reject_duplicates {
                    DuplicatePolicy::Reject
                } else {
                    DuplicatePolicy::Allow
                },
                max_vertices,
            };
            let policy = phase.map(|p| Arc::new(PhasePolicy(p)) as Arc<dyn ConcretePolicy>);
            cmd_expand(&path, policy, options, sequential, json)
        }
    }
}

fn cmd_validate(path: &Path) -> ExpandResult<()> {
    let file = rx_expand::load(path)?;
    println!("✓ {} is valid", path.display());
    println!("  Version: {}", file.version);
    println!("  Resources: {}", file.resources.len());
    for def in &file.resources {
        let rep = def.repetition();
        println!("    {} ({} instances)", def.address, rep.expected_instances());
    }
    Ok(())
}

fn cmd_expand(
    path: &Path,
    policy: Option<Arc<dyn ConcretePolicy>>,
    options: PlanOptions,
    sequential: bool,
    json: bool,
) -> ExpandResult<()> {
    let start = Instant::now();
    let file = rx_expand::load(path)?;

    let graph = if sequential {
        graph_builder(&file.resources, policy, options)?.build()?
    } else {
        expand_resources(&file.resources, policy, options)?
    };
    tracing::debug!(elapsed = ?start.elapsed(), "expansion finished");

    let names = graph.names();
    if json {
        println!("{}", serde_json::to_string_pretty(&names)?);
    } else {
        for name in &names {
            println!("{}", name);
        }
        eprintln!(
            "{} vertices from {} resources in {:.1?}",
            names.len(),
            file.resources.len(),
            start.elapsed()
        );
    }
    Ok(())
}
