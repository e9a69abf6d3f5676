//! churros-graphs - influence graph of student organizations
//!
//! Main entry point for the churros-graphs CLI.

use churros_graphs::api::{HttpTransport, QueryClient};
use churros_graphs::cache::{CacheConfig, ResponseCache};
use churros_graphs::config::{validate_config_result, GraphConfig};
use churros_graphs::pipeline::{self, GraphBuild};
use churros_graphs::{style, ChurrosGraphsError};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process;
use std::time::Duration;

/// churros-graphs - who sits on which boards, as a graph
#[derive(Parser, Debug)]
#[command(name = "churros-graphs")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to config file (default: ~/.config/churros-graphs/config.yaml)
    #[arg(short, long, env = "CHURROS_GRAPHS_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write the default configuration file
    Init,

    /// Query the directory, write the graph description and render it
    Generate {
        /// Only write the graph description, skip Graphviz
        #[arg(long)]
        no_render: bool,

        /// Open the first rendered image
        #[arg(long, conflicts_with = "no_render")]
        open: bool,
    },

    /// List every edge with the people causing it
    Causes,

    /// Clear the response cache
    ClearCache,
}

fn main() {
    // Initialize logging
    if let Err(e) = churros_graphs::logging::init() {
        eprintln!("Failed to initialize logging: {}", e);
    }

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{} {}", style::error("Error:"), e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> churros_graphs::Result<()> {
    // Handle init command first (creates config)
    if let Commands::Init = cli.command {
        return handle_init_command(&cli.config);
    }

    let config = match &cli.config {
        Some(path) => GraphConfig::load(path)?,
        None => GraphConfig::load_default()?,
    };
    validate_config_result(&config)?;

    tracing::info!(
        endpoint = %config.api.endpoint,
        group_types = ?config.filter.group_types,
        "Configuration loaded"
    );

    let mut cache = ResponseCache::new(CacheConfig {
        path: config.cache.path.clone(),
    })?;

    match cli.command {
        Commands::Generate { no_render, open } => {
            let build = fetch_graph(&config, cache)?;
            let path = build.write(&config.output)?;

            println!(
                "{} {} groups, {} edges → {}",
                style::success("✓"),
                style::count(build.graph.nodes.len()),
                style::count(build.graph.edges.len()),
                style::path(&path.display().to_string())
            );

            if no_render {
                return Ok(());
            }

            let artifacts = pipeline::render(&config.output)?;
            for artifact in &artifacts {
                println!(
                    "{} {}",
                    style::success("✓"),
                    style::path(&artifact.display().to_string())
                );
            }

            if open {
                if let Some(first) = artifacts.first() {
                    pipeline::open_artifact(first);
                }
            }
        }

        Commands::Causes => {
            let build = fetch_graph(&config, cache)?;
            print_causes(&build);
        }

        Commands::ClearCache => {
            let entries = cache.len();
            cache.clear()?;
            println!(
                "{} Cleared {} cached responses from {}",
                style::success("✓"),
                entries,
                style::path(&cache.path().display().to_string())
            );
        }

        Commands::Init => {
            unreachable!("Init is handled before the configuration is loaded")
        }
    }

    Ok(())
}

/// Query (or read from cache) the memberships and build the graph
fn fetch_graph(config: &GraphConfig, cache: ResponseCache) -> churros_graphs::Result<GraphBuild> {
    let transport = HttpTransport::new(
        config.api.endpoint.clone(),
        Duration::from_secs(config.api.timeout_secs),
    )?;
    tracing::debug!(
        endpoint = transport.endpoint(),
        authenticated = transport.is_authenticated(),
        "HTTP transport ready"
    );
    let mut client = QueryClient::new(transport, cache, config.api.operation_namespace.clone());

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let build = runtime.block_on(GraphBuild::fetch(&mut client, &config.filter))?;

    let stats = client.stats();
    tracing::info!(
        hits = stats.hits,
        misses = stats.misses,
        cached = client.cache().len(),
        "Response cache usage"
    );

    Ok(build)
}

fn print_causes(build: &GraphBuild) {
    let graph = &build.graph;
    if graph.is_empty() {
        println!("{}", style::dim("No edges: no shared board members found"));
        return;
    }

    println!(
        "{} ({} edges, {} people)",
        style::header("Influence edges"),
        style::count(graph.edges.len()),
        style::count(graph.stats.distinct_people)
    );
    println!();

    for edge in &graph.edges {
        let people: Vec<String> = graph
            .causes_of(edge)
            .iter()
            .map(|uid| style::person(uid.as_str()).to_string())
            .collect();
        println!(
            "  {} {} {}  {}",
            style::group(edge.a.as_str(), build.colors.get(&edge.a)),
            style::dim("--"),
            style::group(edge.b.as_str(), build.colors.get(&edge.b)),
            people.join(", ")
        );
    }
}

fn handle_init_command(config_path: &Option<PathBuf>) -> churros_graphs::Result<()> {
    let config_file = match config_path {
        Some(path) => path.clone(),
        None => GraphConfig::default_path(),
    };

    // Check if already initialized
    if config_file.exists() {
        println!(
            "{} Configuration already exists at {}",
            style::warning("!"),
            style::path(&config_file.display().to_string())
        );
        return Ok(());
    }

    // Create parent directory if needed
    if let Some(parent) = config_file.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            ChurrosGraphsError::Config(format!(
                "Failed to create config directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    GraphConfig::new().save(&config_file)?;

    println!(
        "{} Created configuration at {}",
        style::success("✓"),
        style::path(&config_file.display().to_string())
    );
    println!();
    println!("Next steps:");
    println!("  1. Set {} if the API needs a token", style::header("CHURROS_TOKEN"));
    println!("  2. Generate the graph:");
    println!("     churros-graphs generate");

    Ok(())
}
