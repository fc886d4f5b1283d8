use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use kglayout::config::LayoutConfig;
use kglayout::engine::LayoutEngine;
use kglayout::framing::CameraFraming;
use kglayout::io::{FormatRegistry, SnapshotDocument, read_config, read_graph};
use kglayout::strategy::StrategyKind;

mod server;

/// Compute 3D layouts for knowledge graphs.
#[derive(Parser)]
#[command(name = "kglayout")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

/// Options shared by every command that builds an engine
#[derive(clap::Args, Debug)]
struct EngineArgs {
    /// Input graph document (.json, .yaml or .yml)
    #[arg(short, long)]
    input: PathBuf,

    /// Layout configuration file (.json, .yaml or .yml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Layout strategy, overriding the configuration
    #[arg(short, long, value_enum)]
    strategy: Option<StrategyKind>,

    /// Force simulation passes, overriding the configuration
    #[arg(long)]
    iterations: Option<usize>,

    /// Seed for the random source, overriding the configuration
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute one layout and write it as a snapshot document
    Layout {
        #[command(flatten)]
        engine: EngineArgs,

        /// Output file; format follows the extension. Prints JSON to stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Padding around the layout used for camera framing
        #[arg(long, default_value = "1.0")]
        padding: f64,
    },
    /// Serve snapshots over HTTP, recomputing when the input changes
    Serve {
        #[command(flatten)]
        engine: EngineArgs,

        /// Port to run the server on
        #[arg(short, long, default_value = "3000")]
        port: u16,
    },
}

impl EngineArgs {
    fn load_config(&self) -> anyhow::Result<LayoutConfig> {
        let mut config = match &self.config {
            Some(path) => read_config(path)?,
            None => LayoutConfig::default(),
        };
        if let Some(strategy) = self.strategy {
            config.strategy = strategy;
        }
        if let Some(iterations) = self.iterations {
            config.force.iterations = iterations;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        Ok(config)
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "kglayout=debug,info",
        _ => "kglayout=trace,debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn layout(args: &EngineArgs, output: Option<&Path>, padding: f64) -> anyhow::Result<()> {
    let config = args.load_config()?;
    let graph = read_graph(&args.input)?;
    let framing_config = config.framing.clone();

    let mut engine = LayoutEngine::new(config)?;
    let snapshot = engine.recompute(&graph.nodes, &graph.edges)?;
    info!(
        strategy = %snapshot.strategy,
        nodes = snapshot.len(),
        seed = snapshot.seed,
        "layout computed"
    );

    let doc = SnapshotDocument::new(&snapshot)
        .with_hints(&graph.nodes)
        .with_framing(CameraFraming::for_snapshot(
            &snapshot,
            padding,
            &framing_config,
        ));

    let registry = FormatRegistry::with_defaults();
    match output {
        Some(path) => {
            registry.writer_for_path(path)?.write(&doc, path)?;
            println!(
                "Laid out {} nodes with {} in {}",
                snapshot.len(),
                snapshot.strategy,
                path.display()
            );
        }
        None => {
            let writer = registry
                .writer_for_format("json")
                .ok_or_else(|| anyhow::anyhow!("no JSON writer registered"))?;
            println!("{}", writer.render(&doc)?);
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Layout {
            engine,
            output,
            padding,
        } => {
            layout(&engine, output.as_deref(), padding)?;
        }
        Commands::Serve { engine, port } => {
            let config = engine.load_config()?;
            server::serve(&engine.input, LayoutEngine::new(config)?, port).await?;
        }
    }

    Ok(())
}
