//! cdg CLI: build, inspect and resolve conceptual dependency graphs.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use miette::Result;

use conceptual_dependency::act::Primitive;
use conceptual_dependency::config::CdConfig;
use conceptual_dependency::infer::FailUnresolved;
use conceptual_dependency::knowledge::KnowledgeBase;
use conceptual_dependency::sample::{PARK_TRIP_SENTENCE, park_trip};

#[derive(Parser)]
#[command(name = "cdg", version, about = "Conceptual dependency graphs")]
struct Cli {
    /// TOML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Fail on slots nothing can fill instead of prompting.
    #[arg(long, global = true)]
    non_interactive: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the park trip scene, print it and resolve its open slots.
    Demo {
        /// Knowledge base file (overrides the configured one).
        #[arg(long)]
        kb: Option<PathBuf>,
    },

    /// List the primitive ACTs and their slot schemas.
    Primitives,

    /// Validate a knowledge base file and summarize it.
    Kb {
        /// Path to the knowledge base TOML file.
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))
    .ok(); // Ignore error if hook already set (e.g., in tests)

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => CdConfig::load(path)?,
        None => CdConfig::default(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Demo { kb } => {
            if kb.is_some() {
                config.knowledge_base = kb;
            }

            println!("Converting Sentence to Conceptual Dependency Graph: {PARK_TRIP_SENTENCE}");
            let mut scene = park_trip()?;
            let graph = &mut scene.graph;

            println!("{}", graph.summary());
            println!("\nAll Nodes in the Conceptual Dependency Graph:");
            print!("{}", graph.render_nodes());
            println!("\nAll Relations in the Conceptual Dependency Graph:");
            print!("{}", graph.render_relations());
            println!("\nAll Actions in the Conceptual Dependency Graph (including nested actions):");
            print!("{}", graph.render_acts());

            let mut engine = config.build_engine()?;
            if cli.non_interactive {
                engine.set_provider(FailUnresolved);
            }
            engine.add_action(scene.went);
            let report = engine.run(graph)?;

            println!();
            print!("{}", report.render(graph));
        }

        Commands::Primitives => {
            for &primitive in Primitive::ALL {
                let state = primitive
                    .characteristic_state_type()
                    .map(|ty| format!(" [{ty}]"))
                    .unwrap_or_default();
                println!(
                    "{:<7} {:<32} {}{state}",
                    primitive.label(),
                    primitive.description(),
                    primitive.slot_names().join(", ")
                );
            }
        }

        Commands::Kb { path } => {
            let kb = KnowledgeBase::load(&path)?;
            let (states, defaults, rules) = kb.counts();
            println!("{}", path.display());
            println!("  default states: {states}");
            println!("  slot defaults:  {defaults}");
            println!("  action rules:   {rules}");
            for action in kb.unmatched_rule_actions() {
                tracing::warn!(
                    action,
                    "rule key is not a primitive ACT label (e.g. PTRANS, ACT) and will never fire"
                );
            }
        }
    }

    Ok(())
}
