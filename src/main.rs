mod cli;
mod server;
mod tools;

use anyhow::Result;
use clap::{Parser, Subcommand};
use quickmem::{config, memory};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "quickmem",
    version,
    about = "Keyword search and relation traversal over agent memory snapshots"
)]
struct Cli {
    /// Memory snapshot to load (overrides config and QUICKMEM_SOURCE)
    #[arg(long, global = true, value_name = "PATH")]
    source: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Rank entities by how many query keywords they contain
    Search {
        #[arg(required = true)]
        query: Vec<String>,
        /// Only return entities of this type
        #[arg(long = "type", value_name = "TYPE")]
        entity_type: Option<String>,
        /// Maximum number of results
        #[arg(long)]
        limit: Option<usize>,
    },
    /// List all entities of a type
    Type {
        #[arg(value_name = "TYPE")]
        entity_type: String,
    },
    /// List entity types with counts
    Types,
    /// Suggest indexed keywords matching a partial word
    Suggest {
        partial: String,
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Show entities related to an entity, breadth-first
    Related {
        entity_id: String,
        /// Maximum number of relation hops
        #[arg(long)]
        depth: Option<usize>,
    },
    /// Show index statistics
    Stats,
    /// Show every field of one entity plus its back-references
    Inspect { entity_id: String },
    /// Start the read-only MCP server (stdio transport)
    Serve,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load config (for log level and source path)
    let config = config::QuickmemConfig::load()?;

    // Log to stderr so stdout stays clean for results and MCP JSON-RPC.
    let filter = EnvFilter::try_new(&config.server.log_level)
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let source = cli
        .source
        .clone()
        .unwrap_or_else(|| config.resolved_source_path());
    let session = cli::open_session(&source)?;
    let json = cli.json;

    match cli.command {
        Command::Search {
            query,
            entity_type,
            limit,
        } => {
            cli::search::search(&session, &config, &query.join(" "), entity_type, limit, json)?;
        }
        Command::Type { entity_type } => {
            cli::types::list_type(&session, &config, &entity_type, json)?;
        }
        Command::Types => cli::types::list_types(&session, json)?,
        Command::Suggest { partial, limit } => {
            cli::suggest::suggest(&session, &config, &partial, limit, json)?;
        }
        Command::Related { entity_id, depth } => {
            cli::related::related(&session, &config, &entity_id, depth, json)?;
        }
        Command::Stats => cli::stats::stats(&session, json)?,
        Command::Inspect { entity_id } => cli::inspect::inspect(&session, &entity_id, json)?,
        Command::Serve => server::serve_stdio(config, session).await?,
    }

    Ok(())
}
