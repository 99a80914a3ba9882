use crate::types::{LogLevel, OutputFormat, ProtocolFilter};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "wiretrace")]
#[command(about = "Inspect captured LLM and MCP traffic", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (defaults to ~/.wiretrace/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(long, default_value = "plain", global = true)]
    pub format: OutputFormat,

    #[arg(long, default_value = "warn", global = true)]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List captured exchanges, newest first
    List {
        #[arg(long)]
        protocol: Option<ProtocolFilter>,

        /// Maximum number of entries (defaults to `list_limit` from config)
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Show the normalized view of one captured exchange
    Show {
        /// Protocol tag (llm or mcp)
        protocol: String,

        /// Exchange id as printed by `list`
        id: String,
    },

    /// Normalize a single RawExchange JSON file
    Parse {
        file: PathBuf,

        /// Protocol tag to normalize under (defaults to the record's own)
        #[arg(long)]
        protocol: Option<String>,
    },

    /// Aggregate traffic statistics
    Stats {
        #[arg(long)]
        protocol: Option<ProtocolFilter>,
    },
}
