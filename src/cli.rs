use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Generate example payloads and Postman collections from OpenAPI documents
#[derive(Parser, Debug, Clone)]
#[command(name = "apiforge", version, about, long_about = None)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, env = "APIFORGE_CONFIG", default_value = "apiforge.toml")]
    pub config: PathBuf,

    /// Seed for the random source (repeatable output)
    #[arg(long, env = "APIFORGE_SEED", global = true)]
    pub seed: Option<u64>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List the operations declared in a document
    Endpoints {
        /// OpenAPI document (JSON or YAML)
        spec: PathBuf,
    },

    /// Print one synthesized example for an operation
    Example {
        /// OpenAPI document (JSON or YAML)
        spec: PathBuf,

        /// operationId or "METHOD /path"
        #[arg(short, long)]
        endpoint: String,

        /// Generate the response example instead of the request body
        #[arg(long)]
        response: bool,
    },

    /// Build a Postman collection with every generated literal extracted into a variable
    Collection {
        /// OpenAPI document (JSON or YAML)
        spec: PathBuf,

        /// Write the collection here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Collection name (defaults to the document title)
        #[arg(long)]
        name: Option<String>,

        /// Collection description (defaults to the document description)
        #[arg(long)]
        description: Option<String>,

        /// Base URL prefixed to every request
        #[arg(long, env = "APIFORGE_BASE_URL")]
        base_url: Option<String>,
    },

    /// Replace every primitive in a JSON file with a named placeholder
    Variabilize {
        /// JSON file to template
        input: PathBuf,
    },
}
