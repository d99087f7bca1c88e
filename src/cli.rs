use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "rutero",
    about = "Fuzzy route search over a GeoJSON route collection",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rank routes in a collection against a query
    Search {
        /// Path to the GeoJSON FeatureCollection file
        #[arg(short, long)]
        collection: String,

        /// Query text, e.g. "ruta 12" or "plaza"
        query: String,

        /// Maximum number of candidates to print
        #[arg(short, long, default_value_t = rutero::DEFAULT_LIMIT)]
        limit: usize,
    },

    /// Summarize a route collection as the engine sees it
    Inspect {
        /// Path to the GeoJSON FeatureCollection file
        #[arg(short, long)]
        collection: String,
    },
}
