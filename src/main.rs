use clap::Parser;
use std::error::Error;
use std::fs;

use rutero::{match_routes, parse_route_collection, RouteIndex};
use tracing_subscriber::EnvFilter;

mod cli;
use cli::{Cli, Commands};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Search {
            collection,
            query,
            limit,
        } => run_search(&collection, &query, limit),
        Commands::Inspect { collection } => run_inspect(&collection),
    };

    if let Err(e) = result {
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }
}

fn load_index(path: &str) -> Result<RouteIndex, Box<dyn Error>> {
    let document = fs::read_to_string(path)?;
    let routes = parse_route_collection(&document)?;
    Ok(RouteIndex::build(routes))
}

fn run_search(path: &str, query: &str, limit: usize) -> Result<(), Box<dyn Error>> {
    let index = load_index(path)?;
    let candidates = match_routes(query, &index, limit);

    if candidates.is_empty() {
        println!("no routes match {:?}", query);
        return Ok(());
    }

    for (rank, candidate) in candidates.iter().enumerate() {
        println!(
            "{:>2}. {} {}  (id {})",
            rank + 1,
            paint_score(candidate.score),
            candidate.entry.label,
            candidate.entry.route.id,
        );
    }
    Ok(())
}

fn run_inspect(path: &str) -> Result<(), Box<dyn Error>> {
    let index = load_index(path)?;
    println!("routes: {}", index.len());

    let unnumbered = index
        .entries()
        .iter()
        .filter(|e| e.normalized_number.is_empty())
        .count();
    let unnamed = index
        .entries()
        .iter()
        .filter(|e| e.normalized_name.is_empty())
        .count();
    let unframeable = index
        .entries()
        .iter()
        .filter(|e| e.bounding_region.is_none())
        .count();

    println!("  without number: {}", unnumbered);
    println!("  without name:   {}", unnamed);
    println!("  without region: {}", unframeable);
    println!();
    for entry in index.entries() {
        println!("  {}  {}", entry.route.id, entry.label);
    }
    Ok(())
}

/// Score badge, dimmed to plain text when stdout is not a terminal.
fn paint_score(score: u32) -> String {
    if atty::is(atty::Stream::Stdout) {
        // Exact hits in green, prefix hits in yellow, the rest default.
        let color = match score {
            90.. => "\x1b[32m",
            70.. => "\x1b[33m",
            _ => "\x1b[0m",
        };
        format!("{}[{:>3}]\x1b[0m", color, score)
    } else {
        format!("[{:>3}]", score)
    }
}
