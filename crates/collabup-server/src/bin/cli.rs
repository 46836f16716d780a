//! CollabUp CLI
//!
//! Command-line interface for loading records and querying recommendations.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use clap::{Parser, Subcommand};
use colored::Colorize;
use serde_json::Value;

use collabup_core::{
    parse_query, CollectionStatus, Query, Recommender, RecordType, ScoredRecord, Storage,
    DEFAULT_TOP_N,
};

/// CollabUp - recommendation engine CLI
#[derive(Parser)]
#[command(name = "collabup")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "CLI for the CollabUp recommendation engine")]
#[command(long_about = "Load projects, startups, mentors and faculty into the record store and query them.\n\nQueries are split on commas, semicolons and whitespace; each term is matched fuzzily against the searchable fields of every record type.")]
struct Cli {
    /// Record database path (defaults to the platform data directory)
    #[arg(long, global = true, env = "COLLABUP_DB_PATH")]
    db_path: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import records from a JSON file (array of objects, or a single object)
    Import {
        /// Record type or collection (e.g. mentor_profiles or mentors)
        record_type: String,
        /// Path to the JSON file
        file: PathBuf,
    },

    /// Rank every record type against a query
    Recommend {
        /// Free-text query, e.g. "python, machine learning, bangalore"
        query: String,
        /// Results per record type
        #[arg(long, default_value_t = DEFAULT_TOP_N)]
        top_n: usize,
        /// Print the raw JSON response
        #[arg(long)]
        json: bool,
    },

    /// Show how a query is parsed and how it scores one sample per collection
    Debug {
        /// Free-text query
        query: String,
    },

    /// Show record counts per collection
    Collections,

    /// Check that every collection is readable
    Health,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let db_path = cli.db_path;

    match cli.command {
        Commands::Import { record_type, file } => run_import(db_path, &record_type, &file),
        Commands::Recommend { query, top_n, json } => run_recommend(db_path, query, top_n, json),
        Commands::Debug { query } => run_debug(db_path, &query),
        Commands::Collections => run_collections(db_path),
        Commands::Health => run_health(db_path),
    }
}

/// Accept either a record type name or its collection name
fn resolve_record_type(name: &str) -> anyhow::Result<RecordType> {
    RecordType::from_str(name)
        .or_else(|_| RecordType::from_collection(name))
        .map_err(|_| {
            let known: Vec<_> = RecordType::ALL
                .iter()
                .map(|t| format!("{} ({})", t.as_str(), t.collection()))
                .collect();
            anyhow::anyhow!(
                "Unknown record type '{}'. Expected one of: {}",
                name,
                known.join(", ")
            )
        })
}

/// Run import command
fn run_import(db_path: Option<PathBuf>, record_type: &str, file: &Path) -> anyhow::Result<()> {
    let record_type = resolve_record_type(record_type)?;

    let content = std::fs::read_to_string(file)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", file.display(), e))?;
    let documents = match serde_json::from_str::<Value>(&content)? {
        Value::Array(items) => items,
        object @ Value::Object(_) => vec![object],
        other => anyhow::bail!(
            "Expected a JSON array or object in {}, found {}",
            file.display(),
            other
        ),
    };

    let storage = Storage::new(db_path)?;
    let count = storage.import_records(record_type, documents)?;

    println!(
        "{} {} records into {}",
        "Imported".green().bold(),
        count,
        record_type.collection().cyan()
    );
    println!(
        "{}: {}",
        "Collection Total".white().bold(),
        storage.count_records(record_type)?
    );

    Ok(())
}

/// Run recommend command
fn run_recommend(
    db_path: Option<PathBuf>,
    query: String,
    top_n: usize,
    json: bool,
) -> anyhow::Result<()> {
    let storage = Storage::new(db_path)?;
    let result = Recommender::default().recommend(&Query::new(query.clone(), top_n), &storage)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!("{}", "=== CollabUp Recommendations ===".cyan().bold());
    println!("{}: {}", "Query".white().bold(), query);

    if result.is_empty() {
        println!();
        println!("{}", "No matches found.".dimmed());
        return Ok(());
    }

    for record_type in RecordType::ALL {
        let hits = result.get(record_type);
        println!();
        println!(
            "{} ({})",
            record_type.as_str().yellow().bold(),
            hits.len()
        );
        if hits.is_empty() {
            println!("  {}", "none".dimmed());
        }
        for (rank, hit) in hits.iter().enumerate() {
            print_hit(rank + 1, hit);
        }
    }

    Ok(())
}

/// Best human-readable label of a record
fn display_label(hit: &ScoredRecord) -> String {
    ["title", "name"]
        .iter()
        .find_map(|key| hit.record.get(key).and_then(Value::as_str))
        .map(str::to_string)
        .unwrap_or_else(|| hit.record.id.clone())
}

fn print_hit(rank: usize, hit: &ScoredRecord) {
    println!(
        "  {:>2}. {} {} {}",
        rank,
        display_label(hit).white().bold(),
        format!("[{}]", hit.record.id).dimmed(),
        format!("{:.3}", hit.similarity_score).green()
    );
}

/// Run debug command
fn run_debug(db_path: Option<PathBuf>, query: &str) -> anyhow::Result<()> {
    let terms = parse_query(query);

    println!("{}", "=== Query Breakdown ===".cyan().bold());
    println!("{}: {}", "Query".white().bold(), query);
    println!("{}: {}", "Terms".white().bold(), terms.total_terms());
    for (category, bucket) in terms.iter() {
        if !bucket.is_empty() {
            println!("  {:12} {}", category.as_str(), bucket.join(", "));
        }
    }

    let storage = Storage::new(db_path)?;
    let recommender = Recommender::default();

    println!();
    println!("{}", "=== Sample Scores ===".yellow().bold());
    for record_type in RecordType::ALL {
        match storage.sample_records(record_type, 1)?.into_iter().next() {
            Some(record) => {
                let score = recommender.ranker().score(&terms, &record, record_type)?;
                println!(
                    "  {:18} {:>8.3}  {}",
                    record_type.as_str(),
                    score,
                    format!("[{}]", record.id).dimmed()
                );
            }
            None => println!("  {:18} {}", record_type.as_str(), "no data".dimmed()),
        }
    }

    Ok(())
}

/// Run collections command
fn run_collections(db_path: Option<PathBuf>) -> anyhow::Result<()> {
    let storage = Storage::new(db_path)?;

    println!("{}", "=== CollabUp Collections ===".cyan().bold());
    println!();
    for info in storage.collections_info()? {
        println!(
            "{:10} {:>6}  {}",
            info.collection.white().bold(),
            info.count,
            info.description.dimmed()
        );
    }

    Ok(())
}

/// Run health check
fn run_health(db_path: Option<PathBuf>) -> anyhow::Result<()> {
    let storage = Storage::new(db_path)?;
    let health = storage.collection_health();

    println!("{}", "=== CollabUp Health Check ===".cyan().bold());
    println!();

    let failed = health.iter().filter(|h| !h.is_accessible()).count();
    let status = match failed {
        0 => "HEALTHY".green().bold(),
        n if n == health.len() => "UNHEALTHY".red().bold(),
        _ => "PARTIAL".yellow().bold(),
    };
    println!("{}: {}", "Status".white().bold(), status);

    for entry in &health {
        match &entry.status {
            CollectionStatus::Accessible { sample_count } => println!(
                "  {:10} {} (sample: {})",
                entry.collection,
                "accessible".green(),
                sample_count
            ),
            CollectionStatus::Error { error } => {
                println!("  {:10} {} {}", entry.collection, "error".red(), error)
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("{} of {} collections unreadable", failed, health.len());
    }

    Ok(())
}
