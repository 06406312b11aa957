use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use dominion_catalog_core::{CARDS_URI, Card, Column};
use dominion_catalog_db::{CardResources, CatalogConfig};
use dominion_catalog_sqlite::{CardProvider, Cursor, SchemaManager, StoreStatus};
use rusqlite::types::Value;
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Output format for query and status results.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliOutputFormat {
    Table,
    Json,
}

/// Log verbosity, written to stderr.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_filter_directive(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "dominion-catalog")]
#[command(about = "Read-only Dominion card catalog backed by SQLite")]
#[command(version)]
struct Cli {
    /// YAML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Store file, overriding the configuration.
    #[arg(long, global = true)]
    db: Option<PathBuf>,
    /// Card resource directory, overriding the packaged dataset.
    #[arg(long, global = true)]
    resources: Option<PathBuf>,
    /// Declared data version, overriding the resources.
    #[arg(long, global = true)]
    data_version: Option<u32>,
    /// Log level; RUST_LOG takes precedence when set.
    #[arg(long, global = true, default_value = "warn")]
    log_level: LogLevel,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Query the card table.
    Query(QueryArgs),
    /// Show one card by id.
    Card(CardArgs),
    /// Show the state of the store without building it.
    Status(StatusArgs),
    /// Drop and rebuild the store from the card resources.
    Rebuild,
    /// Print the content type served at an address.
    Type(TypeArgs),
}

#[derive(Debug, Args)]
struct QueryArgs {
    /// Comma-separated columns or expressions (default: every column).
    #[arg(long)]
    projection: Option<String>,
    /// Filter expression with `?` placeholders.
    #[arg(long)]
    selection: Option<String>,
    /// Value bound to the next placeholder; repeat for each one.
    #[arg(long = "arg")]
    args: Vec<String>,
    /// ORDER BY expression (default: expansion, name; empty: unordered).
    #[arg(long)]
    sort: Option<String>,
    /// Output format.
    #[arg(long, default_value = "table")]
    format: CliOutputFormat,
}

#[derive(Debug, Args)]
struct CardArgs {
    /// Card id.
    id: i64,
    /// Output format.
    #[arg(long, default_value = "table")]
    format: CliOutputFormat,
}

#[derive(Debug, Args)]
struct StatusArgs {
    /// Output format.
    #[arg(long, default_value = "table")]
    format: CliOutputFormat,
}

#[derive(Debug, Args)]
struct TypeArgs {
    /// Address to resolve.
    #[arg(default_value = CARDS_URI)]
    address: String,
}

fn main() {
    let cli = Cli::parse();
    initialize_tracing(cli.log_level);

    let result = resolve_config(&cli).and_then(|config| match cli.command {
        Command::Query(args) => run_query(&config, args),
        Command::Card(args) => run_card(&config, args),
        Command::Status(args) => run_status(&config, args),
        Command::Rebuild => run_rebuild(&config),
        Command::Type(args) => run_type(&config, args),
    });

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn initialize_tracing(log_level: LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.to_filter_directive()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Layers command-line overrides over the configuration file.
fn resolve_config(cli: &Cli) -> Result<CatalogConfig, String> {
    let mut config = match &cli.config {
        Some(path) => CatalogConfig::load(path)
            .map_err(|e| format!("Failed to load config '{}': {e}", path.display()))?,
        None => CatalogConfig::default(),
    };
    if let Some(db) = &cli.db {
        config.database = db.clone();
    }
    if let Some(resources) = &cli.resources {
        config.resources = Some(resources.clone());
    }
    if let Some(version) = cli.data_version {
        config.version = Some(version);
    }
    debug!(?config, "Resolved configuration");
    Ok(config)
}

fn run_query(config: &CatalogConfig, args: QueryArgs) -> Result<(), String> {
    let provider = CardProvider::from_config(config);
    let projection = parse_csv_list(args.projection);
    let projection: Vec<&str> = projection.iter().map(String::as_str).collect();
    let bound: Vec<&str> = args.args.iter().map(String::as_str).collect();

    let cursor = provider
        .query(
            Some(projection.as_slice()),
            args.selection.as_deref(),
            Some(bound.as_slice()),
            args.sort.as_deref(),
        )
        .map_err(|e| format!("Query failed: {e}"))?;

    match args.format {
        CliOutputFormat::Table => print!("{}", format_cursor_table(cursor)),
        CliOutputFormat::Json => println!("{}", format_cursor_json(cursor)?),
    }
    Ok(())
}

fn run_card(config: &CatalogConfig, args: CardArgs) -> Result<(), String> {
    let provider = CardProvider::from_config(config);
    let card = provider
        .card(args.id)
        .map_err(|e| format!("Lookup failed: {e}"))?
        .ok_or_else(|| format!("No card with id {}", args.id))?;

    match args.format {
        CliOutputFormat::Table => print!("{}", format_card(&card)),
        CliOutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&card)
                .map_err(|e| format!("JSON serialization failed: {e}"))?
        ),
    }
    Ok(())
}

#[derive(Debug, Serialize)]
struct StatusOutput {
    database: PathBuf,
    exists: bool,
    modified: Option<String>,
    declared_version: u32,
    #[serde(flatten)]
    store: StoreStatus,
}

fn run_status(config: &CatalogConfig, args: StatusArgs) -> Result<(), String> {
    let declared_version = config
        .resources()
        .version()
        .map_err(|e| format!("Failed to read declared version: {e}"))?;

    let exists = config.database.exists();
    let store = if exists {
        SchemaManager::open(&config.database)
            .and_then(|manager| manager.status())
            .map_err(|e| {
                format!(
                    "Failed to inspect store '{}': {e}",
                    config.database.display()
                )
            })?
    } else {
        StoreStatus::default()
    };

    let output = StatusOutput {
        database: config.database.clone(),
        exists,
        modified: modified_time(&config.database),
        declared_version,
        store,
    };

    match args.format {
        CliOutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&output)
                .map_err(|e| format!("JSON serialization failed: {e}"))?
        ),
        CliOutputFormat::Table => {
            let current = output.store.table_exists
                && output.store.stored_version == output.declared_version;
            println!("Store Status:");
            println!("  Database: {}", output.database.display());
            println!("  Exists: {}", if output.exists { "yes" } else { "no" });
            if let Some(modified) = &output.modified {
                println!("  Modified: {modified}");
            }
            println!(
                "  Table exists: {}",
                if output.store.table_exists { "yes" } else { "no" }
            );
            println!("  Stored version: {}", output.store.stored_version);
            println!("  Declared version: {}", output.declared_version);
            println!("  Up to date: {}", if current { "yes" } else { "no" });
            println!("  Card count: {}", output.store.card_count);
            for (expansion, count) in &output.store.expansions {
                println!("    {expansion}: {count}");
            }
        }
    }
    Ok(())
}

fn run_rebuild(config: &CatalogConfig) -> Result<(), String> {
    let resources = config.resources();
    let mut manager = SchemaManager::open(&config.database).map_err(|e| {
        format!(
            "Failed to open store '{}': {e}",
            config.database.display()
        )
    })?;
    let report = manager
        .rebuild(resources.as_ref())
        .map_err(|e| format!("Rebuild failed: {e}"))?;
    let version = manager
        .stored_version()
        .map_err(|e| format!("Failed to read stored version: {e}"))?;
    info!(version, "Store rebuilt");

    println!(
        "Rebuild complete (table dropped, recreated, and reloaded) at version {version}:"
    );
    for set in &report.sets {
        println!(
            "  {}: {} read, {} inserted",
            set.set, set.records_read, set.rows_inserted
        );
    }
    println!("  Total cards: {}", report.rows_inserted());
    Ok(())
}

fn run_type(config: &CatalogConfig, args: TypeArgs) -> Result<(), String> {
    let provider = CardProvider::from_config(config);
    println!("{}", provider.get_type(&args.address));
    Ok(())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_csv_list(raw: Option<String>) -> Vec<String> {
    raw.map(|value| {
        value
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(ToOwned::to_owned)
            .collect()
    })
    .unwrap_or_default()
}

fn modified_time(path: &Path) -> Option<String> {
    let modified = std::fs::metadata(path).ok()?.modified().ok()?;
    let local: chrono::DateTime<chrono::Local> = modified.into();
    Some(local.format("%Y-%m-%d %H:%M:%S").to_string())
}

fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Integer(n) => n.to_string(),
        Value::Real(r) => r.to_string(),
        Value::Text(text) => text.clone(),
        Value::Blob(bytes) => format!("<{} bytes>", bytes.len()),
    }
}

fn value_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Null => serde_json::Value::Null,
        Value::Integer(n) => serde_json::Value::from(*n),
        Value::Real(r) => serde_json::Value::from(*r),
        Value::Text(text) => serde_json::Value::from(text.as_str()),
        Value::Blob(bytes) => serde_json::Value::from(bytes.clone()),
    }
}

/// Renders a cursor as tab-separated rows under a header line.
fn format_cursor_table(cursor: Cursor) -> String {
    let mut out = cursor.columns().join("\t");
    out.push('\n');
    for row in cursor {
        let cells: Vec<String> = row.values().iter().map(value_text).collect();
        out.push_str(&cells.join("\t"));
        out.push('\n');
    }
    out
}

fn format_cursor_json(cursor: Cursor) -> Result<String, String> {
    let rows: Vec<serde_json::Map<String, serde_json::Value>> = cursor
        .map(|row| {
            row.columns()
                .iter()
                .cloned()
                .zip(row.values().iter().map(value_json))
                .collect()
        })
        .collect();
    serde_json::to_string_pretty(&rows).map_err(|e| format!("JSON serialization failed: {e}"))
}

fn format_card(card: &Card) -> String {
    let mut out = format!("id: {}\n", card.id);
    for column in Column::DATA {
        let value = match column {
            Column::Potion => card.potion.map(|p| p.to_string()),
            _ => card.text(column).map(ToOwned::to_owned),
        };
        out.push_str(&format!(
            "{}: {}\n",
            column.name(),
            value.unwrap_or_default()
        ));
    }
    out
}
