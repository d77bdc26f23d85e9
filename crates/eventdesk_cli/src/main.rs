//! EventDesk command-line entry point.
//!
//! # Responsibility
//! - Smoke-probe `eventdesk_core` linkage when run without a subcommand.
//! - Bootstrap a database file and print the report views as JSON.
//!
//! Usage: eventdesk [init|report] [--db <PATH>] [--limit <N>]

use clap::{Args, Parser, Subcommand};
use eventdesk_core::db::open_db;
use eventdesk_core::input::parse_limit;
use eventdesk_core::{init_logging, ReportService, Settings, SqliteReportRepository};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "eventdesk")]
#[command(about = "EventDesk - college event registrations and reports", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Create the schema if needed and exit
    Init(DbArgs),
    /// Print all four report views as one JSON document
    Report(ReportArgs),
}

#[derive(Debug, Args)]
struct DbArgs {
    /// Database file (default: $EVENTDESK_DB_PATH or <tmp>/eventdesk.sqlite3)
    #[arg(long)]
    db: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct ReportArgs {
    #[command(flatten)]
    db: DbArgs,

    /// Rows in the top-students view
    #[arg(long)]
    limit: Option<String>,
}

fn main() {
    let cli = Cli::parse();
    let settings = Settings::from_env();

    if let Some(log_dir) = settings.log_dir.as_ref() {
        if let Err(err) = init_logging(&settings.log_level, log_dir) {
            eprintln!("Warning: logging disabled: {err}");
        }
    }

    let result = match cli.command {
        None => {
            println!("eventdesk_core ping={}", eventdesk_core::ping());
            println!("eventdesk_core version={}", eventdesk_core::core_version());
            Ok(())
        }
        Some(Commands::Init(args)) => init(&settings, args),
        Some(Commands::Report(args)) => report(&settings, args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn db_path(settings: &Settings, args: DbArgs) -> PathBuf {
    args.db.unwrap_or_else(|| settings.db_path.clone())
}

fn init(settings: &Settings, args: DbArgs) -> Result<(), Box<dyn std::error::Error>> {
    let path = db_path(settings, args);
    open_db(&path)?;
    println!("database ready at {}", path.display());
    Ok(())
}

fn report(settings: &Settings, args: ReportArgs) -> Result<(), Box<dyn std::error::Error>> {
    let limit = parse_limit(args.limit.as_deref())?;
    let conn = open_db(db_path(settings, args.db))?;
    let service = ReportService::new(SqliteReportRepository::try_new(&conn)?);
    let bundle = service.summary(Some(limit))?;
    println!("{}", serde_json::to_string_pretty(&bundle)?);
    Ok(())
}
