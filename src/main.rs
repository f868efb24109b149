//! HR Medical Records - command line host for the medical record service.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use hr_medical_records as app;

use app::config::{AppConfig, ConfigLoadResult, LogConfig};
use app::db;
use app::models::{CreateMedicalRecord, DeleteMedicalRecord, MedicalRecordFilter, UpdateMedicalRecord};
use app::response::Envelope;
use app::service::MedicalRecordService;
use app::store::{InMemoryStore, MedicalRecordStore};

/// Employee medical-leave records.
#[derive(Parser)]
#[command(name = "hr-medical-records", version)]
struct Cli {
    /// Use config.toml from current directory (dev mode)
    #[arg(long, conflicts_with = "config")]
    dev: bool,

    /// Config file path
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Use a throwaway in-memory store instead of PostgreSQL
    #[arg(long)]
    memory: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create a record from a JSON request
    Create(JsonInput),
    /// Partially update a record from a JSON request
    Update(JsonInput),
    /// Soft-delete a record from a JSON request
    Delete(JsonInput),
    /// Get a record by id
    Get { id: i32 },
    /// List records matching filters
    List(ListArgs),
    /// Check the database connection and print table counts
    Check,
    /// Write a default config file if none exists
    InitConfig,
}

#[derive(Args)]
struct JsonInput {
    /// Request file, or `-` for stdin
    #[arg(long, value_name = "FILE")]
    json: PathBuf,
}

#[derive(Args)]
struct ListArgs {
    #[arg(long)]
    status_id: Option<i32>,
    /// Records starting on or after this date (YYYY-MM-DD)
    #[arg(long)]
    start_date: Option<NaiveDate>,
    /// Records ending on or before this date (YYYY-MM-DD)
    #[arg(long)]
    end_date: Option<NaiveDate>,
    #[arg(long = "type-id")]
    medical_record_type_id: Option<i32>,
    #[arg(long, default_value_t = 1)]
    page: i32,
    #[arg(long, default_value_t = 10)]
    page_size: i32,
}

impl From<ListArgs> for MedicalRecordFilter {
    fn from(args: ListArgs) -> Self {
        Self {
            status_id: args.status_id,
            start_date: args.start_date,
            end_date: args.end_date,
            medical_record_type_id: args.medical_record_type_id,
            page: Some(args.page),
            page_size: Some(args.page_size),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Determine config path based on mode
    let config_path = match (&cli.config, cli.dev) {
        (Some(path), _) => path.clone(),
        (None, true) => PathBuf::from("config.toml"),
        (None, false) => AppConfig::default_path(),
    };

    if let Command::InitConfig = cli.command {
        return init_config(&config_path);
    }

    let (config, loaded) = load_config(&config_path)?;
    let guard = init_logging(&config.log);

    tracing::info!("HR Medical Records starting...");
    if loaded {
        tracing::info!("Config loaded from {:?}", config_path);
    } else {
        tracing::info!("Config missing at {:?}, using defaults", config_path);
    }

    let success = run(cli, config).await?;

    // Flush file logs; process::exit skips destructors.
    drop(guard);
    if !success {
        std::process::exit(1);
    }
    Ok(())
}

fn load_config(path: &Path) -> anyhow::Result<(AppConfig, bool)> {
    match AppConfig::try_load(path) {
        ConfigLoadResult::Loaded(config) => Ok((config, true)),
        ConfigLoadResult::Missing => Ok((AppConfig::default(), false)),
        ConfigLoadResult::Invalid(e) => bail!("Config invalid ({}): {}", path.display(), e),
    }
}

fn init_config(path: &Path) -> anyhow::Result<()> {
    if path.exists() {
        bail!("Config already exists: {}", path.display());
    }
    AppConfig::default()
        .save(path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    println!("Wrote default config to {}", path.display());
    Ok(())
}

/// Install the tracing subscriber. Stdout is reserved for envelopes.
fn init_logging(config: &LogConfig) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    match &config.directory {
        Some(directory) => {
            let appender = tracing_appender::rolling::daily(directory, "hr-medical-records.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
            None
        }
    }
}

/// Run the command. Returns whether it succeeded.
async fn run(cli: Cli, config: AppConfig) -> anyhow::Result<bool> {
    if cli.memory {
        tracing::info!("Using in-memory store");
        if let Command::Check = cli.command {
            println!("In-memory store, nothing to check");
            return Ok(true);
        }
        let service = MedicalRecordService::new(InMemoryStore::new(), config.records);
        return execute(&service, cli.command).await;
    }

    let conn = db::connect(&config.database)
        .await
        .context("Failed to connect to database")?;

    if let Command::Check = cli.command {
        return check(&conn).await;
    }

    let service = MedicalRecordService::new(db::SeaOrmStore::new(conn), config.records);
    execute(&service, cli.command).await
}

async fn check(conn: &sea_orm::DatabaseConnection) -> anyhow::Result<bool> {
    let version = db::server_version(conn).await.context("Database check failed")?;
    let counts = db::get_table_counts(conn).await.context("Failed to count table rows")?;

    tracing::info!("PostgreSQL: {}", version);
    println!("PostgreSQL: {version}");
    println!(
        "Tables: {} medical records, {} record types, {} statuses",
        counts.medical_records, counts.record_types, counts.statuses
    );
    Ok(true)
}

async fn execute<S: MedicalRecordStore>(service: &MedicalRecordService<S>, command: Command) -> anyhow::Result<bool> {
    match command {
        Command::Create(input) => {
            let envelope = match read_request::<CreateMedicalRecord>(&input.json)? {
                Ok(dto) => service.create(dto).await,
                Err(e) => Envelope::from_error(e),
            };
            print_envelope(&envelope)
        }
        Command::Update(input) => {
            let envelope = match read_request::<UpdateMedicalRecord>(&input.json)? {
                Ok(dto) => service.update(dto).await,
                Err(e) => Envelope::from_error(e),
            };
            print_envelope(&envelope)
        }
        Command::Delete(input) => {
            let envelope = match read_request::<DeleteMedicalRecord>(&input.json)? {
                Ok(dto) => service.soft_delete(dto).await,
                Err(e) => Envelope::from_error(e),
            };
            print_envelope(&envelope)
        }
        Command::Get { id } => print_envelope(&service.get_by_id(id).await),
        Command::List(args) => print_envelope(&service.get_filtered(args.into()).await),
        Command::Check | Command::InitConfig => bail!("Command does not use the record service"),
    }
}

/// Read a JSON request. Unreadable input is fatal; malformed JSON becomes a
/// request error.
fn read_request<T: DeserializeOwned>(path: &Path) -> anyhow::Result<app::Result<T>> {
    let text = if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read request from stdin")?;
        text
    } else {
        std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?
    };
    Ok(serde_json::from_str(&text).map_err(app::AppError::from))
}

fn print_envelope<T: Serialize>(envelope: &Envelope<T>) -> anyhow::Result<bool> {
    println!("{}", serde_json::to_string_pretty(envelope)?);
    Ok(envelope.success)
}
