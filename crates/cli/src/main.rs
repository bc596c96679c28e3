use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use quotebook_storage::StorageBackend;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "quotebook")]
#[command(about = "Quote collection with weighted random selection and popularity rankings", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the web server
    Serve {
        #[arg(short, long, env = "QUOTEBOOK_PORT", default_value = "8000")]
        port: u16,
        #[arg(short = 'H', long, env = "QUOTEBOOK_HOST", default_value = "127.0.0.1")]
        host: String,
    },
    /// List sources with their quote counts
    Sources,
    /// List all quotes
    Quotes,
    /// Pick a quote by weight and count the view
    Random,
    /// Show the three popularity rankings
    Popular {
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Add a source
    AddSource {
        title: String,
        /// movie, book, series, game or other
        #[arg(short = 't', long = "type")]
        source_type: String,
        #[arg(short, long)]
        year: Option<i32>,
    },
    /// Add a quote to a source
    AddQuote {
        text: String,
        #[arg(short, long)]
        source: i64,
        #[arg(short, long, default_value = "1")]
        weight: i64,
    },
    /// Change the selection weight of a quote (0 takes it out of rotation)
    SetWeight {
        id: i64,
        #[arg(allow_negative_numbers = true)]
        weight: i64,
    },
    /// Delete a source together with its quotes
    DeleteSource { id: i64 },
}

pub(crate) fn get_db_path() -> PathBuf {
    std::env::var("QUOTEBOOK_DB_PATH").map(PathBuf::from).unwrap_or_else(|_| {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("quotebook")
            .join("quotes.db")
    })
}

pub(crate) fn ensure_db_dir(db_path: &Path) -> Result<()> {
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// PostgreSQL when built with `postgres` and `DATABASE_URL` is set, SQLite otherwise.
pub(crate) async fn open_backend() -> Result<Arc<StorageBackend>> {
    #[cfg(feature = "postgres")]
    if let Ok(url) = std::env::var("DATABASE_URL") {
        tracing::info!("Using PostgreSQL backend");
        return Ok(Arc::new(StorageBackend::new_postgres(&url).await?));
    }
    open_sqlite()
}

#[cfg(feature = "sqlite")]
fn open_sqlite() -> Result<Arc<StorageBackend>> {
    let db_path = get_db_path();
    ensure_db_dir(&db_path)?;
    Ok(Arc::new(StorageBackend::new_sqlite(&db_path)?))
}

#[cfg(not(feature = "sqlite"))]
fn open_sqlite() -> Result<Arc<StorageBackend>> {
    anyhow::bail!("built without SQLite support: set DATABASE_URL")
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let storage = open_backend().await?;

    match cli.command {
        Commands::Serve { port, host } => commands::serve::run(storage, &host, port).await,
        Commands::Sources => commands::admin::list_sources(storage).await,
        Commands::Quotes => commands::admin::list_quotes(storage).await,
        Commands::Random => commands::admin::random(storage).await,
        Commands::Popular { limit } => commands::admin::popular(storage, limit).await,
        Commands::AddSource { title, source_type, year } => {
            commands::admin::add_source(storage, title, source_type, year).await
        },
        Commands::AddQuote { text, source, weight } => {
            commands::admin::add_quote(storage, text, source, weight).await
        },
        Commands::SetWeight { id, weight } => commands::admin::set_weight(storage, id, weight).await,
        Commands::DeleteSource { id } => commands::admin::delete_source(storage, id).await,
    }
}
