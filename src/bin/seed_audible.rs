//! Seed the catalog from an Audible library.
//!
//! Reads the library either from a JSON export (`--file`) or straight from
//! the Audible API with an access token, then creates an author and a book
//! for every entry.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;

use book_alchemy::{
    config::AppConfig,
    models::{ImportAction, LibraryEntry, LibraryResponse},
    repository::Repository,
    services::{audible::AudibleClient, Services},
};

#[derive(Debug, Parser)]
#[command(name = "seed_audible", version, about = "Import an Audible library into the catalog")]
struct Args {
    /// Import from a saved library JSON file instead of the API
    #[arg(long)]
    file: Option<PathBuf>,

    /// Audible access token (prompted for when missing)
    #[arg(long, env = "AUDIBLE_ACCESS_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Marketplace locale, e.g. US, UK, DE
    #[arg(long)]
    locale: Option<String>,
}

fn prompt(label: &str) -> anyhow::Result<String> {
    print!("{}: ", label);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

async fn load_entries(args: &Args, config: &AppConfig) -> anyhow::Result<Vec<LibraryEntry>> {
    if let Some(path) = &args.file {
        let raw = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let library: LibraryResponse =
            serde_json::from_str(&raw).with_context(|| format!("{} is not a library listing", path.display()))?;
        return Ok(library.into_entries());
    }

    let token = match &args.token {
        Some(token) => token.clone(),
        None => prompt("Audible access token")?,
    };
    if token.is_empty() {
        bail!("An access token or --file is required");
    }

    let mut audible = config.audible.clone();
    if let Some(locale) = &args.locale {
        audible.locale = locale.clone();
    }

    let client = AudibleClient::new(&audible, token)?;
    Ok(client.fetch_library().await?)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let args = Args::parse();
    let config = AppConfig::load().context("Failed to load configuration")?;
    config.logging.init_tracing("book_alchemy");

    let entries = load_entries(&args, &config).await?;
    if entries.is_empty() {
        println!("Library is empty, nothing to import.");
        return Ok(());
    }

    let repository = Repository::connect(&config.database)
        .await
        .context("Failed to open the catalog database")?;
    let services = Services::new(repository);

    let report = services.import.import_entries(&entries).await?;
    for outcome in report.outcomes.iter().filter(|o| o.action != ImportAction::Created) {
        println!(
            "  {:?}: {} ({})",
            outcome.action,
            outcome.title.as_deref().unwrap_or("<untitled>"),
            outcome.message.as_deref().unwrap_or_default()
        );
    }
    println!("Imported {} entries: {}", entries.len(), report.summary());

    Ok(())
}
