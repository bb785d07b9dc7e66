use clap::{Parser, Subcommand};
use console::style;
use quizbox_db::DbConfig;
use std::path::PathBuf;
use std::process::exit;

mod api_client;
mod commands;
mod error;

use api_client::ApiClient;
use error::CliError;

#[derive(Parser)]
#[command(name = "quizbox")]
#[command(about = "Quizbox operational tools", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List ads whose content.url is an inline data URL or oversized
    CleanupAds {
        /// URL length above which an ad is reported
        #[arg(long, default_value_t = quizbox_db::maintenance::cleanup::DEFAULT_THRESHOLD)]
        threshold: usize,
        /// Delete the listed ads
        #[arg(long)]
        delete: bool,
    },
    /// Dump ads and quizzes to JSON, then truncate both tables
    ExportWipe {
        /// Directory for the backup files
        #[arg(long, default_value = "backups")]
        out: PathBuf,
    },
    /// Run one SQL file inside a transaction
    Migrate {
        /// SQL file to execute verbatim
        file: PathBuf,
    },
    /// Replace all quizzes with the sample quizzes
    Seed,
    /// Post the house ads to a running API
    PopulateAds {
        #[command(flatten)]
        api: ApiArgs,
    },
    /// Check a running API end to end
    Smoke {
        #[command(flatten)]
        api: ApiArgs,
    },
}

#[derive(clap::Args)]
struct ApiArgs {
    /// Base URL of the API server
    #[arg(long, env = "QUIZBOX_API_URL", default_value = "http://localhost:3000")]
    base_url: String,
    /// Admin bearer token
    #[arg(long, env = "ADMIN_TOKEN", hide_env_values = true)]
    token: Option<String>,
}

impl ApiArgs {
    fn client(self) -> ApiClient {
        ApiClient::new(&self.base_url, self.token)
    }
}

async fn dispatch(command: Commands) -> Result<(), CliError> {
    match command {
        Commands::CleanupAds { threshold, delete } => {
            let config = DbConfig::from_env()?;
            commands::cleanup::run(&config, threshold, delete).await
        }
        Commands::ExportWipe { out } => {
            let config = DbConfig::from_env()?;
            let confirm = std::env::var("WIPE_CONFIRM").ok();
            commands::wipe::run(&config, &out, confirm.as_deref()).await
        }
        Commands::Migrate { file } => {
            let config = DbConfig::from_env()?;
            commands::migrate::run(&config, &file).await
        }
        Commands::Seed => {
            let config = DbConfig::from_env()?;
            commands::seed::run(&config).await
        }
        Commands::PopulateAds { api } => commands::populate::run(&api.client()).await,
        Commands::Smoke { api } => commands::smoke::run(&api.client()).await,
    }
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quizbox_db=info,sqlx=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = dispatch(cli.command).await {
        eprintln!("{}", style(format!("Error: {}", e)).red());
        exit(e.exit_code());
    }
}
