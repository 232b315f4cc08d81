use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

use cowriter_application::WriterSession;
use cowriter_infrastructure::{
    CoWriterPaths, FileKeyValueStore, KvAuthTokenStore, SettingsService, StorageAdapter,
};
use cowriter_interaction::HttpBackendClient;

mod commands;
mod logging;

use commands::auth::TokenAction;
use commands::config::{ActionsAction, ConfigAction, EvalsAction};
use commands::docs::DocsAction;
use commands::llm::ConnectArgs;
use commands::types::TypesAction;

#[derive(Parser)]
#[command(name = "cowriter")]
#[command(about = "CoWriter - AI-assisted writing from the terminal", long_about = None)]
struct Cli {
    /// Backend base URL (overrides settings and COWRITER_BACKEND_URL)
    #[arg(long, global = true)]
    backend_url: Option<String>,

    /// Storage file (overrides settings and COWRITER_STORAGE_FILE)
    #[arg(long, global = true)]
    storage_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage documents
    Docs {
        #[command(subcommand)]
        action: DocsAction,
    },
    /// Writing preferences
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Manage action buttons
    Actions {
        #[command(subcommand)]
        action: ActionsAction,
    },
    /// Manage evals
    Evals {
        #[command(subcommand)]
        action: EvalsAction,
    },
    /// Document types offered for new documents
    Types {
        #[command(subcommand)]
        action: TypesAction,
    },
    /// Bearer token used for backend requests
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },
    /// Apply an action to the selected document
    Run {
        /// Action id or name
        action: String,
        #[command(flatten)]
        connect: ConnectArgs,
    },
    /// Score the selected document with an eval
    Eval {
        /// Eval id or name
        eval: String,
        #[command(flatten)]
        connect: ConnectArgs,
    },
    /// Ask the assistant about the selected document
    Chat {
        message: String,
        #[command(flatten)]
        connect: ConnectArgs,
    },
    /// Show backend health
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings_service = SettingsService::new(CoWriterPaths::new())?;
    let mut settings = settings_service.load();
    if let Some(url) = cli.backend_url {
        settings.backend_url = url;
    }
    if let Some(path) = cli.storage_file {
        settings.storage_file = Some(path);
    }

    let _guard = logging::init(&settings_service.logs_dir()?, &settings.log_level)?;

    let storage_path = settings_service.storage_file(&settings)?;
    tracing::debug!("Using storage file {}", storage_path.display());
    let adapter = Arc::new(StorageAdapter::new(Arc::new(FileKeyValueStore::new(
        storage_path,
    ))));
    let tokens = Arc::new(KvAuthTokenStore::new(adapter.clone()));
    let client = Arc::new(HttpBackendClient::from_settings(&settings, tokens.clone())?);

    if let Commands::Token { action } = cli.command {
        return commands::auth::run(&tokens, action);
    }
    if let Commands::Status = cli.command {
        return commands::llm::status(client.as_ref()).await;
    }

    let session = WriterSession::start(adapter, client, settings.autosave_delay()).await;
    let result = match cli.command {
        Commands::Docs { action } => commands::docs::run(&session, action).await,
        Commands::Config { action } => commands::config::run(&session, action).await,
        Commands::Actions { action } => commands::config::run_actions(&session, action).await,
        Commands::Evals { action } => commands::config::run_evals(&session, action).await,
        Commands::Types { action } => commands::types::run(&session, action).await,
        Commands::Run { action, connect } => {
            commands::llm::run_action(&session, &action, &connect).await
        }
        Commands::Eval { eval, connect } => commands::llm::run_eval(&session, &eval, &connect).await,
        Commands::Chat { message, connect } => {
            commands::llm::chat(&session, &message, &connect).await
        }
        Commands::Token { .. } | Commands::Status => Ok(()),
    };
    session.close().await;
    result
}
