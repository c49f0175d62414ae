//! Veriseal command line entry point.

mod config;
mod render;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::Parser;
use tokio::sync::broadcast;
use tracing::info;

use veriseal_ledger::SimulatedRegistrar;
use veriseal_store::{Clock, ContentStore, RecordStore, SystemClock};
use veriseal_types::{UploadCandidate, WalletAddress, WorkflowState};
use veriseal_utils::{init_logging, LogFormat};
use veriseal_verification::{
    Collaborators, Notification, NotificationLevel, SessionObserver, WorkflowController,
};
use veriseal_wallet_core::{
    ConnectedWallet, JsonlRecordStore, LocalContentStore, SupabaseClient, Web3StorageClient,
};

use crate::config::AppConfig;
use crate::render::{guess_media_type, result_panel, unverified_panel, Progress};

#[derive(Parser)]
#[command(
    name = "veriseal",
    version,
    about = "Pin content on IPFS, register it on a ledger and record the verification"
)]
struct Cli {
    /// Path to a TOML configuration file. CLI flags and env vars override it.
    #[arg(long, env = "VERISEAL_CONFIG")]
    config: Option<PathBuf>,

    /// Use offline content and record stores instead of the hosted services.
    #[arg(long, env = "VERISEAL_SIMULATE")]
    simulate: bool,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "VERISEAL_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "VERISEAL_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    /// Web3.Storage API token.
    #[arg(long, env = "VERISEAL_STORAGE_TOKEN", hide_env_values = true)]
    storage_token: Option<String>,

    /// Supabase project URL.
    #[arg(long, env = "VERISEAL_SUPABASE_URL")]
    supabase_url: Option<String>,

    /// Supabase anonymous key.
    #[arg(long, env = "VERISEAL_SUPABASE_ANON_KEY", hide_env_values = true)]
    supabase_anon_key: Option<String>,

    /// Access token from a completed OAuth sign-in.
    #[arg(long, env = "VERISEAL_ACCESS_TOKEN", hide_env_values = true)]
    access_token: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Verify a file: upload, register, record.
    Verify {
        path: PathBuf,

        /// Media type of the file. Guessed from the extension when omitted.
        #[arg(long)]
        media_type: Option<String>,

        /// Address of the connected wallet (0x followed by 40 hex digits).
        #[arg(long, env = "VERISEAL_WALLET")]
        wallet: Option<WalletAddress>,

        /// Print the result as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Inspect or change the sign-in session.
    Session {
        #[command(subcommand)]
        action: SessionAction,
    },
    /// Print the effective configuration with secrets redacted.
    Config,
}

#[derive(clap::Subcommand)]
enum SessionAction {
    Status,
    SignIn {
        #[arg(long, default_value = "github")]
        provider: String,
    },
    SignOut,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    init_logging(config.logging.format, &config.logging.level);
    if let Some(path) = &cli.config {
        info!(path = %path.display(), "configuration loaded");
    }

    match cli.command {
        Command::Verify {
            ref path,
            ref media_type,
            ref wallet,
            json,
        } => {
            let candidate = read_candidate(path, media_type.clone()).await?;
            let wallet = Arc::new(ConnectedWallet::new(wallet.clone()));
            verify(&config, &cli, candidate, wallet, json).await
        }
        Command::Session { ref action } => session(&config, &cli, action).await,
        Command::Config => {
            print!("{}", config.redacted().to_toml_string()?);
            Ok(())
        }
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<AppConfig> {
    let mut config = match &cli.config {
        Some(path) => AppConfig::from_toml_file(path)?,
        None => AppConfig::default(),
    };

    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
    }
    if let Some(format) = cli.log_format {
        config.logging.format = format;
    }
    if let Some(token) = &cli.storage_token {
        config.storage.token = token.clone();
    }
    if let Some(url) = &cli.supabase_url {
        config.database.url = url.clone();
    }
    if let Some(key) = &cli.supabase_anon_key {
        config.database.anon_key = key.clone();
    }
    Ok(config)
}

async fn read_candidate(path: &Path, media_type: Option<String>) -> anyhow::Result<UploadCandidate> {
    let payload = tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .with_context(|| format!("{} has no usable file name", path.display()))?;
    let media_type = media_type.unwrap_or_else(|| guess_media_type(path).to_string());
    Ok(UploadCandidate::new(name, media_type, payload))
}

// ── Verify ────────────────────────────────────────────────────────────

async fn verify(
    config: &AppConfig,
    cli: &Cli,
    candidate: UploadCandidate,
    wallet: Arc<ConnectedWallet>,
    json: bool,
) -> anyhow::Result<()> {
    config.validate(cli.simulate)?;

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let registrar = SimulatedRegistrar::new(wallet.clone(), clock.clone())
        .with_confirmation_delay(config.confirmation_delay());
    let (content_store, record_store) = if cli.simulate {
        simulated_stores(config)
    } else {
        hosted_stores(config, cli.access_token.as_deref()).await?
    };

    let controller = WorkflowController::new(Collaborators {
        content_store,
        registrar: Arc::new(registrar),
        record_store,
        wallet,
        clock,
    })
    .with_deadlines(config.step_deadlines());

    let mut notes = controller.notifier().subscribe();
    let mut states = controller.subscribe_state();
    let mut progress = Progress::default();
    let mut show = |state: &WorkflowState| {
        if !json {
            for line in progress.advance(state) {
                eprintln!("{line}");
            }
        }
    };

    controller.select_candidate(candidate);
    let run = controller.run_verification();
    tokio::pin!(run);
    let state = loop {
        tokio::select! {
            outcome = &mut run => break outcome?,
            Ok(()) = states.changed() => {
                let state = *states.borrow_and_update();
                show(&state);
            }
        }
    };
    show(&state);
    drain_notifications(&mut notes);

    match controller.current_result() {
        Some(result) if json => println!("{}", serde_json::to_string_pretty(&result)?),
        Some(result) => print!("{}", result_panel(&result, &config.ledger.explorer_url)),
        None => {
            print!("{}", unverified_panel(&state));
            bail!("verification ended in state {state}");
        }
    }
    Ok(())
}

fn simulated_stores(config: &AppConfig) -> (Arc<dyn ContentStore>, Arc<dyn RecordStore>) {
    let dir = &config.simulation.data_dir;
    info!(data_dir = %dir.display(), "using offline content and record stores");
    let content = LocalContentStore::new()
        .with_gateway_host(config.storage.gateway_host.clone())
        .with_directory(dir.join("content"));
    let records = JsonlRecordStore::new(dir.join("verifications.jsonl"));
    (Arc::new(content), Arc::new(records))
}

async fn hosted_stores(
    config: &AppConfig,
    access_token: Option<&str>,
) -> anyhow::Result<(Arc<dyn ContentStore>, Arc<dyn RecordStore>)> {
    let storage = Web3StorageClient::with_endpoint(&config.storage.endpoint, config.storage.token.clone())?
        .with_gateway_host(config.storage.gateway_host.clone());
    let database = supabase_client(config, access_token).await?;
    Ok((Arc::new(storage), Arc::new(database)))
}

async fn supabase_client(
    config: &AppConfig,
    access_token: Option<&str>,
) -> anyhow::Result<SupabaseClient> {
    let db = &config.database;
    let mut client =
        SupabaseClient::new(&db.url, db.anon_key.clone())?.with_table(db.table.clone());
    if let Some(redirect) = &db.redirect_url {
        client = client.with_redirect(redirect.clone());
    }
    if let Some(token) = access_token {
        client
            .set_session(token)
            .await
            .context("could not restore the session from the access token")?;
    }
    Ok(client)
}

// ── Session ───────────────────────────────────────────────────────────

async fn session(config: &AppConfig, cli: &Cli, action: &SessionAction) -> anyhow::Result<()> {
    if cli.simulate {
        bail!("session commands need a configured identity provider; drop --simulate");
    }
    config.validate_database()?;

    let client = Arc::new(supabase_client(config, cli.access_token.as_deref()).await?);
    let observer = SessionObserver::new(
        client.clone(),
        Arc::new(ConnectedWallet::default()),
        Default::default(),
    );
    let mut notes = observer.notifier().subscribe();
    observer.start().await?;

    let outcome = match action {
        SessionAction::Status => {
            match observer.session() {
                Some(s) => println!("Signed in as {}", s.display_name()),
                None => println!("Not signed in"),
            }
            Ok(())
        }
        SessionAction::SignIn { provider } => observer.sign_in(provider).await.map(|()| {
            if let Some(url) = client.pending_authorize_url() {
                println!("Open this URL to finish signing in:\n  {url}");
                println!("Then pass the returned access token with --access-token.");
            }
        }),
        SessionAction::SignOut => observer.sign_out().await,
    };
    observer.stop();
    drain_notifications(&mut notes);
    Ok(outcome?)
}

fn drain_notifications(notes: &mut broadcast::Receiver<Notification>) {
    while let Ok(note) = notes.try_recv() {
        let tag = match note.level {
            NotificationLevel::Success => "ok",
            NotificationLevel::Error => "error",
        };
        eprintln!("[{tag}] {}", note.message);
    }
}
