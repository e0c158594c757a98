use std::path::PathBuf;
use std::sync::Arc;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use cmdgate_common::models::InvocationContext;
use cmdgate_core::commands::{ActionRegistry, CommandEnvironment, CommandManager};
use cmdgate_core::config::CommandConfig;
use cmdgate_core::discovery::DirectorySource;
use cmdgate_core::logging::TracingInvocationLogger;
use cmdgate_core::moderation::{InMemoryBanList, StaticPermissions};
use cmdgate_core::settings::InMemorySettings;

mod console;
use console::ConsoleSink;

#[derive(Parser, Debug, Clone)]
#[command(name = "cmdgate")]
#[command(author, version, about = "cmdgate - command dispatch console")]
struct Args {
    /// Directory holding one JSON command definition per file
    #[arg(long, default_value = "commands")]
    commands_dir: PathBuf,

    /// Config file. Defaults to <config dir>/cmdgate/config.json when that exists.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Invoker id every input line is attributed to
    #[arg(long, default_value = "console")]
    invoker: String,

    /// Display name used in replies
    #[arg(long, default_value = "console")]
    invoker_name: String,

    #[arg(long, default_value = "console")]
    channel: String,

    /// Treat input as coming from this guild instead of a direct conversation
    #[arg(long)]
    guild: Option<String>,

    /// Give the invoker elevated rights in the guild
    #[arg(long, default_value = "false")]
    elevated: bool,
}

fn init_tracing() {
    let filter = EnvFilter::from_default_env()
        .add_directive("cmdgate=info".parse().unwrap_or_default());
    let sub = fmt().with_env_filter(filter).with_writer(std::io::stderr).finish();
    if let Err(e) = tracing::subscriber::set_global_default(sub) {
        eprintln!("Failed to set global subscriber: {}", e);
    }
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<CommandConfig> {
    let default_path = dirs::config_dir().map(|dir| dir.join("cmdgate").join("config.json"));
    let config = match (path, default_path) {
        (Some(path), _) => CommandConfig::from_file(path)?,
        (None, Some(path)) if path.is_file() => CommandConfig::from_file(&path)?,
        _ => CommandConfig::default(),
    };
    Ok(config.with_env_overrides()?)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    init_tracing();
    let args = Args::parse();

    let config = Arc::new(load_config(args.config.as_ref())?);
    info!(
        "cmdgate starting. commands_dir={}, invoker={}, guild={:?}",
        args.commands_dir.display(),
        args.invoker,
        args.guild
    );

    let settings = Arc::new(InMemorySettings::new());
    let env = CommandEnvironment::new(
        config.clone(),
        settings.clone(),
        settings.clone(),
        Arc::new(StaticPermissions::from_config(&config)),
        Arc::new(ConsoleSink::new(config.auto_delete_seconds)),
        Arc::new(TracingInvocationLogger::new()),
        Arc::new(InMemoryBanList::new()),
    );

    let manager = CommandManager::new_self_reloading(
        Arc::new(DirectorySource::new(args.commands_dir.clone())),
        ActionRegistry::with_stock_actions(),
        env,
    );
    manager.set_settings_registry(settings.clone());
    manager.load().await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                error!("Failed reading input: {}", e);
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let context = match &args.guild {
            Some(guild) => InvocationContext::in_group(
                args.invoker.as_str(),
                &args.invoker_name,
                &args.channel,
                guild,
            ),
            None => InvocationContext::direct(args.invoker.as_str(), &args.invoker_name, &args.channel),
        }
        .with_elevated(args.elevated);

        let outcome = manager.dispatch(context, &line);
        if !outcome.matched() {
            warn!("No command matches '{}'", line);
        }
        outcome.finished().await;
    }

    info!("Input closed, shutting down");
    Ok(())
}
