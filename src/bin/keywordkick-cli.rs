use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde_json::json;
use uuid::Uuid;

use keyword_kick::config::loader::{read_config, write_default_config};
use keyword_kick::config::settings::{load_settings, SettingsError};
use keyword_kick::config::validation::validate_settings;
use keyword_kick::host::memory::InMemoryHost;
use keyword_kick::kick::BYPASS_PERMISSION;
use keyword_kick::observability::logging::init_logging;
use keyword_kick::{ConfigStore, KickEvent, KickInterceptor, PlayerRef, PluginSettings};

#[derive(Parser)]
#[command(name = "keywordkick-cli")]
#[command(about = "Inspect and test keyword-kick configuration", long_about = None)]
struct Cli {
    /// Runtime settings file (TOML).
    #[arg(short, long)]
    settings: Option<PathBuf>,

    /// Data directory holding config.yml; overrides the settings file.
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the default config.yml if it does not exist
    Init,
    /// Print the parsed configuration
    Show,
    /// Evaluate a kick reason against the configuration
    Check {
        /// Kick reason sent by the backend
        #[arg(short, long)]
        reason: Option<String>,

        /// Treat the player as holding the bypass permission
        #[arg(long)]
        bypass: bool,

        /// Backend registered with the simulated proxy (repeatable)
        #[arg(long = "server")]
        servers: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut settings = match &cli.settings {
        Some(path) => load_settings(path)?,
        None => PluginSettings::default(),
    };
    if let Some(dir) = cli.data_dir {
        settings.data_dir = dir;
    }
    validate_settings(&settings).map_err(SettingsError::Validation)?;

    if let Err(e) = init_logging(&settings.logging) {
        eprintln!("Logging already initialized: {}", e);
    }

    let config_path = settings.config_path();

    match cli.command {
        Commands::Init => {
            if config_path.exists() {
                println!("{} already exists", config_path.display());
            } else {
                write_default_config(&config_path)?;
                println!("Wrote {}", config_path.display());
            }
        }
        Commands::Show => {
            if !config_path.exists() {
                return Err(format!("{} does not exist, run `init` first", config_path.display()).into());
            }
            let config = read_config(&config_path)?;
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        Commands::Check {
            reason,
            bypass,
            servers,
        } => {
            if !config_path.exists() {
                return Err(format!("{} does not exist, run `init` first", config_path.display()).into());
            }
            let config = read_config(&config_path)?;
            let store = Arc::new(ConfigStore::with_config(config_path, config));
            let host = Arc::new(InMemoryHost::new());
            for server in servers {
                host.add_server(server);
            }

            let player = PlayerRef::new(Uuid::new_v4(), "cli-player");
            if bypass {
                host.grant(&player, BYPASS_PERMISSION);
            }

            let interceptor = KickInterceptor::new(store, host.clone(), settings.redirect_timeout());
            let action = interceptor.on_kicked(KickEvent::new(player, reason)).await;

            let report = json!({
                "action": action,
                "host_actions": host.actions(),
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}
