mod products;
mod variants;

use std::sync::Arc;

use backoffice_client::{AdminClient, SessionToken};
use backoffice_core::{AppConfig, ConfigError};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use products::ProductCommands;
use variants::VariantCommands;

#[derive(Debug, Parser)]
#[command(name = "backoffice")]
#[command(about = "Wholesale back-office admin console")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Product list and product maintenance
    Products {
        #[command(subcommand)]
        command: ProductCommands,
    },
    /// Variant stock list and stock edits
    Variants {
        #[command(subcommand)]
        command: VariantCommands,
    },
    /// Exchange credentials for an access token
    Login {
        #[arg(long, env = "BACKOFFICE_USER_ID")]
        user_id: String,
        #[arg(long, env = "BACKOFFICE_PASSWORD", hide_env_values = true)]
        password: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // The fixture-backed product list runs without API settings, so a
    // config error is only fatal for commands that call the API.
    let config = backoffice_core::load_app_config();
    let log_level = config.as_ref().map_or("info", |c| c.log_level.as_str());
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(log_level))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Products { command }) => products::run(command, config).await,
        Some(Commands::Variants { command }) => {
            let client = api_client(config).await?;
            variants::run(command, &client).await
        }
        Some(Commands::Login { user_id, password }) => {
            let config = config.map_err(|e| anyhow::anyhow!("configuration error: {e}"))?;
            let session = Arc::new(SessionToken::new());
            let client = AdminClient::new(
                &config.api_base_url,
                config.request_timeout_secs,
                &config.user_agent,
                session.clone(),
            )?;
            let login = client.sign_in(&session, &user_id, &password).await?;
            println!("{}", login.access_token);
            Ok(())
        }
        None => {
            println!("backoffice: run with --help to list commands");
            Ok(())
        }
    }
}

/// Builds the API client, failing if configuration could not be loaded.
/// Signs in first when only login credentials are configured.
pub(crate) async fn api_client(
    config: Result<AppConfig, ConfigError>,
) -> anyhow::Result<AdminClient> {
    let config = config.map_err(|e| anyhow::anyhow!("configuration error: {e}"))?;
    tracing::debug!(env = %config.env, base_url = %config.api_base_url, "using API");
    AdminClient::connect(&config)
        .await
        .map_err(|e| anyhow::anyhow!("failed to connect to API: {e}"))
}

#[cfg(test)]
mod tests;
