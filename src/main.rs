//! Catalog API server
//!
//! ```text
//! catalog_api --env dev --service restaurant --storage postgres --port 8001
//! ```
//!
//! Reads `config/{env}.yaml`; flags override the file.

use anyhow::Context;
use clap::Parser;

use catalog_api::config::{AppConfig, ServiceKind, StorageBackend};
use catalog_api::gateway;
use catalog_api::logging::init_logging;

#[derive(Debug, Parser)]
#[command(name = "catalog_api", version, about = "Tea house catalog / restaurant directory API")]
struct Args {
    /// Config environment (loads config/{env}.yaml)
    #[arg(short, long, default_value = "dev", env = "CATALOG_ENV")]
    env: String,

    /// Collection to serve
    #[arg(long, value_enum)]
    service: Option<ServiceKind>,

    /// Listen port
    #[arg(short, long)]
    port: Option<u16>,

    /// Storage backend
    #[arg(long, value_enum)]
    storage: Option<StorageBackend>,

    /// PostgreSQL URL
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,
}

impl Args {
    fn apply(self, config: &mut AppConfig) {
        if let Some(service) = self.service {
            config.service = service;
        }
        if let Some(port) = self.port {
            config.gateway.port = port;
        }
        if let Some(storage) = self.storage {
            config.storage.backend = storage;
        }
        if let Some(url) = self.database_url {
            config.storage.postgres_url = Some(url);
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = AppConfig::load(&args.env)?;
    let env = args.env.clone();
    args.apply(&mut config);

    let _log_guard = init_logging(&config);
    tracing::info!(
        "Starting {} service in {} mode (version {})",
        config.service.name(),
        env,
        gateway::handlers::VERSION
    );

    let app = gateway::app_from_config(&config)
        .await
        .context("Failed to build application")?;

    gateway::run_server(&config.gateway.host, config.gateway.port, app).await
}
