use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fitnest_core::config::{data_dir_from_env_value, history_limit_from_env_value};
use fitnest_core::{CoreConfig, FileVitalsRepository, VitalsRepository, VitalsService};

/// Main entry point for the FitNest application
///
/// Resolves configuration once, then serves the REST API (with Swagger UI at `/swagger-ui`).
///
/// # Environment Variables
/// - `FITNEST_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `FITNEST_DATA_DIR`: Directory for vital-sign storage (default: "fitnest_data")
/// - `FITNEST_HISTORY_LIMIT`: Default number of readings in a history query (default: 10)
///
/// # Errors
/// Returns an error if the configuration is invalid, the address cannot be bound, or the
/// server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("fitnest=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr = std::env::var("FITNEST_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

    let data_dir = data_dir_from_env_value(std::env::var("FITNEST_DATA_DIR").ok());
    let history_limit = history_limit_from_env_value(std::env::var("FITNEST_HISTORY_LIMIT").ok())?;
    let cfg = Arc::new(CoreConfig::new(data_dir, history_limit)?);

    tracing::info!("++ Storing vital signs under {}", cfg.vital_signs_dir().display());
    tracing::info!("++ Starting FitNest REST on {}", rest_addr);

    let repo: Arc<dyn VitalsRepository> = Arc::new(FileVitalsRepository::new(&cfg));
    let app = api_rest::router(VitalsService::new(cfg, repo));

    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
