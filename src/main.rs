use anyhow::Context;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use trip_planner::config::Config;
use trip_planner::dataset::RateTable;
use trip_planner::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "trip_planner=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let rates = match RateTable::from_path(&config.dataset_path) {
        Ok(rates) => rates,
        Err(e) => {
            error!("Could not load rate dataset: {}", e);
            return Err(e.into());
        }
    };

    let state = AppState::from_config(&config, rates).context("building weather client")?;

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("binding {}", config.bind_addr))?;
    info!("Trip planner listening on {}", config.bind_addr);

    axum::serve(listener, trip_planner::app(state)).await?;
    Ok(())
}
