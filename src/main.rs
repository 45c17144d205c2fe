// src/main.rs

use tracing_subscriber::EnvFilter;

use wfm_dashboard::config::Config;
use wfm_dashboard::navigation::RequestsTab;
use wfm_dashboard::AppState;

fn main() -> anyhow::Result<()> {
    // Load environment from .env if present
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;
    let state = AppState::from_config(&config)?;

    let counts = state.store.request_counts();
    tracing::info!(
        user = %state.store.user().name,
        days = state.store.schedule().len(),
        kpis = state.store.kpis().len(),
        pending = counts.pending,
        approved = counts.approved,
        rejected = counts.rejected,
        "dashboard ready"
    );

    for tab in RequestsTab::ALL {
        tracing::debug!(
            ?tab,
            requests = state.store.list_requests_for_tab(tab).len(),
            "requests tab"
        );
    }

    // Hand-off point for the presentation layer.
    println!("{}", serde_json::to_string_pretty(state.navigation.state())?);
    Ok(())
}
