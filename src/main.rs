use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use translator_critic::routes;
use translator_critic::settings::Settings;
use translator_critic::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("translator_critic=debug,tower_http=debug")),
        )
        .init();

    let settings = Settings::load()?;
    info!(
        "Loaded settings: endpoint={}, translation_model={}, judge_model={}",
        settings.llm.endpoint, settings.llm.translation_model, settings.llm.judge_model
    );

    let host = settings.server.host.clone();
    let port = settings.server.port;

    let app_state = AppState::new(settings)?;
    let app = routes::app(app_state);

    let listener = tokio::net::TcpListener::bind((host.as_str(), port)).await?;
    info!("Starting server on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
