use login_server::auth::HttpExchanger;
use login_server::models::{AppConfig, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env()?;

    // A hung exchange would otherwise leave the flow stuck on "verifying".
    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(10))
        .build()?;
    let exchanger = HttpExchanger::new(client, config.exchange_url.clone());

    let app = login_server::app(AppState { config, exchanger });

    tracing::info!("listening on http://{}", "0.0.0.0:10000");

    let listener = tokio::net::TcpListener::bind("0.0.0.0:10000").await?;
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
