use polystats::api::router::create_router;
use polystats::config::AppConfig;
use polystats::polymarket::DataClient;
use polystats::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env()?;
    init_tracing(config.log_json);

    let addr = format!("{}:{}", config.host, config.port);
    let metrics_handle = polystats::metrics::init_metrics()?;

    let data_client = DataClient::from_config(&config)?;
    tracing::info!(
        data_api = %config.data_api_url,
        auth = config.api_token.is_some(),
        "Data API client ready"
    );

    let state = AppState::new(config, data_client, metrics_handle);
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {addr}");
    axum::serve(listener, router).await?;

    Ok(())
}

fn init_tracing(json: bool) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let registry = tracing_subscriber::registry().with(EnvFilter::from_default_env());
    if json {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }
}
