use store_server::{api, init_logger, AppState, Config};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // Load .env file
    let _ = dotenvy::dotenv();

    init_logger();

    // Storage settings are required; a missing bucket aborts startup here
    let config = Config::from_env()?;

    tracing::info!("Starting store-server (env: {})", config.environment);

    let state = AppState::initialize(&config).await?;
    let app = api::create_router(state);

    let addr = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("store-server HTTP listening on {addr}");

    axum::serve(listener, app).await?;

    Ok(())
}
