use news_api::{
    init_db, make_router, run_app,
    seed::{seed, SeedData},
    Config,
};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("news_api=info,tower_http=info")),
        )
        .init();

    if let Err(error) = start().await {
        tracing::error!("Error: {:#}", error);
        std::process::exit(1);
    }
}

async fn start() -> news_api::Result<()> {
    let config = Config::from_env()?;
    let pool = init_db(&config.database_url).await?;
    if let Some(seed_file) = &config.seed_file {
        let data = SeedData::from_file(seed_file).await?;
        seed(&pool, &data).await?;
    }
    let listener = TcpListener::bind(config.address).await?;
    run_app(make_router(), pool, listener).await
}
