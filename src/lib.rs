pub mod config;
mod data_formats;
pub mod db_helpers;
pub mod errors;
mod handlers;
pub mod models;
pub mod seed;

use std::str::FromStr;

use anyhow::Context;
pub use anyhow::Result;
use axum::http::StatusCode;
use axum::{routing::*, Extension, Json, Router};
pub use config::Config;
pub use data_formats::*;
use handlers::*;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
pub type JsonResponse<T> = (StatusCode, Json<T>);

pub async fn run_app(app: Router, pool: SqlitePool, listener: TcpListener) -> Result<()> {
    let app = app.layer(Extension(pool));
    tracing::info!("Server started on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}

/// Opens (creating if needed) the SQLite database and brings its schema up to date.
pub async fn init_db(db_url: &str) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(db_url)
        .with_context(|| format!("Invalid DATABASE_URL {db_url}"))?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .connect_with(options)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Running Migrations");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Migrations completed");
    Ok(pool)
}

pub fn make_router() -> Router {
    Router::new()
        .route("/check_health", get(alive))
        .route("/api", get(get_endpoints))
        .route("/api/topics", get(get_topics))
        .route("/api/articles", get(list_articles))
        .route(
            "/api/articles/:article_id",
            get(get_article).patch(update_article),
        )
        .route(
            "/api/articles/:article_id/comments",
            get(get_comments).post(add_comment),
        )
        .route("/api/comments/:comment_id", delete(delete_comment))
        .route("/api/users", get(get_users))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
