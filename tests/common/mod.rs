#![allow(dead_code)]

use news_api::{
    init_db, make_router, run_app,
    seed::{seed, SeedData},
};
use sqlx::SqlitePool;
use tempfile::TempDir;
use tokio::net::TcpListener;

const TEST_DATA: &str = include_str!("../../data/test-data.json");

pub struct TestApp {
    pub address: String,
    pub pool: SqlitePool,
    pub client: reqwest::Client,
    _dir: TempDir,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }
}

/// A freshly migrated and seeded database in its own temporary directory.
pub async fn seeded_pool() -> (SqlitePool, TempDir) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let db_url = format!("sqlite://{}", dir.path().join("news.db").display());
    let pool = init_db(&db_url).await.expect("Failed to init db");
    let data: SeedData = serde_json::from_str(TEST_DATA).expect("Failed to parse test data");
    seed(&pool, &data).await.expect("Failed to seed db");
    (pool, dir)
}

pub async fn spawn_app() -> TestApp {
    let (pool, dir) = seeded_pool().await;
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let address = format!("http://{}", listener.local_addr().unwrap());
    tokio::spawn(run_app(make_router(), pool.clone(), listener));
    TestApp {
        address,
        pool,
        client: reqwest::Client::new(),
        _dir: dir,
    }
}
