use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::SqlitePool;

use crate::models::{timestamp, Topic, User};

#[derive(Debug, Deserialize)]
pub struct SeedData {
    pub topics: Vec<Topic>,
    pub users: Vec<User>,
    pub articles: Vec<SeedArticle>,
    pub comments: Vec<SeedComment>,
}

/// Articles get ids in the order they are listed, starting at 1.
#[derive(Debug, Deserialize)]
pub struct SeedArticle {
    pub title: String,
    pub topic: String,
    pub author: String,
    pub body: String,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub votes: i64,
    #[serde(default)]
    pub article_img_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SeedComment {
    pub body: String,
    pub article_id: i64,
    pub author: String,
    #[serde(default)]
    pub votes: i64,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
}

impl SeedData {
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read seed file {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse seed file {}", path.display()))
    }
}

/// Replaces everything in the database with `data`.
pub async fn seed(pool: &SqlitePool, data: &SeedData) -> Result<()> {
    let mut tx = pool.begin().await?;

    // Children first so no foreign key is left dangling mid-transaction.
    for table in ["comments", "articles", "users", "topics"] {
        sqlx::query(&format!("DELETE FROM {table}"))
            .execute(&mut *tx)
            .await?;
    }

    for Topic { slug, description } in &data.topics {
        sqlx::query("INSERT INTO topics (slug, description) VALUES ($1, $2)")
            .bind(slug)
            .bind(description)
            .execute(&mut *tx)
            .await
            .with_context(|| format!("Failed to seed topic {slug}"))?;
    }

    for User {
        username,
        name,
        avatar_url,
    } in &data.users
    {
        sqlx::query("INSERT INTO users (username, name, avatar_url) VALUES ($1, $2, $3)")
            .bind(username)
            .bind(name)
            .bind(avatar_url)
            .execute(&mut *tx)
            .await
            .with_context(|| format!("Failed to seed user {username}"))?;
    }

    for (index, article) in data.articles.iter().enumerate() {
        sqlx::query(
            r#"
            INSERT INTO articles (article_id, title, topic, author, body, created_at, votes, article_img_url)
            VALUES ($1, $2, $3, $4, $5, $6, $7, COALESCE($8, 'https://images.pexels.com/photos/97050/pexels-photo-97050.jpeg?w=700&h=700'))
            "#,
        )
        .bind(index as i64 + 1)
        .bind(&article.title)
        .bind(&article.topic)
        .bind(&article.author)
        .bind(&article.body)
        .bind(timestamp::format(&article.created_at))
        .bind(article.votes)
        .bind(&article.article_img_url)
        .execute(&mut *tx)
        .await
        .with_context(|| format!("Failed to seed article {:?}", article.title))?;
    }

    for comment in &data.comments {
        sqlx::query(
            r#"
            INSERT INTO comments (body, article_id, author, votes, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(&comment.body)
        .bind(comment.article_id)
        .bind(&comment.author)
        .bind(comment.votes)
        .bind(timestamp::format(&comment.created_at))
        .execute(&mut *tx)
        .await
        .with_context(|| format!("Failed to seed comment on article {}", comment.article_id))?;
    }

    tx.commit().await?;
    tracing::info!(
        topics = data.topics.len(),
        users = data.users.len(),
        articles = data.articles.len(),
        comments = data.comments.len(),
        "Seeded database"
    );
    Ok(())
}
