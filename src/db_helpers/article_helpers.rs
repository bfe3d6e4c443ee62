use sqlx::{Sqlite, SqlitePool};

use crate::data_formats::ArticleQueryParams;
use crate::errors::{RequestError, Resource};
use crate::models::{Article, ArticleSummary};

use super::query_builder::{Order, SortBy};
use super::QueryBuilder;

const ARTICLE_LIST_QUERY: &str = r#"
            SELECT articles.author                              AS "author",
                   articles.title                               AS "title",
                   articles.article_id                          AS "article_id",
                   articles.topic                               AS "topic",
                   articles.created_at                          AS "created_at",
                   articles.votes                               AS "votes",
                   articles.article_img_url                     AS "article_img_url",
                   CAST(COUNT(comments.comment_id) AS INTEGER)  AS "comment_count"
            FROM   articles
                LEFT JOIN comments
                        ON comments.article_id = articles.article_id
"#;

const SINGLE_ARTICLE_QUERY: &str = r#"
            SELECT articles.article_id                          AS "article_id",
                   articles.title                               AS "title",
                   articles.topic                               AS "topic",
                   articles.author                              AS "author",
                   articles.body                                AS "body",
                   articles.created_at                          AS "created_at",
                   articles.votes                               AS "votes",
                   articles.article_img_url                     AS "article_img_url",
                   CAST(COUNT(comments.comment_id) AS INTEGER)  AS "comment_count"
            FROM   articles
                LEFT JOIN comments
                        ON comments.article_id = articles.article_id
            WHERE  articles.article_id = $1
            GROUP  BY articles.article_id
"#;

/// A validated article listing request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleQuery {
    pub topic: Option<String>,
    pub sort_by: SortBy,
    pub order: Order,
}

impl TryFrom<ArticleQueryParams> for ArticleQuery {
    type Error = RequestError;

    fn try_from(
        ArticleQueryParams {
            topic,
            sort_by,
            order,
        }: ArticleQueryParams,
    ) -> Result<Self, Self::Error> {
        Ok(ArticleQuery {
            topic,
            sort_by: sort_by
                .as_deref()
                .map(str::parse::<SortBy>)
                .transpose()?
                .unwrap_or_default(),
            order: order
                .as_deref()
                .map(str::parse::<Order>)
                .transpose()?
                .unwrap_or_default(),
        })
    }
}

pub async fn list_articles_in_db(
    pool: &SqlitePool,
    ArticleQuery {
        topic,
        sort_by,
        order,
    }: ArticleQuery,
) -> Result<Vec<ArticleSummary>, RequestError> {
    let (query, params) = QueryBuilder::new(ARTICLE_LIST_QUERY)
        .add_filter("articles.topic", topic)
        .group_by("articles.article_id")
        .order_by(sort_by, order)
        .build();

    let mut query = sqlx::query_as::<Sqlite, ArticleSummary>(&query);
    for param in params {
        query = query.bind(param);
    }
    let articles = query.fetch_all(pool).await?;
    Ok(articles)
}

pub async fn get_article_by_id_in_db(
    pool: &SqlitePool,
    article_id: i64,
) -> Result<Article, RequestError> {
    let mut tx = pool.begin().await?;
    let article = sqlx::query_as::<Sqlite, Article>(SINGLE_ARTICLE_QUERY)
        .bind(article_id)
        .fetch_optional(&mut *tx)
        .await?;
    tx.commit().await?;

    article.ok_or(RequestError::NotFound(Resource::Article))
}

/// Adds `delta` to an article's votes in a single statement, so concurrent
/// increments never overwrite each other, then reads the article back.
pub async fn update_article_votes_in_db(
    pool: &SqlitePool,
    article_id: i64,
    delta: i64,
) -> Result<Article, RequestError> {
    let mut tx = pool.begin().await?;

    let updated = sqlx::query_scalar::<_, i64>(
        r#"
        UPDATE articles
        SET votes = votes + $1
        WHERE article_id = $2
        RETURNING article_id
        "#,
    )
    .bind(delta)
    .bind(article_id)
    .fetch_optional(&mut *tx)
    .await?;

    if updated.is_none() {
        return Err(RequestError::NotFound(Resource::Article));
    }

    let article = sqlx::query_as::<Sqlite, Article>(SINGLE_ARTICLE_QUERY)
        .bind(article_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(RequestError::NotFound(Resource::Article))?;

    tx.commit().await?;
    Ok(article)
}
