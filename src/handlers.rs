use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query,
    },
    http::{StatusCode, Uri},
    Extension, Json,
};
use serde_json::Value;
use sqlx::SqlitePool;

use crate::{
    data_formats::{
        ArticleQueryParams, ArticleWrapper, CommentRequest, CommentWrapper,
        MultipleArticlesWrapper, MultipleCommentsWrapper, TopicsWrapper, UpdateArticleRequest,
        UsersWrapper,
    },
    db_helpers::{
        add_comment_to_article_in_db, delete_comment_in_db, get_article_by_id_in_db,
        get_comments_for_article_in_db, get_topics_in_db, get_users_in_db, list_articles_in_db,
        parse_id, update_article_votes_in_db, ArticleQuery,
    },
    errors::{RequestError, RequestErrorJson},
};

type JsonResult<T> = Result<Json<T>, RequestError>;

const ENDPOINTS: &str = include_str!("../endpoints.json");

// ----------------- Helper Handlers -----------------
pub async fn alive() -> &'static str {
    "alive"
}

pub async fn not_found(uri: Uri) -> (StatusCode, Json<RequestErrorJson>) {
    (
        StatusCode::NOT_FOUND,
        Json(RequestErrorJson::new(format!(
            "URL {} provided was not found",
            uri
        ))),
    )
}

pub async fn get_endpoints() -> JsonResult<Value> {
    let endpoints = serde_json::from_str(ENDPOINTS).map_err(anyhow::Error::from)?;
    Ok(Json(endpoints))
}

// ----------------- Topic Handlers -----------------
pub async fn get_topics(Extension(pool): Extension<SqlitePool>) -> JsonResult<TopicsWrapper> {
    let topics = get_topics_in_db(&pool).await?;
    Ok(Json(TopicsWrapper { topics }))
}

// ----------------- Article Handlers -----------------
pub async fn list_articles(
    Extension(pool): Extension<SqlitePool>,
    params: Result<Query<ArticleQueryParams>, QueryRejection>,
) -> JsonResult<MultipleArticlesWrapper> {
    let Query(params) = params?;
    let query = ArticleQuery::try_from(params)?;
    let articles = list_articles_in_db(&pool, query).await?;
    Ok(Json(MultipleArticlesWrapper { articles }))
}

pub async fn get_article(
    Extension(pool): Extension<SqlitePool>,
    Path(article_id): Path<String>,
) -> JsonResult<ArticleWrapper> {
    let article_id = parse_id(&article_id)?;
    let article = get_article_by_id_in_db(&pool, article_id).await?;
    Ok(Json(ArticleWrapper { article }))
}

pub async fn update_article(
    Extension(pool): Extension<SqlitePool>,
    Path(article_id): Path<String>,
    request: Result<Json<UpdateArticleRequest>, JsonRejection>,
) -> JsonResult<ArticleWrapper> {
    let article_id = parse_id(&article_id)?;
    let Json(request) = request?;
    let delta = request.vote_delta()?;
    let article = update_article_votes_in_db(&pool, article_id, delta).await?;
    Ok(Json(ArticleWrapper { article }))
}

// ----------------- Comment Handlers -----------------
pub async fn get_comments(
    Extension(pool): Extension<SqlitePool>,
    Path(article_id): Path<String>,
) -> JsonResult<MultipleCommentsWrapper> {
    let article_id = parse_id(&article_id)?;
    let comments = get_comments_for_article_in_db(&pool, article_id).await?;
    Ok(Json(MultipleCommentsWrapper { comments }))
}

pub async fn add_comment(
    Extension(pool): Extension<SqlitePool>,
    Path(article_id): Path<String>,
    request: Result<Json<CommentRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CommentWrapper>), RequestError> {
    let article_id = parse_id(&article_id)?;
    let Json(request) = request?;
    let comment = add_comment_to_article_in_db(&pool, article_id, request).await?;
    Ok((StatusCode::CREATED, Json(CommentWrapper { comment })))
}

pub async fn delete_comment(
    Extension(pool): Extension<SqlitePool>,
    Path(comment_id): Path<String>,
) -> Result<StatusCode, RequestError> {
    let comment_id = parse_id(&comment_id)?;
    delete_comment_in_db(&pool, comment_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ----------------- User Handlers -----------------
pub async fn get_users(Extension(pool): Extension<SqlitePool>) -> JsonResult<UsersWrapper> {
    let users = get_users_in_db(&pool).await?;
    Ok(Json(UsersWrapper { users }))
}
