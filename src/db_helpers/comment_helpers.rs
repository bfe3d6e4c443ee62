use sqlx::{Sqlite, SqlitePool};

use crate::{
    data_formats::request::CommentRequest,
    errors::{classify_store_error, RequestError, Resource, StoreFault},
    models::Comment,
};

use super::{article_exists_in_db, user_exists_in_db};

/// Fetches an article's comments, newest first. An empty result is only an
/// error when the article itself is missing, and that lookup is skipped
/// whenever comments come back.
pub async fn get_comments_for_article_in_db(
    pool: &SqlitePool,
    article_id: i64,
) -> Result<Vec<Comment>, RequestError> {
    let mut tx = pool.begin().await?;
    let comments = sqlx::query_as::<Sqlite, Comment>(
        r#"
        SELECT comment_id, body, article_id, author, votes, created_at
        FROM comments
        WHERE article_id = $1
        ORDER BY created_at DESC, comment_id DESC
        "#,
    )
    .bind(article_id)
    .fetch_all(&mut *tx)
    .await?;
    tx.commit().await?;

    if comments.is_empty() && !article_exists_in_db(pool, article_id).await? {
        return Err(RequestError::NotFound(Resource::Article));
    }
    Ok(comments)
}

pub async fn add_comment_to_article_in_db(
    pool: &SqlitePool,
    article_id: i64,
    CommentRequest { username, body }: CommentRequest,
) -> Result<Comment, RequestError> {
    if [&username, &body]
        .into_iter()
        .flatten()
        .any(|value| value.trim().is_empty())
    {
        return Err(RequestError::bad_request());
    }

    let mut tx = pool.begin().await?;
    let inserted = sqlx::query_as::<Sqlite, Comment>(
        r#"
        INSERT INTO comments (body, article_id, author)
        VALUES ($1, $2, $3)
        RETURNING comment_id, body, article_id, author, votes, created_at
        "#,
    )
    .bind(&body)
    .bind(article_id)
    .bind(&username)
    .fetch_one(&mut *tx)
    .await;

    let comment = match inserted {
        Ok(comment) => comment,
        Err(e) if classify_store_error(&e) == StoreFault::DanglingReference => {
            tx.rollback().await?;
            return Err(dangling_reference(pool, article_id, username.as_deref(), e).await);
        }
        Err(e) => return Err(e.into()),
    };
    tx.commit().await?;

    Ok(comment)
}

/// SQLite only reports that *some* foreign key failed, so look up which of
/// the referenced rows is missing to name the key and the offending value.
async fn dangling_reference(
    pool: &SqlitePool,
    article_id: i64,
    username: Option<&str>,
    error: sqlx::Error,
) -> RequestError {
    match article_exists_in_db(pool, article_id).await {
        Ok(false) => {
            return RequestError::ReferentialIntegrity {
                key: "article_id",
                value: article_id.to_string(),
                table: "articles",
            }
        }
        Ok(true) => {}
        Err(e) => return e,
    }
    if let Some(username) = username {
        match user_exists_in_db(pool, username).await {
            Ok(false) => {
                return RequestError::ReferentialIntegrity {
                    key: "author",
                    value: username.to_owned(),
                    table: "users",
                }
            }
            Ok(true) => {}
            Err(e) => return e,
        }
    }
    RequestError::DatabaseError(error)
}

pub async fn delete_comment_in_db(pool: &SqlitePool, comment_id: i64) -> Result<(), RequestError> {
    let mut tx = pool.begin().await?;
    let result = sqlx::query(
        r#"
        DELETE FROM comments WHERE comment_id = $1
        "#,
    )
    .bind(comment_id)
    .execute(&mut *tx)
    .await?;

    if result.rows_affected() == 0 {
        return Err(RequestError::NotFound(Resource::Comment));
    }

    tx.commit().await?;
    Ok(())
}
