use sqlx::SqlitePool;

use crate::errors::RequestError;

mod article_helpers;
mod comment_helpers;
mod query_builder;
mod topic_helpers;
mod user_helpers;

pub use article_helpers::*;
pub use comment_helpers::*;
pub use query_builder::{Order, SortBy};
pub use topic_helpers::*;
pub use user_helpers::*;

use query_builder::QueryBuilder;

const ARTICLE_EXISTS_QUERY: &str = "SELECT EXISTS(SELECT 1 FROM articles WHERE article_id = $1)";
const USER_EXISTS_QUERY: &str = "SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)";

/// Path ids are checked here so a malformed one never reaches the database.
pub fn parse_id(raw: &str) -> Result<i64, RequestError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| RequestError::bad_request())
}

// ----------------- Helper Functions -----------------

pub async fn article_exists_in_db(
    pool: &SqlitePool,
    article_id: i64,
) -> Result<bool, RequestError> {
    let exists = sqlx::query_scalar::<_, bool>(ARTICLE_EXISTS_QUERY)
        .bind(article_id)
        .fetch_one(pool)
        .await?;
    Ok(exists)
}

pub async fn user_exists_in_db(pool: &SqlitePool, username: &str) -> Result<bool, RequestError> {
    let exists = sqlx::query_scalar::<_, bool>(USER_EXISTS_QUERY)
        .bind(username)
        .fetch_one(pool)
        .await?;
    Ok(exists)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_numeric_ids() {
        assert_eq!(parse_id("1").unwrap(), 1);
        assert_eq!(parse_id("42").unwrap(), 42);
    }

    #[test]
    fn rejects_malformed_ids_as_bad_request() {
        for raw in ["not-an-article", "1.5", "", "1; DROP TABLE comments"] {
            match parse_id(raw) {
                Err(RequestError::BadRequest(message)) => assert_eq!(message, "Bad Request"),
                other => panic!("expected bad request for {raw:?}, got {other:?}"),
            }
        }
    }
}
