use sqlx::{Sqlite, SqlitePool};

use crate::{errors::RequestError, models::Topic};

pub async fn get_topics_in_db(pool: &SqlitePool) -> Result<Vec<Topic>, RequestError> {
    let mut tx = pool.begin().await?;
    let result = sqlx::query_as::<Sqlite, Topic>(
        r#"
        SELECT slug, description FROM topics
        "#,
    )
    .fetch_all(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(result)
}
