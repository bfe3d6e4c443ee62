use sqlx::{Sqlite, SqlitePool};

use crate::{errors::RequestError, models::User};

pub async fn get_users_in_db(pool: &SqlitePool) -> Result<Vec<User>, RequestError> {
    let mut tx = pool.begin().await?;
    let users = sqlx::query_as::<Sqlite, User>(
        r#"
        SELECT username, name, avatar_url FROM users
        "#,
    )
    .fetch_all(&mut *tx)
    .await?;
    tx.commit().await?;
    Ok(users)
}
