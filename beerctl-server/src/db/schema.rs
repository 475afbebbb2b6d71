//! Table bootstrap for the beer catalog

use sqlx::SqlitePool;

/// Create the `beer` table if it does not exist yet.
///
/// `id` is the rowid alias, so inserting NULL lets SQLite assign it.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS beer (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            type INTEGER NOT NULL,
            style INTEGER NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    tracing::debug!("beer schema ready");
    Ok(())
}
