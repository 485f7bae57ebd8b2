use sqlx::{FromRow, Row, SqliteExecutor, sqlite::SqliteRow};

use crate::logic::{error::Result, player::Player, types::PlayerId};

impl FromRow<'_, SqliteRow> for Player {
    fn from_row(row: &SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: row.try_get("id")?,
            full_name: row.try_get("full_name")?,
            position: row.try_get("position")?,
        })
    }
}

impl Player {
    // Get a player from the database.
    pub async fn fetch_from_db<'e, E: SqliteExecutor<'e>>(executor: E, id: PlayerId) -> Result<Option<Self>> {
        Ok(sqlx::query_as(
            "SELECT * FROM Player
            WHERE id = $1"
        ).bind(id)
        .fetch_optional(executor).await?)
    }

    // Save to database.
    pub async fn save<'e, E: SqliteExecutor<'e>>(&mut self, executor: E) -> Result<()> {
        self.id = sqlx::query_scalar(
            "INSERT INTO Player (full_name, position)
            VALUES ($1, $2)
            RETURNING id"
        ).bind(self.full_name.as_str())
        .bind(self.position)
        .fetch_one(executor).await?;
        Ok(())
    }
}
