use sqlx::{FromRow, Row, SqliteExecutor, sqlite::SqliteRow};

use crate::logic::{error::Result, game::Match, types::MatchId};

impl FromRow<'_, SqliteRow> for Match {
    fn from_row(row: &SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: row.try_get("id")?,
            starts_at: row.try_get("starts_at")?,
            location: row.try_get("location")?,
            mode: row.try_get("mode")?,
            max_players: row.try_get("max_players")?,
        })
    }
}

impl Match {
    pub async fn fetch_from_db<'e, E: SqliteExecutor<'e>>(executor: E, id: MatchId) -> Result<Option<Self>> {
        Ok(sqlx::query_as(
            "SELECT * FROM HockeyMatch
            WHERE id = $1"
        ).bind(id)
        .fetch_optional(executor).await?)
    }

    // Save a new match to the database.
    pub async fn save<'e, E: SqliteExecutor<'e>>(&mut self, executor: E) -> Result<()> {
        self.id = sqlx::query_scalar(
            "INSERT INTO HockeyMatch (starts_at, location, mode, max_players)
            VALUES ($1, $2, $3, $4)
            RETURNING id"
        ).bind(self.starts_at)
        .bind(self.location.as_str())
        .bind(self.mode)
        .bind(self.max_players)
        .fetch_one(executor).await?;
        Ok(())
    }
}
