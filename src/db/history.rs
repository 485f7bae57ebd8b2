use sqlx::{FromRow, Row, SqliteExecutor, sqlite::SqliteRow};

use crate::logic::{error::Result, registration::{Actor, history::RegistrationHistoryEntry}, types::RegistrationId};

impl FromRow<'_, SqliteRow> for RegistrationHistoryEntry {
    fn from_row(row: &SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: row.try_get("id")?,
            registration_id: row.try_get("registration_id")?,
            player_id: row.try_get("player_id")?,
            match_id: row.try_get("match_id")?,
            team: row.try_get("team")?,
            status: row.try_get("status")?,
            excuse_reason: row.try_get("excuse_reason")?,
            excuse_note: row.try_get("excuse_note")?,
            admin_note: row.try_get("admin_note")?,
            actor: Actor::from_parts(row.try_get("actor_kind")?, row.try_get("actor_id")?),
            changed_at: row.try_get("changed_at")?,
        })
    }
}

impl RegistrationHistoryEntry {
    // Append to the history. There is no update or delete counterpart.
    pub async fn append<'e, E: SqliteExecutor<'e>>(&mut self, executor: E) -> Result<()> {
        self.id = sqlx::query_scalar(
            "INSERT INTO RegistrationHistory
            (registration_id, player_id, match_id, team, status, excuse_reason, excuse_note,
            admin_note, actor_kind, actor_id, changed_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING id"
        ).bind(self.registration_id)
        .bind(self.player_id)
        .bind(self.match_id)
        .bind(self.team)
        .bind(self.status)
        .bind(self.excuse_reason)
        .bind(self.excuse_note.as_deref())
        .bind(self.admin_note.as_deref())
        .bind(self.actor.kind())
        .bind(self.actor.id())
        .bind(self.changed_at)
        .fetch_one(executor).await?;
        Ok(())
    }

    // Get the history of a registration in the order it was written.
    pub async fn fetch_for_registration<'e, E: SqliteExecutor<'e>>(executor: E, registration_id: RegistrationId) -> Result<Vec<Self>> {
        Ok(sqlx::query_as(
            "SELECT * FROM RegistrationHistory
            WHERE registration_id = $1
            ORDER BY id ASC"
        ).bind(registration_id)
        .fetch_all(executor).await?)
    }
}
