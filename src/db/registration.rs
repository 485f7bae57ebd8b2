use sqlx::{FromRow, Row, SqliteExecutor, sqlite::SqliteRow};

use crate::logic::{error::Result, registration::{Actor, Registration, RegistrationStatus}, types::{MatchId, PlayerId, RegistrationId}};

impl FromRow<'_, SqliteRow> for Registration {
    fn from_row(row: &SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: row.try_get("id")?,
            player_id: row.try_get("player_id")?,
            match_id: row.try_get("match_id")?,
            team: row.try_get("team")?,
            status: row.try_get("status")?,
            slot: row.try_get("slot")?,
            excuse_reason: row.try_get("excuse_reason")?,
            excuse_note: row.try_get("excuse_note")?,
            admin_note: row.try_get("admin_note")?,
            reminder_sent: row.try_get("reminder_sent")?,
            queued_at: row.try_get("queued_at")?,
            created_at: row.try_get("created_at")?,
            modified_at: row.try_get("modified_at")?,
            actor: Actor::from_parts(row.try_get("actor_kind")?, row.try_get("actor_id")?),
        })
    }
}

impl Registration {
    // Queue order. Timestamps are compared as instants, the id settles ties.
    const QUEUE_ORDER: &'static str = "ORDER BY julianday(queued_at) ASC, id ASC";

    pub async fn fetch_by_id<'e, E: SqliteExecutor<'e>>(executor: E, id: RegistrationId) -> Result<Option<Self>> {
        Ok(sqlx::query_as(
            "SELECT * FROM Registration
            WHERE id = $1"
        ).bind(id)
        .fetch_optional(executor).await?)
    }

    // Get the registration of a player for a match.
    pub async fn fetch_for_player<'e, E: SqliteExecutor<'e>>(executor: E, match_id: MatchId, player_id: PlayerId) -> Result<Option<Self>> {
        Ok(sqlx::query_as(
            "SELECT * FROM Registration
            WHERE match_id = $1 AND player_id = $2"
        ).bind(match_id)
        .bind(player_id)
        .fetch_optional(executor).await?)
    }

    // Get the registrations of a match with a given status, in queue order.
    pub async fn fetch_by_status<'e, E: SqliteExecutor<'e>>(executor: E, match_id: MatchId, status: RegistrationStatus) -> Result<Vec<Self>> {
        let order = Self::QUEUE_ORDER;
        Ok(sqlx::query_as(format!("
            SELECT * FROM Registration
            WHERE match_id = $1 AND status = $2
            {order}"
        ).as_str())
        .bind(match_id)
        .bind(status)
        .fetch_all(executor).await?)
    }

    // Get every registration of a match, in queue order.
    pub async fn fetch_for_match<'e, E: SqliteExecutor<'e>>(executor: E, match_id: MatchId) -> Result<Vec<Self>> {
        let order = Self::QUEUE_ORDER;
        Ok(sqlx::query_as(format!("
            SELECT * FROM Registration
            WHERE match_id = $1
            {order}"
        ).as_str())
        .bind(match_id)
        .fetch_all(executor).await?)
    }

    // Insert a new registration, or update the existing row.
    pub async fn save<'e, E: SqliteExecutor<'e>>(&mut self, executor: E) -> Result<()> {
        if self.is_saved() {
            sqlx::query(
                "UPDATE Registration SET
                team = $1, status = $2, slot = $3, excuse_reason = $4, excuse_note = $5,
                admin_note = $6, reminder_sent = $7, queued_at = $8, modified_at = $9,
                actor_kind = $10, actor_id = $11
                WHERE id = $12"
            ).bind(self.team)
            .bind(self.status)
            .bind(self.slot)
            .bind(self.excuse_reason)
            .bind(self.excuse_note.as_deref())
            .bind(self.admin_note.as_deref())
            .bind(self.reminder_sent)
            .bind(self.queued_at)
            .bind(self.modified_at)
            .bind(self.actor.kind())
            .bind(self.actor.id())
            .bind(self.id)
            .execute(executor).await?;
            return Ok(());
        }

        self.id = sqlx::query_scalar(
            "INSERT INTO Registration
            (player_id, match_id, team, status, slot, excuse_reason, excuse_note, admin_note,
            reminder_sent, queued_at, created_at, modified_at, actor_kind, actor_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING id"
        ).bind(self.player_id)
        .bind(self.match_id)
        .bind(self.team)
        .bind(self.status)
        .bind(self.slot)
        .bind(self.excuse_reason)
        .bind(self.excuse_note.as_deref())
        .bind(self.admin_note.as_deref())
        .bind(self.reminder_sent)
        .bind(self.queued_at)
        .bind(self.created_at)
        .bind(self.modified_at)
        .bind(self.actor.kind())
        .bind(self.actor.id())
        .fetch_one(executor).await?;
        Ok(())
    }

    // Remove the registration row. History rows are left alone.
    pub async fn delete<'e, E: SqliteExecutor<'e>>(&self, executor: E) -> Result<()> {
        sqlx::query(
            "DELETE FROM Registration
            WHERE id = $1"
        ).bind(self.id)
        .execute(executor).await?;
        Ok(())
    }
}
