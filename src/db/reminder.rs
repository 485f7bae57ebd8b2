use futures::TryStreamExt as _;
use sqlx::FromRow;
use time::OffsetDateTime;

use crate::logic::{error::Result, registration::RegistrationStatus, reminder::DueReminder, types::{Db, RegistrationId}};

impl DueReminder {
    // Get the registered players that have not been reminded yet, for matches starting after `from` and no later than `until`.
    pub async fn fetch_pending(db: &Db, from: OffsetDateTime, until: OffsetDateTime) -> Result<Vec<Self>> {
        let mut rows = sqlx::query(
            "SELECT Registration.id AS registration_id, Registration.player_id, Registration.match_id, HockeyMatch.starts_at
            FROM Registration
            INNER JOIN HockeyMatch ON HockeyMatch.id = Registration.match_id
            WHERE Registration.status = $1 AND Registration.reminder_sent = FALSE
            AND julianday(HockeyMatch.starts_at) > julianday($2)
            AND julianday(HockeyMatch.starts_at) <= julianday($3)
            ORDER BY julianday(HockeyMatch.starts_at) ASC, Registration.id ASC"
        ).bind(RegistrationStatus::Registered)
        .bind(from)
        .bind(until)
        .fetch(db);

        let mut pending = Vec::new();
        while let Some(row) = rows.try_next().await? {
            pending.push(Self::from_row(&row)?);
        }
        return Ok(pending);
    }

    // Set the reminder flag unless somebody already did. True if this call set it.
    pub async fn mark_sent(db: &Db, registration_id: RegistrationId) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE Registration SET reminder_sent = TRUE
            WHERE id = $1 AND reminder_sent = FALSE"
        ).bind(registration_id)
        .execute(db).await?;

        Ok(result.rows_affected() == 1)
    }
}
