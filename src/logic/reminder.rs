// Reminders for registered players of upcoming matches.
// The scan only reads, and marking is idempotent, so running it twice does no harm.
use sqlx::FromRow;
use time::{Duration, OffsetDateTime};

use crate::logic::{error::Result, types::{Db, MatchId, PlayerId, RegistrationId}};

#[derive(Debug)]
#[derive(Clone)]
#[derive(FromRow)]
pub struct DueReminder {
    pub registration_id: RegistrationId,
    pub player_id: PlayerId,
    pub match_id: MatchId,
    pub starts_at: OffsetDateTime,
}

// Registered players whose match starts within the lead time and who have not been reminded.
pub async fn due_reminders(db: &Db, now: OffsetDateTime, lead: Duration) -> Result<Vec<DueReminder>> {
    DueReminder::fetch_pending(db, now, now + lead).await
}

// Mark the reminder as sent. True only for the call that actually marked it.
pub async fn mark_sent(db: &Db, registration_id: RegistrationId) -> Result<bool> {
    DueReminder::mark_sent(db, registration_id).await
}
