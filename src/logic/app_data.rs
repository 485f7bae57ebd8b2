use std::sync::Arc;

use time::OffsetDateTime;

use crate::{db, logic::{config::Config, error::Result, logging, notify::Notifier, registration::ledger::Ledger, reminder::{self, DueReminder}}};

// For keeping track of stuff.
pub struct AppData {
    pub config: Config,
    pub ledger: Ledger,
}

impl AppData {
    // Set up logging and the database, and build the ledger on top of them.
    pub async fn build(config: Config, notifier: Arc<dyn Notifier>) -> Result<Self> {
        logging::init(&config);

        let now = std::time::Instant::now();
        let db = db::setup(&config).await?;
        let ledger = Ledger::build(db, notifier, config.write_guard());
        tracing::info!("set up the registration engine in {:.2?}", now.elapsed());

        Ok(Self { config, ledger })
    }

    // Reminders that should go out now.
    pub async fn due_reminders(&self, now: OffsetDateTime) -> Result<Vec<DueReminder>> {
        reminder::due_reminders(self.ledger.db(), now, self.config.reminder_lead()).await
    }
}
