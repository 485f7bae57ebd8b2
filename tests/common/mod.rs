// Shared setup for the integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use puck_roster::{AppData, Config, Match, MatchMode, Player, Position, RecordingNotifier};
use time::{Duration, OffsetDateTime};

pub struct Fixture {
    pub app: AppData,
    pub notifier: Arc<RecordingNotifier>,
}

pub async fn fixture() -> Fixture {
    fixture_with(Config::default()).await
}

pub async fn fixture_with(config: Config) -> Fixture {
    let notifier = Arc::new(RecordingNotifier::default());
    let app = AppData::build(config, notifier.clone()).await.unwrap();
    Fixture { app, notifier }
}

impl Fixture {
    pub async fn game(&self, mode: Option<MatchMode>, max_players: Option<i32>) -> Match {
        let starts_at = OffsetDateTime::now_utc() + Duration::days(2);
        Match::build_and_save(self.app.ledger.db(), starts_at, "Ice Hall", mode, max_players).await.unwrap()
    }

    pub async fn game_at(&self, starts_at: OffsetDateTime) -> Match {
        Match::build_and_save(self.app.ledger.db(), starts_at, "Ice Hall", Some(MatchMode::FourOnFourWithGoalie), None).await.unwrap()
    }

    pub async fn player(&self, name: &str, position: Position) -> Player {
        Player::build_and_save(self.app.ledger.db(), name, position).await.unwrap()
    }

    pub async fn players(&self, prefix: &str, position: Position, amount: usize) -> Vec<Player> {
        let mut players = Vec::new();
        for i in 0..amount {
            players.push(self.player(&format!("{prefix} {i}"), position).await);
        }
        return players;
    }
}
