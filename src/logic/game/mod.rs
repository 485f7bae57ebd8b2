pub mod mode;

use serde_json::json;
use time::OffsetDateTime;

use crate::logic::{error::Result, game::mode::MatchMode, layout::{self, PositionCapacity}, player::position::{Position, PositionCategory}, registration::{Registration, RegistrationStatus, Team, guard::Occupancy}, types::{Db, MatchId, SlotCount}};

// A single scheduled match.
#[derive(Debug)]
#[derive(Clone)]
pub struct Match {
    pub id: MatchId,
    pub starts_at: OffsetDateTime,
    pub location: String,
    pub mode: Option<MatchMode>,

    // Declared maximum for the whole match. Drives the slots of each team when set.
    pub max_players: Option<i32>,
}

impl Match {
    pub fn build(starts_at: OffsetDateTime, location: &str, mode: Option<MatchMode>, max_players: Option<i32>) -> Self {
        Self {
            id: MatchId::default(),
            starts_at,
            location: location.to_string(),
            mode,
            max_players,
        }
    }

    // Create a match and store it in the database.
    pub async fn build_and_save(db: &Db, starts_at: OffsetDateTime, location: &str, mode: Option<MatchMode>, max_players: Option<i32>) -> Result<Self> {
        let mut game = Self::build(starts_at, location, mode, max_players);
        game.save(db).await?;
        return Ok(game);
    }

    pub fn effective_mode(&self) -> MatchMode {
        self.mode.unwrap_or(MatchMode::DEFAULT)
    }

    pub fn slots_per_team(&self) -> SlotCount {
        match self.max_players {
            Some(max) => max / 2,
            None => self.effective_mode().players_per_team(),
        }
    }

    // The hard limit of registered players over both teams.
    pub fn hard_total(&self) -> SlotCount {
        self.max_players.unwrap_or(self.slots_per_team() * 2)
    }

    pub fn positions(&self) -> &'static [Position] {
        layout::positions_for_mode(self.mode)
    }

    // Capacity of a single team. Both teams have the same layout.
    pub fn capacity(&self) -> PositionCapacity {
        layout::capacity_for_mode(self.mode, self.slots_per_team())
    }

    pub fn category_capacity(&self, category: PositionCategory) -> SlotCount {
        self.capacity().for_category(category)
    }

    // Get an overview of the match roster: capacity and occupancy per team, and the waitlist in order.
    pub async fn roster_package(&self, db: &Db) -> Result<serde_json::Value> {
        let registrations = Registration::fetch_for_match(db, self.id).await?;
        let occupancy = Occupancy::from_registrations(&registrations);
        let capacity = self.capacity();

        let mut teams = Vec::new();
        for team in Team::ALL {
            let mut categories = Vec::new();
            for category in [PositionCategory::Goalie, PositionCategory::Defense, PositionCategory::Forward] {
                categories.push(json!({
                    "category": category,
                    "capacity": capacity.for_category(category),
                    "registered": occupancy.count(team, category),
                }));
            }

            teams.push(json!({
                "team": team,
                "registered": occupancy.team_total(team),
                "categories": categories,
            }));
        }

        let ids_with_status = |status: RegistrationStatus| -> Vec<_> {
            registrations.iter().filter(|r| r.status == status).map(|r| r.player_id).collect()
        };

        Ok(json!({
            "id": self.id,
            "location": self.location,
            "mode": self.effective_mode(),
            "hard_total": self.hard_total(),
            "registered": occupancy.total(),
            "teams": teams,
            "waitlist": ids_with_status(RegistrationStatus::Reserved),
            "substitutes": ids_with_status(RegistrationStatus::Substitute),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(mode: Option<MatchMode>, max_players: Option<i32>) -> Match {
        Match::build(OffsetDateTime::UNIX_EPOCH, "Rink", mode, max_players)
    }

    #[test]
    fn declared_maximum_drives_slots() {
        let game = game(Some(MatchMode::FourOnFourWithGoalie), Some(12));
        assert_eq!(game.slots_per_team(), 6);
        assert_eq!(game.hard_total(), 12);
        assert_eq!(game.capacity().total(), 6);
    }

    #[test]
    fn odd_maximum_keeps_the_hard_total() {
        let game = game(Some(MatchMode::FourOnFour), Some(13));
        assert_eq!(game.slots_per_team(), 6);
        assert_eq!(game.hard_total(), 13);
    }

    #[test]
    fn mode_drives_slots_without_maximum() {
        let game = game(Some(MatchMode::FourOnFourWithGoalie), None);
        assert_eq!(game.slots_per_team(), 9);
        assert_eq!(game.hard_total(), 18);
    }

    #[test]
    fn no_mode_falls_back_to_default() {
        let game = game(None, None);
        assert_eq!(game.effective_mode(), MatchMode::FiveOnFiveWithGoalie);
        assert_eq!(game.slots_per_team(), 11);
        assert_eq!(game.category_capacity(PositionCategory::Goalie), 1);
    }
}
