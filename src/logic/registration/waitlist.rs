// Moving waitlisted players into freed slots.
use time::OffsetDateTime;

use crate::logic::{error::Result, game::Match, player::{Player, position::PositionCategory}, registration::{Actor, Registration, RegistrationStatus, Team, guard::{self, Occupancy}, history::RegistrationHistoryEntry}, types::Conn};

// A slot that was just given up.
#[derive(Debug)]
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct Vacancy {
    pub team: Team,
    pub category: PositionCategory,
}

impl Vacancy {
    pub fn build(team: Team, category: PositionCategory) -> Self {
        Self { team, category }
    }
}

// Promote the longest-waiting player that fits the vacancy. One vacancy promotes one player at most.
// Must run in the same transaction, under the same match lock, as the change that freed the slot.
pub async fn promote(conn: &mut Conn, game: &Match, vacancy: Vacancy, now: OffsetDateTime) -> Result<Option<Registration>> {
    let registered = Registration::fetch_by_status(&mut *conn, game.id, RegistrationStatus::Registered).await?;
    let occupancy = Occupancy::from_registrations(&registered);

    let waitlist = Registration::fetch_by_status(&mut *conn, game.id, RegistrationStatus::Reserved).await?;
    for mut registration in waitlist {
        let player = match Player::fetch_from_db(&mut *conn, registration.player_id).await? {
            Some(player) => player,
            None => continue,
        };

        if !guard::fits_vacancy(game, &player, &registration, vacancy.team, vacancy.category, &occupancy) {
            continue;
        }

        registration.status = RegistrationStatus::Registered;
        registration.team = Some(vacancy.team);
        registration.slot = Some(vacancy.category);
        registration.reminder_sent = false;
        registration.actor = Actor::System;
        registration.modified_at = now;
        registration.save(&mut *conn).await?;
        RegistrationHistoryEntry::from_registration(&registration).append(&mut *conn).await?;

        tracing::info!(
            match_id = game.id,
            player_id = registration.player_id,
            team = ?vacancy.team,
            category = ?vacancy.category,
            "promoted from waitlist"
        );
        return Ok(Some(registration));
    }

    tracing::info!(match_id = game.id, team = ?vacancy.team, category = ?vacancy.category, "vacancy left open, nobody on the waitlist fits");
    Ok(None)
}
