// Decides whether a player gets a slot, using the match layout and the current occupancy.
// Reads only. The ledger applies whatever is decided here.
use std::collections::HashMap;

use crate::logic::{error::{RegistrationError, Result}, game::Match, player::{Player, position::PositionCategory}, registration::{Registration, RegistrationStatus, Team}, types::{MatchId, SlotCount}};

// Registered players of one match, counted per team and slot category.
#[derive(Debug)]
#[derive(Default, Clone)]
pub struct Occupancy {
    counts: HashMap<(Team, PositionCategory), SlotCount>,
}

impl Occupancy {
    pub fn from_registrations<'a>(registrations: impl IntoIterator<Item = &'a Registration>) -> Self {
        let mut occupancy = Self::default();
        for registration in registrations {
            if let Some((team, category)) = registration.held_slot() {
                occupancy.add(team, category);
            }
        }
        return occupancy;
    }

    pub fn add(&mut self, team: Team, category: PositionCategory) {
        *self.counts.entry((team, category)).or_insert(0) += 1;
    }

    pub fn remove(&mut self, team: Team, category: PositionCategory) {
        if let Some(count) = self.counts.get_mut(&(team, category)) {
            *count = (*count - 1).max(0);
        }
    }

    pub fn count(&self, team: Team, category: PositionCategory) -> SlotCount {
        self.counts.get(&(team, category)).copied().unwrap_or(0)
    }

    pub fn team_total(&self, team: Team) -> SlotCount {
        self.counts.iter().filter(|((t, _), _)| *t == team).map(|(_, n)| n).sum()
    }

    pub fn total(&self) -> SlotCount {
        self.counts.values().sum()
    }

    // The occupancy as it would be if the given registration gave up its slot.
    pub fn without(&self, registration: Option<&Registration>) -> Self {
        let mut occupancy = self.clone();
        if let Some((team, category)) = registration.and_then(|r| r.held_slot()) {
            occupancy.remove(team, category);
        }
        return occupancy;
    }

    // Free slots of a category for a team. Negative if overfilled by an override.
    pub fn free(&self, game: &Match, team: Team, category: PositionCategory) -> SlotCount {
        game.category_capacity(category) - self.count(team, category)
    }
}

#[derive(Debug)]
#[derive(Clone, PartialEq, Eq)]
pub enum SlotOutcome {
    Granted { team: Team, category: PositionCategory },
    Waitlisted,
    Rejected(String),
}

// The categories a player of this category could fill.
fn candidate_categories(category: PositionCategory) -> Vec<PositionCategory> {
    match category {
        PositionCategory::Any => PositionCategory::SKATERS.to_vec(),
        _ => vec![category],
    }
}

// Teams to try, in order of preference.
fn candidate_teams(requested: Option<Team>, existing: Option<&Registration>) -> Vec<Team> {
    if let Some(team) = requested {
        return vec![team];
    }

    match existing.filter(|r| r.status.is_active()).and_then(|r| r.team) {
        Some(team) => vec![team, team.other()],
        None => Team::ALL.to_vec(),
    }
}

// Check that the request does not silently move an active player to the other team.
fn structural_check(requested: Option<Team>, existing: Option<&Registration>, switch_team: bool) -> Option<String> {
    let existing = existing.filter(|r| r.status.is_active())?;
    match (existing.team, requested) {
        (Some(current), Some(requested)) if current != requested && !switch_team => Some(format!(
            "player {} is already {:?} for team {:?} in match {}",
            existing.player_id, existing.status, current, existing.match_id
        )),
        _ => None,
    }
}

// Try to find a slot for a player. Full teams and full matches lead to the waitlist, never to rejection.
pub fn try_reserve_slot(game: &Match, player: &Player, team: Option<Team>, existing: Option<&Registration>, switch_team: bool, occupancy: &Occupancy) -> SlotOutcome {
    if let Some(reason) = structural_check(team, existing, switch_team) {
        return SlotOutcome::Rejected(reason);
    }

    let occupancy = occupancy.without(existing);
    if occupancy.total() >= game.hard_total() {
        tracing::debug!(match_id = game.id, player_id = player.id, "match is full");
        return SlotOutcome::Waitlisted;
    }

    // The slot with the most room wins. Ties go to the earlier team and category.
    let mut best: Option<(Team, PositionCategory, SlotCount)> = None;
    for team in candidate_teams(team, existing) {
        for category in candidate_categories(player.category()) {
            let free = occupancy.free(game, team, category);
            if free > 0 && best.map_or(true, |(_, _, most)| free > most) {
                best = Some((team, category, free));
            }
        }
    }

    match best {
        Some((team, category, _)) => SlotOutcome::Granted { team, category },
        None => {
            tracing::debug!(match_id = game.id, player_id = player.id, category = ?player.category(), "no free slot");
            SlotOutcome::Waitlisted
        }
    }
}

// An administrative override may ignore position limits, but never the hard total of the match.
pub fn check_override(game: &Match, existing: Option<&Registration>, occupancy: &Occupancy) -> Result<()> {
    let occupancy = occupancy.without(existing);
    if occupancy.total() + 1 > game.hard_total() {
        return Err(conflict(game.id, occupancy.total(), game.hard_total()));
    }
    Ok(())
}

fn conflict(match_id: MatchId, registered: SlotCount, total: SlotCount) -> RegistrationError {
    RegistrationError::Conflict { match_id, registered, total }
}

// Pick the slot for an override: the requested or current team, else the emptier one.
pub fn override_slot(game: &Match, player: &Player, team: Option<Team>, existing: Option<&Registration>, occupancy: &Occupancy) -> (Team, PositionCategory) {
    let occupancy = occupancy.without(existing);
    let current = existing.filter(|r| r.status.is_active()).and_then(|r| r.team);
    let team = team.or(current).unwrap_or_else(|| {
        match occupancy.team_total(Team::Light) < occupancy.team_total(Team::Dark) {
            true => Team::Light,
            false => Team::Dark,
        }
    });

    let category = candidate_categories(player.category())
        .into_iter()
        .fold(None, |best: Option<(PositionCategory, SlotCount)>, category| {
            let free = occupancy.free(game, team, category);
            match best {
                Some((_, most)) if most >= free => best,
                _ => Some((category, free)),
            }
        })
        .map(|(category, _)| category)
        .unwrap_or(PositionCategory::Forward);

    return (team, category);
}

// Whether a waitlisted player can take the given freed slot right now.
pub fn fits_vacancy(game: &Match, player: &Player, registration: &Registration, team: Team, category: PositionCategory, occupancy: &Occupancy) -> bool {
    if registration.status != RegistrationStatus::Reserved {
        return false;
    }

    if registration.team.is_some_and(|t| t != team) {
        return false;
    }

    player.category().fits(category)
        && occupancy.free(game, team, category) > 0
        && occupancy.total() < game.hard_total()
}
