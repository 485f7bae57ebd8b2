// The registration ledger. Every change to a registration goes through here:
// write guard, match lock, one transaction with the status change, its history entry
// and any promotion it causes, and the notifications once the transaction is committed.
use std::sync::Arc;

use time::OffsetDateTime;

use crate::logic::{
    error::{RegistrationError, Result},
    game::Match,
    notify::{Notification, NotificationKind, Notifier},
    player::Player,
    registration::{
        Actor, ExcuseReason, Registration, RegistrationStatus, Team,
        guard::{self, Occupancy, SlotOutcome},
        history::RegistrationHistoryEntry,
        locks::MatchLocks,
        waitlist::{self, Vacancy},
    },
    types::{Db, MatchId, PlayerId, RegistrationId},
    write_guard::WriteGuard,
};

// A requested change to a player's registration.
#[derive(Debug)]
#[derive(Clone)]
pub struct UpsertRequest {
    pub match_id: MatchId,
    pub player_id: PlayerId,
    pub status: RegistrationStatus,
    pub team: Option<Team>,
    pub excuse_reason: Option<ExcuseReason>,
    pub excuse_note: Option<String>,
    pub admin_note: Option<String>,

    // Marks the request as a withdrawal, whatever the status says.
    pub unregister: bool,

    // Administrative override of position capacity.
    pub force: bool,

    // Allows moving an active player to the other team.
    pub switch_team: bool,
}

impl UpsertRequest {
    pub fn build(match_id: MatchId, player_id: PlayerId, status: RegistrationStatus) -> Self {
        Self {
            match_id,
            player_id,
            status,
            team: None,
            excuse_reason: None,
            excuse_note: None,
            admin_note: None,
            unregister: false,
            force: false,
            switch_team: false,
        }
    }

    pub fn register(match_id: MatchId, player_id: PlayerId) -> Self {
        Self::build(match_id, player_id, RegistrationStatus::Registered)
    }

    pub fn unregister(match_id: MatchId, player_id: PlayerId) -> Self {
        let mut request = Self::build(match_id, player_id, RegistrationStatus::Unregistered);
        request.unregister = true;
        return request;
    }

    pub fn excuse(match_id: MatchId, player_id: PlayerId, reason: ExcuseReason, note: Option<&str>) -> Self {
        let mut request = Self::build(match_id, player_id, RegistrationStatus::Excused);
        request.excuse_reason = Some(reason);
        request.excuse_note = note.map(str::to_string);
        return request;
    }

    pub fn on_team(mut self, team: Team) -> Self {
        self.team = Some(team);
        return self;
    }

    pub fn forced(mut self) -> Self {
        self.force = true;
        return self;
    }

    pub fn switching_team(mut self) -> Self {
        self.switch_team = true;
        return self;
    }

    pub fn with_admin_note(mut self, note: &str) -> Self {
        self.admin_note = Some(note.to_string());
        return self;
    }

    // Work out the status this request is really asking for, and check it is allowed for the actor.
    fn target_status(&self, actor: &Actor) -> Result<RegistrationStatus> {
        let status = match self.unregister {
            true if self.excuse_reason.is_some() => RegistrationStatus::Excused,
            true => RegistrationStatus::Unregistered,
            false => self.status,
        };

        match status {
            RegistrationStatus::NoResponse => {
                return Err(RegistrationError::invalid("no response is not a status that can be set"));
            }
            RegistrationStatus::Excused if self.excuse_reason.is_none() => {
                return Err(RegistrationError::invalid("an excuse needs a reason"));
            }
            RegistrationStatus::NoExcused if !actor.is_admin() => {
                return Err(RegistrationError::invalid("only an administrator can mark a no-show"));
            }
            _ => {}
        }

        if self.force && !actor.is_admin() {
            return Err(RegistrationError::invalid("only an administrator can override capacity"));
        }

        if self.force && !status.wants_slot() {
            return Err(RegistrationError::invalid(format!("an override cannot set {status:?}")));
        }

        Ok(status)
    }
}

// How an upsert went for the caller.
#[derive(Debug)]
#[derive(Copy, Clone, PartialEq, Eq)]
pub enum UpsertOutcome {
    // Holds a slot.
    Granted,

    // On the waitlist.
    Waitlisted,

    // A status outside of capacity was set.
    Updated,
}

#[derive(Debug)]
#[derive(Clone)]
pub struct UpsertResult {
    pub registration: Registration,
    pub outcome: UpsertOutcome,

    // Whoever got the slot this change freed.
    pub promoted: Option<Registration>,
}

pub struct Ledger {
    db: Db,
    locks: MatchLocks,
    notifier: Arc<dyn Notifier>,
    write_guard: Arc<dyn WriteGuard>,
}

impl Ledger {
    pub fn build(db: Db, notifier: Arc<dyn Notifier>, write_guard: Arc<dyn WriteGuard>) -> Self {
        Self {
            db,
            locks: MatchLocks::default(),
            notifier,
            write_guard,
        }
    }

    pub fn db(&self) -> &Db {
        &self.db
    }

    // Apply a registration change.
    pub async fn upsert(&self, actor: Actor, request: UpsertRequest) -> Result<UpsertResult> {
        self.check_write(&actor)?;
        let target = request.target_status(&actor)?;

        let applied = {
            let lock = self.locks.for_match(request.match_id);
            let _permit = lock.lock().await;
            self.apply_upsert(&actor, &request, target).await
        };
        self.locks.prune();
        let (result, previous_status) = applied?;

        if previous_status != result.registration.status {
            if let Some(kind) = notification_kind(result.registration.status) {
                self.notifier.notify(Notification::build(result.registration.player_id, request.match_id, kind));
            }
        }

        if let Some(promoted) = &result.promoted {
            self.notifier.notify(Notification::build(promoted.player_id, request.match_id, NotificationKind::Promoted));
        }

        Ok(result)
    }

    // The transactional part of an upsert. The caller holds the match lock.
    async fn apply_upsert(&self, actor: &Actor, request: &UpsertRequest, target: RegistrationStatus) -> Result<(UpsertResult, RegistrationStatus)> {
        let mut tx = self.db.begin().await?;
        let game = Match::fetch_from_db(&mut *tx, request.match_id).await?
            .ok_or(RegistrationError::not_found("match", request.match_id))?;
        let player = Player::fetch_from_db(&mut *tx, request.player_id).await?
            .ok_or(RegistrationError::not_found("player", request.player_id))?;
        let existing = Registration::fetch_for_player(&mut *tx, game.id, player.id).await?;
        let registered = Registration::fetch_by_status(&mut *tx, game.id, RegistrationStatus::Registered).await?;
        let occupancy = Occupancy::from_registrations(&registered);

        let now = OffsetDateTime::now_utc();
        let previous_status = existing.as_ref().map_or(RegistrationStatus::NoResponse, |r| r.status);
        let previous_slot = existing.as_ref().and_then(|r| r.held_slot());

        let (mut registration, outcome) = decide(&game, &player, actor, request, target, existing, &occupancy, now)?;
        registration.save(&mut *tx).await?;
        RegistrationHistoryEntry::from_registration(&registration).append(&mut *tx).await?;

        tracing::info!(
            match_id = game.id,
            player_id = player.id,
            actor = ?actor.kind(),
            from = ?previous_status,
            to = ?registration.status,
            team = ?registration.team,
            "registration updated"
        );

        let promoted = match previous_slot {
            Some(slot) if registration.held_slot() != Some(slot) => {
                waitlist::promote(&mut *tx, &game, Vacancy::build(slot.0, slot.1), now).await?
            }
            _ => None,
        };

        tx.commit().await?;
        Ok((UpsertResult { registration, outcome, promoted }, previous_status))
    }

    // Remove a registration row altogether. Its history stays.
    // Returns whoever was promoted into the freed slot.
    pub async fn delete_registration(&self, actor: Actor, id: RegistrationId) -> Result<Option<Registration>> {
        self.check_write(&actor)?;
        if !actor.is_admin() {
            return Err(RegistrationError::invalid("only an administrator can delete a registration"));
        }

        let match_id = Registration::fetch_by_id(&self.db, id).await?
            .ok_or(RegistrationError::not_found("registration", id))?
            .match_id;

        let applied = {
            let lock = self.locks.for_match(match_id);
            let _permit = lock.lock().await;
            self.apply_delete(&actor, id, match_id).await
        };
        self.locks.prune();
        let promoted = applied?;

        if let Some(promoted) = &promoted {
            self.notifier.notify(Notification::build(promoted.player_id, match_id, NotificationKind::Promoted));
        }

        Ok(promoted)
    }

    async fn apply_delete(&self, actor: &Actor, id: RegistrationId, match_id: MatchId) -> Result<Option<Registration>> {
        let mut tx = self.db.begin().await?;

        // Look again under the lock, it may be gone by now.
        let registration = Registration::fetch_by_id(&mut *tx, id).await?
            .ok_or(RegistrationError::not_found("registration", id))?;
        let game = Match::fetch_from_db(&mut *tx, match_id).await?
            .ok_or(RegistrationError::not_found("match", match_id))?;

        registration.delete(&mut *tx).await?;
        tracing::info!(match_id, player_id = registration.player_id, registration_id = id, actor = ?actor.kind(), "registration deleted");

        let promoted = match registration.held_slot() {
            Some((team, category)) => waitlist::promote(&mut *tx, &game, Vacancy::build(team, category), OffsetDateTime::now_utc()).await?,
            None => None,
        };

        tx.commit().await?;
        Ok(promoted)
    }

    // The current registration of a player, if there is one.
    pub async fn registration(&self, match_id: MatchId, player_id: PlayerId) -> Result<Option<Registration>> {
        Registration::fetch_for_player(&self.db, match_id, player_id).await
    }

    // The status of a player. No registration at all reads as no response.
    pub async fn status_of(&self, match_id: MatchId, player_id: PlayerId) -> Result<RegistrationStatus> {
        Ok(self.registration(match_id, player_id).await?.map_or(RegistrationStatus::NoResponse, |r| r.status))
    }

    // Every recorded change of a registration, oldest first.
    pub async fn history(&self, registration_id: RegistrationId) -> Result<Vec<RegistrationHistoryEntry>> {
        RegistrationHistoryEntry::fetch_for_registration(&self.db, registration_id).await
    }

    // Registrations of a match with the given status, oldest queue position first.
    pub async fn with_status(&self, match_id: MatchId, status: RegistrationStatus) -> Result<Vec<Registration>> {
        Registration::fetch_by_status(&self.db, match_id, status).await
    }

    pub async fn occupancy(&self, match_id: MatchId) -> Result<Occupancy> {
        let registered = self.with_status(match_id, RegistrationStatus::Registered).await?;
        Ok(Occupancy::from_registrations(&registered))
    }

    fn check_write(&self, actor: &Actor) -> Result<()> {
        if let Err(reason) = self.write_guard.check(actor) {
            tracing::info!(actor = ?actor.kind(), actor_id = ?actor.id(), %reason, "write vetoed");
            return Err(RegistrationError::Vetoed(reason));
        }
        Ok(())
    }
}

// Build the new state of the registration. Nothing is written here.
#[allow(clippy::too_many_arguments)]
fn decide(game: &Match, player: &Player, actor: &Actor, request: &UpsertRequest, target: RegistrationStatus, existing: Option<Registration>, occupancy: &Occupancy, now: OffsetDateTime) -> Result<(Registration, UpsertOutcome)> {
    // A no-show is final for the player. Only an administrator can correct it.
    if existing.as_ref().is_some_and(|r| r.status == RegistrationStatus::NoExcused) && !actor.is_admin() {
        return Err(RegistrationError::invalid("a no-show can only be changed by an administrator"));
    }

    let was_queued = existing.as_ref().is_some_and(|r| r.status.wants_slot());
    let was_registered = existing.as_ref().is_some_and(|r| r.status == RegistrationStatus::Registered);
    let existing_team = existing.as_ref().and_then(|r| r.team);
    let mut registration = existing.clone().unwrap_or_else(|| Registration::build(game.id, player.id, *actor, now));

    let outcome = if target.wants_slot() {
        let same_team = request.team.is_none() || request.team == existing_team;

        if request.force {
            guard::check_override(game, existing.as_ref(), occupancy)?;
            let (team, category) = guard::override_slot(game, player, request.team, existing.as_ref(), occupancy);
            registration.status = RegistrationStatus::Registered;
            registration.team = Some(team);
            registration.slot = Some(category);
            UpsertOutcome::Granted
        }
        else if was_registered && same_team {
            // Confirming again. The slot stays as it is.
            UpsertOutcome::Granted
        }
        else {
            match guard::try_reserve_slot(game, player, request.team, existing.as_ref(), request.switch_team, occupancy) {
                SlotOutcome::Granted { team, category } => {
                    registration.status = RegistrationStatus::Registered;
                    registration.team = Some(team);
                    registration.slot = Some(category);
                    UpsertOutcome::Granted
                }
                SlotOutcome::Waitlisted => {
                    registration.status = RegistrationStatus::Reserved;
                    registration.team = request.team.or(existing_team.filter(|_| was_queued));
                    registration.slot = None;
                    UpsertOutcome::Waitlisted
                }
                SlotOutcome::Rejected(reason) => {
                    return Err(RegistrationError::StructuralRejection(reason));
                }
            }
        }
    }
    else {
        registration.status = target;
        registration.slot = None;
        if target == RegistrationStatus::Substitute {
            registration.team = request.team.or(existing_team);
        }
        UpsertOutcome::Updated
    };

    // Entering the queue again means going to the back of it.
    if target.wants_slot() && !was_queued {
        registration.queued_at = now;
    }

    if registration.status == RegistrationStatus::Registered && !was_registered {
        registration.reminder_sent = false;
    }

    match registration.status {
        RegistrationStatus::Excused => {
            registration.excuse_reason = request.excuse_reason;
            registration.excuse_note = request.excuse_note.clone();
        }
        RegistrationStatus::Unregistered => {
            registration.excuse_reason = None;
            registration.excuse_note = request.excuse_note.clone();
        }
        _ => {
            registration.excuse_reason = None;
            registration.excuse_note = None;
        }
    }

    if request.admin_note.is_some() {
        registration.admin_note = request.admin_note.clone();
    }

    registration.actor = *actor;
    registration.modified_at = now;

    return Ok((registration, outcome));
}

fn notification_kind(status: RegistrationStatus) -> Option<NotificationKind> {
    match status {
        RegistrationStatus::Registered => Some(NotificationKind::Registered),
        RegistrationStatus::Reserved => Some(NotificationKind::Waitlisted),
        RegistrationStatus::Unregistered => Some(NotificationKind::Unregistered),
        RegistrationStatus::Excused => Some(NotificationKind::Excused),
        _ => None,
    }
}
