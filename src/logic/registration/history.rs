use serde_json::json;
use time::OffsetDateTime;

use crate::logic::{registration::{Actor, ExcuseReason, Registration, RegistrationStatus, Team}, types::{HistoryEntryId, MatchId, PlayerId, RegistrationId}};

// Snapshot of a registration right after a change. Append-only.
#[derive(Debug)]
#[derive(Clone)]
pub struct RegistrationHistoryEntry {
    pub id: HistoryEntryId,
    pub registration_id: RegistrationId,
    pub player_id: PlayerId,
    pub match_id: MatchId,
    pub team: Option<Team>,
    pub status: RegistrationStatus,
    pub excuse_reason: Option<ExcuseReason>,
    pub excuse_note: Option<String>,
    pub admin_note: Option<String>,
    pub actor: Actor,
    pub changed_at: OffsetDateTime,
}

impl RegistrationHistoryEntry {
    pub fn from_registration(registration: &Registration) -> Self {
        Self {
            id: HistoryEntryId::default(),
            registration_id: registration.id,
            player_id: registration.player_id,
            match_id: registration.match_id,
            team: registration.team,
            status: registration.status,
            excuse_reason: registration.excuse_reason,
            excuse_note: registration.excuse_note.clone(),
            admin_note: registration.admin_note.clone(),
            actor: registration.actor,
            changed_at: registration.modified_at,
        }
    }

    pub fn package(&self) -> serde_json::Value {
        json!({
            "id": self.id,
            "registration_id": self.registration_id,
            "status": self.status,
            "team": self.team,
            "excuse_reason": self.excuse_reason,
            "excuse_note": self.excuse_note,
            "admin_note": self.admin_note,
            "actor": self.actor.kind(),
            "actor_id": self.actor.id(),
            "changed_at": self.changed_at.unix_timestamp(),
        })
    }
}
