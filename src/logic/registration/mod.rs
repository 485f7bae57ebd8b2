pub mod guard;
pub mod history;
pub mod ledger;
pub mod locks;
pub mod waitlist;

use serde::{Deserialize, Serialize};
use serde_json::json;
use time::OffsetDateTime;

use crate::logic::{player::position::PositionCategory, types::{MatchId, PlayerId, RegistrationId}};

#[derive(Eq, Hash, PartialEq, PartialOrd, Ord)]
#[derive(Debug)]
#[derive(Copy, Clone)]
#[derive(sqlx::Type, Serialize, Deserialize)]
pub enum Team {
    Dark,
    Light,
}

impl Team {
    pub const ALL: [Self; 2] = [Self::Dark, Self::Light];

    pub fn other(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }
}

// Where a player stands for a match.
#[derive(Eq, Hash, PartialEq)]
#[derive(Debug)]
#[derive(Default, Copy, Clone)]
#[derive(sqlx::Type, Serialize, Deserialize)]
pub enum RegistrationStatus {
    // Never stored. A missing registration reads as this.
    #[default]
    NoResponse,
    Registered,

    // Waitlisted: wanted to play but there was no room.
    Reserved,
    Unregistered,
    Excused,

    // Available as a backup, outside of capacity.
    Substitute,

    // Did not show up and did not excuse themselves. Set afterwards by an administrator.
    NoExcused,
}

impl RegistrationStatus {
    // Still in the match in some form.
    pub fn is_active(self) -> bool {
        matches!(self, Self::Registered | Self::Reserved | Self::Substitute)
    }

    // Statuses that go through the capacity guard.
    pub fn wants_slot(self) -> bool {
        matches!(self, Self::Registered | Self::Reserved)
    }
}

#[derive(Eq, Hash, PartialEq)]
#[derive(Debug)]
#[derive(Copy, Clone)]
#[derive(sqlx::Type, Serialize, Deserialize)]
pub enum ExcuseReason {
    Injury,
    Illness,
    Work,
    Family,
    Travel,
    Other,
}

#[derive(Eq, PartialEq)]
#[derive(Debug)]
#[derive(Copy, Clone)]
#[derive(sqlx::Type, Serialize, Deserialize)]
pub enum ActorKind {
    Player,
    Admin,
    System,
}

// Who made a change. Passed explicitly to every ledger call.
#[derive(Eq, PartialEq)]
#[derive(Debug)]
#[derive(Copy, Clone)]
pub enum Actor {
    Player(PlayerId),
    Admin(PlayerId),
    System,
}

impl Actor {
    pub fn kind(&self) -> ActorKind {
        match self {
            Self::Player(_) => ActorKind::Player,
            Self::Admin(_) => ActorKind::Admin,
            Self::System => ActorKind::System,
        }
    }

    pub fn id(&self) -> Option<PlayerId> {
        match self {
            Self::Player(id) | Self::Admin(id) => Some(*id),
            Self::System => None,
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin(_))
    }

    // Rebuild from the two database columns.
    pub fn from_parts(kind: ActorKind, id: Option<PlayerId>) -> Self {
        match (kind, id) {
            (ActorKind::Player, Some(id)) => Self::Player(id),
            (ActorKind::Admin, Some(id)) => Self::Admin(id),
            _ => Self::System,
        }
    }
}

// The current registration of one player for one match.
#[derive(Debug)]
#[derive(Clone)]
pub struct Registration {
    pub id: RegistrationId,
    pub player_id: PlayerId,
    pub match_id: MatchId,
    pub team: Option<Team>,
    pub status: RegistrationStatus,

    // Category of the slot held while registered.
    pub slot: Option<PositionCategory>,

    // Only meaningful for withdrawals.
    pub excuse_reason: Option<ExcuseReason>,
    pub excuse_note: Option<String>,

    pub admin_note: Option<String>,
    pub reminder_sent: bool,

    // When the player last joined the queue. Waitlist order goes by this.
    pub queued_at: OffsetDateTime,
    pub created_at: OffsetDateTime,
    pub modified_at: OffsetDateTime,
    pub actor: Actor,
}

impl Registration {
    // A fresh, unsaved registration.
    pub fn build(match_id: MatchId, player_id: PlayerId, actor: Actor, now: OffsetDateTime) -> Self {
        Self {
            id: RegistrationId::default(),
            player_id,
            match_id,
            team: None,
            status: RegistrationStatus::NoResponse,
            slot: None,
            excuse_reason: None,
            excuse_note: None,
            admin_note: None,
            reminder_sent: false,
            queued_at: now,
            created_at: now,
            modified_at: now,
            actor,
        }
    }

    pub fn is_saved(&self) -> bool {
        self.id != RegistrationId::default()
    }

    // The (team, category) slot this registration occupies, if any.
    pub fn held_slot(&self) -> Option<(Team, PositionCategory)> {
        if self.status != RegistrationStatus::Registered {
            return None;
        }

        match (self.team, self.slot) {
            (Some(team), Some(slot)) => Some((team, slot)),
            _ => None,
        }
    }

    pub fn package(&self) -> serde_json::Value {
        json!({
            "id": self.id,
            "player_id": self.player_id,
            "match_id": self.match_id,
            "team": self.team,
            "status": self.status,
            "slot": self.slot,
            "excuse_reason": self.excuse_reason,
            "excuse_note": self.excuse_note,
            "admin_note": self.admin_note,
        })
    }
}
