pub mod db;
pub mod logic;


pub use logic::{
    app_data::AppData,
    config::Config,
    error::{ConfigError, RegistrationError, Result},
    game::{Match, mode::MatchMode},
    layout::{PositionCapacity, capacity_for_mode, category_of, positions_for_mode},
    notify::{LogNotifier, Notification, NotificationKind, Notifier, NullNotifier, RecordingNotifier},
    player::{Player, position::{Position, PositionCategory}},
    registration::{
        Actor, ExcuseReason, Registration, RegistrationStatus, Team,
        guard::{Occupancy, SlotOutcome, try_reserve_slot},
        history::RegistrationHistoryEntry,
        ledger::{Ledger, UpsertOutcome, UpsertRequest, UpsertResult},
        waitlist::Vacancy,
    },
    reminder::DueReminder,
    write_guard::{AllowAll, ProtectedAccounts, WriteGuard},
};
