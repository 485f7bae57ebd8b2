// Custom types that are widely used are defined here.
use sqlx::{SqliteConnection, SqlitePool};

pub type Db = SqlitePool;
pub type Conn = SqliteConnection;

// Database ID types.
pub type PlayerId = u32;
pub type MatchId = u32;
pub type RegistrationId = u32;
pub type HistoryEntryId = u32;

// Slot counts. Signed, because a requested slot count may come in as zero or negative.
pub type SlotCount = i32;

