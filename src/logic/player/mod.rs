pub mod position;

use serde_json::json;

use crate::logic::{error::Result, player::position::{Position, PositionCategory}, types::{Db, PlayerId}};

#[derive(Debug)]
#[derive(Clone)]
pub struct Player {
    pub id: PlayerId,
    pub full_name: String,
    pub position: Position,
}

// Basics.
impl Player {
    pub fn build(full_name: &str, position: Position) -> Self {
        Self {
            id: PlayerId::default(),
            full_name: full_name.to_string(),
            position,
        }
    }

    // Create a player and store it in the database. Return a clone of the Player.
    pub async fn build_and_save(db: &Db, full_name: &str, position: Position) -> Result<Self> {
        let mut player = Self::build(full_name, position);
        player.save(db).await?;
        return Ok(player);
    }

    pub fn category(&self) -> PositionCategory {
        self.position.category()
    }

    // Get relevant information of the player.
    pub fn package(&self) -> serde_json::Value {
        json!({
            "id": self.id,
            "name": self.full_name,
            "position": self.position.abbreviation(),
        })
    }
}
