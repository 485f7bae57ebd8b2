use serde::{Deserialize, Serialize};

use crate::logic::layout;

// Detailed positions. The first six are ice positions that appear in match layouts,
// the last three are looser positions a player may declare.
#[derive(Eq, Hash, PartialEq, PartialOrd, Ord)]
#[derive(Debug)]
#[derive(Copy, Clone)]
#[derive(sqlx::Type, Serialize, Deserialize)]
pub enum Position {
    Goalie,
    DefenseLeft,
    DefenseRight,
    Center,
    WingLeft,
    WingRight,
    Defense,
    Forward,
    Any,
}

// Coarse grouping of positions used for capacity.
#[derive(Eq, Hash, PartialEq, PartialOrd, Ord)]
#[derive(Debug)]
#[derive(Copy, Clone)]
#[derive(sqlx::Type, Serialize, Deserialize)]
pub enum PositionCategory {
    Goalie,
    Defense,
    Forward,
    Any,
}

impl Position {
    pub fn category(self) -> PositionCategory {
        layout::category_of(self)
    }

    pub fn abbreviation(self) -> &'static str {
        match self {
            Self::Goalie => "G",
            Self::DefenseLeft => "LD",
            Self::DefenseRight => "RD",
            Self::Center => "C",
            Self::WingLeft => "LW",
            Self::WingRight => "RW",
            Self::Defense => "D",
            Self::Forward => "F",
            Self::Any => "*",
        }
    }
}

impl PositionCategory {
    // Skater categories, in the order they are tried for flexible players.
    pub const SKATERS: [Self; 2] = [Self::Forward, Self::Defense];

    pub fn is_skater(self) -> bool {
        matches!(self, Self::Defense | Self::Forward)
    }

    // Whether a player of this category can take a slot of the given category.
    // Flexible players fit any skater slot, but never the goal.
    pub fn fits(self, slot: Self) -> bool {
        match self {
            Self::Any => slot.is_skater(),
            _ => self == slot,
        }
    }
}
