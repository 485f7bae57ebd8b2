use serde::{Deserialize, Serialize};

// How many skaters each team puts on the ice, and whether there is a goalie.
#[derive(Eq, Hash, PartialEq)]
#[derive(Debug)]
#[derive(Copy, Clone)]
#[derive(sqlx::Type, Serialize, Deserialize)]
pub enum MatchMode {
    ThreeOnThree,
    ThreeOnThreeWithGoalie,
    FourOnFour,
    FourOnFourWithGoalie,
    FiveOnFive,
    FiveOnFiveWithGoalie,
}

impl MatchMode {
    // Used whenever a match has no mode set.
    pub const DEFAULT: Self = Self::FiveOnFiveWithGoalie;

    pub const ALL: [Self; 6] = [
        Self::ThreeOnThree,
        Self::ThreeOnThreeWithGoalie,
        Self::FourOnFour,
        Self::FourOnFourWithGoalie,
        Self::FiveOnFive,
        Self::FiveOnFiveWithGoalie,
    ];

    pub fn skaters_per_team(self) -> i32 {
        match self {
            Self::ThreeOnThree | Self::ThreeOnThreeWithGoalie => 3,
            Self::FourOnFour | Self::FourOnFourWithGoalie => 4,
            Self::FiveOnFive | Self::FiveOnFiveWithGoalie => 5,
        }
    }

    pub fn has_goalie(self) -> bool {
        matches!(self, Self::ThreeOnThreeWithGoalie | Self::FourOnFourWithGoalie | Self::FiveOnFiveWithGoalie)
    }

    // Every skater position has a bench counterpart, the goalie does not.
    pub fn players_per_team(self) -> i32 {
        self.skaters_per_team() * 2 + if self.has_goalie() { 1 } else { 0 }
    }

    pub fn total_players(self) -> i32 {
        self.players_per_team() * 2
    }
}
