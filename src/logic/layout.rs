// Ice layouts of each match mode, and how the slots of one team are spread over them.
use std::collections::{BTreeMap, HashMap};

use lazy_static::lazy_static;
use serde::Serialize;

use crate::logic::{game::mode::MatchMode, player::position::{Position, PositionCategory}, types::SlotCount};

lazy_static! {
    // Canonical position order of every mode. The order decides who gets the leftover slots.
    static ref LAYOUTS: HashMap<MatchMode, Vec<Position>> = {
        use Position::*;
        HashMap::from([
            (MatchMode::ThreeOnThree, vec![Center, WingLeft, DefenseLeft]),
            (MatchMode::ThreeOnThreeWithGoalie, vec![Goalie, Center, WingLeft, DefenseLeft]),
            (MatchMode::FourOnFour, vec![WingLeft, WingRight, DefenseLeft, DefenseRight]),
            (MatchMode::FourOnFourWithGoalie, vec![Goalie, WingLeft, WingRight, DefenseLeft, DefenseRight]),
            (MatchMode::FiveOnFive, vec![Center, WingLeft, WingRight, DefenseLeft, DefenseRight]),
            (MatchMode::FiveOnFiveWithGoalie, vec![Goalie, Center, WingLeft, WingRight, DefenseLeft, DefenseRight]),
        ])
    };

    // Used when a match has no mode.
    static ref DEFAULT_LAYOUT: Vec<Position> = {
        use Position::*;
        vec![Goalie, Center, WingLeft, WingRight, DefenseLeft, DefenseRight]
    };

    // The one and only position -> category table.
    static ref CATEGORIES: HashMap<Position, PositionCategory> = {
        HashMap::from([
            (Position::Goalie, PositionCategory::Goalie),
            (Position::DefenseLeft, PositionCategory::Defense),
            (Position::DefenseRight, PositionCategory::Defense),
            (Position::Defense, PositionCategory::Defense),
            (Position::Center, PositionCategory::Forward),
            (Position::WingLeft, PositionCategory::Forward),
            (Position::WingRight, PositionCategory::Forward),
            (Position::Forward, PositionCategory::Forward),
            (Position::Any, PositionCategory::Any),
        ])
    };
}

// Get the category of a position.
pub fn category_of(position: Position) -> PositionCategory {
    CATEGORIES.get(&position).copied().unwrap_or(PositionCategory::Any)
}

// Get the ordered positions of a mode.
pub fn positions_for_mode(mode: Option<MatchMode>) -> &'static [Position] {
    match mode.and_then(|m| LAYOUTS.get(&m)) {
        Some(positions) => positions.as_slice(),
        None => DEFAULT_LAYOUT.as_slice(),
    }
}

// Slot counts per position for one team.
#[derive(Debug, Serialize)]
#[derive(Default, Clone, PartialEq, Eq)]
pub struct PositionCapacity {
    slots: BTreeMap<Position, SlotCount>,
}

impl PositionCapacity {
    pub fn get(&self, position: Position) -> SlotCount {
        self.slots.get(&position).copied().unwrap_or(0)
    }

    pub fn total(&self) -> SlotCount {
        self.slots.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Position, SlotCount)> + '_ {
        self.slots.iter().map(|(p, n)| (*p, *n))
    }

    // Combined slots of every position in the category.
    pub fn for_category(&self, category: PositionCategory) -> SlotCount {
        self.iter()
            .filter(|(position, _)| category_of(*position) == category)
            .map(|(_, n)| n)
            .sum()
    }
}

// Work out the capacity of one team for a mode and a number of slots.
pub fn capacity_for_mode(mode: Option<MatchMode>, slots_per_team: SlotCount) -> PositionCapacity {
    distribute(positions_for_mode(mode), slots_per_team)
}

// One slot to the goalie if the layout has one, the rest round-robin over the skater positions.
fn distribute(positions: &[Position], slots_per_team: SlotCount) -> PositionCapacity {
    let mut capacity = PositionCapacity::default();
    if slots_per_team <= 0 || positions.is_empty() {
        return capacity;
    }

    let mut remaining = slots_per_team;
    if positions.contains(&Position::Goalie) {
        capacity.slots.insert(Position::Goalie, 1);
        remaining -= 1;
    }

    let skaters: Vec<Position> = positions.iter()
        .copied()
        .filter(|p| *p != Position::Goalie)
        .collect();

    // Goalie-only layout: the leftover slots are dropped on purpose.
    if skaters.is_empty() {
        if remaining > 0 {
            tracing::warn!(remaining, "layout has no skater positions, leftover slots are not distributed");
        }
        return capacity;
    }

    let mut i = 0;
    while remaining > 0 {
        *capacity.slots.entry(skaters[i % skaters.len()]).or_insert(0) += 1;
        remaining -= 1;
        i += 1;
    }

    return capacity;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn four_on_four_with_goalie_nine_slots() {
        let capacity = capacity_for_mode(Some(MatchMode::FourOnFourWithGoalie), 9);
        let expected = BTreeMap::from([
            (Position::Goalie, 1),
            (Position::WingLeft, 2),
            (Position::WingRight, 2),
            (Position::DefenseLeft, 2),
            (Position::DefenseRight, 2),
        ]);
        assert_eq!(capacity.slots, expected);
        assert_eq!(capacity.for_category(PositionCategory::Forward), 4);
        assert_eq!(capacity.for_category(PositionCategory::Defense), 4);
        assert_eq!(capacity.for_category(PositionCategory::Goalie), 1);
    }

    #[test]
    fn sum_never_exceeds_slots() {
        for mode in MatchMode::ALL {
            let distinct = positions_for_mode(Some(mode)).len() as SlotCount;
            for n in -2..40 {
                let total = capacity_for_mode(Some(mode), n).total();
                assert!(total <= n.max(0), "{mode:?} with {n} slots gave {total}");
                if n >= distinct {
                    assert_eq!(total, n, "{mode:?} with {n} slots");
                }
            }
        }
    }

    #[test]
    fn goalie_gets_at_most_one_slot() {
        for mode in MatchMode::ALL {
            for n in 0..40 {
                let goalies = capacity_for_mode(Some(mode), n).get(Position::Goalie);
                assert!(goalies <= 1);
                if !mode.has_goalie() {
                    assert_eq!(goalies, 0);
                }
            }
        }
    }

    #[test]
    fn distribution_is_deterministic() {
        for mode in MatchMode::ALL {
            for n in 0..25 {
                assert_eq!(capacity_for_mode(Some(mode), n), capacity_for_mode(Some(mode), n));
            }
        }
    }

    #[test]
    fn leftovers_go_to_the_first_skater_positions() {
        let capacity = capacity_for_mode(Some(MatchMode::FiveOnFive), 7);
        assert_eq!(capacity.get(Position::Center), 2);
        assert_eq!(capacity.get(Position::WingLeft), 2);
        assert_eq!(capacity.get(Position::WingRight), 1);
        assert_eq!(capacity.get(Position::DefenseRight), 1);
    }

    #[test]
    fn too_few_slots_for_every_position() {
        let capacity = capacity_for_mode(Some(MatchMode::FourOnFourWithGoalie), 2);
        assert_eq!(capacity.get(Position::Goalie), 1);
        assert_eq!(capacity.get(Position::WingLeft), 1);
        assert_eq!(capacity.get(Position::WingRight), 0);
        assert_eq!(capacity.total(), 2);
    }

    #[test]
    fn no_slots_no_capacity() {
        assert!(capacity_for_mode(Some(MatchMode::FiveOnFive), 0).is_empty());
        assert!(capacity_for_mode(None, -3).is_empty());
        assert!(distribute(&[], 10).is_empty());
    }

    #[test]
    fn unset_mode_uses_default_layout() {
        assert_eq!(positions_for_mode(None), positions_for_mode(Some(MatchMode::FiveOnFiveWithGoalie)));
        assert_eq!(positions_for_mode(None)[0], Position::Goalie);
    }

    #[test]
    fn goalie_only_layout_keeps_leftovers_undistributed() {
        let capacity = distribute(&[Position::Goalie], 5);
        assert_eq!(capacity.get(Position::Goalie), 1);
        assert_eq!(capacity.total(), 1);
    }
}
