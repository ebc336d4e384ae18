use serde::{Deserialize, Serialize};

use crate::error::CombatError;

/// 艦種を表す列挙型。
/// Each type has a fixed base strength and sits in the advantage cycle
/// SystemDefense -> Battleship -> Cruiser -> Destroyer -> Scout -> SystemDefense.
/// SpacePlatform is outside the cycle.
#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum StarshipType {
    #[default]
    SystemDefense,
    Scout,
    Destroyer,
    Cruiser,
    Battleship,
    SpacePlatform,
}

impl StarshipType {
    /// Order used whenever a fleet lists its ships: heaviest first.
    pub const PRIORITY: [StarshipType; 6] = [
        StarshipType::SpacePlatform,
        StarshipType::Battleship,
        StarshipType::Cruiser,
        StarshipType::Destroyer,
        StarshipType::Scout,
        StarshipType::SystemDefense,
    ];

    pub const fn base_strength(self) -> u32 {
        match self {
            StarshipType::SystemDefense => 2,
            StarshipType::Scout => 4,
            StarshipType::Destroyer => 8,
            StarshipType::Cruiser => 16,
            StarshipType::Battleship => 32,
            StarshipType::SpacePlatform => 64,
        }
    }

    /// The type this one has an advantage over. `None` for SpacePlatform,
    /// which is treated as advantaged against everything in combat.
    pub const fn advantage_against(self) -> Option<StarshipType> {
        match self {
            StarshipType::SystemDefense => Some(StarshipType::Battleship),
            StarshipType::Scout => Some(StarshipType::SystemDefense),
            StarshipType::Destroyer => Some(StarshipType::Scout),
            StarshipType::Cruiser => Some(StarshipType::Destroyer),
            StarshipType::Battleship => Some(StarshipType::Cruiser),
            StarshipType::SpacePlatform => None,
        }
    }

    /// The type this one is disadvantaged against.
    pub const fn disadvantage_against(self) -> Option<StarshipType> {
        match self {
            StarshipType::SystemDefense => Some(StarshipType::Scout),
            StarshipType::Scout => Some(StarshipType::Destroyer),
            StarshipType::Destroyer => Some(StarshipType::Cruiser),
            StarshipType::Cruiser => Some(StarshipType::Battleship),
            StarshipType::Battleship => Some(StarshipType::SystemDefense),
            StarshipType::SpacePlatform => None,
        }
    }

    /// SystemDefense and SpacePlatform cannot leave their system.
    pub const fn is_mobile(self) -> bool {
        !matches!(
            self,
            StarshipType::SystemDefense | StarshipType::SpacePlatform
        )
    }
}

impl std::fmt::Display for StarshipType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            StarshipType::SystemDefense => "System Defense",
            StarshipType::Scout => "Scout",
            StarshipType::Destroyer => "Destroyer",
            StarshipType::Cruiser => "Cruiser",
            StarshipType::Battleship => "Battleship",
            StarshipType::SpacePlatform => "Space Platform",
        };
        write!(f, "{}", s)
    }
}

impl std::str::FromStr for StarshipType {
    type Err = CombatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "system_defense" => Ok(StarshipType::SystemDefense),
            "scout" => Ok(StarshipType::Scout),
            "destroyer" => Ok(StarshipType::Destroyer),
            "cruiser" => Ok(StarshipType::Cruiser),
            "battleship" => Ok(StarshipType::Battleship),
            "space_platform" => Ok(StarshipType::SpacePlatform),
            other => Err(CombatError::UnknownStarshipType(other.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CYCLE: [StarshipType; 5] = [
        StarshipType::SystemDefense,
        StarshipType::Scout,
        StarshipType::Destroyer,
        StarshipType::Cruiser,
        StarshipType::Battleship,
    ];

    #[test]
    fn advantage_is_mirrored_by_disadvantage() {
        for x in CYCLE {
            for y in CYCLE {
                if x == y {
                    continue;
                }
                if x.advantage_against() == Some(y) {
                    assert_eq!(y.disadvantage_against(), Some(x), "{x} over {y}");
                    assert_ne!(x.disadvantage_against(), Some(y));
                }
            }
        }
    }

    #[test]
    fn every_cycle_type_has_exactly_one_advantage_and_disadvantage() {
        for x in CYCLE {
            let adv = CYCLE
                .iter()
                .filter(|y| x.advantage_against() == Some(**y))
                .count();
            let dis = CYCLE
                .iter()
                .filter(|y| x.disadvantage_against() == Some(**y))
                .count();
            assert_eq!((adv, dis), (1, 1), "{x}");
        }
    }

    #[test]
    fn base_strength_doubles_per_type() {
        let strengths = CYCLE.map(|t| t.base_strength());
        assert_eq!(strengths, [2, 4, 8, 16, 32]);
        assert_eq!(StarshipType::SpacePlatform.base_strength(), 64);
    }

    #[test]
    fn parse_rejects_unknown_names() {
        assert_eq!("cruiser".parse::<StarshipType>().ok(), Some(StarshipType::Cruiser));
        assert!("frigate".parse::<StarshipType>().is_err());
    }

    #[test]
    fn only_four_types_are_mobile() {
        let mobile = StarshipType::PRIORITY
            .iter()
            .filter(|t| t.is_mobile())
            .count();
        assert_eq!(mobile, 4);
    }
}
