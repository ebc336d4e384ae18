use serde::{Deserialize, Serialize};

use crate::battle::{BattleResolution, Side};
use crate::fleet::{Fleet, ShipId, Starship, StarshipType};

/// 艦船の状態を保持するスナップショット構造体。
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ShipSnapshot {
    pub id: ShipId,
    pub ship_type: StarshipType,
    pub health: u32,
    pub max_strength: u32,
    pub experience: u32,
    pub level: u32,
}

impl From<&Starship> for ShipSnapshot {
    fn from(ship: &Starship) -> Self {
        Self {
            id: ship.id(),
            ship_type: ship.ship_type(),
            health: ship.strength(),
            max_strength: ship.max_strength(),
            experience: ship.experience(),
            level: ship.level().level,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FleetSnapshot {
    pub owner_name: Option<String>,
    pub strength: u32,
    pub ships: Vec<ShipSnapshot>,
}

impl From<&Fleet> for FleetSnapshot {
    fn from(fleet: &Fleet) -> Self {
        Self {
            owner_name: fleet.owner().map(|o| o.name.clone()),
            strength: fleet.determine_fleet_strength(false),
            ships: fleet
                .starships(false)
                .into_iter()
                .map(ShipSnapshot::from)
                .collect(),
        }
    }
}

/// 戦闘結果をフロントエンドに返すための構造体。
/// Built by the caller from snapshots taken before and after the battle.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BattleReport {
    pub winner: Option<Side>,
    pub rounds: u32,
    pub before: [FleetSnapshot; 2],
    pub after: [FleetSnapshot; 2],
}

impl BattleReport {
    pub fn new(
        before: [FleetSnapshot; 2],
        resolution: BattleResolution,
        after: [FleetSnapshot; 2],
    ) -> Self {
        Self {
            winner: resolution.winner,
            rounds: resolution.rounds,
            before,
            after,
        }
    }

    pub fn snapshot(first: &Fleet, second: &Fleet) -> [FleetSnapshot; 2] {
        [first.into(), second.into()]
    }

    /// Strength lost by each side.
    pub fn strength_lost(&self) -> [u32; 2] {
        [0, 1].map(|i| self.before[i].strength.saturating_sub(self.after[i].strength))
    }

    /// Experience the winner's survivors gained in this battle.
    pub fn experience_gained(&self) -> u32 {
        let Some(winner) = self.winner else {
            return 0;
        };
        let i = match winner {
            Side::First => 0,
            Side::Second => 1,
        };
        self.after[i]
            .ships
            .iter()
            .map(|after| {
                let before = self.before[i]
                    .ships
                    .iter()
                    .find(|b| b.id == after.id)
                    .map_or(0, |b| b.experience);
                after.experience.saturating_sub(before)
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fleet::{ShipCounts, ShipIdAllocator};

    #[test]
    fn experience_gained_compares_snapshots() {
        let mut ids = ShipIdAllocator::new();
        let mut fleet = Fleet::generate(
            None,
            None,
            &ShipCounts {
                cruisers: 1,
                ..Default::default()
            },
            &mut ids,
        );
        let empty = Fleet::default();
        let before = BattleReport::snapshot(&fleet, &empty);
        for ship in fleet.starships_mut() {
            ship.award_experience(9);
            ship.damage(3);
        }
        let report = BattleReport::new(
            before,
            BattleResolution {
                winner: Some(Side::First),
                rounds: 2,
            },
            BattleReport::snapshot(&fleet, &empty),
        );
        assert_eq!(report.experience_gained(), 9);
        assert_eq!(report.strength_lost(), [3, 0]);
        assert_eq!(report.after[0].ships[0].level, 1);
    }
}
