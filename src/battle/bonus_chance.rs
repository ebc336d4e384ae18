use serde::{Deserialize, Serialize};

use crate::fleet::Fleet;

/// Per-fleet chances, fixed for the whole battle, to add (attack) or
/// remove (defense) half a weapon's power on a shot.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BonusChance {
    pub attack: f64,
    pub defense: f64,
}

impl BonusChance {
    /// Research of the owner plus `home_advantage` when the fleet holds its
    /// position. Neutral fleets get nothing.
    pub fn for_fleet(fleet: &Fleet, home_advantage: f64) -> Self {
        let Some(owner) = fleet.owner() else {
            return Self::default();
        };
        let home = if fleet.location_hex().is_some() {
            home_advantage
        } else {
            0.0
        };
        Self {
            attack: owner.research.attack + home,
            defense: owner.research.defense + home,
        }
    }
}
