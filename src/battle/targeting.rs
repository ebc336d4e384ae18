use crate::battle::pending_damage::PendingDamage;
use crate::fleet::Starship;

pub const ADVANTAGE_WEIGHT: u64 = 1;
pub const NEUTRAL_WEIGHT: u64 = 100;
pub const DISADVANTAGE_WEIGHT: u64 = 10_000;

/// Multiplier applied to a candidate's remaining strength. Lower is preferred.
pub fn target_weight(shooter: &Starship, candidate: &Starship) -> u64 {
    if shooter.has_advantage_over(candidate) {
        ADVANTAGE_WEIGHT
    } else if shooter.has_disadvantage_against(candidate) {
        DISADVANTAGE_WEIGHT
    } else {
        NEUTRAL_WEIGHT
    }
}

/// Strength a ship has left once this round's queued damage lands.
pub fn remaining_strength(ship: &Starship, pending: &PendingDamage) -> u32 {
    ship.strength().saturating_sub(pending.pending_for(ship.id()))
}

// ターゲット選択
/// Pick the enemy `shooter` should fire at next.
///
/// Enemies already queued for lethal damage this round are skipped. The rest
/// are keyed by remaining strength times [`target_weight`]; the smallest key
/// wins and ties go to the enemy listed first.
pub fn select_target<'a>(
    shooter: &Starship,
    enemies: &[&'a Starship],
    pending: &PendingDamage,
) -> Option<&'a Starship> {
    enemies
        .iter()
        .filter_map(|enemy| {
            let remaining = remaining_strength(enemy, pending);
            (remaining > 0).then_some((*enemy, remaining))
        })
        .min_by_key(|(enemy, remaining)| *remaining as u64 * target_weight(shooter, enemy))
        .map(|(enemy, _)| enemy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fleet::{ShipId, StarshipType};

    fn ship(id: u64, ship_type: StarshipType) -> Starship {
        Starship::new(ShipId(id), ship_type)
    }

    #[test]
    fn prefers_advantage_then_weakest_neutral_then_disadvantage() {
        // destroyer: advantage over scouts, disadvantage against cruisers
        let destroyer = ship(1, StarshipType::Destroyer);
        let cruiser = ship(10, StarshipType::Cruiser).with_health(1);
        let battleship = ship(11, StarshipType::Battleship);
        let defense = ship(12, StarshipType::SystemDefense);
        let scout = ship(13, StarshipType::Scout);
        let enemies = [&cruiser, &battleship, &defense, &scout];

        let mut pending = PendingDamage::new();
        assert_eq!(select_target(&destroyer, &enemies, &pending).map(|s| s.id()), Some(scout.id()));

        pending.add(scout.id(), destroyer.id(), 4);
        assert_eq!(select_target(&destroyer, &enemies, &pending).map(|s| s.id()), Some(defense.id()));

        pending.add(defense.id(), destroyer.id(), 2);
        assert_eq!(
            select_target(&destroyer, &enemies, &pending).map(|s| s.id()),
            Some(battleship.id())
        );

        pending.add(battleship.id(), destroyer.id(), 32);
        assert_eq!(select_target(&destroyer, &enemies, &pending).map(|s| s.id()), Some(cruiser.id()));

        pending.add(cruiser.id(), destroyer.id(), 1);
        assert!(select_target(&destroyer, &enemies, &pending).is_none());
    }

    #[test]
    fn partially_damaged_target_stays_eligible() {
        let scout = ship(1, StarshipType::Scout);
        let enemy = ship(2, StarshipType::Scout);
        let mut pending = PendingDamage::new();
        pending.add(enemy.id(), scout.id(), 3);
        assert_eq!(remaining_strength(&enemy, &pending), 1);
        assert!(select_target(&scout, &[&enemy], &pending).is_some());
    }

    #[test]
    fn space_platform_picks_weakest_enemy() {
        let platform = ship(1, StarshipType::SpacePlatform);
        let cruiser = ship(2, StarshipType::Cruiser);
        let scout = ship(3, StarshipType::Scout);
        let enemies = [&cruiser, &scout];
        let pending = PendingDamage::new();
        assert_eq!(target_weight(&platform, &cruiser), ADVANTAGE_WEIGHT);
        assert_eq!(select_target(&platform, &enemies, &pending).map(|s| s.id()), Some(scout.id()));
    }

    #[test]
    fn ties_go_to_first_listed() {
        let scout = ship(1, StarshipType::Scout);
        let a = ship(2, StarshipType::Scout);
        let b = ship(3, StarshipType::Scout);
        let pending = PendingDamage::new();
        assert_eq!(select_target(&scout, &[&a, &b], &pending).map(|s| s.id()), Some(a.id()));
    }
}
