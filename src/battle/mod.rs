pub mod battle_log;
pub mod battle_report;
mod bonus_chance;
mod dice;
mod pending_damage;
pub mod targeting;

pub use battle_log::{ActionLog, BattleLog, ShotLog};
pub use battle_report::{BattleReport, FleetSnapshot, ShipSnapshot};
pub use bonus_chance::BonusChance;
pub use dice::{Dice, SeededDice};
pub use pending_damage::{ExperienceLedger, PendingDamage, PendingHit};

use log::{error, warn};
use serde::{Deserialize, Serialize};

use crate::error::{CombatError, Result};
use crate::fleet::{Fleet, Starship};
use targeting::select_target;

/// Damage one gun can do on a neutral shot. Also the strength needed per gun.
pub const WEAPON_POWER: u32 = 2;
pub const WEAPON_POWER_HALF: u32 = WEAPON_POWER / 2;

/// Which of the two fleets handed to the simulator.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    First,
    Second,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::First => Side::Second,
            Side::Second => Side::First,
        }
    }

    fn index(self) -> usize {
        match self {
            Side::First => 0,
            Side::Second => 1,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct BattleConfig {
    /// Rounds after which the battle is aborted with an error.
    pub max_rounds: u32,
    /// Added to both bonus chances of an owned fleet holding its hex.
    pub home_advantage: f64,
    /// Buffer an action log for `flush_logs_debug`.
    pub logging: bool,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            max_rounds: 10_000,
            home_advantage: 0.05,
            logging: false,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BattleResolution {
    pub winner: Option<Side>,
    pub rounds: u32,
}

/// Resolve a battle between two fleets with the default configuration.
///
/// Both fleets are changed in place: dead ships are removed, survivors keep
/// their damage and the winner's survivors receive the experience they earned.
/// `None` means both fleets were destroyed and neither held the hex.
pub fn simulate_fleet_battle<D: Dice + ?Sized>(
    first: &mut Fleet,
    second: &mut Fleet,
    dice: &mut D,
) -> Result<Option<Side>> {
    let config = BattleConfig::default();
    let mut battle = FleetBattle::new(first, second, dice, &config);
    battle.run().map(|resolution| resolution.winner)
}

// 戦闘の進行を管理する構造体
pub struct FleetBattle<'a, D: Dice + ?Sized> {
    first: &'a mut Fleet,
    second: &'a mut Fleet,
    dice: &'a mut D,
    max_rounds: u32,
    bonus: [BonusChance; 2],
    experience: [ExperienceLedger; 2],
    rounds: u32,
    pub log: BattleLog,
}

impl<'a, D: Dice + ?Sized> FleetBattle<'a, D> {
    pub fn new(
        first: &'a mut Fleet,
        second: &'a mut Fleet,
        dice: &'a mut D,
        config: &BattleConfig,
    ) -> Self {
        let bonus = [
            BonusChance::for_fleet(first, config.home_advantage),
            BonusChance::for_fleet(second, config.home_advantage),
        ];
        Self {
            first,
            second,
            dice,
            max_rounds: config.max_rounds,
            bonus,
            experience: [ExperienceLedger::new(), ExperienceLedger::new()],
            rounds: 0,
            log: BattleLog::new(config.logging),
        }
    }

    // -- API --
    pub fn strengths(&self) -> [u32; 2] {
        [
            self.first.determine_fleet_strength(false),
            self.second.determine_fleet_strength(false),
        ]
    }

    pub fn bonus_chance(&self, side: Side) -> BonusChance {
        self.bonus[side.index()]
    }

    pub fn experience(&self, side: Side) -> &ExperienceLedger {
        &self.experience[side.index()]
    }

    /// Fight rounds until one side has no strength left.
    pub fn run(&mut self) -> Result<BattleResolution> {
        let strength = self.strengths();
        if strength.contains(&0) {
            warn!(
                "Battle started with an empty fleet: strength {} vs {}",
                strength[0], strength[1]
            );
        }
        self.log.push(ActionLog::BattleStart { strength });

        loop {
            let strength = self.strengths();
            if strength.contains(&0) {
                break;
            }
            if self.rounds >= self.max_rounds {
                error!(
                    "Battle still undecided after {} rounds: strength {} vs {}",
                    self.rounds, strength[0], strength[1]
                );
                return Err(CombatError::RoundLimitExceeded {
                    rounds: self.rounds,
                });
            }
            self.rounds += 1;
            self.log.push(ActionLog::RoundStart {
                round: self.rounds,
                strength,
            });
            self.fight_round();
        }

        let winner = self.winner();
        if let Some(side) = winner {
            self.award_experience(side);
        }
        self.log.push(ActionLog::Outcome {
            winner,
            rounds: self.rounds,
        });
        Ok(BattleResolution {
            winner,
            rounds: self.rounds,
        })
    }

    /// Both sides fire from the state at the start of the round, then all
    /// damage lands at once and the dead are removed.
    fn fight_round(&mut self) {
        let (on_second, on_first) = {
            let first_ships = self.first.starships(false);
            let second_ships = self.second.starships(false);
            let on_second = fire_volley(
                Side::First,
                &first_ships,
                &second_ships,
                self.bonus[0].attack,
                self.bonus[1].defense,
                &mut *self.dice,
                &mut self.log,
            );
            let on_first = fire_volley(
                Side::Second,
                &second_ships,
                &first_ships,
                self.bonus[1].attack,
                self.bonus[0].defense,
                &mut *self.dice,
                &mut self.log,
            );
            (on_second, on_first)
        };

        on_second.apply(self.second, &mut self.experience[0]);
        on_first.apply(self.first, &mut self.experience[1]);

        self.log.push_destroyed(Side::First, &self.first.starships(false));
        self.log.push_destroyed(Side::Second, &self.second.starships(false));
        self.first.reduce_fleet();
        self.second.reduce_fleet();
    }

    /// Decide the outcome once at least one side is out of strength.
    fn winner(&self) -> Option<Side> {
        match self.strengths() {
            [0, 0] => {
                // Whoever held the hex keeps it.
                match (
                    self.first.location_hex().is_some(),
                    self.second.location_hex().is_some(),
                ) {
                    (true, false) => Some(Side::First),
                    (false, true) => Some(Side::Second),
                    _ => None,
                }
            }
            [0, _] => Some(Side::Second),
            [_, 0] => Some(Side::First),
            _ => None,
        }
    }

    fn award_experience(&mut self, winner: Side) {
        let fleet = match winner {
            Side::First => &mut *self.first,
            Side::Second => &mut *self.second,
        };
        self.experience[winner.index()].award(fleet);
    }

    pub fn flush_logs_debug(&mut self) {
        self.log.flush_logs_debug();
    }
}

/// Every ship of `side` fires at `targets`. Returns the damage queued on them.
fn fire_volley<D: Dice + ?Sized>(
    side: Side,
    shooters: &[&Starship],
    targets: &[&Starship],
    attack_bonus_chance: f64,
    defense_bonus_chance: f64,
    dice: &mut D,
    log: &mut BattleLog,
) -> PendingDamage {
    let mut pending = PendingDamage::new();
    for ship in shooters {
        starship_fire_weapons(
            side,
            ship,
            targets,
            attack_bonus_chance,
            defense_bonus_chance,
            &mut pending,
            dice,
            log,
        );
    }
    pending
}

/// Number of shots a ship fires per round. A ship at 1 health has none.
pub fn guns(ship: &Starship) -> u32 {
    ship.strength() / WEAPON_POWER
}

/// One shot per gun, each at the best target still standing.
#[allow(clippy::too_many_arguments)]
fn starship_fire_weapons<D: Dice + ?Sized>(
    side: Side,
    ship: &Starship,
    targets: &[&Starship],
    attack_bonus_chance: f64,
    defense_bonus_chance: f64,
    pending: &mut PendingDamage,
    dice: &mut D,
    log: &mut BattleLog,
) {
    for _ in 0..guns(ship) {
        let Some(target) = select_target(ship, targets, pending) else {
            break;
        };
        let max_damage = max_damage(
            ship,
            target,
            attack_bonus_chance,
            defense_bonus_chance,
            dice,
        );
        let damage = dice.roll(max_damage);
        log.push(ActionLog::Shot(ShotLog {
            side,
            shooter: ship.id(),
            target: target.id(),
            max_damage,
            damage,
        }));
        if damage > 0 {
            pending.add(target.id(), ship.id(), damage);
        }
    }
}

/// Upper bound of one shot's damage roll.
pub fn max_damage<D: Dice + ?Sized>(
    shooter: &Starship,
    target: &Starship,
    attack_bonus_chance: f64,
    defense_bonus_chance: f64,
    dice: &mut D,
) -> u32 {
    let mut bonus = 0;
    let mut malus = 0;
    if dice.chance(attack_bonus_chance) {
        bonus += WEAPON_POWER_HALF;
    }
    if dice.chance(defense_bonus_chance) {
        malus += WEAPON_POWER_HALF;
    }
    if shooter.has_advantage_over(target) {
        bonus += WEAPON_POWER_HALF;
    }
    if shooter.has_disadvantage_against(target) {
        malus += WEAPON_POWER_HALF;
    }
    (WEAPON_POWER + bonus).saturating_sub(malus)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fleet::{ShipId, StarshipType};

    /// Never grants a bonus chance and always rolls the maximum.
    struct MaxDice;

    impl Dice for MaxDice {
        fn chance(&mut self, _chance: f64) -> bool {
            false
        }
        fn roll(&mut self, max: u32) -> u32 {
            max
        }
    }

    /// Every bonus chance succeeds.
    struct LuckyDice;

    impl Dice for LuckyDice {
        fn chance(&mut self, _chance: f64) -> bool {
            true
        }
        fn roll(&mut self, max: u32) -> u32 {
            max
        }
    }

    fn ship(id: u64, ship_type: StarshipType) -> Starship {
        Starship::new(ShipId(id), ship_type)
    }

    #[test]
    fn max_damage_modifiers() {
        let scout = ship(1, StarshipType::Scout);
        let defense = ship(2, StarshipType::SystemDefense);
        let destroyer = ship(3, StarshipType::Destroyer);
        let cruiser = ship(4, StarshipType::Cruiser);

        assert_eq!(max_damage(&scout, &cruiser, 0.0, 0.0, &mut MaxDice), 2);
        assert_eq!(max_damage(&scout, &defense, 0.0, 0.0, &mut MaxDice), 3);
        assert_eq!(max_damage(&scout, &destroyer, 0.0, 0.0, &mut MaxDice), 1);
        // attack and defense bonus cancel out
        assert_eq!(max_damage(&scout, &defense, 1.0, 1.0, &mut LuckyDice), 3);
        assert_eq!(max_damage(&scout, &destroyer, 1.0, 1.0, &mut LuckyDice), 1);
    }

    #[test]
    fn guns_follow_current_strength() {
        let battleship = ship(1, StarshipType::Battleship).with_health(7);
        let target = ship(2, StarshipType::SpacePlatform);
        let mut pending = PendingDamage::new();
        let mut log = BattleLog::new(true);
        starship_fire_weapons(
            Side::First,
            &battleship,
            &[&target],
            0.0,
            0.0,
            &mut pending,
            &mut MaxDice,
            &mut log,
        );
        // 3 guns, disadvantaged against the platform: 1 damage each
        assert_eq!(log.entries().len(), 3);
        assert_eq!(pending.pending_for(target.id()), 3);
    }

    #[test]
    fn crippled_ship_cannot_fire() {
        assert_eq!(guns(&ship(1, StarshipType::Scout).with_health(1)), 0);
        assert_eq!(guns(&ship(2, StarshipType::Scout).with_health(3)), 1);
        assert_eq!(guns(&ship(2, StarshipType::Scout)), 2);
        let mut dead = ship(3, StarshipType::Scout);
        dead.damage(4);
        assert_eq!(guns(&dead), 0);
    }

    #[test]
    fn shooting_stops_when_every_target_is_doomed() {
        let cruiser = ship(1, StarshipType::Cruiser);
        let scout = ship(2, StarshipType::Scout);
        let mut pending = PendingDamage::new();
        let mut log = BattleLog::new(true);
        starship_fire_weapons(
            Side::First,
            &cruiser,
            &[&scout],
            0.0,
            0.0,
            &mut pending,
            &mut MaxDice,
            &mut log,
        );
        assert_eq!(log.entries().len(), 2);
        assert_eq!(pending.pending_for(scout.id()), 4);
    }

    #[test]
    fn side_other() {
        assert_eq!(Side::First.other(), Side::Second);
        assert_eq!(Side::Second.other(), Side::First);
    }
}
