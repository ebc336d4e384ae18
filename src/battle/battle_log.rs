use itertools::Itertools;
use log::debug;

use crate::battle::Side;
use crate::fleet::{ShipId, Starship, StarshipType};

/// Events buffered during a battle and flushed in one `debug!` block.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionLog {
    BattleStart {
        strength: [u32; 2],
    },
    RoundStart {
        round: u32,
        strength: [u32; 2],
    },
    Shot(ShotLog),
    Destroyed {
        side: Side,
        ship: ShipId,
        ship_type: StarshipType,
    },
    Outcome {
        winner: Option<Side>,
        rounds: u32,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShotLog {
    pub side: Side,
    pub shooter: ShipId,
    pub target: ShipId,
    pub max_damage: u32,
    pub damage: u32,
}

impl std::fmt::Display for ActionLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActionLog::BattleStart { strength } => {
                write!(f, "=== Battle start === strength {} vs {}", strength[0], strength[1])
            }
            ActionLog::RoundStart { round, strength } => {
                write!(f, "-- Round {round} -- strength {} vs {}", strength[0], strength[1])
            }
            ActionLog::Shot(shot) => write!(
                f,
                "{:?} \t| {} -> {} \t| max={} dmg={}",
                shot.side, shot.shooter, shot.target, shot.max_damage, shot.damage
            ),
            ActionLog::Destroyed {
                side,
                ship,
                ship_type,
            } => write!(f, "{side:?} {ship_type} {ship} destroyed"),
            ActionLog::Outcome { winner, rounds } => match winner {
                Some(side) => write!(f, "=== {side:?} wins after {rounds} rounds ==="),
                None => write!(f, "=== No contest after {rounds} rounds ==="),
            },
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct BattleLog {
    enabled: bool,
    entries: Vec<ActionLog>,
}

impl BattleLog {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            entries: Vec::new(),
        }
    }

    pub fn push(&mut self, log: ActionLog) {
        if self.enabled {
            self.entries.push(log);
        }
    }

    /// Record every ship of `ships` that has no strength left.
    pub fn push_destroyed(&mut self, side: Side, ships: &[&Starship]) {
        for ship in ships.iter().filter(|s| !s.is_alive()) {
            self.push(ActionLog::Destroyed {
                side,
                ship: ship.id(),
                ship_type: ship.ship_type(),
            });
        }
    }

    pub fn entries(&self) -> &[ActionLog] {
        &self.entries
    }

    // ログをまとめてdebug出力してバッファをクリア
    pub fn flush_logs_debug(&mut self) {
        if !self.entries.is_empty() {
            debug!("\n{}", self.entries.iter().join("\n"));
            self.entries.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_log_keeps_nothing() {
        let mut log = BattleLog::new(false);
        log.push(ActionLog::RoundStart {
            round: 1,
            strength: [1, 1],
        });
        assert!(log.entries().is_empty());
    }

    #[test]
    fn flush_empties_the_buffer() {
        let mut log = BattleLog::new(true);
        log.push(ActionLog::Outcome {
            winner: Some(Side::First),
            rounds: 3,
        });
        assert_eq!(
            log.entries()[0].to_string(),
            "=== First wins after 3 rounds ==="
        );
        log.flush_logs_debug();
        assert!(log.entries().is_empty());
    }
}
