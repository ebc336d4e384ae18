use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// The only source of randomness in a battle.
pub trait Dice {
    /// True with probability `chance`.
    fn chance(&mut self, chance: f64) -> bool;

    /// Uniform integer in `0..=max`.
    fn roll(&mut self, max: u32) -> u32;
}

/// Dice backed by a seeded RNG. Same seed, same battle.
#[derive(Debug, Clone)]
pub struct SeededDice {
    rng: StdRng,
}

impl SeededDice {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Seeded from the thread RNG, for battles that need no replay.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_rng(&mut rand::rng()),
        }
    }
}

impl Dice for SeededDice {
    fn chance(&mut self, chance: f64) -> bool {
        self.rng.random::<f64>() < chance
    }

    fn roll(&mut self, max: u32) -> u32 {
        self.rng.random_range(0..=max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_rolls() {
        let mut a = SeededDice::new(7);
        let mut b = SeededDice::new(7);
        for _ in 0..100 {
            assert_eq!(a.roll(4), b.roll(4));
            assert_eq!(a.chance(0.5), b.chance(0.5));
        }
    }

    #[test]
    fn rolls_stay_in_range_and_hit_both_ends() {
        let mut dice = SeededDice::new(1);
        let rolls: Vec<u32> = (0..1000).map(|_| dice.roll(3)).collect();
        assert!(rolls.iter().all(|r| *r <= 3));
        assert!(rolls.contains(&0));
        assert!(rolls.contains(&3));
        assert_eq!(dice.roll(0), 0);
    }

    #[test]
    fn zero_and_certain_chances() {
        let mut dice = SeededDice::new(3);
        for _ in 0..100 {
            assert!(!dice.chance(0.0));
            assert!(dice.chance(1.0));
        }
    }
}
