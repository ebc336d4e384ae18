use serde::{Deserialize, Serialize};

use crate::fleet::ship_id::ShipId;
use crate::fleet::starship_type::StarshipType;

/// Advantage/disadvantage pair chosen when a custom ship design is researched.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CustomMatchup {
    pub advantage_against: StarshipType,
    pub disadvantage_against: StarshipType,
}

/// Result of walking the experience ladder.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Level {
    pub level: u32,
    /// Total experience needed to reach `level + 1`.
    pub next_level_exp_requirement: u64,
}

/// 戦闘単位となる艦船。
///
/// `health` is the ship's combat strength and is the only value that changes
/// during a battle. Experience is only ever earned by dealing damage and is
/// handed out by the battle after it ends.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Starship {
    id: ShipId,
    ship_type: StarshipType,
    #[serde(default)]
    custom: Option<CustomMatchup>,
    health: u32,
    #[serde(default)]
    experience: u32,
}

impl Starship {
    /// A fresh ship at full health with no experience.
    pub fn new(id: ShipId, ship_type: StarshipType) -> Self {
        Self {
            id,
            ship_type,
            custom: None,
            health: ship_type.base_strength(),
            experience: 0,
        }
    }

    pub fn new_custom(id: ShipId, ship_type: StarshipType, matchup: CustomMatchup) -> Self {
        Self {
            custom: Some(matchup),
            ..Self::new(id, ship_type)
        }
    }

    /// Set experience. Health is re-clamped since max strength depends on level.
    pub fn with_experience(mut self, experience: u32) -> Self {
        self.experience = experience;
        self.clamp_health();
        self
    }

    /// Set current health, clamped to `0..=max_strength()`.
    pub fn with_health(mut self, health: u32) -> Self {
        self.health = health;
        self.clamp_health();
        self
    }

    // -- attributes --
    pub fn id(&self) -> ShipId {
        self.id
    }
    pub fn ship_type(&self) -> StarshipType {
        self.ship_type
    }
    pub fn is_custom(&self) -> bool {
        self.custom.is_some()
    }
    pub fn base_strength(&self) -> u32 {
        self.ship_type.base_strength()
    }
    pub fn experience(&self) -> u32 {
        self.experience
    }

    pub fn advantage_against(&self) -> Option<StarshipType> {
        match self.custom {
            Some(m) => Some(m.advantage_against),
            None => self.ship_type.advantage_against(),
        }
    }

    pub fn disadvantage_against(&self) -> Option<StarshipType> {
        match self.custom {
            Some(m) => Some(m.disadvantage_against),
            None => self.ship_type.disadvantage_against(),
        }
    }

    /// Space platforms are advantaged against everything and nothing is
    /// advantaged against a space platform.
    pub fn has_advantage_over(&self, target: &Starship) -> bool {
        if self.ship_type == StarshipType::SpacePlatform {
            return true;
        }
        if target.ship_type == StarshipType::SpacePlatform {
            return false;
        }
        self.advantage_against() == Some(target.ship_type)
    }

    pub fn has_disadvantage_against(&self, target: &Starship) -> bool {
        if self.ship_type == StarshipType::SpacePlatform {
            return false;
        }
        if target.ship_type == StarshipType::SpacePlatform {
            return true;
        }
        self.disadvantage_against() == Some(target.ship_type)
    }

    // -- strength --
    /// Current combat strength.
    pub fn strength(&self) -> u32 {
        self.health
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn max_strength(&self) -> u32 {
        self.base_strength() + Self::level_bonus(self.base_strength(), self.level().level)
    }

    // Linear for the first two levels, then logarithmic so that level 9
    // lands on roughly double the base strength.
    fn level_bonus(base_strength: u32, level: u32) -> u32 {
        let base = base_strength as f64;
        let bonus = if level <= 2 {
            (level as f64 * base / 8.0).round()
        } else {
            let b = 9.0_f64.powf(1.0 / base);
            ((level as f64).ln() / b.ln()).round()
        };
        bonus.max(0.0) as u32
    }

    pub fn level(&self) -> Level {
        let experience = self.experience as u64;
        let mut requirement = (self.base_strength() as u64 / 2).max(1);
        let mut level = 0;
        while experience >= requirement {
            level += 1;
            requirement = requirement + requirement + (requirement + 1) / 2;
        }
        Level {
            level,
            next_level_exp_requirement: requirement,
        }
    }

    // -- mutation --
    /// Reduce health by at most `amount`; returns the damage actually inflicted.
    pub fn damage(&mut self, amount: u32) -> u32 {
        let inflicted = amount.min(self.health);
        self.health -= inflicted;
        inflicted
    }

    /// Restore up to `max_to_repair` health, never past `max_strength()`.
    pub fn repair(&mut self, max_to_repair: u32) -> u32 {
        let missing = self.max_strength().saturating_sub(self.health);
        let repaired = missing.min(max_to_repair);
        self.health += repaired;
        repaired
    }

    pub fn award_experience(&mut self, amount: u32) {
        self.experience = self.experience.saturating_add(amount);
    }

    /// Pull health back under `max_strength()`. Returns true if it had to.
    pub fn clamp_health(&mut self) -> bool {
        let max = self.max_strength();
        if self.health > max {
            self.health = max;
            true
        } else {
            false
        }
    }
}
