use log::warn;
use serde::{Deserialize, Serialize};

/// Combat research levels of a player, expressed as chances in `0.0..=1.0`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct CombatResearch {
    pub attack: f64,
    pub defense: f64,
}

impl CombatResearch {
    pub fn new(attack: f64, defense: f64) -> Self {
        Self { attack, defense }
    }

    /// Clamp both chances into `0.0..=1.0`. Returns false if anything had to change.
    pub fn validate(&mut self) -> bool {
        let attack = clamp_chance(self.attack);
        let defense = clamp_chance(self.defense);
        let valid = attack == self.attack && defense == self.defense;
        if !valid {
            warn!("Research chance out of range: {:?}", self);
        }
        self.attack = attack;
        self.defense = defense;
        valid
    }
}

fn clamp_chance(chance: f64) -> f64 {
    if chance.is_nan() {
        0.0
    } else {
        chance.clamp(0.0, 1.0)
    }
}

/// 艦隊の所有者。
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Owner {
    pub player_id: u32,
    pub name: String,
    #[serde(default)]
    pub research: CombatResearch,
}

impl Owner {
    pub fn new(player_id: u32, name: impl Into<String>) -> Self {
        Self {
            player_id,
            name: name.into(),
            research: CombatResearch::default(),
        }
    }

    pub fn with_research(mut self, research: CombatResearch) -> Self {
        self.research = research;
        self
    }
}
