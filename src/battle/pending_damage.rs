use std::collections::BTreeMap;

use crate::fleet::{Fleet, ShipId};

/// Damage queued on one target during a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingHit {
    pub damage: u32,
    /// Ship credited with the experience for the whole `damage`.
    /// The last shooter to add damage wins.
    pub source: ShipId,
}

/// Damage dealt during one round, applied only once both sides have fired.
/// A ledger lives for exactly one round and is consumed by [`PendingDamage::apply`].
#[derive(Debug, Clone, Default)]
pub struct PendingDamage {
    hits: BTreeMap<ShipId, PendingHit>,
}

impl PendingDamage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending_for(&self, target: ShipId) -> u32 {
        self.hits.get(&target).map_or(0, |h| h.damage)
    }

    pub fn hit(&self, target: ShipId) -> Option<&PendingHit> {
        self.hits.get(&target)
    }

    pub fn add(&mut self, target: ShipId, source: ShipId, damage: u32) {
        let hit = self.hits.entry(target).or_insert(PendingHit { damage: 0, source });
        hit.damage += damage;
        hit.source = source;
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    pub fn total(&self) -> u32 {
        self.hits.values().map(|h| h.damage).sum()
    }

    /// Damage the targets in `fleet` and credit the inflicted amount (not the
    /// queued amount) to each source. Returns the total inflicted.
    pub fn apply(self, fleet: &mut Fleet, experience: &mut ExperienceLedger) -> u32 {
        let mut inflicted_total = 0;
        for (target, hit) in self.hits {
            let Some(ship) = fleet.starship_mut(target) else {
                continue;
            };
            let inflicted = ship.damage(hit.damage);
            experience.record(hit.source, inflicted);
            inflicted_total += inflicted;
        }
        inflicted_total
    }
}

/// Experience earned per shooter over the whole battle.
#[derive(Debug, Clone, Default)]
pub struct ExperienceLedger {
    earned: BTreeMap<ShipId, u32>,
}

impl ExperienceLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, source: ShipId, amount: u32) {
        if amount == 0 {
            return;
        }
        *self.earned.entry(source).or_insert(0) += amount;
    }

    pub fn earned(&self, source: ShipId) -> u32 {
        self.earned.get(&source).copied().unwrap_or(0)
    }

    /// Give every surviving ship of `fleet` what it earned. Returns the total awarded.
    pub fn award(&self, fleet: &mut Fleet) -> u32 {
        let mut awarded = 0;
        for ship in fleet.starships_mut() {
            let earned = self.earned(ship.id());
            if earned > 0 {
                ship.award_experience(earned);
                awarded += earned;
            }
        }
        awarded
    }
}
