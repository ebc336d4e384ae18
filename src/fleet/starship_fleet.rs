use std::collections::BTreeMap;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::fleet::owner::Owner;
use crate::fleet::position::{FleetPosition, HexId};
use crate::fleet::ship_id::{ShipId, ShipIdAllocator};
use crate::fleet::starship::Starship;
use crate::fleet::starship_type::StarshipType;

/// Number of ships per type, used to build and describe fleets.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct ShipCounts {
    pub system_defense: usize,
    pub scouts: usize,
    pub destroyers: usize,
    pub cruisers: usize,
    pub battleships: usize,
    pub space_platforms: usize,
}

impl ShipCounts {
    pub fn get(&self, ship_type: StarshipType) -> usize {
        match ship_type {
            StarshipType::SystemDefense => self.system_defense,
            StarshipType::Scout => self.scouts,
            StarshipType::Destroyer => self.destroyers,
            StarshipType::Cruiser => self.cruisers,
            StarshipType::Battleship => self.battleships,
            StarshipType::SpacePlatform => self.space_platforms,
        }
    }

    fn get_mut(&mut self, ship_type: StarshipType) -> &mut usize {
        match ship_type {
            StarshipType::SystemDefense => &mut self.system_defense,
            StarshipType::Scout => &mut self.scouts,
            StarshipType::Destroyer => &mut self.destroyers,
            StarshipType::Cruiser => &mut self.cruisers,
            StarshipType::Battleship => &mut self.battleships,
            StarshipType::SpacePlatform => &mut self.space_platforms,
        }
    }

    pub fn total(&self) -> usize {
        StarshipType::PRIORITY.iter().map(|t| self.get(*t)).sum()
    }
}

/// What the planet under a fleet offers for repairs.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct RepairSite {
    pub has_factory: bool,
    pub has_space_platform: bool,
}

impl RepairSite {
    fn can_repair(&self, ship_type: StarshipType) -> bool {
        match ship_type {
            StarshipType::SystemDefense | StarshipType::Scout => true,
            StarshipType::SpacePlatform | StarshipType::Destroyer => self.has_factory,
            StarshipType::Cruiser | StarshipType::Battleship => {
                self.has_factory && self.has_space_platform
            }
        }
    }
}

/// 艦隊。所有者、位置、艦種ごとの艦船リストを持つ。
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Fleet {
    #[serde(default)]
    owner: Option<Owner>,
    #[serde(default)]
    position: Option<FleetPosition>,
    #[serde(default)]
    starships: BTreeMap<StarshipType, Vec<Starship>>,
}

impl Fleet {
    pub fn new(owner: Option<Owner>, position: Option<FleetPosition>) -> Self {
        Self {
            owner,
            position,
            starships: BTreeMap::new(),
        }
    }

    /// Build a fleet with `counts` brand-new ships, ids drawn from `ids`.
    pub fn generate(
        owner: Option<Owner>,
        position: Option<FleetPosition>,
        counts: &ShipCounts,
        ids: &mut ShipIdAllocator,
    ) -> Self {
        let mut fleet = Self::new(owner, position);
        for ship_type in StarshipType::PRIORITY {
            for _ in 0..counts.get(ship_type) {
                fleet.add_starship(Starship::new(ids.allocate(), ship_type));
            }
        }
        fleet
    }

    // -- owner / position --
    pub fn owner(&self) -> Option<&Owner> {
        self.owner.as_ref()
    }
    pub fn set_owner(&mut self, owner: Option<Owner>) {
        self.owner = owner;
    }
    pub fn position(&self) -> Option<FleetPosition> {
        self.position
    }
    pub fn location_hex(&self) -> Option<HexId> {
        self.position.and_then(|p| p.location_hex())
    }
    pub fn destination_hex(&self) -> Option<HexId> {
        self.position.and_then(|p| p.destination_hex())
    }

    pub fn land_at(&mut self, hex: HexId) {
        self.position = Some(FleetPosition::Landed { hex });
    }

    /// Leave the current hex and head for `destination`.
    pub fn set_destination(&mut self, destination: HexId, distance: f64) {
        let distance = distance.max(0.0);
        self.position = Some(FleetPosition::InTransit {
            destination,
            total_distance: distance,
            distance_remaining: distance,
        });
    }

    /// Move an in-transit fleet by `distance`. Returns true when it arrives,
    /// in which case the fleet is landed on its destination.
    pub fn advance(&mut self, distance: f64) -> bool {
        let Some(FleetPosition::InTransit {
            destination,
            total_distance,
            distance_remaining,
        }) = self.position
        else {
            return false;
        };
        let remaining = distance_remaining - distance.max(0.0);
        if remaining <= 0.0 {
            self.land_at(destination);
            true
        } else {
            self.position = Some(FleetPosition::InTransit {
                destination,
                total_distance,
                distance_remaining: remaining,
            });
            false
        }
    }

    // -- membership --
    pub fn add_starship(&mut self, starship: Starship) {
        self.starships
            .entry(starship.ship_type())
            .or_default()
            .push(starship);
    }

    pub fn starships_of_type(&self, ship_type: StarshipType) -> &[Starship] {
        self.starships
            .get(&ship_type)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// All ships in priority order. Immobile types are left out when `mobile_only`.
    pub fn starships(&self, mobile_only: bool) -> Vec<&Starship> {
        StarshipType::PRIORITY
            .iter()
            .filter(|t| !mobile_only || t.is_mobile())
            .flat_map(|t| self.starships_of_type(*t))
            .collect()
    }

    pub fn starships_mut(&mut self) -> impl Iterator<Item = &mut Starship> {
        self.starships.values_mut().flat_map(|ships| ships.iter_mut())
    }

    pub fn starship(&self, id: ShipId) -> Option<&Starship> {
        self.starships.values().flatten().find(|s| s.id() == id)
    }

    pub fn starship_mut(&mut self, id: ShipId) -> Option<&mut Starship> {
        self.starships_mut().find(|s| s.id() == id)
    }

    pub fn starship_count(&self) -> usize {
        self.starships.values().map(Vec::len).sum()
    }

    pub fn count_by_type(&self) -> ShipCounts {
        let mut counts = ShipCounts::default();
        for ship_type in StarshipType::PRIORITY {
            *counts.get_mut(ship_type) = self.starships_of_type(ship_type).len();
        }
        counts
    }

    pub fn is_empty(&self) -> bool {
        self.starship_count() == 0
    }

    pub fn has_mobile_starships(&self) -> bool {
        !self.starships(true).is_empty()
    }

    pub fn determine_fleet_strength(&self, mobile_only: bool) -> u32 {
        self.starships(mobile_only)
            .iter()
            .map(|s| s.strength())
            .sum()
    }

    // -- fleet operations --
    /// Drop every ship with no strength left. Returns how many were removed.
    pub fn reduce_fleet(&mut self) -> usize {
        let before = self.starship_count();
        for ships in self.starships.values_mut() {
            ships.retain(|s| s.is_alive());
        }
        self.starships.retain(|_, ships| !ships.is_empty());
        before - self.starship_count()
    }

    /// Move every ship of `other` into this fleet. `other` is consumed.
    pub fn merge_fleet(&mut self, other: Fleet) {
        debug!(
            "Merging {} ships into fleet of {} ships",
            other.starship_count(),
            self.starship_count()
        );
        for (ship_type, ships) in other.starships {
            self.starships.entry(ship_type).or_default().extend(ships);
        }
    }

    /// Move up to the given number of mobile ships, oldest first, into a new
    /// fleet with the same owner and position. Counts above supply are clamped.
    pub fn split_fleet(
        &mut self,
        scouts: usize,
        destroyers: usize,
        cruisers: usize,
        battleships: usize,
    ) -> Fleet {
        let mut new_fleet = Fleet::new(self.owner.clone(), self.position);
        let requested = [
            (StarshipType::Scout, scouts),
            (StarshipType::Destroyer, destroyers),
            (StarshipType::Cruiser, cruisers),
            (StarshipType::Battleship, battleships),
        ];
        for (ship_type, count) in requested {
            let Some(ships) = self.starships.get_mut(&ship_type) else {
                continue;
            };
            let count = count.min(ships.len());
            for ship in ships.drain(..count) {
                new_fleet.add_starship(ship);
            }
        }
        self.starships.retain(|_, ships| !ships.is_empty());
        new_fleet
    }

    /// Like [`Fleet::split_fleet`] but picks exact ships. Unknown ids are skipped.
    pub fn split_fleet_with_ship_ids(
        &mut self,
        scout_ids: &[ShipId],
        destroyer_ids: &[ShipId],
        cruiser_ids: &[ShipId],
        battleship_ids: &[ShipId],
    ) -> Fleet {
        let mut new_fleet = Fleet::new(self.owner.clone(), self.position);
        let requested = [
            (StarshipType::Scout, scout_ids),
            (StarshipType::Destroyer, destroyer_ids),
            (StarshipType::Cruiser, cruiser_ids),
            (StarshipType::Battleship, battleship_ids),
        ];
        for (ship_type, ids) in requested {
            let Some(ships) = self.starships.get_mut(&ship_type) else {
                continue;
            };
            for id in ids {
                match ships.iter().position(|s| s.id() == *id) {
                    Some(index) => new_fleet.add_starship(ships.remove(index)),
                    None => debug!("Ship {id} is not a {ship_type} of this fleet, skipping"),
                }
            }
        }
        self.starships.retain(|_, ships| !ships.is_empty());
        new_fleet
    }

    /// Spend up to `max_strength_to_repair` on damaged ships in priority order.
    /// Returns the total strength restored.
    pub fn repair_fleet(&mut self, max_strength_to_repair: u32, site: RepairSite) -> u32 {
        let site = RepairSite {
            has_space_platform: site.has_space_platform
                || !self.starships_of_type(StarshipType::SpacePlatform).is_empty(),
            ..site
        };
        let mut budget = max_strength_to_repair;
        let mut repaired = 0;
        for ship_type in StarshipType::PRIORITY {
            if !site.can_repair(ship_type) {
                continue;
            }
            let Some(ships) = self.starships.get_mut(&ship_type) else {
                continue;
            };
            for ship in ships.iter_mut() {
                if budget == 0 {
                    return repaired;
                }
                let amount = ship.repair(budget);
                budget -= amount;
                repaired += amount;
            }
        }
        repaired
    }

    /// フロントエンドから受けとったデータの妥当性を検証し、必要に応じて修正する。
    ///
    /// Repaired in place:
    /// - ships filed under the wrong type
    /// - health above max strength
    /// - research chances outside `0.0..=1.0`
    ///
    /// Not repairable: an empty fleet (returns false).
    pub fn validate(&mut self) -> bool {
        let misfiled: Vec<Starship> = self
            .starships
            .iter_mut()
            .flat_map(|(ship_type, ships)| {
                let (keep, moved): (Vec<_>, Vec<_>) =
                    ships.drain(..).partition(|s| s.ship_type() == *ship_type);
                *ships = keep;
                moved
            })
            .collect();
        if !misfiled.is_empty() {
            warn!("{} ships filed under the wrong type", misfiled.len());
            for ship in misfiled {
                self.add_starship(ship);
            }
        }

        for ship in self.starships_mut() {
            if ship.clamp_health() {
                warn!("Ship {} had more health than its max strength", ship.id());
            }
        }

        if let Some(owner) = self.owner.as_mut() {
            owner.research.validate();
        }

        self.starships.retain(|_, ships| !ships.is_empty());
        if self.is_empty() {
            warn!("Fleet is empty: {:?}", self.owner);
            return false;
        }
        true
    }
}
