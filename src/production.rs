use log::info;
use serde::{Deserialize, Serialize};

use crate::fleet::{CustomMatchup, Fleet, ShipId, ShipIdAllocator, Starship, StarshipType};

/// Planet improvements the economy can build or tear down.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ImprovementKind {
    Farm,
    Mine,
    Colony,
    Factory,
}

/// Design of a ship waiting in a build queue.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StarshipBlueprint {
    pub ship_type: StarshipType,
    #[serde(default)]
    pub custom: Option<CustomMatchup>,
}

impl StarshipBlueprint {
    pub fn standard(ship_type: StarshipType) -> Self {
        Self {
            ship_type,
            custom: None,
        }
    }

    pub fn build(&self, ids: &mut ShipIdAllocator) -> Starship {
        let id = ids.allocate();
        match self.custom {
            Some(matchup) => Starship::new_custom(id, self.ship_type, matchup),
            None => Starship::new(id, self.ship_type),
        }
    }
}

/// 生産キューの項目。
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case", tag = "kind", content = "item")]
pub enum ProductionItem {
    Improvement(ImprovementKind),
    Starship(StarshipBlueprint),
    Demolition(ImprovementKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductionOutcome {
    ImprovementBuilt(ImprovementKind),
    StarshipLaunched(ShipId),
    ImprovementDemolished(ImprovementKind),
}

impl ProductionItem {
    /// Finish this item on a planet. Ships join the planet's fleet; the
    /// economy layer applies the improvement outcomes itself.
    pub fn complete(&self, planet_fleet: &mut Fleet, ids: &mut ShipIdAllocator) -> ProductionOutcome {
        match self {
            ProductionItem::Improvement(kind) => ProductionOutcome::ImprovementBuilt(*kind),
            ProductionItem::Starship(blueprint) => {
                let ship = blueprint.build(ids);
                let id = ship.id();
                info!("{} {} launched", blueprint.ship_type, id);
                planet_fleet.add_starship(ship);
                ProductionOutcome::StarshipLaunched(id)
            }
            ProductionItem::Demolition(kind) => ProductionOutcome::ImprovementDemolished(*kind),
        }
    }
}
