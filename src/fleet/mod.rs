mod owner;
pub use owner::{CombatResearch, Owner};

mod position;
pub use position::{FleetPosition, HexId};

mod ship_id;
pub use ship_id::{ShipId, ShipIdAllocator};

mod starship;
pub use starship::{CustomMatchup, Level, Starship};

mod starship_fleet;
pub use starship_fleet::{Fleet, RepairSite, ShipCounts};

mod starship_type;
pub use starship_type::StarshipType;
