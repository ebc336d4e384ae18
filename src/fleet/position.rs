use serde::{Deserialize, Serialize};

/// Identifier of a hex on the galaxy map.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct HexId {
    pub q: i32,
    pub r: i32,
}

impl HexId {
    pub fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }
}

impl std::fmt::Display for HexId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.q, self.r)
    }
}

/// A fleet is either landed on a hex or travelling towards one, never both.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase", tag = "state")]
pub enum FleetPosition {
    Landed {
        hex: HexId,
    },
    #[serde(rename_all = "camelCase")]
    InTransit {
        destination: HexId,
        total_distance: f64,
        distance_remaining: f64,
    },
}

impl FleetPosition {
    pub fn location_hex(&self) -> Option<HexId> {
        match self {
            FleetPosition::Landed { hex } => Some(*hex),
            FleetPosition::InTransit { .. } => None,
        }
    }

    pub fn destination_hex(&self) -> Option<HexId> {
        match self {
            FleetPosition::Landed { .. } => None,
            FleetPosition::InTransit { destination, .. } => Some(*destination),
        }
    }
}
