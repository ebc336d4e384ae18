use serde::{Deserialize, Serialize};

/// Ship id, unique within one game session.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct ShipId(pub u64);

impl std::fmt::Display for ShipId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Hands out monotonically increasing ship ids.
/// One allocator belongs to one game session and is passed explicitly to
/// whatever builds ships, so sessions never share an id space.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct ShipIdAllocator {
    next: u64,
}

impl ShipIdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume an id space after ids up to `last_issued` were handed out elsewhere.
    pub fn starting_after(last_issued: u64) -> Self {
        Self {
            next: last_issued.saturating_add(1),
        }
    }

    pub fn allocate(&mut self) -> ShipId {
        let id = ShipId(self.next);
        self.next = self.next.saturating_add(1);
        id
    }

    pub fn peek(&self) -> ShipId {
        ShipId(self.next)
    }
}
