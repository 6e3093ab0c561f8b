use serde::{Deserialize, Serialize};

/// Compact identifier of the cube occupying a cell. Names live in the registry.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Default, Debug, Serialize, Deserialize)]
pub struct CubeId(pub u16);

impl CubeId {
    pub const AIR: CubeId = CubeId(0);

    #[inline]
    pub fn is_air(self) -> bool {
        self == CubeId::AIR
    }
}

/// Result of an occupancy query. `Error` is produced by malformed or
/// unresolvable lookups and is never stored in a region.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Occupant {
    Air,
    Id(CubeId),
    Error,
}

impl Occupant {
    #[inline]
    pub fn is_air(self) -> bool {
        matches!(self, Occupant::Air)
    }

    #[inline]
    pub fn is_error(self) -> bool {
        matches!(self, Occupant::Error)
    }

    /// The stored identifier, or `None` for `Error`.
    #[inline]
    pub fn cube(self) -> Option<CubeId> {
        match self {
            Occupant::Air => Some(CubeId::AIR),
            Occupant::Id(id) => Some(id),
            Occupant::Error => None,
        }
    }
}

impl From<CubeId> for Occupant {
    #[inline]
    fn from(id: CubeId) -> Self {
        if id.is_air() { Occupant::Air } else { Occupant::Id(id) }
    }
}
