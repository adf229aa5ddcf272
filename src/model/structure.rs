use super::agent::Owner;
use super::position::*;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StructureId(pub u32);

impl fmt::Display for StructureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S{}", self.0)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StructureKind {
    Spawn,
    Container,
}

/// Energy holding structure visible in the snapshot.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Structure {
    pub id: StructureId,
    pub kind: StructureKind,
    pub pos: Position,
    #[serde(default)]
    pub owner: Option<Owner>,
    #[serde(default)]
    pub energy: u32,
    #[serde(default)]
    pub energy_capacity: u32,
}

impl Structure {
    pub fn spawn(id: u32, owner: Owner, pos: Position) -> Structure {
        Structure {
            id: StructureId(id),
            kind: StructureKind::Spawn,
            pos,
            owner: Some(owner),
            energy: 0,
            energy_capacity: 1000,
        }
    }

    pub fn container(id: u32, pos: Position, energy: u32) -> Structure {
        Structure {
            id: StructureId(id),
            kind: StructureKind::Container,
            pos,
            owner: None,
            energy,
            energy_capacity: 2000,
        }
    }

    pub fn my(&self) -> bool {
        self.owner == Some(Owner::Mine)
    }

    pub fn hostile(&self) -> bool {
        self.owner == Some(Owner::Hostile)
    }
}

impl HasPosition for Structure {
    fn pos(&self) -> Position {
        self.pos
    }
}
