//! World coordinates and rectangular zones.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{QuestError, QuestResult};

/// A tile in the game world. `plane` is the floor level (0 = ground).
///
/// Serialized as a `[x, y, plane]` triple so data files stay compact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[i32; 3]", into = "[i32; 3]")]
pub struct WorldPoint {
    pub x: i32,
    pub y: i32,
    pub plane: i32,
}

impl WorldPoint {
    pub const fn new(x: i32, y: i32, plane: i32) -> Self {
        Self { x, y, plane }
    }
}

impl From<[i32; 3]> for WorldPoint {
    fn from([x, y, plane]: [i32; 3]) -> Self {
        Self { x, y, plane }
    }
}

impl From<WorldPoint> for [i32; 3] {
    fn from(p: WorldPoint) -> Self {
        [p.x, p.y, p.plane]
    }
}

impl fmt::Display for WorldPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.plane)
    }
}

/// Axis-aligned rectangle on a single plane.
///
/// Corners may be given in any order; both are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Zone {
    min_x: i32,
    min_y: i32,
    max_x: i32,
    max_y: i32,
    plane: i32,
}

impl Zone {
    pub fn new(a: WorldPoint, b: WorldPoint) -> QuestResult<Self> {
        if a.plane != b.plane {
            return Err(QuestError::ZonePlaneMismatch { a, b });
        }
        Ok(Self {
            min_x: a.x.min(b.x),
            min_y: a.y.min(b.y),
            max_x: a.x.max(b.x),
            max_y: a.y.max(b.y),
            plane: a.plane,
        })
    }

    pub fn contains(&self, point: WorldPoint) -> bool {
        point.plane == self.plane
            && point.x >= self.min_x
            && point.x <= self.max_x
            && point.y >= self.min_y
            && point.y <= self.max_y
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}..={}, {}..={}] plane {}",
            self.min_x, self.max_x, self.min_y, self.max_y, self.plane
        )
    }
}
