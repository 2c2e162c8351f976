use bevy::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Residential,
    Facility,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    #[default]
    Normal,
    Warning,
    Alert,
}

impl Status {
    pub const ALL: [Status; 3] = [Status::Normal, Status::Warning, Status::Alert];
}

/// Wall of the building an entrance is cut into. North is +Z, East is +X.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Facing {
    North,
    South,
    East,
    West,
}

impl Facing {
    pub const ALL: [Facing; 4] = [Facing::North, Facing::South, Facing::East, Facing::West];

    /// True for the two walls that run along the X axis.
    pub fn runs_along_x(self) -> bool {
        matches!(self, Facing::North | Facing::South)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Entrance {
    pub facing: Facing,
    /// Signed distance along the wall from its midpoint.
    #[serde(default)]
    pub lateral_offset: f32,
}

impl Entrance {
    pub fn new(facing: Facing) -> Self {
        Self {
            facing,
            lateral_offset: 0.0,
        }
    }

    pub fn with_offset(mut self, lateral_offset: f32) -> Self {
        self.lateral_offset = lateral_offset;
        self
    }
}

/// Static description of one building or facility in the complex.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingDescriptor {
    pub id: String,
    /// Placement anchor; `y` is the base of the building.
    pub position: [f32; 3],
    /// Width, height, depth.
    pub scale: [f32; 3],
    pub name: String,
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occupancy: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entrance: Option<Entrance>,
}

impl BuildingDescriptor {
    pub fn residential(id: &str, name: &str, position: Vec3, scale: Vec3) -> Self {
        Self {
            id: id.to_string(),
            position: position.to_array(),
            scale: scale.to_array(),
            name: name.to_string(),
            category: Category::Residential,
            occupancy: None,
            status: None,
            entrance: None,
        }
    }

    pub fn facility(id: &str, name: &str, position: Vec3, scale: Vec3) -> Self {
        Self {
            category: Category::Facility,
            ..Self::residential(id, name, position, scale)
        }
    }

    pub fn with_occupancy(mut self, occupancy: u32) -> Self {
        self.occupancy = Some(occupancy);
        self
    }

    pub fn with_status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_entrance(mut self, entrance: Entrance) -> Self {
        self.entrance = Some(entrance);
        self
    }

    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }

    pub fn scale(&self) -> Vec3 {
        Vec3::from_array(self.scale)
    }

    pub fn is_residential(&self) -> bool {
        self.category == Category::Residential
    }

    /// Status used for styling: unset reads as `Normal`, and facilities carry none.
    pub fn effective_status(&self) -> Option<Status> {
        match self.category {
            Category::Residential => Some(self.status.unwrap_or_default()),
            Category::Facility => None,
        }
    }
}
