//! Derived building geometry.
//!
//! Everything here is a pure function of a [`BuildingDescriptor`]: the same
//! descriptor always yields the same [`BuildingPlan`]. The rendering crate
//! turns a plan into meshes; tests and benches use plans directly.

use bevy::prelude::*;

use crate::building::{BuildingDescriptor, Entrance, Facing};
use crate::config::{
    DIVIDER_MARGIN, DIVIDER_THICKNESS, ENTRANCE_DEPTH, ENTRANCE_HEIGHT, ENTRANCE_ICON_LIFT,
    ENTRANCE_WIDTH, FLOOR_HEIGHT, LABEL_CLEARANCE,
};

/// An axis-aligned box: center and full extents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxPlacement {
    pub center: Vec3,
    pub size: Vec3,
}

impl BoxPlacement {
    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.center).with_scale(self.size)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntrancePlacement {
    pub facing: Facing,
    pub marker: BoxPlacement,
    /// Where the entrance icon overlay is anchored.
    pub icon_anchor: Vec3,
}

/// All derived geometry for one building.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildingPlan {
    pub body: BoxPlacement,
    pub dividers: Vec<BoxPlacement>,
    pub entrance: Option<EntrancePlacement>,
    pub label_anchor: Vec3,
}

impl BuildingPlan {
    pub fn from_descriptor(building: &BuildingDescriptor) -> Self {
        let position = building.position();
        let scale = building.scale();
        Self {
            body: body_placement(position, scale),
            dividers: divider_placements(position, scale),
            entrance: building
                .entrance
                .map(|entrance| entrance_placement(position, scale, entrance)),
            label_anchor: label_anchor(position, scale),
        }
    }
}

/// Whole storeys that fit in `height`.
pub fn floor_count(height: f32) -> u32 {
    (height / FLOOR_HEIGHT).floor().max(0.0) as u32
}

/// Seams between storeys: one fewer than the floor count, never negative.
pub fn divider_count(height: f32) -> u32 {
    floor_count(height).saturating_sub(1)
}

/// Unit cube scaled to `scale` with its base resting at `position.y`.
pub fn body_placement(position: Vec3, scale: Vec3) -> BoxPlacement {
    BoxPlacement {
        center: Vec3::new(position.x, position.y + scale.y / 2.0, position.z),
        size: scale,
    }
}

pub fn divider_placements(position: Vec3, scale: Vec3) -> Vec<BoxPlacement> {
    let size = Vec3::new(
        scale.x + DIVIDER_MARGIN,
        DIVIDER_THICKNESS,
        scale.z + DIVIDER_MARGIN,
    );
    (1..floor_count(scale.y))
        .map(|i| BoxPlacement {
            center: Vec3::new(
                position.x,
                position.y + i as f32 * FLOOR_HEIGHT,
                position.z,
            ),
            size,
        })
        .collect()
}

/// Ground-level point on the wall an entrance faces, in the XZ plane.
pub fn entrance_point(position: Vec3, scale: Vec3, entrance: Entrance) -> Vec2 {
    let offset = entrance.lateral_offset;
    match entrance.facing {
        Facing::North => Vec2::new(position.x + offset, position.z + scale.z / 2.0),
        Facing::South => Vec2::new(position.x + offset, position.z - scale.z / 2.0),
        Facing::East => Vec2::new(position.x + scale.x / 2.0, position.z + offset),
        Facing::West => Vec2::new(position.x - scale.x / 2.0, position.z + offset),
    }
}

/// Marker box on the facing wall: wide along the wall, thin through it, base on
/// the ground independent of the building's height.
pub fn entrance_placement(position: Vec3, scale: Vec3, entrance: Entrance) -> EntrancePlacement {
    let point = entrance_point(position, scale, entrance);
    let size = if entrance.facing.runs_along_x() {
        Vec3::new(ENTRANCE_WIDTH, ENTRANCE_HEIGHT, ENTRANCE_DEPTH)
    } else {
        Vec3::new(ENTRANCE_DEPTH, ENTRANCE_HEIGHT, ENTRANCE_WIDTH)
    };
    EntrancePlacement {
        facing: entrance.facing,
        marker: BoxPlacement {
            center: Vec3::new(point.x, ENTRANCE_HEIGHT / 2.0, point.y),
            size,
        },
        icon_anchor: Vec3::new(point.x, ENTRANCE_HEIGHT + ENTRANCE_ICON_LIFT, point.y),
    }
}

pub fn label_anchor(position: Vec3, scale: Vec3) -> Vec3 {
    Vec3::new(
        position.x,
        position.y + scale.y + LABEL_CLEARANCE,
        position.z,
    )
}
