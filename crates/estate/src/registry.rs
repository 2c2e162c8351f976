//! The building registry: the ordered, validated list of descriptors the scene
//! is built from.
//!
//! A [`BuildingRegistry`] can only be constructed through [`BuildingRegistry::new`],
//! so holding one means every descriptor passed validation. The scene reads it
//! as a shared resource and never mutates it.

use std::collections::HashSet;
use std::path::Path;

use bevy::prelude::*;

use crate::building::{BuildingDescriptor, Entrance, Facing, Status};
use crate::error::RegistryError;

#[derive(Resource, Debug, Clone)]
pub struct BuildingRegistry {
    buildings: Vec<BuildingDescriptor>,
}

impl BuildingRegistry {
    /// Validate `buildings` and wrap them, failing on the first bad descriptor.
    pub fn new(buildings: Vec<BuildingDescriptor>) -> Result<Self, RegistryError> {
        validate(&buildings)?;
        Ok(Self { buildings })
    }

    /// Parse a JSON array of descriptors and validate it.
    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        let buildings: Vec<BuildingDescriptor> = serde_json::from_str(json)?;
        Self::new(buildings)
    }

    pub fn load_file(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn buildings(&self) -> &[BuildingDescriptor] {
        &self.buildings
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BuildingDescriptor> {
        self.buildings.iter()
    }

    pub fn len(&self) -> usize {
        self.buildings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buildings.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&BuildingDescriptor> {
        self.buildings.iter().find(|b| b.id == id)
    }

    /// Tallest building height, or 0 for an empty registry.
    pub fn max_height(&self) -> f32 {
        self.buildings
            .iter()
            .map(|b| b.scale[1])
            .fold(0.0, f32::max)
    }
}

impl Default for BuildingRegistry {
    fn default() -> Self {
        Self {
            buildings: default_buildings(),
        }
    }
}

fn validate(buildings: &[BuildingDescriptor]) -> Result<(), RegistryError> {
    let mut seen = HashSet::with_capacity(buildings.len());
    for b in buildings {
        if !seen.insert(b.id.as_str()) {
            return Err(RegistryError::DuplicateId(b.id.clone()));
        }
        if b.position.iter().any(|p| !p.is_finite()) {
            return Err(RegistryError::NonFinitePosition {
                id: b.id.clone(),
                position: b.position,
            });
        }
        if b.scale.iter().any(|s| !s.is_finite() || *s <= 0.0) {
            return Err(RegistryError::NonPositiveScale {
                id: b.id.clone(),
                scale: b.scale,
            });
        }
        if let Some(entrance) = b.entrance {
            let half_span = wall_half_span(b, entrance.facing);
            if !entrance.lateral_offset.is_finite() || entrance.lateral_offset.abs() > half_span {
                return Err(RegistryError::EntranceOutsideWall {
                    id: b.id.clone(),
                    facing: entrance.facing,
                    lateral_offset: entrance.lateral_offset,
                    half_span,
                });
            }
        }
        if !b.is_residential() && (b.status.is_some() || b.occupancy.is_some()) {
            warn!(
                "Facility '{}' carries residential-only fields; they are ignored",
                b.id
            );
        }
    }
    Ok(())
}

/// Half the length of the wall an entrance on `facing` sits on.
fn wall_half_span(b: &BuildingDescriptor, facing: Facing) -> f32 {
    if facing.runs_along_x() {
        b.scale[0] / 2.0
    } else {
        b.scale[2] / 2.0
    }
}

/// The built-in complex: twelve residential blocks around a leisure plaza,
/// with underground parking and a charging station along the south edge.
pub fn default_buildings() -> Vec<BuildingDescriptor> {
    let block = |id: &str, x: f32, z: f32, height: f32, occupancy: u32, facing: Facing| {
        BuildingDescriptor::residential(
            id,
            &format!("Block {id}"),
            Vec3::new(x, 0.0, z),
            Vec3::new(8.0, height, 8.0),
        )
        .with_occupancy(occupancy)
        .with_status(Status::Normal)
        .with_entrance(Entrance::new(facing))
    };

    vec![
        block("1", -20.0, -15.0, 30.0, 120, Facing::South),
        block("2", -7.0, -15.0, 24.0, 96, Facing::South),
        block("3", 7.0, -15.0, 28.0, 108, Facing::South).with_status(Status::Warning),
        block("4", 20.0, -15.0, 26.0, 102, Facing::South),
        block("5", -13.0, 0.0, 32.0, 126, Facing::East),
        block("6", 0.0, 0.0, 30.0, 120, Facing::West),
        block("7", 13.0, 0.0, 28.0, 108, Facing::West),
        block("8", -20.0, 15.0, 26.0, 102, Facing::North).with_status(Status::Alert),
        block("9", -7.0, 15.0, 24.0, 96, Facing::North),
        block("10", 7.0, 15.0, 28.0, 108, Facing::North),
        block("11", 20.0, 15.0, 30.0, 120, Facing::North),
        block("12", 0.0, 25.0, 32.0, 126, Facing::South),
        BuildingDescriptor::facility(
            "p1",
            "Underground Parking",
            Vec3::new(-13.0, 0.0, -25.0),
            Vec3::new(26.0, 2.0, 16.0),
        )
        .with_entrance(Entrance::new(Facing::South).with_offset(-10.0)),
        BuildingDescriptor::facility(
            "c1",
            "Charging Station",
            Vec3::new(13.0, 0.0, -25.0),
            Vec3::new(13.0, 2.0, 10.0),
        )
        .with_entrance(Entrance::new(Facing::South)),
        BuildingDescriptor::facility(
            "f1",
            "Leisure Plaza",
            Vec3::new(0.0, 0.0, -7.0),
            Vec3::new(10.0, 2.0, 10.0),
        ),
    ]
}
