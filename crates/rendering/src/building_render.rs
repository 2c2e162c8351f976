use std::collections::HashMap;

use bevy::prelude::*;

use estate::building::BuildingDescriptor;
use estate::config::{BODY_OPACITY, DIVIDER_OPACITY, ENTRANCE_OPACITY};
use estate::geometry::{BoxPlacement, BuildingPlan};
use estate::palette::{
    body_color_for, BODY_EMISSIVE, BODY_EMISSIVE_INTENSITY, DIVIDER, DIVIDER_EMISSIVE_INTENSITY,
    ENTRANCE, ENTRANCE_EMISSIVE, ENTRANCE_EMISSIVE_INTENSITY,
};

use crate::lifecycle::SceneEntity;

/// Root of one building's meshes.
#[derive(Component, Debug, Clone)]
pub struct SceneNode {
    pub building_id: String,
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodePart {
    Body,
    Divider,
    Entrance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum MaterialKey {
    Body([u8; 4]),
    Divider,
    Entrance,
}

/// Mesh and material handles shared by every building of one mount. Dropped
/// on unmount, which releases the assets once the entities are gone.
#[derive(Resource)]
pub struct SceneAssets {
    unit_cube: Handle<Mesh>,
    materials: HashMap<MaterialKey, Handle<StandardMaterial>>,
}

impl SceneAssets {
    pub fn new(meshes: &mut Assets<Mesh>) -> Self {
        Self {
            unit_cube: meshes.add(Cuboid::from_length(1.0)),
            materials: HashMap::new(),
        }
    }

    /// Number of distinct materials created so far.
    pub fn material_count(&self) -> usize {
        self.materials.len()
    }

    fn material(
        &mut self,
        key: MaterialKey,
        materials: &mut Assets<StandardMaterial>,
    ) -> Handle<StandardMaterial> {
        self.materials
            .entry(key)
            .or_insert_with(|| {
                let material = match key {
                    MaterialKey::Body(rgba) => translucent(
                        Color::srgba_u8(rgba[0], rgba[1], rgba[2], rgba[3]),
                        BODY_OPACITY,
                        BODY_EMISSIVE,
                        BODY_EMISSIVE_INTENSITY,
                    ),
                    MaterialKey::Divider => translucent(
                        DIVIDER,
                        DIVIDER_OPACITY,
                        DIVIDER,
                        DIVIDER_EMISSIVE_INTENSITY,
                    ),
                    MaterialKey::Entrance => translucent(
                        ENTRANCE,
                        ENTRANCE_OPACITY,
                        ENTRANCE_EMISSIVE,
                        ENTRANCE_EMISSIVE_INTENSITY,
                    ),
                };
                materials.add(material)
            })
            .clone()
    }
}

fn translucent(color: Color, opacity: f32, emissive: Color, intensity: f32) -> StandardMaterial {
    StandardMaterial {
        base_color: color.with_alpha(opacity),
        emissive: emissive.to_linear() * intensity,
        alpha_mode: AlphaMode::Blend,
        perceptual_roughness: 0.7,
        ..default()
    }
}

/// Spawn one building: an unparented root carrying the descriptor id, with
/// body, floor dividers and entrance marker as children. Placements are in
/// world space, so the root keeps an identity transform.
pub fn spawn_building(
    world: &mut World,
    assets: &mut SceneAssets,
    building: &BuildingDescriptor,
    plan: &BuildingPlan,
) -> Entity {
    let body_key = MaterialKey::Body(body_color_for(building).to_srgba().to_u8_array());

    let mut parts: Vec<(NodePart, BoxPlacement, Handle<StandardMaterial>)> =
        Vec::with_capacity(plan.dividers.len() + 2);
    world.resource_scope(|_world, mut materials: Mut<Assets<StandardMaterial>>| {
        parts.push((
            NodePart::Body,
            plan.body,
            assets.material(body_key, &mut materials),
        ));
        if !plan.dividers.is_empty() {
            let divider = assets.material(MaterialKey::Divider, &mut materials);
            for slab in &plan.dividers {
                parts.push((NodePart::Divider, *slab, divider.clone()));
            }
        }
        if let Some(entrance) = plan.entrance {
            parts.push((
                NodePart::Entrance,
                entrance.marker,
                assets.material(MaterialKey::Entrance, &mut materials),
            ));
        }
    });

    let root = world
        .spawn((
            SceneNode {
                building_id: building.id.clone(),
            },
            SceneEntity,
            Name::new(building.name.clone()),
            Transform::IDENTITY,
            Visibility::default(),
        ))
        .id();

    for (part, placement, material) in parts {
        world
            .spawn((
                part,
                Mesh3d(assets.unit_cube.clone()),
                MeshMaterial3d(material),
                placement.transform(),
            ))
            .set_parent(root);
    }
    root
}
