//! Ground plane, reference grid and lights spawned with every mount.

use bevy::prelude::*;
use bevy::render::mesh::PrimitiveTopology;
use bevy::render::render_asset::RenderAssetUsages;

use estate::config::{GRID_DIVISIONS, GROUND_SIZE};
use estate::palette::GROUND;

use crate::lifecycle::SceneEntity;

const GROUND_Y: f32 = -0.1;
const GROUND_OPACITY: f32 = 0.8;
const GRID_Y: f32 = 0.1;
const GRID_OPACITY: f32 = 0.1;

const SUN_POSITION: Vec3 = Vec3::new(50.0, 100.0, 30.0);
const SUN_ILLUMINANCE: f32 = 8_000.0;

/// Ambient light installed while mounted; the previous value is restored on
/// unmount.
pub fn scene_ambient() -> AmbientLight {
    AmbientLight {
        color: Color::srgb_u8(0x40, 0x40, 0x40),
        brightness: 600.0,
    }
}

/// Endpoints of a square `size` x `size` grid centered on the origin with
/// `divisions` cells per side, as line-list pairs on the y = 0 plane.
pub fn grid_line_positions(size: f32, divisions: u32) -> Vec<[f32; 3]> {
    let half = size / 2.0;
    let step = size / divisions.max(1) as f32;
    let mut positions = Vec::with_capacity((divisions as usize + 1) * 4);
    for i in 0..=divisions {
        let k = -half + i as f32 * step;
        positions.push([k, 0.0, -half]);
        positions.push([k, 0.0, half]);
        positions.push([-half, 0.0, k]);
        positions.push([half, 0.0, k]);
    }
    positions
}

fn grid_mesh(size: f32, divisions: u32) -> Mesh {
    Mesh::new(PrimitiveTopology::LineList, RenderAssetUsages::default())
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, grid_line_positions(size, divisions))
}

/// Spawn ground, grid and sun as unparented scene entities.
pub fn spawn_environment(world: &mut World) -> [Entity; 3] {
    let (ground_mesh, grid) = {
        let mut meshes = world.resource_mut::<Assets<Mesh>>();
        (
            meshes.add(Plane3d::default().mesh().size(GROUND_SIZE, GROUND_SIZE)),
            meshes.add(grid_mesh(GROUND_SIZE, GRID_DIVISIONS)),
        )
    };
    let (ground_material, grid_material) = {
        let mut materials = world.resource_mut::<Assets<StandardMaterial>>();
        (
            materials.add(StandardMaterial {
                base_color: GROUND.with_alpha(GROUND_OPACITY),
                alpha_mode: AlphaMode::Blend,
                perceptual_roughness: 0.9,
                ..default()
            }),
            materials.add(StandardMaterial {
                base_color: Color::WHITE.with_alpha(GRID_OPACITY),
                alpha_mode: AlphaMode::Blend,
                unlit: true,
                ..default()
            }),
        )
    };

    let ground = world
        .spawn((
            Name::new("Ground"),
            SceneEntity,
            Mesh3d(ground_mesh),
            MeshMaterial3d(ground_material),
            Transform::from_xyz(0.0, GROUND_Y, 0.0),
        ))
        .id();
    let grid = world
        .spawn((
            Name::new("Grid"),
            SceneEntity,
            Mesh3d(grid),
            MeshMaterial3d(grid_material),
            Transform::from_xyz(0.0, GRID_Y, 0.0),
        ))
        .id();
    let sun = world
        .spawn((
            Name::new("Sun"),
            SceneEntity,
            DirectionalLight {
                illuminance: SUN_ILLUMINANCE,
                shadows_enabled: true,
                ..default()
            },
            Transform::from_translation(SUN_POSITION).looking_at(Vec3::ZERO, Vec3::Y),
        ))
        .id();
    [ground, grid, sun]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_line_count() {
        let positions = grid_line_positions(200.0, 40);
        // 41 lines per axis, two endpoints each
        assert_eq!(positions.len(), 41 * 2 * 2);
    }

    #[test]
    fn test_grid_spans_ground() {
        let positions = grid_line_positions(200.0, 40);
        let max = positions
            .iter()
            .flat_map(|p| [p[0].abs(), p[2].abs()])
            .fold(0.0_f32, f32::max);
        assert_eq!(max, 100.0);
        assert!(positions.iter().all(|p| p[1] == 0.0));
    }

    #[test]
    fn test_grid_spacing() {
        let positions = grid_line_positions(200.0, 40);
        assert_eq!(positions[0], [-100.0, 0.0, -100.0]);
        assert_eq!(positions[4], [-95.0, 0.0, -100.0]);
    }

    #[test]
    fn test_zero_divisions_does_not_divide_by_zero() {
        let positions = grid_line_positions(10.0, 0);
        assert!(positions.iter().flatten().all(|v| v.is_finite()));
    }
}
