use bevy::prelude::*;

use crate::labels::LabelOverlay;
use crate::lifecycle::{OverlaySurface, RasterSurface, SurfaceSize};
use crate::projection::{clip_from_world, project_anchor};
use crate::test_harness::TestScene;

fn raster_aspect(scene: &mut TestScene) -> f32 {
    let world = scene.world_mut();
    let projection = world
        .query_filtered::<&Projection, With<RasterSurface>>()
        .single(world);
    match projection {
        Projection::Perspective(p) => p.aspect_ratio,
        _ => panic!("raster surface should use a perspective projection"),
    }
}

fn surface_sizes(scene: &mut TestScene) -> (SurfaceSize, SurfaceSize) {
    let world = scene.world_mut();
    let raster = *world
        .query_filtered::<&SurfaceSize, With<RasterSurface>>()
        .single(world);
    let overlay = *world
        .query_filtered::<&SurfaceSize, With<OverlaySurface>>()
        .single(world);
    (raster, overlay)
}

#[test]
fn test_resize_updates_camera_and_both_surfaces_in_one_tick() {
    let mut scene = TestScene::new();
    scene.mount();

    scene.resize(800.0, 600.0).tick(1);

    assert!((raster_aspect(&mut scene) - 4.0 / 3.0).abs() < 1e-6);
    let expected = SurfaceSize {
        width: 800.0,
        height: 600.0,
    };
    assert_eq!(surface_sizes(&mut scene), (expected, expected));

    let world = scene.world_mut();
    let node = world
        .query_filtered::<&Node, With<OverlaySurface>>()
        .single(world);
    assert_eq!(node.width, Val::Px(800.0));
    assert_eq!(node.height, Val::Px(600.0));
}

#[test]
fn test_overlays_use_resized_projection_same_tick() {
    let mut scene = TestScene::new();
    scene.mount().tick(1);
    scene.resize(800.0, 600.0).tick(1);

    let world = scene.world_mut();
    let (camera, projection) = world
        .query_filtered::<(&Transform, &Projection), With<RasterSurface>>()
        .single(world);
    let Projection::Perspective(perspective) = projection else {
        panic!("perspective projection expected");
    };
    let matrix = clip_from_world(camera, perspective);
    let viewport = Vec2::new(800.0, 600.0);

    let mut checked = 0;
    for (label, node, visibility) in world
        .query::<(&LabelOverlay, &Node, &Visibility)>()
        .iter(world)
    {
        // Nodes have no computed size headless, so left/top is the anchor.
        match project_anchor(label.anchor, matrix, viewport) {
            Some(expected) => {
                assert_eq!(node.left, Val::Px(expected.x), "{}", label.building_id);
                assert_eq!(node.top, Val::Px(expected.y), "{}", label.building_id);
                assert_eq!(*visibility, Visibility::Inherited);
                checked += 1;
            }
            None => assert_eq!(*visibility, Visibility::Hidden),
        }
    }
    assert!(checked > 0);
}

#[test]
fn test_zero_sized_resize_is_ignored() {
    let mut scene = TestScene::new();
    scene.mount().tick(1);
    let aspect = raster_aspect(&mut scene);
    let sizes = surface_sizes(&mut scene);

    scene.resize(0.0, 600.0).tick(1);

    assert_eq!(raster_aspect(&mut scene), aspect);
    assert_eq!(surface_sizes(&mut scene), sizes);
}

#[test]
fn test_resize_while_unmounted_applies_at_next_mount() {
    let mut scene = TestScene::new();
    scene.resize(1024.0, 512.0).tick(1);
    scene.mount();

    assert!((raster_aspect(&mut scene) - 2.0).abs() < 1e-6);
    let (raster, overlay) = surface_sizes(&mut scene);
    assert_eq!(raster.as_vec2(), Vec2::new(1024.0, 512.0));
    assert_eq!(overlay.as_vec2(), Vec2::new(1024.0, 512.0));
}

#[test]
fn test_initial_aspect_matches_host() {
    let mut scene = TestScene::new();
    scene.mount();
    assert!((raster_aspect(&mut scene) - 1280.0 / 720.0).abs() < 1e-6);
}
