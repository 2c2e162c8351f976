use bevy::prelude::*;

use crate::building_render::SceneNode;
use crate::camera::OrbitCamera;
use crate::error::MountError;
use crate::host::HostContainer;
use crate::labels::LabelOverlay;
use crate::lifecycle::{
    mount_scene, unmount_scene, LifecyclePhase, MountedScene, OverlaySurface, RasterSurface,
    ResizeListener, SceneEntity, SceneState,
};
use crate::render_loop::{LoopState, RenderLoop};
use crate::test_harness::TestScene;
use estate::registry::BuildingRegistry;

fn expected_overlays(registry: &BuildingRegistry) -> usize {
    registry.len() + registry.iter().filter(|b| b.entrance.is_some()).count()
}

#[test]
fn test_mount_builds_every_building_and_overlay() {
    let mut scene = TestScene::new();
    scene.mount();

    assert_eq!(scene.state(), SceneState::Mounted);
    assert_eq!(*scene.resource::<LifecyclePhase>(), LifecyclePhase::Mounted);
    assert_eq!(scene.status().mounts, 1);
    assert!(scene.status().last_error.is_none());

    let registry = BuildingRegistry::default();
    assert_eq!(scene.count::<SceneNode>(), registry.len());
    assert_eq!(scene.count::<LabelOverlay>(), expected_overlays(&registry));
    assert_eq!(scene.count::<RasterSurface>(), 1);
    assert_eq!(scene.count::<OverlaySurface>(), 1);
    assert_eq!(scene.host().child_count(), 2);
    assert!(scene.resource::<RenderLoop>().is_running());
    assert!(scene.get_resource::<ResizeListener>().is_some());
}

#[test]
fn test_render_loop_ticks_while_mounted() {
    let mut scene = TestScene::new();
    scene.mount();
    let before = scene.resource::<RenderLoop>().frames();
    scene.tick(10);
    assert_eq!(scene.resource::<RenderLoop>().frames(), before + 10);
}

#[test]
fn test_mount_then_unmount_leaves_nothing_behind() {
    let mut scene = TestScene::new();
    let entities_before = scene.entity_count();
    let children_before = scene.host().child_count();

    scene.mount().tick(5).unmount();

    assert_eq!(scene.state(), SceneState::Unmounted);
    assert_eq!(*scene.resource::<LifecyclePhase>(), LifecyclePhase::Unmounted);
    assert_eq!(scene.host().child_count(), children_before);
    assert_eq!(scene.host().owner(), None);
    assert_eq!(scene.entity_count(), entities_before);
    assert_eq!(scene.count::<SceneEntity>(), 0);
    assert_eq!(scene.count::<LabelOverlay>(), 0);
    assert!(scene.get_resource::<MountedScene>().is_none());
    assert!(scene.get_resource::<ResizeListener>().is_none());
    assert!(scene.get_resource::<OrbitCamera>().is_none());
    assert_eq!(scene.resource::<RenderLoop>().state(), LoopState::Disposed);
}

#[test]
fn test_no_ticks_after_unmount() {
    let mut scene = TestScene::new();
    scene.mount().tick(3).unmount();
    let frames = scene.resource::<RenderLoop>().frames();
    scene.tick(10);
    assert_eq!(scene.resource::<RenderLoop>().frames(), frames);
}

#[test]
fn test_unmount_is_idempotent() {
    let mut scene = TestScene::new();
    scene.mount();
    assert!(unmount_scene(scene.world_mut()));
    assert!(!unmount_scene(scene.world_mut()));
    assert_eq!(scene.host().child_count(), 0);

    // The state change afterwards finds nothing left to tear down.
    scene.unmount();
    assert_eq!(scene.state(), SceneState::Unmounted);
    assert_eq!(scene.count::<SceneEntity>(), 0);
}

#[test]
fn test_unmount_tolerates_surface_already_detached() {
    let mut scene = TestScene::new();
    scene.mount();
    let raster = scene.resource::<MountedScene>().raster;
    scene
        .world_mut()
        .resource_mut::<HostContainer>()
        .detach(raster);
    scene.world_mut().entity_mut(raster).despawn();

    scene.unmount();
    assert_eq!(scene.host().child_count(), 0);
    assert_eq!(scene.count::<SceneEntity>(), 0);
}

#[test]
fn test_zero_sized_host_fails_without_allocating() {
    let mut scene =
        TestScene::with_host(BuildingRegistry::default(), HostContainer::new(0.0, 600.0));
    let entities_before = scene.entity_count();
    scene.mount().tick(1);

    assert_eq!(scene.state(), SceneState::Unmounted);
    assert_eq!(
        scene.status().last_error,
        Some(MountError::ZeroSizedHost {
            width: 0.0,
            height: 600.0
        })
    );
    assert_eq!(scene.host().child_count(), 0);
    assert_eq!(scene.entity_count(), entities_before);
    assert!(!scene.resource::<RenderLoop>().is_running());
    assert_eq!(*scene.resource::<LifecyclePhase>(), LifecyclePhase::Unmounted);
}

#[test]
fn test_busy_container_rejects_second_mount() {
    let mut scene = TestScene::new();
    scene
        .world_mut()
        .resource_mut::<HostContainer>()
        .claim(99)
        .expect("free container");
    scene.mount().tick(1);

    assert_eq!(scene.state(), SceneState::Unmounted);
    assert_eq!(
        scene.status().last_error,
        Some(MountError::ContainerBusy { owner: 99 })
    );
    assert_eq!(scene.host().child_count(), 0);
    assert_eq!(scene.count::<SceneEntity>(), 0);
}

#[test]
fn test_mounting_twice_is_rejected() {
    let mut scene = TestScene::new();
    scene.mount();
    let result = mount_scene(scene.world_mut());
    assert_eq!(result, Err(MountError::AlreadyMounted));
    assert_eq!(*scene.resource::<LifecyclePhase>(), LifecyclePhase::Mounted);
    assert!(scene.get_resource::<MountedScene>().is_some());
    assert!(scene.resource::<RenderLoop>().is_running());
    assert_eq!(scene.count::<SceneNode>(), BuildingRegistry::default().len());
    assert_eq!(scene.host().child_count(), 2);
}

#[test]
fn test_remount_does_not_accumulate() {
    let mut scene = TestScene::new();
    scene.mount().unmount().mount();

    let registry = BuildingRegistry::default();
    assert_eq!(scene.status().mounts, 2);
    assert_eq!(scene.count::<SceneNode>(), registry.len());
    assert_eq!(scene.count::<LabelOverlay>(), expected_overlays(&registry));
    assert_eq!(scene.host().child_count(), 2);

    let generation = scene.resource::<MountedScene>().generation;
    assert_eq!(scene.host().owner(), Some(generation));
    assert_eq!(scene.resource::<RenderLoop>().generation(), generation);
}

#[test]
fn test_ambient_light_restored_on_unmount() {
    let mut scene = TestScene::new();
    scene
        .world_mut()
        .insert_resource(AmbientLight {
            color: Color::WHITE,
            brightness: 42.0,
        });
    scene.mount();
    assert_ne!(scene.resource::<AmbientLight>().brightness, 42.0);
    scene.unmount();
    assert_eq!(scene.resource::<AmbientLight>().brightness, 42.0);
}

#[test]
fn test_empty_registry_mounts_bare_scene() {
    let registry = BuildingRegistry::new(Vec::new()).expect("empty registry is valid");
    let mut scene = TestScene::with_registry(registry);
    scene.mount().tick(2);
    assert_eq!(scene.state(), SceneState::Mounted);
    assert_eq!(scene.count::<SceneNode>(), 0);
    assert_eq!(scene.count::<LabelOverlay>(), 0);
    assert!(scene.resource::<RenderLoop>().frames() > 0);
}

#[test]
fn test_mount_key_toggles_scene() {
    let mut scene = TestScene::new();
    assert_eq!(scene.state(), SceneState::Unmounted);

    scene.tap(KeyCode::KeyM).tick(1);
    assert_eq!(scene.state(), SceneState::Mounted);
    assert_eq!(scene.host().child_count(), 2);
    assert!(scene.resource::<RenderLoop>().is_running());

    scene.tap(KeyCode::KeyM).tick(1);
    assert_eq!(scene.state(), SceneState::Unmounted);
    assert_eq!(scene.host().child_count(), 0);
    assert_eq!(scene.count::<SceneEntity>(), 0);
    assert_eq!(*scene.resource::<LifecyclePhase>(), LifecyclePhase::Unmounted);
}
