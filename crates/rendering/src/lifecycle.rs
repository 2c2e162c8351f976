//! Scene lifecycle: mount and unmount.
//!
//! [`SceneState`] is the Bevy state the app drives; [`LifecyclePhase`] exposes
//! the transitional phases as well. Mounting validates the host before it
//! allocates anything. Unmounting is idempotent and never fails: every step
//! tolerates its target being gone already.

use bevy::prelude::*;
use bevy::ui::TargetCamera;

use estate::config::SceneConfig;
use estate::geometry::BuildingPlan;
use estate::label::overlays_for;
use estate::registry::BuildingRegistry;

use crate::building_render::{spawn_building, SceneAssets};
use crate::camera::{CameraOrbitDrag, OrbitCamera, OrbitLimits};
use crate::camera_smoothing::{CameraDamping, CameraTarget};
use crate::environment::{scene_ambient, spawn_environment};
use crate::error::MountError;
use crate::host::HostContainer;
use crate::labels::spawn_overlay;
use crate::render_loop::RenderLoop;

#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SceneState {
    #[default]
    Unmounted,
    Mounted,
}

#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LifecyclePhase {
    #[default]
    Unmounted,
    Mounting,
    Mounted,
    Unmounting,
}

/// Unparented entity owned by the current mount; despawned with its children
/// on unmount.
#[derive(Component, Debug, Clone, Copy)]
pub struct SceneEntity;

/// The 3D camera drawing the scene.
#[derive(Component, Debug, Clone, Copy)]
pub struct RasterSurface;

/// Root UI node all label overlays hang from.
#[derive(Component, Debug, Clone, Copy)]
pub struct OverlaySurface;

/// Output size a surface was last sized to, in logical pixels.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct SurfaceSize {
    pub width: f32,
    pub height: f32,
}

impl SurfaceSize {
    pub fn from_vec2(size: Vec2) -> Self {
        Self {
            width: size.x,
            height: size.y,
        }
    }

    pub fn as_vec2(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn set(&mut self, size: Vec2) {
        self.width = size.x;
        self.height = size.y;
    }
}

/// Present while a mount listens for host resizes.
#[derive(Resource, Debug, Clone, Copy)]
pub struct ResizeListener {
    pub generation: u64,
}

/// Handles owned by the live mount.
#[derive(Resource, Debug)]
pub struct MountedScene {
    pub generation: u64,
    pub raster: Entity,
    pub overlay: Entity,
    pub buildings: usize,
    pub overlays: usize,
    saved_ambient: Option<AmbientLight>,
}

/// Outcome of the most recent mount attempt.
#[derive(Resource, Debug, Default)]
pub struct SceneStatus {
    pub last_error: Option<MountError>,
    /// Successful mounts since startup.
    pub mounts: u64,
}

fn set_phase(world: &mut World, phase: LifecyclePhase) {
    world.insert_resource(phase);
}

/// Mount the scene into the host container. Returns the mount generation.
pub fn mount_scene(world: &mut World) -> Result<u64, MountError> {
    // A live scene keeps its phase; only a fresh attempt passes through Mounting.
    if world.contains_resource::<MountedScene>() {
        return Err(MountError::AlreadyMounted);
    }
    set_phase(world, LifecyclePhase::Mounting);
    match allocate_scene(world) {
        Ok(generation) => {
            set_phase(world, LifecyclePhase::Mounted);
            Ok(generation)
        }
        Err(err) => {
            set_phase(world, LifecyclePhase::Unmounted);
            Err(err)
        }
    }
}

fn allocate_scene(world: &mut World) -> Result<u64, MountError> {
    let registry = world
        .get_resource::<BuildingRegistry>()
        .cloned()
        .ok_or(MountError::MissingRegistry)?;
    let config = world
        .get_resource::<SceneConfig>()
        .cloned()
        .unwrap_or_default();
    world.init_resource::<HostContainer>();
    world.init_resource::<RenderLoop>();

    let size = {
        let host = world.resource::<HostContainer>();
        if !host.is_sizeable() {
            let size = host.size();
            return Err(MountError::ZeroSizedHost {
                width: size.x,
                height: size.y,
            });
        }
        host.size()
    };
    let generation = world.resource::<RenderLoop>().next_generation();
    world.resource_mut::<HostContainer>().claim(generation)?;

    // Nothing below can fail.
    let orbit = OrbitCamera::from_position(config.camera_start, Vec3::ZERO);
    let raster = world
        .spawn((
            Name::new("Raster surface"),
            RasterSurface,
            SceneEntity,
            SurfaceSize::from_vec2(size),
            Camera3d::default(),
            Camera {
                clear_color: ClearColorConfig::Custom(config.background),
                ..default()
            },
            Projection::Perspective(PerspectiveProjection {
                fov: config.fov_degrees.to_radians(),
                aspect_ratio: size.x / size.y,
                near: config.near,
                far: config.far,
            }),
            orbit.transform(),
        ))
        .id();
    let overlay = world
        .spawn((
            Name::new("Overlay surface"),
            OverlaySurface,
            SceneEntity,
            SurfaceSize::from_vec2(size),
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(0.0),
                top: Val::Px(0.0),
                width: Val::Px(size.x),
                height: Val::Px(size.y),
                ..default()
            },
            TargetCamera(raster),
        ))
        .id();
    {
        let mut host = world.resource_mut::<HostContainer>();
        host.attach(raster);
        host.attach(overlay);
    }

    let saved_ambient = world.remove_resource::<AmbientLight>();
    world.insert_resource(scene_ambient());
    spawn_environment(world);

    let mut assets = {
        let mut meshes = world.resource_mut::<Assets<Mesh>>();
        SceneAssets::new(&mut meshes)
    };
    let mut overlays = 0;
    for building in registry.iter() {
        let plan = BuildingPlan::from_descriptor(building);
        spawn_building(world, &mut assets, building, &plan);
        for description in overlays_for(building, &plan) {
            spawn_overlay(world, overlay, &description);
            overlays += 1;
        }
    }
    world.insert_resource(assets);

    world.insert_resource(orbit);
    world.insert_resource(CameraTarget::from_orbit(&orbit));
    world.insert_resource(OrbitLimits::from_config(&config));
    world.insert_resource(CameraDamping::new(config.damping_speed));
    world.insert_resource(CameraOrbitDrag::default());

    world.insert_resource(ResizeListener { generation });
    world.resource_mut::<RenderLoop>().start(generation);
    world.insert_resource(MountedScene {
        generation,
        raster,
        overlay,
        buildings: registry.len(),
        overlays,
        saved_ambient,
    });
    {
        let mut status = world.get_resource_or_insert_with(SceneStatus::default);
        status.last_error = None;
        status.mounts += 1;
    }

    info!(
        "Scene mounted (#{generation}): {} buildings, {overlays} overlays, {}x{}",
        registry.len(),
        size.x,
        size.y
    );
    Ok(generation)
}

/// Tear down the mounted scene. Returns `false` when there was nothing to
/// tear down; calling it again is always safe.
pub fn unmount_scene(world: &mut World) -> bool {
    let Some(mounted) = world.remove_resource::<MountedScene>() else {
        if let Some(mut render_loop) = world.get_resource_mut::<RenderLoop>() {
            render_loop.dispose();
        }
        world.remove_resource::<ResizeListener>();
        debug!("Unmount requested with no scene mounted");
        return false;
    };
    set_phase(world, LifecyclePhase::Unmounting);

    if let Some(mut render_loop) = world.get_resource_mut::<RenderLoop>() {
        render_loop.dispose();
    }
    world.remove_resource::<ResizeListener>();

    if let Some(mut host) = world.get_resource_mut::<HostContainer>() {
        for surface in [mounted.raster, mounted.overlay] {
            if !host.detach(surface) {
                warn!("Surface {surface} was already detached from the host");
            }
        }
        host.release(mounted.generation);
    }

    let roots: Vec<Entity> = world
        .query_filtered::<Entity, With<SceneEntity>>()
        .iter(world)
        .collect();
    let mut despawned = 0;
    for entity in roots {
        if world.entities().contains(entity) {
            world.entity_mut(entity).despawn_recursive();
            despawned += 1;
        } else {
            debug!("Scene entity {entity} already despawned");
        }
    }

    world.remove_resource::<SceneAssets>();
    world.remove_resource::<OrbitCamera>();
    world.remove_resource::<CameraTarget>();
    world.remove_resource::<OrbitLimits>();
    world.remove_resource::<CameraDamping>();
    world.remove_resource::<CameraOrbitDrag>();

    match mounted.saved_ambient {
        Some(ambient) => world.insert_resource(ambient),
        None => {
            world.remove_resource::<AmbientLight>();
        }
    }

    set_phase(world, LifecyclePhase::Unmounted);
    info!(
        "Scene unmounted (#{}): {despawned} root entities despawned",
        mounted.generation
    );
    true
}

/// `OnEnter(SceneState::Mounted)`: mount, or fall back to `Unmounted` and
/// record why.
pub fn mount_on_enter(world: &mut World) {
    if world.contains_resource::<MountedScene>() {
        debug!("Scene already mounted");
        return;
    }
    if let Err(err) = mount_scene(world) {
        error!("Failed to mount scene: {err}");
        world
            .get_resource_or_insert_with(SceneStatus::default)
            .last_error = Some(err);
        world
            .resource_mut::<NextState<SceneState>>()
            .set(SceneState::Unmounted);
    }
}

/// `OnExit(SceneState::Mounted)`.
pub fn unmount_on_exit(world: &mut World) {
    unmount_scene(world);
}

/// `M` toggles between mounted and unmounted.
pub fn toggle_mount_key(
    keys: Res<ButtonInput<KeyCode>>,
    state: Res<State<SceneState>>,
    mut next: ResMut<NextState<SceneState>>,
) {
    if !keys.just_pressed(KeyCode::KeyM) {
        return;
    }
    next.set(match state.get() {
        SceneState::Unmounted => SceneState::Mounted,
        SceneState::Mounted => SceneState::Unmounted,
    });
}
