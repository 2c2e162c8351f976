use std::time::Duration;

use bevy::prelude::*;
use bevy::time::common_conditions::on_real_timer;

pub mod building_render;
pub mod camera;
pub mod camera_smoothing;
pub mod environment;
pub mod error;
pub mod glow;
pub mod host;
pub mod host_window;
pub mod input_guard;
pub mod labels;
pub mod lifecycle;
pub mod projection;
pub mod render_loop;

#[cfg(test)]
mod integration_tests;
#[cfg(test)]
pub mod test_harness;

use host::{HostContainer, HostResized};
use input_guard::PointerCapture;
use lifecycle::{LifecyclePhase, MountedScene, ResizeListener, SceneState, SceneStatus};
use render_loop::{render_loop_running, RenderLoop};

/// Per-frame work of a Running render loop, in order. The whole chain is
/// skipped unless the loop is running for the mounted scene.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum FrameSet {
    /// Host resize applied to camera and both surfaces.
    Resize,
    /// Pointer and keyboard input written to the camera target.
    Controls,
    /// Damping step and camera transform.
    Camera,
    /// Label overlays re-projected against this tick's camera.
    Overlay,
    Tick,
}

pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<SceneState>()
            .init_resource::<HostContainer>()
            .init_resource::<RenderLoop>()
            .init_resource::<LifecyclePhase>()
            .init_resource::<SceneStatus>()
            .init_resource::<PointerCapture>()
            .add_event::<HostResized>()
            .configure_sets(
                Update,
                (
                    FrameSet::Resize,
                    FrameSet::Controls,
                    FrameSet::Camera,
                    FrameSet::Overlay,
                    FrameSet::Tick,
                )
                    .chain()
                    .run_if(render_loop_running),
            )
            .add_systems(OnEnter(SceneState::Mounted), lifecycle::mount_on_enter)
            .add_systems(OnExit(SceneState::Mounted), lifecycle::unmount_on_exit)
            .add_systems(
                Update,
                (
                    render_loop::apply_host_resize
                        .run_if(resource_exists::<ResizeListener>)
                        .in_set(FrameSet::Resize),
                    (
                        camera::camera_orbit_drag,
                        camera::camera_zoom,
                        camera::camera_keyboard,
                    )
                        .in_set(FrameSet::Controls),
                    (
                        camera_smoothing::smooth_camera_to_target,
                        camera::apply_orbit_camera,
                    )
                        .chain()
                        .in_set(FrameSet::Camera),
                    labels::sync_label_overlays.in_set(FrameSet::Overlay),
                    render_loop::count_frame.in_set(FrameSet::Tick),
                    lifecycle::toggle_mount_key,
                ),
            )
            .add_systems(
                Update,
                glow::animate_label_glow
                    .run_if(resource_exists::<MountedScene>)
                    .run_if(on_real_timer(Duration::from_millis(glow::GLOW_TICK_MS))),
            );
    }
}
