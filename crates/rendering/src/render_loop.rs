//! Render loop state and the resize handler.
//!
//! The loop does not own a thread: Bevy's app update is the display refresh,
//! and every per-frame system in [`crate::FrameSet`] is gated on
//! [`render_loop_running`]. Disposing the loop bumps its generation so a
//! stale mount can never tick again.

use bevy::prelude::*;

use crate::host::{HostContainer, HostResized};
use crate::lifecycle::{MountedScene, OverlaySurface, RasterSurface, SurfaceSize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopState {
    #[default]
    Idle,
    Running,
    Disposed,
}

#[derive(Resource, Debug, Default)]
pub struct RenderLoop {
    state: LoopState,
    generation: u64,
    frames: u64,
}

impl RenderLoop {
    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Generation the next [`RenderLoop::start`] should be given.
    pub fn next_generation(&self) -> u64 {
        self.generation + 1
    }

    /// Frames ticked since the last start.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    pub fn start(&mut self, generation: u64) {
        self.state = LoopState::Running;
        self.generation = generation;
        self.frames = 0;
    }

    /// Stop ticking. Safe to call in any state.
    pub fn dispose(&mut self) {
        if self.state == LoopState::Running {
            self.generation += 1;
        }
        self.state = LoopState::Disposed;
    }
}

/// Run condition: the loop is running for the scene that is mounted now.
pub fn render_loop_running(
    render_loop: Res<RenderLoop>,
    mounted: Option<Res<MountedScene>>,
) -> bool {
    render_loop.is_running()
        && mounted.is_some_and(|scene| scene.generation == render_loop.generation())
}

/// Apply a pending host resize before anything reads the camera this tick.
///
/// Camera aspect, both surfaces' recorded sizes and the overlay root node are
/// updated together from the container's current size.
pub fn apply_host_resize(
    mut events: EventReader<HostResized>,
    host: Res<HostContainer>,
    mut rasters: Query<(&mut Projection, &mut SurfaceSize), With<RasterSurface>>,
    mut overlays: Query<
        (&mut Node, &mut SurfaceSize),
        (With<OverlaySurface>, Without<RasterSurface>),
    >,
) {
    if events.read().count() == 0 {
        return;
    }

    let size = host.size();
    if !host.is_sizeable() {
        debug!("Ignoring resize to {}x{}", size.x, size.y);
        return;
    }

    for (mut projection, mut surface) in &mut rasters {
        if let Projection::Perspective(perspective) = projection.as_mut() {
            perspective.aspect_ratio = host.aspect_ratio();
        }
        surface.set(size);
    }
    for (mut node, mut surface) in &mut overlays {
        node.width = Val::Px(size.x);
        node.height = Val::Px(size.y);
        surface.set(size);
    }
    debug!("Scene resized to {}x{}", size.x, size.y);
}

pub fn count_frame(mut render_loop: ResMut<RenderLoop>) {
    render_loop.frames += 1;
}
