use bevy::input::gestures::PinchGesture;
use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::prelude::*;

use estate::config::SceneConfig;

use crate::camera_smoothing::CameraTarget;
use crate::input_guard::PointerCapture;
use crate::lifecycle::RasterSurface;

const ZOOM_SPEED: f32 = 0.15;
const ORBIT_SENSITIVITY: f32 = 0.005;
const KEY_ROTATE_SPEED: f32 = 1.5;
const KEY_ZOOM_SPEED: f32 = 1.0;

/// Orbital camera model: the camera circles a fixed focus on the ground.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
    /// Ground point the camera looks at
    pub focus: Vec3,
    /// Horizontal rotation in radians
    pub yaw: f32,
    /// Elevation angle above the ground plane in radians
    pub pitch: f32,
    /// Distance from focus point
    pub distance: f32,
}

impl OrbitCamera {
    /// Orbit that places the eye at `position` looking at `focus`.
    pub fn from_position(position: Vec3, focus: Vec3) -> Self {
        let offset = position - focus;
        let distance = offset.length();
        Self {
            focus,
            yaw: offset.x.atan2(offset.z),
            pitch: (offset.y / distance).clamp(-1.0, 1.0).asin(),
            distance,
        }
    }

    pub fn eye(&self) -> Vec3 {
        // Spherical to cartesian offset from focus
        let x = self.distance * self.pitch.cos() * self.yaw.sin();
        let y = self.distance * self.pitch.sin();
        let z = self.distance * self.pitch.cos() * self.yaw.cos();
        self.focus + Vec3::new(x, y, z)
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.eye()).looking_at(self.focus, Vec3::Y)
    }
}

/// Distance and elevation bounds for the orbit.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct OrbitLimits {
    pub min_distance: f32,
    pub max_distance: f32,
    pub min_pitch: f32,
    pub max_pitch: f32,
}

impl OrbitLimits {
    pub fn from_config(config: &SceneConfig) -> Self {
        Self {
            min_distance: config.min_distance,
            max_distance: config.max_distance,
            min_pitch: config.min_elevation,
            max_pitch: config.max_elevation,
        }
    }

    pub fn clamp_distance(&self, distance: f32) -> f32 {
        distance.clamp(self.min_distance, self.max_distance)
    }

    pub fn clamp_pitch(&self, pitch: f32) -> f32 {
        pitch.clamp(self.min_pitch, self.max_pitch)
    }
}

impl Default for OrbitLimits {
    fn default() -> Self {
        Self::from_config(&SceneConfig::default())
    }
}

#[derive(Resource, Default)]
pub struct CameraOrbitDrag {
    pub dragging: bool,
    pub last_pos: Vec2,
}

/// Rotate the target by a pointer movement of `delta` pixels.
pub fn orbit_by_pixels(target: &mut CameraTarget, delta: Vec2, limits: &OrbitLimits) {
    target.yaw -= delta.x * ORBIT_SENSITIVITY;
    target.pitch = limits.clamp_pitch(target.pitch + delta.y * ORBIT_SENSITIVITY);
}

/// Scale the target distance; positive `steps` zoom in.
pub fn zoom_by_steps(target: &mut CameraTarget, steps: f32, limits: &OrbitLimits) {
    let factor = (1.0 - steps * ZOOM_SPEED).max(0.1);
    target.distance = limits.clamp_distance(target.distance * factor);
}

/// System: apply OrbitCamera state to the raster surface camera.
pub fn apply_orbit_camera(
    orbit: Res<OrbitCamera>,
    mut query: Query<&mut Transform, With<RasterSurface>>,
) {
    if !orbit.is_changed() {
        return;
    }
    let Ok(mut transform) = query.get_single_mut() else {
        return;
    };
    *transform = orbit.transform();
}

/// Left-mouse drag: orbit (horizontal = yaw, vertical = pitch).
pub fn camera_orbit_drag(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window>,
    capture: Res<PointerCapture>,
    limits: Res<OrbitLimits>,
    mut drag: ResMut<CameraOrbitDrag>,
    mut target: ResMut<CameraTarget>,
) {
    let Ok(window) = windows.get_single() else {
        return;
    };

    if buttons.just_pressed(MouseButton::Left) && !capture.over_ui {
        if let Some(pos) = window.cursor_position() {
            drag.dragging = true;
            drag.last_pos = pos;
        }
    }

    if buttons.just_released(MouseButton::Left) {
        drag.dragging = false;
    }

    if drag.dragging {
        if let Some(pos) = window.cursor_position() {
            let delta = pos - drag.last_pos;
            orbit_by_pixels(&mut target, delta, &limits);
            drag.last_pos = pos;
        }
    }
}

/// Scroll wheel and pinch: zoom (change distance).
pub fn camera_zoom(
    mut scroll_evts: EventReader<MouseWheel>,
    mut pinch_evts: EventReader<PinchGesture>,
    capture: Res<PointerCapture>,
    limits: Res<OrbitLimits>,
    mut target: ResMut<CameraTarget>,
) {
    if capture.over_ui {
        scroll_evts.clear();
        pinch_evts.clear();
        return;
    }
    for evt in scroll_evts.read() {
        let dy = match evt.unit {
            MouseScrollUnit::Line => evt.y,
            MouseScrollUnit::Pixel => evt.y / 100.0,
        };
        zoom_by_steps(&mut target, dy, &limits);
    }
    for PinchGesture(amount) in pinch_evts.read() {
        zoom_by_steps(&mut target, *amount / ZOOM_SPEED, &limits);
    }
}

/// Q/E rotate, +/- zoom.
pub fn camera_keyboard(
    keys: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    limits: Res<OrbitLimits>,
    mut target: ResMut<CameraTarget>,
) {
    let dt = time.delta_secs();
    if keys.pressed(KeyCode::KeyQ) {
        target.yaw += KEY_ROTATE_SPEED * dt;
    }
    if keys.pressed(KeyCode::KeyE) {
        target.yaw -= KEY_ROTATE_SPEED * dt;
    }
    let zoom_in = keys.pressed(KeyCode::Equal) || keys.pressed(KeyCode::NumpadAdd);
    let zoom_out = keys.pressed(KeyCode::Minus) || keys.pressed(KeyCode::NumpadSubtract);
    if zoom_in {
        zoom_by_steps(&mut target, KEY_ZOOM_SPEED * dt, &limits);
    }
    if zoom_out {
        zoom_by_steps(&mut target, -KEY_ZOOM_SPEED * dt, &limits);
    }
}
