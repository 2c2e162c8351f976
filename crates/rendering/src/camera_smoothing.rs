//! Camera damping via exponential interpolation.
//!
//! Input systems write to `CameraTarget` (the desired orbit). Each Running
//! tick `smooth_camera_to_target` moves `OrbitCamera` toward it:
//!
//!   `value += (target - value) * (1 - exp(-speed * dt))`
//!
//! Motion therefore keeps decaying for a while after input stops, and the
//! result does not depend on frame rate.

use bevy::prelude::*;

use crate::camera::OrbitCamera;

#[derive(Resource, Debug, Clone, Copy)]
pub struct CameraDamping {
    /// Higher is snappier.
    pub speed: f32,
    /// Snap to the target once every component is closer than this.
    pub epsilon: f32,
}

impl CameraDamping {
    pub fn new(speed: f32) -> Self {
        Self {
            speed,
            ..default()
        }
    }
}

impl Default for CameraDamping {
    fn default() -> Self {
        Self {
            speed: estate::config::DAMPING_SPEED,
            epsilon: 0.001,
        }
    }
}

/// The desired orbit that input systems write to. The focus is fixed at the
/// scene origin so only the angles and distance are targets.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct CameraTarget {
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
}

impl CameraTarget {
    pub fn from_orbit(orbit: &OrbitCamera) -> Self {
        Self {
            yaw: orbit.yaw,
            pitch: orbit.pitch,
            distance: orbit.distance,
        }
    }
}

/// Exponential interpolation factor in `[0, 1]` for a given speed and delta.
#[inline]
pub fn exp_lerp_factor(speed: f32, dt: f32) -> f32 {
    1.0 - (-speed * dt).exp()
}

/// One damping step of `orbit` toward `target`. Returns whether anything moved.
pub fn damp_toward(
    orbit: &mut OrbitCamera,
    target: &CameraTarget,
    damping: &CameraDamping,
    dt: f32,
) -> bool {
    if dt <= 0.0 {
        return false;
    }

    let yaw_diff = target.yaw - orbit.yaw;
    let pitch_diff = target.pitch - orbit.pitch;
    let dist_diff = target.distance - orbit.distance;

    let eps = damping.epsilon;
    if yaw_diff.abs() < eps && pitch_diff.abs() < eps && dist_diff.abs() < eps {
        if yaw_diff == 0.0 && pitch_diff == 0.0 && dist_diff == 0.0 {
            return false;
        }
        orbit.yaw = target.yaw;
        orbit.pitch = target.pitch;
        orbit.distance = target.distance;
        return true;
    }

    let factor = exp_lerp_factor(damping.speed, dt);
    orbit.yaw += yaw_diff * factor;
    orbit.pitch += pitch_diff * factor;
    orbit.distance += dist_diff * factor;
    true
}

/// System: lerp `OrbitCamera` toward `CameraTarget`.
///
/// Leaves the orbit untouched when already at rest so change detection does
/// not rewrite the camera transform every tick.
pub fn smooth_camera_to_target(
    target: Res<CameraTarget>,
    damping: Res<CameraDamping>,
    time: Res<Time>,
    mut orbit: ResMut<OrbitCamera>,
) {
    let dt = time.delta_secs();
    let mut next = *orbit;
    if damp_toward(&mut next, &target, &damping, dt) {
        *orbit = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn orbit(yaw: f32, pitch: f32, distance: f32) -> OrbitCamera {
        OrbitCamera {
            focus: Vec3::ZERO,
            yaw,
            pitch,
            distance,
        }
    }

    #[test]
    fn test_exp_lerp_factor_bounds() {
        assert_eq!(exp_lerp_factor(3.0, 0.0), 0.0);
        let f = exp_lerp_factor(3.0, 1.0 / 60.0);
        assert!(f > 0.04 && f < 0.06, "got {f}");
        assert!(exp_lerp_factor(3.0, 100.0) <= 1.0);
    }

    #[test]
    fn test_damping_converges_monotonically() {
        let damping = CameraDamping::default();
        let target = CameraTarget {
            yaw: 1.0,
            pitch: 0.8,
            distance: 40.0,
        };
        let mut cam = orbit(0.0, 0.4, 120.0);
        let mut prev_gap = f32::MAX;
        for _ in 0..2000 {
            damp_toward(&mut cam, &target, &damping, 1.0 / 60.0);
            let gap = (target.distance - cam.distance).abs();
            assert!(gap <= prev_gap, "distance gap grew: {gap} > {prev_gap}");
            prev_gap = gap;
        }
        assert_eq!(cam.yaw, target.yaw);
        assert_eq!(cam.pitch, target.pitch);
        assert_eq!(cam.distance, target.distance);
    }

    #[test]
    fn test_damping_never_overshoots() {
        let damping = CameraDamping::new(50.0);
        let target = CameraTarget {
            yaw: 0.0,
            pitch: 0.5,
            distance: 30.0,
        };
        let mut cam = orbit(0.0, 0.5, 150.0);
        for _ in 0..100 {
            damp_toward(&mut cam, &target, &damping, 0.1);
            assert!(cam.distance >= target.distance);
        }
    }

    #[test]
    fn test_at_rest_reports_no_change() {
        let damping = CameraDamping::default();
        let mut cam = orbit(0.3, 0.5, 60.0);
        let target = CameraTarget::from_orbit(&cam);
        assert!(!damp_toward(&mut cam, &target, &damping, 1.0 / 60.0));
    }

    #[test]
    fn test_zero_dt_is_noop() {
        let damping = CameraDamping::default();
        let mut cam = orbit(0.0, 0.5, 60.0);
        let target = CameraTarget {
            yaw: 1.0,
            pitch: 0.5,
            distance: 60.0,
        };
        assert!(!damp_toward(&mut cam, &target, &damping, 0.0));
        assert_eq!(cam.yaw, 0.0);
    }
}
