//! World-to-screen projection for overlay anchors.
//!
//! Kept free of any render context so it can be driven from the camera's
//! `Transform` and `PerspectiveProjection` alone.

use bevy::prelude::*;
use bevy::render::camera::CameraProjection;

/// Clip-from-world matrix for a camera at `camera` using `projection`.
pub fn clip_from_world(camera: &Transform, projection: &PerspectiveProjection) -> Mat4 {
    projection.get_clip_from_view() * camera.compute_matrix().inverse()
}

/// Screen position (logical pixels, origin top-left) of `anchor`, or `None`
/// when the anchor is behind the camera.
pub fn project_anchor(anchor: Vec3, clip_from_world: Mat4, viewport: Vec2) -> Option<Vec2> {
    let clip = clip_from_world * anchor.extend(1.0);
    if clip.w <= f32::EPSILON {
        return None;
    }
    let ndc = clip.truncate() / clip.w;
    if !ndc.is_finite() {
        return None;
    }
    Some(Vec2::new(
        (ndc.x + 1.0) * 0.5 * viewport.x,
        (1.0 - ndc.y) * 0.5 * viewport.y,
    ))
}
