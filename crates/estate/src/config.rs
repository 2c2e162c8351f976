use bevy::prelude::*;

/// Height of one storey in world units.
pub const FLOOR_HEIGHT: f32 = 3.0;
/// Divider slabs overhang the body by this much on each axis.
pub const DIVIDER_MARGIN: f32 = 0.1;
pub const DIVIDER_THICKNESS: f32 = 0.1;

/// Entrance marker extents: wide along the wall, thin through it.
pub const ENTRANCE_WIDTH: f32 = 1.5;
pub const ENTRANCE_DEPTH: f32 = 0.3;
pub const ENTRANCE_HEIGHT: f32 = 2.5;

/// Building labels float this far above the roof.
pub const LABEL_CLEARANCE: f32 = 2.0;
/// Entrance icons float this far above the marker top.
pub const ENTRANCE_ICON_LIFT: f32 = 0.5;

pub const BODY_OPACITY: f32 = 0.85;
pub const DIVIDER_OPACITY: f32 = 0.15;
pub const ENTRANCE_OPACITY: f32 = 0.9;

/// Ground plane side length and grid subdivisions.
pub const GROUND_SIZE: f32 = 200.0;
pub const GRID_DIVISIONS: u32 = 40;

pub const CAMERA_FOV_DEGREES: f32 = 45.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;
pub const CAMERA_START: Vec3 = Vec3::new(50.0, 50.0, 80.0);
pub const MIN_DISTANCE: f32 = 30.0;
pub const MAX_DISTANCE: f32 = 150.0;
/// Lowest elevation above the ground plane (polar angle capped at PI/2 - 0.1).
pub const MIN_ELEVATION: f32 = 0.1;
/// Stops short of straight down so `looking_at` keeps a valid up vector.
pub const MAX_ELEVATION: f32 = std::f32::consts::FRAC_PI_2 - 0.01;

/// Exponential damping speed; ~0.05 of the remaining motion per 60 Hz frame.
pub const DAMPING_SPEED: f32 = 3.0;

/// Glow animation half-cycle in seconds.
pub const GLOW_PERIOD_SECS: f32 = 1.5;
pub const GLOW_MIN_BLUR: f32 = 5.0;
pub const GLOW_MAX_BLUR: f32 = 20.0;

/// Environment variable naming a JSON registry file to load instead of the
/// built-in complex.
pub const REGISTRY_ENV: &str = "PARKVIEW_REGISTRY";

/// Tunable scene parameters read at mount time.
#[derive(Resource, Debug, Clone)]
pub struct SceneConfig {
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub camera_start: Vec3,
    pub min_distance: f32,
    pub max_distance: f32,
    pub min_elevation: f32,
    pub max_elevation: f32,
    pub damping_speed: f32,
    pub background: Color,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            fov_degrees: CAMERA_FOV_DEGREES,
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
            camera_start: CAMERA_START,
            min_distance: MIN_DISTANCE,
            max_distance: MAX_DISTANCE,
            min_elevation: MIN_ELEVATION,
            max_elevation: MAX_ELEVATION,
            damping_speed: DAMPING_SPEED,
            background: Color::srgb_u8(0x00, 0x15, 0x29),
        }
    }
}
