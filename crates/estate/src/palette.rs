use bevy::prelude::*;

use crate::building::{BuildingDescriptor, Category, Status};
use crate::config::{GLOW_MAX_BLUR, GLOW_MIN_BLUR, GLOW_PERIOD_SECS};

pub const RESIDENTIAL_NORMAL: Color = Color::srgb(0.0, 160.0 / 255.0, 233.0 / 255.0);
pub const RESIDENTIAL_WARNING: Color = Color::srgb(1.0, 165.0 / 255.0, 0.0);
pub const RESIDENTIAL_ALERT: Color = Color::srgb(1.0, 68.0 / 255.0, 68.0 / 255.0);
pub const FACILITY: Color = Color::srgb(74.0 / 255.0, 144.0 / 255.0, 226.0 / 255.0);

/// Faint navy tint mixed into every body so it stays legible on the dark ground.
pub const BODY_EMISSIVE: Color = Color::srgb(0.0, 21.0 / 255.0, 41.0 / 255.0);
pub const BODY_EMISSIVE_INTENSITY: f32 = 0.1;

pub const DIVIDER: Color = Color::WHITE;
pub const DIVIDER_EMISSIVE_INTENSITY: f32 = 0.05;

pub const ENTRANCE: Color = Color::srgb(192.0 / 255.0, 192.0 / 255.0, 192.0 / 255.0);
pub const ENTRANCE_EMISSIVE: Color = Color::srgb(64.0 / 255.0, 64.0 / 255.0, 64.0 / 255.0);
pub const ENTRANCE_EMISSIVE_INTENSITY: f32 = 0.2;

pub const GROUND: Color = Color::srgb(0.6, 0.6, 0.6);

/// Body color for a `(category, status)` pair. Unset status reads as normal;
/// facilities use one fixed color whatever their status.
pub fn body_color(category: Category, status: Option<Status>) -> Color {
    match category {
        Category::Facility => FACILITY,
        Category::Residential => match status.unwrap_or_default() {
            Status::Normal => RESIDENTIAL_NORMAL,
            Status::Warning => RESIDENTIAL_WARNING,
            Status::Alert => RESIDENTIAL_ALERT,
        },
    }
}

pub fn body_color_for(building: &BuildingDescriptor) -> Color {
    body_color(building.category, building.status)
}

/// The four label glow animations. Each label references one of these by
/// class; there is no per-building style.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GlowClass {
    Normal,
    Warning,
    Alert,
    Facility,
}

impl GlowClass {
    pub const ALL: [GlowClass; 4] = [
        GlowClass::Normal,
        GlowClass::Warning,
        GlowClass::Alert,
        GlowClass::Facility,
    ];

    pub fn for_building(building: &BuildingDescriptor) -> Self {
        match building.effective_status() {
            None => GlowClass::Facility,
            Some(Status::Normal) => GlowClass::Normal,
            Some(Status::Warning) => GlowClass::Warning,
            Some(Status::Alert) => GlowClass::Alert,
        }
    }

    pub fn style(self) -> &'static GlowStyle {
        &GLOW_STYLES[self as usize]
    }
}

/// A named, alternating glow: shadow blur eases between `min_blur` and
/// `max_blur` over `period_secs`, then back.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlowStyle {
    pub name: &'static str,
    pub color: Color,
    pub min_blur: f32,
    pub max_blur: f32,
    pub period_secs: f32,
}

const fn glow(name: &'static str, color: Color) -> GlowStyle {
    GlowStyle {
        name,
        color,
        min_blur: GLOW_MIN_BLUR,
        max_blur: GLOW_MAX_BLUR,
        period_secs: GLOW_PERIOD_SECS,
    }
}

/// Indexed by `GlowClass as usize`.
pub const GLOW_STYLES: [GlowStyle; 4] = [
    glow("glow_normal", Color::srgb(76.0 / 255.0, 175.0 / 255.0, 80.0 / 255.0)),
    glow("glow_warning", Color::srgb(1.0, 165.0 / 255.0, 0.0)),
    glow("glow_alert", Color::srgb(1.0, 0.0, 0.0)),
    glow("glow_facility", Color::srgb(0.0, 1.0, 1.0)),
];

impl GlowStyle {
    /// Blur radius at `elapsed_secs`, following an ease-in-out curve that
    /// alternates direction every period.
    pub fn blur_at(&self, elapsed_secs: f32) -> f32 {
        let t = glow_phase(elapsed_secs, self.period_secs);
        self.min_blur + (self.max_blur - self.min_blur) * t
    }
}

/// Eased position in `[0, 1]` of an alternating animation: rises during even
/// periods, falls during odd ones.
pub fn glow_phase(elapsed_secs: f32, period_secs: f32) -> f32 {
    if period_secs <= 0.0 {
        return 0.0;
    }
    let cycles = (elapsed_secs.max(0.0) / period_secs).max(0.0);
    let frac = cycles.fract();
    let linear = if (cycles as u64) % 2 == 0 {
        frac
    } else {
        1.0 - frac
    };
    ease_in_out(linear)
}

/// Smoothstep: zero slope at both ends.
fn ease_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

pub fn status_glyph(status: Status) -> &'static str {
    match status {
        Status::Normal => "OK",
        Status::Warning => "!",
        Status::Alert => "!!",
    }
}

pub fn status_meaning(status: Status) -> &'static str {
    match status {
        Status::Normal => "Normal operation",
        Status::Warning => "Needs maintenance",
        Status::Alert => "Needs repair",
    }
}
