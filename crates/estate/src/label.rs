//! Overlay descriptions: what each floating label says and where it is
//! anchored. Content is computed once from the descriptor; the rendering crate
//! decides how to draw it.

use bevy::prelude::*;

use crate::building::BuildingDescriptor;
use crate::geometry::{floor_count, BuildingPlan};
use crate::palette::{status_glyph, GlowClass};

pub const ENTRANCE_ICON: &str = "IN";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayClass {
    /// A building label with a glowing border.
    Building(GlowClass),
    /// A small entrance icon.
    Entrance,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OverlayDescription {
    pub building_id: String,
    pub anchor: Vec3,
    pub lines: Vec<String>,
    pub class: OverlayClass,
}

impl OverlayDescription {
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

/// Label lines for a building: the name, then for residential blocks the
/// occupancy and floor count, and the rounded height with a status glyph.
pub fn label_lines(building: &BuildingDescriptor) -> Vec<String> {
    let mut lines = vec![building.name.clone()];
    if !building.is_residential() {
        return lines;
    }

    let floors = floor_count(building.scale[1]);
    lines.push(match building.occupancy {
        Some(occupancy) => format!("{occupancy} residents | {floors} floors"),
        None => format!("{floors} floors"),
    });

    let mut height = format!("Height: {}m", building.scale[1].round());
    if let Some(status) = building.status {
        height.push_str(" | ");
        height.push_str(status_glyph(status));
    }
    lines.push(height);
    lines
}

/// Overlays for one building: its label, plus an entrance icon if it has an
/// entrance.
pub fn overlays_for(building: &BuildingDescriptor, plan: &BuildingPlan) -> Vec<OverlayDescription> {
    let mut overlays = vec![OverlayDescription {
        building_id: building.id.clone(),
        anchor: plan.label_anchor,
        lines: label_lines(building),
        class: OverlayClass::Building(GlowClass::for_building(building)),
    }];
    if let Some(entrance) = plan.entrance {
        overlays.push(OverlayDescription {
            building_id: building.id.clone(),
            anchor: entrance.icon_anchor,
            lines: vec![ENTRANCE_ICON.to_string()],
            class: OverlayClass::Entrance,
        });
    }
    overlays
}
