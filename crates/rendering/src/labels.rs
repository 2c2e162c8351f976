//! Screen-space label overlays.
//!
//! Each overlay is a `bevy_ui` node under the mount's overlay surface. Its
//! content is fixed at spawn time from an [`OverlayDescription`]; only the
//! node position and visibility change afterwards, once per Running tick.

use bevy::prelude::*;
use bevy::ui::BoxShadow;

use estate::label::{OverlayClass, OverlayDescription};
use estate::palette::ENTRANCE;

use crate::lifecycle::{OverlaySurface, RasterSurface, SurfaceSize};
use crate::projection::{clip_from_world, project_anchor};

const LABEL_FONT_SIZE: f32 = 16.0;
const ICON_FONT_SIZE: f32 = 14.0;
const LABEL_BACKGROUND: Color = Color::srgba(0.0, 0.0, 0.0, 0.8);

/// A screen overlay bound to a 3D anchor.
#[derive(Component, Debug, Clone)]
pub struct LabelOverlay {
    pub building_id: String,
    pub anchor: Vec3,
}

/// Marks entrance icon overlays, as opposed to building labels.
#[derive(Component, Debug, Clone, Copy)]
pub struct EntranceIcon;

/// Present until the overlay has been through one layout pass. Until then its
/// computed size is zero and centering would be off by half the node.
#[derive(Component, Debug, Clone, Copy)]
pub struct AwaitingLayout;

/// Spawn one overlay node under `root`. Hidden until it has been laid out once.
pub fn spawn_overlay(world: &mut World, root: Entity, overlay: &OverlayDescription) -> Entity {
    let binding = LabelOverlay {
        building_id: overlay.building_id.clone(),
        anchor: overlay.anchor,
    };
    let base = Node {
        position_type: PositionType::Absolute,
        ..default()
    };

    let mut entity = match overlay.class {
        OverlayClass::Building(glow) => {
            let style = glow.style();
            world.spawn((
                binding,
                glow,
                Text::new(overlay.text()),
                TextFont {
                    font_size: LABEL_FONT_SIZE,
                    ..default()
                },
                TextColor(Color::WHITE),
                TextLayout::new_with_justify(JustifyText::Center),
                Node {
                    padding: UiRect::axes(Val::Px(12.0), Val::Px(8.0)),
                    border: UiRect::all(Val::Px(2.0)),
                    ..base
                },
                BackgroundColor(LABEL_BACKGROUND),
                BorderColor(style.color),
                BorderRadius::all(Val::Px(6.0)),
                BoxShadow {
                    color: style.color,
                    x_offset: Val::ZERO,
                    y_offset: Val::ZERO,
                    spread_radius: Val::ZERO,
                    blur_radius: Val::Px(style.min_blur),
                },
                Visibility::Hidden,
                AwaitingLayout,
            ))
        }
        OverlayClass::Entrance => world.spawn((
            binding,
            EntranceIcon,
            Text::new(overlay.text()),
            TextFont {
                font_size: ICON_FONT_SIZE,
                ..default()
            },
            TextColor(ENTRANCE),
            base,
            Visibility::Hidden,
            AwaitingLayout,
        )),
    };
    entity.set_parent(root);
    entity.id()
}

/// Re-project every overlay against the raster camera and center it on its
/// anchor. Overlays whose anchor is behind the camera are hidden, as are
/// overlays still waiting for their first layout.
pub fn sync_label_overlays(
    mut commands: Commands,
    cameras: Query<(&Transform, &Projection), With<RasterSurface>>,
    surfaces: Query<&SurfaceSize, With<OverlaySurface>>,
    mut labels: Query<(
        Entity,
        &LabelOverlay,
        &ComputedNode,
        &mut Node,
        &mut Visibility,
        Has<AwaitingLayout>,
    )>,
) {
    let Ok((camera, Projection::Perspective(perspective))) = cameras.get_single() else {
        return;
    };
    let Ok(surface) = surfaces.get_single() else {
        return;
    };
    let clip_from_world = clip_from_world(camera, perspective);
    let viewport = surface.as_vec2();

    for (entity, label, computed, mut node, mut visibility, awaiting) in &mut labels {
        if awaiting {
            // Hidden nodes are still laid out, so one pass is enough.
            commands.entity(entity).remove::<AwaitingLayout>();
        }
        match project_anchor(label.anchor, clip_from_world, viewport) {
            Some(screen) => {
                let half = computed.size() * computed.inverse_scale_factor() * 0.5;
                node.left = Val::Px(screen.x - half.x);
                node.top = Val::Px(screen.y - half.y);
                if !awaiting {
                    visibility.set_if_neq(Visibility::Inherited);
                }
            }
            None => {
                visibility.set_if_neq(Visibility::Hidden);
            }
        }
    }
}
