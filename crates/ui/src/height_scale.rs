use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use estate::registry::BuildingRegistry;

use crate::theme::{panel_frame, ACCENT};

const MARGIN: f32 = 20.0;
const BAR_WIDTH: f32 = 4.0;
const BAR_HEIGHT: f32 = 100.0;

/// Bottom to top: low buildings green, mid amber, tallest red.
const GRADIENT: [(u8, u8, u8); 3] = [(76, 175, 80), (255, 165, 0), (255, 0, 0)];

/// Scale marks top to bottom, in whole meters: max, half of max, zero.
pub fn height_scale_marks(max_height: f32) -> [u32; 3] {
    let max = max_height.max(0.0);
    [max.round() as u32, (max / 2.0).round() as u32, 0]
}

/// Linearly interpolate between color stops. `t` is in 0.0..=1.0.
fn sample_gradient(stops: &[(u8, u8, u8)], t: f32) -> egui::Color32 {
    match stops {
        [] => egui::Color32::BLACK,
        [(r, g, b)] => egui::Color32::from_rgb(*r, *g, *b),
        _ => {
            let t = t.clamp(0.0, 1.0);
            let scaled = t * (stops.len() - 1) as f32;
            let idx = (scaled as usize).min(stops.len() - 2);
            let frac = scaled - idx as f32;
            let (r0, g0, b0) = stops[idx];
            let (r1, g1, b1) = stops[idx + 1];
            let lerp = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * frac).round() as u8;
            egui::Color32::from_rgb(lerp(r0, r1), lerp(g0, g1), lerp(b0, b1))
        }
    }
}

/// Building height scale, bottom right.
pub fn height_scale_ui(mut contexts: EguiContexts, registry: Res<BuildingRegistry>) {
    let marks = height_scale_marks(registry.max_height());
    let ctx = contexts.ctx_mut();
    let screen = ctx.screen_rect();

    egui::Area::new(egui::Id::new("height_scale"))
        .fixed_pos(egui::pos2(screen.right() - MARGIN, screen.bottom() - MARGIN))
        .pivot(egui::Align2::RIGHT_BOTTOM)
        .interactable(false)
        .show(ctx, |ui| {
            panel_frame(ui.style()).show(ui, |ui| {
                ui.label(
                    egui::RichText::new("Building height")
                        .strong()
                        .size(18.0)
                        .color(ACCENT),
                );
                ui.add_space(10.0);
                ui.horizontal(|ui| {
                    let (rect, _response) = ui.allocate_exact_size(
                        egui::vec2(BAR_WIDTH, BAR_HEIGHT),
                        egui::Sense::hover(),
                    );
                    let painter = ui.painter_at(rect);
                    let rows = BAR_HEIGHT as usize;
                    for row in 0..rows {
                        // Row 0 is the top of the bar (tallest).
                        let t = 1.0 - row as f32 / (rows - 1).max(1) as f32;
                        let y = rect.top() + row as f32;
                        painter.rect_filled(
                            egui::Rect::from_min_max(
                                egui::pos2(rect.left(), y),
                                egui::pos2(rect.right(), y + 1.0),
                            ),
                            0.0,
                            sample_gradient(&GRADIENT, t),
                        );
                    }

                    ui.add_space(6.0);
                    ui.vertical(|ui| {
                        ui.set_height(BAR_HEIGHT);
                        let gap = (BAR_HEIGHT - 3.0 * 18.0) / 2.0;
                        for (i, mark) in marks.iter().enumerate() {
                            if i > 0 {
                                ui.add_space(gap);
                            }
                            ui.label(egui::RichText::new(format!("{mark}m")).strong());
                        }
                    });
                });
            });
        });
}
