use bevy_egui::{egui, EguiContexts};

use estate::building::Status;
use estate::palette::{status_glyph, status_meaning, GlowClass};

use crate::theme::{panel_frame, to_egui, ACCENT};

const MARGIN: f32 = 20.0;

pub fn status_glow(status: Status) -> GlowClass {
    match status {
        Status::Normal => GlowClass::Normal,
        Status::Warning => GlowClass::Warning,
        Status::Alert => GlowClass::Alert,
    }
}

/// One legend row per status: glyph and meaning, in the status glow color.
pub fn legend_rows() -> Vec<(String, egui::Color32)> {
    Status::ALL
        .iter()
        .map(|&status| {
            let color = to_egui(status_glow(status).style().color);
            (
                format!("{}  {}", status_glyph(status), status_meaning(status)),
                color,
            )
        })
        .collect()
}

/// Building status legend, top right.
pub fn status_legend_ui(mut contexts: EguiContexts) {
    let ctx = contexts.ctx_mut();
    let screen = ctx.screen_rect();

    egui::Area::new(egui::Id::new("status_legend"))
        .fixed_pos(egui::pos2(screen.right() - MARGIN, screen.top() + MARGIN))
        .pivot(egui::Align2::RIGHT_TOP)
        .interactable(false)
        .show(ctx, |ui| {
            panel_frame(ui.style()).show(ui, |ui| {
                ui.label(
                    egui::RichText::new("Building status")
                        .strong()
                        .size(18.0)
                        .color(ACCENT),
                );
                ui.add_space(10.0);
                for (text, color) in legend_rows() {
                    ui.label(egui::RichText::new(text).strong().color(color));
                    ui.add_space(4.0);
                }
            });
        });
}
