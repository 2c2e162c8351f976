use bevy::color::ColorToPacked;
use bevy_egui::{egui, EguiContexts};

/// Panel border and title accent.
pub const ACCENT: egui::Color32 = egui::Color32::from_rgb(0, 255, 255);
/// Black at 80% opacity, matching the label overlays.
pub const PANEL_FILL: egui::Color32 = egui::Color32::from_rgba_premultiplied(0, 0, 0, 204);
pub const TEXT: egui::Color32 = egui::Color32::WHITE;

pub fn apply_dashboard_theme(mut contexts: EguiContexts) {
    let ctx = contexts.ctx_mut();
    let mut style = (*ctx.style()).clone();

    // Dark navy, same as the scene clear color
    let panel = egui::Color32::from_rgb(0, 21, 41);
    let inactive = egui::Color32::from_rgb(10, 40, 70);
    let hover = egui::Color32::from_rgb(20, 70, 110);
    let active = egui::Color32::from_rgb(0, 160, 233);

    style.visuals.widgets.noninteractive.bg_fill = panel;
    style.visuals.widgets.inactive.bg_fill = inactive;
    style.visuals.widgets.hovered.bg_fill = hover;
    style.visuals.widgets.active.bg_fill = active;
    style.visuals.widgets.inactive.weak_bg_fill = inactive;
    style.visuals.widgets.hovered.weak_bg_fill = hover;
    style.visuals.widgets.active.weak_bg_fill = active;

    style.visuals.window_fill = panel;
    style.visuals.panel_fill = panel;
    style.visuals.override_text_color = Some(TEXT);

    style.visuals.selection.bg_fill = active;
    style.visuals.selection.stroke = egui::Stroke::new(1.0, ACCENT);

    let window_rounding = egui::CornerRadius::same(8);
    style.visuals.window_corner_radius = window_rounding;

    ctx.set_style(style);
}

/// Frame shared by the dashboard panels: translucent black, cyan border.
pub fn panel_frame(style: &egui::Style) -> egui::Frame {
    egui::Frame::popup(style)
        .fill(PANEL_FILL)
        .stroke(egui::Stroke::new(2.0, ACCENT))
        .inner_margin(15.0)
}

/// Convert a scene color for egui.
pub fn to_egui(color: bevy::color::Color) -> egui::Color32 {
    let [r, g, b, _] = color.to_srgba().to_u8_array();
    egui::Color32::from_rgb(r, g, b)
}
