//! Keeps camera drags and wheel zoom from reaching the scene while the
//! pointer is over a dashboard panel.

use bevy::prelude::*;
use bevy_egui::EguiContexts;

use rendering::input_guard::PointerCapture;

/// Returns `true` when egui wants the pointer: the cursor is over an egui
/// area or egui is handling a drag or click.
#[inline]
pub fn egui_wants_pointer(contexts: &mut EguiContexts) -> bool {
    let ctx = contexts.ctx_mut();
    ctx.wants_pointer_input() || ctx.is_pointer_over_area()
}

pub fn update_pointer_capture(mut contexts: EguiContexts, mut capture: ResMut<PointerCapture>) {
    let over_ui = egui_wants_pointer(&mut contexts);
    if capture.over_ui != over_ui {
        capture.over_ui = over_ui;
    }
}
