use bevy::prelude::*;

/// Whether the pointer is currently over a dashboard panel. Written by the
/// ui crate; camera controls ignore pointer input while it is set.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct PointerCapture {
    pub over_ui: bool,
}
