use bevy::prelude::*;
use bevy_egui::EguiPlugin;

use rendering::lifecycle::{MountedScene, SceneState};
use rendering::FrameSet;

pub mod height_scale;
pub mod legend;
pub mod pointer_capture;
pub mod theme;

/// Dashboard panels drawn beside the 3D view while a scene is mounted.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(EguiPlugin)
            .add_systems(Startup, theme::apply_dashboard_theme)
            .add_systems(
                Update,
                pointer_capture::update_pointer_capture.before(FrameSet::Controls),
            )
            .add_systems(
                Update,
                (legend::status_legend_ui, height_scale::height_scale_ui)
                    .run_if(in_state(SceneState::Mounted))
                    .run_if(resource_exists::<MountedScene>),
            );
    }
}
