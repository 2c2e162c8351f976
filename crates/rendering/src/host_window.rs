use bevy::prelude::*;
use bevy::window::{PrimaryWindow, WindowResized};

use crate::host::{HostContainer, HostResized};

/// Makes the primary window the host container: its logical size becomes the
/// container size and window resizes become [`HostResized`] events.
pub struct HostWindowPlugin;

impl Plugin for HostWindowPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, sync_host_from_window)
            .add_systems(First, forward_window_resize);
    }
}

fn sync_host_from_window(
    windows: Query<&Window, With<PrimaryWindow>>,
    mut host: ResMut<HostContainer>,
) {
    let Ok(window) = windows.get_single() else {
        warn!("No primary window; host container keeps its size");
        return;
    };
    host.set_size(window.width(), window.height());
    info!(
        "Host container sized from primary window: {}x{}",
        window.width(),
        window.height()
    );
}

fn forward_window_resize(
    mut resized: EventReader<WindowResized>,
    primary: Query<Entity, With<PrimaryWindow>>,
    mut host: ResMut<HostContainer>,
    mut out: EventWriter<HostResized>,
) {
    let Ok(primary) = primary.get_single() else {
        resized.clear();
        return;
    };
    let Some(last) = resized.read().filter(|e| e.window == primary).last() else {
        return;
    };
    host.set_size(last.width, last.height);
    out.send(HostResized {
        width: last.width,
        height: last.height,
    });
}
