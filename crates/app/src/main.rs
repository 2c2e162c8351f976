use bevy::prelude::*;
use bevy::render::view::screenshot::{save_to_disk, Screenshot};
use bevy::window::PresentMode;
use bevy::winit::{UpdateMode, WinitSettings};

use estate::EstatePlugin;
use rendering::host_window::HostWindowPlugin;
use rendering::lifecycle::{SceneState, SceneStatus};
use rendering::render_loop::RenderLoop;
use rendering::RenderingPlugin;
use ui::UiPlugin;

/// Write a screenshot of the mounted scene to this path, then exit.
const SCREENSHOT_ENV: &str = "PARKVIEW_SCREENSHOT";
/// Frames the scene runs before the screenshot, so labels have settled.
const SCREENSHOT_AFTER_FRAMES: u64 = 120;

fn main() {
    let registry = match estate::registry_from_env() {
        Ok(registry) => registry,
        Err(err) => {
            eprintln!("parkview: invalid building registry: {err}");
            std::process::exit(1);
        }
    };

    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Residential Complex".to_string(),
            resolution: (1280.0, 720.0).into(),
            present_mode: PresentMode::AutoVsync,
            ..default()
        }),
        ..default()
    }))
    .insert_resource(WinitSettings {
        focused_mode: UpdateMode::reactive_low_power(std::time::Duration::from_millis(16)),
        unfocused_mode: UpdateMode::reactive_low_power(std::time::Duration::from_millis(100)),
    })
    .add_plugins((
        EstatePlugin { registry },
        RenderingPlugin,
        HostWindowPlugin,
        UiPlugin,
    ))
    .add_systems(Startup, request_mount)
    .add_systems(Update, exit_if_mount_failed.run_if(resource_changed::<SceneStatus>));

    if let Some(path) = std::env::var_os(SCREENSHOT_ENV) {
        app.insert_resource(ScreenshotRequest {
            path: path.to_string_lossy().into_owned(),
            taken: false,
        });
        app.add_systems(Update, drive_screenshot);
    }

    app.run();
}

fn request_mount(mut next: ResMut<NextState<SceneState>>) {
    next.set(SceneState::Mounted);
}

/// The initial mount is the only one the user did not ask for; if it fails
/// there is nothing to show.
fn exit_if_mount_failed(status: Res<SceneStatus>, mut exit: EventWriter<AppExit>) {
    if status.mounts == 0 {
        if let Some(err) = &status.last_error {
            error!("Initial mount failed: {err}");
            exit.send(AppExit::error());
        }
    }
}

#[derive(Resource)]
struct ScreenshotRequest {
    path: String,
    taken: bool,
}

fn drive_screenshot(
    mut commands: Commands,
    mut request: ResMut<ScreenshotRequest>,
    render_loop: Res<RenderLoop>,
    mut exit: EventWriter<AppExit>,
) {
    let frames = render_loop.frames();
    if !request.taken && frames >= SCREENSHOT_AFTER_FRAMES {
        info!("Saving screenshot to {}", request.path);
        commands
            .spawn(Screenshot::primary_window())
            .observe(save_to_disk(request.path.clone()));
        request.taken = true;
    } else if request.taken && frames >= SCREENSHOT_AFTER_FRAMES + 12 {
        // A few frames for the capture to be written out.
        exit.send(AppExit::Success);
    }
}
