//! # TestScene — headless harness for the mount lifecycle
//!
//! Wraps a `bevy::app::App` with `EstatePlugin` + `RenderingPlugin` and no
//! window or renderer, so mount, resize and tick behaviour can be asserted on
//! ECS state directly.

use std::time::Duration;

use bevy::app::App;
use bevy::input::keyboard::{Key, KeyboardInput, NativeKey};
use bevy::input::mouse::MouseButtonInput;
use bevy::input::{ButtonState, InputPlugin};
use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;

use estate::registry::BuildingRegistry;
use estate::EstatePlugin;

use crate::host::{HostContainer, HostResized};
use crate::lifecycle::{SceneState, SceneStatus};
use crate::RenderingPlugin;

pub const FRAME: Duration = Duration::from_millis(16);

pub struct TestScene {
    app: App,
}

impl TestScene {
    // -----------------------------------------------------------------------
    // Constructors
    // -----------------------------------------------------------------------

    /// Built-in registry, 1280x720 host, not yet mounted.
    pub fn new() -> Self {
        Self::with_registry(BuildingRegistry::default())
    }

    pub fn with_registry(registry: BuildingRegistry) -> Self {
        Self::with_host(registry, HostContainer::new(1280.0, 720.0))
    }

    pub fn with_host(registry: BuildingRegistry, host: HostContainer) -> Self {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, AssetPlugin::default(), StatesPlugin, InputPlugin))
            .init_asset::<Mesh>()
            .init_asset::<StandardMaterial>()
            .insert_resource(TimeUpdateStrategy::ManualDuration(FRAME))
            .add_plugins(EstatePlugin { registry })
            .add_plugins(RenderingPlugin)
            .insert_resource(host);
        app.update();
        Self { app }
    }

    // -----------------------------------------------------------------------
    // Lifecycle
    // -----------------------------------------------------------------------

    /// Request a mount and run the frame that applies it.
    pub fn mount(&mut self) -> &mut Self {
        self.set_state(SceneState::Mounted);
        self
    }

    pub fn unmount(&mut self) -> &mut Self {
        self.set_state(SceneState::Unmounted);
        self
    }

    fn set_state(&mut self, state: SceneState) {
        self.app
            .world_mut()
            .resource_mut::<NextState<SceneState>>()
            .set(state);
        self.app.update();
    }

    pub fn state(&self) -> SceneState {
        *self.app.world().resource::<State<SceneState>>().get()
    }

    pub fn status(&self) -> &SceneStatus {
        self.resource::<SceneStatus>()
    }

    // -----------------------------------------------------------------------
    // Host
    // -----------------------------------------------------------------------

    /// Resize the host container and notify listeners, without ticking.
    pub fn resize(&mut self, width: f32, height: f32) -> &mut Self {
        let world = self.app.world_mut();
        world.resource_mut::<HostContainer>().set_size(width, height);
        world.send_event(HostResized { width, height });
        self
    }

    pub fn host(&self) -> &HostContainer {
        self.resource::<HostContainer>()
    }

    // -----------------------------------------------------------------------
    // Time
    // -----------------------------------------------------------------------

    pub fn tick(&mut self, n: u32) -> &mut Self {
        for _ in 0..n {
            self.app.update();
        }
        self
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn world_mut(&mut self) -> &mut World {
        self.app.world_mut()
    }

    pub fn resource<T: Resource>(&self) -> &T {
        self.app.world().resource::<T>()
    }

    pub fn get_resource<T: Resource>(&self) -> Option<&T> {
        self.app.world().get_resource::<T>()
    }

    pub fn count<C: Component>(&mut self) -> usize {
        let world = self.app.world_mut();
        world.query_filtered::<(), With<C>>().iter(world).count()
    }

    /// All live entities.
    pub fn entity_count(&mut self) -> usize {
        let world = self.app.world_mut();
        world.query::<Entity>().iter(world).count()
    }

    pub fn press(&mut self, key: KeyCode) -> &mut Self {
        self.app
            .world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(key);
        self
    }

    pub fn release(&mut self, key: KeyCode) -> &mut Self {
        self.app
            .world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .release(key);
        self
    }

    // -----------------------------------------------------------------------
    // Input events
    // -----------------------------------------------------------------------

    /// Press `key` through the keyboard event stream, run one frame, and queue
    /// the release for the next one. Unlike `press`, this yields `just_pressed`.
    pub fn tap(&mut self, key: KeyCode) -> &mut Self {
        self.send_key(key, ButtonState::Pressed);
        self.app.update();
        self.send_key(key, ButtonState::Released);
        self
    }

    fn send_key(&mut self, key_code: KeyCode, state: ButtonState) {
        self.app.world_mut().send_event(KeyboardInput {
            key_code,
            logical_key: Key::Unidentified(NativeKey::Unidentified),
            state,
            repeat: false,
            window: Entity::PLACEHOLDER,
        });
    }

    /// Spawn a default window with the cursor at `cursor`.
    pub fn spawn_window(&mut self, cursor: Vec2) -> &mut Self {
        let mut window = Window::default();
        window.set_cursor_position(Some(cursor));
        self.app.world_mut().spawn(window);
        self
    }

    pub fn move_cursor(&mut self, cursor: Vec2) -> &mut Self {
        let world = self.app.world_mut();
        for mut window in world.query::<&mut Window>().iter_mut(world) {
            window.set_cursor_position(Some(cursor));
        }
        self
    }

    pub fn mouse_button(&mut self, button: MouseButton, state: ButtonState) -> &mut Self {
        self.app.world_mut().send_event(MouseButtonInput {
            button,
            state,
            window: Entity::PLACEHOLDER,
        });
        self
    }
}

impl Default for TestScene {
    fn default() -> Self {
        Self::new()
    }
}
