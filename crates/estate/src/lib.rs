use bevy::prelude::*;

pub mod building;
pub mod config;
pub mod error;
pub mod geometry;
pub mod label;
pub mod palette;
pub mod registry;

use config::{SceneConfig, REGISTRY_ENV};
use error::RegistryError;
use registry::BuildingRegistry;

/// Installs the validated building registry and scene configuration.
#[derive(Default)]
pub struct EstatePlugin {
    pub registry: BuildingRegistry,
}

impl Plugin for EstatePlugin {
    fn build(&self, app: &mut App) {
        info!("Building registry loaded: {} buildings", self.registry.len());
        app.insert_resource(self.registry.clone())
            .init_resource::<SceneConfig>();
    }
}

/// Registry named by `PARKVIEW_REGISTRY`, or the built-in complex when unset.
pub fn registry_from_env() -> Result<BuildingRegistry, RegistryError> {
    match std::env::var_os(REGISTRY_ENV) {
        Some(path) => BuildingRegistry::load_file(path),
        None => Ok(BuildingRegistry::default()),
    }
}
