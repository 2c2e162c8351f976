//! The host container: the drawing surface the scene mounts into.
//!
//! The host owns its client size and an ordered list of attached children.
//! A mount attaches its raster and overlay surfaces here and claims the
//! container; unmount detaches them again. Detaching is check-before-remove so
//! a surface the host already dropped is tolerated.

use bevy::prelude::*;

use crate::error::MountError;

#[derive(Resource, Debug, Clone, Default)]
pub struct HostContainer {
    width: f32,
    height: f32,
    children: Vec<Entity>,
    /// Generation of the mount that currently owns the container.
    owner: Option<u64>,
}

/// Sent by the host environment when its client size changes. The resize
/// handler re-reads the container's current size rather than trusting the
/// payload.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct HostResized {
    pub width: f32,
    pub height: f32,
}

impl HostContainer {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ..default()
        }
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn set_size(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    /// True when the container has a drawable, non-degenerate area.
    pub fn is_sizeable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.width / self.height
    }

    pub fn children(&self) -> &[Entity] {
        &self.children
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.children.contains(&entity)
    }

    pub fn attach(&mut self, entity: Entity) {
        if !self.contains(entity) {
            self.children.push(entity);
        }
    }

    /// Remove `entity` if it is still attached. Returns whether it was.
    pub fn detach(&mut self, entity: Entity) -> bool {
        match self.children.iter().position(|&e| e == entity) {
            Some(idx) => {
                self.children.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn owner(&self) -> Option<u64> {
        self.owner
    }

    /// Take exclusive ownership for the mount `generation`.
    pub fn claim(&mut self, generation: u64) -> Result<(), MountError> {
        match self.owner {
            Some(current) if current != generation => Err(MountError::ContainerBusy { owner: current }),
            _ => {
                self.owner = Some(generation);
                Ok(())
            }
        }
    }

    /// Release ownership if `generation` holds it.
    pub fn release(&mut self, generation: u64) {
        if self.owner == Some(generation) {
            self.owner = None;
        }
    }
}
