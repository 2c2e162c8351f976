//! Integration tests for the mount lifecycle using the `TestScene` harness.
//!
//! Each test spins up a headless Bevy App with `EstatePlugin` and
//! `RenderingPlugin` and asserts on the ECS state a mount leaves behind.

mod lifecycle_tests;
mod resize_tests;
