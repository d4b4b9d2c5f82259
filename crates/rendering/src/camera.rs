use bevy::prelude::*;

/// Spawn the 2D world camera. The feedback layer assumes a static camera at
/// the origin; scrolling belongs to the (external) movement systems.
pub fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}
