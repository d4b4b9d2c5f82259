//! Sprite rendering for litter particles.
//!
//! The simulation spawns bare debris entities; this module attaches a
//! sprite to each new one and keeps color, alpha and visibility in sync
//! every frame. Sprites sit at [`DEBRIS_Z`](crate::layers::DEBRIS_Z), under
//! the actor layer, and are hidden wholesale while the world is below the
//! warning threshold.

use bevy::prelude::*;

use simulation::debris::{DebrisKind, DebrisParticle};
use simulation::pollution::PollutionLevel;

use crate::layers::DEBRIS_Z;

/// Quad proportions per litter kind, echoing the original silhouettes
/// (upright bottle, diamond bag, squat can, landscape paper scrap).
fn kind_aspect(kind: DebrisKind) -> Vec2 {
    match kind {
        DebrisKind::Bottle => Vec2::new(0.55, 1.0),
        DebrisKind::Bag => Vec2::new(1.0, 1.0),
        DebrisKind::Can => Vec2::new(0.8, 1.0),
        DebrisKind::Paper => Vec2::new(1.0, 0.7),
    }
}

fn particle_color(particle: &DebrisParticle) -> Color {
    let (r, g, b) = particle.kind.color();
    Color::srgba_u8(r, g, b, particle.alpha.clamp(0.0, 255.0) as u8)
}

/// Give every freshly spawned particle its sprite, rotation and layer.
pub fn attach_debris_sprites(
    mut commands: Commands,
    mut added: Query<(Entity, &DebrisParticle, &mut Transform), Added<DebrisParticle>>,
) {
    for (entity, particle, mut transform) in &mut added {
        transform.translation.z = DEBRIS_Z;
        transform.rotation = Quat::from_rotation_z(particle.rotation);
        commands.entity(entity).insert(Sprite {
            color: particle_color(particle),
            custom_size: Some(kind_aspect(particle.kind) * particle.size),
            ..default()
        });
    }
}

/// Track fade alpha and hide all litter while effects are inactive.
pub fn update_debris_sprites(
    pollution: Res<PollutionLevel>,
    mut sprites: Query<(&DebrisParticle, &mut Sprite, &mut Visibility)>,
) {
    let shown = pollution.effects_active();
    for (particle, mut sprite, mut visibility) in &mut sprites {
        sprite.color = particle_color(particle);
        *visibility = if shown {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
    }
}

pub struct DebrisRenderPlugin;

impl Plugin for DebrisRenderPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (attach_debris_sprites, update_debris_sprites).chain(),
        );
    }
}
