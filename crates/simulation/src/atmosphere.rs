//! Atmospheric smoke during environmental crisis.
//!
//! Smoke particles only exist while the world is in the crisis band; the
//! moment the score drops below the collapse threshold the whole set is
//! despawned, not faded. While active, one particle spawns per fixed short
//! interval up to a small cap, rises from below the view, drifts slightly
//! and thins out linearly until it disappears.

use bevy::prelude::*;
use rand::Rng;

use crate::config::{SMOKE_MAX_PARTICLES, SMOKE_SPAWN_INTERVAL_MS, WORLD_HEIGHT, WORLD_WIDTH};
use crate::pollution::PollutionLevel;
use crate::sim_rng::SimRng;

/// The three smoke grays, picked per particle at spawn.
pub const SMOKE_COLORS: [(u8, u8, u8); 3] = [(100, 100, 90), (90, 90, 80), (80, 75, 70)];

/// Alpha lost per tick. Alpha is on the 0-255 scale.
const ALPHA_DECAY_PER_TICK: f32 = 0.5;

/// One rising smoke puff.
#[derive(Component, Debug, Clone)]
pub struct SmokeParticle {
    /// Per-tick movement: slight horizontal drift, steady rise.
    pub velocity: Vec2,
    pub size: f32,
    pub alpha: f32,
    pub color: (u8, u8, u8),
}

impl SmokeParticle {
    /// Roll a fresh puff with randomized rise, drift, size and alpha.
    pub fn random(rng: &mut impl Rng) -> Self {
        Self {
            velocity: Vec2::new(rng.gen_range(-0.3..0.3), rng.gen_range(0.5..1.5)),
            size: rng.gen_range(40.0..80.0),
            alpha: rng.gen_range(30..=60) as f32,
            color: SMOKE_COLORS[rng.gen_range(0..SMOKE_COLORS.len())],
        }
    }
}

/// Accumulates simulated time between smoke spawns.
#[derive(Resource, Default)]
pub struct SmokeSpawnTimer {
    pub elapsed_ms: f32,
}

/// Spawn position: a random column just below the visible world.
fn spawn_position(rng: &mut impl Rng) -> Vec2 {
    Vec2::new(
        rng.gen_range(-WORLD_WIDTH / 2.0..WORLD_WIDTH / 2.0),
        -WORLD_HEIGHT / 2.0 - 20.0,
    )
}

/// Spawn smoke while in crisis; clear everything immediately otherwise.
pub fn spawn_smoke(
    mut commands: Commands,
    time: Res<Time>,
    pollution: Res<PollutionLevel>,
    mut timer: ResMut<SmokeSpawnTimer>,
    mut rng: ResMut<SimRng>,
    existing: Query<Entity, With<SmokeParticle>>,
) {
    if !pollution.flags().crisis {
        for entity in &existing {
            commands.entity(entity).despawn();
        }
        timer.elapsed_ms = 0.0;
        return;
    }

    timer.elapsed_ms += time.delta_secs() * 1000.0;
    if timer.elapsed_ms < SMOKE_SPAWN_INTERVAL_MS {
        return;
    }
    timer.elapsed_ms = 0.0;

    if existing.iter().count() >= SMOKE_MAX_PARTICLES {
        return;
    }

    let position = spawn_position(&mut rng.0);
    commands.spawn((
        SmokeParticle::random(&mut rng.0),
        Transform::from_translation(position.extend(0.0)),
    ));
}

/// Rise, drift and thin out every puff; despawn the fully transparent ones.
pub fn update_smoke(
    mut commands: Commands,
    mut particles: Query<(Entity, &mut SmokeParticle, &mut Transform)>,
) {
    for (entity, mut particle, mut transform) in &mut particles {
        transform.translation.x += particle.velocity.x;
        transform.translation.y += particle.velocity.y;
        particle.alpha -= ALPHA_DECAY_PER_TICK;
        if particle.alpha <= 0.0 {
            commands.entity(entity).despawn();
        }
    }
}

pub struct AtmospherePlugin;

impl Plugin for AtmospherePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SmokeSpawnTimer>()
            .add_systems(Update, (spawn_smoke, update_smoke).chain());
    }
}
