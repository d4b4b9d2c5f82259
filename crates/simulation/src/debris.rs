//! Procedural litter generation.
//!
//! Debris particles are short-lived entities scattered over the world at a
//! rate driven by the pollution band. Each spawn wave runs on a fixed
//! interval of simulated time; each particle fades in on spawn, drifts
//! slowly as if pushed by wind, fades out over the final fifth of its
//! randomized lifetime and is despawned once it expires. The live particle
//! count never exceeds [`DEBRIS_MAX_PARTICLES`]; spawns past the cap are
//! silently dropped.
//!
//! Clearing all debris at once is reserved for sustainable actions; see
//! the `sustainability` module.

use bevy::prelude::*;
use rand::Rng;

use crate::config::{
    DEBRIS_MAX_PARTICLES, DEBRIS_SPAWN_INTERVAL_MS, WORLD_HEIGHT, WORLD_WIDTH,
};
use crate::pollution::{PollutionLevel, ThresholdBand};
use crate::sim_rng::SimRng;

// ---------------------------------------------------------------------------
// Particle components
// ---------------------------------------------------------------------------

/// Visual kind of a piece of litter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebrisKind {
    Bottle,
    Bag,
    Can,
    Paper,
}

impl DebrisKind {
    pub fn color(self) -> (u8, u8, u8) {
        match self {
            Self::Bottle => (100, 150, 100),
            Self::Bag => (200, 200, 200),
            Self::Can => (180, 180, 200),
            Self::Paper => (220, 200, 150),
        }
    }

    fn from_index(index: u32) -> Self {
        match index % 4 {
            0 => Self::Bottle,
            1 => Self::Bag,
            2 => Self::Can,
            _ => Self::Paper,
        }
    }
}

/// One piece of litter. Alpha values are on the 0-255 scale.
#[derive(Component, Debug, Clone)]
pub struct DebrisParticle {
    pub kind: DebrisKind,
    /// Ticks lived so far. Strictly increases by one per update.
    pub age: u32,
    /// Lifetime in ticks; the particle is removed once `age >= max_age`.
    pub max_age: u32,
    pub alpha: f32,
    pub target_alpha: f32,
    fade_speed: f32,
    pub size: f32,
    /// Fixed rotation in radians, picked at spawn.
    pub rotation: f32,
    /// Constant per-tick drift (slow wind push).
    pub drift: Vec2,
}

impl DebrisParticle {
    /// Roll a fresh particle with randomized lifetime, fade and drift.
    pub fn random(rng: &mut impl Rng) -> Self {
        let drift_speed = rng.gen_range(0.1..0.3);
        let drift_angle = rng.gen_range(0.0..std::f32::consts::TAU);
        Self {
            kind: DebrisKind::from_index(rng.gen_range(0..4)),
            age: 0,
            max_age: rng.gen_range(300..=600),
            alpha: 0.0,
            target_alpha: rng.gen_range(180..=255) as f32,
            fade_speed: rng.gen_range(2.0..5.0),
            size: rng.gen_range(15.0..30.0),
            rotation: rng.gen_range(0.0..std::f32::consts::TAU),
            drift: Vec2::new(drift_angle.cos(), drift_angle.sin()) * drift_speed,
        }
    }

    /// Advance one tick: age, fade in toward the target alpha, fade out
    /// over the final 20% of the lifetime.
    pub fn tick(&mut self) {
        self.age += 1;

        let fade_out_start = self.max_age as f32 * 0.8;
        if self.age as f32 > fade_out_start {
            let fade_ratio = (self.age as f32 - fade_out_start) / (self.max_age as f32 * 0.2);
            self.alpha = self.target_alpha * (1.0 - fade_ratio).max(0.0);
        } else if self.alpha < self.target_alpha {
            self.alpha = (self.alpha + self.fade_speed).min(self.target_alpha);
        }
    }

    pub fn expired(&self) -> bool {
        self.age >= self.max_age
    }
}

/// Accumulates simulated time between spawn waves.
#[derive(Resource, Default)]
pub struct DebrisSpawnTimer {
    pub elapsed_ms: f32,
}

// ---------------------------------------------------------------------------
// Spawn planning
// ---------------------------------------------------------------------------

/// How many particles a spawn wave produces for a band.
pub fn spawn_count(band: ThresholdBand, rng: &mut impl Rng) -> u32 {
    match band {
        ThresholdBand::Low => 0,
        ThresholdBand::Moderate => rng.gen_range(0..=2),
        ThresholdBand::High => rng.gen_range(1..=4),
        ThresholdBand::Critical => rng.gen_range(3..=6),
    }
}

/// Roll one spawn wave: particles plus world positions, truncated so that
/// `existing + planned` never exceeds the pool cap.
pub fn plan_spawn_wave(
    band: ThresholdBand,
    existing: usize,
    rng: &mut impl Rng,
) -> Vec<(Vec2, DebrisParticle)> {
    let requested = spawn_count(band, rng) as usize;
    let room = DEBRIS_MAX_PARTICLES.saturating_sub(existing);
    let count = requested.min(room);

    (0..count)
        .map(|_| {
            let position = Vec2::new(
                rng.gen_range(-WORLD_WIDTH / 2.0..WORLD_WIDTH / 2.0),
                rng.gen_range(-WORLD_HEIGHT / 2.0..WORLD_HEIGHT / 2.0),
            );
            (position, DebrisParticle::random(rng))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Systems
// ---------------------------------------------------------------------------

/// Spawn a wave of litter every [`DEBRIS_SPAWN_INTERVAL_MS`] while debris
/// is visible.
pub fn spawn_debris(
    mut commands: Commands,
    time: Res<Time>,
    pollution: Res<PollutionLevel>,
    mut timer: ResMut<DebrisSpawnTimer>,
    mut rng: ResMut<SimRng>,
    existing: Query<(), With<DebrisParticle>>,
) {
    timer.elapsed_ms += time.delta_secs() * 1000.0;
    if timer.elapsed_ms < DEBRIS_SPAWN_INTERVAL_MS {
        return;
    }
    timer.elapsed_ms = 0.0;

    if !pollution.flags().debris_visible {
        return;
    }

    for (position, particle) in plan_spawn_wave(pollution.band(), existing.iter().count(), &mut rng.0)
    {
        commands.spawn((
            particle,
            Transform::from_translation(position.extend(0.0)),
        ));
    }
}

/// Age, fade and drift every particle; despawn the expired ones.
pub fn update_debris(
    mut commands: Commands,
    mut particles: Query<(Entity, &mut DebrisParticle, &mut Transform)>,
) {
    for (entity, mut particle, mut transform) in &mut particles {
        particle.tick();
        if particle.expired() {
            commands.entity(entity).despawn();
            continue;
        }
        transform.translation.x += particle.drift.x;
        transform.translation.y += particle.drift.y;
    }
}

pub struct DebrisPlugin;

impl Plugin for DebrisPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DebrisSpawnTimer>()
            .add_systems(Update, (spawn_debris, update_debris).chain());
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_count_ranges_per_band() {
        let mut rng = SimRng::from_seed_u64(7).0;
        for _ in 0..200 {
            assert_eq!(spawn_count(ThresholdBand::Low, &mut rng), 0);
            let moderate = spawn_count(ThresholdBand::Moderate, &mut rng);
            assert!(moderate <= 2);
            let high = spawn_count(ThresholdBand::High, &mut rng);
            assert!((1..=4).contains(&high));
            let critical = spawn_count(ThresholdBand::Critical, &mut rng);
            assert!((3..=6).contains(&critical));
        }
    }

    #[test]
    fn test_wave_respects_pool_cap() {
        let mut rng = SimRng::from_seed_u64(11).0;
        // Two slots left: a critical wave (3-6 requested) is cut to 2.
        let wave = plan_spawn_wave(ThresholdBand::Critical, DEBRIS_MAX_PARTICLES - 2, &mut rng);
        assert!(wave.len() <= 2);

        // Full pool: everything is dropped.
        let wave = plan_spawn_wave(ThresholdBand::Critical, DEBRIS_MAX_PARTICLES, &mut rng);
        assert!(wave.is_empty());

        // Over-full (shouldn't happen, but must not underflow).
        let wave = plan_spawn_wave(ThresholdBand::Critical, DEBRIS_MAX_PARTICLES + 10, &mut rng);
        assert!(wave.is_empty());
    }

    #[test]
    fn test_wave_positions_inside_world() {
        let mut rng = SimRng::from_seed_u64(3).0;
        for _ in 0..50 {
            for (position, _) in plan_spawn_wave(ThresholdBand::Critical, 0, &mut rng) {
                assert!(position.x.abs() <= WORLD_WIDTH / 2.0);
                assert!(position.y.abs() <= WORLD_HEIGHT / 2.0);
            }
        }
    }

    #[test]
    fn test_particle_age_strictly_increases_until_expiry() {
        let mut rng = SimRng::from_seed_u64(5).0;
        let mut particle = DebrisParticle::random(&mut rng);
        let lifetime = particle.max_age;
        assert!((300..=600).contains(&lifetime));

        let mut previous_age = particle.age;
        while !particle.expired() {
            particle.tick();
            assert_eq!(particle.age, previous_age + 1);
            previous_age = particle.age;
        }
        assert_eq!(particle.age, lifetime);
    }

    #[test]
    fn test_particle_fades_in_then_out() {
        let mut rng = SimRng::from_seed_u64(9).0;
        let mut particle = DebrisParticle::random(&mut rng);
        assert_eq!(particle.alpha, 0.0);

        // Fade-in: alpha climbs to the target and holds.
        for _ in 0..200 {
            particle.tick();
        }
        assert_eq!(particle.alpha, particle.target_alpha);

        // Fade-out: by the end of life alpha has collapsed toward zero.
        while particle.age < particle.max_age - 1 {
            particle.tick();
        }
        assert!(particle.alpha < particle.target_alpha * 0.05);
    }

    #[test]
    fn test_update_system_despawns_expired_exactly_once() {
        let mut app = App::new();
        app.add_systems(Update, update_debris);

        let mut rng = SimRng::from_seed_u64(1).0;
        let mut particle = DebrisParticle::random(&mut rng);
        particle.max_age = 3;
        app.world_mut()
            .spawn((particle, Transform::default()));

        for expected_alive in [1, 1, 0, 0] {
            app.update();
            let world = app.world_mut();
            let alive = world.query::<&DebrisParticle>().iter(world).count();
            assert_eq!(alive, expected_alive);
        }
    }

    #[test]
    fn test_drift_is_slow() {
        let mut rng = SimRng::from_seed_u64(21).0;
        for _ in 0..100 {
            let particle = DebrisParticle::random(&mut rng);
            let speed = particle.drift.length();
            assert!((0.1..0.3).contains(&speed) || (speed - 0.1).abs() < 1e-4);
        }
    }
}
