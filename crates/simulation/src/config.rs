//! Tuning constants for the pollution feedback core.

/// Pollution score ceiling. The score is always clamped to [0, MAX].
pub const POLLUTION_MAX: f32 = 100.0;

/// Score at which litter starts appearing in the world.
pub const WARNING_THRESHOLD: f32 = 30.0;

/// Score at which the gray color grade kicks in and NPCs get worried.
pub const CRITICAL_THRESHOLD: f32 = 60.0;

/// Score at which the world enters environmental crisis (smoke, pulsing gauge).
pub const COLLAPSE_THRESHOLD: f32 = 85.0;

/// Hard cap on live debris particles. Spawns past the cap are dropped.
pub const DEBRIS_MAX_PARTICLES: usize = 150;

/// Interval between debris spawn waves, in milliseconds of simulated time.
pub const DEBRIS_SPAWN_INTERVAL_MS: f32 = 500.0;

/// Hard cap on live smoke particles.
pub const SMOKE_MAX_PARTICLES: usize = 30;

/// Interval between smoke spawns, in milliseconds of simulated time.
pub const SMOKE_SPAWN_INTERVAL_MS: f32 = 100.0;

/// Per-update interpolation factor for the gauge's displayed value.
pub const GAUGE_SMOOTHING: f32 = 0.05;

/// The gauge snaps to the true score once within this distance of it.
pub const GAUGE_SNAP_EPSILON: f32 = 0.1;

/// Fade-in duration of the purchase decision modal, in milliseconds.
pub const MODAL_FADE_MS: f32 = 300.0;

/// Maximum alpha (out of 255) of the gray overlay at score 100.
pub const OVERLAY_MAX_ALPHA: f32 = 150.0;

/// World extent (centered on the origin) over which debris is scattered.
pub const WORLD_WIDTH: f32 = 1600.0;
pub const WORLD_HEIGHT: f32 = 1200.0;
