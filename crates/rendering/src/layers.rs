//! Z-ordering contract of the feedback layer.
//!
//! The visual passes must sandwich the world correctly: litter lies on the
//! ground *under* player and NPC sprites, the color grade darkens
//! *everything* in the world, and the HUD (egui) always composites last.
//! Sprite z-values encode that order; actor sprites spawned by the external
//! movement systems are expected to sit between [`DEBRIS_Z`] and
//! [`TINT_OVERLAY_Z`].

/// Ground litter, behind all actors.
pub const DEBRIS_Z: f32 = 1.0;

/// Full-viewport color grade, above the whole world.
pub const TINT_OVERLAY_Z: f32 = 500.0;
