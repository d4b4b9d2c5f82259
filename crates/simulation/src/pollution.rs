//! World pollution state engine.
//!
//! Owns the scalar pollution score (0-100) and everything derived from it:
//! the threshold band, the visual effect flags, the gray-overlay alpha and
//! the worried-NPC dialogue overrides. The band and flags are recomputed
//! synchronously on every mutation, so no reader can ever observe them out
//! of sync with the score.
//!
//! Band boundaries use `score >= cutoff` uniformly: a score of exactly 30.0
//! is already Moderate, 60.0 is High and 85.0 is Critical, approached from
//! either direction.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::{
    COLLAPSE_THRESHOLD, CRITICAL_THRESHOLD, OVERLAY_MAX_ALPHA, POLLUTION_MAX, WARNING_THRESHOLD,
};

// ---------------------------------------------------------------------------
// Threshold bands
// ---------------------------------------------------------------------------

/// Discrete severity level derived from the pollution score. Bands order
/// by severity, so `band >= Moderate` reads as "at least moderate".
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum ThresholdBand {
    #[default]
    Low,
    Moderate,
    High,
    Critical,
}

impl ThresholdBand {
    /// Classify a score into its band. `score >= cutoff` promotes.
    pub fn for_score(score: f32) -> Self {
        if score >= COLLAPSE_THRESHOLD {
            Self::Critical
        } else if score >= CRITICAL_THRESHOLD {
            Self::High
        } else if score >= WARNING_THRESHOLD {
            Self::Moderate
        } else {
            Self::Low
        }
    }

    /// Short label shown inside the gauge.
    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "BAJO",
            Self::Moderate => "MEDIO",
            Self::High => "ALTO",
            Self::Critical => "CRÍTICO",
        }
    }

    /// Descriptive level name for dialogue and logs.
    pub fn name(self) -> &'static str {
        match self {
            Self::Low => "Bajo",
            Self::Moderate => "Moderado",
            Self::High => "Alto",
            Self::Critical => "Crítico",
        }
    }

    /// Primary indicator color (gauge arc, value text).
    pub fn color(self) -> (u8, u8, u8) {
        match self {
            Self::Low => (80, 220, 80),
            Self::Moderate => (255, 200, 60),
            Self::High => (255, 140, 60),
            Self::Critical => (255, 80, 80),
        }
    }

    /// Darker companion color for the gauge's background ring.
    pub fn ring_color(self) -> (u8, u8, u8) {
        match self {
            Self::Low => (40, 110, 40),
            Self::Moderate => (127, 100, 30),
            Self::High => (127, 70, 30),
            Self::Critical => (127, 40, 40),
        }
    }

    /// Inclusive lower edge of this band's score range.
    pub fn lower_edge(self) -> f32 {
        match self {
            Self::Low => 0.0,
            Self::Moderate => WARNING_THRESHOLD,
            Self::High => CRITICAL_THRESHOLD,
            Self::Critical => COLLAPSE_THRESHOLD,
        }
    }

    /// Exclusive upper edge of this band's score range.
    pub fn upper_edge(self) -> f32 {
        match self {
            Self::Low => WARNING_THRESHOLD,
            Self::Moderate => CRITICAL_THRESHOLD,
            Self::High => COLLAPSE_THRESHOLD,
            Self::Critical => POLLUTION_MAX,
        }
    }
}

// ---------------------------------------------------------------------------
// Effect flags
// ---------------------------------------------------------------------------

/// Boolean effect switches derived from the band. Read-only outside this
/// module; there is no code path that sets a flag independently of the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EffectFlags {
    /// Litter particles spawn in the world.
    pub debris_visible: bool,
    /// The gray color grade is applied over the scene.
    pub gray_filter: bool,
    /// NPCs switch to worried dialogue lines.
    pub npcs_worried: bool,
    /// Environmental crisis: smoke rises and the gauge pulses.
    pub crisis: bool,
}

impl EffectFlags {
    /// Derive the flag set for a band.
    pub fn for_band(band: ThresholdBand) -> Self {
        Self {
            debris_visible: band >= ThresholdBand::Moderate,
            gray_filter: band >= ThresholdBand::High,
            npcs_worried: band >= ThresholdBand::High,
            crisis: band >= ThresholdBand::Critical,
        }
    }
}

// ---------------------------------------------------------------------------
// Pollution level resource
// ---------------------------------------------------------------------------

/// The world pollution score and its derived state.
///
/// The score is only mutated through [`add`](Self::add),
/// [`reduce`](Self::reduce) and [`set`](Self::set); all three clamp to
/// [0, 100] and refresh the band and flags before returning.
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct PollutionLevel {
    score: f32,
    band: ThresholdBand,
    flags: EffectFlags,
}

impl Default for PollutionLevel {
    fn default() -> Self {
        let mut level = Self {
            score: 0.0,
            band: ThresholdBand::Low,
            flags: EffectFlags::default(),
        };
        level.refresh();
        level
    }
}

impl PollutionLevel {
    pub fn score(&self) -> f32 {
        self.score
    }

    pub fn band(&self) -> ThresholdBand {
        self.band
    }

    pub fn flags(&self) -> EffectFlags {
        self.flags
    }

    /// Increase the score (confirmed purchase), clamped at 100.
    pub fn add(&mut self, amount: f32) {
        self.set(self.score + amount);
    }

    /// Decrease the score (sustainable action), clamped at 0.
    pub fn reduce(&mut self, amount: f32) {
        self.set(self.score - amount);
    }

    /// Assign the score directly. Out-of-range values are clamped, never
    /// rejected.
    pub fn set(&mut self, value: f32) {
        self.score = value.clamp(0.0, POLLUTION_MAX);
        self.refresh();
    }

    fn refresh(&mut self) {
        self.band = ThresholdBand::for_score(self.score);
        self.flags = EffectFlags::for_band(self.band);
    }

    /// Whether any world-space effect (debris, grading) is active at all.
    pub fn effects_active(&self) -> bool {
        self.score >= WARNING_THRESHOLD
    }

    /// Alpha (0-255 scale) of the gray overlay: zero below the gray-filter
    /// edge, then linear up to [`OVERLAY_MAX_ALPHA`] at score 100.
    pub fn overlay_alpha(&self) -> f32 {
        if !self.flags.gray_filter {
            return 0.0;
        }
        let ratio = (self.score - CRITICAL_THRESHOLD) / (POLLUTION_MAX - CRITICAL_THRESHOLD);
        ratio * OVERLAY_MAX_ALPHA
    }

    /// Alternate dialogue line for an NPC role once the world is polluted
    /// enough to worry people. `None` means the NPC keeps its normal lines.
    pub fn dialogue_override(&self, role: &str) -> Option<&'static str> {
        if !self.flags.npcs_worried {
            return None;
        }
        Some(match role {
            "vendedor" => "Las ventas van bien... pero el aire se siente pesado.",
            "consumista" => "¿Notaste que hay más basura en las calles últimamente?",
            "inversor" => "La economía crece, pero el planeta sufre. ¿Vale la pena?",
            "civil" => "Mis hijos preguntan por qué el cielo está tan gris...",
            _ => "El mundo no se ve igual que antes...",
        })
    }
}

pub struct PollutionPlugin;

impl Plugin for PollutionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PollutionLevel>();
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_boundaries_promote_at_cutoff() {
        assert_eq!(ThresholdBand::for_score(0.0), ThresholdBand::Low);
        assert_eq!(ThresholdBand::for_score(29.9), ThresholdBand::Low);
        assert_eq!(ThresholdBand::for_score(30.0), ThresholdBand::Moderate);
        assert_eq!(ThresholdBand::for_score(59.9), ThresholdBand::Moderate);
        assert_eq!(ThresholdBand::for_score(60.0), ThresholdBand::High);
        assert_eq!(ThresholdBand::for_score(84.9), ThresholdBand::High);
        assert_eq!(ThresholdBand::for_score(85.0), ThresholdBand::Critical);
        assert_eq!(ThresholdBand::for_score(100.0), ThresholdBand::Critical);
    }

    #[test]
    fn test_score_clamped_to_range() {
        let mut level = PollutionLevel::default();
        level.add(250.0);
        assert_eq!(level.score(), 100.0);
        level.reduce(500.0);
        assert_eq!(level.score(), 0.0);
        level.set(-20.0);
        assert_eq!(level.score(), 0.0);
        level.set(140.0);
        assert_eq!(level.score(), 100.0);
    }

    #[test]
    fn test_band_and_flags_follow_every_mutation() {
        let mut level = PollutionLevel::default();
        assert_eq!(level.band(), ThresholdBand::Low);
        assert!(!level.flags().debris_visible);

        level.add(32.0);
        assert_eq!(level.band(), ThresholdBand::Moderate);
        assert!(level.flags().debris_visible);
        assert!(!level.flags().gray_filter);

        level.add(33.0); // 65
        assert_eq!(level.band(), ThresholdBand::High);
        assert!(level.flags().gray_filter);
        assert!(level.flags().npcs_worried);
        assert!(!level.flags().crisis);

        level.add(25.0); // 90
        assert_eq!(level.band(), ThresholdBand::Critical);
        assert!(level.flags().crisis);

        level.reduce(90.0);
        assert_eq!(level.band(), ThresholdBand::Low);
        assert_eq!(level.flags(), EffectFlags::default());
    }

    #[test]
    fn test_boundary_consistent_in_both_directions() {
        // Rising to exactly 30 and falling to exactly 30 land in the same band.
        let mut rising = PollutionLevel::default();
        rising.add(30.0);
        assert_eq!(rising.band(), ThresholdBand::Moderate);

        let mut falling = PollutionLevel::default();
        falling.set(70.0);
        assert_eq!(falling.band(), ThresholdBand::High);
        falling.reduce(40.0);
        assert_eq!(falling.score(), 30.0);
        assert_eq!(falling.band(), ThresholdBand::Moderate);
    }

    #[test]
    fn test_overlay_alpha_interpolation() {
        let mut level = PollutionLevel::default();
        level.set(59.9);
        assert_eq!(level.overlay_alpha(), 0.0);

        level.set(60.0);
        assert!(level.overlay_alpha().abs() < 0.001);

        level.set(80.0);
        let expected = (80.0 - 60.0) / 40.0 * OVERLAY_MAX_ALPHA;
        assert!((level.overlay_alpha() - expected).abs() < 0.001);

        level.set(100.0);
        assert!((level.overlay_alpha() - OVERLAY_MAX_ALPHA).abs() < 0.001);
    }

    #[test]
    fn test_dialogue_override_only_when_worried() {
        let mut level = PollutionLevel::default();
        level.set(50.0);
        assert_eq!(level.dialogue_override("vendedor"), None);

        level.set(60.0);
        assert!(level.dialogue_override("vendedor").is_some());
        assert!(level.dialogue_override("civil").is_some());
        // Unknown roles still get a generic worried line.
        assert_eq!(
            level.dialogue_override("alcalde"),
            Some("El mundo no se ve igual que antes...")
        );
    }

    #[test]
    fn test_band_edges_cover_full_range() {
        assert_eq!(ThresholdBand::Low.lower_edge(), 0.0);
        assert_eq!(ThresholdBand::Low.upper_edge(), ThresholdBand::Moderate.lower_edge());
        assert_eq!(ThresholdBand::Moderate.upper_edge(), ThresholdBand::High.lower_edge());
        assert_eq!(ThresholdBand::High.upper_edge(), ThresholdBand::Critical.lower_edge());
        assert_eq!(ThresholdBand::Critical.upper_edge(), POLLUTION_MAX);
    }

    #[test]
    fn test_labels() {
        assert_eq!(ThresholdBand::Low.label(), "BAJO");
        assert_eq!(ThresholdBand::Moderate.label(), "MEDIO");
        assert_eq!(ThresholdBand::High.label(), "ALTO");
        assert_eq!(ThresholdBand::Critical.label(), "CRÍTICO");
    }
}
