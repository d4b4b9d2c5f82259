//! Damped state for the pollution gauge.
//!
//! The gauge never shows the raw score: its displayed value approaches the
//! true score by exponential smoothing and snaps once close enough, so the
//! needle glides instead of jumping on every purchase. A slow sine phase
//! drives the pulse ring the HUD draws in the critical band. This module
//! holds no authority over the score; it is a damped view of it.

use bevy::prelude::*;

use crate::config::{GAUGE_SMOOTHING, GAUGE_SNAP_EPSILON};
use crate::pollution::PollutionLevel;

/// Pulse phase advance per update, normalized to a 60 fps frame.
const PULSE_SPEED: f32 = 0.05;

/// Reference frame duration for pulse normalization, in milliseconds.
const REFERENCE_FRAME_MS: f32 = 16.67;

/// Displayed gauge value and pulse animation phase.
#[derive(Resource, Debug, Clone, Default)]
pub struct GaugeState {
    /// Smoothed value currently shown, trailing the true score.
    pub displayed: f32,
    /// Phase of the critical-band pulse animation, in radians.
    pub pulse: f32,
}

/// One smoothing step toward the target; snaps when within epsilon.
pub fn smooth_toward(current: f32, target: f32) -> f32 {
    if (target - current).abs() > GAUGE_SNAP_EPSILON {
        current + (target - current) * GAUGE_SMOOTHING
    } else {
        target
    }
}

/// Advance the displayed value and pulse phase once per frame.
pub fn update_gauge(
    time: Res<Time>,
    pollution: Res<PollutionLevel>,
    mut gauge: ResMut<GaugeState>,
) {
    gauge.displayed = smooth_toward(gauge.displayed, pollution.score());
    gauge.pulse += PULSE_SPEED * (time.delta_secs() * 1000.0 / REFERENCE_FRAME_MS);
}

pub struct GaugePlugin;

impl Plugin for GaugePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GaugeState>()
            .add_systems(Update, update_gauge);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smoothing_approaches_target() {
        let mut value = 0.0;
        for _ in 0..200 {
            value = smooth_toward(value, 50.0);
        }
        assert_eq!(value, 50.0, "should have snapped to the target by now");
    }

    #[test]
    fn test_single_step_is_five_percent() {
        let next = smooth_toward(0.0, 100.0);
        assert!((next - 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_snaps_within_epsilon() {
        assert_eq!(smooth_toward(49.95, 50.0), 50.0);
        assert_eq!(smooth_toward(50.05, 50.0), 50.0);
    }

    #[test]
    fn test_smoothing_works_downward() {
        let mut value = 80.0;
        let step = smooth_toward(value, 30.0);
        assert!(step < value);
        for _ in 0..300 {
            value = smooth_toward(value, 30.0);
        }
        assert_eq!(value, 30.0);
    }
}
