//! Dynamic color grading driven by the pollution score.
//!
//! A full-viewport quad above the world (but below the HUD) tints the scene
//! with a band-specific color whose strength grows linearly within each
//! band, so the world visibly *worsens* (gray, then gray-brown, then a
//! near-black brown) rather than merely darkening. Below the warning
//! threshold nothing is drawn at all.
//!
//! The original composited this tint with a multiply blend; the sprite
//! pipeline has no per-sprite multiply mode, so the same band tints are
//! applied as an alpha-blended darkening quad instead.

use bevy::prelude::*;

use simulation::config::{COLLAPSE_THRESHOLD, CRITICAL_THRESHOLD, WARNING_THRESHOLD};
use simulation::pollution::PollutionLevel;

use crate::layers::TINT_OVERLAY_Z;

/// Marker for the single full-viewport tint quad.
#[derive(Component)]
pub struct TintOverlay;

/// Tint color and alpha (0-255 scale) for a score, or `None` below the
/// warning threshold.
pub fn grade_for(score: f32) -> Option<((u8, u8, u8), f32)> {
    if score < WARNING_THRESHOLD {
        return None;
    }

    let (intensity, color) = if score < CRITICAL_THRESHOLD {
        let span = CRITICAL_THRESHOLD - WARNING_THRESHOLD;
        ((score - WARNING_THRESHOLD) / span, (50, 50, 50))
    } else if score < COLLAPSE_THRESHOLD {
        let span = COLLAPSE_THRESHOLD - CRITICAL_THRESHOLD;
        ((score - CRITICAL_THRESHOLD) / span, (40, 40, 35))
    } else {
        let span = 100.0 - COLLAPSE_THRESHOLD;
        (
            ((score - COLLAPSE_THRESHOLD) / span).min(1.0),
            (30, 25, 20),
        )
    };

    Some((color, (intensity * 120.0).min(255.0)))
}

/// Spawn the (initially invisible) tint quad.
pub fn setup_tint_overlay(mut commands: Commands) {
    commands.spawn((
        TintOverlay,
        Sprite::from_color(Color::NONE, Vec2::ONE),
        Transform::from_xyz(0.0, 0.0, TINT_OVERLAY_Z),
        Visibility::Hidden,
    ));
}

/// Resize the quad to the viewport and recompute its tint every frame.
pub fn update_tint_overlay(
    windows: Query<&Window>,
    pollution: Res<PollutionLevel>,
    mut overlay: Query<(&mut Sprite, &mut Visibility), With<TintOverlay>>,
) {
    let Ok(window) = windows.get_single() else {
        return;
    };
    let Ok((mut sprite, mut visibility)) = overlay.get_single_mut() else {
        return;
    };

    match grade_for(pollution.score()) {
        Some(((r, g, b), alpha)) => {
            sprite.color = Color::srgba_u8(r, g, b, alpha as u8);
            sprite.custom_size = Some(Vec2::new(window.width(), window.height()));
            *visibility = Visibility::Inherited;
        }
        None => {
            *visibility = Visibility::Hidden;
        }
    }
}

pub struct ColorGradePlugin;

impl Plugin for ColorGradePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_tint_overlay)
            .add_systems(Update, update_tint_overlay);
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_grade_below_warning() {
        assert_eq!(grade_for(0.0), None);
        assert_eq!(grade_for(29.9), None);
    }

    #[test]
    fn test_band_tints_and_ramps() {
        // Lower edge of each band starts at zero intensity.
        let (color, alpha) = grade_for(30.0).unwrap();
        assert_eq!(color, (50, 50, 50));
        assert!(alpha.abs() < 0.001);

        let (color, alpha) = grade_for(45.0).unwrap();
        assert_eq!(color, (50, 50, 50));
        assert!((alpha - 60.0).abs() < 0.001);

        let (color, alpha) = grade_for(60.0).unwrap();
        assert_eq!(color, (40, 40, 35));
        assert!(alpha.abs() < 0.001);

        let (color, _) = grade_for(84.9).unwrap();
        assert_eq!(color, (40, 40, 35));

        let (color, alpha) = grade_for(85.0).unwrap();
        assert_eq!(color, (30, 25, 20));
        assert!(alpha.abs() < 0.001);
    }

    #[test]
    fn test_intensity_caps_at_full() {
        let (_, alpha) = grade_for(100.0).unwrap();
        assert!((alpha - 120.0).abs() < 0.001);
        // Even a clamped-out-of-range score can't exceed the cap.
        let (_, alpha) = grade_for(150.0).unwrap();
        assert!((alpha - 120.0).abs() < 0.001);
    }

    #[test]
    fn test_alpha_monotonic_within_band() {
        let mut previous = -1.0;
        for step in 0..25 {
            let score = 60.0 + step as f32;
            let (_, alpha) = grade_for(score).unwrap();
            assert!(alpha >= previous);
            previous = alpha;
        }
    }
}
