//! Gizmo rendering for crisis smoke.
//!
//! Each puff is drawn as three concentric filled-looking circles with
//! decreasing alpha, a cheap soft-blur approximation that avoids a real
//! blur pass. Smoke composites over the graded scene; the simulation only
//! keeps smoke entities alive in the critical band, so no extra gating is
//! needed here.

use bevy::prelude::*;

use simulation::atmosphere::SmokeParticle;

/// Radius step between the concentric circles, in world units.
const RING_STEP: f32 = 5.0;

/// Alpha falloff per ring (inner rings are the most opaque).
const RING_ALPHA_FALLOFF: f32 = 0.3;

/// Radius and alpha (0-255 scale) of each of the three rings of a puff.
pub fn ring_profile(size: f32, alpha: f32) -> [(f32, f32); 3] {
    let mut rings = [(0.0, 0.0); 3];
    for (i, ring) in rings.iter_mut().enumerate() {
        let radius = size / 2.0 - i as f32 * RING_STEP;
        let ring_alpha = alpha * (1.0 - i as f32 * RING_ALPHA_FALLOFF);
        *ring = (radius.max(0.0), ring_alpha.max(0.0));
    }
    rings
}

/// Draw every smoke puff as its three-ring gradient.
pub fn draw_smoke(particles: Query<(&SmokeParticle, &Transform)>, mut gizmos: Gizmos) {
    for (particle, transform) in &particles {
        let (r, g, b) = particle.color;
        let center = transform.translation.truncate();
        for (radius, alpha) in ring_profile(particle.size, particle.alpha) {
            if radius <= 0.0 || alpha <= 0.0 {
                continue;
            }
            gizmos.circle_2d(center, radius, Color::srgba_u8(r, g, b, alpha as u8));
        }
    }
}

pub struct AtmosphereRenderPlugin;

impl Plugin for AtmosphereRenderPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, draw_smoke);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rings_shrink_and_fade_inward() {
        let rings = ring_profile(60.0, 50.0);
        let expected = [(30.0, 50.0), (25.0, 35.0), (20.0, 20.0)];
        for ((radius, alpha), (exp_radius, exp_alpha)) in rings.iter().zip(expected) {
            assert!((radius - exp_radius).abs() < 0.001);
            assert!((alpha - exp_alpha).abs() < 0.001);
        }
    }

    #[test]
    fn test_tiny_puff_never_goes_negative() {
        for (radius, alpha) in ring_profile(8.0, 1.0) {
            assert!(radius >= 0.0);
            assert!(alpha >= 0.0);
        }
    }
}
