//! Circular pollution gauge.
//!
//! Painted directly with the egui painter in a fixed-position area: a dark
//! disc, the band-colored background ring, a progress arc sweeping
//! clockwise from twelve o'clock for the smoothed score, the numeric value
//! and the band label. In the critical band an extra ring pulses with a
//! slow sine to signal danger. The gauge always draws, whatever the score:
//! the player never loses sight of the current level.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use simulation::gauge::GaugeState;
use simulation::pollution::{PollutionLevel, ThresholdBand};

/// Gauge ring radius in points.
const GAUGE_RADIUS: f32 = 45.0;

/// Ring stroke width.
const GAUGE_THICKNESS: f32 = 8.0;

/// Side length of the square area the gauge is painted into.
const GAUGE_EXTENT: f32 = 130.0;

/// Points of a clockwise arc starting at twelve o'clock. `sweep` is the
/// swept fraction of the full circle, in [0, 1].
pub fn arc_points(center: egui::Pos2, radius: f32, sweep: f32) -> Vec<egui::Pos2> {
    let sweep_degrees = sweep.clamp(0.0, 1.0) * 360.0;
    let steps = (sweep_degrees.abs().ceil() as usize).max(2);

    (0..=steps)
        .map(|i| {
            let angle =
                (-90.0 + sweep_degrees * (i as f32 / steps as f32)).to_radians();
            egui::pos2(
                center.x + radius * angle.cos(),
                center.y + radius * angle.sin(),
            )
        })
        .collect()
}

fn color32((r, g, b): (u8, u8, u8)) -> egui::Color32 {
    egui::Color32::from_rgb(r, g, b)
}

pub fn gauge_ui(
    mut contexts: EguiContexts,
    pollution: Res<PollutionLevel>,
    gauge: Res<GaugeState>,
) {
    let ctx = contexts.ctx_mut();

    egui::Area::new(egui::Id::new("pollution_gauge"))
        .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-16.0, 16.0))
        .order(egui::Order::Middle)
        .show(ctx, |ui| {
            let (response, painter) = ui.allocate_painter(
                egui::vec2(GAUGE_EXTENT, GAUGE_EXTENT),
                egui::Sense::hover(),
            );
            let center = response.rect.center();

            // The displayed value trails the true score; the band shown
            // follows the displayed value so color and label stay in step
            // with what the needle says.
            let displayed = gauge.displayed;
            let band = ThresholdBand::for_score(displayed);
            let main_color = color32(band.color());

            // Backing disc and background ring.
            painter.circle_filled(
                center,
                GAUGE_RADIUS + 5.0,
                egui::Color32::from_rgb(30, 30, 35),
            );
            painter.circle_stroke(
                center,
                GAUGE_RADIUS,
                egui::Stroke::new(GAUGE_THICKNESS, color32(band.ring_color())),
            );

            // Progress arc.
            if displayed > 0.0 {
                painter.add(egui::Shape::line(
                    arc_points(center, GAUGE_RADIUS, displayed / 100.0),
                    egui::Stroke::new(GAUGE_THICKNESS, main_color),
                ));
            }

            // Danger pulse, critical band only.
            if pollution.flags().crisis {
                let pulse_alpha = ((gauge.pulse.sin() + 1.0) * 60.0) as u8;
                let (r, g, b) = band.color();
                painter.circle_stroke(
                    center,
                    GAUGE_RADIUS + 3.0,
                    egui::Stroke::new(
                        3.0,
                        egui::Color32::from_rgba_unmultiplied(r, g, b, pulse_alpha),
                    ),
                );
            }

            // Outer border.
            painter.circle_stroke(
                center,
                GAUGE_RADIUS + GAUGE_THICKNESS / 2.0,
                egui::Stroke::new(2.0, egui::Color32::from_rgb(200, 200, 200)),
            );

            // Value and band label.
            painter.text(
                center + egui::vec2(0.0, -6.0),
                egui::Align2::CENTER_CENTER,
                format!("{}", displayed.round() as i32),
                egui::FontId::proportional(24.0),
                main_color,
            );
            painter.text(
                center + egui::vec2(0.0, 16.0),
                egui::Align2::CENTER_CENTER,
                band.label(),
                egui::FontId::proportional(12.0),
                egui::Color32::from_rgb(200, 200, 200),
            );
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arc_starts_at_twelve_oclock() {
        let center = egui::pos2(100.0, 100.0);
        let points = arc_points(center, 45.0, 0.5);
        let first = points[0];
        assert!((first.x - 100.0).abs() < 0.001);
        assert!((first.y - 55.0).abs() < 0.001);
    }

    #[test]
    fn test_full_sweep_returns_to_start() {
        let center = egui::pos2(0.0, 0.0);
        let points = arc_points(center, 45.0, 1.0);
        let first = points[0];
        let last = points[points.len() - 1];
        assert!((first.x - last.x).abs() < 0.01);
        assert!((first.y - last.y).abs() < 0.01);
    }

    #[test]
    fn test_half_sweep_ends_at_six_oclock() {
        let center = egui::pos2(0.0, 0.0);
        let points = arc_points(center, 45.0, 0.5);
        let last = points[points.len() - 1];
        // Screen coordinates grow downward: 6 o'clock is +y.
        assert!((last.x - 0.0).abs() < 0.001);
        assert!((last.y - 45.0).abs() < 0.001);
    }

    #[test]
    fn test_sweep_clamped() {
        let center = egui::pos2(0.0, 0.0);
        // An out-of-range sweep is treated as a full circle.
        let clamped = arc_points(center, 45.0, 1.7);
        let full = arc_points(center, 45.0, 1.0);
        assert_eq!(clamped.len(), full.len());
    }
}
