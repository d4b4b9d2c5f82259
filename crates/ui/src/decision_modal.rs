//! Purchase decision modal.
//!
//! Renders the pending [`DecisionGate`] context as a centered window over a
//! click-consuming backdrop, so no game input leaks through while a
//! decision is pending. The window fades in with the gate's 300 ms
//! animation; Comprar / Cancelar buttons (or Escape, equivalent to cancel)
//! resolve the gate and publish the single [`PurchaseOutcome`] event.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use simulation::purchase::{DecisionGate, PurchaseOutcome};

/// Backdrop darkness at full fade (0-255 scale).
const BACKDROP_ALPHA: f32 = 168.0;

pub fn decision_modal_ui(
    mut contexts: EguiContexts,
    mut gate: ResMut<DecisionGate>,
    keys: Res<ButtonInput<KeyCode>>,
    mut outcomes: EventWriter<PurchaseOutcome>,
) {
    if !gate.is_open() {
        return;
    }

    let Some(context) = gate.context() else {
        return;
    };
    let product = context.product.clone();
    let reflection = context.reflection.clone();
    let price = context.price;
    let (r, g, b) = context.impact_color;
    let accent = egui::Color32::from_rgb(r, g, b);
    let title = if context.necessity {
        "Necesidad Identificada"
    } else {
        "¿Necesidad o Deseo?"
    };
    let fade = gate.fade_ratio();

    let ctx = contexts.ctx_mut();

    // Backdrop: dims the scene and swallows every pointer event underneath.
    let screen_rect = ctx.screen_rect();
    egui::Area::new(egui::Id::new("decision_modal_backdrop"))
        .fixed_pos(screen_rect.min)
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            let painter = ui.painter();
            painter.rect_filled(
                screen_rect,
                egui::CornerRadius::ZERO,
                egui::Color32::from_black_alpha((BACKDROP_ALPHA * fade) as u8),
            );
            ui.allocate_rect(screen_rect, egui::Sense::click());
        });

    let mut decision: Option<bool> = None;

    egui::Window::new(title)
        .collapsible(false)
        .resizable(false)
        .title_bar(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .default_width(380.0)
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            ui.set_opacity(fade);
            ui.vertical_centered(|ui| {
                ui.spacing_mut().item_spacing.y = 8.0;
                ui.add_space(12.0);

                ui.heading(title);
                ui.add_space(4.0);
                ui.label(
                    egui::RichText::new(format!("\"{product}\""))
                        .color(accent)
                        .size(18.0),
                );
                ui.label(format!("Precio: ${price}"));
                ui.add_space(8.0);
                ui.label(
                    egui::RichText::new(&reflection)
                        .color(egui::Color32::from_rgb(220, 220, 220)),
                );
                ui.add_space(12.0);

                let button_size = egui::Vec2::new(130.0, 36.0);
                ui.horizontal(|ui| {
                    let total_width = button_size.x * 2.0 + 16.0;
                    let avail = ui.available_width();
                    if avail > total_width {
                        ui.add_space((avail - total_width) / 2.0);
                    }

                    if ui
                        .add_sized(button_size, egui::Button::new("Cancelar"))
                        .clicked()
                    {
                        decision = Some(false);
                    }

                    ui.add_space(16.0);

                    if ui
                        .add_sized(button_size, egui::Button::new("Comprar"))
                        .clicked()
                    {
                        decision = Some(true);
                    }
                });

                ui.add_space(12.0);
            });
        });

    // Dismiss key counts as cancel.
    if keys.just_pressed(KeyCode::Escape) {
        decision = Some(false);
    }

    if let Some(confirmed) = decision {
        // `resolve` ignores clicks that land during the fade-in.
        if let Some(outcome) = gate.resolve(confirmed) {
            outcomes.send(outcome);
        }
    }
}
