//! Purchase decision gate.
//!
//! When the shop reports a purchase attempt, the gate looks the product up
//! in the catalog, builds a decision context and opens a modal that blocks
//! all game input until the player confirms or cancels. The gate is a small
//! state machine:
//!
//! ```text
//! Closed -> Opening (fade-in, MODAL_FADE_MS) -> Open -> Closed
//! ```
//!
//! The decision is delivered as an explicit [`PurchaseOutcome`] event:
//! exactly one per completed lifecycle, never both variants, never zero
//! once a terminal input arrives. Confirming applies the product's
//! contamination weight to the pollution score; the price deduction itself
//! belongs to the external shop, which observes the same event.
//!
//! Opening the gate while a decision is already pending is a no-op: the
//! existing context is left untouched.

use bevy::prelude::*;

use crate::catalog::ProductCatalog;
use crate::config::MODAL_FADE_MS;
use crate::pollution::PollutionLevel;

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// A purchase attempt intercepted from the (external) shop flow.
#[derive(Event, Debug, Clone)]
pub struct PurchaseRequest {
    pub product: String,
    /// Live shop price; may differ from the catalog's reference price.
    pub price: u32,
}

/// Terminal result of one modal lifecycle.
#[derive(Event, Debug, Clone, PartialEq)]
pub enum PurchaseOutcome {
    Confirmed {
        product: String,
        price: u32,
        contamination: f32,
    },
    Cancelled {
        product: String,
    },
}

// ---------------------------------------------------------------------------
// Gate state
// ---------------------------------------------------------------------------

/// Everything the modal needs to render one pending decision. Created when
/// a purchase is intercepted, dropped when the modal closes.
#[derive(Debug, Clone)]
pub struct DecisionContext {
    pub product: String,
    pub price: u32,
    pub reflection: String,
    pub impact_color: (u8, u8, u8),
    /// Necessity framing: switches the modal title between the "identified
    /// need" and "need or desire?" headings.
    pub necessity: bool,
    pub contamination: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GatePhase {
    #[default]
    Closed,
    /// Fade-in running; input is already blocked but no decision is taken.
    Opening,
    /// Awaiting exactly one of confirm / cancel / dismiss.
    Open,
}

/// The modal purchase gate. While not closed it owns all game input.
#[derive(Resource, Debug, Default)]
pub struct DecisionGate {
    phase: GatePhase,
    fade_elapsed_ms: f32,
    context: Option<DecisionContext>,
}

impl DecisionGate {
    pub fn phase(&self) -> GatePhase {
        self.phase
    }

    pub fn context(&self) -> Option<&DecisionContext> {
        self.context.as_ref()
    }

    /// True from the moment a decision is pending until it is resolved.
    pub fn is_open(&self) -> bool {
        self.phase != GatePhase::Closed
    }

    /// Current fade-in ratio in [0, 1].
    pub fn fade_ratio(&self) -> f32 {
        match self.phase {
            GatePhase::Closed => 0.0,
            GatePhase::Opening => (self.fade_elapsed_ms / MODAL_FADE_MS).clamp(0.0, 1.0),
            GatePhase::Open => 1.0,
        }
    }

    /// Start a modal for the given context. One decision at a time: if the
    /// gate is already open this is a no-op and the pending context stays.
    pub fn open(&mut self, context: DecisionContext) {
        if self.phase != GatePhase::Closed {
            return;
        }
        self.phase = GatePhase::Opening;
        self.fade_elapsed_ms = 0.0;
        self.context = Some(context);
    }

    /// Advance the fade-in animation.
    pub fn tick(&mut self, delta_ms: f32) {
        if self.phase == GatePhase::Opening {
            self.fade_elapsed_ms += delta_ms;
            if self.fade_elapsed_ms >= MODAL_FADE_MS {
                self.phase = GatePhase::Open;
            }
        }
    }

    /// Resolve the pending decision and close the gate. Returns the single
    /// outcome to publish, or `None` while no decision is accepted (gate
    /// closed or still fading in).
    pub fn resolve(&mut self, confirmed: bool) -> Option<PurchaseOutcome> {
        if self.phase != GatePhase::Open {
            return None;
        }
        let context = self.context.take()?;
        self.phase = GatePhase::Closed;
        self.fade_elapsed_ms = 0.0;

        Some(if confirmed {
            PurchaseOutcome::Confirmed {
                product: context.product,
                price: context.price,
                contamination: context.contamination,
            }
        } else {
            PurchaseOutcome::Cancelled {
                product: context.product,
            }
        })
    }
}

/// Run condition for game-world input systems: only process input while no
/// decision modal is blocking it.
pub fn gate_closed(gate: Res<DecisionGate>) -> bool {
    !gate.is_open()
}

// ---------------------------------------------------------------------------
// Systems
// ---------------------------------------------------------------------------

/// Intercept purchase attempts: look the product up and open the modal.
pub fn open_gate_on_request(
    mut requests: EventReader<PurchaseRequest>,
    catalog: Res<ProductCatalog>,
    mut gate: ResMut<DecisionGate>,
) {
    for request in requests.read() {
        let record = catalog.record_or_default(&request.product);
        gate.open(DecisionContext {
            product: request.product.clone(),
            price: request.price,
            reflection: record.reflection.clone(),
            impact_color: record.impact.color(),
            necessity: record.category.is_necessity(),
            contamination: record.category.contamination_weight(),
        });
    }
}

/// Drive the fade-in.
pub fn tick_gate(time: Res<Time>, mut gate: ResMut<DecisionGate>) {
    gate.tick(time.delta_secs() * 1000.0);
}

/// Apply the contamination delta of confirmed purchases to the world score.
pub fn apply_purchase_outcomes(
    mut outcomes: EventReader<PurchaseOutcome>,
    mut pollution: ResMut<PollutionLevel>,
) {
    for outcome in outcomes.read() {
        if let PurchaseOutcome::Confirmed {
            product,
            contamination,
            ..
        } = outcome
        {
            pollution.add(*contamination);
            info!(
                "compra confirmada: {} (+{} contaminación, total {:.1})",
                product,
                contamination,
                pollution.score()
            );
        }
    }
}

pub struct PurchasePlugin;

impl Plugin for PurchasePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DecisionGate>()
            .add_event::<PurchaseRequest>()
            .add_event::<PurchaseOutcome>()
            .add_systems(
                Update,
                (open_gate_on_request, tick_gate, apply_purchase_outcomes).chain(),
            );
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
