//! Cross-module scenarios: purchases flowing through the gate into the
//! pollution score and the visual effect flags.

use bevy::prelude::*;

use crate::catalog::{CatalogPlugin, ProductCatalog};
use crate::config::MODAL_FADE_MS;
use crate::pollution::{PollutionLevel, PollutionPlugin, ThresholdBand};
use crate::purchase::{
    apply_purchase_outcomes, open_gate_on_request, DecisionGate, GatePhase, PurchaseOutcome,
    PurchaseRequest,
};

fn test_app() -> App {
    let mut app = App::new();
    app.add_plugins((CatalogPlugin, PollutionPlugin))
        .init_resource::<DecisionGate>()
        .add_event::<PurchaseRequest>()
        .add_event::<PurchaseOutcome>()
        .add_systems(Update, (open_gate_on_request, apply_purchase_outcomes).chain());
    app
}

/// Drive one full modal lifecycle: request -> fade -> decision -> outcome.
fn complete_purchase(app: &mut App, product: &str, price: u32, confirmed: bool) {
    app.world_mut().send_event(PurchaseRequest {
        product: product.to_string(),
        price,
    });
    app.update();

    let outcome = {
        let mut gate = app.world_mut().resource_mut::<DecisionGate>();
        assert_eq!(gate.phase(), GatePhase::Opening);
        gate.tick(MODAL_FADE_MS);
        gate.resolve(confirmed).expect("gate was open")
    };
    app.world_mut().send_event(outcome);
    app.update();
}

#[test]
fn test_four_light_desires_reach_moderate() {
    let mut app = test_app();

    // Four confirmed light-desire purchases, 8 points each.
    for _ in 0..4 {
        complete_purchase(&mut app, "Galleta", 80, true);
    }

    let pollution = app.world().resource::<PollutionLevel>();
    assert_eq!(pollution.score(), 32.0);
    assert_eq!(pollution.band(), ThresholdBand::Moderate);
    assert!(pollution.flags().debris_visible);
    assert!(!pollution.flags().gray_filter, "still below 60");
}

#[test]
fn test_cancelled_purchases_leave_no_trace() {
    let mut app = test_app();

    for _ in 0..10 {
        complete_purchase(&mut app, "Tablet", 800, false);
    }

    let pollution = app.world().resource::<PollutionLevel>();
    assert_eq!(pollution.score(), 0.0);
    assert_eq!(pollution.band(), ThresholdBand::Low);
}

#[test]
fn test_unknown_product_buys_as_light_desire() {
    let mut app = test_app();

    complete_purchase(&mut app, "Dron de juguete", 999, true);

    let pollution = app.world().resource::<PollutionLevel>();
    assert_eq!(pollution.score(), 8.0);
}

#[test]
fn test_boundary_reached_from_above_matches_from_below() {
    let mut app = test_app();

    app.world_mut().resource_mut::<PollutionLevel>().set(70.0);
    assert_eq!(
        app.world().resource::<PollutionLevel>().band(),
        ThresholdBand::High
    );

    app.world_mut()
        .resource_mut::<PollutionLevel>()
        .reduce(40.0);
    let pollution = app.world().resource::<PollutionLevel>();
    assert_eq!(pollution.score(), 30.0);
    assert_eq!(pollution.band(), ThresholdBand::Moderate);

    // And rising to the same value from below lands in the same band.
    let mut from_below = PollutionLevel::default();
    from_below.add(30.0);
    assert_eq!(from_below.band(), ThresholdBand::Moderate);
}

#[test]
fn test_request_while_modal_open_is_ignored() {
    let mut app = test_app();

    app.world_mut().send_event(PurchaseRequest {
        product: "Celular".to_string(),
        price: 500,
    });
    app.update();
    app.world_mut().send_event(PurchaseRequest {
        product: "Tablet".to_string(),
        price: 800,
    });
    app.update();

    let gate = app.world().resource::<DecisionGate>();
    let context = gate.context().expect("first request opened the gate");
    assert_eq!(context.product, "Celular");
}

#[test]
fn test_live_price_flows_through_outcome() {
    let mut app = test_app();

    // The shop may quote an inflated price; the outcome echoes it verbatim.
    let reference = app
        .world()
        .resource::<ProductCatalog>()
        .record_or_default("Celular")
        .price;
    assert_eq!(reference, 500);

    app.world_mut().send_event(PurchaseRequest {
        product: "Celular".to_string(),
        price: 520,
    });
    app.update();

    let mut gate = app.world_mut().resource_mut::<DecisionGate>();
    gate.tick(MODAL_FADE_MS);
    match gate.resolve(true) {
        Some(PurchaseOutcome::Confirmed { price, .. }) => assert_eq!(price, 520),
        other => panic!("expected Confirmed, got {other:?}"),
    }
}
