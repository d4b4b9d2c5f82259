use bevy::prelude::*;

pub mod atmosphere;
pub mod catalog;
pub mod config;
pub mod debris;
pub mod gauge;
pub mod pollution;
pub mod purchase;
pub mod sim_rng;
pub mod sustainability;

#[cfg(test)]
mod integration_tests;

pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            sim_rng::SimRngPlugin,
            catalog::CatalogPlugin,
            pollution::PollutionPlugin,
            debris::DebrisPlugin,
            atmosphere::AtmospherePlugin,
            gauge::GaugePlugin,
            purchase::PurchasePlugin,
            sustainability::SustainabilityPlugin,
        ));
    }
}
