//! Sustainable actions and their rewards.
//!
//! Recycling, repairing and reusing are the counterweight to consumption:
//! each action lowers the pollution score by a fixed amount and clears all
//! litter from the world at once. Sending a [`SustainableAction`] event is
//! the single sanctioned way external code triggers the cleanup.

use bevy::prelude::*;

use crate::debris::DebrisParticle;
use crate::pollution::PollutionLevel;

/// A sustainable action performed by the player.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SustainableAction {
    Recycling,
    Repair,
    Reuse,
}

impl SustainableAction {
    /// Pollution points removed by this action.
    pub fn score_reduction(self) -> f32 {
        match self {
            Self::Recycling => 5.0,
            Self::Repair => 8.0,
            Self::Reuse => 3.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Recycling => "reciclaje",
            Self::Repair => "reparación",
            Self::Reuse => "reutilización",
        }
    }
}

/// Reduce the score and sweep all debris for every action performed.
pub fn apply_sustainable_actions(
    mut commands: Commands,
    mut actions: EventReader<SustainableAction>,
    mut pollution: ResMut<PollutionLevel>,
    debris: Query<Entity, With<DebrisParticle>>,
) {
    let mut any = false;
    for action in actions.read() {
        pollution.reduce(action.score_reduction());
        info!(
            "acción sostenible: {} (-{} contaminación)",
            action.label(),
            action.score_reduction()
        );
        any = true;
    }

    if any {
        for entity in &debris {
            commands.entity(entity).despawn();
        }
    }
}

pub struct SustainabilityPlugin;

impl Plugin for SustainabilityPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<SustainableAction>()
            .add_systems(Update, apply_sustainable_actions);
    }
}
