use bevy::prelude::*;
use bevy_egui::EguiPlugin;

use simulation::purchase::gate_closed;

pub mod comparison_table;
pub mod decision_modal;
pub mod gauge_ui;
pub mod theme;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(EguiPlugin)
            .init_resource::<comparison_table::ComparisonTable>()
            .add_systems(Startup, theme::apply_theme)
            .add_systems(
                Update,
                (
                    gauge_ui::gauge_ui,
                    decision_modal::decision_modal_ui,
                    comparison_table::toggle_comparison_table.run_if(gate_closed),
                    comparison_table::comparison_table_ui,
                ),
            );
    }
}
