//! Ecological product comparison table.
//!
//! A read-only browser over the product catalog, opened and closed with the
//! C key independently of everything else. Clicking a column header sorts
//! by that column; clicking it again flips the direction. Sorting is stable,
//! so products with equal keys keep their catalog order in either direction.
//! Long lists scroll; egui's `ScrollArea::show_rows` clamps the offset and
//! lays out only the visible row range, clipped to the table interior.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use simulation::catalog::{ProductCatalog, ProductRecord};
use simulation::purchase::DecisionGate;

/// Height of one product row, in points.
const ROW_HEIGHT: f32 = 28.0;

/// Column widths: producto, precio, impacto, durabilidad, tipo.
const COLUMN_WIDTHS: [f32; 5] = [180.0, 70.0, 110.0, 150.0, 130.0];

// ---------------------------------------------------------------------------
// Sort state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortCriterion {
    #[default]
    Name,
    Price,
    Impact,
    Durability,
}

impl SortCriterion {
    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Producto",
            Self::Price => "Precio",
            Self::Impact => "Impacto",
            Self::Durability => "Durabilidad",
        }
    }
}

/// Open/closed flag plus the active sort of the comparison table.
#[derive(Resource, Debug, Clone)]
pub struct ComparisonTable {
    pub open: bool,
    pub criterion: SortCriterion,
    pub ascending: bool,
}

impl Default for ComparisonTable {
    fn default() -> Self {
        Self {
            open: false,
            criterion: SortCriterion::Name,
            ascending: true,
        }
    }
}

impl ComparisonTable {
    /// Header click: toggle direction on the active column, otherwise
    /// switch column and reset to ascending.
    pub fn toggle_sort(&mut self, criterion: SortCriterion) {
        if self.criterion == criterion {
            self.ascending = !self.ascending;
        } else {
            self.criterion = criterion;
            self.ascending = true;
        }
    }
}

/// The catalog's products ordered by the active criterion. Stable in both
/// directions: equal keys keep catalog (name) order.
pub fn sorted_products(
    catalog: &ProductCatalog,
    criterion: SortCriterion,
    ascending: bool,
) -> Vec<(String, ProductRecord)> {
    let mut rows: Vec<(String, ProductRecord)> = catalog
        .iter()
        .map(|(name, record)| (name.to_string(), record.clone()))
        .collect();

    rows.sort_by(|a, b| {
        let ordering = match criterion {
            SortCriterion::Name => a.0.cmp(&b.0),
            SortCriterion::Price => a.1.price.cmp(&b.1.price),
            SortCriterion::Impact => a
                .1
                .category
                .contamination_weight()
                .total_cmp(&b.1.category.contamination_weight()),
            SortCriterion::Durability => a.1.durability.cmp(&b.1.durability),
        };
        if ascending {
            ordering
        } else {
            ordering.reverse()
        }
    });

    rows
}

// ---------------------------------------------------------------------------
// Systems
// ---------------------------------------------------------------------------

/// C opens and closes the table. Gated off while the decision modal owns
/// input.
pub fn toggle_comparison_table(
    keys: Res<ButtonInput<KeyCode>>,
    mut table: ResMut<ComparisonTable>,
) {
    if keys.just_pressed(KeyCode::KeyC) {
        table.open = !table.open;
    }
}

pub fn comparison_table_ui(
    mut contexts: EguiContexts,
    mut table: ResMut<ComparisonTable>,
    catalog: Res<ProductCatalog>,
    gate: Res<DecisionGate>,
    keys: Res<ButtonInput<KeyCode>>,
) {
    if !table.open {
        return;
    }

    // Escape closes the table, unless the decision modal is consuming it.
    if keys.just_pressed(KeyCode::Escape) && !gate.is_open() {
        table.open = false;
        return;
    }

    let ctx = contexts.ctx_mut();

    // Dim the world; the table owns the pointer while open.
    let screen_rect = ctx.screen_rect();
    egui::Area::new(egui::Id::new("comparison_table_backdrop"))
        .fixed_pos(screen_rect.min)
        .order(egui::Order::Middle)
        .show(ctx, |ui| {
            let painter = ui.painter();
            painter.rect_filled(
                screen_rect,
                egui::CornerRadius::ZERO,
                egui::Color32::from_black_alpha(200),
            );
            ui.allocate_rect(screen_rect, egui::Sense::click());
        });

    let rows = sorted_products(&catalog, table.criterion, table.ascending);
    let mut open = true;
    let mut clicked: Option<SortCriterion> = None;

    egui::Window::new("Comparador Ecológico")
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .default_width(COLUMN_WIDTHS.iter().sum::<f32>() + 40.0)
        .show(ctx, |ui| {
            ui.add_space(4.0);

            // Clickable column headers with the active sort marker.
            ui.horizontal(|ui| {
                for (criterion, width) in [
                    (SortCriterion::Name, COLUMN_WIDTHS[0]),
                    (SortCriterion::Price, COLUMN_WIDTHS[1]),
                    (SortCriterion::Impact, COLUMN_WIDTHS[2]),
                    (SortCriterion::Durability, COLUMN_WIDTHS[3]),
                ] {
                    let mut text = criterion.label().to_string();
                    if criterion == table.criterion {
                        text.push_str(if table.ascending { " ▼" } else { " ▲" });
                    }
                    if ui
                        .add_sized([width, 24.0], egui::Button::new(text))
                        .clicked()
                    {
                        clicked = Some(criterion);
                    }
                }
                ui.add_sized(
                    [COLUMN_WIDTHS[4], 24.0],
                    egui::Label::new(egui::RichText::new("Tipo").strong()),
                );
            });
            ui.separator();

            egui::ScrollArea::vertical()
                .max_height(ROW_HEIGHT * 8.0)
                .show_rows(ui, ROW_HEIGHT, rows.len(), |ui, range| {
                    for (name, record) in &rows[range] {
                        product_row(ui, name, record);
                    }
                });

            ui.separator();
            ui.label(
                egui::RichText::new(
                    "Click en columnas para ordenar | Scroll para navegar | ESC para cerrar",
                )
                .size(11.0)
                .color(egui::Color32::from_rgb(180, 180, 180)),
            );
        });

    if let Some(criterion) = clicked {
        table.toggle_sort(criterion);
    }
    table.open = open && table.open;
}

fn product_row(ui: &mut egui::Ui, name: &str, record: &ProductRecord) {
    ui.horizontal(|ui| {
        ui.add_sized(
            [COLUMN_WIDTHS[0], ROW_HEIGHT],
            egui::Label::new(name),
        );
        ui.add_sized(
            [COLUMN_WIDTHS[1], ROW_HEIGHT],
            egui::Label::new(
                egui::RichText::new(format!("${}", record.price))
                    .color(egui::Color32::from_rgb(255, 220, 80)),
            ),
        );

        let (r, g, b) = record.impact.color();
        ui.add_sized(
            [COLUMN_WIDTHS[2], ROW_HEIGHT],
            egui::Label::new(
                egui::RichText::new(record.impact.label())
                    .strong()
                    .color(egui::Color32::WHITE)
                    .background_color(egui::Color32::from_rgb(r, g, b)),
            ),
        );

        ui.add_sized(
            [COLUMN_WIDTHS[3], ROW_HEIGHT],
            egui::ProgressBar::new(f32::from(record.durability) / 100.0)
                .text(format!("{}%", record.durability)),
        );

        let tipo_color = if record.category.is_necessity() {
            egui::Color32::from_rgb(80, 220, 80)
        } else {
            egui::Color32::from_rgb(255, 140, 60)
        };
        ui.add_sized(
            [COLUMN_WIDTHS[4], ROW_HEIGHT],
            egui::Label::new(
                egui::RichText::new(record.category.label()).color(tipo_color),
            ),
        );
    });
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
