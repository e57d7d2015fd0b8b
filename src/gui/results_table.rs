//! Results Table Widget
//! Scrollable equivalency table with click-to-sort headers. Home-institution
//! rows are highlighted.

use crate::data::SortColumn;
use crate::gui::selector_panel::ACCENT_GOLD;
use crate::gui::state::LookupState;
use egui::{Color32, RichText, ScrollArea};

const ROW_HEIGHT: f32 = 22.0;
const HEADER_TEXT: Color32 = Color32::from_rgb(245, 245, 245);
const HEADER_FILL: Color32 = Color32::from_rgb(30, 30, 35);
const HOME_TEXT: Color32 = Color32::from_rgb(20, 20, 20);

/// Fixed widths of the first four columns; Title takes the rest.
const FIXED_WIDTHS: [f32; 4] = [150.0, 250.0, 70.0, 100.0];

#[derive(Default)]
pub struct ResultsTable;

impl ResultsTable {
    pub fn new() -> Self {
        Self
    }

    /// Draw the table. Returns the column whose header was clicked.
    pub fn show(&mut self, ui: &mut egui::Ui, state: &LookupState) -> Option<SortColumn> {
        let mut clicked = None;

        let Some(results) = &state.results else {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Results").size(20.0).color(Color32::GRAY));
            });
            return None;
        };

        let widths = Self::column_widths(ui.available_width());

        // Header row
        egui::Frame::none()
            .fill(HEADER_FILL)
            .inner_margin(4.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    for (column, width) in SortColumn::ALL.iter().zip(widths) {
                        let arrow = match state.sort {
                            Some((sorted, direction)) if sorted == *column => direction.arrow(),
                            _ => "",
                        };
                        let text = RichText::new(format!("{} {}", column.label(), arrow))
                            .strong()
                            .color(HEADER_TEXT);
                        let button = egui::Button::new(text).frame(false);
                        if ui.add_sized([width, ROW_HEIGHT], button).clicked() {
                            clicked = Some(*column);
                        }
                    }
                });
            });

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show_rows(ui, ROW_HEIGHT, results.rows.len(), |ui, row_range| {
                for record in &results.rows[row_range] {
                    let is_home = state.is_home(record);
                    let fill = if is_home {
                        ACCENT_GOLD
                    } else {
                        Color32::TRANSPARENT
                    };

                    egui::Frame::none().fill(fill).show(ui, |ui| {
                        ui.horizontal(|ui| {
                            for (column, width) in SortColumn::ALL.iter().zip(widths) {
                                let mut text = RichText::new(column.cell(record));
                                if is_home {
                                    text = text.color(HOME_TEXT);
                                }
                                ui.add_sized(
                                    [width, ROW_HEIGHT],
                                    egui::Label::new(text).truncate(),
                                );
                            }
                        });
                    });
                }
            });

        clicked
    }

    fn column_widths(available: f32) -> [f32; 5] {
        let fixed: f32 = FIXED_WIDTHS.iter().sum();
        let spacing = 5.0 * 8.0;
        let title = (available - fixed - spacing).max(150.0);
        [
            FIXED_WIDTHS[0],
            FIXED_WIDTHS[1],
            FIXED_WIDTHS[2],
            FIXED_WIDTHS[3],
            title,
        ]
    }
}

/// Label shown above the table, e.g. `ACCT 1A - sorted by School ⬆`.
pub fn caption(state: &LookupState) -> Option<String> {
    let results = state.results.as_ref()?;
    Some(match state.sort {
        Some((column, direction)) => format!(
            "{} - sorted by {} {}",
            results.label,
            column.label(),
            direction.arrow()
        ),
        None => results.label.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::SortDirection;

    #[test]
    fn title_column_takes_remaining_width() {
        let widths = ResultsTable::column_widths(1000.0);
        assert_eq!(widths[..4], FIXED_WIDTHS);
        assert_eq!(widths[4], 1000.0 - 570.0 - 40.0);
    }

    #[test]
    fn title_column_has_minimum_width() {
        assert_eq!(ResultsTable::column_widths(300.0)[4], 150.0);
    }

    #[test]
    fn sort_arrows_differ() {
        assert_ne!(
            SortDirection::Ascending.arrow(),
            SortDirection::Descending.arrow()
        );
    }
}
