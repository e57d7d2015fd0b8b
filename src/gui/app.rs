//! C-ID Lookup Main Application
//! Main window with the selector panel above the results table.

use crate::config::AppConfig;
use crate::gui::results_table::caption;
use crate::gui::{LookupState, ResultsTable, SelectorAction, SelectorPanel};
use egui::{Color32, RichText, TopBottomPanel};
use std::time::{Duration, Instant};

/// Pause after the last keystroke before a search runs.
const SEARCH_DELAY: Duration = Duration::from_millis(300);

/// Main application window.
pub struct LookupApp {
    state: LookupState,
    selector_panel: SelectorPanel,
    results_table: ResultsTable,

    // Debounced search
    search_edited_at: Option<Instant>,
}

impl LookupApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        // Slightly larger text than egui's default
        cc.egui_ctx.set_zoom_factor(1.15);

        Self {
            state: LookupState::load(config),
            selector_panel: SelectorPanel::new(),
            results_table: ResultsTable::new(),
            search_edited_at: None,
        }
    }

    /// Let the user pick a different CSV file and load it.
    fn handle_open_file(&mut self) {
        let mut dialog = rfd::FileDialog::new().add_filter("CSV Files", &["csv"]);
        if let Some(dir) = self.state.config().data_file.parent() {
            if dir.is_dir() {
                dialog = dialog.set_directory(dir);
            }
        }

        if let Some(path) = dialog.pick_file() {
            tracing::info!("Opening {}", path.display());
            self.search_edited_at = None;
            self.state.open(path);
        }
    }

    fn handle_action(&mut self, action: SelectorAction) {
        match action {
            SelectorAction::DepartmentSelected(dept) => {
                self.search_edited_at = None;
                self.state.select_department(&dept);
            }
            SelectorAction::CourseSelected(course) => {
                self.search_edited_at = None;
                self.state.select_course(course);
            }
            SelectorAction::ClearSelection => {
                self.search_edited_at = None;
                self.state.search_query.clear();
                self.state.clear_selection();
            }
            SelectorAction::SearchEdited => {
                self.search_edited_at = Some(Instant::now());
            }
            SelectorAction::OpenFile => self.handle_open_file(),
            SelectorAction::None => {}
        }
    }

    /// Run a pending search once typing has paused.
    fn check_pending_search(&mut self, ctx: &egui::Context) {
        let Some(edited_at) = self.search_edited_at else {
            return;
        };

        let elapsed = edited_at.elapsed();
        if elapsed >= SEARCH_DELAY {
            self.search_edited_at = None;
            self.state.run_search();
        } else {
            ctx.request_repaint_after(SEARCH_DELAY - elapsed);
        }
    }
}

impl eframe::App for LookupApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_pending_search(ctx);

        // Top panel - selectors and status
        TopBottomPanel::top("selector_panel").show(ctx, |ui| {
            let action = self.selector_panel.show(ui, &mut self.state);
            self.handle_action(action);
        });

        // Central panel - results
        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(caption) = caption(&self.state) {
                ui.label(RichText::new(caption).strong().color(Color32::GRAY));
                ui.add_space(4.0);
            }
            if let Some(column) = self.results_table.show(ui, &self.state) {
                self.state.sort_by(column);
            }
        });
    }
}
