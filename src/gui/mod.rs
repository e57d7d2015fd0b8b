//! GUI module - User interface components

mod app;
mod results_table;
mod selector_panel;
mod state;

pub use app::LookupApp;
pub use results_table::ResultsTable;
pub use selector_panel::{SelectorAction, SelectorPanel};
pub use state::LookupState;
