//! Data module - CSV loading and the course catalog

mod catalog;
mod loader;
mod record;

pub use catalog::{
    Catalog, CourseOption, LookupError, ResultSet, SortColumn, SortDirection, MAX_DISPLAY_RESULTS,
};
pub use loader::DataLoader;
pub use record::EquivalencyRecord;
