//! Lookup state
//! Everything the window shows, driven by selector and search events.

use crate::config::AppConfig;
use crate::data::{
    Catalog, CourseOption, DataLoader, EquivalencyRecord, LookupError, ResultSet, SortColumn,
    SortDirection,
};
use std::path::PathBuf;

pub const READY_STATUS: &str = "Ready - Select a department and course";
pub const LOAD_ERROR_HINT: &str = "Fix the issue above and reopen the file or restart the app.";

/// Current selector, table and status state.
pub struct LookupState {
    config: AppConfig,
    catalog: Option<Catalog>,
    pub load_error: Option<String>,
    pub departments: Vec<String>,
    pub courses: Vec<CourseOption>,
    pub selected_dept: Option<String>,
    /// `None` while a department is selected means "all courses".
    pub selected_course: Option<CourseOption>,
    pub results: Option<ResultSet>,
    pub status: String,
    pub sort: Option<(SortColumn, SortDirection)>,
    pub search_query: String,
}

impl LookupState {
    /// Read the configured data file once and build the initial state.
    pub fn load(config: AppConfig) -> Self {
        let mut state = Self {
            config,
            catalog: None,
            load_error: None,
            departments: Vec::new(),
            courses: Vec::new(),
            selected_dept: None,
            selected_course: None,
            results: None,
            status: String::new(),
            sort: None,
            search_query: String::new(),
        };
        state.reload();
        state
    }

    /// Switch to another data file and load it.
    pub fn open(&mut self, path: PathBuf) {
        self.config.data_file = path;
        self.reload();
    }

    fn reload(&mut self) {
        let loader = DataLoader::new(&self.config.data_file);
        self.clear_selection();
        self.search_query.clear();

        match loader.load() {
            Ok(records) => {
                tracing::info!(
                    "Loaded {} total rows from {}",
                    records.len(),
                    loader.file_path().display()
                );
                let catalog = Catalog::new(
                    records,
                    self.config.home_institution.clone(),
                    self.config.max_results,
                );
                tracing::info!(
                    "Indexed {} {} courses with C-IDs",
                    catalog.course_count(),
                    catalog.home().unwrap_or("local")
                );
                self.departments = catalog.departments();
                tracing::info!("Populated {} departments", self.departments.len());
                self.catalog = Some(catalog);
                self.load_error = None;
                self.status = READY_STATUS.to_string();
            }
            Err(e) => {
                tracing::error!("Data load error: {}", e);
                self.catalog = None;
                self.departments.clear();
                self.status = e.to_string();
                self.load_error = Some(e.to_string());
            }
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn record_count(&self) -> usize {
        self.catalog.as_ref().map(Catalog::record_count).unwrap_or(0)
    }

    pub fn is_home(&self, record: &EquivalencyRecord) -> bool {
        self.catalog.as_ref().is_some_and(|c| c.is_home(record))
    }

    /// Narrow the course selector and show the whole department.
    pub fn select_department(&mut self, dept: &str) {
        let Some(catalog) = &self.catalog else {
            return;
        };
        tracing::debug!("Department selected: {}", dept);

        self.selected_dept = Some(dept.to_string());
        self.selected_course = None;
        self.search_query.clear();
        self.courses = catalog.courses_in(dept);
        tracing::info!(
            "Populated {} courses for {} (plus 'all' option)",
            self.courses.len(),
            dept
        );
        let result = catalog.department_equivalents(dept);
        self.show(result);
    }

    /// Show one course's equivalents, or the department for `None`.
    pub fn select_course(&mut self, course: Option<CourseOption>) {
        let (Some(catalog), Some(dept)) = (&self.catalog, self.selected_dept.clone()) else {
            return;
        };
        self.search_query.clear();

        let result = match &course {
            Some(option) => {
                tracing::debug!("Course selected: {} {}", dept, option.number);
                catalog.course_equivalents(&dept, &option.number)
            }
            None => catalog.department_equivalents(&dept),
        };
        self.selected_course = course;
        self.show(result);
    }

    /// Reset both selectors and empty the table.
    pub fn clear_selection(&mut self) {
        self.selected_dept = None;
        self.selected_course = None;
        self.courses.clear();
        self.results = None;
        self.sort = None;
        if self.catalog.is_some() {
            self.status = READY_STATUS.to_string();
        }
    }

    /// Run the smart search for the current query; an empty query returns
    /// to the selector view.
    pub fn run_search(&mut self) {
        let Some(catalog) = &self.catalog else {
            return;
        };
        let query = self.search_query.trim().to_string();

        if query.is_empty() {
            match self.selected_dept.clone() {
                Some(_) => {
                    let course = self.selected_course.clone();
                    self.select_course(course);
                }
                None => {
                    self.results = None;
                    self.sort = None;
                    self.status = READY_STATUS.to_string();
                }
            }
            return;
        }

        let started = std::time::Instant::now();
        let result = catalog.search(&query);
        tracing::debug!("Search {:?} took {:?}", query, started.elapsed());
        match result {
            Err(LookupError::QueryTooShort) => {
                self.status = LookupError::QueryTooShort.to_string();
            }
            other => self.show(other),
        }
    }

    /// Sort by `column`, flipping direction when it is already the sort key.
    pub fn sort_by(&mut self, column: SortColumn) {
        let direction = match self.sort {
            Some((current, direction)) if current == column => direction.toggled(),
            _ => SortDirection::Ascending,
        };
        self.sort = Some((column, direction));

        if let Some(results) = &mut self.results {
            results.sort_by(column, direction);
            tracing::debug!(
                "Sorted {} rows by {} {:?}",
                results.rows.len(),
                column.label(),
                direction
            );
        }
    }

    fn show(&mut self, result: Result<ResultSet, LookupError>) {
        self.sort = None;
        match result {
            Ok(results) => {
                self.status = results.summary();
                self.results = Some(results);
            }
            Err(e) => {
                self.status = e.to_string();
                self.results = None;
            }
        }
    }
}
