//! Selector Panel Widget
//! Top panel with the department and course lists, selection info, search
//! box and status line.

use crate::data::CourseOption;
use crate::gui::state::{LookupState, LOAD_ERROR_HINT};
use egui::{Color32, RichText, ScrollArea};

pub const ACCENT_RED: Color32 = Color32::from_rgb(255, 50, 50);
pub const ACCENT_GOLD: Color32 = Color32::from_rgb(197, 179, 88);
pub const LABEL_BLUE: Color32 = Color32::from_rgb(51, 122, 183);
const ERROR_RED: Color32 = Color32::from_rgb(180, 0, 0);

const LIST_HEIGHT: f32 = 130.0;
const DEPT_LIST_WIDTH: f32 = 150.0;
const COURSE_LIST_WIDTH: f32 = 450.0;
const ALL_COURSES_LABEL: &str = "(All courses)";

/// Actions triggered by the selector panel
#[derive(Debug, Clone, PartialEq)]
pub enum SelectorAction {
    None,
    DepartmentSelected(String),
    CourseSelected(Option<CourseOption>),
    ClearSelection,
    SearchEdited,
    OpenFile,
}

/// Department/course selectors over a [`LookupState`].
#[derive(Default)]
pub struct SelectorPanel;

impl SelectorPanel {
    pub fn new() -> Self {
        Self
    }

    /// Draw the panel
    pub fn show(&mut self, ui: &mut egui::Ui, state: &mut LookupState) -> SelectorAction {
        let mut action = SelectorAction::None;

        ui.add_space(5.0);
        ui.label(
            RichText::new("C-ID Course Equivalency Lookup")
                .size(22.0)
                .color(ACCENT_RED),
        );
        if let Some(home) = &state.config().home_institution {
            ui.label(RichText::new(home).size(13.0).color(ACCENT_GOLD));
        }
        if state.load_error.is_none() {
            ui.label(
                RichText::new(format!("{} records loaded", state.record_count()))
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        }
        ui.add_space(10.0);

        ui.horizontal_top(|ui| {
            // ===== Department list =====
            ui.vertical(|ui| {
                ui.label(RichText::new("1. Select Department:").color(LABEL_BLUE));
                Self::list_frame(ui, DEPT_LIST_WIDTH, "dept_list", |ui| {
                    for dept in &state.departments {
                        let selected = state.selected_dept.as_deref() == Some(dept.as_str());
                        if ui.selectable_label(selected, dept).clicked() && !selected {
                            action = SelectorAction::DepartmentSelected(dept.clone());
                        }
                    }
                });
            });

            ui.add_space(15.0);

            // ===== Course list =====
            ui.vertical(|ui| {
                ui.label(RichText::new("2. Select Course:").color(LABEL_BLUE));
                Self::list_frame(ui, COURSE_LIST_WIDTH, "course_list", |ui| {
                    if state.selected_dept.is_none() {
                        return;
                    }
                    let all_selected = state.selected_course.is_none();
                    if ui.selectable_label(all_selected, ALL_COURSES_LABEL).clicked() {
                        action = SelectorAction::CourseSelected(None);
                    }
                    for course in &state.courses {
                        let selected = state.selected_course.as_ref() == Some(course);
                        let response = ui
                            .selectable_label(selected, &course.label)
                            .on_hover_text(format!(
                                "{} {} - {}",
                                state.selected_dept.as_deref().unwrap_or_default(),
                                course.full_number,
                                course.cid
                            ));
                        if response.clicked() {
                            action = SelectorAction::CourseSelected(Some(course.clone()));
                        }
                    }
                });
            });

            ui.add_space(15.0);

            // ===== Selection info =====
            ui.vertical(|ui| {
                ui.label(RichText::new("Selection:").color(LABEL_BLUE));
                let dept = state.selected_dept.as_deref().unwrap_or("None");
                let course = match (&state.selected_dept, &state.selected_course) {
                    (None, _) => "None".to_string(),
                    (Some(_), None) => ALL_COURSES_LABEL.to_string(),
                    (Some(_), Some(c)) => c.label.clone(),
                };
                ui.label(RichText::new(format!("Department: {}", dept)).color(Color32::GRAY));
                ui.label(RichText::new(format!("Course: {}", course)).color(Color32::GRAY));
                ui.add_space(5.0);
                if ui
                    .add(egui::Button::new("Clear Selection").min_size(egui::vec2(180.0, 0.0)))
                    .clicked()
                {
                    action = SelectorAction::ClearSelection;
                }
                if ui.button("📂 Open CSV...").clicked() {
                    action = SelectorAction::OpenFile;
                }
            });
        });

        ui.add_space(10.0);

        // ===== Search =====
        ui.add_enabled_ui(state.load_error.is_none(), |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new("Search:").color(LABEL_BLUE));
                let response = ui.add(
                    egui::TextEdit::singleline(&mut state.search_query)
                        .hint_text("C-ID, department, school or title")
                        .desired_width(COURSE_LIST_WIDTH),
                );
                if response.changed() {
                    action = SelectorAction::SearchEdited;
                }
            });
        });

        ui.add_space(10.0);

        // ===== Status =====
        match &state.load_error {
            Some(error) => {
                ui.label(RichText::new(error).color(ERROR_RED));
                ui.label(RichText::new(LOAD_ERROR_HINT).color(Color32::GRAY));
            }
            None => {
                ui.label(RichText::new(&state.status).color(ACCENT_RED));
            }
        }
        ui.add_space(5.0);

        action
    }

    fn list_frame(
        ui: &mut egui::Ui,
        width: f32,
        id: &str,
        add_contents: impl FnOnce(&mut egui::Ui),
    ) {
        egui::Frame::none()
            .fill(ui.visuals().extreme_bg_color)
            .rounding(5.0)
            .inner_margin(5.0)
            .show(ui, |ui| {
                ui.set_width(width);
                ScrollArea::vertical()
                    .id_salt(id)
                    .max_height(LIST_HEIGHT)
                    .auto_shrink([false, false])
                    .show(ui, add_contents);
            });
    }
}
