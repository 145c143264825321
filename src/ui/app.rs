use anyhow::{Context, Result};
use eframe::egui;
use egui::{Color32, RichText};
use std::sync::mpsc::{channel, Receiver, Sender};

use crate::api::{normalize_course_id, ScheduleClient, ScheduleError, ScheduleResponse};
use crate::config::Config;
use crate::grid::{render, CourseBlock, DisplayWindow, ScheduleGrid};
use crate::session::{Semester, Session};
use super::theme::{self, ACCENT, ERROR};
use super::views;

pub struct ClassGridApp {
    config: Config,
    session: Session,
    window: DisplayWindow,

    // Schedule for the current semester
    courses: Vec<CourseBlock>,
    grid: ScheduleGrid,
    list_state: ListState,

    // Add course dialog
    show_add_dialog: bool,
    add_input: String,
    add_error: Option<String>,
    adding: bool,

    // Drop confirmation
    pending_drop: Option<String>,

    // Status
    status_message: Option<(String, bool)>, // (message, is_error)
    loading: bool,
    is_offline: bool,

    // Async communication
    runtime: tokio::runtime::Runtime,
    result_rx: Receiver<AsyncResult>,
    result_tx: Sender<AsyncResult>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum ListState {
    Loading,
    Loaded,
    Failed,
}

enum AsyncResult {
    ScheduleLoaded(Semester, ScheduleResponse),
    CourseAdded(Semester, ScheduleResponse),
    AddFailed(String),
    CourseDropped(Semester, String, ScheduleResponse),
    LoadFailed(String),
    Error(String),
    Offline,
}

impl ClassGridApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Result<Self> {
        let config = Config::load().unwrap_or_else(|e| {
            log::warn!("{:#}, using default settings", e);
            Config::default()
        });
        theme::setup_fonts(&cc.egui_ctx);
        theme::setup_theme(&cc.egui_ctx);

        let runtime = tokio::runtime::Runtime::new().context("Failed to create tokio runtime")?;
        let (result_tx, result_rx) = channel();

        let window = config.display_window();
        let mut app = Self {
            session: config.session(),
            window,
            config,
            courses: Vec::new(),
            grid: ScheduleGrid::new(window),
            list_state: ListState::Loading,
            show_add_dialog: false,
            add_input: String::new(),
            add_error: None,
            adding: false,
            pending_drop: None,
            status_message: None,
            loading: false,
            is_offline: false,
            runtime,
            result_rx,
            result_tx,
        };

        app.load_schedule();
        Ok(app)
    }

    fn check_async_results(&mut self) {
        while let Ok(result) = self.result_rx.try_recv() {
            match result {
                AsyncResult::ScheduleLoaded(semester, schedule) => {
                    self.loading = false;
                    self.is_offline = false;
                    // A reply for a semester the user already switched away from
                    if semester != self.session.current_semester() {
                        log::debug!("ignoring stale schedule for {}", semester);
                        continue;
                    }
                    self.status_message = None;
                    self.apply_schedule(schedule);
                }
                AsyncResult::CourseAdded(semester, schedule) => {
                    self.adding = false;
                    self.close_add_dialog();
                    if semester == self.session.current_semester() {
                        self.apply_schedule(schedule);
                    }
                }
                AsyncResult::AddFailed(message) => {
                    self.adding = false;
                    self.add_error = Some(message);
                }
                AsyncResult::CourseDropped(semester, course_id, schedule) => {
                    self.loading = false;
                    log::info!("dropped {}", course_id);
                    if semester == self.session.current_semester() {
                        self.apply_schedule(schedule);
                    }
                }
                AsyncResult::LoadFailed(msg) => {
                    self.loading = false;
                    self.list_state = ListState::Failed;
                    self.status_message = Some((msg, true));
                }
                AsyncResult::Error(msg) => {
                    self.loading = false;
                    self.adding = false;
                    self.status_message = Some((msg, true));
                }
                AsyncResult::Offline => {
                    self.loading = false;
                    self.adding = false;
                    self.is_offline = true;
                    self.status_message = None;
                }
            }
        }
    }

    /// Swap in a fresh course list and re-project it onto the grid
    fn apply_schedule(&mut self, schedule: ScheduleResponse) {
        self.courses = schedule.classes;
        let placed = render(&mut self.grid, &self.courses, self.window);
        log::debug!("{} courses, {} blocks on the grid", self.courses.len(), placed);
        self.list_state = ListState::Loaded;
    }

    fn load_schedule(&mut self) {
        self.loading = true;
        self.list_state = ListState::Loading;

        let config = self.config.clone();
        let session = self.session.clone();
        let tx = self.result_tx.clone();

        self.runtime.spawn(async move {
            let semester = session.current_semester();
            let result = async {
                let client = ScheduleClient::new(&config)?;
                client.get_schedule(&session).await
            }.await;

            match result {
                Ok(schedule) => {
                    let _ = tx.send(AsyncResult::ScheduleLoaded(semester, schedule));
                }
                Err(e) if e.is_offline() => {
                    let _ = tx.send(AsyncResult::Offline);
                }
                Err(e) => {
                    log::warn!("loading schedule failed: {}", e);
                    let _ = tx.send(AsyncResult::LoadFailed(format!("Error: {}", e)));
                }
            }
        });
    }

    fn switch_semester(&mut self, semester: Semester) {
        if !self.session.set_semester(semester) {
            return;
        }

        self.config.semester = semester;
        if let Err(e) = self.config.save() {
            log::warn!("could not save semester choice: {:#}", e);
        }

        // Old semester's blocks must not linger while the new one loads
        self.courses.clear();
        render(&mut self.grid, &self.courses, self.window);
        self.load_schedule();
    }

    fn open_add_dialog(&mut self) {
        self.show_add_dialog = true;
        self.add_input.clear();
        self.add_error = None;
    }

    fn close_add_dialog(&mut self) {
        self.show_add_dialog = false;
        self.add_input.clear();
        self.add_error = None;
    }

    fn submit_add_course(&mut self) {
        let course_id = normalize_course_id(&self.add_input);
        if course_id.is_empty() || self.adding {
            return;
        }
        self.adding = true;
        self.add_error = None;

        let config = self.config.clone();
        let session = self.session.clone();
        let tx = self.result_tx.clone();

        self.runtime.spawn(async move {
            let semester = session.current_semester();
            let result = async {
                let client = ScheduleClient::new(&config)?;
                client.add_course(&session, &course_id).await
            }.await;

            match result {
                Ok(schedule) => {
                    let _ = tx.send(AsyncResult::CourseAdded(semester, schedule));
                }
                Err(e) => {
                    log::warn!("adding {} failed: {}", course_id, e);
                    let _ = tx.send(AsyncResult::AddFailed(e.add_failure_message()));
                }
            }
        });
    }

    fn drop_course(&mut self, course_id: String) {
        self.loading = true;

        let config = self.config.clone();
        let session = self.session.clone();
        let tx = self.result_tx.clone();

        self.runtime.spawn(async move {
            let semester = session.current_semester();
            let result: Result<ScheduleResponse, ScheduleError> = async {
                let client = ScheduleClient::new(&config)?;
                client.drop_course(&session, &course_id).await
            }.await;

            match result {
                Ok(schedule) => {
                    let _ = tx.send(AsyncResult::CourseDropped(semester, course_id, schedule));
                }
                Err(e) if e.is_offline() => {
                    let _ = tx.send(AsyncResult::Offline);
                }
                Err(e) => {
                    log::warn!("dropping {} failed: {}", course_id, e);
                    let _ = tx.send(AsyncResult::Error(
                        "Sorry, something went wrong dropping this course.".to_string(),
                    ));
                }
            }
        });
    }

    fn render_header(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let (button_bg, button_text) = theme::button_colors();
            let semester = self.session.current_semester();

            // Semester menu: pill button with a popup list
            let menu_id = ui.make_persistent_id("semester_menu");
            let btn = ui.add(
                egui::Button::new(
                    RichText::new(format!("{} {}", semester, egui_phosphor::regular::CARET_DOWN))
                        .size(14.0)
                        .color(button_text)
                )
                .fill(button_bg)
                .rounding(12.0)
            );
            if btn.clicked() {
                ui.memory_mut(|mem| mem.toggle_popup(menu_id));
            }

            let mut chosen = None;
            egui::popup::popup_below_widget(ui, menu_id, &btn, egui::PopupCloseBehavior::CloseOnClick, |ui| {
                ui.set_min_width(140.0);
                for option in Semester::ALL {
                    let text = RichText::new(option.label()).size(14.0);
                    if ui.selectable_label(option == semester, text).clicked() {
                        chosen = Some(option);
                    }
                }
            });
            if let Some(option) = chosen {
                self.switch_semester(option);
            }

            ui.add_space(12.0);
            ui.label(RichText::new(format!("{} Courses", semester)).size(18.0).color(Color32::WHITE));

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let add = ui.add(
                    egui::Button::new(
                        RichText::new(format!("{} Add course", egui_phosphor::regular::PLUS))
                            .size(14.0)
                            .color(Color32::WHITE)
                    )
                    .fill(ACCENT)
                    .rounding(6.0)
                );
                if add.clicked() {
                    self.open_add_dialog();
                }

                if self.loading {
                    ui.spinner();
                }
            });
        });
    }

    fn render_main(&mut self, ui: &mut egui::Ui) {
        self.render_header(ui);
        ui.add_space(8.0);

        let mut drop_requested = None;

        egui::SidePanel::left("course_list")
            .resizable(true)
            .default_width(320.0)
            .frame(egui::Frame::none().inner_margin(egui::Margin::symmetric(0.0, 4.0)))
            .show_inside(ui, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    match self.list_state {
                        ListState::Loading => views::render_empty_courses(ui, "Loading your courses..."),
                        ListState::Failed => views::render_empty_courses(ui, "Sorry, we couldn't load your courses."),
                        ListState::Loaded if self.courses.is_empty() => views::render_empty_courses(
                            ui,
                            "You don't have any courses in your schedule yet.",
                        ),
                        ListState::Loaded => {
                            drop_requested = views::render_course_list(ui, &self.courses);
                        }
                    }
                });
            });

        egui::CentralPanel::default()
            .frame(egui::Frame::none().inner_margin(egui::Margin { left: 12.0, right: 0.0, top: 4.0, bottom: 0.0 }))
            .show_inside(ui, |ui| {
                views::render_calendar(ui, &self.grid);
            });

        if drop_requested.is_some() {
            self.pending_drop = drop_requested;
        }
    }

    fn render_offline(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(ui.available_height() / 3.0);
            ui.label(
                RichText::new(egui_phosphor::regular::WIFI_SLASH)
                    .size(34.0)
                    .color(ERROR)
            );
            ui.add_space(16.0);
            ui.label(RichText::new("Can't reach the schedule server").size(20.0).color(Color32::from_rgb(200, 200, 210)));
            ui.add_space(8.0);
            ui.label(
                RichText::new(self.config.base_url())
                    .size(14.0)
                    .color(Color32::from_rgb(120, 120, 140))
            );
            ui.add_space(24.0);
            if ui.add(
                egui::Button::new(
                    RichText::new(format!("{} Retry", egui_phosphor::regular::ARROWS_CLOCKWISE))
                        .size(17.0)
                        .color(Color32::WHITE)
                )
                .fill(ACCENT)
                .rounding(6.0)
            ).clicked() {
                self.is_offline = false;
                self.load_schedule();
            }
        });
    }

    fn render_add_dialog(&mut self, ctx: &egui::Context) {
        let mut submit = false;
        let mut close = false;

        let (content_bg, frame_color, frame_text) = theme::dialog_colors();
        let dialog_frame = egui::Frame::none()
            .fill(content_bg)
            .stroke(egui::Stroke::new(2.0, frame_color))
            .rounding(egui::Rounding::same(8.0))
            .inner_margin(egui::Margin::same(20.0));

        egui::Window::new("Add course")
            .collapsible(false)
            .resizable(false)
            .default_width(380.0)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .frame(dialog_frame)
            .show(ctx, |ui| {
                ui.label(RichText::new("Course ID").color(frame_text));

                let has_error = self.add_error.is_some();
                let input = egui::TextEdit::singleline(&mut self.add_input)
                    .hint_text("e.g. ENGR110")
                    .desired_width(f32::INFINITY);
                let input = if has_error { input.text_color(ERROR) } else { input };
                let response = ui.add(input);
                response.request_focus();

                // Typing again clears a previous error
                if response.changed() && !self.add_input.trim().is_empty() {
                    self.add_error = None;
                }
                if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    submit = true;
                }

                if let Some(msg) = &self.add_error {
                    ui.label(
                        RichText::new(format!("{} {}", egui_phosphor::regular::WARNING_CIRCLE, msg))
                            .size(13.0)
                            .color(ERROR)
                    );
                }

                ui.add_space(12.0);
                ui.horizontal(|ui| {
                    let can_submit = !self.add_input.trim().is_empty() && !self.adding;
                    let label = if self.adding { "Adding..." } else { "Add course" };
                    if ui.add_enabled(can_submit, egui::Button::new(label).fill(ACCENT)).clicked() {
                        submit = true;
                    }
                    if ui.button("Cancel").clicked() {
                        close = true;
                    }
                });

                if ui.input(|i| i.key_pressed(egui::Key::Escape)) {
                    close = true;
                }
            });

        if submit {
            self.submit_add_course();
        }
        if close {
            self.close_add_dialog();
        }
    }

    fn render_drop_confirm(&mut self, ctx: &egui::Context) {
        let Some(course_id) = self.pending_drop.clone() else {
            return;
        };
        let mut confirm = false;
        let mut cancel = false;

        let (content_bg, frame_color, _) = theme::dialog_colors();
        let dialog_frame = egui::Frame::none()
            .fill(content_bg)
            .stroke(egui::Stroke::new(2.0, frame_color))
            .rounding(egui::Rounding::same(8.0))
            .inner_margin(egui::Margin::same(20.0));

        egui::Window::new("Drop course")
            .collapsible(false)
            .resizable(false)
            .default_width(380.0)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .frame(dialog_frame)
            .show(ctx, |ui| {
                ui.horizontal_wrapped(|ui| {
                    ui.label("Are you sure you want to drop");
                    ui.label(RichText::new(format!("'{}'", course_id)).strong());
                    ui.label("?");
                });
                ui.add_space(16.0);
                ui.horizontal(|ui| {
                    if ui.add(egui::Button::new(RichText::new("Drop").color(ERROR))).clicked() {
                        confirm = true;
                    }
                    if ui.button("Cancel").clicked() {
                        cancel = true;
                    }
                });
            });

        if confirm {
            self.pending_drop = None;
            self.drop_course(course_id);
        } else if cancel {
            self.pending_drop = None;
        }
    }
}

impl eframe::App for ClassGridApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Pinch-to-zoom / Ctrl+scroll scales the whole UI
        let zoom_delta = ctx.input(|i| i.zoom_delta());
        if zoom_delta != 1.0 {
            self.config.font_scale = (self.config.font_scale * zoom_delta).clamp(0.75, 2.5);
            if (zoom_delta - 1.0).abs() > 0.01 {
                let _ = self.config.save();
            }
        }
        ctx.set_pixels_per_point(self.config.font_scale);

        self.check_async_results();
        if self.loading || self.adding {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }

        if self.show_add_dialog {
            self.render_add_dialog(ctx);
        }
        self.render_drop_confirm(ctx);

        egui::CentralPanel::default().frame(
            egui::Frame::none().inner_margin(egui::Margin::symmetric(12.0, 8.0))
        ).show(ctx, |ui| {
            // Status message (errors only) with close button
            let mut dismiss_message = false;
            if let Some((msg, is_error)) = &self.status_message {
                let color = if *is_error { ERROR } else { Color32::from_rgb(152, 195, 121) };
                ui.horizontal(|ui| {
                    ui.label(RichText::new(msg).color(color));
                    let close_btn = ui.add(egui::Label::new(
                        RichText::new(egui_phosphor::regular::X).size(14.0).color(Color32::from_rgb(120, 120, 130))
                    ).sense(egui::Sense::click()));
                    if close_btn.clicked() {
                        dismiss_message = true;
                    }
                });
                ui.add_space(8.0);
            }
            if dismiss_message {
                self.status_message = None;
            }

            if self.is_offline {
                self.render_offline(ui);
            } else {
                self.render_main(ui);
            }
        });
    }
}
