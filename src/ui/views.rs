use chrono::{Datelike, Local};
use egui::{Color32, RichText, Ui};

use crate::api::format_time_range;
use crate::grid::{day_abbrev, day_key, CourseBlock, Overlay, ScheduleGrid, GRID_DAYS};
use super::theme::{button_colors, card_colors, course_color, grid_colors};

// Layout constants
const HOUR_LABEL_WIDTH: f32 = 64.0;
const HEADER_HEIGHT: f32 = 32.0;
const ROW_HEIGHT: f32 = 52.0;
const BLOCK_INSET: f32 = 3.0;

/// Centered grey message used for loading/empty/error states of the course list
pub fn render_empty_courses(ui: &mut Ui, message: &str) {
    ui.add_space(24.0);
    ui.vertical_centered(|ui| {
        ui.label(RichText::new(message).size(14.0).color(Color32::from_rgb(120, 120, 130)));
    });
    ui.add_space(24.0);
}

/// Render one card per course. Returns the id whose remove button was clicked.
pub fn render_course_list(ui: &mut Ui, courses: &[CourseBlock]) -> Option<String> {
    let mut drop_clicked = None;

    for (idx, course) in courses.iter().enumerate() {
        if let Some(id) = render_course_card(ui, course, idx) {
            drop_clicked = Some(id);
        }
        ui.add_space(6.0);
    }

    drop_clicked
}

fn render_course_card(ui: &mut Ui, course: &CourseBlock, color_index: usize) -> Option<String> {
    let (bg, text_color, secondary) = card_colors();
    let accent = course_color(color_index);
    let mut remove_clicked = false;

    let response = egui::Frame::none()
        .fill(bg)
        .rounding(egui::Rounding::same(6.0))
        .inner_margin(egui::Margin {
            left: 14.0,
            right: 10.0,
            top: 10.0,
            bottom: 10.0,
        })
        .show(ui, |ui| {
            ui.set_width(ui.available_width());

            ui.horizontal(|ui| {
                ui.vertical(|ui| {
                    ui.label(RichText::new(&course.id).size(15.0).strong().color(text_color));
                    if !course.name.is_empty() {
                        ui.label(RichText::new(&course.name).size(13.0).color(secondary));
                    }
                });

                ui.with_layout(egui::Layout::right_to_left(egui::Align::TOP), |ui| {
                    let close = ui.add(egui::Label::new(
                        RichText::new(egui_phosphor::regular::X).size(14.0).color(secondary)
                    ).sense(egui::Sense::click()));
                    if close.hovered() {
                        ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
                    }
                    if close.on_hover_text("Drop course").clicked() {
                        remove_clicked = true;
                    }
                });
            });

            ui.add_space(4.0);

            egui::Grid::new(("course_details", color_index, &course.id))
                .num_columns(2)
                .spacing([24.0, 4.0])
                .show(ui, |ui| {
                    detail_item(ui, egui_phosphor::regular::USER, &course.professor, secondary);
                    detail_item(ui, egui_phosphor::regular::MAP_PIN, &course.location, secondary);
                    ui.end_row();
                    detail_item(ui, egui_phosphor::regular::CLOCK, &format_time_range(&course.start, &course.end), secondary);
                    detail_item(ui, egui_phosphor::regular::CALENDAR_BLANK, &course.days_text(), secondary);
                    ui.end_row();
                });
        })
        .response;

    // Left colour stripe matching the course's grid colour
    let stripe = egui::Rect::from_min_size(response.rect.min, egui::vec2(4.0, response.rect.height()));
    ui.painter().rect_filled(
        stripe,
        egui::Rounding { nw: 6.0, sw: 6.0, ne: 0.0, se: 0.0 },
        accent,
    );

    remove_clicked.then(|| course.id.clone())
}

fn detail_item(ui: &mut Ui, icon: &str, text: &str, color: Color32) {
    ui.horizontal(|ui| {
        ui.label(RichText::new(icon).size(13.0).color(color));
        ui.label(RichText::new(text).size(13.0).color(color));
    });
}

/// Render the weekly grid with every overlay it holds.
///
/// Each overlay is positioned inside its anchor cell by `top_percent` and sized
/// by `height_percent` of one row, so long classes run down into later rows.
pub fn render_calendar(ui: &mut Ui, grid: &ScheduleGrid) {
    let (grid_line_color, hour_line_color, label_color) = grid_colors();
    let today_key = day_key(Local::now().weekday());

    let available_width = ui.available_width();
    let day_width = (available_width - HOUR_LABEL_WIDTH) / grid.columns() as f32;

    // Fixed day headers (outside ScrollArea)
    let (header_rect, _) = ui.allocate_exact_size(
        egui::vec2(available_width, HEADER_HEIGHT),
        egui::Sense::hover()
    );
    let painter = ui.painter();
    for (i, day) in GRID_DAYS.iter().enumerate() {
        let x = header_rect.min.x + HOUR_LABEL_WIDTH + i as f32 * day_width;
        let is_today = day_key(*day) == today_key;
        let color = if is_today { Color32::WHITE } else { Color32::from_rgb(0xb0, 0xb0, 0xa8) };
        painter.text(
            egui::pos2(x + day_width / 2.0, header_rect.center().y),
            egui::Align2::CENTER_CENTER,
            day_abbrev(*day),
            egui::FontId::proportional(14.0),
            color,
        );
    }

    let total_grid_height = grid.rows() as f32 * ROW_HEIGHT;

    egui::ScrollArea::vertical().show(ui, |ui| {
        let (grid_rect, _) = ui.allocate_exact_size(
            egui::vec2(available_width, total_grid_height),
            egui::Sense::hover()
        );
        let painter = ui.painter();

        // Highlight current day column with dim background
        if let Some(col) = grid.day_keys().iter().position(|k| *k == today_key) {
            let col_rect = egui::Rect::from_min_size(
                egui::pos2(grid_rect.min.x + HOUR_LABEL_WIDTH + col as f32 * day_width, grid_rect.min.y),
                egui::vec2(day_width, total_grid_height)
            );
            painter.rect_filled(col_rect, 0.0, Color32::from_rgb(0x11, 0x11, 0x10));
        }

        // Vertical lines between columns, plus right edge
        for i in 0..=grid.columns() {
            let x = grid_rect.min.x + HOUR_LABEL_WIDTH + i as f32 * day_width;
            painter.line_segment(
                [egui::pos2(x, grid_rect.min.y), egui::pos2(x, grid_rect.max.y)],
                egui::Stroke::new(1.0, grid_line_color),
            );
        }

        // Hour labels and horizontal lines
        for (row, label) in grid.row_labels().iter().enumerate() {
            let y = grid_rect.min.y + row as f32 * ROW_HEIGHT;
            painter.text(
                egui::pos2(grid_rect.min.x + HOUR_LABEL_WIDTH - 8.0, y + 2.0),
                egui::Align2::RIGHT_TOP,
                label,
                egui::FontId::proportional(11.0),
                label_color,
            );
            painter.line_segment(
                [egui::pos2(grid_rect.min.x + HOUR_LABEL_WIDTH, y), egui::pos2(grid_rect.max.x, y)],
                egui::Stroke::new(1.0, if row == 0 { hour_line_color } else { grid_line_color }),
            );
        }

        // Course blocks; within a cell later courses paint on top
        for (cell, overlay) in grid.overlays() {
            let cell_min = egui::pos2(
                grid_rect.min.x + HOUR_LABEL_WIDTH + cell.column as f32 * day_width,
                grid_rect.min.y + cell.row as f32 * ROW_HEIGHT,
            );
            paint_course_block(ui, cell_min, day_width, overlay);
        }
    });
}

fn paint_course_block(ui: &Ui, cell_min: egui::Pos2, day_width: f32, overlay: &Overlay) {
    let segment = &overlay.segment;
    let top = cell_min.y + (segment.top_percent as f32 / 100.0) * ROW_HEIGHT;
    let height = (segment.height_percent as f32 / 100.0) * ROW_HEIGHT;

    let rect = egui::Rect::from_min_size(
        egui::pos2(cell_min.x + BLOCK_INSET, top),
        egui::vec2(day_width - BLOCK_INSET * 2.0, (height - 1.0).max(4.0))
    );

    let accent = course_color(segment.color_index);
    let painter = ui.painter();
    painter.rect(
        rect,
        4.0,
        accent.gamma_multiply(0.35),
        egui::Stroke::new(1.0, accent),
    );

    let text_left = rect.min.x + 5.0;
    if rect.height() > 16.0 {
        painter.text(
            egui::pos2(text_left, rect.min.y + 3.0),
            egui::Align2::LEFT_TOP,
            &segment.course_id,
            egui::FontId::proportional(12.0),
            Color32::WHITE,
        );
    }
    if rect.height() > 32.0 {
        let (_, text_color) = button_colors();
        painter.text(
            egui::pos2(text_left, rect.min.y + 19.0),
            egui::Align2::LEFT_TOP,
            &segment.time_range,
            egui::FontId::proportional(10.5),
            text_color,
        );
    }
}
