use egui::{Color32, FontFamily, FontId, Rounding, Stroke, Style, TextStyle, Visuals};

use crate::grid::PALETTE_SIZE;

/// Accent used for buttons, selection and links
pub const ACCENT: Color32 = Color32::from_rgb(19, 152, 244);

/// Error text (status line, add-course validation)
pub const ERROR: Color32 = Color32::from_rgb(224, 108, 117);

/// Course colours, indexed by `PositionedSegment::color_index`
const COURSE_PALETTE: [Color32; PALETTE_SIZE] = [
    Color32::from_rgb(0x13, 0x98, 0xf4),  // blue
    Color32::from_rgb(0xe8, 0x28, 0x71),  // pink
    Color32::from_rgb(0x65, 0xba, 0x43),  // green
    Color32::from_rgb(0xec, 0x71, 0x1b),  // orange
    Color32::from_rgb(0x90, 0x4e, 0xe2),  // purple
    Color32::from_rgb(0xe5, 0xaa, 0x00),  // gold
    Color32::from_rgb(0x1a, 0xb5, 0xa8),  // teal
    Color32::from_rgb(0xe5, 0x4d, 0x42),  // red
    Color32::from_rgb(0x61, 0xaf, 0xef),  // sky
    Color32::from_rgb(0xb0, 0x7d, 0x48),  // brown
];

pub fn course_color(color_index: usize) -> Color32 {
    COURSE_PALETTE[color_index % PALETTE_SIZE]
}

/// Font family for filled Phosphor icons
pub fn phosphor_fill_family() -> FontFamily {
    FontFamily::Name("phosphor-fill".into())
}

pub fn setup_fonts(ctx: &egui::Context) {
    let mut fonts = egui::FontDefinitions::default();

    // Add Phosphor Regular icons as fallback in Proportional family
    egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);

    // Filled icons get their own family, with the default font as fallback
    fonts.font_data.insert(
        "phosphor-fill".into(),
        egui_phosphor::Variant::Fill.font_data(),
    );
    let mut fill_family = vec!["phosphor-fill".to_owned()];
    if let Some(proportional) = fonts.families.get(&FontFamily::Proportional) {
        fill_family.extend(proportional.iter().cloned());
    }
    fonts.families.insert(phosphor_fill_family(), fill_family);

    ctx.set_fonts(fonts);
}

pub fn setup_theme(ctx: &egui::Context) {
    let mut style = Style::default();

    // Dark visuals with blue accents
    let mut visuals = Visuals::dark();

    let bg = Color32::BLACK;
    visuals.panel_fill = bg;
    visuals.window_fill = bg;
    visuals.faint_bg_color = Color32::from_rgb(20, 20, 18);
    visuals.extreme_bg_color = Color32::from_rgb(14, 14, 13);

    // Widget colors - warm grays (R=G > B for warmth)
    visuals.widgets.noninteractive.bg_fill = Color32::from_rgb(40, 40, 38);
    visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, Color32::from_rgb(176, 176, 168));

    visuals.widgets.inactive.bg_fill = Color32::from_rgb(56, 56, 52);
    visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, Color32::from_rgb(200, 200, 192));

    visuals.widgets.hovered.bg_fill = Color32::from_rgb(80, 80, 74);
    visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, Color32::WHITE);

    visuals.widgets.active.bg_fill = ACCENT;
    visuals.widgets.active.fg_stroke = Stroke::new(1.0, Color32::WHITE);

    visuals.selection.bg_fill = ACCENT;
    visuals.selection.stroke = Stroke::new(1.0, Color32::WHITE);
    visuals.hyperlink_color = ACCENT;

    visuals.widgets.noninteractive.rounding = Rounding::same(6.0);
    visuals.widgets.inactive.rounding = Rounding::same(6.0);
    visuals.widgets.hovered.rounding = Rounding::same(6.0);
    visuals.widgets.active.rounding = Rounding::same(6.0);
    visuals.window_rounding = Rounding::same(8.0);

    style.visuals = visuals;

    style.text_styles = [
        (TextStyle::Small, FontId::new(12.0, FontFamily::Proportional)),
        (TextStyle::Body, FontId::new(14.0, FontFamily::Proportional)),
        (TextStyle::Button, FontId::new(14.0, FontFamily::Proportional)),
        (TextStyle::Heading, FontId::new(18.0, FontFamily::Proportional)),
        (TextStyle::Monospace, FontId::new(14.0, FontFamily::Monospace)),
    ]
    .into();

    style.spacing.item_spacing = egui::vec2(12.0, 10.0);
    style.spacing.button_padding = egui::vec2(14.0, 8.0);
    style.spacing.window_margin = egui::Margin::same(24.0);

    ctx.set_style(style);
}

/// Returns (grid_line, hour_line, label_text) for the calendar grid
pub fn grid_colors() -> (Color32, Color32, Color32) {
    (
        Color32::from_rgb(0x40, 0x40, 0x3c),
        Color32::from_rgb(0x50, 0x50, 0x4a),
        Color32::from_rgb(0x70, 0x70, 0x68),
    )
}

/// Returns (bg_color, text_color, secondary_text_color) for course cards
pub fn card_colors() -> (Color32, Color32, Color32) {
    (
        Color32::from_rgb(0x1c, 0x1c, 0x1a),
        Color32::WHITE,
        Color32::from_rgb(208, 208, 200),
    )
}

/// Returns (bg_color, text_color) for button-like elements to ensure consistency
pub fn button_colors() -> (Color32, Color32) {
    (
        Color32::from_rgb(56, 56, 52),
        Color32::from_rgb(200, 200, 192),
    )
}

/// Returns (content_bg, frame_color, frame_text) for dialogs
pub fn dialog_colors() -> (Color32, Color32, Color32) {
    (
        Color32::BLACK,
        Color32::from_rgb(40, 40, 38),
        Color32::from_rgb(176, 176, 168),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_wraps() {
        assert_eq!(course_color(0), course_color(PALETTE_SIZE));
        assert_ne!(course_color(0), course_color(1));
    }
}
