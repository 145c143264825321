#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use classgrid::ui::ClassGridApp;
use eframe::egui;

fn main() -> eframe::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let viewport = egui::ViewportBuilder::default()
        .with_inner_size([1200.0, 900.0])
        .with_min_inner_size([900.0, 700.0])
        .with_title("Class Grid");

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "Class Grid",
        options,
        Box::new(|cc| Ok(Box::new(ClassGridApp::new(cc)?))),
    )
}
