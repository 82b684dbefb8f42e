use dirpeek::app::Browser;
use dirpeek::config::{SettingsStore, APPLICATION, VENDOR};
use eframe::egui;

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let store = SettingsStore::new(VENDOR, APPLICATION);
    if let Some(path) = store.path() {
        log::debug!("Settings file: {}", path.display());
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 600.0])
            .with_title("dirpeek"),
        ..Default::default()
    };

    eframe::run_native(
        "dirpeek",
        options,
        Box::new(move |_cc| Ok(Box::new(Browser::new(store)))),
    )
}
