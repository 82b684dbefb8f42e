// Fallback handler shown when no other handler claims a path

use crate::view::preview::handler::PreviewHandler;
use crate::view::preview::surface::{Surface, SurfaceId};
use eframe::egui;
use std::path::Path;

pub struct FallbackPreviewHandler {
    surface: Surface<()>,
}

impl FallbackPreviewHandler {
    pub fn new() -> Self {
        Self {
            surface: Surface::with_message("No preview available."),
        }
    }
}

impl Default for FallbackPreviewHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl PreviewHandler for FallbackPreviewHandler {
    fn name(&self) -> &str {
        "fallback"
    }

    fn can_handle(&self, _path: &Path) -> bool {
        true
    }

    fn surface(&self) -> SurfaceId {
        self.surface.id()
    }

    fn render(&mut self, path: &Path) {
        self.surface
            .set_message(format!("No preview available for:\n{}", path.display()));
    }

    fn show(&mut self, ui: &mut egui::Ui) {
        self.surface.show_or_message(ui);
    }

    fn message(&self) -> Option<&str> {
        self.surface.message()
    }
}
