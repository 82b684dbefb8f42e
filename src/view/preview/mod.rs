// Preview pane for dirpeek
//
// Handlers claim files by suffix and own a persistent surface each; the
// dispatcher picks the first capable handler and brings its surface to front.

mod dispatcher;
mod handler;
pub mod handlers;
mod surface;
mod timer;

pub use dispatcher::PreviewDispatcher;
pub use handler::{ExtensionSet, PreviewHandler};
pub use handlers::*;
pub use surface::{Bitmap, Surface, SurfaceContent, SurfaceId};
pub use timer::FrameTimer;

use crate::entry::FileInfo;
use crate::style;
use chrono::{DateTime, Local};
use eframe::egui;

/// Dispatcher with every standard handler, fallback consulted last
pub fn create_default_dispatcher() -> PreviewDispatcher {
    let mut dispatcher = PreviewDispatcher::new(Box::new(FallbackPreviewHandler::new()));
    dispatcher.register(Box::new(TextPreviewHandler::new()));
    dispatcher.register(Box::new(ImagePreviewHandler::new()));
    dispatcher.register(Box::new(VideoPreviewHandler::new()));
    dispatcher.register(Box::new(ArchivePreviewHandler::new()));
    dispatcher
}

/// Render preview pane header with file metadata
pub fn render_preview_header(ui: &mut egui::Ui, info: &FileInfo) {
    style::truncated_label(
        ui,
        egui::RichText::new(format!(
            "{} {}",
            crate::entry::icon_for(&info.name, info.is_dir),
            info.display_name()
        ))
        .heading(),
    );
    ui.add_space(5.0);
    if !info.is_dir {
        style::truncated_label(ui, format!("Size: {}", bytesize::ByteSize(info.size)));
    }
    let datetime: DateTime<Local> = info.modified.into();
    ui.label(format!("Modified: {}", datetime.format("%Y-%m-%d %H:%M")));
    ui.separator();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_default_order() {
        let dispatcher = create_default_dispatcher();
        assert_eq!(
            dispatcher.handler_names(),
            vec!["text", "image", "video", "archive", "fallback"]
        );
    }

    #[test]
    fn test_default_selection() {
        let dispatcher = create_default_dispatcher();
        for (path, expected) in [
            ("/a/notes.txt", "text"),
            ("/a/config.toml", "text"),
            ("/a/photo.jpg", "image"),
            ("/a/clip.mov", "video"),
            ("/a/bundle.tar.gz", "archive"),
            ("/a/program.exe", "fallback"),
            ("/a/Makefile", "fallback"),
        ] {
            assert_eq!(dispatcher.selected_handler(Path::new(path)), expected, "{}", path);
        }
    }

    #[test]
    fn test_preview_real_files() {
        let dir = tempfile::tempdir().unwrap();
        let text = dir.path().join("a.md");
        let blob = dir.path().join("blob.dat");
        std::fs::write(&text, "# heading").unwrap();
        std::fs::write(&blob, [0u8, 1, 2]).unwrap();

        let mut dispatcher = create_default_dispatcher();
        dispatcher.preview(&text);
        let text_surface = dispatcher.current().unwrap();
        assert_eq!(dispatcher.current_handler().unwrap().message(), None);

        dispatcher.preview(&blob);
        let fallback = dispatcher.current_handler().unwrap();
        assert_eq!(fallback.name(), "fallback");
        assert!(fallback.message().unwrap().contains("blob.dat"));
        assert_ne!(dispatcher.current(), Some(text_surface));
        assert_eq!(dispatcher.stack().len(), 2);
    }
}
