// Archive preview handler (zip, tar, tar.gz)

use crate::io::{list_archive, ArchiveListing};
use crate::style;
use crate::view::preview::handler::{ExtensionSet, PreviewHandler};
use crate::view::preview::surface::{Surface, SurfaceId};
use eframe::egui;
use std::path::Path;

const ARCHIVE_EXTENSIONS: ExtensionSet = ExtensionSet::new(&[".zip", ".tar", ".tar.gz", ".tgz"]);

pub struct ArchivePreviewHandler {
    surface: Surface<ArchiveListing>,
}

impl ArchivePreviewHandler {
    pub fn new() -> Self {
        Self {
            surface: Surface::new(),
        }
    }

    pub fn listing(&self) -> Option<&ArchiveListing> {
        self.surface.content()
    }
}

impl Default for ArchivePreviewHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl PreviewHandler for ArchivePreviewHandler {
    fn name(&self) -> &str {
        "archive"
    }

    fn can_handle(&self, path: &Path) -> bool {
        ARCHIVE_EXTENSIONS.matches(path)
    }

    fn surface(&self) -> SurfaceId {
        self.surface.id()
    }

    fn render(&mut self, path: &Path) {
        match list_archive(path, style::ARCHIVE_PREVIEW_ITEMS) {
            Ok(listing) if listing.entries.is_empty() => self.surface.set_message("Empty archive"),
            Ok(listing) => self.surface.set(listing),
            Err(e) => {
                log::warn!("{}", e);
                self.surface.set_message(e.to_string());
            }
        }
    }

    fn show(&mut self, ui: &mut egui::Ui) {
        let Some(listing) = self.surface.show_or_message(ui) else {
            return;
        };

        ui.label(format!("{}:", listing.summary(style::ARCHIVE_PREVIEW_ITEMS)));
        ui.separator();

        egui::ScrollArea::vertical()
            .id_salt("preview_archive")
            .auto_shrink([false, false])
            .max_height(ui.available_height())
            .show(ui, |ui| {
                ui.set_max_width(ui.available_width());
                use egui_extras::{Column, TableBuilder};
                TableBuilder::new(ui)
                    .striped(true)
                    .resizable(false)
                    .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
                    .column(Column::auto().at_least(30.0))
                    .column(Column::remainder().clip(true))
                    .column(Column::auto().at_least(80.0))
                    .body(|body| {
                        body.rows(20.0, listing.entries.len(), |mut row| {
                            let entry = &listing.entries[row.index()];
                            row.col(|ui| {
                                ui.label(if entry.is_dir { "📁" } else { "📄" });
                            });
                            row.col(|ui| {
                                style::truncated_label(ui, entry.name.as_str());
                            });
                            row.col(|ui| {
                                if !entry.is_dir {
                                    ui.label(bytesize::ByteSize(entry.size).to_string());
                                }
                            });
                        });
                    });
            });
    }

    fn message(&self) -> Option<&str> {
        self.surface.message()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Write;

    #[test]
    fn test_claims_archive_suffixes() {
        let handler = ArchivePreviewHandler::new();
        assert!(handler.can_handle(Path::new("x.zip")));
        assert!(handler.can_handle(Path::new("x.tar.gz")));
        assert!(handler.can_handle(Path::new("x.tgz")));
        assert!(!handler.can_handle(Path::new("x.gz")));
    }

    #[test]
    fn test_lists_zip_entries() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bundle.zip");
        let mut writer = zip::ZipWriter::new(fs::File::create(&path).unwrap());
        writer
            .start_file("hello.txt", zip::write::SimpleFileOptions::default())
            .unwrap();
        writer.write_all(b"hi").unwrap();
        writer.finish().unwrap();

        let mut handler = ArchivePreviewHandler::new();
        handler.render(&path);
        let listing = handler.listing().unwrap();
        assert_eq!(listing.entries.len(), 1);
        assert_eq!(listing.entries[0].name, "hello.txt");
    }

    #[test]
    fn test_unreadable_archive_shows_message() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.tar.gz");
        fs::write(&path, b"garbage").unwrap();

        let mut handler = ArchivePreviewHandler::new();
        handler.render(&path);
        assert!(handler.listing().is_none());
        let message = handler.message().unwrap();
        assert!(message.starts_with("Unable to read archive"), "{message}");
        assert_ne!(message, "Empty archive");
    }
}
