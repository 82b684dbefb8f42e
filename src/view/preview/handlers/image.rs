// Image preview handler

use crate::error::PreviewError;
use crate::view::preview::handler::{ExtensionSet, PreviewHandler};
use crate::view::preview::surface::{Bitmap, Surface, SurfaceId};
use eframe::egui;
use std::path::Path;

const IMAGE_EXTENSIONS: ExtensionSet = ExtensionSet::new(&[
    ".png", ".jpg", ".jpeg", ".gif", ".bmp", ".webp", ".tif", ".tiff", ".ico",
]);

/// Decode an image file into an RGBA bitmap
pub fn decode_image(path: &Path) -> Result<egui::ColorImage, PreviewError> {
    let image = image::open(path).map_err(|e| PreviewError::Image {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let rgba = image.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    Ok(egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw()))
}

pub struct ImagePreviewHandler {
    surface: Surface<Bitmap>,
}

impl ImagePreviewHandler {
    pub fn new() -> Self {
        Self {
            surface: Surface::new(),
        }
    }

    /// Pixel size of the image on the surface
    pub fn image_size(&self) -> Option<[usize; 2]> {
        self.surface.content().map(Bitmap::size)
    }
}

impl Default for ImagePreviewHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl PreviewHandler for ImagePreviewHandler {
    fn name(&self) -> &str {
        "image"
    }

    fn can_handle(&self, path: &Path) -> bool {
        IMAGE_EXTENSIONS.matches(path)
    }

    fn surface(&self) -> SurfaceId {
        self.surface.id()
    }

    fn render(&mut self, path: &Path) {
        match decode_image(path) {
            Ok(image) => match self.surface.content_mut() {
                Some(bitmap) => bitmap.replace(image),
                None => self.surface.set(Bitmap::new(image)),
            },
            Err(e) => {
                log::warn!("{}", e);
                self.surface.set_message(e.to_string());
            }
        }
    }

    fn show(&mut self, ui: &mut egui::Ui) {
        if let Some(bitmap) = self.surface.show_or_message(ui) {
            bitmap.show(ui, "preview_image");
        }
    }

    fn message(&self) -> Option<&str> {
        self.surface.message()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_claims_image_suffixes() {
        let handler = ImagePreviewHandler::new();
        assert!(handler.can_handle(Path::new("cat.png")));
        assert!(handler.can_handle(Path::new("cat.jpeg")));
        assert!(!handler.can_handle(Path::new("cat.svg")));
        assert!(!handler.can_handle(Path::new("cat.txt")));
        // Suffixes match case-sensitively, the same for every format
        assert!(!handler.can_handle(Path::new("CAT.PNG")));
        assert!(!handler.can_handle(Path::new("CAT.GIF")));
    }

    #[test]
    fn test_decodes_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tiny.png");
        image::RgbImage::from_pixel(4, 2, image::Rgb([200, 10, 10]))
            .save(&path)
            .unwrap();

        let mut handler = ImagePreviewHandler::new();
        handler.render(&path);
        assert_eq!(handler.image_size(), Some([4, 2]));
        assert_eq!(handler.message(), None);
    }

    #[test]
    fn test_undecodable_image_shows_message() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.png");
        fs::write(&path, b"not really a png").unwrap();

        let mut handler = ImagePreviewHandler::new();
        handler.render(&path);
        assert_eq!(handler.image_size(), None);
        assert!(handler.message().unwrap().starts_with("Unable to load image"));
    }
}
