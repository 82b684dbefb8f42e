// Persistent drawing surfaces owned by preview handlers

use crate::style;
use eframe::egui;
use std::sync::atomic::{AtomicUsize, Ordering};

static NEXT_SURFACE: AtomicUsize = AtomicUsize::new(0);

/// Identity of a surface, stable for the lifetime of its handler
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SurfaceId(usize);

impl SurfaceId {
    fn next() -> Self {
        Self(NEXT_SURFACE.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Debug)]
pub enum SurfaceContent<T> {
    Empty,
    Ready(T),
    Message(String),
}

/// A handler's visual area. Created once and overwritten on every render.
#[derive(Debug)]
pub struct Surface<T> {
    id: SurfaceId,
    content: SurfaceContent<T>,
}

impl<T> Surface<T> {
    pub fn new() -> Self {
        Self {
            id: SurfaceId::next(),
            content: SurfaceContent::Empty,
        }
    }

    pub fn with_message(message: impl Into<String>) -> Self {
        let mut surface = Self::new();
        surface.set_message(message);
        surface
    }

    pub fn id(&self) -> SurfaceId {
        self.id
    }

    pub fn set(&mut self, value: T) {
        self.content = SurfaceContent::Ready(value);
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.content = SurfaceContent::Message(message.into());
    }

    pub fn clear(&mut self) {
        self.content = SurfaceContent::Empty;
    }

    pub fn content(&self) -> Option<&T> {
        match &self.content {
            SurfaceContent::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn content_mut(&mut self) -> Option<&mut T> {
        match &mut self.content {
            SurfaceContent::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn message(&self) -> Option<&str> {
        match &self.content {
            SurfaceContent::Message(message) => Some(message),
            _ => None,
        }
    }

    /// Draw the message or nothing; returns the content when there is some.
    pub fn show_or_message(&mut self, ui: &mut egui::Ui) -> Option<&mut T> {
        match &mut self.content {
            SurfaceContent::Ready(value) => Some(value),
            SurfaceContent::Message(message) => {
                style::centered_message(ui, message);
                None
            }
            SurfaceContent::Empty => None,
        }
    }
}

impl<T> Default for Surface<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Decoded bitmap plus the GPU texture it is uploaded to
pub struct Bitmap {
    image: egui::ColorImage,
    texture: Option<egui::TextureHandle>,
    dirty: bool,
}

impl Bitmap {
    pub fn new(image: egui::ColorImage) -> Self {
        Self {
            image,
            texture: None,
            dirty: true,
        }
    }

    pub fn size(&self) -> [usize; 2] {
        self.image.size
    }

    /// Swap in a new image, reusing the existing texture.
    pub fn replace(&mut self, image: egui::ColorImage) {
        self.image = image;
        self.dirty = true;
    }

    /// Draw scaled to fit the available space, keeping the aspect ratio.
    pub fn show(&mut self, ui: &mut egui::Ui, name: &str) {
        if let Some(texture) = &mut self.texture {
            if self.dirty {
                texture.set(self.image.clone(), egui::TextureOptions::LINEAR);
            }
        } else {
            self.texture = Some(ui.ctx().load_texture(
                name,
                self.image.clone(),
                egui::TextureOptions::LINEAR,
            ));
        }
        self.dirty = false;

        let Some(texture) = &self.texture else {
            return;
        };
        let [w, h] = self.image.size;
        let fitted = style::fit_size(egui::vec2(w as f32, h as f32), ui.available_size());
        ui.vertical_centered(|ui| {
            ui.add(egui::Image::new((texture.id(), fitted)));
        });
    }
}

impl std::fmt::Debug for Bitmap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bitmap")
            .field("size", &self.image.size)
            .field("uploaded", &self.texture.is_some())
            .finish()
    }
}
