// Preview dispatcher: picks the first capable handler and shows its surface

use super::handler::PreviewHandler;
use super::surface::SurfaceId;
use eframe::egui;
use std::path::Path;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Slot {
    Handler(usize),
    Fallback,
}

/// Ordered handler list plus a fallback that is always consulted last.
///
/// Surfaces are stacked like pages: a handler's surface joins the stack the
/// first time it is chosen and exactly one surface is current afterwards.
pub struct PreviewDispatcher {
    handlers: Vec<Box<dyn PreviewHandler>>,
    fallback: Box<dyn PreviewHandler>,
    stack: Vec<SurfaceId>,
    current: Option<Slot>,
}

impl PreviewDispatcher {
    pub fn new(fallback: Box<dyn PreviewHandler>) -> Self {
        let stack = vec![fallback.surface()];
        Self {
            handlers: Vec::new(),
            fallback,
            stack,
            current: None,
        }
    }

    /// Append a handler; earlier registrations take precedence.
    pub fn register(&mut self, handler: Box<dyn PreviewHandler>) {
        self.handlers.push(handler);
    }

    fn slot_for(&self, path: &Path) -> Slot {
        self.handlers
            .iter()
            .position(|h| h.can_handle(path))
            .map(Slot::Handler)
            .unwrap_or(Slot::Fallback)
    }

    fn handler(&self, slot: Slot) -> &dyn PreviewHandler {
        match slot {
            Slot::Handler(i) => self.handlers[i].as_ref(),
            Slot::Fallback => self.fallback.as_ref(),
        }
    }

    fn handler_mut(&mut self, slot: Slot) -> &mut dyn PreviewHandler {
        match slot {
            Slot::Handler(i) => self.handlers[i].as_mut(),
            Slot::Fallback => self.fallback.as_mut(),
        }
    }

    /// Name of the handler that would preview `path`
    pub fn selected_handler(&self, path: &Path) -> &str {
        self.handler(self.slot_for(path)).name()
    }

    pub fn preview(&mut self, path: &Path) {
        let slot = self.slot_for(path);
        log::debug!(
            "Previewing {} with {} handler",
            path.display(),
            self.handler(slot).name()
        );
        self.activate(slot);
        self.handler_mut(slot).render(path);
    }

    fn activate(&mut self, slot: Slot) {
        let surface = self.handler(slot).surface();
        if !self.stack.contains(&surface) {
            self.stack.push(surface);
        }
        if let Some(previous) = self.current {
            if previous != slot {
                self.handler_mut(previous).deactivate();
            }
        }
        self.current = Some(slot);
    }

    /// Drop the current surface, releasing whatever its handler holds.
    pub fn reset(&mut self) {
        if let Some(previous) = self.current.take() {
            self.handler_mut(previous).deactivate();
        }
    }

    /// Surface currently on top, `None` before the first preview
    pub fn current(&self) -> Option<SurfaceId> {
        self.current.map(|slot| self.handler(slot).surface())
    }

    pub fn current_handler(&self) -> Option<&dyn PreviewHandler> {
        self.current.map(|slot| self.handler(slot))
    }

    /// Surfaces inserted so far, in insertion order
    pub fn stack(&self) -> &[SurfaceId] {
        &self.stack
    }

    pub fn handler_names(&self) -> Vec<&str> {
        self.handlers
            .iter()
            .map(|h| h.name())
            .chain(std::iter::once(self.fallback.name()))
            .collect()
    }

    pub fn show(&mut self, ui: &mut egui::Ui) {
        let slot = self.current.unwrap_or(Slot::Fallback);
        self.handler_mut(slot).show(ui);
    }
}
