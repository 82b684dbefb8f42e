// Preview handler trait and the extension predicate handlers claim files with

use super::surface::SurfaceId;
use eframe::egui;
use std::path::Path;

/// Case-sensitive set of path suffixes such as `.txt` or `.tar.gz`
#[derive(Clone, Copy, Debug)]
pub struct ExtensionSet {
    suffixes: &'static [&'static str],
}

impl ExtensionSet {
    pub const fn new(suffixes: &'static [&'static str]) -> Self {
        Self { suffixes }
    }

    pub fn matches(&self, path: &Path) -> bool {
        let path = path.to_string_lossy();
        self.suffixes.iter().any(|suffix| path.ends_with(suffix))
    }

    pub fn suffixes(&self) -> &'static [&'static str] {
        self.suffixes
    }
}

/// Trait for file preview handlers
///
/// Each handler owns exactly one surface, created with the handler and
/// reused by every `render` call. The dispatcher consults handlers in
/// registration order and the first one whose `can_handle` returns true
/// renders the file.
pub trait PreviewHandler {
    /// Name of this handler (for logging and debugging)
    fn name(&self) -> &str;

    fn can_handle(&self, path: &Path) -> bool;

    /// The persistent surface this handler draws into
    fn surface(&self) -> SurfaceId;

    /// Overwrite the surface's content with a preview of `path`.
    ///
    /// Failures are shown on the surface, never returned.
    fn render(&mut self, path: &Path);

    /// Draw the surface into the current frame.
    fn show(&mut self, ui: &mut egui::Ui);

    /// Message currently displayed instead of content, if any
    fn message(&self) -> Option<&str>;

    /// Called when another handler's surface becomes current.
    fn deactivate(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suffix_matching_is_case_sensitive() {
        const SET: ExtensionSet = ExtensionSet::new(&[".txt", ".tar.gz"]);
        assert!(SET.matches(Path::new("/notes/todo.txt")));
        assert!(SET.matches(Path::new("backup.tar.gz")));
        assert!(!SET.matches(Path::new("TODO.TXT")));
        assert!(!SET.matches(Path::new("archive.gz")));
        assert!(!SET.matches(Path::new("txt")));
    }
}
