use crate::config::{Settings, SettingsStore};
use crate::entry::FileInfo;
use crate::style;
use crate::tree::{FileTree, NodeId};
use crate::view::{create_default_dispatcher, render_preview_header, render_tree, PreviewDispatcher};
use eframe::egui;
use std::path::{Path, PathBuf};

/// Main window: directory tree on the left, preview on the right
pub struct Browser {
    // Root
    root_input: String,
    tree: Option<FileTree>,

    // Selection
    selected: Option<NodeId>,
    selected_info: Option<FileInfo>,

    // Preview
    dispatcher: PreviewDispatcher,

    // Layout
    split_fraction: f32,
    split_pending: bool,

    // Persistence & status
    store: SettingsStore,
    status: Option<String>,
}

impl Browser {
    /// Build the window from persisted settings.
    ///
    /// The split fraction is applied on the first frame, once the window
    /// width is known.
    pub fn new(store: SettingsStore) -> Self {
        let settings = store.load();
        let mut app = Self {
            root_input: settings.root_dir.clone(),
            tree: None,
            selected: None,
            selected_info: None,
            dispatcher: create_default_dispatcher(),
            split_fraction: style::clamp_split_fraction(settings.splitter_left_fraction),
            split_pending: true,
            store,
            status: None,
        };
        if !settings.root_dir.is_empty() && Path::new(&settings.root_dir).is_dir() {
            app.populate();
        }
        app
    }

    pub fn root_dir(&self) -> &str {
        &self.root_input
    }

    pub fn tree(&self) -> Option<&FileTree> {
        self.tree.as_ref()
    }

    pub fn selected(&self) -> Option<NodeId> {
        self.selected
    }

    pub fn dispatcher(&self) -> &PreviewDispatcher {
        &self.dispatcher
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn split_fraction(&self) -> f32 {
        self.split_fraction
    }

    /// Switch to a new root directory and rebuild the tree.
    pub fn set_root(&mut self, path: &Path) {
        log::info!("Root directory set to {}", path.display());
        self.root_input = path.display().to_string();
        self.populate();
    }

    /// Rebuild the tree from the current root, clearing the selection.
    pub fn populate(&mut self) {
        self.selected = None;
        self.selected_info = None;
        self.dispatcher.reset();
        match FileTree::populate(Path::new(self.root_input.trim())) {
            Ok(tree) => {
                self.tree = Some(tree);
                self.status = None;
            }
            Err(e) => {
                log::warn!("{}", e);
                self.tree = None;
                self.status = Some(e.to_string());
            }
        }
    }

    pub fn selected_path(&self) -> Option<PathBuf> {
        let tree = self.tree.as_ref()?;
        self.selected.map(|id| tree.path_of(id))
    }

    /// Select a tree node and preview the file it stands for.
    pub fn select(&mut self, id: NodeId) {
        let Some(tree) = &self.tree else {
            return;
        };
        let path = tree.path_of(id);
        self.selected = Some(id);
        self.selected_info = FileInfo::from_path(&path);
        self.dispatcher.preview(&path);
    }

    /// Tree pane width for the stored split fraction
    pub fn tree_pane_width(&self, total_width: f32) -> f32 {
        style::split_width(self.split_fraction, total_width)
    }

    /// Remember the split after the user resized the panes.
    pub fn record_layout(&mut self, tree_width: f32, total_width: f32) {
        if total_width > 0.0 {
            self.split_fraction = style::split_fraction(tree_width, total_width);
        }
    }

    pub fn settings(&self) -> Settings {
        Settings {
            root_dir: self.root_input.trim().to_string(),
            splitter_left_fraction: self.split_fraction,
        }
    }

    pub fn save_settings(&self) {
        if let Err(e) = self.store.save(&self.settings()) {
            log::warn!("Failed to save settings: {}", e);
        }
    }

    fn browse(&mut self) {
        let mut dialog = rfd::FileDialog::new().set_title("Select Directory");
        let current = Path::new(self.root_input.trim());
        if current.is_dir() {
            dialog = dialog.set_directory(current);
        }
        if let Some(path) = dialog.pick_folder() {
            self.set_root(&path);
        }
    }

    fn render_toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("Root:");
            let browse = ui.button("Browse…");
            let refresh = ui.button("⟳ Refresh");
            let input = ui.add(
                egui::TextEdit::singleline(&mut self.root_input)
                    .hint_text("Choose a directory")
                    .desired_width(f32::INFINITY),
            );

            if browse.clicked() {
                self.browse();
            }
            let submitted = input.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            if refresh.clicked() || submitted {
                self.populate();
            }
        });
        if let Some(status) = &self.status {
            ui.colored_label(egui::Color32::RED, status);
        }
    }

    fn render_preview_pane(&mut self, ui: &mut egui::Ui) {
        let Some(info) = &self.selected_info else {
            if self.selected.is_none() {
                style::centered_message(ui, "Select a file to preview");
                return;
            }
            self.dispatcher.show(ui);
            return;
        };

        render_preview_header(ui, info);
        if !info.is_dir && ui.small_button("Open externally").clicked() {
            if let Err(e) = open::that(&info.path) {
                log::warn!("Failed to open {}: {}", info.path.display(), e);
            }
        }
        ui.separator();
        self.dispatcher.show(ui);
    }
}

impl eframe::App for Browser {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.add_space(4.0);
            self.render_toolbar(ui);
            ui.add_space(4.0);
        });

        let total_width = style::window_width(ctx);
        let max_width = (total_width - style::PREVIEW_MIN_WIDTH).max(style::TREE_MIN_WIDTH);
        let mut panel = egui::SidePanel::left("tree_panel")
            .resizable(true)
            .min_width(style::TREE_MIN_WIDTH)
            .max_width(max_width);
        if self.split_pending && total_width > 0.0 {
            panel = panel.exact_width(self.tree_pane_width(total_width).clamp(style::TREE_MIN_WIDTH, max_width));
            self.split_pending = false;
        } else {
            panel = panel.default_width(self.tree_pane_width(total_width));
        }

        let tree = self.tree.as_ref();
        let selected = self.selected;
        let response = panel.show(ctx, |ui| match tree {
            Some(tree) => render_tree(ui, tree, selected),
            None => {
                ui.weak("No directory loaded");
                None
            }
        });
        self.record_layout(response.response.rect.width(), total_width);
        if let Some(id) = response.inner {
            self.select(id);
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.render_preview_pane(ui);
        });

        if ctx.input(|i| i.viewport().close_requested()) {
            self.save_settings();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn sample_root() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("b")).unwrap();
        fs::write(dir.path().join("b/c.txt"), "nested").unwrap();
        fs::write(dir.path().join("blob.bin"), [0u8, 159, 146]).unwrap();
        dir
    }

    #[test]
    fn test_restores_settings() {
        let root = sample_root();
        let settings_dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::at(settings_dir.path().join("settings.toml"));
        store
            .save(&Settings {
                root_dir: root.path().display().to_string(),
                splitter_left_fraction: 0.25,
            })
            .unwrap();

        let browser = Browser::new(store);
        assert_eq!(browser.root_dir(), root.path().display().to_string());
        assert_eq!(browser.split_fraction(), 0.25);
        assert_eq!(browser.tree_pane_width(1200.0), 300.0);
        assert!(browser.tree().is_some());
    }

    #[test]
    fn test_saves_root_and_split() {
        let root = sample_root();
        let settings_dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::at(settings_dir.path().join("settings.toml"));

        let mut browser = Browser::new(store.clone());
        browser.set_root(root.path());
        browser.record_layout(400.0, 800.0);
        browser.save_settings();

        let saved = store.load();
        assert_eq!(saved.root_dir, root.path().display().to_string());
        assert_eq!(saved.splitter_left_fraction, 0.5);

        let reopened = Browser::new(store);
        assert_eq!(reopened.tree_pane_width(1000.0), 500.0);
    }

    #[test]
    fn test_selecting_a_node_previews_its_path() {
        let root = sample_root();
        let settings_dir = tempfile::tempdir().unwrap();
        let mut browser = Browser::new(SettingsStore::at(settings_dir.path().join("s.toml")));
        browser.set_root(root.path());

        let node = browser.tree().unwrap().find(Path::new("b/c.txt")).unwrap();
        browser.select(node);
        assert_eq!(browser.selected_path(), Some(root.path().join("b").join("c.txt")));
        let handler = browser.dispatcher().current_handler().unwrap();
        assert_eq!(handler.name(), "text");
        assert_eq!(handler.message(), None);

        let blob = browser.tree().unwrap().find(Path::new("blob.bin")).unwrap();
        browser.select(blob);
        let handler = browser.dispatcher().current_handler().unwrap();
        assert_eq!(handler.name(), "fallback");
        assert!(handler.message().unwrap().contains("blob.bin"));
    }

    #[test]
    fn test_changing_root_clears_selection() {
        let root = sample_root();
        let other = sample_root();
        let settings_dir = tempfile::tempdir().unwrap();
        let mut browser = Browser::new(SettingsStore::at(settings_dir.path().join("s.toml")));
        browser.set_root(root.path());
        let node = browser.tree().unwrap().find(Path::new("b")).unwrap();
        browser.select(node);
        assert!(browser.selected().is_some());

        browser.set_root(other.path());
        assert!(browser.selected().is_none());
        assert!(browser.dispatcher().current().is_none());
        assert_eq!(browser.tree().unwrap().root(), other.path());
    }

    #[test]
    fn test_bad_root_reports_status() {
        let settings_dir = tempfile::tempdir().unwrap();
        let mut browser = Browser::new(SettingsStore::at(settings_dir.path().join("s.toml")));
        browser.set_root(&settings_dir.path().join("does-not-exist"));
        assert!(browser.tree().is_none());
        assert!(browser.status().unwrap().starts_with("Unable to list"));
    }
}
