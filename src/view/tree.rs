// Directory tree pane

use crate::entry::icon_for;
use crate::tree::{FileTree, NodeId};
use eframe::egui;

/// Draw the tree and return the node clicked this frame, if any.
pub fn render_tree(ui: &mut egui::Ui, tree: &FileTree, selected: Option<NodeId>) -> Option<NodeId> {
    let mut clicked = None;
    egui::ScrollArea::both()
        .id_salt("tree_scroll")
        .auto_shrink([false, false])
        .show(ui, |ui| {
            if tree.is_empty() {
                ui.weak("(empty directory)");
            }
            for &id in tree.top_level() {
                render_node(ui, tree, id, selected, &mut clicked);
            }
        });
    clicked
}

fn render_node(
    ui: &mut egui::Ui,
    tree: &FileTree,
    id: NodeId,
    selected: Option<NodeId>,
    clicked: &mut Option<NodeId>,
) {
    let name = tree.display_name(id);
    let label = format!("{} {}", icon_for(&name, tree.is_dir(id)), name);
    let is_selected = selected == Some(id);

    if tree.children(id).is_empty() {
        if ui.selectable_label(is_selected, label).clicked() {
            *clicked = Some(id);
        }
        return;
    }

    // Keyed by path so expansion state survives a refresh
    let state_id = ui.make_persistent_id(tree.path_of(id));
    let (_toggle, header, _body) =
        egui::collapsing_header::CollapsingState::load_with_default_open(ui.ctx(), state_id, false)
            .show_header(ui, |ui| ui.selectable_label(is_selected, label))
            .body(|ui| {
                for &child in tree.children(id) {
                    render_node(ui, tree, child, selected, clicked);
                }
            });
    if header.inner.clicked() {
        *clicked = Some(id);
    }
}
