//! Directory tree built from a chosen root.
//!
//! Nodes live in an arena and keep only their display name plus a parent
//! link; absolute paths are rebuilt on demand by walking up to the root.

use crate::error::TreeError;
use crate::io::directory::{list_directory, DirItem};
use std::borrow::Cow;
use std::ffi::{OsStr, OsString};
use std::io;
use std::path::{Path, PathBuf};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Clone, Debug)]
struct Node {
    name: OsString,
    is_dir: bool,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

#[derive(Clone, Debug)]
pub struct FileTree {
    root: PathBuf,
    nodes: Vec<Node>,
    top_level: Vec<NodeId>,
}

impl FileTree {
    /// Walk `root` recursively using the real filesystem.
    pub fn populate(root: &Path) -> Result<Self, TreeError> {
        Self::populate_with(root, list_directory)
    }

    /// Walk `root` with a custom directory lister.
    ///
    /// Only a failure to list the root itself is reported; any directory
    /// below it that cannot be listed is kept as a childless node.
    pub fn populate_with<F>(root: &Path, lister: F) -> Result<Self, TreeError>
    where
        F: Fn(&Path) -> io::Result<Vec<DirItem>>,
    {
        let items = lister(root).map_err(|source| {
            if source.kind() == io::ErrorKind::NotADirectory {
                TreeError::NotADirectory(root.to_path_buf())
            } else {
                TreeError::Unreadable {
                    path: root.to_path_buf(),
                    source,
                }
            }
        })?;

        let mut tree = Self {
            root: root.to_path_buf(),
            nodes: Vec::new(),
            top_level: Vec::new(),
        };
        tree.add_items(root, None, items, &lister);
        log::info!("Populated {} ({} entries)", root.display(), tree.len());
        Ok(tree)
    }

    fn add_items<F>(&mut self, dir: &Path, parent: Option<NodeId>, items: Vec<DirItem>, lister: &F)
    where
        F: Fn(&Path) -> io::Result<Vec<DirItem>>,
    {
        for item in items {
            let id = NodeId(self.nodes.len());
            self.nodes.push(Node {
                name: item.name.clone(),
                is_dir: item.is_dir,
                parent,
                children: Vec::new(),
            });
            match parent {
                Some(p) => self.nodes[p.0].children.push(id),
                None => self.top_level.push(id),
            }

            if item.is_dir {
                let child_dir = dir.join(&item.name);
                match lister(&child_dir) {
                    Ok(children) => self.add_items(&child_dir, Some(id), children, lister),
                    Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
                        log::debug!("Skipping unreadable {}", child_dir.display());
                    }
                    Err(e) => {
                        log::warn!("Skipping {}: {}", child_dir.display(), e);
                    }
                }
            }
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn top_level(&self) -> &[NodeId] {
        &self.top_level
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// Entry name exactly as the filesystem reported it
    pub fn name(&self, id: NodeId) -> &OsStr {
        &self.nodes[id.0].name
    }

    pub fn display_name(&self, id: NodeId) -> Cow<'_, str> {
        self.nodes[id.0].name.to_string_lossy()
    }

    pub fn is_dir(&self, id: NodeId) -> bool {
        self.nodes[id.0].is_dir
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    /// Absolute path of a node: its ancestors' names joined onto the root.
    pub fn path_of(&self, id: NodeId) -> PathBuf {
        let mut names = vec![self.name(id)];
        let mut current = self.parent(id);
        while let Some(p) = current {
            names.push(self.name(p));
            current = self.parent(p);
        }
        let mut path = self.root.clone();
        for name in names.into_iter().rev() {
            path.push(name);
        }
        path
    }

    /// Find the node at a path relative to the root.
    pub fn find(&self, relative: &Path) -> Option<NodeId> {
        let mut level = self.top_level.as_slice();
        let mut found = None;
        for component in relative.components() {
            let name = component.as_os_str();
            let id = *level.iter().find(|id| self.name(**id) == name)?;
            level = self.children(id);
            found = Some(id);
        }
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::fs;

    fn fake_lister(
        layout: HashMap<PathBuf, Vec<DirItem>>,
        denied: PathBuf,
    ) -> impl Fn(&Path) -> io::Result<Vec<DirItem>> {
        move |path: &Path| {
            if path == denied.as_path() {
                return Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
            }
            layout
                .get(path)
                .cloned()
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "missing"))
        }
    }

    #[test]
    fn test_path_reconstruction() {
        let mut layout = HashMap::new();
        layout.insert(PathBuf::from("/a"), vec![DirItem::dir("b")]);
        layout.insert(PathBuf::from("/a/b"), vec![DirItem::file("c.txt")]);
        let tree = FileTree::populate_with(Path::new("/a"), fake_lister(layout, PathBuf::new())).unwrap();

        let node = tree.find(Path::new("b/c.txt")).unwrap();
        assert_eq!(tree.path_of(node), PathBuf::from("/a/b/c.txt"));
        assert_eq!(tree.path_of(tree.top_level()[0]), PathBuf::from("/a/b"));
    }

    #[test]
    fn test_permission_denied_subtree_is_skipped() {
        let mut layout = HashMap::new();
        layout.insert(
            PathBuf::from("/r"),
            vec![DirItem::dir("locked"), DirItem::dir("open"), DirItem::file("top.txt")],
        );
        layout.insert(PathBuf::from("/r/open"), vec![DirItem::file("inner.txt")]);
        layout.insert(PathBuf::from("/r/locked"), vec![DirItem::file("secret.txt")]);
        let tree =
            FileTree::populate_with(Path::new("/r"), fake_lister(layout, PathBuf::from("/r/locked"))).unwrap();

        assert_eq!(tree.len(), 4);
        let locked = tree.find(Path::new("locked")).unwrap();
        assert!(tree.is_dir(locked));
        assert!(tree.children(locked).is_empty());
        assert!(tree.find(Path::new("open/inner.txt")).is_some());
        assert!(tree.find(Path::new("top.txt")).is_some());
    }

    #[test]
    fn test_unreadable_root_is_an_error() {
        let lister = fake_lister(HashMap::new(), PathBuf::from("/nope"));
        assert!(matches!(
            FileTree::populate_with(Path::new("/nope"), lister),
            Err(TreeError::Unreadable { .. })
        ));
    }

    #[test]
    fn test_populate_real_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("b/deeper")).unwrap();
        fs::write(dir.path().join("b/c.txt"), "hi").unwrap();
        fs::write(dir.path().join("b/deeper/d.rs"), "fn main() {}").unwrap();
        fs::write(dir.path().join("top.md"), "# top").unwrap();

        let tree = FileTree::populate(dir.path()).unwrap();
        assert_eq!(tree.len(), 5);
        assert_eq!(tree.name(tree.top_level()[0]), "b");
        assert_eq!(tree.display_name(tree.top_level()[0]), "b");
        let nested = tree.find(Path::new("b/deeper/d.rs")).unwrap();
        assert_eq!(tree.path_of(nested), dir.path().join("b/deeper/d.rs"));
    }

    #[test]
    fn test_populate_file_root_fails() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("plain.txt");
        fs::write(&file, "").unwrap();
        assert!(FileTree::populate(&file).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_directory_on_disk() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let locked = dir.path().join("locked");
        fs::create_dir(&locked).unwrap();
        fs::write(locked.join("hidden.txt"), "").unwrap();
        fs::write(dir.path().join("visible.txt"), "").unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        let tree = FileTree::populate(dir.path()).unwrap();
        // Privileged users can still list the directory
        let readable = fs::read_dir(&locked).is_ok();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        assert!(tree.find(Path::new("visible.txt")).is_some());
        let node = tree.find(Path::new("locked")).unwrap();
        if !readable {
            assert!(tree.children(node).is_empty());
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_name_round_trips_to_its_path() {
        use std::os::unix::ffi::OsStrExt;

        let dir = tempfile::tempdir().unwrap();
        let name = OsStr::from_bytes(b"caf\xe9.txt");
        if fs::write(dir.path().join(name), "bytes").is_err() {
            // Filesystem refuses non-UTF-8 names
            return;
        }

        let tree = FileTree::populate(dir.path()).unwrap();
        let node = tree.top_level()[0];
        let path = tree.path_of(node);
        assert_eq!(path, dir.path().join(name));
        assert!(path.exists());
        assert_eq!(tree.display_name(node), "caf\u{FFFD}.txt");
        assert_eq!(tree.find(Path::new(name)), Some(node));
    }
}
