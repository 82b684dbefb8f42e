use std::ffi::OsString;
use std::fs;
use std::path::Path;

/// One directory entry as seen by the tree populator
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DirItem {
    pub name: OsString,
    pub is_dir: bool,
}

impl DirItem {
    pub fn file(name: impl Into<OsString>) -> Self {
        Self {
            name: name.into(),
            is_dir: false,
        }
    }

    pub fn dir(name: impl Into<OsString>) -> Self {
        Self {
            name: name.into(),
            is_dir: true,
        }
    }
}

/// List a directory, directories first and then by case-insensitive name.
///
/// Symbolic links are reported with `is_dir == false` even when they point at
/// a directory, so callers never recurse through them.
pub fn list_directory(path: &Path) -> Result<Vec<DirItem>, std::io::Error> {
    let mut items = Vec::new();
    for entry in fs::read_dir(path)?.flatten() {
        let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
        items.push(DirItem {
            name: entry.file_name(),
            is_dir,
        });
    }
    sort_items(&mut items);
    Ok(items)
}

pub fn sort_items(items: &mut [DirItem]) {
    items.sort_by(|a, b| {
        if a.is_dir != b.is_dir {
            return b.is_dir.cmp(&a.is_dir);
        }
        let (a_key, b_key) = (a.name.to_string_lossy(), b.name.to_string_lossy());
        a_key
            .to_lowercase()
            .cmp(&b_key.to_lowercase())
            .then_with(|| a.name.cmp(&b.name))
    });
}
