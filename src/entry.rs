use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Metadata shown above the preview for the selected path
#[derive(Clone, Debug)]
pub struct FileInfo {
    pub path: PathBuf,
    pub name: String,
    pub is_dir: bool,
    pub is_symlink: bool,
    pub size: u64,
    pub modified: SystemTime,
}

impl FileInfo {
    pub fn from_path(path: &Path) -> Option<Self> {
        let symlink_meta = fs::symlink_metadata(path).ok()?;
        let is_symlink = symlink_meta.is_symlink();

        let name = path.file_name()?.to_string_lossy().to_string();

        let metadata = fs::metadata(path).ok();
        let is_dir = metadata.as_ref().map(|m| m.is_dir()).unwrap_or(false);
        let size = metadata.as_ref().map(|m| m.len()).unwrap_or(0);
        let modified = metadata
            .as_ref()
            .and_then(|m| m.modified().ok())
            .or_else(|| symlink_meta.modified().ok())
            .unwrap_or(SystemTime::UNIX_EPOCH);

        Some(Self {
            path: path.to_path_buf(),
            name,
            is_dir,
            is_symlink,
            size,
            modified,
        })
    }

    pub fn display_name(&self) -> String {
        if self.is_symlink {
            format!("{} \u{2192}", self.name)
        } else {
            self.name.clone()
        }
    }
}

/// Emoji icon for a tree row, chosen from the entry's extension
pub fn icon_for(name: &str, is_dir: bool) -> &'static str {
    if is_dir {
        return "📁";
    }
    let extension = Path::new(name)
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "png" | "jpg" | "jpeg" | "gif" | "webp" | "bmp" | "tif" | "tiff" => "🖼",
        "mp4" | "mkv" | "mov" | "avi" | "webm" | "m4v" | "wmv" => "🎞",
        "zip" | "tar" | "gz" | "tgz" => "📦",
        "txt" | "md" | "log" | "csv" => "📝",
        _ => "📄",
    }
}
