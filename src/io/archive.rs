use crate::error::PreviewError;
use flate2::read::GzDecoder;
use std::fs;
use std::io::Read;
use std::path::Path;
use tar::Archive;
use zip::ZipArchive;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArchiveEntry {
    pub name: String,
    pub size: u64,
    pub is_dir: bool,
}

#[derive(Clone, Debug, Default)]
pub struct ArchiveListing {
    pub entries: Vec<ArchiveEntry>,
    /// Exact entry count when known; `None` when a tar stream was cut short.
    pub total: Option<usize>,
}

impl ArchiveListing {
    pub fn summary(&self, limit: usize) -> String {
        match self.total {
            Some(t) if t > limit => format!("Archive contains {} items (showing first {})", t, limit),
            Some(t) => format!("Archive contains {} items", t),
            None => format!("Archive contains {}+ items", self.entries.len()),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArchiveKind {
    Zip,
    Tar,
    TarGz,
}

impl ArchiveKind {
    pub fn from_path(path: &Path) -> Option<Self> {
        let name = path.to_string_lossy();
        if name.ends_with(".zip") {
            Some(Self::Zip)
        } else if name.ends_with(".tar.gz") || name.ends_with(".tgz") {
            Some(Self::TarGz)
        } else if name.ends_with(".tar") {
            Some(Self::Tar)
        } else {
            None
        }
    }
}

/// List up to `limit` entries of a zip or tar archive.
pub fn list_archive(path: &Path, limit: usize) -> Result<ArchiveListing, PreviewError> {
    let fail = |reason: String| PreviewError::Archive {
        path: path.to_path_buf(),
        reason,
    };
    let kind = ArchiveKind::from_path(path).ok_or_else(|| fail("unsupported archive type".into()))?;
    let file = fs::File::open(path).map_err(|source| PreviewError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    match kind {
        ArchiveKind::Zip => {
            let mut archive = ZipArchive::new(file).map_err(|e| fail(e.to_string()))?;
            // zip keeps a central directory, so the total is exact
            let total = archive.len();
            let mut entries = Vec::new();
            for i in 0..total.min(limit) {
                if let Ok(file) = archive.by_index(i) {
                    entries.push(ArchiveEntry {
                        name: file.name().to_string(),
                        size: file.size(),
                        is_dir: file.is_dir(),
                    });
                }
            }
            Ok(ArchiveListing {
                entries,
                total: Some(total),
            })
        }
        ArchiveKind::Tar | ArchiveKind::TarGz => {
            let reader: Box<dyn Read> = if kind == ArchiveKind::TarGz {
                Box::new(GzDecoder::new(file))
            } else {
                Box::new(file)
            };
            let mut archive = Archive::new(reader);
            let mut entries = Vec::new();
            let mut complete = true;
            // Stops at the first entry past the limit or at a read error
            for entry in archive.entries().map_err(|e| fail(e.to_string()))? {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(e) if entries.is_empty() => return Err(fail(e.to_string())),
                    Err(e) => {
                        log::debug!("Tar stream {} ends early: {}", path.display(), e);
                        complete = false;
                        break;
                    }
                };
                if entries.len() == limit {
                    complete = false;
                    break;
                }
                entries.push(ArchiveEntry {
                    name: entry
                        .path()
                        .map(|p| p.to_string_lossy().to_string())
                        .unwrap_or_default(),
                    size: entry.header().size().unwrap_or(0),
                    is_dir: entry.header().entry_type().is_dir(),
                });
            }
            let total = complete.then_some(entries.len());
            Ok(ArchiveListing { entries, total })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_zip(path: &Path, names: &[&str]) {
        let file = fs::File::create(path).unwrap();
        let mut writer = zip::ZipWriter::new(file);
        for name in names {
            writer
                .start_file(*name, zip::write::SimpleFileOptions::default())
                .unwrap();
            writer.write_all(b"payload").unwrap();
        }
        writer.finish().unwrap();
    }

    fn write_tar(path: &Path, names: &[&str]) {
        let file = fs::File::create(path).unwrap();
        let mut builder = tar::Builder::new(file);
        for name in names {
            let data = b"abc";
            let mut header = tar::Header::new_gnu();
            header.set_size(data.len() as u64);
            header.set_mode(0o644);
            header.set_cksum();
            builder.append_data(&mut header, name, &data[..]).unwrap();
        }
        builder.finish().unwrap();
    }

    #[test]
    fn test_archive_kind() {
        assert_eq!(ArchiveKind::from_path(Path::new("a.zip")), Some(ArchiveKind::Zip));
        assert_eq!(ArchiveKind::from_path(Path::new("a.tar.gz")), Some(ArchiveKind::TarGz));
        assert_eq!(ArchiveKind::from_path(Path::new("a.tgz")), Some(ArchiveKind::TarGz));
        assert_eq!(ArchiveKind::from_path(Path::new("a.tar")), Some(ArchiveKind::Tar));
        assert_eq!(ArchiveKind::from_path(Path::new("a.ZIP")), None);
    }

    #[test]
    fn test_list_zip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bundle.zip");
        write_zip(&path, &["one.txt", "two.txt", "three.txt"]);

        let listing = list_archive(&path, 2).unwrap();
        assert_eq!(listing.total, Some(3));
        assert_eq!(listing.entries.len(), 2);
        assert_eq!(listing.entries[0].name, "one.txt");
        assert_eq!(listing.entries[0].size, 7);
        assert_eq!(listing.summary(2), "Archive contains 3 items (showing first 2)");
    }

    #[test]
    fn test_list_tar_truncates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bundle.tar");
        write_tar(&path, &["a.txt", "b.txt", "c.txt"]);

        let listing = list_archive(&path, 10).unwrap();
        assert_eq!(listing.total, Some(3));
        assert_eq!(listing.entries[2].name, "c.txt");

        let listing = list_archive(&path, 2).unwrap();
        assert_eq!(listing.total, None);
        assert_eq!(listing.entries.len(), 2);
        assert_eq!(listing.summary(2), "Archive contains 2+ items");
    }

    #[test]
    fn test_corrupt_zip_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.zip");
        fs::write(&path, b"definitely not a zip").unwrap();
        assert!(matches!(list_archive(&path, 10), Err(PreviewError::Archive { .. })));
    }

    #[test]
    fn test_corrupt_tar_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let tar = dir.path().join("broken.tar");
        fs::write(&tar, [0x41u8; 1024]).unwrap();
        assert!(matches!(list_archive(&tar, 10), Err(PreviewError::Archive { .. })));

        let gz = dir.path().join("broken.tar.gz");
        fs::write(&gz, b"garbage bytes, not gzip").unwrap();
        assert!(matches!(list_archive(&gz, 10), Err(PreviewError::Archive { .. })));
    }

    #[test]
    fn test_cut_off_tar_has_no_exact_total() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cut.tar");
        write_tar(&path, &["a.txt", "b.txt", "c.txt"]);
        // First entry intact (header + one data block), second header cut short
        let bytes = fs::read(&path).unwrap();
        fs::write(&path, &bytes[..1024 + 100]).unwrap();

        let listing = list_archive(&path, 10).unwrap();
        assert_eq!(listing.entries.len(), 1);
        assert_eq!(listing.entries[0].name, "a.txt");
        assert_eq!(listing.total, None);
    }
}
