pub mod archive;
pub mod directory;
pub mod video;

pub use archive::{list_archive, ArchiveEntry, ArchiveListing};
pub use directory::{list_directory, DirItem};
pub use video::{FfmpegSource, FrameSource, RgbFrame};
