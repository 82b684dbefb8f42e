// Preview handlers module

mod archive;
mod fallback;
mod image;
mod text;
mod video;

pub use archive::ArchivePreviewHandler;
pub use fallback::FallbackPreviewHandler;
pub use image::ImagePreviewHandler;
pub use text::TextPreviewHandler;
pub use video::VideoPreviewHandler;
