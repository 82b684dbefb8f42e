pub mod preview;
pub mod tree;

pub use preview::{create_default_dispatcher, render_preview_header, PreviewDispatcher};
pub use tree::render_tree;
