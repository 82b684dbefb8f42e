pub mod app;
pub mod config;
pub mod entry;
pub mod error;
pub mod io;
pub mod style;
pub mod tree;
pub mod view;
