pub mod config;
pub mod error;
pub mod list;
pub mod log;
pub mod util;

// Decoupled game loop architecture
pub mod app;
pub mod render;
pub mod tea;
pub mod ui;

pub use error::{Error, Result};
pub use list::{Item, ItemId, ListId, Store, TodoList};
