mod models;
mod state;
mod health;
mod listing;
mod pages;
pub mod files;

pub use models::AppState;
pub use health::health;
pub use listing::list_files;
pub use pages::{index, stylesheet};
pub use files::serve_file;
