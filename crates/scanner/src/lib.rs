mod models;
mod scanner;
mod errors;

pub use models::*;
pub use errors::ScanError;
