pub mod extension;
pub mod path;
pub mod errors;

pub use extension::*;
pub use path::*;
pub use errors::*;
