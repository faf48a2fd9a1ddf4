mod errors;
mod models;
mod operator;
mod reconciler;
mod system;

pub use errors::PortError;
pub use models::*;
pub use operator::{is_affirmative, StdinOperator};
pub use system::{parse_pids, SystemProcessTable};
