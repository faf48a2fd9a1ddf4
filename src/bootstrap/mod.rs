pub mod config;
pub mod logging;
pub mod ports;
pub mod router;
pub mod server;
pub mod tunnel;
