//! Public tunnels for the local server.
//!
//! Providers:
//! - localhost.run (SSH reverse forward through russh, anonymous)
//! - Cloudflare quick tunnel (spawns `cloudflared`)
//! - ngrok (spawns the `ngrok` agent, which reads `NGROK_AUTHTOKEN`)

mod agent;
mod errors;
mod localhost_run;
mod models;
mod publisher;
mod url;

pub use agent::AgentPublisher;
pub use errors::TunnelError;
pub use localhost_run::LocalhostRunPublisher;
pub use models::{TunnelHandle, TunnelInfo, TunnelPublisher};
pub use publisher::publisher_for;
