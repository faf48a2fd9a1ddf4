use super::errors::TunnelError;
use async_trait::async_trait;
use tokio::sync::watch;

/// A published tunnel
#[derive(Debug, Clone)]
pub struct TunnelInfo {
    /// Public HTTPS base URL, without trailing slash
    pub public_url: String,
    pub provider: &'static str,
}

/// Keeps the tunnel alive until [`TunnelHandle::shutdown`] is called
#[derive(Debug)]
pub struct TunnelHandle {
    pub(crate) shutdown_tx: watch::Sender<bool>,
}

impl TunnelHandle {
    /// The receiver flips to `true` on shutdown and errors once the handle is dropped.
    pub fn new() -> (Self, watch::Receiver<bool>) {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        (Self { shutdown_tx }, shutdown_rx)
    }

    pub fn shutdown(&self) {
        let _ = self.shutdown_tx.send(true);
    }
}

/// Requests a public endpoint forwarding to `localhost:<port>`
#[async_trait]
pub trait TunnelPublisher: Send + Sync {
    fn provider(&self) -> &'static str;

    async fn publish(&self, local_port: u16) -> Result<(TunnelInfo, TunnelHandle), TunnelError>;
}
