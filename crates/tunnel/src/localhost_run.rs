use super::errors::TunnelError;
use super::models::{TunnelHandle, TunnelInfo, TunnelPublisher};
use super::url::localhost_run_url;
use async_trait::async_trait;
use russh::client::{self, Msg};
use russh::keys::ssh_key::PublicKey;
use russh::{Channel, ChannelId, Disconnect};
use std::future::Future;
use std::sync::{Arc, OnceLock};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::{mpsc, Mutex};

const PROVIDER: &str = "localhost.run";
const SSH_HOST: (&str, u16) = ("localhost.run", 22);
const COPY_BUFFER_SIZE: usize = 8192;

/// Anonymous SSH reverse tunnel through localhost.run
pub struct LocalhostRunPublisher {
    timeout: Duration,
}

impl LocalhostRunPublisher {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

/// Collects what the server prints until the tunnel URL shows up. Once the
/// URL is sent the buffer is released and later output is ignored.
struct UrlWatch {
    url_tx: Mutex<Option<mpsc::Sender<String>>>,
    output: Mutex<String>,
    shell: OnceLock<ChannelId>,
}

impl UrlWatch {
    fn new(url_tx: mpsc::Sender<String>) -> Self {
        Self {
            url_tx: Mutex::new(Some(url_tx)),
            output: Mutex::new(String::new()),
            shell: OnceLock::new(),
        }
    }

    /// Forwarded HTTP traffic arrives on other channels and is never scanned.
    fn watches(&self, channel: ChannelId) -> bool {
        self.shell.get() == Some(&channel)
    }

    async fn feed(&self, text: &str) {
        let mut url_tx = self.url_tx.lock().await;
        let Some(tx) = url_tx.as_ref() else {
            return;
        };

        let mut output = self.output.lock().await;
        output.push_str(text);

        if let Some(url) = localhost_run_url(&output) {
            let _ = tx.try_send(url);
            *url_tx = None;
            *output = String::new();
        }
    }

    async fn is_done(&self) -> bool {
        self.url_tx.lock().await.is_none()
    }
}

/// SSH client side: watches server output and proxies forwarded connections
struct ForwardingClient {
    local_port: u16,
    watch: Arc<UrlWatch>,
}

impl client::Handler for ForwardingClient {
    type Error = russh::Error;

    fn auth_banner(
        &mut self,
        banner: &str,
        _session: &mut client::Session,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send {
        let watch = Arc::clone(&self.watch);
        let banner = banner.to_string();
        async move {
            tracing::debug!("SSH auth banner: {}", banner);
            watch.feed(&banner).await;
            Ok(())
        }
    }

    fn data(
        &mut self,
        channel: ChannelId,
        data: &[u8],
        _session: &mut client::Session,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send {
        let watch = Arc::clone(&self.watch);
        let text = watch
            .watches(channel)
            .then(|| String::from_utf8_lossy(data).to_string());
        async move {
            if let Some(text) = text {
                tracing::debug!("SSH data: {}", text);
                watch.feed(&text).await;
            }
            Ok(())
        }
    }

    fn extended_data(
        &mut self,
        channel: ChannelId,
        _ext: u32,
        data: &[u8],
        _session: &mut client::Session,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send {
        let watch = Arc::clone(&self.watch);
        let text = watch
            .watches(channel)
            .then(|| String::from_utf8_lossy(data).to_string());
        async move {
            if let Some(text) = text {
                tracing::debug!("SSH extended data: {}", text);
                watch.feed(&text).await;
            }
            Ok(())
        }
    }

    fn server_channel_open_forwarded_tcpip(
        &mut self,
        channel: Channel<Msg>,
        _connected_address: &str,
        _connected_port: u32,
        _originator_address: &str,
        _originator_port: u32,
        _session: &mut client::Session,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send {
        let local_port = self.local_port;
        async move {
            tracing::debug!("Forwarded connection, proxying to localhost:{}", local_port);
            tokio::spawn(async move {
                if let Err(e) = proxy_to_local(channel, local_port).await {
                    tracing::warn!("Forwarded connection failed: {}", e);
                }
            });
            Ok(())
        }
    }

    // localhost.run rotates keys; the endpoint is a public service
    async fn check_server_key(&mut self, _server_public_key: &PublicKey) -> Result<bool, Self::Error> {
        Ok(true)
    }
}

/// Pipes one forwarded SSH channel to the local HTTP server in both directions.
async fn proxy_to_local(channel: Channel<Msg>, local_port: u16) -> Result<(), TunnelError> {
    let local = TcpStream::connect(("127.0.0.1", local_port)).await?;
    let (mut local_read, mut local_write) = tokio::io::split(local);
    let (mut channel_read, channel_write) = channel.split();

    let inbound = tokio::spawn(async move {
        let mut reader = channel_read.make_reader();
        let mut buf = vec![0u8; COPY_BUFFER_SIZE];
        loop {
            match reader.read(&mut buf).await {
                Ok(0) | Err(_) => break,
                Ok(n) => {
                    if local_write.write_all(&buf[..n]).await.is_err() {
                        break;
                    }
                    let _ = local_write.flush().await;
                }
            }
        }
    });

    let outbound = tokio::spawn(async move {
        let mut writer = channel_write.make_writer();
        let mut buf = vec![0u8; COPY_BUFFER_SIZE];
        loop {
            match local_read.read(&mut buf).await {
                Ok(0) | Err(_) => break,
                Ok(n) => {
                    if writer.write_all(&buf[..n]).await.is_err() {
                        break;
                    }
                    let _ = writer.flush().await;
                }
            }
        }
    });

    let _ = tokio::join!(inbound, outbound);
    Ok(())
}

#[async_trait]
impl TunnelPublisher for LocalhostRunPublisher {
    fn provider(&self) -> &'static str {
        PROVIDER
    }

    async fn publish(&self, local_port: u16) -> Result<(TunnelInfo, TunnelHandle), TunnelError> {
        let (url_tx, mut url_rx) = mpsc::channel::<String>(1);
        let watch = Arc::new(UrlWatch::new(url_tx));

        let config = Arc::new(client::Config {
            inactivity_timeout: Some(Duration::from_secs(3600)),
            keepalive_interval: Some(Duration::from_secs(30)),
            keepalive_max: 3,
            ..Default::default()
        });

        let handler = ForwardingClient {
            local_port,
            watch: Arc::clone(&watch),
        };

        tracing::debug!("Connecting to {}:{}", SSH_HOST.0, SSH_HOST.1);
        let mut session = client::connect(config, SSH_HOST, handler).await?;

        let auth = session.authenticate_none("nokey").await?;
        if !auth.success() {
            return Err(TunnelError::AuthRejected(PROVIDER.to_string()));
        }

        // The URL is printed on an interactive shell, so a PTY is required.
        let channel = session.channel_open_session().await?;
        let _ = watch.shell.set(channel.id());
        channel.request_pty(false, "xterm", 80, 24, 0, 0, &[]).await?;
        channel.request_shell(false).await?;

        session.tcpip_forward("localhost", 80).await?;

        let shell_watch = Arc::clone(&watch);
        let (mut channel_read, _channel_write) = channel.split();
        tokio::spawn(async move {
            let mut reader = channel_read.make_reader();
            let mut buf = [0u8; 4096];
            loop {
                match reader.read(&mut buf).await {
                    Ok(0) | Err(_) => break,
                    Ok(n) => {
                        shell_watch.feed(&String::from_utf8_lossy(&buf[..n])).await;
                        if shell_watch.is_done().await {
                            break;
                        }
                    }
                }
            }
        });

        let public_url = match tokio::time::timeout(self.timeout, url_rx.recv()).await {
            Ok(Some(url)) => url,
            Ok(None) => return Err(TunnelError::Closed),
            Err(_) => return Err(TunnelError::Timeout(self.timeout)),
        };

        tracing::info!("{} tunnel established: {}", PROVIDER, public_url);

        let (handle, mut shutdown_rx) = TunnelHandle::new();
        tokio::spawn(async move {
            // Forwarded connections are driven by the session's handler;
            // this task only owns the session until shutdown.
            while shutdown_rx.changed().await.is_ok() {
                if *shutdown_rx.borrow() {
                    break;
                }
            }
            tracing::info!("Shutting down {} tunnel", PROVIDER);
            let _ = session
                .disconnect(Disconnect::ByApplication, "shutdown", "en")
                .await;
        });

        Ok((
            TunnelInfo {
                public_url,
                provider: PROVIDER,
            },
            handle,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BANNER: &str = "Welcome to localhost.run!\n\
        https://admin.localhost.run/\n\
        a1b2c3d4e5.lhr.life tunneled with tls termination, https://a1b2c3d4e5.lhr.life\n";

    #[tokio::test]
    async fn test_url_watch_reports_once_and_releases_output() {
        let (url_tx, mut url_rx) = mpsc::channel(1);
        let watch = UrlWatch::new(url_tx);

        watch.feed("Welcome to localhost.run!\n").await;
        assert!(!watch.is_done().await);

        watch.feed(BANNER).await;
        assert_eq!(url_rx.recv().await.as_deref(), Some("https://a1b2c3d4e5.lhr.life"));
        assert!(watch.is_done().await);
        assert!(watch.output.lock().await.is_empty());

        watch.feed("GET /1.1.0/App.msi HTTP/1.1\r\n").await;
        assert!(watch.output.lock().await.is_empty());
        // The sender was dropped with the URL.
        assert!(url_rx.recv().await.is_none());
    }
}
