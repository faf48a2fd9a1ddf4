use super::errors::TunnelError;
use super::models::{TunnelHandle, TunnelInfo, TunnelPublisher};
use super::url::{cloudflare_url, ngrok_url};
use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader, Lines};
use tokio::process::{Child, Command};

type AgentLines = Lines<BufReader<Box<dyn AsyncRead + Unpin + Send>>>;

#[derive(Debug, Clone, Copy)]
enum AgentOutput {
    Stdout,
    Stderr,
}

/// Tunnel provided by an external agent binary that prints its public URL
pub struct AgentPublisher {
    provider: &'static str,
    program: &'static str,
    install_hint: &'static str,
    args: fn(u16) -> Vec<String>,
    output: AgentOutput,
    parse_url: fn(&str) -> Option<String>,
    timeout: Duration,
}

impl AgentPublisher {
    pub fn cloudflare(timeout: Duration) -> Self {
        Self {
            provider: "Cloudflare",
            program: "cloudflared",
            install_hint: "https://developers.cloudflare.com/cloudflare-one/connections/connect-apps/install-and-setup/installation/",
            args: |port| {
                vec![
                    "tunnel".to_string(),
                    "--url".to_string(),
                    format!("http://localhost:{}", port),
                ]
            },
            output: AgentOutput::Stderr,
            parse_url: cloudflare_url,
            timeout,
        }
    }

    /// The agent authenticates itself from `NGROK_AUTHTOKEN`.
    pub fn ngrok(timeout: Duration) -> Self {
        Self {
            provider: "ngrok",
            program: "ngrok",
            install_hint: "https://ngrok.com/download",
            args: |port| {
                vec![
                    "http".to_string(),
                    port.to_string(),
                    "--log".to_string(),
                    "stdout".to_string(),
                    "--log-format".to_string(),
                    "logfmt".to_string(),
                ]
            },
            output: AgentOutput::Stdout,
            parse_url: ngrok_url,
            timeout,
        }
    }

    fn spawn(&self, local_port: u16) -> Result<(Child, AgentLines), TunnelError> {
        let mut child = Command::new(self.program)
            .args((self.args)(local_port))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| TunnelError::Spawn {
                program: self.program,
                source,
            })?;

        let stdout: Option<Box<dyn AsyncRead + Unpin + Send>> =
            child.stdout.take().map(|s| Box::new(s) as _);
        let stderr: Option<Box<dyn AsyncRead + Unpin + Send>> =
            child.stderr.take().map(|s| Box::new(s) as _);

        let (watched, other) = match self.output {
            AgentOutput::Stdout => (stdout, stderr),
            AgentOutput::Stderr => (stderr, stdout),
        };

        if let Some(other) = other {
            drain(self.program, BufReader::new(other).lines());
        }

        let watched = watched.ok_or(TunnelError::Closed)?;
        Ok((child, BufReader::new(watched).lines()))
    }
}

#[async_trait]
impl TunnelPublisher for AgentPublisher {
    fn provider(&self) -> &'static str {
        self.provider
    }

    async fn publish(&self, local_port: u16) -> Result<(TunnelInfo, TunnelHandle), TunnelError> {
        if !is_command_available(self.program).await {
            return Err(TunnelError::AgentMissing {
                program: self.program,
                hint: self.install_hint,
            });
        }

        let (mut child, mut lines) = self.spawn(local_port)?;

        let found = tokio::time::timeout(self.timeout, read_url(&mut lines, self.program, self.parse_url)).await;
        let public_url = match found {
            Ok(Ok(Some(url))) => url,
            Ok(Ok(None)) => {
                let status = match child.try_wait() {
                    Ok(Some(status)) => status.to_string(),
                    _ => "output closed".to_string(),
                };
                return Err(TunnelError::AgentExited {
                    program: self.program,
                    status,
                });
            }
            Ok(Err(e)) => return Err(e.into()),
            Err(_) => return Err(TunnelError::Timeout(self.timeout)),
        };

        tracing::info!("{} tunnel established: {}", self.provider, public_url);

        // Keep the pipe empty, the agent keeps logging for its whole life.
        drain(self.program, lines);

        let (handle, mut shutdown_rx) = TunnelHandle::new();
        let provider = self.provider;
        tokio::spawn(async move {
            tokio::select! {
                _ = async {
                    while shutdown_rx.changed().await.is_ok() {
                        if *shutdown_rx.borrow() {
                            break;
                        }
                    }
                } => {
                    tracing::info!("Shutting down {} tunnel", provider);
                    let _ = child.kill().await;
                }
                status = child.wait() => {
                    if let Ok(status) = status {
                        tracing::warn!("{} tunnel exited: {}", provider, status);
                    }
                }
            }
        });

        Ok((
            TunnelInfo {
                public_url,
                provider: self.provider,
            },
            handle,
        ))
    }
}

async fn read_url(
    lines: &mut AgentLines,
    program: &str,
    parse_url: fn(&str) -> Option<String>,
) -> std::io::Result<Option<String>> {
    while let Some(line) = lines.next_line().await? {
        tracing::debug!("{}: {}", program, line);
        if let Some(url) = parse_url(&line) {
            return Ok(Some(url));
        }
    }
    Ok(None)
}

fn drain(program: &'static str, mut lines: AgentLines) {
    tokio::spawn(async move {
        while let Ok(Some(line)) = lines.next_line().await {
            tracing::trace!("{}: {}", program, line);
        }
    });
}

async fn is_command_available(cmd: &str) -> bool {
    #[cfg(target_os = "windows")]
    let which_cmd = "where";

    #[cfg(not(target_os = "windows"))]
    let which_cmd = "which";

    Command::new(which_cmd)
        .arg(cmd)
        .output()
        .await
        .map(|output| output.status.success())
        .unwrap_or(false)
}
