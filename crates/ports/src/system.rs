use super::errors::PortError;
use super::models::ProcessTable;
use async_trait::async_trait;
use tokio::process::Command;

/// Process table backed by `lsof`/`kill` on Unix and PowerShell/`taskkill`
/// on Windows.
pub struct SystemProcessTable;

#[async_trait]
impl ProcessTable for SystemProcessTable {
    async fn listeners(&self, port: u16) -> Result<Vec<u32>, PortError> {
        let output = match lookup_command(port).output().await {
            Ok(output) => output,
            Err(e) => {
                // No lookup tool means nothing we could kill either.
                tracing::debug!("Port lookup for {} unavailable: {}", port, e);
                return Ok(vec![]);
            }
        };

        if !output.status.success() {
            return Ok(vec![]);
        }

        Ok(parse_pids(&String::from_utf8_lossy(&output.stdout)))
    }

    async fn kill(&self, pid: u32) -> Result<(), PortError> {
        let output = kill_command(pid).output().await?;

        if output.status.success() {
            Ok(())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            Err(PortError::KillFailed {
                pid,
                reason: if stderr.is_empty() {
                    format!("exited with {}", output.status)
                } else {
                    stderr
                },
            })
        }
    }
}

#[cfg(target_os = "windows")]
fn lookup_command(port: u16) -> Command {
    let mut cmd = Command::new("powershell");
    cmd.args([
        "-NoProfile",
        "-Command",
        &format!(
            "Get-NetTCPConnection -LocalPort {} -State Listen -ErrorAction SilentlyContinue | Select-Object -ExpandProperty OwningProcess",
            port
        ),
    ]);
    cmd
}

#[cfg(not(target_os = "windows"))]
fn lookup_command(port: u16) -> Command {
    // Listening sockets only, so clients connected to the port are left alone.
    let mut cmd = Command::new("lsof");
    cmd.args(["-t", &format!("-iTCP:{}", port), "-sTCP:LISTEN"]);
    cmd
}

#[cfg(target_os = "windows")]
fn kill_command(pid: u32) -> Command {
    let mut cmd = Command::new("taskkill");
    cmd.args(["/PID", &pid.to_string(), "/F"]);
    cmd
}

#[cfg(not(target_os = "windows"))]
fn kill_command(pid: u32) -> Command {
    let mut cmd = Command::new("kill");
    cmd.args(["-9", &pid.to_string()]);
    cmd
}

/// One PID per line, duplicates removed, order kept. PID 0 (the Windows idle
/// process) is never a valid target.
pub fn parse_pids(output: &str) -> Vec<u32> {
    let mut pids = Vec::new();
    for pid in output
        .lines()
        .filter_map(|line| line.trim().parse::<u32>().ok())
        .filter(|pid| *pid != 0)
    {
        if !pids.contains(&pid) {
            pids.push(pid);
        }
    }
    pids
}
