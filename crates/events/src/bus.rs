use super::models::{AppEvent, EventBus};
use colored::Colorize;
use std::sync::Arc;

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

impl EventBus {
    /// Silent mode keeps tracing output but drops console rendering.
    pub fn new(silent_mode: bool) -> Arc<Self> {
        Arc::new(Self { silent_mode })
    }

    pub fn emit(&self, event: AppEvent) {
        match event {
            // Events that always go through tracing
            AppEvent::Error { context, error } => {
                tracing::error!("{}: {}", context, error);
            }
            AppEvent::BindFailed { addr, port, in_use, error } => {
                if in_use {
                    tracing::error!("❌ Port {} is already in use", port);
                    tracing::error!("Close the other application or change PORT");
                    #[cfg(target_os = "windows")]
                    tracing::error!("Find process: netstat -ano | findstr :{}", port);
                    #[cfg(not(target_os = "windows"))]
                    tracing::error!("Find process: lsof -i :{}", port);
                } else {
                    tracing::error!("❌ Failed to bind server on {}: {}", addr, error);
                }
            }
            AppEvent::TunnelFailed { error, local_url } => {
                tracing::error!("Failed to start tunnel: {}", error);
                self.render(AppEvent::TunnelFailed { error, local_url });
            }
            event => self.render(event),
        }
    }

    fn render(&self, event: AppEvent) {
        if self.silent_mode {
            return;
        }

        match event {
            // Application lifecycle
            AppEvent::Starting => {
                println!("\n{}", RULE.bright_black());
                println!("  {}", "FileDock - Installer Hosting Server".white().bold());
                println!("  {} {}", "Version".dimmed(), env!("CARGO_PKG_VERSION").cyan());
                println!("{}\n", RULE.bright_black());
            }
            AppEvent::Ready { local_url, root_dir } => {
                println!("{}", RULE.green());
                println!("  {} {}", "Local URL ".white(), local_url.blue());
                println!("  {} {}", "Serving   ".white(), root_dir.cyan());
                println!("{}\n", RULE.green());
            }
            AppEvent::Shutdown => {
                println!("\n{}", "Server shutting down".red());
            }

            // Configuration
            AppEvent::ConfigLoaded { source } => {
                println!("  {} Config {}", "✓".green(), source.cyan());
            }

            // Port reconciliation
            AppEvent::PortConflict { port, pids } => {
                println!(
                    "\n  {} Port {} is already in use by process (PID: {})",
                    "⚠".yellow(),
                    port.to_string().cyan(),
                    pids.yellow()
                );
            }
            AppEvent::ProcessKilling { pids } => {
                println!("\n  {} Killing process {}...", "↻".blue(), pids.yellow());
            }
            AppEvent::ProcessKilled => {
                println!("  {} Process killed successfully", "✓".green());
            }
            AppEvent::ProcessKillFailed { error } => {
                println!("  {} Failed to kill process: {}", "✗".red(), error);
            }
            AppEvent::StartupCancelled => {
                println!("\n  {} Server startup cancelled by user", "✗".red());
            }

            // Tunnel
            AppEvent::TunnelStarting { provider } => {
                println!("  {} Starting {} tunnel...", "→".dimmed(), provider.cyan());
            }
            AppEvent::TunnelReady { public_url } => {
                println!("\n{}", RULE.green());
                println!("  {} {}", "Public URL".white(), public_url.blue().bold());
                println!("{}\n", RULE.green());
            }
            AppEvent::TunnelFailed { local_url, .. } => {
                println!(
                    "\n  {} Tunnel failed, but server is still running locally at {}",
                    "⚠".yellow(),
                    local_url.blue()
                );
                println!("  {} To disable the tunnel: USE_NGROK=false\n", "→".dimmed());
            }
            AppEvent::TunnelDisabled { local_url } => {
                println!("  {} Local mode (tunnel disabled): {}\n", "→".dimmed(), local_url.blue());
            }

            // Listing
            AppEvent::FilesAvailable { base_url, files } => {
                if files.is_empty() {
                    println!(
                        "  {} No files found. Add files to version directories (e.g., 1.1.0/)",
                        "⚠".yellow()
                    );
                } else {
                    println!("  {} Available Files:", "📦".white());
                    for file in files {
                        println!("     {}{}", base_url.dimmed(), file.cyan());
                    }
                }
                println!("\n  {} Stop server: Ctrl+C\n", "→".dimmed());
            }

            AppEvent::Error { .. }
            | AppEvent::BindFailed { .. } => {}
        }
    }
}
