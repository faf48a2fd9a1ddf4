use super::errors::PortError;
use super::models::Operator;
use async_trait::async_trait;
use filedock_models::PortConflict;
use std::io::{self, Write};

const KILL_PROMPT: &str = "Do you want to kill the process and continue? (y/N): ";

/// Asks on the controlling terminal. Blocks until a line (or EOF) arrives.
pub struct StdinOperator;

#[async_trait]
impl Operator for StdinOperator {
    async fn confirm_kill(&self, _conflict: &PortConflict) -> Result<bool, PortError> {
        let answer = tokio::task::spawn_blocking(|| -> io::Result<String> {
            print!("{}", KILL_PROMPT);
            io::stdout().flush()?;
            let mut input = String::new();
            io::stdin().read_line(&mut input)?;
            Ok(input)
        })
        .await?
        .map_err(PortError::Prompt)?;

        Ok(is_affirmative(&answer))
    }
}

/// `y` / `yes` in any case; everything else, EOF included, declines.
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
