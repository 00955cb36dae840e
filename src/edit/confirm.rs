use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};

/// Decides whether a prepared edit may be written to disk.
///
/// The edit operation treats an `Err` from this trait, like an explicit
/// "no", as a decline.
#[async_trait::async_trait(?Send)]
pub trait Confirm {
    async fn confirm(&self, diff_text: &str, display_path: &str) -> Result<bool>;
}

/// Approves every edit without prompting. Used in tests and by hosts that
/// gate writes elsewhere.
pub struct ApproveAll;

#[async_trait::async_trait(?Send)]
impl Confirm for ApproveAll {
    async fn confirm(&self, _diff_text: &str, _display_path: &str) -> Result<bool> {
        Ok(true)
    }
}

/// Renders the diff to stdout and asks for a y/N answer on stdin.
/// End of input declines.
pub struct ConsoleConfirm;

#[async_trait::async_trait(?Send)]
impl Confirm for ConsoleConfirm {
    async fn confirm(&self, diff_text: &str, display_path: &str) -> Result<bool> {
        println!("{diff_text}");
        println!("Apply this edit to {display_path}? [y/N]");

        let mut reader = BufReader::new(tokio::io::stdin());
        let mut answer = String::new();
        let read = reader.read_line(&mut answer).await?;
        if read == 0 {
            return Ok(false);
        }

        let answer = answer.trim_ascii().to_ascii_lowercase();
        Ok(answer == "y" || answer == "yes")
    }
}
