use std::path::Path;

use anyhow::{Context, Result};
use thiserror::Error;
use tokio::fs;

/// How many leading bytes the binary heuristic inspects.
const SNIFF_LEN: usize = 4096;

/// Fraction of control bytes in the sniffed prefix above which a file is
/// treated as binary.
const MAX_CONTROL_RATIO: f64 = 0.30;

#[derive(Debug, Error)]
pub enum ReadTextError {
    /// The file failed the text heuristic (NUL byte or too many control
    /// bytes in its leading bytes) or is not valid UTF-8.
    #[error("file is not text")]
    Binary,

    #[error(transparent)]
    Io(#[from] anyhow::Error),
}

pub async fn exists(path: &Path) -> bool {
    fs::try_exists(path).await.unwrap_or(false)
}

pub async fn is_directory(path: &Path) -> bool {
    fs::metadata(path)
        .await
        .map(|m| m.is_dir())
        .unwrap_or(false)
}

/// Read a file as UTF-8 text, refusing content that looks binary.
pub async fn read_text(path: &Path) -> Result<String, ReadTextError> {
    let bytes = fs::read(path)
        .await
        .with_context(|| format!("Failed to read file: {}", path.display()))?;

    if looks_binary(&bytes) {
        return Err(ReadTextError::Binary);
    }

    String::from_utf8(bytes).map_err(|_| ReadTextError::Binary)
}

/// Overwrite `path` with `content` encoded as UTF-8. The parent directory
/// must already exist.
pub async fn write_text(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content)
        .await
        .with_context(|| format!("Failed to write file: {}", path.display()))
}

/// Text heuristic: a NUL byte anywhere in the sniffed prefix, or a control
/// byte ratio above 30%, marks the content binary. Bytes >= 0x80 are left
/// alone here; multi-byte UTF-8 is settled by the decode step.
pub fn looks_binary(bytes: &[u8]) -> bool {
    let sniff = &bytes[..bytes.len().min(SNIFF_LEN)];
    if sniff.is_empty() {
        return false;
    }

    if sniff.contains(&0) {
        return true;
    }

    let control = sniff
        .iter()
        .filter(|&&b| b < 0x20 && b != b'\t' && b != b'\n' && b != b'\r')
        .count();

    control as f64 / sniff.len() as f64 > MAX_CONTROL_RATIO
}
