//! Trust list file: one decimal identity per line, append-only

use std::collections::HashSet;
use std::io::{ErrorKind, SeekFrom};
use std::path::Path;
use tokio::io::{AsyncReadExt, AsyncSeekExt, AsyncWriteExt};
use tracing::debug;

use super::UserId;

/// Parse trust list content, skipping lines that are not integers.
/// Duplicate entries collapse.
pub fn parse(content: &str) -> HashSet<UserId> {
    content
        .lines()
        .enumerate()
        .filter_map(|(index, line)| match line.trim().parse::<UserId>() {
            Ok(id) => Some(id),
            Err(_) => {
                if !line.trim().is_empty() {
                    debug!(line = index + 1, "Skipping malformed trust list entry");
                }
                None
            }
        })
        .collect()
}

/// Read the trust list. A missing file is an empty list.
pub async fn read(path: &Path) -> std::io::Result<HashSet<UserId>> {
    match tokio::fs::read_to_string(path).await {
        Ok(content) => Ok(parse(&content)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(HashSet::new()),
        Err(e) => Err(e),
    }
}

/// Append `"<id>\n"` and flush it to disk before returning.
///
/// A file left without a trailing newline (a torn earlier write) gets one
/// first, so the new id never merges into the previous line.
pub async fn append(path: &Path, id: UserId) -> std::io::Result<()> {
    let mut file = tokio::fs::OpenOptions::new()
        .read(true)
        .append(true)
        .create(true)
        .open(path)
        .await?;

    let mut entry = String::new();
    if file.metadata().await?.len() > 0 {
        let mut last = [0u8; 1];
        file.seek(SeekFrom::End(-1)).await?;
        file.read_exact(&mut last).await?;
        if last[0] != b'\n' {
            entry.push('\n');
        }
    }
    entry.push_str(&format!("{}\n", id));

    file.write_all(entry.as_bytes()).await?;
    file.sync_data().await?;
    Ok(())
}
