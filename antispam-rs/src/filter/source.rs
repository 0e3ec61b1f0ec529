//! Message sources feeding the filter

use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::warn;

use super::types::InboundMessage;
use crate::error::Result;
use crate::trust::UserId;

/// Supplier of inbound messages
#[async_trait::async_trait]
pub trait MessageSource: Send {
    /// Next message, or `None` once the source is exhausted.
    ///
    /// Must be cancel safe: the filter polls it inside `select!`.
    async fn next_message(&mut self) -> Result<Option<InboundMessage>>;
}

/// Reads `"<user_id> <text>"` lines.
///
/// Blank lines and lines without a numeric id are skipped. A line holding
/// only an id is a message without text.
pub struct LineSource<R> {
    lines: Lines<R>,
    sequence: u64,
}

impl<R: AsyncBufRead + Unpin> LineSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            sequence: 0,
        }
    }
}

impl LineSource<BufReader<Stdin>> {
    pub fn stdin() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()))
    }
}

#[async_trait::async_trait]
impl<R> MessageSource for LineSource<R>
where
    R: AsyncBufRead + Unpin + Send,
{
    async fn next_message(&mut self) -> Result<Option<InboundMessage>> {
        while let Some(line) = self.lines.next_line().await? {
            self.sequence += 1;
            if let Some(message) = parse_line(&line, self.sequence) {
                return Ok(Some(message));
            }
        }
        Ok(None)
    }
}

fn parse_line(line: &str, sequence: u64) -> Option<InboundMessage> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let (id, text) = match line.split_once(char::is_whitespace) {
        Some((id, text)) => (id, Some(text.trim().to_string())),
        None => (line, None),
    };

    let user_id = match id.parse::<UserId>() {
        Ok(user_id) => user_id,
        Err(_) => {
            warn!(sequence, "Skipping input line without a numeric sender id");
            return None;
        }
    };

    Some(InboundMessage {
        user_id,
        text,
        has_media: false,
        sequence,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_line_source_parses_messages() {
        let input: &[u8] = b"42 hello there\n\nnope skipped\n7\n-3   spaced  out \n";
        let mut source = LineSource::new(input);

        let first = source.next_message().await.unwrap().unwrap();
        assert_eq!(first.user_id, 42);
        assert_eq!(first.text.as_deref(), Some("hello there"));
        assert_eq!(first.sequence, 1);

        let second = source.next_message().await.unwrap().unwrap();
        assert_eq!(second.user_id, 7);
        assert_eq!(second.text, None);
        assert_eq!(second.sequence, 4);

        let third = source.next_message().await.unwrap().unwrap();
        assert_eq!(third.user_id, -3);
        assert_eq!(third.text.as_deref(), Some("spaced  out"));

        assert!(source.next_message().await.unwrap().is_none());
    }

    #[test]
    fn test_parse_line_rejects_bad_id() {
        assert!(parse_line("abc hello", 1).is_none());
        assert!(parse_line("   ", 1).is_none());
    }
}
