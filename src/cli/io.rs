//! JSON I/O handling for the CLI
//!
//! - `read`/`write`: one JSON document on stdin, one response line on stdout
//! - `serve`: one JSON envelope per stdin line, one response line each
//! - UTF-8 only

use serde_json::Value;
use tokio::io::{self, AsyncBufRead, AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use super::errors::{CliError, CliResult};

/// Read one JSON document; it may span several lines
pub async fn read_request<R: AsyncRead + Unpin>(reader: &mut R) -> CliResult<Value> {
    let mut input = String::new();
    reader.read_to_string(&mut input).await?;

    if input.trim().is_empty() {
        return Err(CliError::io_error("Empty input"));
    }

    Ok(serde_json::from_str(&input)?)
}

/// Next non-blank line, or `None` at end of input
pub async fn next_line<R: AsyncBufRead + Unpin>(reader: &mut R) -> CliResult<Option<String>> {
    let mut line = String::new();
    loop {
        line.clear();
        if reader.read_line(&mut line).await? == 0 {
            return Ok(None);
        }
        if !line.trim().is_empty() {
            return Ok(Some(line.trim_end().to_string()));
        }
    }
}

/// Write one response line and flush
pub async fn write_json<W: AsyncWrite + Unpin>(writer: &mut W, json: &str) -> CliResult<()> {
    writer.write_all(json.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await?;
    Ok(())
}

/// Process stdout
pub fn stdout() -> io::Stdout {
    io::stdout()
}

/// Process stdin, buffered
pub fn stdin() -> io::BufReader<io::Stdin> {
    io::BufReader::new(io::stdin())
}
