//! Newline-delimited JSON-RPC over stdin/stdout.

use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};

use crate::protocol::ProtocolHandler;
use crate::types::{JsonRpcMessage, McpError, McpResult, RequestId};

/// Longest accepted line, newline included.
pub const MAX_MESSAGE_BYTES: usize = 1024 * 1024;

/// Serves one client over a line-oriented byte stream.
pub struct StdioTransport {
    handler: ProtocolHandler,
}

impl StdioTransport {
    pub fn new(handler: ProtocolHandler) -> Self {
        Self { handler }
    }

    pub fn handler(&self) -> &ProtocolHandler {
        &self.handler
    }

    /// Serve stdin/stdout until stdin closes.
    pub async fn run(&self) -> McpResult<()> {
        tracing::info!("Serving MCP over stdio");
        self.serve(tokio::io::stdin(), tokio::io::stdout()).await
    }

    /// Serve `reader`/`writer` until `reader` reaches EOF.
    pub async fn serve<R, W>(&self, reader: R, mut writer: W) -> McpResult<()>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut reader = BufReader::new(reader);
        let mut raw = Vec::new();

        loop {
            raw.clear();
            let n = read_line_bounded(&mut reader, &mut raw).await?;
            if n == 0 {
                tracing::info!("Input closed, shutting down");
                return Ok(());
            }

            if n > MAX_MESSAGE_BYTES {
                tracing::warn!("Message too large: {n} bytes (limit {MAX_MESSAGE_BYTES})");
                let err = McpError::ParseError(format!(
                    "message exceeds {MAX_MESSAGE_BYTES} bytes"
                ));
                write_message(&mut writer, &reject(err, RequestId::Null)).await?;
                continue;
            }

            let line = match std::str::from_utf8(&raw) {
                Ok(s) => s.trim(),
                Err(e) => {
                    let err = McpError::ParseError(format!("invalid UTF-8: {e}"));
                    write_message(&mut writer, &reject(err, RequestId::Null)).await?;
                    continue;
                }
            };
            if line.is_empty() {
                continue;
            }

            if let Some(reply) = self.handle_line(line).await {
                write_message(&mut writer, &reply).await?;
            }
        }
    }

    /// Decode and handle one line, returning the reply to write, if any.
    pub async fn handle_line(&self, line: &str) -> Option<Value> {
        let value: Value = match serde_json::from_str(line) {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!("Parse error: {e}");
                return Some(reject(McpError::ParseError(e.to_string()), RequestId::Null));
            }
        };

        let has_id = value.get("id").is_some();
        let id = value
            .get("id")
            .and_then(|id| serde_json::from_value::<RequestId>(id.clone()).ok())
            .unwrap_or(RequestId::Null);

        match serde_json::from_value::<JsonRpcMessage>(value) {
            // An id that is not a string, integer or null keeps the message
            // from decoding as a request; it must not pass as a notification.
            Ok(JsonRpcMessage::Notification(_)) if has_id => {
                tracing::warn!("Request with unsupported id type");
                Some(reject(
                    McpError::InvalidRequest(
                        "id must be a string, an integer or null".to_string(),
                    ),
                    RequestId::Null,
                ))
            }
            Ok(message) => self.handler.handle_message(message).await,
            Err(e) => {
                tracing::warn!("Invalid JSON-RPC message: {e}");
                Some(reject(
                    McpError::InvalidRequest("not a JSON-RPC 2.0 message".to_string()),
                    id,
                ))
            }
        }
    }
}

/// Read one line into `buf`, keeping at most `MAX_MESSAGE_BYTES + 1` bytes.
///
/// Returns the full length of the line as read from `reader`, so callers
/// can detect oversized lines while the rest of the line is discarded.
async fn read_line_bounded<R>(reader: &mut R, buf: &mut Vec<u8>) -> std::io::Result<usize>
where
    R: AsyncBufRead + Unpin,
{
    let mut total = 0;
    loop {
        let available = reader.fill_buf().await?;
        if available.is_empty() {
            return Ok(total);
        }

        let (chunk, done) = match available.iter().position(|&b| b == b'\n') {
            Some(i) => (&available[..=i], true),
            None => (available, false),
        };
        let len = chunk.len();
        let room = (MAX_MESSAGE_BYTES + 1).saturating_sub(buf.len());
        buf.extend_from_slice(&chunk[..len.min(room)]);
        reader.consume(len);
        total += len;

        if done {
            return Ok(total);
        }
    }
}

fn reject(err: McpError, id: RequestId) -> Value {
    serde_json::to_value(err.to_json_rpc_error(id)).unwrap_or(Value::Null)
}

async fn write_message<W: AsyncWrite + Unpin>(writer: &mut W, message: &Value) -> McpResult<()> {
    let out = serde_json::to_string(message)?;
    writer.write_all(out.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await?;
    Ok(())
}
