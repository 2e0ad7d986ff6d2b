

use futures::stream::{Stream, StreamExt};

use super::base::LlmProviderError;

/// Re-chunks an HTTP body into complete, non-blank lines.
///
/// Bytes are buffered until a newline arrives so multi-byte UTF-8 characters
/// split across network chunks decode intact.
pub(crate) fn stream_lines(
    byte_stream: impl Stream<Item = reqwest::Result<bytes::Bytes>> + Send + 'static,
) -> impl Stream<Item = Result<String, LlmProviderError>> + Send {
    futures::stream::unfold(
        (Box::pin(byte_stream), Vec::<u8>::new(), false),
        |(mut stream, mut buffer, mut exhausted)| async move {
            loop {
                if let Some(newline_pos) = buffer.iter().position(|&b| b == b'\n') {
                    let line: Vec<u8> = buffer.drain(..=newline_pos).collect();
                    let line = String::from_utf8_lossy(&line).trim().to_string();
                    if !line.is_empty() {
                        return Some((Ok(line), (stream, buffer, exhausted)));
                    }
                    continue;
                }

                if exhausted {
                    return None;
                }

                match stream.next().await {
                    Some(Ok(bytes)) => buffer.extend_from_slice(&bytes),
                    Some(Err(e)) => {
                        return Some((
                            Err(LlmProviderError::Stream(e.to_string())),
                            (stream, buffer, exhausted),
                        ));
                    }
                    None => {
                        exhausted = true;
                        let remaining = String::from_utf8_lossy(&buffer).trim().to_string();
                        buffer.clear();
                        if !remaining.is_empty() {
                            return Some((Ok(remaining), (stream, buffer, exhausted)));
                        }
                        return None;
                    }
                }
            }
        },
    )
}
