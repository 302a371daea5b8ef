use bytes::{BufMut, Bytes, BytesMut};
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::http::response::Response;

const HTTP_VERSION: &str = "HTTP/1.1";

/// Serializes a response into its exact wire bytes.
///
/// Header order is fixed: Content-Type, Content-Encoding, Content-Length.
/// They are written only for responses that carry both a content type and a
/// body; everything else is a bare status line followed by the blank line.
pub fn serialize_response(resp: &Response) -> Bytes {
    let mut buf = BytesMut::with_capacity(128);

    // Status line
    buf.put_slice(format!("{} {}\r\n", HTTP_VERSION, resp.status).as_bytes());

    if let Some((content_type, body)) = resp.payload() {
        put_header(&mut buf, "Content-Type", content_type);
        if let Some(encoding) = &resp.content_encoding {
            put_header(&mut buf, "Content-Encoding", encoding);
        }
        put_header(&mut buf, "Content-Length", &body.len().to_string());

        buf.put_slice(b"\r\n");
        buf.put_slice(body);
    } else {
        buf.put_slice(b"\r\n");
    }

    buf.freeze()
}

fn put_header(buf: &mut BytesMut, name: &str, value: &str) {
    buf.put_slice(name.as_bytes());
    buf.put_slice(b": ");
    buf.put_slice(value.as_bytes());
    buf.put_slice(b"\r\n");
}

pub struct ResponseWriter {
    buffer: Bytes,
    written: usize,
}

impl ResponseWriter {
    pub fn new(response: &Response) -> Self {
        Self {
            buffer: serialize_response(response),
            written: 0,
        }
    }

    pub async fn write_to_stream<W>(&mut self, stream: &mut W) -> anyhow::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        while self.written < self.buffer.len() {
            let n = stream.write(&self.buffer[self.written..]).await?;

            if n == 0 {
                return Err(anyhow::anyhow!("connection closed while writing"));
            }

            self.written += n;
        }

        stream.flush().await?;
        Ok(())
    }
}
