use crate::http::request::{HEADER_CONTENT_LENGTH, Method, Request};
use bytes::Bytes;
use std::collections::HashMap;
use std::io;
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt};

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("error reading request line: {0}")]
    RequestLineRead(#[source] io::Error),
    #[error("invalid request line: {0:?}")]
    MalformedRequestLine(String),
    #[error("error reading headers: {0}")]
    HeaderRead(#[source] io::Error),
    #[error("invalid Content-Length: {0:?}")]
    InvalidContentLength(String),
    #[error("incomplete body: expected {expected} bytes, received {received}")]
    IncompleteBody { expected: usize, received: usize },
    #[error("error reading request body: {0}")]
    BodyRead(#[source] io::Error),
}

/// Reads a single HTTP/1.1 request off `reader`.
///
/// The head is read line by line and the body is framed only by
/// Content-Length; nothing past the declared body length is consumed.
pub async fn parse_http_request<R>(reader: &mut R) -> Result<Request, ParseError>
where
    R: AsyncBufRead + Unpin,
{
    let request_line = read_line(reader)
        .await
        .map_err(ParseError::RequestLineRead)?;

    // Path bytes are never substituted: a non-UTF-8 request line is rejected
    let request_line = String::from_utf8(request_line).map_err(|e| {
        ParseError::MalformedRequestLine(String::from_utf8_lossy(e.as_bytes()).into_owned())
    })?;

    let (method, path, version) = parse_request_line(&request_line)?;
    let headers = parse_headers(reader).await?;
    let body = parse_body(reader, &headers).await?;

    Ok(Request {
        method,
        path,
        version,
        headers,
        body,
    })
}

fn parse_request_line(line: &str) -> Result<(Method, String, String), ParseError> {
    let mut parts = line.trim().split(' ');

    let (Some(method), Some(path)) = (parts.next(), parts.next()) else {
        return Err(ParseError::MalformedRequestLine(line.to_string()));
    };
    let version = parts.next().unwrap_or_default();

    Ok((Method::from(method), path.to_string(), version.to_string()))
}

async fn parse_headers<R>(reader: &mut R) -> Result<HashMap<String, String>, ParseError>
where
    R: AsyncBufRead + Unpin,
{
    let mut headers = HashMap::new();

    loop {
        let line = read_line(reader).await.map_err(ParseError::HeaderRead)?;
        let line = String::from_utf8(line).map_err(|_| {
            ParseError::HeaderRead(io::Error::new(
                io::ErrorKind::InvalidData,
                "header line is not valid UTF-8",
            ))
        })?;
        let line = line.trim();

        // Empty line ends the head
        if line.is_empty() {
            break;
        }

        // Lenient: lines without a usable name are skipped, not rejected
        let Some((name, value)) = line.split_once(':') else {
            continue;
        };
        let name = name.trim();
        if name.is_empty() {
            continue;
        }

        headers.insert(name.to_ascii_lowercase(), value.trim().to_string());
    }

    Ok(headers)
}

async fn parse_body<R>(
    reader: &mut R,
    headers: &HashMap<String, String>,
) -> Result<Bytes, ParseError>
where
    R: AsyncBufRead + Unpin,
{
    let Some(raw) = headers.get(HEADER_CONTENT_LENGTH) else {
        return Ok(Bytes::new());
    };

    let declared = raw
        .parse::<i64>()
        .map_err(|_| ParseError::InvalidContentLength(raw.clone()))?;

    // Zero or negative lengths mean no body
    if declared <= 0 {
        return Ok(Bytes::new());
    }
    let content_length = usize::try_from(declared)
        .map_err(|_| ParseError::InvalidContentLength(raw.clone()))?;

    // Bounded by the declared length; the buffer grows with what actually arrives
    let mut body = Vec::new();
    reader
        .take(content_length as u64)
        .read_to_end(&mut body)
        .await
        .map_err(ParseError::BodyRead)?;

    if body.len() < content_length {
        return Err(ParseError::IncompleteBody {
            expected: content_length,
            received: body.len(),
        });
    }

    Ok(Bytes::from(body))
}

/// Reads up to and including the next LF. Hitting EOF before a full line is
/// an error, as is a connection that closes without sending anything.
async fn read_line<R>(reader: &mut R) -> io::Result<Vec<u8>>
where
    R: AsyncBufRead + Unpin,
{
    let mut buf = Vec::new();
    reader.read_until(b'\n', &mut buf).await?;

    if buf.last() != Some(&b'\n') {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "connection closed mid-line",
        ));
    }

    Ok(buf)
}
