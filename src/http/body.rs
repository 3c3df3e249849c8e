//! Response body construction module
//!
//! All responses share one boxed body type so that in-memory payloads and
//! streamed files can travel through the same router. Payloads are emitted
//! in fixed-size frames rather than one allocation; the frame size comes
//! from the configured stream buffer.

use std::io;

use futures::stream;
use http_body_util::combinators::BoxBody;
use http_body_util::{BodyExt, Empty, StreamBody};
use hyper::body::{Bytes, Frame};
use tokio::fs::File;
use tokio::io::AsyncReadExt;

use crate::logger;

/// Body type shared by every response the server produces.
pub type ResponseBody = BoxBody<Bytes, io::Error>;

/// Empty body (404s, HEAD responses).
pub fn empty() -> ResponseBody {
    Empty::<Bytes>::new().map_err(|never| match never {}).boxed()
}

/// Split an in-memory payload into fixed-size data frames.
///
/// Slicing `Bytes` is cheap; no payload copy is made.
pub fn chunked(data: Bytes, chunk_size: usize) -> ResponseBody {
    let chunk_size = chunk_size.max(1);
    let frames: Vec<Result<Frame<Bytes>, io::Error>> = (0..data.len())
        .step_by(chunk_size)
        .map(|start| {
            let end = usize::min(start + chunk_size, data.len());
            Ok(Frame::data(data.slice(start..end)))
        })
        .collect();
    StreamBody::new(stream::iter(frames)).boxed()
}

/// Stream an open file in fixed-size chunks.
///
/// A read failure mid-stream is logged and ends the body with an error;
/// hyper aborts the response without touching the accept loop.
pub fn file_stream(file: File, chunk_size: usize) -> ResponseBody {
    let chunk_size = chunk_size.max(1);
    let frames = stream::unfold(Some(file), move |slot| async move {
        let mut file = slot?;
        let mut buf = vec![0u8; chunk_size];
        match file.read(&mut buf).await {
            Ok(0) => None,
            Ok(n) => {
                buf.truncate(n);
                Some((Ok(Frame::data(Bytes::from(buf))), Some(file)))
            }
            Err(e) => {
                logger::log_error(&format!("Read failed while streaming file: {e}"));
                Some((Err(e), None))
            }
        }
    });
    StreamBody::new(frames).boxed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    async fn frame_sizes(mut body: ResponseBody) -> Vec<usize> {
        let mut sizes = Vec::new();
        while let Some(frame) = body.frame().await {
            if let Ok(data) = frame.expect("body error").into_data() {
                sizes.push(data.len());
            }
        }
        sizes
    }

    #[tokio::test]
    async fn test_empty_body() {
        let collected = empty().collect().await.unwrap().to_bytes();
        assert!(collected.is_empty());
    }

    #[tokio::test]
    async fn test_chunked_frame_sizes() {
        let body = chunked(Bytes::from(vec![7u8; 10]), 4);
        assert_eq!(frame_sizes(body).await, vec![4, 4, 2]);
    }

    #[tokio::test]
    async fn test_chunked_roundtrip() {
        let data = Bytes::from_static(b"the quick brown fox");
        let collected = chunked(data.clone(), 3).collect().await.unwrap().to_bytes();
        assert_eq!(collected, data);
    }

    #[tokio::test]
    async fn test_chunked_zero_size_clamped() {
        let body = chunked(Bytes::from_static(b"ab"), 0);
        assert_eq!(frame_sizes(body).await, vec![1, 1]);
    }

    #[tokio::test]
    async fn test_file_stream_chunks() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("payload.bin");
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(&[1u8; 20]).unwrap();
        drop(f);

        let file = File::open(&path).await.unwrap();
        assert_eq!(frame_sizes(file_stream(file, 8)).await, vec![8, 8, 4]);

        let file = File::open(&path).await.unwrap();
        let collected = file_stream(file, 8).collect().await.unwrap().to_bytes();
        assert_eq!(collected.as_ref(), &[1u8; 20]);
    }
}
