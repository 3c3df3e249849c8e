//! HTTP response building module
//!
//! Builders for the response shapes the router emits, decoupled from routing
//! logic. File and JSON payloads stream through [`super::body`] in
//! fixed-size chunks.

use chrono::{DateTime, Utc};
use hyper::body::Bytes;
use hyper::Response;
use std::time::SystemTime;
use tokio::fs::File;

use super::body::{self, ResponseBody};
use crate::logger;

/// Build 404 Not Found response. The body is deliberately empty: a double
/// miss (no file, no handler) carries no payload.
pub fn build_404_response() -> Response<ResponseBody> {
    Response::builder()
        .status(404)
        .body(body::empty())
        .unwrap_or_else(|e| {
            log_build_error("404", &e);
            Response::new(body::empty())
        })
}

/// Build 405 Method Not Allowed response.
pub fn build_405_response() -> Response<ResponseBody> {
    const MESSAGE: &str = "405 Method Not Allowed";
    Response::builder()
        .status(405)
        .header("Content-Type", "text/plain")
        .header("Content-Length", MESSAGE.len())
        .header("Allow", "GET, HEAD, OPTIONS")
        .body(text_body(MESSAGE))
        .unwrap_or_else(|e| {
            log_build_error("405", &e);
            Response::new(body::empty())
        })
}

/// Build OPTIONS response (preflight request).
pub fn build_options_response() -> Response<ResponseBody> {
    Response::builder()
        .status(204)
        .header("Allow", "GET, HEAD, OPTIONS")
        .body(body::empty())
        .unwrap_or_else(|e| {
            log_build_error("OPTIONS", &e);
            Response::new(body::empty())
        })
}

/// Build a JSON response from a handler result, streamed in fixed-size
/// chunks.
pub fn build_json_response(value: &serde_json::Value, chunk_size: usize) -> Response<ResponseBody> {
    let payload = match serde_json::to_vec(value) {
        Ok(p) => p,
        Err(e) => {
            logger::log_error(&format!("Failed to serialize handler result: {e}"));
            return build_error_response(500, "serialization failed");
        }
    };

    let content_length = payload.len();
    Response::builder()
        .status(200)
        .header("Content-Type", "application/json")
        .header("Content-Length", content_length)
        .body(body::chunked(Bytes::from(payload), chunk_size))
        .unwrap_or_else(|e| {
            log_build_error("JSON", &e);
            Response::new(body::empty())
        })
}

/// Build an error response with a small JSON body, e.g.
/// `{"error":"parameter 'a' expects an integer, got 'x'"}`.
pub fn build_error_response(status: u16, message: &str) -> Response<ResponseBody> {
    let payload = serde_json::json!({ "error": message }).to_string();
    let data = Bytes::from(payload);
    let chunk = data.len().max(1);

    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .header("Content-Length", data.len())
        .body(body::chunked(data, chunk))
        .unwrap_or_else(|e| {
            log_build_error("error", &e);
            Response::new(body::empty())
        })
}

/// Build a 200 response streaming an open file.
///
/// Carries the headers a static hit promises: `Content-Type` from the MIME
/// table, `Content-Length` from metadata, `Date`, `Last-Modified`. HEAD
/// requests get the same headers with an empty body.
pub fn build_file_response(
    file: File,
    size: u64,
    modified: SystemTime,
    content_type: &str,
    chunk_size: usize,
    is_head: bool,
) -> Response<ResponseBody> {
    let file_body = if is_head {
        body::empty()
    } else {
        body::file_stream(file, chunk_size)
    };

    Response::builder()
        .status(200)
        .header("Content-Type", content_type)
        .header("Content-Length", size)
        .header("Date", http_date(SystemTime::now()))
        .header("Last-Modified", http_date(modified))
        .body(file_body)
        .unwrap_or_else(|e| {
            log_build_error("200", &e);
            Response::new(body::empty())
        })
}

/// Format a timestamp as an RFC 1123 HTTP date, e.g.
/// `Tue, 25 Aug 2026 08:15:00 GMT`.
pub fn http_date(time: SystemTime) -> String {
    let datetime: DateTime<Utc> = time.into();
    datetime.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

fn text_body(text: &'static str) -> ResponseBody {
    let data = Bytes::from_static(text.as_bytes());
    let chunk = data.len().max(1);
    body::chunked(data, chunk)
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    logger::log_error(&format!("Failed to build {status} response: {error}"));
}
