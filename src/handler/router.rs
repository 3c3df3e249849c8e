//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: method validation, static file
//! resolution, then name-keyed handler dispatch. A request that misses
//! both gets an empty 404.

use std::collections::HashMap;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Instant;

use hyper::{Method, Request, Response};

use crate::config::AppState;
use crate::handler::static_files;
use crate::http::{body, query, response, ResponseBody};
use crate::logger::{self, AccessLogEntry};
use crate::registry::{bind_arguments, HandlerEntry};

/// Request context encapsulating information needed for request processing
pub struct RequestContext<'a> {
    pub path: &'a str,
    pub query: HashMap<String, String>,
    pub is_head: bool,
}

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<ResponseBody>, Infallible> {
    let started = Instant::now();
    let method = req.method().clone();
    let uri = req.uri().clone();

    let response = if let Some(resp) = check_http_method(&method) {
        resp
    } else {
        let ctx = RequestContext {
            path: uri.path(),
            query: query::parse_query(uri.query()),
            is_head: method == Method::HEAD,
        };
        route_request(&ctx, &state).await
    };

    if state.config.logging.access_log {
        let mut entry = AccessLogEntry::new(
            peer_addr.ip().to_string(),
            method.to_string(),
            uri.path().to_string(),
        );
        entry.query = uri.query().map(ToString::to_string);
        entry.status = response.status().as_u16();
        entry.body_bytes = content_length_of(&response);
        entry.request_time_us =
            u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Check HTTP method and return appropriate response for non-GET/HEAD methods
fn check_http_method(method: &Method) -> Option<Response<ResponseBody>> {
    if *method == Method::GET || *method == Method::HEAD {
        None
    } else if *method == Method::OPTIONS {
        Some(response::build_options_response())
    } else {
        logger::log_warning(&format!("Method not allowed: {method}"));
        Some(response::build_405_response())
    }
}

/// Route request: the static file tree is consulted first, then the
/// handler registry keyed by the first path segment.
async fn route_request(ctx: &RequestContext<'_>, state: &Arc<AppState>) -> Response<ResponseBody> {
    let chunk_size = state.config.files.chunk_size();

    // 1. Static file tree
    if let Some(path) = static_files::resolve_file(&state.config.files.root_dir, ctx.path) {
        return static_files::serve_resolved(&path, chunk_size, ctx.is_head).await;
    }

    // 2. Named handler
    if let Some(name) = first_segment(ctx.path) {
        if let Some(entry) = state.registry.resolve(name) {
            return invoke_handler(name, entry, ctx, chunk_size);
        }
    }

    // 3. Double miss
    response::build_404_response()
}

/// First non-empty path segment, e.g. "/add/extra" names handler "add"
fn first_segment(path: &str) -> Option<&str> {
    path.split('/').find(|segment| !segment.is_empty())
}

/// Bind the query onto a handler's declared parameters and run it,
/// shielding the connection from handler panics.
fn invoke_handler(
    name: &str,
    entry: &HandlerEntry,
    ctx: &RequestContext<'_>,
    chunk_size: usize,
) -> Response<ResponseBody> {
    let mut resp = match bind_arguments(entry.params(), &ctx.query) {
        Ok(args) => match panic::catch_unwind(AssertUnwindSafe(|| entry.invoke(&args))) {
            Ok(Ok(serde_json::Value::Null)) => {
                // Void handlers acknowledge with a fixed success envelope
                response::build_json_response(&serde_json::json!({"msg": "Success"}), chunk_size)
            }
            Ok(Ok(value)) => response::build_json_response(&value, chunk_size),
            Ok(Err(e)) => {
                logger::log_error(&format!("Handler '{name}' failed: {e}"));
                response::build_error_response(500, &e.to_string())
            }
            Err(_) => {
                logger::log_error(&format!("Handler '{name}' panicked"));
                response::build_error_response(500, "handler panicked")
            }
        },
        Err(e) => {
            logger::log_warning(&format!("Rejected call to '{name}': {e}"));
            response::build_error_response(400, &e.to_string())
        }
    };

    if ctx.is_head {
        *resp.body_mut() = body::empty();
    }
    resp
}

/// Body size as promised by the Content-Length header, 0 when absent
fn content_length_of(response: &Response<ResponseBody>) -> u64 {
    response
        .headers()
        .get("Content-Length")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::registry::{HandlerRegistry, ParamSpec};
    use http_body_util::BodyExt;
    use serde_json::json;

    fn state_with(root: &str, registry: HandlerRegistry) -> Arc<AppState> {
        let mut config = Config::default();
        config.files.root_dir = root.to_string();
        config.logging.access_log = false;
        Arc::new(AppState::new(config, registry))
    }

    fn ctx(path: &'static str, raw_query: Option<&str>) -> RequestContext<'static> {
        RequestContext {
            path,
            query: query::parse_query(raw_query),
            is_head: false,
        }
    }

    async fn body_json(resp: Response<ResponseBody>) -> serde_json::Value {
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn sample_registry() -> HandlerRegistry {
        let mut registry = HandlerRegistry::new();
        registry
            .register(
                "add",
                vec![ParamSpec::integer("a"), ParamSpec::integer("b")],
                |args| Ok(json!(args.integer("a")? + args.integer("b")?)),
            )
            .unwrap();
        registry
            .register("ping", Vec::new(), |_| Ok(json!(null)))
            .unwrap();
        registry
            .register("boom", Vec::new(), |_| panic!("blown up"))
            .unwrap();
        registry
    }

    #[test]
    fn test_first_segment() {
        assert_eq!(first_segment("/add"), Some("add"));
        assert_eq!(first_segment("/add/extra"), Some("add"));
        assert_eq!(first_segment("/"), None);
        assert_eq!(first_segment(""), None);
    }

    #[tokio::test]
    async fn test_handler_hit_returns_json() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_with(dir.path().to_str().unwrap(), sample_registry());

        let resp = route_request(&ctx("/add", Some("a=2&b=3")), &state).await;
        assert_eq!(resp.status(), 200);
        assert_eq!(
            resp.headers().get("Content-Type").unwrap(),
            "application/json"
        );
        assert_eq!(body_json(resp).await, json!(5));
    }

    #[tokio::test]
    async fn test_null_result_becomes_success_envelope() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_with(dir.path().to_str().unwrap(), sample_registry());

        let resp = route_request(&ctx("/ping", None), &state).await;
        assert_eq!(resp.status(), 200);
        assert_eq!(body_json(resp).await, json!({"msg": "Success"}));
    }

    #[tokio::test]
    async fn test_invalid_integer_is_400() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_with(dir.path().to_str().unwrap(), sample_registry());

        let resp = route_request(&ctx("/add", Some("a=two&b=3")), &state).await;
        assert_eq!(resp.status(), 400);
        let body = body_json(resp).await;
        assert!(body["error"].as_str().unwrap().contains("'a'"));
    }

    #[tokio::test]
    async fn test_missing_required_argument_is_500() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_with(dir.path().to_str().unwrap(), sample_registry());

        let resp = route_request(&ctx("/add", Some("a=2")), &state).await;
        assert_eq!(resp.status(), 500);
        let body = body_json(resp).await;
        assert!(body["error"].as_str().unwrap().contains("'b'"));
    }

    #[tokio::test]
    async fn test_handler_panic_is_500() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_with(dir.path().to_str().unwrap(), sample_registry());

        let resp = route_request(&ctx("/boom", None), &state).await;
        assert_eq!(resp.status(), 500);
    }

    #[tokio::test]
    async fn test_double_miss_is_empty_404() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_with(dir.path().to_str().unwrap(), sample_registry());

        let resp = route_request(&ctx("/nothing", None), &state).await;
        assert_eq!(resp.status(), 404);
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        assert!(bytes.is_empty());
    }

    #[tokio::test]
    async fn test_static_file_wins_over_handler() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("ping"), "a file named ping").unwrap();
        let state = state_with(dir.path().to_str().unwrap(), sample_registry());

        let resp = route_request(&ctx("/ping", None), &state).await;
        assert_eq!(resp.status(), 200);
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&bytes[..], b"a file named ping");
    }

    #[tokio::test]
    async fn test_head_strips_handler_body() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_with(dir.path().to_str().unwrap(), sample_registry());

        let mut head_ctx = ctx("/add", Some("a=1&b=1"));
        head_ctx.is_head = true;
        let resp = route_request(&head_ctx, &state).await;

        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers().get("Content-Length").unwrap(), "1");
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        assert!(bytes.is_empty());
    }
}
