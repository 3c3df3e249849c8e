//! Embeddable HTTP server with a dual-mode router.
//!
//! Requests resolve against a static file tree first, with MIME typing
//! and index-file fallback, then against named handlers registered by
//! the embedding application. A handler is picked by the first path
//! segment, fed its declared parameters from the query string, and its
//! JSON result becomes the response body. A request that misses both is
//! a 404.
//!
//! ```no_run
//! use embedhttp::{Config, HandlerRegistry, ParamSpec, Server};
//! use serde_json::json;
//!
//! # async fn start() -> std::io::Result<()> {
//! let mut registry = HandlerRegistry::new();
//! registry
//!     .register(
//!         "add",
//!         vec![ParamSpec::integer("a"), ParamSpec::integer("b")],
//!         |args| Ok(json!(args.integer("a")? + args.integer("b")?)),
//!     )
//!     .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
//!
//! let config = Config::load().map_err(std::io::Error::other)?;
//! let handle = Server::bind(config, registry)?.spawn();
//! // ... later: handle.stop().await releases the port
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod handler;
pub mod http;
pub mod logger;
pub mod registry;
pub mod server;

/// Re-exports of common components for easier access
pub use config::{AppState, Config};
pub use error::{ArgumentError, BindError, RegistryError};
pub use registry::{BoundArgs, HandlerRegistry, HandlerResult, ParamKind, ParamSpec, ParamValue};
pub use server::{Server, ServerHandle};
