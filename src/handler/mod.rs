//! Request handling module
//!
//! Routing entry point plus the two dispatch targets: the static file
//! tree and the named handler registry.

pub mod router;
pub mod static_files;

pub use router::handle_request;
