//! HTTP helpers: MIME table, query-string parsing, streaming bodies and
//! response builders.

pub mod body;
pub mod mime;
pub mod query;
pub mod response;

pub use body::ResponseBody;
