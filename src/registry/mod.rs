//! Named handler registry.
//!
//! Dynamic routes are plain Rust closures registered under a name. The
//! first path segment of a request that missed the static tree is looked
//! up here; on a hit the query string is bound against the handler's
//! declared parameters and the closure runs, returning a JSON value.

pub mod params;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::RegistryError;

pub use params::{bind_arguments, BoundArgs, ParamKind, ParamSpec, ParamValue};

/// What a handler returns: a JSON value on success, any error on failure.
/// Errors surface to the client as a 500 with the error text.
pub type HandlerResult = Result<serde_json::Value, Box<dyn std::error::Error + Send + Sync>>;

/// A registered handler closure.
pub type HandlerFn = Arc<dyn Fn(&BoundArgs) -> HandlerResult + Send + Sync>;

/// A handler together with its declared parameters.
#[derive(Clone)]
pub struct HandlerEntry {
    params: Vec<ParamSpec>,
    func: HandlerFn,
}

impl HandlerEntry {
    /// The parameters this handler declared, in declaration order.
    pub fn params(&self) -> &[ParamSpec] {
        &self.params
    }

    /// Run the handler against bound arguments.
    pub fn invoke(&self, args: &BoundArgs) -> HandlerResult {
        (self.func)(args)
    }
}

/// Name-keyed collection of handlers, fixed once the server starts.
#[derive(Clone, Default)]
pub struct HandlerRegistry {
    handlers: HashMap<String, HandlerEntry>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler under `name`.
    ///
    /// Lookup at request time is an exact, case-sensitive match on the
    /// first path segment.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateHandler`] when `name` is already
    /// taken and [`RegistryError::DuplicateParameter`] when two declared
    /// parameters share a name.
    pub fn register<F>(
        &mut self,
        name: &str,
        params: Vec<ParamSpec>,
        func: F,
    ) -> Result<(), RegistryError>
    where
        F: Fn(&BoundArgs) -> HandlerResult + Send + Sync + 'static,
    {
        if self.handlers.contains_key(name) {
            return Err(RegistryError::DuplicateHandler(name.to_string()));
        }

        for (i, spec) in params.iter().enumerate() {
            if params[..i].iter().any(|other| other.name == spec.name) {
                return Err(RegistryError::DuplicateParameter {
                    handler: name.to_string(),
                    parameter: spec.name.clone(),
                });
            }
        }

        self.handlers.insert(
            name.to_string(),
            HandlerEntry {
                params,
                func: Arc::new(func),
            },
        );
        Ok(())
    }

    /// Look up a handler by name.
    pub fn resolve(&self, name: &str) -> Option<&HandlerEntry> {
        self.handlers.get(name)
    }

    /// Registered handler names, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.handlers.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("handlers", &self.handlers.keys().collect::<Vec<_>>())
            .finish()
    }
}
