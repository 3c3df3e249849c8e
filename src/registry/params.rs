//! Handler parameter declarations and query-string binding.
//!
//! Each handler declares an ordered list of [`ParamSpec`]s. Before a
//! handler runs, the router binds the request's query parameters against
//! that list: declared names found in the query are coerced to the declared
//! kind, declared names absent from the query bind as
//! [`ParamValue::Missing`], and query keys nobody declared are ignored.

use std::collections::HashMap;

use crate::error::{ArgumentError, BindError};

/// The kind a declared parameter coerces to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// Base-10 signed integer. A query value that fails to parse rejects
    /// the whole request before the handler runs.
    Integer,
    /// Raw decoded query value, passed through unchanged.
    Text,
}

/// A single declared parameter of a handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamSpec {
    pub name: String,
    pub kind: ParamKind,
}

impl ParamSpec {
    /// Declare an integer parameter.
    pub fn integer(name: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: ParamKind::Integer,
        }
    }

    /// Declare a text parameter.
    pub fn text(name: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: ParamKind::Text,
        }
    }
}

/// A bound argument value as seen by a handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Integer(i64),
    Text(String),
    /// Declared but absent from the query. Handlers either substitute a
    /// default via the `*_or` accessors or fail with
    /// [`ArgumentError::Missing`].
    Missing,
}

/// The arguments bound for one handler invocation, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct BoundArgs {
    values: Vec<(String, ParamValue)>,
}

impl BoundArgs {
    /// Look up a bound value by parameter name.
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values
            .iter()
            .find(|(param, _)| param == name)
            .map(|(_, value)| value)
    }

    /// Fetch a required integer argument.
    pub fn integer(&self, name: &str) -> Result<i64, ArgumentError> {
        match self.get(name) {
            Some(ParamValue::Integer(value)) => Ok(*value),
            Some(ParamValue::Missing) => Err(ArgumentError::Missing(name.to_string())),
            Some(ParamValue::Text(_)) => Err(ArgumentError::WrongKind {
                parameter: name.to_string(),
                expected: "integer",
            }),
            None => Err(ArgumentError::Unknown(name.to_string())),
        }
    }

    /// Fetch an integer argument, substituting `default` when the query
    /// left it unset.
    pub fn integer_or(&self, name: &str, default: i64) -> Result<i64, ArgumentError> {
        match self.get(name) {
            Some(ParamValue::Missing) => Ok(default),
            _ => self.integer(name),
        }
    }

    /// Fetch a required text argument.
    pub fn text(&self, name: &str) -> Result<&str, ArgumentError> {
        match self.get(name) {
            Some(ParamValue::Text(value)) => Ok(value),
            Some(ParamValue::Missing) => Err(ArgumentError::Missing(name.to_string())),
            Some(ParamValue::Integer(_)) => Err(ArgumentError::WrongKind {
                parameter: name.to_string(),
                expected: "text",
            }),
            None => Err(ArgumentError::Unknown(name.to_string())),
        }
    }

    /// Fetch a text argument, substituting `default` when the query left
    /// it unset.
    pub fn text_or<'a>(&'a self, name: &str, default: &'a str) -> Result<&'a str, ArgumentError> {
        match self.get(name) {
            Some(ParamValue::Missing) => Ok(default),
            _ => self.text(name),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Bind decoded query parameters against a handler's declared specs.
///
/// # Errors
///
/// Returns [`BindError::InvalidInteger`] when a value declared as
/// [`ParamKind::Integer`] is present but does not parse.
pub fn bind_arguments(
    specs: &[ParamSpec],
    query: &HashMap<String, String>,
) -> Result<BoundArgs, BindError> {
    let mut values = Vec::with_capacity(specs.len());

    for spec in specs {
        let value = match query.get(&spec.name) {
            None => ParamValue::Missing,
            Some(raw) => match spec.kind {
                ParamKind::Text => ParamValue::Text(raw.clone()),
                ParamKind::Integer => {
                    let parsed =
                        raw.parse::<i64>()
                            .map_err(|_| BindError::InvalidInteger {
                                parameter: spec.name.clone(),
                                value: raw.clone(),
                            })?;
                    ParamValue::Integer(parsed)
                }
            },
        };
        values.push((spec.name.clone(), value));
    }

    Ok(BoundArgs { values })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_bind_integer_and_text() {
        let specs = [ParamSpec::integer("a"), ParamSpec::text("name")];
        let args = bind_arguments(&specs, &query(&[("a", "42"), ("name", "ada")])).unwrap();

        assert_eq!(args.integer("a"), Ok(42));
        assert_eq!(args.text("name"), Ok("ada"));
        assert_eq!(args.len(), 2);
    }

    #[test]
    fn test_bind_negative_integer() {
        let specs = [ParamSpec::integer("delta")];
        let args = bind_arguments(&specs, &query(&[("delta", "-7")])).unwrap();
        assert_eq!(args.integer("delta"), Ok(-7));
    }

    #[test]
    fn test_bind_invalid_integer_rejects() {
        let specs = [ParamSpec::integer("a")];
        let err = bind_arguments(&specs, &query(&[("a", "forty")])).unwrap_err();
        assert_eq!(
            err,
            BindError::InvalidInteger {
                parameter: "a".to_string(),
                value: "forty".to_string(),
            }
        );
    }

    #[test]
    fn test_absent_param_binds_missing() {
        let specs = [ParamSpec::integer("a"), ParamSpec::text("name")];
        let args = bind_arguments(&specs, &query(&[])).unwrap();

        assert_eq!(args.get("a"), Some(&ParamValue::Missing));
        assert_eq!(args.integer("a"), Err(ArgumentError::Missing("a".to_string())));
        assert_eq!(args.integer_or("a", 10), Ok(10));
        assert_eq!(args.text_or("name", "guest"), Ok("guest"));
    }

    #[test]
    fn test_extra_query_params_ignored() {
        let specs = [ParamSpec::text("name")];
        let args = bind_arguments(&specs, &query(&[("name", "ada"), ("debug", "1")])).unwrap();

        assert_eq!(args.len(), 1);
        assert_eq!(args.get("debug"), None);
    }

    #[test]
    fn test_wrong_kind_accessor() {
        let specs = [ParamSpec::text("name")];
        let args = bind_arguments(&specs, &query(&[("name", "ada")])).unwrap();

        assert_eq!(
            args.integer("name"),
            Err(ArgumentError::WrongKind {
                parameter: "name".to_string(),
                expected: "integer",
            })
        );
    }

    #[test]
    fn test_undeclared_accessor_is_unknown() {
        let args = bind_arguments(&[], &query(&[])).unwrap();
        assert!(args.is_empty());
        assert_eq!(
            args.text("nope"),
            Err(ArgumentError::Unknown("nope".to_string()))
        );
    }
}
