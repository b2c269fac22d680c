//! Errors produced while parsing declarations and building registries.

use std::error::Error as StdError;

/// Errors returned when parsing a single declaration or parameter list.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The input exceeds the configured length limit.
    #[error("input is {len} bytes long, the limit is {max} bytes")]
    InputTooLong { len: usize, max: usize },
    /// No function declaration was found in the input.
    #[error("no function declaration found in {0:?}")]
    NoMatch(String),
    /// More than one function declaration was found in the input.
    #[error("found {count} function declarations in {input:?}, expected exactly one")]
    AmbiguousMatch { input: String, count: usize },
    /// A non-empty parameter list contained no `type name` pairs.
    #[error("no `type name` pairs found in parameter list {0:?}")]
    Grammar(String),
    /// The type resolver rejected a type token.
    #[error("unknown type `{ty}`")]
    UnknownType {
        ty: String,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },
    /// A method with the same name was already registered and duplicates are rejected.
    #[error("method `{name}` is already declared as `{previous}`")]
    DuplicateName { name: String, previous: String },
}

impl ParseError {
    pub(crate) fn unknown_type(
        ty: impl Into<String>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        Self::UnknownType { ty: ty.into(), source: Box::new(source) }
    }
}

/// Wrapper error returned when building a registry, identifying the declaration that failed.
#[derive(Debug, thiserror::Error)]
#[error("failed to parse declaration #{index} {declaration:?}")]
pub struct BatchParseError {
    /// Zero-based position of the declaration in the batch.
    pub index: usize,
    /// The declaration as it was supplied.
    pub declaration: String,
    /// The inner error.
    pub source: ParseError,
}
