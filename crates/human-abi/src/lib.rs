//! # foundry-human-abi
//!
//! Parses human-readable Solidity function declarations, such as
//! `transfer(address to, uint256 amount) returns (bool success)`, into canonical signatures and
//! typed parameter lists, and indexes batches of them by method name.
//!
//! ```
//! let func = foundry_human_abi::parse_function("transfer(address to, uint amount)")?;
//! assert_eq!(func.signature(), "transfer(address,uint256)");
//! # Ok::<_, foundry_human_abi::ParseError>(())
//! ```

#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[macro_use]
extern crate tracing;

use alloy_dyn_abi::DynSolType;

pub mod config;
pub use config::{DuplicateNames, ParserConfig};

pub mod error;
pub use error::{BatchParseError, ParseError};

pub mod params;
pub use params::{Argument, TypeNamePairs, normalize_type};

pub mod registry;
pub use registry::{Method, MethodRegistry, bare_name};

pub mod resolver;
pub use resolver::{SolTypeResolver, TypeResolver};

mod scanner;

pub mod signature;
pub use signature::{ParsedFunction, SignatureParser};

/// Parses a single declaration with the default resolver and config.
pub fn parse_function(declaration: &str) -> Result<ParsedFunction<DynSolType>, ParseError> {
    SignatureParser::new().parse(declaration)
}

/// Parses a batch of declarations into a registry with the default resolver and config.
pub fn parse_functions<I, S>(declarations: I) -> Result<MethodRegistry<DynSolType>, BatchParseError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    SignatureParser::new().build_registry(declarations)
}
