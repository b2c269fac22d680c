//! Type resolution.
//!
//! The parser never interprets type tokens itself. It hands every token to a [`TypeResolver`],
//! which either produces a canonical type or rejects the token.

use alloy_dyn_abi::DynSolType;
use std::{error::Error as StdError, fmt};

/// Resolves Solidity type tokens such as `uint256` or `address[]` into canonical types.
#[auto_impl::auto_impl(&, Box, Arc)]
pub trait TypeResolver {
    /// The canonical type produced by this resolver.
    type Type: Clone + fmt::Debug + PartialEq;
    /// The error returned for tokens that do not name a valid type.
    type Error: StdError + Send + Sync + 'static;

    /// Resolves a single type token.
    fn resolve(&self, ty: &str) -> Result<Self::Type, Self::Error>;

    /// Returns the canonical string form of a resolved type, as used in signatures.
    fn type_name(&self, ty: &Self::Type) -> String;
}

/// [`TypeResolver`] backed by alloy's [`DynSolType`].
///
/// Unsized `int` and `uint` roots (`int`, `uint[]`, `int[2]`, ...) are rejected: the only alias
/// the parser honors is the bare `uint` token, which is rewritten before resolution.
#[derive(Clone, Copy, Debug, Default)]
pub struct SolTypeResolver;

impl TypeResolver for SolTypeResolver {
    type Type = DynSolType;
    type Error = alloy_dyn_abi::Error;

    fn resolve(&self, ty: &str) -> Result<DynSolType, Self::Error> {
        let root = ty.split('[').next().unwrap_or(ty);
        if matches!(root.trim(), "int" | "uint") {
            return Err(alloy_dyn_abi::parser::Error::invalid_type_string(ty).into());
        }
        DynSolType::parse(ty)
    }

    fn type_name(&self, ty: &DynSolType) -> String {
        ty.sol_type_name().into_owned()
    }
}
