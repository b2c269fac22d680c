//! Human-readable function declaration parsing.

use crate::{
    config::ParserConfig,
    error::{BatchParseError, ParseError},
    params::{Argument, parse_params},
    registry::MethodRegistry,
    resolver::{SolTypeResolver, TypeResolver},
    scanner::Declarations,
};
use itertools::Itertools;

/// The result of parsing a single declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedFunction<T> {
    signature: String,
    inputs: Vec<Argument<T>>,
    outputs: Vec<Argument<T>>,
}

impl<T> ParsedFunction<T> {
    /// The canonical signature, e.g. `transfer(address,uint256)`.
    ///
    /// Only the name and the input types take part in it.
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// The input arguments, in declaration order.
    pub fn inputs(&self) -> &[Argument<T>] {
        &self.inputs
    }

    /// The output arguments, in declaration order; empty without a `returns` clause.
    pub fn outputs(&self) -> &[Argument<T>] {
        &self.outputs
    }

    /// Splits into `(signature, inputs, outputs)`.
    pub fn into_parts(self) -> (String, Vec<Argument<T>>, Vec<Argument<T>>) {
        (self.signature, self.inputs, self.outputs)
    }
}

/// Parses declarations such as `function transfer(address to, uint256 amount) returns (bool)`.
///
/// The parser holds no state between calls and can be shared between threads whenever its
/// resolver can.
#[derive(Clone, Debug, Default)]
pub struct SignatureParser<R = SolTypeResolver> {
    resolver: R,
    config: ParserConfig,
}

impl SignatureParser {
    /// Creates a parser resolving types with alloy's [`DynSolType`](alloy_dyn_abi::DynSolType).
    pub fn new() -> Self {
        Self::default()
    }
}

impl<R: TypeResolver> SignatureParser<R> {
    /// Creates a parser using the given type resolver.
    pub fn with_resolver(resolver: R) -> Self {
        Self { resolver, config: ParserConfig::default() }
    }

    /// Replaces the parser config.
    pub fn with_config(mut self, config: ParserConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the type resolver.
    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    /// Returns the parser config.
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parses a single declaration.
    ///
    /// The input must contain exactly one `[function] name(inputs) [returns (outputs)]` shape.
    pub fn parse(&self, declaration: &str) -> Result<ParsedFunction<R::Type>, ParseError> {
        self.check_length(declaration)?;

        let mut declarations = Declarations::new(declaration);
        let decl = declarations.next().ok_or_else(|| ParseError::NoMatch(declaration.into()))?;
        let extra = declarations.count();
        if extra > 0 {
            return Err(ParseError::AmbiguousMatch {
                input: declaration.into(),
                count: extra + 1,
            });
        }

        let inputs = parse_params(&self.resolver, decl.inputs)?;
        let outputs = parse_params(&self.resolver, decl.outputs.unwrap_or_default())?;
        let signature = format!(
            "{}({})",
            decl.name,
            inputs.iter().map(|arg| self.resolver.type_name(arg.ty())).format(",")
        );
        trace!(target: "human_abi", declaration, %signature, "parsed declaration");

        Ok(ParsedFunction { signature, inputs, outputs })
    }

    /// Parses the body of a single parameter list, e.g. `address to, uint256 amount`.
    pub fn parse_params(&self, params: &str) -> Result<Vec<Argument<R::Type>>, ParseError> {
        self.check_length(params)?;
        parse_params(&self.resolver, params)
    }

    /// Parses every declaration and indexes the results by method name.
    ///
    /// Fails on the first declaration that does not parse; no partial registry is returned.
    pub fn build_registry<I, S>(
        &self,
        declarations: I,
    ) -> Result<MethodRegistry<R::Type>, BatchParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        MethodRegistry::build(self, declarations)
    }

    fn check_length(&self, input: &str) -> Result<(), ParseError> {
        let max = self.config.max_declaration_length;
        if input.len() > max {
            return Err(ParseError::InputTooLong { len: input.len(), max });
        }
        Ok(())
    }
}
