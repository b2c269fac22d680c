//! Parameter list parsing.

use crate::{
    error::ParseError,
    resolver::TypeResolver,
    scanner::skip_whitespace,
};

/// A named, typed parameter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Argument<T> {
    name: String,
    ty: T,
}

impl<T> Argument<T> {
    /// Creates an argument from its name and resolved type.
    pub fn new(name: impl Into<String>, ty: T) -> Self {
        Self { name: name.into(), ty }
    }

    /// The parameter name, possibly empty.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The resolved parameter type.
    pub fn ty(&self) -> &T {
        &self.ty
    }
}

/// Iterator over the `type name` pairs of a parameter list body.
///
/// Tokens are runs of characters other than whitespace and `,`. A pair is a token followed by
/// whitespace and another token; tokens that are not part of such a pair are skipped, so commas
/// between parameters are never split on explicitly.
#[derive(Clone, Debug)]
pub struct TypeNamePairs<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> TypeNamePairs<'a> {
    /// Creates an iterator over the pairs of a parameter list body.
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }
}

impl<'a> Iterator for TypeNamePairs<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        let bytes = self.input.as_bytes();
        loop {
            self.pos += bytes[self.pos..].iter().position(|&b| is_token(b))?;

            let ty_start = self.pos;
            let ty_end = token_end(bytes, ty_start);
            let name_start = skip_whitespace(bytes, ty_end);
            self.pos = name_start;
            if name_start == ty_end || !bytes.get(name_start).is_some_and(|&b| is_token(b)) {
                continue;
            }

            let name_end = token_end(bytes, name_start);
            self.pos = name_end;
            return Some((&self.input[ty_start..ty_end], &self.input[name_start..name_end]));
        }
    }
}

#[inline]
fn is_token(b: u8) -> bool {
    !b.is_ascii_whitespace() && b != b','
}

fn token_end(bytes: &[u8], from: usize) -> usize {
    bytes[from..].iter().position(|&b| !is_token(b)).map_or(bytes.len(), |n| from + n)
}

/// Rewrites shorthand type aliases before resolution.
///
/// Only the bare `uint` token is rewritten, to `uint256`.
pub fn normalize_type(ty: &str) -> &str {
    if ty == "uint" { "uint256" } else { ty }
}

/// Parses the body of a parameter list into arguments, in declaration order.
///
/// An empty (or all-whitespace) list yields no arguments. The input length is not checked here;
/// [`SignatureParser::parse_params`](crate::SignatureParser::parse_params) applies the configured
/// limit.
pub(crate) fn parse_params<R: TypeResolver>(
    resolver: &R,
    params: &str,
) -> Result<Vec<Argument<R::Type>>, ParseError> {
    let params = params.trim();
    if params.is_empty() {
        return Ok(Vec::new());
    }

    let args = TypeNamePairs::new(params)
        .map(|(ty, name)| {
            let ty = normalize_type(ty);
            let resolved = resolver.resolve(ty).map_err(|err| ParseError::unknown_type(ty, err))?;
            Ok(Argument::new(name, resolved))
        })
        .collect::<Result<Vec<_>, ParseError>>()?;

    if args.is_empty() {
        return Err(ParseError::Grammar(params.to_string()));
    }
    trace!(target: "human_abi", params, count = args.len(), "parsed parameter list");
    Ok(args)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::{collections::BTreeMap, fmt};

    /// Resolver with a fixed vocabulary, resolving every known token to its index.
    #[derive(Debug)]
    pub(crate) struct StubResolver(BTreeMap<&'static str, usize>);

    #[derive(Debug, thiserror::Error)]
    #[error("`{0}` is not in the vocabulary")]
    pub(crate) struct NotInVocabulary(String);

    impl Default for StubResolver {
        fn default() -> Self {
            let vocabulary = ["address", "bool", "uint256", "uint8", "address[]", "bytes"];
            Self(vocabulary.into_iter().enumerate().map(|(i, ty)| (ty, i)).collect())
        }
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub(crate) struct StubType(pub(crate) usize);

    impl fmt::Display for StubType {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "t{}", self.0)
        }
    }

    impl TypeResolver for StubResolver {
        type Type = StubType;
        type Error = NotInVocabulary;

        fn resolve(&self, ty: &str) -> Result<StubType, NotInVocabulary> {
            self.0.get(ty).copied().map(StubType).ok_or_else(|| NotInVocabulary(ty.to_string()))
        }

        fn type_name(&self, ty: &StubType) -> String {
            self.0
                .iter()
                .find_map(|(name, &i)| (i == ty.0).then(|| name.to_string()))
                .unwrap_or_else(|| ty.to_string())
        }
    }

    fn pairs(input: &str) -> Vec<(&str, &str)> {
        TypeNamePairs::new(input).collect()
    }

    #[test]
    fn scans_pairs() {
        assert_eq!(pairs("address to, uint256 amount"), [("address", "to"), ("uint256", "amount")]);
        assert_eq!(pairs("address to,uint256 amount"), [("address", "to"), ("uint256", "amount")]);
        assert_eq!(pairs("  address\tto ,\n uint256   amount ,"), [
            ("address", "to"),
            ("uint256", "amount")
        ]);
        assert_eq!(pairs("address[] path"), [("address[]", "path")]);
    }

    #[test]
    fn skips_unpaired_tokens() {
        assert!(pairs("").is_empty());
        assert!(pairs("uint256").is_empty());
        assert!(pairs("address, uint256").is_empty());
        assert_eq!(pairs("address, uint256 amount"), [("uint256", "amount")]);
        assert_eq!(pairs("uint256 indexed value"), [("uint256", "indexed")]);
        assert_eq!(pairs("a b c d e"), [("a", "b"), ("c", "d")]);
    }

    #[test]
    fn normalizes_uint() {
        assert_eq!(normalize_type("uint"), "uint256");
        assert_eq!(normalize_type("uint256"), "uint256");
        assert_eq!(normalize_type("uint[]"), "uint[]");
        assert_eq!(normalize_type("int"), "int");
    }

    #[test]
    fn parses_params_in_order() {
        let resolver = StubResolver::default();
        let args = parse_params(&resolver, "uint256 amountOut, address to").unwrap();
        let names: Vec<_> = args.iter().map(Argument::name).collect();
        assert_eq!(names, ["amountOut", "to"]);
        assert_eq!(args[0].ty(), &StubType(2));
        assert_eq!(args[1].ty(), &StubType(0));
    }

    #[test]
    fn uint_shorthand_resolves_as_uint256() {
        let resolver = StubResolver::default();
        let short = parse_params(&resolver, "uint a").unwrap();
        let long = parse_params(&resolver, "uint256 a").unwrap();
        assert_eq!(short, long);
    }

    #[test]
    fn empty_list() {
        let resolver = StubResolver::default();
        assert!(parse_params(&resolver, "").unwrap().is_empty());
        assert!(parse_params(&resolver, " \t ").unwrap().is_empty());
    }

    #[test]
    fn grammar_error() {
        let resolver = StubResolver::default();
        let err = parse_params(&resolver, " uint256 ").unwrap_err();
        assert!(matches!(err, ParseError::Grammar(ref list) if list == "uint256"), "{err:?}");
        let err = parse_params(&resolver, "address, bool").unwrap_err();
        assert!(matches!(err, ParseError::Grammar(_)), "{err:?}");
    }

    #[test]
    fn unknown_type_error() {
        let resolver = StubResolver::default();
        let err = parse_params(&resolver, "address to, uint7 amount").unwrap_err();
        match err {
            ParseError::UnknownType { ty, source } => {
                assert_eq!(ty, "uint7");
                assert_eq!(source.to_string(), "`uint7` is not in the vocabulary");
            }
            err => panic!("unexpected error: {err:?}"),
        }
    }
}
