//! Name-indexed method tables.

use crate::{
    error::{BatchParseError, ParseError},
    params::Argument,
    resolver::TypeResolver,
    signature::{ParsedFunction, SignatureParser},
};
use alloy_dyn_abi::DynSolType;
use alloy_json_abi::{Function, JsonAbi, Param, StateMutability};
use alloy_primitives::{Selector, keccak256};
use std::collections::{BTreeMap, btree_map};

/// Returns the bare method name of a signature: everything before the first `(`.
///
/// A string without parentheses is returned whole.
pub fn bare_name(signature: &str) -> &str {
    signature.split_once('(').map_or(signature, |(name, _)| name)
}

/// A parsed method.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Method<T> {
    name: String,
    signature: String,
    inputs: Vec<Argument<T>>,
    outputs: Vec<Argument<T>>,
    selector: Selector,
}

impl<T> Method<T> {
    /// The bare method name, also its registry key.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The canonical signature.
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// The input arguments, in declaration order.
    pub fn inputs(&self) -> &[Argument<T>] {
        &self.inputs
    }

    /// The output arguments, in declaration order.
    pub fn outputs(&self) -> &[Argument<T>] {
        &self.outputs
    }

    /// The 4-byte call selector of the canonical signature.
    pub fn selector(&self) -> Selector {
        self.selector
    }
}

impl<T> From<ParsedFunction<T>> for Method<T> {
    fn from(parsed: ParsedFunction<T>) -> Self {
        let (signature, inputs, outputs) = parsed.into_parts();
        let name = bare_name(&signature).to_string();
        let selector = Selector::from_slice(&keccak256(signature.as_bytes())[..4]);
        Self { name, signature, inputs, outputs, selector }
    }
}

impl Method<DynSolType> {
    /// Converts into an alloy [`Function`], so that alloy-based encoders can consume it.
    pub fn to_function(&self) -> Function {
        Function {
            name: self.name.clone(),
            inputs: to_params(&self.inputs),
            outputs: to_params(&self.outputs),
            state_mutability: StateMutability::NonPayable,
        }
    }
}

fn to_params(args: &[Argument<DynSolType>]) -> Vec<Param> {
    args.iter()
        .map(|arg| Param {
            ty: arg.ty().sol_type_name().into_owned(),
            name: arg.name().to_string(),
            components: Vec::new(),
            internal_type: None,
        })
        .collect()
}

/// Methods indexed by bare name.
///
/// Overloads are not distinguished: each name maps to a single method.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MethodRegistry<T> {
    methods: BTreeMap<String, Method<T>>,
}

impl<T> Default for MethodRegistry<T> {
    fn default() -> Self {
        Self { methods: BTreeMap::new() }
    }
}

impl<T> MethodRegistry<T> {
    /// Parses every declaration with `parser` and indexes the resulting methods.
    ///
    /// Name collisions are handled according to the parser's
    /// [`on_duplicate`](crate::ParserConfig::on_duplicate) policy; by default the later
    /// declaration wins. The first failing declaration aborts the whole batch.
    pub fn build<R, I, S>(
        parser: &SignatureParser<R>,
        declarations: I,
    ) -> Result<Self, BatchParseError>
    where
        R: TypeResolver<Type = T>,
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let on_duplicate = parser.config().on_duplicate;
        let mut methods = BTreeMap::new();
        for (index, declaration) in declarations.into_iter().enumerate() {
            let declaration = declaration.as_ref();
            let fail = |source| BatchParseError {
                index,
                declaration: declaration.to_string(),
                source,
            };

            let method = Method::from(parser.parse(declaration).map_err(fail)?);
            match methods.entry(method.name.clone()) {
                btree_map::Entry::Vacant(entry) => {
                    entry.insert(method);
                }
                btree_map::Entry::Occupied(mut entry) => {
                    let previous: &Method<T> = entry.get();
                    if on_duplicate.is_reject() {
                        return Err(fail(ParseError::DuplicateName {
                            name: method.name,
                            previous: previous.signature.clone(),
                        }));
                    }
                    debug!(
                        target: "human_abi",
                        name = %method.name,
                        previous = %previous.signature,
                        replacement = %method.signature,
                        "replacing method with the same name"
                    );
                    entry.insert(method);
                }
            }
        }
        Ok(Self { methods })
    }

    /// Returns the method registered under `name`.
    pub fn get(&self, name: &str) -> Option<&Method<T>> {
        self.methods.get(name)
    }

    /// Returns true if a method is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.methods.contains_key(name)
    }

    /// Finds the method whose canonical signature hashes to `selector`.
    pub fn by_selector(&self, selector: Selector) -> Option<&Method<T>> {
        self.iter().find(|method| method.selector() == selector)
    }

    /// Returns the number of registered methods.
    pub fn len(&self) -> usize {
        self.methods.len()
    }

    /// Returns true if no method is registered.
    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }

    /// Iterates over the methods, ordered by name.
    pub fn iter(&self) -> btree_map::Values<'_, String, Method<T>> {
        self.methods.values()
    }

    /// Iterates over the registered names, in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.methods.keys().map(String::as_str)
    }
}

impl MethodRegistry<DynSolType> {
    /// Converts into an alloy [`JsonAbi`] containing one function per registered method.
    pub fn to_json_abi(&self) -> JsonAbi {
        let mut abi = JsonAbi::default();
        for method in self {
            abi.functions.entry(method.name.clone()).or_default().push(method.to_function());
        }
        abi
    }
}

impl<'a, T> IntoIterator for &'a MethodRegistry<T> {
    type Item = &'a Method<T>;
    type IntoIter = btree_map::Values<'a, String, Method<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
