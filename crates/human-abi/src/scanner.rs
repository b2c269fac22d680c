//! Declaration scanner.
//!
//! Finds `[function] name(inputs) [returns (outputs)]` shapes in free-form text. The scan is
//! unanchored and non-overlapping: surrounding text is skipped, and every declaration found is
//! yielded so that callers can reject inputs containing more than one.
//!
//! Parameter bodies run up to the first `)`; a newline before it means the shape does not match.

/// The raw pieces of a single declaration, borrowed from the scanned input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct RawDeclaration<'a> {
    /// The function name.
    pub name: &'a str,
    /// The text between the input parentheses, trimmed.
    pub inputs: &'a str,
    /// The text between the `returns` parentheses, trimmed, if the clause is present.
    pub outputs: Option<&'a str>,
}

/// Iterator over the declarations found in a string.
#[derive(Clone, Debug)]
pub(crate) struct Declarations<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Declarations<'a> {
    /// Creates a scanner over `input`.
    ///
    /// Input length is not bounded here; callers apply
    /// [`ParserConfig::max_declaration_length`](crate::ParserConfig::max_declaration_length).
    pub(crate) fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn bytes(&self) -> &'a [u8] {
        self.input.as_bytes()
    }

    /// Tries to match a declaration starting exactly at `start`, returning it and the end offset.
    fn match_at(&self, start: usize) -> Option<(RawDeclaration<'a>, usize)> {
        const KEYWORD: &[u8] = b"function";

        let bytes = self.bytes();
        if bytes[start..].starts_with(KEYWORD) {
            let after = start + KEYWORD.len();
            let name_start = skip_whitespace(bytes, after);
            if name_start > after
                && let Some(found) = self.match_body(name_start)
            {
                return Some(found);
            }
        }
        self.match_body(start)
    }

    fn match_body(&self, start: usize) -> Option<(RawDeclaration<'a>, usize)> {
        let bytes = self.bytes();
        let name_end = skip_word(bytes, start);
        if name_end == start {
            return None;
        }
        let open = skip_whitespace(bytes, name_end);
        if bytes.get(open) != Some(&b'(') {
            return None;
        }
        let (inputs, mut end) = self.parenthesized(open + 1)?;
        let outputs = self.match_returns(end).map(|(outputs, returns_end)| {
            end = returns_end;
            outputs
        });

        let decl = RawDeclaration { name: &self.input[start..name_end], inputs, outputs };
        Some((decl, end))
    }

    fn match_returns(&self, pos: usize) -> Option<(&'a str, usize)> {
        const KEYWORD: &[u8] = b"returns";

        let bytes = self.bytes();
        let start = skip_whitespace(bytes, pos);
        if !bytes[start..].starts_with(KEYWORD) {
            return None;
        }
        let open = skip_whitespace(bytes, start + KEYWORD.len());
        if bytes.get(open) != Some(&b'(') {
            return None;
        }
        self.parenthesized(open + 1)
    }

    /// Returns the trimmed body up to the first `)` and the offset just past it.
    fn parenthesized(&self, from: usize) -> Option<(&'a str, usize)> {
        let bytes = self.bytes();
        let close = bytes[from..].iter().position(|&b| b == b')' || b == b'\n')? + from;
        (bytes[close] == b')').then(|| (self.input[from..close].trim(), close + 1))
    }
}

impl<'a> Iterator for Declarations<'a> {
    type Item = RawDeclaration<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let bytes = self.bytes();
        while self.pos < bytes.len() {
            let start = self.pos;
            if let Some((decl, end)) = self.match_at(start) {
                self.pos = end;
                return Some(decl);
            }
            // A match cannot start anywhere else in the same word either.
            self.pos = if is_word(bytes[start]) { skip_word(bytes, start) } else { start + 1 };
        }
        None
    }
}

#[inline]
fn is_word(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

fn skip_word(bytes: &[u8], from: usize) -> usize {
    bytes[from..].iter().position(|&b| !is_word(b)).map_or(bytes.len(), |n| from + n)
}

pub(crate) fn skip_whitespace(bytes: &[u8], from: usize) -> usize {
    bytes[from..].iter().position(|b| !b.is_ascii_whitespace()).map_or(bytes.len(), |n| from + n)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(input: &str) -> Vec<RawDeclaration<'_>> {
        Declarations::new(input).collect()
    }

    fn decl<'a>(name: &'a str, inputs: &'a str, outputs: Option<&'a str>) -> RawDeclaration<'a> {
        RawDeclaration { name, inputs, outputs }
    }

    #[test]
    fn scans_plain_declaration() {
        assert_eq!(
            scan("transfer(address to, uint256 amount)"),
            vec![decl("transfer", "address to, uint256 amount", None)]
        );
    }

    #[test]
    fn scans_function_keyword_and_returns() {
        assert_eq!(
            scan("function balanceOf( address owner ) external view returns ( uint256 balance )"),
            vec![decl("balanceOf", "address owner", None), decl("returns", "uint256 balance", None)],
            "modifiers between the lists break the returns clause"
        );
        assert_eq!(
            scan("function balanceOf(address owner) returns (uint256 balance)"),
            vec![decl("balanceOf", "address owner", Some("uint256 balance"))]
        );
        assert_eq!(scan("f()returns()"), vec![decl("f", "", Some(""))]);
    }

    #[test]
    fn keyword_without_whitespace_is_the_name() {
        assert_eq!(scan("function(uint a)"), vec![decl("function", "uint a", None)]);
        assert_eq!(scan("functionfoo(uint a)"), vec![decl("functionfoo", "uint a", None)]);
    }

    #[test]
    fn skips_surrounding_text() {
        assert_eq!(scan("call -> foo (uint a) now"), vec![decl("foo", "uint a", None)]);
        assert_eq!(scan("é bar(bool b)"), vec![decl("bar", "bool b", None)]);
    }

    #[test]
    fn returns_without_parens_is_not_a_clause() {
        assert_eq!(scan("f(uint a) returns bool"), vec![decl("f", "uint a", None)]);
    }

    #[test]
    fn finds_every_declaration() {
        assert_eq!(
            scan("a(uint x) b(uint y) returns (bool z)"),
            vec![decl("a", "uint x", None), decl("b", "uint y", Some("bool z"))]
        );
    }

    #[test]
    fn no_match() {
        assert!(scan("").is_empty());
        assert!(scan("transfer").is_empty());
        assert!(scan("transfer(address to").is_empty());
        assert!(scan("(address to)").is_empty());
        assert!(scan("transfer(address to,\n uint256 amount)").is_empty());
    }

    #[test]
    fn body_ends_at_first_paren() {
        assert_eq!(scan("f((uint a) b)"), vec![decl("f", "(uint a", None)]);
    }
}
