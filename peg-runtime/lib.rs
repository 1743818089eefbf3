use std::fmt::Display;

pub mod error;
pub mod str;
pub mod tokens;

pub use crate::str::LineCol;
pub use crate::tokens::{Node, Token, TokenTree};

/// The result type used internally in the parser.
///
/// Every rule function returns one of these; the public API of a parser
/// adapts failures to `std::result::Result`.
#[derive(Clone, PartialEq, PartialOrd, Eq, Ord, Debug, Hash)]
pub enum RuleResult<T> {
    Matched(usize, T),
    Failed,
}

/// A type that can be used as input to a parser.
pub trait Parse {
    type PositionRepr: Display;
    fn start(&self) -> usize;
    fn is_eof(&self, p: usize) -> bool;
    fn position_repr(&self, p: usize) -> Self::PositionRepr;
}

/// A parser input type supporting character classes.
pub trait ParseElem: Parse {
    /// Type of a single atomic element of the input, for example a character
    type Element;

    /// Get the element at `pos`, or `Failed` if past end of input.
    fn parse_elem(&self, pos: usize) -> RuleResult<Self::Element>;
}

/// A parser input type supporting literal strings.
pub trait ParseLiteral: Parse {
    /// Attempt to match the `literal` string at `pos`, returning whether it
    /// matched or failed.
    fn parse_string_literal(&self, pos: usize, literal: &str) -> RuleResult<()>;
}

/// A parser input type supporting `<...>` captures.
pub trait ParseSlice<'input>: Parse {
    /// Type of a slice of the input.
    type Slice;

    /// Get a slice of input.
    fn parse_slice(&'input self, p1: usize, p2: usize) -> Self::Slice;
}
