//! Input trait implementations for `str`

use super::{Parse, ParseElem, ParseLiteral, ParseSlice, RuleResult};
use std::fmt::{self, Display};

/// Line and column within a string
#[derive(PartialEq, Eq, Debug, Clone, Copy, Hash)]
pub struct LineCol {
    /// Line (1-indexed)
    pub line: usize,

    /// Column (1-indexed, in characters)
    pub column: usize,

    /// Byte offset from start of string (0-indexed)
    pub offset: usize,
}

impl Display for LineCol {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(fmt, "{}:{}", self.line, self.column)
    }
}

impl Parse for str {
    type PositionRepr = LineCol;

    fn start(&self) -> usize {
        0
    }

    fn is_eof(&self, pos: usize) -> bool {
        pos >= self.len()
    }

    fn position_repr(&self, pos: usize) -> LineCol {
        let before = &self[..pos];
        let line = before.as_bytes().iter().filter(|&&c| c == b'\n').count() + 1;
        let column = before.chars().rev().take_while(|&c| c != '\n').count() + 1;
        LineCol {
            line,
            column,
            offset: pos,
        }
    }
}

impl ParseElem for str {
    type Element = char;

    fn parse_elem(&self, pos: usize) -> RuleResult<char> {
        match self[pos..].chars().next() {
            Some(c) => RuleResult::Matched(pos + c.len_utf8(), c),
            None => RuleResult::Failed,
        }
    }
}

impl ParseLiteral for str {
    fn parse_string_literal(&self, pos: usize, literal: &str) -> RuleResult<()> {
        let l = literal.len();
        if self.len() >= pos + l && &self.as_bytes()[pos..pos + l] == literal.as_bytes() {
            RuleResult::Matched(pos + l, ())
        } else {
            RuleResult::Failed
        }
    }
}

impl<'input> ParseSlice<'input> for str {
    type Slice = &'input str;

    fn parse_slice(&'input self, p1: usize, p2: usize) -> &'input str {
        &self[p1..p2]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_repr_counts_lines_and_chars() {
        let input = "ab\ncdé\nf";
        assert_eq!(input.position_repr(0), LineCol { line: 1, column: 1, offset: 0 });
        assert_eq!(input.position_repr(2), LineCol { line: 1, column: 3, offset: 2 });
        assert_eq!(input.position_repr(3), LineCol { line: 2, column: 1, offset: 3 });
        // `é` is two bytes but one column
        assert_eq!(input.position_repr(7), LineCol { line: 2, column: 4, offset: 7 });
        assert_eq!(input.position_repr(8), LineCol { line: 3, column: 1, offset: 8 });
        assert_eq!(input.position_repr(9).to_string(), "3:2");
    }

    #[test]
    fn literals_and_elements() {
        let input = "v=é;";
        assert_eq!(input.parse_string_literal(0, "v="), RuleResult::Matched(2, ()));
        assert_eq!(input.parse_string_literal(1, "v="), RuleResult::Failed);
        assert_eq!(input.parse_string_literal(3, "é;;"), RuleResult::Failed);
        assert_eq!(input.parse_elem(2), RuleResult::Matched(4, 'é'));
        assert_eq!(input.parse_elem(5), RuleResult::Failed);
        assert!(input.is_eof(5));
        assert!(!input.is_eof(4));
        assert_eq!(input.parse_slice(0, 2), "v=");
    }
}
