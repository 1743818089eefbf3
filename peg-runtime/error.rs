//! Parse error reporting

use crate::{Parse, RuleResult};
use std::collections::HashSet;
use std::fmt::{self, Debug, Display};

/// A set of literals or names that failed to match
#[derive(PartialEq, Eq, Debug, Clone, Default)]
pub struct ExpectedSet {
    expected: HashSet<&'static str>,
}

impl ExpectedSet {
    /// Iterator of expected literals
    pub fn tokens<'a>(&'a self) -> impl Iterator<Item = &'static str> + 'a {
        self.expected.iter().copied()
    }

    /// Number of distinct expectations recorded
    pub fn len(&self) -> usize {
        self.expected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expected.is_empty()
    }
}

impl Display for ExpectedSet {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        let mut errors = self.tokens().collect::<Vec<_>>();
        errors.sort_unstable();

        match errors.as_slice() {
            [] => write!(fmt, "<unreported>"),
            [single] => write!(fmt, "{}", single),
            [first, rest @ ..] => {
                write!(fmt, "one of {}", first)?;
                for elem in rest {
                    write!(fmt, ", {}", elem)?;
                }
                Ok(())
            }
        }
    }
}

/// A parse failure.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct ParseError<L> {
    /// The furthest position the parser reached in the input before failing.
    pub location: L,

    /// The set of literals that failed to match at that position.
    pub expected: ExpectedSet,
}

impl<L: Display> Display for ParseError<L> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(fmt, "error at {}: expected {}", self.location, self.expected)
    }
}

impl<L: Display + Debug> std::error::Error for ParseError<L> {}

#[doc(hidden)]
#[derive(Debug)]
pub struct ErrorState {
    /// Furthest failure we've hit so far.
    pub max_err_pos: usize,

    /// Are we reparsing after a failure? If so, compute and store expected set
    /// of all alternative expectations when we are at offset `max_err_pos`.
    pub reparsing_on_failure: bool,

    /// The set of tokens we expected to find when we hit the failure.
    /// Updated when `reparsing_on_failure`.
    pub expected: ExpectedSet,
}

impl ErrorState {
    pub fn new(initial_pos: usize) -> Self {
        ErrorState {
            max_err_pos: initial_pos,
            reparsing_on_failure: false,
            expected: ExpectedSet::default(),
        }
    }

    /// Set up for reparsing to record the details of the furthest failure.
    pub fn reparse_for_failure(&mut self) {
        self.reparsing_on_failure = true;
    }

    #[inline(never)]
    fn mark_failure_slow_path(&mut self, pos: usize, expected: &'static str) {
        if pos == self.max_err_pos {
            self.expected.expected.insert(expected);
        }
    }

    /// Flag a failure.
    #[inline(always)]
    pub fn mark_failure(&mut self, pos: usize, expected: &'static str) -> RuleResult<()> {
        if self.reparsing_on_failure {
            self.mark_failure_slow_path(pos, expected);
        } else if pos > self.max_err_pos {
            self.max_err_pos = pos;
        }
        RuleResult::Failed
    }

    /// Build the error for the furthest failure, located in `input`.
    pub fn into_parse_error<I: Parse + ?Sized>(self, input: &I) -> ParseError<I::PositionRepr> {
        ParseError {
            location: input.position_repr(self.max_err_pos),
            expected: self.expected,
        }
    }
}
