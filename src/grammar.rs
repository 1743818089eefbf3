//! The word grammar.
//!
//! ```text
//! Start  <- Group ('|' Group)* !.
//! Group  <- Assign+ {flush}
//! Assign <- 'v' '=' Letter ';'
//! Letter <- <[A-Za-z]> {push(text)}
//! ```
//!
//! Parsing only records a [`TokenTree`]; the actions run when the parser is
//! executed.

use std::fmt;
use std::io;

use peg_ex_runtime::error::ErrorState;
use peg_ex_runtime::{
    Node, Parse, ParseElem, ParseLiteral, ParseSlice, RuleResult, Token, TokenTree,
};
use tracing::debug;

use crate::accumulator::Accumulator;
use crate::exec::{Execute, Grammar};
use crate::Error;

/// Longest input whose positions fit in a [`Token`].
pub const MAX_INPUT_LEN: usize = u32::MAX as usize;

/// Token capacity reserved by [`PegEx::init`] unless configured otherwise.
pub const DEFAULT_TOKEN_CAPACITY: usize = 1024;

/// Rules recorded in the token tree.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Rule {
    Start,
    Group,
    Assign,
    Letter,
    /// Text captured by `<...>`
    PegText,
    /// `{push(text)}`
    Action0,
    /// `{flush}`
    Action1,
}

impl Rule {
    pub fn name(self) -> &'static str {
        match self {
            Rule::Start => "Start",
            Rule::Group => "Group",
            Rule::Assign => "Assign",
            Rule::Letter => "Letter",
            Rule::PegText => "PegText",
            Rule::Action0 => "Action0",
            Rule::Action1 => "Action1",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parser settings applied at [`PegEx::init`].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Options {
    /// Number of tokens to reserve room for before parsing.
    pub token_capacity: usize,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            token_capacity: DEFAULT_TOKEN_CAPACITY,
        }
    }
}

/// Parser over one input buffer.
///
/// The lifecycle is `new`, [`init`](PegEx::init), [`parse`](PegEx::parse),
/// then [`execute`](Execute::execute) to run the actions, which fill the
/// word list.
#[derive(Clone, Debug)]
pub struct PegEx {
    buffer: String,
    options: Options,
    tokens: TokenTree<Rule>,
    acc: Accumulator,
    initialized: bool,
}

impl PegEx {
    pub fn new(buffer: impl Into<String>) -> Self {
        PegEx::with_options(buffer, Options::default())
    }

    pub fn with_options(buffer: impl Into<String>, options: Options) -> Self {
        PegEx {
            buffer: buffer.into(),
            options,
            tokens: TokenTree::with_capacity(options.token_capacity),
            acc: Accumulator::new(),
            initialized: false,
        }
    }

    /// Prepare for parsing, discarding tokens and words of a previous run.
    pub fn init(&mut self) {
        self.tokens.clear();
        self.tokens.reserve(self.options.token_capacity);
        self.acc.clear();
        self.initialized = true;
    }

    /// Replace the input and re-initialize, keeping allocations.
    pub fn reset(&mut self, buffer: &str) {
        self.buffer.clear();
        self.buffer.push_str(buffer);
        self.init();
    }

    /// Match the whole buffer against the grammar.
    ///
    /// Words of a previous run are discarded, so executing afterwards starts
    /// from an empty accumulator. On failure the token tree is left empty
    /// and the error reports the furthest position reached along with
    /// everything expected there.
    pub fn parse(&mut self) -> Result<(), Error> {
        if !self.initialized {
            return Err(Error::Uninitialized);
        }
        self.acc.clear();

        let input = self.buffer.as_str();
        check_len(input.len())?;

        let mut state = ParseState {
            tokens: std::mem::take(&mut self.tokens),
        };
        state.tokens.clear();

        let mut err_state = ErrorState::new(Parse::start(input));
        let result = parse_start(input, &mut state, &mut err_state, Parse::start(input));
        if let RuleResult::Matched(..) = result {
            debug!(len = input.len(), tokens = state.tokens.len(), "parsed");
            self.tokens = state.tokens;
            return Ok(());
        }

        state.tokens.clear();
        err_state.reparse_for_failure();
        let reparsed = parse_start(input, &mut state, &mut err_state, Parse::start(input));
        debug_assert!(
            matches!(reparsed, RuleResult::Failed),
            "parser is nondeterministic: succeeded when reparsing for error position"
        );

        state.tokens.clear();
        self.tokens = state.tokens;

        let err = err_state.into_parse_error(input);
        debug!(%err, "parse failed");
        Err(err.into())
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Tokens of the last successful parse, in pre-order.
    pub fn tokens(&self) -> &[Token<Rule>] {
        self.tokens.tokens()
    }

    pub fn ast(&self) -> Vec<Node<Rule>> {
        self.tokens.ast()
    }

    pub fn print_syntax_tree<W: io::Write>(&self, out: W) -> io::Result<()> {
        self.tokens.print_syntax_tree(&self.buffer, out)
    }

    pub fn push(&mut self, text: &str) {
        self.acc.push(text);
    }

    pub fn flush(&mut self) {
        self.acc.flush();
    }

    pub fn accumulator(&self) -> &Accumulator {
        &self.acc
    }

    pub fn words(&self) -> &[String] {
        self.acc.words()
    }

    pub fn into_words(self) -> Vec<String> {
        self.acc.into_words()
    }
}

impl Execute for PegEx {
    fn execute(&mut self) {
        let PegEx {
            buffer, tokens, acc, ..
        } = self;

        let mut text = "";
        for token in tokens.tokens() {
            match token.rule {
                Rule::PegText => {
                    let (begin, end) = (token.begin as usize, token.end as usize);
                    text = ParseSlice::parse_slice(buffer.as_str(), begin, end)
                }
                Rule::Action0 => acc.push(text),
                Rule::Action1 => acc.flush(),
                _ => {}
            }
        }

        debug!(words = acc.words().len(), "executed");
    }
}

impl Grammar for PegEx {
    fn init(&mut self) {
        PegEx::init(self)
    }

    fn parse(&mut self) -> Result<(), Error> {
        PegEx::parse(self)
    }

    fn executable(&mut self) -> Option<&mut dyn Execute> {
        Some(self)
    }
}

/// Token positions are `u32`, so longer inputs are refused up front.
fn check_len(len: usize) -> Result<(), Error> {
    if len > MAX_INPUT_LEN {
        return Err(Error::InputTooLarge {
            len,
            max: MAX_INPUT_LEN,
        });
    }
    Ok(())
}

struct ParseState {
    tokens: TokenTree<Rule>,
}

macro_rules! matched {
    ($e:expr) => {
        match $e {
            RuleResult::Matched(pos, value) => (pos, value),
            RuleResult::Failed => return RuleResult::Failed,
        }
    };
}

/// Run a rule body, keeping its token on success and discarding it on failure.
#[inline]
fn record<F>(
    rule: Rule,
    input: &str,
    state: &mut ParseState,
    err_state: &mut ErrorState,
    pos: usize,
    body: F,
) -> RuleResult<()>
where
    F: FnOnce(&str, &mut ParseState, &mut ErrorState, usize) -> RuleResult<()>,
{
    trace_attempt(rule, input, pos);
    let index = state.tokens.open(rule, pos);
    let result = body(input, state, err_state, pos);
    match result {
        RuleResult::Matched(end, ()) => state.tokens.close(index, end),
        RuleResult::Failed => state.tokens.rollback(index),
    }
    trace_result(rule, input, pos, &result);
    result
}

#[inline]
fn literal(
    input: &str,
    err_state: &mut ErrorState,
    pos: usize,
    literal: &str,
    expected: &'static str,
) -> RuleResult<()> {
    match ParseLiteral::parse_string_literal(input, pos, literal) {
        RuleResult::Matched(next, ()) => RuleResult::Matched(next, ()),
        RuleResult::Failed => err_state.mark_failure(pos, expected),
    }
}

fn parse_start(
    input: &str,
    state: &mut ParseState,
    err_state: &mut ErrorState,
    pos: usize,
) -> RuleResult<()> {
    record(Rule::Start, input, state, err_state, pos, |input, state, err_state, pos| {
        let (mut pos, ()) = matched!(parse_group(input, state, err_state, pos));

        loop {
            let (next, ()) = match literal(input, err_state, pos, "|", "\"|\"") {
                RuleResult::Matched(next, ()) => (next, ()),
                RuleResult::Failed => break,
            };
            match parse_group(input, state, err_state, next) {
                RuleResult::Matched(next, ()) => pos = next,
                RuleResult::Failed => break,
            }
        }

        if Parse::is_eof(input, pos) {
            RuleResult::Matched(pos, ())
        } else {
            err_state.mark_failure(pos, "EOF")
        }
    })
}

fn parse_group(
    input: &str,
    state: &mut ParseState,
    err_state: &mut ErrorState,
    pos: usize,
) -> RuleResult<()> {
    record(Rule::Group, input, state, err_state, pos, |input, state, err_state, pos| {
        let (mut pos, ()) = matched!(parse_assign(input, state, err_state, pos));
        while let RuleResult::Matched(next, ()) = parse_assign(input, state, err_state, pos) {
            pos = next;
        }

        state.tokens.mark(Rule::Action1, pos);
        RuleResult::Matched(pos, ())
    })
}

fn parse_assign(
    input: &str,
    state: &mut ParseState,
    err_state: &mut ErrorState,
    pos: usize,
) -> RuleResult<()> {
    record(Rule::Assign, input, state, err_state, pos, |input, state, err_state, pos| {
        let (pos, ()) = matched!(literal(input, err_state, pos, "v", "\"v\""));
        let (pos, ()) = matched!(literal(input, err_state, pos, "=", "\"=\""));
        let (pos, ()) = matched!(parse_letter(input, state, err_state, pos));
        literal(input, err_state, pos, ";", "\";\"")
    })
}

fn parse_letter(
    input: &str,
    state: &mut ParseState,
    err_state: &mut ErrorState,
    pos: usize,
) -> RuleResult<()> {
    record(Rule::Letter, input, state, err_state, pos, |input, state, err_state, pos| {
        let text = state.tokens.open(Rule::PegText, pos);
        match ParseElem::parse_elem(input, pos) {
            RuleResult::Matched(next, c) if c.is_ascii_alphabetic() => {
                state.tokens.close(text, next);
                state.tokens.mark(Rule::Action0, next);
                RuleResult::Matched(next, ())
            }
            _ => {
                state.tokens.rollback(text);
                err_state.mark_failure(pos, "[A-Za-z]")
            }
        }
    })
}

// Positions are rendered inside the macros so they are only computed for
// events a subscriber actually records.
#[cfg(feature = "trace")]
fn trace_attempt(rule: Rule, input: &str, pos: usize) {
    tracing::trace!(
        rule = rule.name(),
        at = %Parse::position_repr(input, pos),
        "attempting"
    );
}

#[cfg(feature = "trace")]
fn trace_result(rule: Rule, input: &str, pos: usize, result: &RuleResult<()>) {
    match result {
        RuleResult::Matched(end, ()) => tracing::trace!(
            rule = rule.name(),
            at = %Parse::position_repr(input, pos),
            to = %Parse::position_repr(input, *end),
            "matched"
        ),
        RuleResult::Failed => tracing::trace!(
            rule = rule.name(),
            at = %Parse::position_repr(input, pos),
            "failed"
        ),
    }
}

#[cfg(not(feature = "trace"))]
#[inline(always)]
fn trace_attempt(_rule: Rule, _input: &str, _pos: usize) {}

#[cfg(not(feature = "trace"))]
#[inline(always)]
fn trace_result(_rule: Rule, _input: &str, _pos: usize, _result: &RuleResult<()>) {}
