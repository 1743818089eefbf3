//! A PEG parser for groups of single-letter assignments, with an execute
//! step that turns each group into a word.
//!
//! The input is a sequence of `v=<letter>;` assignments, with `|` between
//! groups. Parsing records a token tree; executing it pushes every assigned
//! letter into an [`Accumulator`] and flushes it at the end of each group.
//!
//! ```
//! let words = peg_ex::parse_and_execute("v=T;v=H;v=E;|v=M;v=A;v=G;v=I;v=C;").unwrap();
//! assert_eq!(words, ["THE", "MAGIC"]);
//! ```

pub mod accumulator;
mod error;
pub mod exec;
pub mod grammar;

pub use crate::accumulator::Accumulator;
pub use crate::error::Error;
pub use crate::exec::{run, Execute, Grammar};
pub use crate::grammar::{Options, PegEx, Rule};
pub use peg_ex_runtime::{LineCol, Node, Token};

/// The canonical input, spelling `THE` and `MAGIC`.
pub const EXAMPLE: &str = "v=T;v=H;v=E;|v=M;v=A;v=G;v=I;v=C;";

/// Build an input of at least `size` bytes by appending `|` and
/// [`EXAMPLE`] to [`EXAMPLE`] until it is long enough.
pub fn repeat_pattern(size: usize) -> String {
    let mut input = String::with_capacity(size + EXAMPLE.len() + 1);
    input.push_str(EXAMPLE);
    while input.len() < size {
        input.push('|');
        input.push_str(EXAMPLE);
    }
    input
}

/// Parse `input`, execute its actions and return the words.
pub fn parse_and_execute(input: &str) -> Result<Vec<String>, Error> {
    let mut parser = PegEx::new(input);
    run(&mut parser)?;
    Ok(parser.into_words())
}
