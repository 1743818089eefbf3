use peg_ex_runtime::error::ParseError;
use peg_ex_runtime::LineCol;

/// Errors returned by the parser and the harness.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The input does not match the grammar.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError<LineCol>),

    /// Token positions are 32-bit, so longer inputs cannot be recorded.
    #[error("input of {len} bytes exceeds the {max} byte limit")]
    InputTooLarge { len: usize, max: usize },

    /// `parse` was called before `init`.
    #[error("parser used before init")]
    Uninitialized,
}

impl Error {
    /// Location of the failure, for parse errors.
    pub fn location(&self) -> Option<LineCol> {
        match self {
            Error::Parse(err) => Some(err.location),
            _ => None,
        }
    }
}
