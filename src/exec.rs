//! Parser capabilities and the init/parse/execute driver

use tracing::debug;

use crate::Error;

/// A parser whose grammar carries actions to run after a successful parse.
pub trait Execute {
    fn execute(&mut self);
}

/// A parser over a buffer it owns.
pub trait Grammar {
    /// Prepare for a fresh parse.
    fn init(&mut self);

    /// Match the buffer against the grammar.
    fn parse(&mut self) -> Result<(), Error>;

    /// The execute capability, for grammars that have actions.
    fn executable(&mut self) -> Option<&mut dyn Execute> {
        None
    }
}

/// Initialize and parse, then execute if the grammar supports it.
///
/// Returns whether the actions were run. Parse failures are returned to
/// the caller untouched.
pub fn run<G: Grammar + ?Sized>(grammar: &mut G) -> Result<bool, Error> {
    grammar.init();
    grammar.parse()?;

    match grammar.executable() {
        Some(exec) => {
            exec.execute();
            Ok(true)
        }
        None => {
            debug!("grammar has no actions, skipping execute");
            Ok(false)
        }
    }
}
