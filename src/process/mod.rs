//! Running the archiver executable.
//!
//! Every invocation goes through a [`Runner`]. The production runner spawns one
//! child process per call and drains its standard streams on dedicated threads,
//! so neither side can block the other on a full pipe.

mod invocation;
mod result;
mod runner;

pub use self::invocation::*;
pub use self::result::*;
pub use self::runner::*;
