//! Parsing the output of `7z l`.

mod entry;
mod field;
mod metadata;
mod parser;
mod widths;

pub use self::entry::*;
pub use self::field::*;
pub use self::metadata::*;
pub use self::parser::*;
pub use self::widths::*;

use std::path::Path;

use crate::process::Runner;
use crate::Error;
use crate::Tool;

/// Lists the archive with the given tool.
///
/// A missing archive is listed as empty without running anything.
pub fn list<R: Runner + ?Sized>(runner: &R, tool: &Tool, archive: &Path) -> Result<Listing, Error> {
    if !archive.exists() {
        tool.debug(format_args!("{} does not exist, nothing to list", archive.display()));
        return Ok(Listing::new());
    }
    let mut invocation = tool.invocation("l");
    // Everything after `--` is an operand, even if it starts with a dash.
    invocation.arg("--").arg(archive);
    let result = tool.run(runner, &invocation, None)?;
    if !result.success() {
        return Err(Error::execution(&invocation, result));
    }
    Listing::parse_lines(&result.stdout)
}
