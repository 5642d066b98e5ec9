use std::fmt::Arguments;
use std::path::Path;
use std::path::PathBuf;

use log::debug;

use crate::process::Invocation;
use crate::process::ProcessResult;
use crate::process::Runner;
use crate::Error;
use crate::Options;

/// The archiver executable together with the switches every call gets.
#[derive(Clone, Debug)]
pub struct Tool {
    binary: PathBuf,
    charset: Option<&'static str>,
    debug: bool,
}

impl Tool {
    /// Resolves the binary and validates the options.
    pub fn new(options: &Options) -> Result<Self, Error> {
        let charset = match options.text_encoding.as_deref() {
            Some(encoding) => Some(console_charset(encoding)?),
            None => None,
        };
        let binary = match options.binary.as_ref() {
            Some(binary) if binary.as_os_str().is_empty() => {
                return Err(Error::invalid_argument("the `binary` option must be non-empty"));
            }
            Some(binary) => binary.clone(),
            None => find_binary()?,
        };
        let tool = Self {
            binary,
            charset,
            debug: options.debug,
        };
        tool.debug(format_args!("Binary: {}", tool.binary.display()));
        Ok(tool)
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    pub fn set_debug(&mut self, value: bool) {
        self.debug = value;
    }

    /// Starts a command line for the given subcommand (`l`, `a`, `x`, `t`).
    pub fn invocation(&self, subcommand: &str) -> Invocation {
        let mut invocation = Invocation::new(&self.binary);
        invocation.arg(subcommand);
        if let Some(charset) = self.charset {
            invocation.switch("-scc", charset);
        }
        invocation
    }

    pub fn run<R: Runner + ?Sized>(
        &self,
        runner: &R,
        invocation: &Invocation,
        stdin: Option<&[u8]>,
    ) -> Result<ProcessResult, Error> {
        self.debug(format_args!("Command: {}", invocation));
        let result = runner.run(invocation, stdin)?;
        self.debug(format_args!("{}: {}", invocation, result.status));
        if !result.success() {
            self.debug(format_args!("Command stdout: {}", result.stdout.join("\n")));
            self.debug(format_args!("Command stderr: {}", result.stderr));
        }
        Ok(result)
    }

    pub(crate) fn debug(&self, args: Arguments) {
        if self.debug {
            debug!("{}", args);
        }
    }
}

#[cfg(windows)]
const CANDIDATES: &[&str] = &["7za", "7z"];

#[cfg(not(windows))]
const CANDIDATES: &[&str] = &["7zr", "7z", "7za"];

/// Searches `PATH` for one of the known 7-Zip executables.
pub fn find_binary() -> Result<PathBuf, Error> {
    CANDIDATES
        .iter()
        .find_map(|candidate| which::which(candidate).ok())
        .ok_or(Error::BinaryNotFound(CANDIDATES))
}

/// Maps an encoding name to the value of the `-scc` switch.
fn console_charset(encoding: &str) -> Result<&'static str, Error> {
    let upper = encoding.to_ascii_uppercase();
    if upper.starts_with("UTF-") {
        return Ok("UTF-8");
    }
    match upper.as_str() {
        "WINDOWS-1252" | "CP1252" | "ISO-8859-1" => Ok("WIN"),
        "ASCII" => Ok("DOS"),
        _ => Err(Error::invalid_argument(format!(
            "unsupported text encoding {:?}",
            encoding
        ))),
    }
}
