mod errors;

pub use self::errors::*;

use std::time::Duration;

use thiserror::Error;

use crate::process::Invocation;
use crate::process::ProcessResult;
use crate::process::ProcessStatus;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("failed to run `{command}`: {source}")]
    ProcessLaunch {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("`{command}` failed with {status}: {stderr}")]
    ProcessExecution {
        command: String,
        status: ProcessStatus,
        stdout: Vec<String>,
        stderr: String,
    },
    #[error("error(s) listing archive contents:\n{0}")]
    Listing(Errors),
    #[error("`{command}` did not finish within {timeout:?}")]
    Timeout { command: String, timeout: Duration },
    #[error("none of {0:?} found in PATH")]
    BinaryNotFound(&'static [&'static str]),
    #[error("entry {0:?} not found in archive")]
    EntryNotFound(String),
    #[error("input/output error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn invalid_argument(message: impl ToString) -> Self {
        Self::InvalidArgument(message.to_string())
    }

    pub(crate) fn execution(invocation: &Invocation, result: ProcessResult) -> Self {
        Self::ProcessExecution {
            command: invocation.to_string(),
            status: result.status,
            stdout: result.stdout,
            stderr: result.stderr,
        }
    }

    /// Exit status of the tool, if the error came from a finished process.
    pub fn status(&self) -> Option<ProcessStatus> {
        match self {
            Self::ProcessExecution { status, .. } => Some(*status),
            _ => None,
        }
    }
}
