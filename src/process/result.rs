use std::fmt::Display;
use std::fmt::Formatter;
use std::process::ExitStatus;

/// How a child process ended.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ProcessStatus {
    /// Normal exit with the given code.
    Exited(i32),
    /// Terminated by a signal (number is unknown on non-Unix platforms).
    Signaled(Option<i32>),
}

impl ProcessStatus {
    pub fn code(&self) -> Option<i32> {
        match self {
            Self::Exited(code) => Some(*code),
            Self::Signaled(..) => None,
        }
    }

    pub fn success(&self) -> bool {
        self.code() == Some(0)
    }
}

impl From<ExitStatus> for ProcessStatus {
    fn from(other: ExitStatus) -> Self {
        if let Some(code) = other.code() {
            return Self::Exited(code);
        }
        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;
            Self::Signaled(other.signal())
        }
        #[cfg(not(unix))]
        {
            Self::Signaled(None)
        }
    }
}

impl Display for ProcessStatus {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            Self::Exited(code) => write!(f, "exit code {}", code),
            Self::Signaled(Some(signal)) => write!(f, "signal {}", signal),
            Self::Signaled(None) => f.write_str("abnormal termination"),
        }
    }
}

/// Exit status and everything the child wrote.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ProcessResult {
    pub status: ProcessStatus,
    pub stdout: Vec<String>,
    pub stderr: String,
}

impl ProcessResult {
    pub fn new(status: ProcessStatus, stdout: &[u8], stderr: &[u8]) -> Self {
        Self {
            status,
            stdout: String::from_utf8_lossy(stdout)
                .lines()
                .map(ToString::to_string)
                .collect(),
            stderr: String::from_utf8_lossy(stderr).into_owned(),
        }
    }

    pub fn code(&self) -> Option<i32> {
        self.status.code()
    }

    pub fn success(&self) -> bool {
        self.status.success()
    }
}
