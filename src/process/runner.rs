use std::io::ErrorKind;
use std::io::Read;
use std::io::Write;
use std::process::Child;
use std::process::Stdio;
use std::thread::ScopedJoinHandle;
use std::time::Duration;
use std::time::Instant;

use log::trace;

use crate::process::Invocation;
use crate::process::ProcessResult;
use crate::Error;

/// Executes invocations on behalf of an archive handle.
pub trait Runner {
    /// Runs the invocation to completion, feeding `stdin` to the child if given.
    ///
    /// A child that ran but failed is an `Ok` result; only failures to start
    /// or to talk to the child are errors.
    fn run(&self, invocation: &Invocation, stdin: Option<&[u8]>) -> Result<ProcessResult, Error>;
}

impl<R: Runner + ?Sized> Runner for &R {
    fn run(&self, invocation: &Invocation, stdin: Option<&[u8]>) -> Result<ProcessResult, Error> {
        (**self).run(invocation, stdin)
    }
}

/// Spawns real child processes.
#[derive(Clone, Debug, Default)]
pub struct SystemRunner {
    timeout: Option<Duration>,
}

impl SystemRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Kill the child if it is still running after `timeout`.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

impl Runner for SystemRunner {
    fn run(&self, invocation: &Invocation, stdin: Option<&[u8]>) -> Result<ProcessResult, Error> {
        let mut command = invocation.to_command();
        command.stdin(match stdin {
            Some(..) => Stdio::piped(),
            None => Stdio::null(),
        });
        command.stdout(Stdio::piped());
        command.stderr(Stdio::piped());
        #[cfg(unix)]
        if self.timeout.is_some() {
            use std::os::unix::process::CommandExt;
            // Killed as a group on timeout.
            command.process_group(0);
        }
        let mut child = command.spawn().map_err(|e| Error::ProcessLaunch {
            command: invocation.to_string(),
            source: e,
        })?;
        trace!("Spawned {} as pid {}", invocation, child.id());
        let child_stdin = child.stdin.take();
        let child_stdout = child.stdout.take();
        let child_stderr = child.stderr.take();
        std::thread::scope(|scope| {
            let writer = scope.spawn(move || feed(child_stdin, stdin.unwrap_or_default()));
            let stdout_reader = scope.spawn(move || drain(child_stdout));
            let stderr_reader = scope.spawn(move || drain(child_stderr));
            // Pipe threads finish once the child exits or is killed.
            let status = wait(&mut child, self.timeout);
            let stdout = join(stdout_reader);
            let stderr = join(stderr_reader);
            let written = join(writer);
            let status = match status? {
                Some(status) => status,
                None => {
                    return Err(Error::Timeout {
                        command: invocation.to_string(),
                        timeout: self.timeout.unwrap_or_default(),
                    })
                }
            };
            written?;
            Ok(ProcessResult::new(status.into(), &stdout?, &stderr?))
        })
    }
}

/// Waits for the child, killing it when the timeout elapses.
///
/// Returns `None` on timeout. The child is reaped on every path.
fn wait(
    child: &mut Child,
    timeout: Option<Duration>,
) -> Result<Option<std::process::ExitStatus>, Error> {
    let Some(timeout) = timeout else {
        return Ok(Some(child.wait()?));
    };
    let deadline = Instant::now() + timeout;
    loop {
        match child.try_wait() {
            Ok(Some(status)) => return Ok(Some(status)),
            Ok(None) if Instant::now() >= deadline => {
                kill(child);
                return Ok(None);
            }
            Ok(None) => std::thread::sleep(POLL_INTERVAL),
            Err(e) => {
                kill(child);
                return Err(e.into());
            }
        }
    }
}

fn kill(child: &mut Child) {
    #[cfg(unix)]
    if let Ok(pid) = libc::pid_t::try_from(child.id()) {
        // The child leads its own process group.
        unsafe { libc::kill(-pid, libc::SIGKILL) };
    }
    let _ = child.kill();
    let _ = child.wait();
}

fn feed<W: Write>(pipe: Option<W>, payload: &[u8]) -> Result<(), std::io::Error> {
    let Some(mut pipe) = pipe else {
        return Ok(());
    };
    // The pipe is closed when `pipe` is dropped.
    match pipe.write_all(payload).and_then(|()| pipe.flush()) {
        // The child is free to exit without reading its input.
        Err(ref e) if e.kind() == ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}

fn drain<R: Read>(pipe: Option<R>) -> Result<Vec<u8>, std::io::Error> {
    let mut buffer = Vec::new();
    if let Some(mut pipe) = pipe {
        pipe.read_to_end(&mut buffer)?;
    }
    Ok(buffer)
}

fn join<T>(
    handle: ScopedJoinHandle<'_, Result<T, std::io::Error>>,
) -> Result<T, std::io::Error> {
    handle
        .join()
        .map_err(|_| std::io::Error::other("pipe thread panicked"))?
}

const POLL_INTERVAL: Duration = Duration::from_millis(10);

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::process::ProcessStatus;
    use crate::test::prevent_concurrency;

    fn sh(script: &str) -> Invocation {
        let mut invocation = Invocation::new("sh");
        invocation.arg("-c").arg(script);
        invocation
    }

    #[test]
    fn captures_stdout_stderr_and_exit_code() {
        let _guard = prevent_concurrency("process");
        let result = SystemRunner::new()
            .run(&sh("echo one; echo 'two  words'; echo oops >&2; exit 3"), None)
            .unwrap();
        assert_eq!(ProcessStatus::Exited(3), result.status);
        assert_eq!(vec!["one", "two  words"], result.stdout);
        assert_eq!("oops\n", result.stderr);
    }

    #[test]
    fn feeds_stdin() {
        let _guard = prevent_concurrency("process");
        let result = SystemRunner::new()
            .run(&Invocation::new("cat"), Some(b"hello\nworld\n"))
            .unwrap();
        assert!(result.success());
        assert_eq!(vec!["hello", "world"], result.stdout);
    }

    #[test]
    fn arguments_are_not_interpreted_by_a_shell() {
        let _guard = prevent_concurrency("process");
        let mut invocation = Invocation::new("printf");
        invocation.arg("%s\n").arg("$(echo injected); `id` 'x' \"y\" €");
        let result = SystemRunner::new().run(&invocation, None).unwrap();
        assert_eq!(vec!["$(echo injected); `id` 'x' \"y\" €"], result.stdout);
    }

    #[test]
    fn large_stdin_and_large_output_do_not_deadlock() {
        let _guard = prevent_concurrency("process");
        const SIZE: usize = 8 * 1024 * 1024;
        let line = b"0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcde\n";
        let payload = line.repeat(SIZE / line.len());
        // The child fills stderr before it starts reading its input.
        let result = SystemRunner::new()
            .with_timeout(Some(Duration::from_secs(120)))
            .run(
                &sh("head -c 4194304 /dev/zero >&2; cat"),
                Some(payload.as_slice()),
            )
            .unwrap();
        assert!(result.success());
        assert_eq!(SIZE / line.len(), result.stdout.len());
        assert_eq!(4 * 1024 * 1024, result.stderr.len());
    }

    #[test]
    fn child_may_ignore_stdin() {
        let _guard = prevent_concurrency("process");
        let payload = vec![b'x'; 4 * 1024 * 1024];
        let result = SystemRunner::new()
            .run(&sh("exit 0"), Some(payload.as_slice()))
            .unwrap();
        assert!(result.success());
    }

    #[test]
    fn missing_program_is_a_launch_error() {
        let _guard = prevent_concurrency("process");
        let error = SystemRunner::new()
            .run(&Invocation::new("/nonexistent/7zr"), None)
            .unwrap_err();
        assert!(
            matches!(error, Error::ProcessLaunch { ref command, .. } if command == "/nonexistent/7zr"),
            "{error:?}"
        );
    }

    #[test]
    fn signal_is_reported_as_status() {
        let _guard = prevent_concurrency("process");
        let result = SystemRunner::new().run(&sh("kill -9 $$"), None).unwrap();
        assert_eq!(ProcessStatus::Signaled(Some(9)), result.status);
    }

    #[test]
    fn timeout_kills_child() {
        let _guard = prevent_concurrency("process");
        let started = Instant::now();
        let error = SystemRunner::new()
            .with_timeout(Some(Duration::from_millis(100)))
            .run(&sh("exec sleep 30"), None)
            .unwrap_err();
        assert!(matches!(error, Error::Timeout { .. }), "{error:?}");
        assert!(started.elapsed() < Duration::from_secs(20));
    }

    #[test]
    fn timeout_kills_forked_children() {
        let _guard = prevent_concurrency("process");
        let started = Instant::now();
        // `sleep` is a grandchild that keeps stdout open after `sh` is gone.
        let error = SystemRunner::new()
            .with_timeout(Some(Duration::from_millis(100)))
            .run(&sh("sleep 5; echo done"), None)
            .unwrap_err();
        assert!(matches!(error, Error::Timeout { .. }), "{error:?}");
        assert!(
            started.elapsed() < Duration::from_secs(3),
            "{:?}",
            started.elapsed()
        );
    }
}
