//! External command execution.
//!
//! [`Subprocess`] wraps a child process together with its three standard
//! streams. The parent keeps the write end of stdin and the read ends of
//! stdout/stderr; all descriptors are owned by the handle and released when
//! it is dropped.
//!
//! # Lifecycle
//!
//! ```text
//!   new() ──► execute() ──► wait() ──► execute() ──► wait() ──► drop
//!                │                                      │
//!                └── execute() again: panic             └── implicit wait
//!                    ("repeated start")                     unless detached
//! ```
//!
//! # Chaining
//!
//! [`chain`] connects the stdout of one process to the stdin of another
//! through a single OS pipe, so the bytes never pass through the parent:
//!
//! ```ignore
//! let mut producer = Subprocess::new("pandoc", ["-t", "json", "page.md"]);
//! let mut consumer = Subprocess::new("jq", ["."]);
//! chain(&mut producer, &mut consumer)?;
//! producer.execute()?;
//! consumer.execute()?;
//! ```

use anyhow::{Context, Result};
use std::{
    ffi::OsString,
    io::{self, PipeReader, PipeWriter, Read},
    process::{Child, ChildStderr, ChildStdin, ChildStdout, Command, ExitStatus, Stdio},
};

// ============================================================================
// Subprocess
// ============================================================================

/// A restartable child process with piped standard streams.
///
/// Construction is cheap; no process exists until [`Subprocess::execute`].
/// The handle is not thread safe and is meant to be driven by one caller.
pub struct Subprocess {
    /// Program name used in messages
    name: String,
    program: OsString,
    args: Vec<OsString>,
    child: Option<Child>,
    stdin: Option<ChildStdin>,
    stdout: Option<ChildStdout>,
    stderr: Option<ChildStderr>,
    /// Read end of a chain pipe, used as stdin on the next execution
    chained_stdin: Option<PipeReader>,
    /// Write end of a chain pipe, used as stdout on the next execution
    chained_stdout: Option<PipeWriter>,
    detached: bool,
}

impl Subprocess {
    /// Create a harness for `program` with `args`.
    pub fn new<P, I, S>(program: P, args: I) -> Self
    where
        P: Into<OsString>,
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        let program = program.into();
        Self {
            name: program.to_string_lossy().into_owned(),
            program,
            args: args.into_iter().map(Into::into).collect(),
            child: None,
            stdin: None,
            stdout: None,
            stderr: None,
            chained_stdin: None,
            chained_stdout: None,
            detached: false,
        }
    }

    /// Whether a child has been spawned and not yet waited for.
    pub const fn is_running(&self) -> bool {
        self.child.is_some()
    }

    /// Do not wait for the child when the handle is dropped.
    ///
    /// Pipes are still closed on drop.
    #[allow(dead_code)] // Reserved API
    pub const fn detach(&mut self) {
        self.detached = true;
    }

    /// Spawn the child process with fresh pipes.
    ///
    /// Pipe state of any previous run is discarded first. A chain set up
    /// with [`chain`] is consumed by this execution.
    ///
    /// # Panics
    /// Panics if the previous run has not been waited for.
    ///
    /// # Errors
    /// Returns error if the process cannot be spawned.
    pub fn execute(&mut self) -> Result<&mut Self> {
        assert!(
            !self.is_running(),
            "repeated start of `{}` before wait()",
            self.name
        );

        self.close_streams();

        let stdin = match self.chained_stdin.take() {
            Some(reader) => Stdio::from(reader),
            None => Stdio::piped(),
        };
        let stdout = match self.chained_stdout.take() {
            Some(writer) => Stdio::from(writer),
            None => Stdio::piped(),
        };

        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .stdin(stdin)
            .stdout(stdout)
            .stderr(Stdio::piped());

        // `command` owns the chained pipe ends and releases the parent's
        // copies when it goes out of scope
        let mut child = command
            .spawn()
            .with_context(|| format!("Failed to spawn `{}`", self.name))?;

        self.stdin = child.stdin.take();
        self.stdout = child.stdout.take();
        self.stderr = child.stderr.take();
        self.child = Some(child);

        Ok(self)
    }

    /// Wait for the child to exit and return its status.
    ///
    /// The parent's end of stdin is closed first so a child reading until
    /// EOF can terminate. Returns `None` when no child is running, which
    /// makes repeated calls harmless.
    ///
    /// # Errors
    /// Returns error if waiting on the child fails.
    pub fn wait(&mut self) -> Result<Option<ExitStatus>> {
        let Some(mut child) = self.child.take() else {
            return Ok(None);
        };

        drop(self.stdin.take());

        let status = child
            .wait()
            .with_context(|| format!("Failed to wait for `{}`", self.name))?;
        Ok(Some(status))
    }

    /// Writable end of the child's stdin (`None` if closed or chained).
    pub const fn stdin(&mut self) -> Option<&mut ChildStdin> {
        self.stdin.as_mut()
    }

    /// Readable end of the child's stdout (`None` if chained).
    pub const fn stdout(&mut self) -> Option<&mut ChildStdout> {
        self.stdout.as_mut()
    }

    /// Readable end of the child's stderr.
    pub const fn stderr(&mut self) -> Option<&mut ChildStderr> {
        self.stderr.as_mut()
    }

    /// Close stdin, signalling end of input to the child.
    pub fn close_stdin(&mut self) {
        drop(self.stdin.take());
    }

    /// Read the child's stdout until EOF.
    ///
    /// # Errors
    /// Returns error on read failure.
    pub fn read_stdout(&mut self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        let read = match self.stdout() {
            Some(out) => out.read_to_end(&mut buf).map(drop),
            None => Ok(()),
        };
        read.with_context(|| format!("Failed to read stdout of `{}`", self.name))?;
        Ok(buf)
    }

    /// Read the child's stderr until EOF.
    ///
    /// # Errors
    /// Returns error on read failure.
    pub fn read_stderr(&mut self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        let read = match self.stderr() {
            Some(err) => err.read_to_end(&mut buf).map(drop),
            None => Ok(()),
        };
        read.with_context(|| format!("Failed to read stderr of `{}`", self.name))?;
        Ok(buf)
    }

    fn close_streams(&mut self) {
        drop(self.stdin.take());
        drop(self.stdout.take());
        drop(self.stderr.take());
    }
}

impl Drop for Subprocess {
    fn drop(&mut self) {
        // Close pipes before reaping: a child blocked on a full stdout or
        // waiting for stdin EOF must be able to finish.
        self.close_streams();
        drop(self.chained_stdin.take());
        drop(self.chained_stdout.take());

        if !self.detached {
            let _ = self.wait();
        }
    }
}

// ============================================================================
// Chaining
// ============================================================================

/// Wire `source`'s stdout directly into `sink`'s stdin.
///
/// One OS pipe is created; its write end becomes `source`'s stdout and its
/// read end `sink`'s stdin on their next executions. The parent keeps no
/// copy of either end once both have been executed, so `sink` sees EOF when
/// `source` exits.
///
/// # Panics
/// Panics if either process is already running.
///
/// # Errors
/// Returns error if the pipe cannot be created.
#[allow(dead_code)] // Reserved API
pub fn chain(source: &mut Subprocess, sink: &mut Subprocess) -> Result<()> {
    assert!(
        !source.is_running() && !sink.is_running(),
        "chain `{}` -> `{}` must be set up before execute()",
        source.name,
        sink.name
    );

    let (reader, writer) = io::pipe().context("Failed to create pipe")?;
    source.chained_stdout = Some(writer);
    sink.chained_stdin = Some(reader);
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::io::Write;

    fn sh(script: &str) -> Subprocess {
        Subprocess::new("sh", ["-c", script])
    }

    #[test]
    fn test_accessors_follow_lifecycle() {
        let mut p = Subprocess::new("true", Vec::<String>::new());
        assert!(p.stdout().is_none() && p.stderr().is_none());

        p.execute().unwrap();
        assert!(p.stdin().is_some() && p.stdout().is_some() && p.stderr().is_some());
        p.wait().unwrap();
        assert!(p.stdin().is_none());

        // Output pipes stay readable until the next run or drop
        assert_eq!(p.read_stdout().unwrap(), b"");
    }

    #[test]
    fn test_capture_stdout() {
        let mut p = Subprocess::new("echo", ["hello"]);
        p.execute().unwrap();
        assert!(p.is_running());

        let out = p.read_stdout().unwrap();
        let status = p.wait().unwrap().unwrap();

        assert_eq!(out, b"hello\n");
        assert!(status.success());
        assert!(!p.is_running());
    }

    #[test]
    fn test_write_stdin_then_read() {
        let mut p = Subprocess::new("cat", Vec::<String>::new());
        p.execute().unwrap();
        p.stdin().unwrap().write_all(b"round trip").unwrap();
        p.close_stdin();
        assert!(p.stdin().is_none());

        assert_eq!(p.read_stdout().unwrap(), b"round trip");
        assert!(p.wait().unwrap().unwrap().success());
    }

    #[test]
    fn test_capture_stderr_and_exit_code() {
        let mut p = sh("echo oops >&2; exit 3");
        p.execute().unwrap();
        let err = p.read_stderr().unwrap();
        let status = p.wait().unwrap().unwrap();

        assert_eq!(err, b"oops\n");
        assert_eq!(status.code(), Some(3));
    }

    #[test]
    fn test_second_wait_is_noop() {
        let mut p = Subprocess::new("true", Vec::<String>::new());
        p.execute().unwrap();
        assert!(p.wait().unwrap().is_some());
        assert!(p.wait().unwrap().is_none());
        assert!(p.wait().unwrap().is_none());
    }

    #[test]
    fn test_restart_after_wait() {
        let mut p = Subprocess::new("cat", Vec::<String>::new());

        p.execute().unwrap();
        p.stdin().unwrap().write_all(b"first").unwrap();
        p.close_stdin();
        let first = p.read_stdout().unwrap();
        p.wait().unwrap();

        p.execute().unwrap();
        p.stdin().unwrap().write_all(b"second").unwrap();
        p.close_stdin();
        let second = p.read_stdout().unwrap();
        p.wait().unwrap();

        assert_eq!(first, b"first");
        assert_eq!(second, b"second");
    }

    #[test]
    #[should_panic(expected = "repeated start")]
    fn test_execute_while_running_panics() {
        let mut p = Subprocess::new("cat", Vec::<String>::new());
        p.execute().unwrap();
        // Drop during unwinding closes stdin, so `cat` exits and is reaped
        p.execute().unwrap();
    }

    #[test]
    fn test_spawn_failure_leaves_handle_idle() {
        let mut p = Subprocess::new("/nonexistent/mkweb-renderer", ["-v"]);
        let err = p.execute().err().unwrap();
        assert!(err.to_string().contains("Failed to spawn"));
        assert!(!p.is_running());
        assert!(p.wait().unwrap().is_none());
    }

    #[test]
    fn test_drop_reaps_running_child() {
        let mut p = Subprocess::new("cat", Vec::<String>::new());
        p.execute().unwrap();
        p.stdin().unwrap().write_all(b"unread").unwrap();
        // Must return: pipes are closed before the implicit wait
        drop(p);
    }

    #[test]
    fn test_detached_drop_does_not_block() {
        let mut p = sh("exit 0");
        p.execute().unwrap();
        p.detach();
        drop(p);
    }

    #[test]
    fn test_chain_bypasses_parent() {
        let mut producer = Subprocess::new("echo", ["chained"]);
        let mut consumer = Subprocess::new("cat", Vec::<String>::new());
        chain(&mut producer, &mut consumer).unwrap();

        producer.execute().unwrap();
        consumer.execute().unwrap();

        assert!(producer.stdout().is_none());
        assert!(consumer.stdin().is_none());

        let out = consumer.read_stdout().unwrap();
        assert!(producer.wait().unwrap().unwrap().success());
        assert!(consumer.wait().unwrap().unwrap().success());
        assert_eq!(out, b"chained\n");
    }

    #[test]
    fn test_chain_is_consumed_by_one_run() {
        let mut producer = Subprocess::new("echo", ["once"]);
        let mut consumer = Subprocess::new("cat", Vec::<String>::new());
        chain(&mut producer, &mut consumer).unwrap();

        consumer.execute().unwrap();
        producer.execute().unwrap();
        producer.wait().unwrap();
        assert_eq!(consumer.read_stdout().unwrap(), b"once\n");
        consumer.wait().unwrap();

        // Second run has its own stdout again
        producer.execute().unwrap();
        assert_eq!(producer.read_stdout().unwrap(), b"once\n");
        producer.wait().unwrap();
    }

    #[test]
    #[should_panic(expected = "must be set up before execute")]
    fn test_chain_running_process_panics() {
        let mut producer = Subprocess::new("true", Vec::<String>::new());
        let mut consumer = Subprocess::new("cat", Vec::<String>::new());
        producer.execute().unwrap();
        chain(&mut producer, &mut consumer).unwrap();
    }
}
