//! Process execution utilities
//!
//! Runs one external command at a time, relaying its combined
//! stdout/stderr to a caller-supplied sink line by line.

use crate::error::{ProvisionError, Result};
use std::ffi::OsStr;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};
use tracing::{debug, info, instrument, warn};

/// Utility for running external processes
#[derive(Debug)]
pub struct ProcessRunner {
    debug: bool,
}

impl ProcessRunner {
    /// Create a new process runner
    #[must_use]
    pub const fn new(debug: bool) -> Self {
        Self { debug }
    }

    /// Resolve a program name to an absolute path using PATH
    #[instrument(skip(self))]
    pub fn locate(&self, program: &str) -> Result<PathBuf> {
        match which::which(program) {
            Ok(path) => {
                debug!("Resolved '{}' to {}", program, path.display());
                Ok(path)
            }
            Err(e) => {
                warn!("Could not locate '{}': {}", program, e);
                Err(ProvisionError::tool_not_found(program, Some(e)))
            }
        }
    }

    /// Run `program args...` inside `dir`, relaying merged output to `out`.
    ///
    /// `label` is the human-readable command line used in logs and errors
    /// (e.g. `terraform init`), independent of how `program` was resolved.
    /// Each line is written and flushed as soon as the child produces it.
    #[instrument(skip(self, program, dir, out), fields(dir = %dir.display()))]
    pub fn stream_command<W: Write>(
        &self,
        label: &str,
        program: impl AsRef<OsStr>,
        args: &[&str],
        dir: &Path,
        out: &mut W,
    ) -> Result<()> {
        let program = program.as_ref();

        if self.debug {
            debug!("Running command: {:?} {:?} in {}", program, args, dir.display());
        } else {
            info!("+ {}", label);
        }

        // stderr and stdout share one pipe so their relative order survives.
        let (reader, writer) =
            io::pipe().map_err(|e| ProvisionError::unexpected("creating output pipe", e))?;
        let writer_err = writer
            .try_clone()
            .map_err(|e| ProvisionError::unexpected("duplicating output pipe", e))?;

        let mut cmd = Command::new(program);
        cmd.args(args)
            .current_dir(dir)
            .stdin(Stdio::inherit())
            .stdout(writer)
            .stderr(writer_err);

        let mut child = cmd.spawn().map_err(|e| match e.kind() {
            io::ErrorKind::NotFound if !dir.is_dir() => {
                ProvisionError::directory_not_found(dir)
            }
            io::ErrorKind::NotFound => {
                ProvisionError::tool_not_found(program.to_string_lossy(), None)
            }
            _ => ProvisionError::unexpected(format!("failed to start '{label}'"), e),
        })?;

        // The Command still owns our copies of the write ends; the reader
        // only sees EOF once they are closed.
        drop(cmd);

        let lines = relay_lines(BufReader::new(reader), out)
            .map_err(|e| ProvisionError::unexpected(format!("relaying output of '{label}'"), e))?;

        let status = child
            .wait()
            .map_err(|e| ProvisionError::unexpected(format!("waiting for '{label}'"), e))?;

        debug!(
            "Command finished: success={}, exit_code={:?}, lines={}",
            status.success(),
            status.code(),
            lines
        );

        if !status.success() {
            return Err(ProvisionError::command_failed(label, exit_code_of(status)));
        }

        Ok(())
    }
}

impl Default for ProcessRunner {
    fn default() -> Self {
        Self::new(false)
    }
}

/// Exit code of a finished child; a child killed by signal N reports -N.
fn exit_code_of(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return -signal;
        }
    }

    -1
}

/// Copy `reader` to `out` one line at a time, flushing after each line.
///
/// Invalid UTF-8 is replaced rather than treated as an error. Returns the
/// number of lines relayed.
fn relay_lines<R: BufRead, W: Write>(mut reader: R, out: &mut W) -> io::Result<usize> {
    let mut buf = Vec::new();
    let mut count = 0;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        out.write_all(String::from_utf8_lossy(&buf).as_bytes())?;
        out.flush()?;
        count += 1;
    }

    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};
    use tempfile::TempDir;

    fn run_sh(script: &str, dir: &Path) -> (Result<()>, String) {
        let runner = ProcessRunner::new(false);
        let mut out = Vec::new();
        let result = runner.stream_command("sh -c", "sh", &["-c", script], dir, &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_process_runner_creation() {
        let runner = ProcessRunner::new(true);
        assert!(runner.debug);

        let runner = ProcessRunner::default();
        assert!(!runner.debug);
    }

    #[test]
    fn test_relay_lines_keeps_order_and_partial_tail() {
        let input = b"first\nsecond\nno newline".as_slice();
        let mut out = Vec::new();
        let count = relay_lines(input, &mut out).unwrap();

        assert_eq!(count, 3);
        assert_eq!(out, b"first\nsecond\nno newline");
    }

    #[test]
    fn test_relay_lines_replaces_invalid_utf8() {
        let input = b"ok\n\xff\xfe\n".as_slice();
        let mut out = Vec::new();
        relay_lines(input, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("ok\n"));
        assert!(text.contains('\u{FFFD}'));
    }

    #[cfg(unix)]
    #[test]
    fn test_stream_command_merges_stderr_in_order() {
        let dir = TempDir::new().unwrap();
        let (result, out) = run_sh("echo one; echo two 1>&2; echo three", dir.path());

        assert!(result.is_ok());
        assert_eq!(out, "one\ntwo\nthree\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_stream_command_uses_working_directory() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("main.tf"), "").unwrap();

        let (result, out) = run_sh("ls", dir.path());

        assert!(result.is_ok());
        assert_eq!(out.trim(), "main.tf");
    }

    #[cfg(unix)]
    #[test]
    fn test_stream_command_reports_exit_code() {
        let dir = TempDir::new().unwrap();
        let (result, out) = run_sh("echo partial; exit 3", dir.path());

        assert_eq!(out, "partial\n");
        match result {
            Err(ProvisionError::CommandFailed { command, exit_code }) => {
                assert_eq!(command, "sh -c");
                assert_eq!(exit_code, 3);
            }
            other => panic!("Expected CommandFailed, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_stream_command_reports_signal_as_negative_code() {
        let dir = TempDir::new().unwrap();
        let (result, _) = run_sh("kill -9 $$", dir.path());

        match result {
            Err(ProvisionError::CommandFailed { exit_code, .. }) => assert_eq!(exit_code, -9),
            other => panic!("Expected CommandFailed, got {other:?}"),
        }
    }

    /// Sink recording the elapsed time and bytes written at every flush
    struct FlushLog {
        start: Instant,
        pending: usize,
        flushes: Vec<(Duration, usize)>,
    }

    impl Write for FlushLog {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.pending += buf.len();
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            if self.pending > 0 {
                self.flushes.push((self.start.elapsed(), self.pending));
                self.pending = 0;
            }
            Ok(())
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_stream_command_flushes_each_line_as_produced() {
        let dir = TempDir::new().unwrap();
        let runner = ProcessRunner::default();
        let mut sink = FlushLog {
            start: Instant::now(),
            pending: 0,
            flushes: Vec::new(),
        };

        runner
            .stream_command(
                "sh -c",
                "sh",
                &["-c", "echo a; sleep 1; echo b"],
                dir.path(),
                &mut sink,
            )
            .unwrap();
        let total = sink.start.elapsed();

        assert_eq!(sink.flushes.len(), 2);
        assert_eq!(sink.flushes[0].1, 2);
        assert_eq!(sink.flushes[1].1, 2);
        assert!(total >= Duration::from_secs(1));
        assert!(
            sink.flushes[0].0 < Duration::from_millis(500),
            "first line flushed after {:?}",
            sink.flushes[0].0
        );
        assert!(sink.flushes[1].0 >= Duration::from_millis(900));
    }

    #[test]
    fn test_stream_command_missing_program() {
        let dir = TempDir::new().unwrap();
        let runner = ProcessRunner::default();
        let mut out = Vec::new();

        let result = runner.stream_command(
            "nonexistent_command_12345 init",
            "nonexistent_command_12345",
            &["init"],
            dir.path(),
            &mut out,
        );

        assert!(matches!(result, Err(ProvisionError::ToolNotFound { .. })));
        assert!(out.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_stream_command_missing_directory() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("gone");
        let (result, _) = run_sh("true", &missing);

        assert!(matches!(result, Err(ProvisionError::DirectoryNotFound { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_locate() {
        let runner = ProcessRunner::default();

        assert!(runner.locate("sh").unwrap().is_absolute());
        assert!(matches!(
            runner.locate("nonexistent_command_12345"),
            Err(ProvisionError::ToolNotFound { .. })
        ));
    }
}
