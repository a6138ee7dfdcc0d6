use anyhow::Result;
use std::io::Write;

/// Conventional process exit code type used by this crate.
///
/// A value of 0 indicates success. Anything else is whatever the child process
/// reported, or [`FAILURE_EXIT_CODE`] when the launcher itself failed.
pub type ExitCode = i32;

/// Exit code reported when the launcher fails before or while running the child.
pub const FAILURE_EXIT_CODE: ExitCode = -1;

/// Object-safe trait for anything that can start a program and wait for it.
///
/// The launcher only ever starts a single process per invocation, so the
/// contract is deliberately narrow: run `program` with `args`, block until it
/// terminates and report its exit code.
pub trait ProcessRunner {
    /// Start `program` with `args` and wait for it to exit.
    ///
    /// Standard streams are expected to be inherited from the current process.
    fn run(&self, program: &str, args: &[String]) -> Result<ExitCode>;
}

/// Turn the outcome of an invocation into the process exit code.
///
/// Errors are written once to `stderr`, with their context chain, and yield
/// [`FAILURE_EXIT_CODE`]. Exit codes of the child are returned unchanged.
pub fn exit_code(res: Result<ExitCode>, stderr: &mut dyn Write) -> ExitCode {
    match res {
        Ok(code) => code,
        Err(err) => {
            // nothing left to report to if stderr itself is broken
            let _ = writeln!(stderr, "{:#}", err);
            FAILURE_EXIT_CODE
        }
    }
}
