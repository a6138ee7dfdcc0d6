use crate::command::{ExitCode, ProcessRunner};
use anyhow::{Context, Result};
use log::debug;
use std::process::{Command, ExitStatus};

/// Runs programs as real child processes.
///
/// Standard streams are inherited, so the child talks to the same terminal as
/// the launcher. The call blocks until the child terminates.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(&self, program: &str, args: &[String]) -> Result<ExitCode> {
        let mut child = Command::new(program)
            .args(args)
            .spawn()
            .with_context(|| format!("failed to start {}", program))?;
        debug!("started {} with pid {}", program, child.id());

        let exit_status = child
            .wait()
            .with_context(|| format!("failed to wait for {}", program))?;
        debug!("{} exited with {}", program, exit_status);

        match exit_status.code() {
            Some(x) => Ok(x),
            None => Ok(terminated_by_signal(exit_status)),
        }
    }
}

#[cfg(unix)]
fn terminated_by_signal(exit_status: ExitStatus) -> ExitCode {
    use std::os::unix::process::ExitStatusExt;
    if let Some(signal) = exit_status.signal() {
        128 + signal
    } else if exit_status.core_dumped() {
        255
    } else {
        -1
    }
}

#[cfg(not(unix))]
fn terminated_by_signal(_exit_status: ExitStatus) -> ExitCode {
    -1
}
