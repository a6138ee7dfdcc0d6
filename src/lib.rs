//! A small launcher for the Invoke-Build PowerShell script.
//!
//! The launcher consumes a handful of leading flags, resolves the location of
//! `Invoke-Build.ps1` relative to its own executable and starts PowerShell with a
//! command line that forwards the remaining arguments. The exit code of the child
//! process becomes the exit code of the launcher.
//!
//! The main entry point is [`Launcher`], which is driven by [`IbOptions`] and an
//! [`Environment`]. Process creation goes through the [`ProcessRunner`] trait so the
//! launcher can be exercised without spawning real shells.

pub mod command;
pub mod env;
mod escape;
mod external;
mod launcher;
mod options;

pub use command::{ExitCode, FAILURE_EXIT_CODE, ProcessRunner, exit_code};
pub use env::{Environment, Platform};
pub use escape::escape_argument;
pub use external::SystemRunner;
pub use launcher::{HELP_TEXT, Launcher, build_arguments};
pub use options::IbOptions;
