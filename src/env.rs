use anyhow::{Context, Result, anyhow};
use std::env as stdenv;
use std::path::PathBuf;

/// Operating system family, as far as the choice of shell is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// Windows PowerShell (`powershell`) is expected to be installed.
    Windows,
    /// Only PowerShell Core (`pwsh`) can be assumed.
    Other,
}

impl Platform {
    /// Platform the launcher was compiled for.
    pub fn current() -> Self {
        if cfg!(windows) {
            Platform::Windows
        } else {
            Platform::Other
        }
    }
}

/// Ambient inputs of the launcher.
///
/// The launcher never reads the platform or its own location directly; it
/// goes through this value so tests can pretend to run anywhere.
#[derive(Debug, Clone)]
pub struct Environment {
    /// Platform used to pick the default shell.
    pub platform: Platform,
    /// Directory containing the running executable.
    pub exe_dir: PathBuf,
}

impl Environment {
    /// Capture the platform and the executable location of the current process.
    pub fn new() -> Result<Self> {
        let exe = stdenv::current_exe().context("can't locate the running executable")?;
        let exe_dir = exe
            .parent()
            .ok_or_else(|| anyhow!("executable path {} has no parent", exe.display()))?
            .to_path_buf();
        Ok(Self {
            platform: Platform::current(),
            exe_dir,
        })
    }
}
