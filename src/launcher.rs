use crate::command::{ExitCode, ProcessRunner};
use crate::env::{Environment, Platform};
use crate::escape::escape_argument;
use crate::options::IbOptions;
use anyhow::{Context, Result, anyhow};
use clean_path::Clean;
use log::debug;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Text printed for `ib -h` and `ib --help`.
pub const HELP_TEXT: &str = r"The following commands and options are supported:

- Show this help
  ib -h|--help

- Show command help
  ib -h|--help task|exec|assert|...

- Show Invoke-Build help
  ib -?
  ib /?

- Call Invoke-Build with arguments
  ib [--pwsh] [arguments]

    --pwsh
      On Windows tells to run by pwsh (the default is powershell).
      On other platforms pwsh is used and required in any case.
";

const DEFAULT_SHELL: &str = "powershell";
const ALTERNATE_SHELL: &str = "pwsh";

/// Location of the script relative to the directory of the executable.
const SCRIPT_RELATIVE_PATH: &str = "../../../InvokeBuild/Invoke-Build.ps1";

/// Starts PowerShell with Invoke-Build according to the parsed options.
///
/// Example
/// ```no_run
/// use ib::{Environment, IbOptions, Launcher, SystemRunner};
/// let launcher = Launcher::new(Environment::new()?, Box::new(SystemRunner));
/// let options = IbOptions::parse(["Build"]);
/// let code = launcher.run(&options, &mut std::io::stdout())?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub struct Launcher {
    env: Environment,
    runner: Box<dyn ProcessRunner>,
}

impl Launcher {
    /// Create a launcher that starts processes through `runner`.
    pub fn new(env: Environment, runner: Box<dyn ProcessRunner>) -> Self {
        Self { env, runner }
    }

    /// Handle one invocation.
    ///
    /// Help without a topic is written to `stdout` and yields 0 without
    /// starting anything. Every other case starts exactly one shell, waits for
    /// it and returns its exit code.
    pub fn run(&self, options: &IbOptions, stdout: &mut dyn Write) -> Result<ExitCode> {
        if options.show_help() && options.help_topic().is_none() {
            writeln!(stdout, "{}", HELP_TEXT)?;
            return Ok(0);
        }

        let shell = self.select_shell(options);
        let script = self.script_path()?;
        debug!("using {} to run {}", shell, script.display());

        let script = script
            .to_str()
            .ok_or_else(|| anyhow!("script path {} is not valid unicode", script.display()))?;
        let args = build_arguments(options, script);
        debug!("command line: {} {:?}", shell, args);

        self.runner.run(shell, &args)
    }

    /// `powershell` only when running on Windows without `--pwsh`.
    pub fn select_shell(&self, options: &IbOptions) -> &'static str {
        if options.use_pwsh() || self.env.platform != Platform::Windows {
            ALTERNATE_SHELL
        } else {
            DEFAULT_SHELL
        }
    }

    /// Absolute, normalized path of `Invoke-Build.ps1`.
    ///
    /// The file is not required to exist; PowerShell reports a missing script.
    pub fn script_path(&self) -> Result<PathBuf> {
        resolve_script(&self.env.exe_dir)
    }
}

fn resolve_script(exe_dir: &Path) -> Result<PathBuf> {
    let joined = exe_dir.join(SCRIPT_RELATIVE_PATH);
    let absolute = std::path::absolute(&joined)
        .with_context(|| format!("can't make {} absolute", joined.display()))?;
    Ok(absolute.clean())
}

/// Shell arguments for the given options and unescaped script path.
pub fn build_arguments(options: &IbOptions, script: &str) -> Vec<String> {
    let script = escape_argument(script);
    let mut args: Vec<String> = ["-NoProfile", "-ExecutionPolicy", "Bypass", "-Command"]
        .into_iter()
        .map(String::from)
        .collect();

    if options.show_help() {
        // dot-source first so Get-Help sees the script's commands
        args.push(".".to_string());
        args.push(script.into_owned());
        args.push(";".to_string());
        args.push("Get-Help".to_string());
        args.push("-Full".to_string());
        args.extend(options.help_topic().map(String::from));
    } else if options.show_main_help() {
        args.push("Get-Help".to_string());
        args.push("-Full".to_string());
        args.push(script.into_owned());
    } else {
        args.push("&".to_string());
        args.push(script.into_owned());
        args.extend(
            options
                .arguments()
                .iter()
                .map(|arg| escape_argument(arg).into_owned()),
        );
    }
    args
}
