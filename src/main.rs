use anyhow::Result;
use ib::{Environment, ExitCode, IbOptions, Launcher, SystemRunner, exit_code};
use log::debug;

fn run() -> Result<ExitCode> {
    let options = IbOptions::from_os_args("ib", std::env::args_os().skip(1))?;
    debug!("parsed options: {:?}", options);

    let launcher = Launcher::new(Environment::new()?, Box::new(SystemRunner));
    launcher.run(&options, &mut std::io::stdout())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let code = exit_code(run(), &mut std::io::stderr());
    std::process::exit(code)
}
