use anyhow::{Context, Result};
use line_shell::Shell;
use line_shell::config::{Args, ShellConfig};
use line_shell::io_adapters::{CrlfWriter, RawModeGuard};

fn main() -> Result<()> {
    let args: Args = argh::from_env();
    let config = ShellConfig::try_from(args)?;
    line_shell::logging::init(&config)?;
    tracing::info!(?config, "starting shell");

    let mut shell = Shell::new(&config)?;

    let _raw = if config.raw_mode {
        Some(RawModeGuard::enable().context("can't switch terminal to raw mode")?)
    } else {
        None
    };

    let mut out = CrlfWriter::new(std::io::stdout().lock());
    shell.run(std::io::stdin().lock(), &mut out)?;
    Ok(())
}
