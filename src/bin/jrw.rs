#![allow(clippy::print_stderr)]

use anyhow::Result;
use clap::Parser;
use std::io::IsTerminal;

use jrw::cli::args::CliArgs;
use jrw::cli::driver;
use jrw::cli::reporter::Reporter;

const EXIT_SUCCESS: i32 = 0;
const EXIT_FAILURE: i32 = 1;

fn run() -> Result<()> {
    let args = CliArgs::parse();
    let result = driver::run(&args)?;
    let reporter = Reporter::new(std::io::stdout().is_terminal());
    print!("{}", reporter.render(&result));
    Ok(())
}

fn main() {
    // Only installs a subscriber when JRW_LOG or RUST_LOG is set.
    jrw::tracing_config::init_tracing();

    if let Err(err) = run() {
        eprintln!("error: {err:#}");
        std::process::exit(EXIT_FAILURE);
    }
    std::process::exit(EXIT_SUCCESS);
}
