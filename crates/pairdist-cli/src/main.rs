use std::process::ExitCode;

mod command;
mod summary;
mod util;

fn main() -> anyhow::Result<ExitCode> {
    command::run()
}
