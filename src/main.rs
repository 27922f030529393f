//! Realm - Command-line tool for inspecting, painting and rendering world maps

use std::process::ExitCode;

use realmgrid::cli;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();
    cli::run()
}
