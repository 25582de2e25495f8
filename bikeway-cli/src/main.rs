//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

use bikeway_cli::CliError;

#[expect(
    clippy::print_stderr,
    reason = "the entry point reports fatal errors on stderr"
)]
fn main() {
    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Stderr)
        .init();

    match bikeway_cli::run() {
        Ok(()) => {}
        Err(CliError::ArgumentParsing(err)) => err.exit(),
        Err(err) => {
            eprintln!("bikeway: {err}");
            std::process::exit(1);
        }
    }
}
