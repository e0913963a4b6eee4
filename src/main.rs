use clap::Parser;
use portview::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
