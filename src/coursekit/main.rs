//! The `coursekit` binary only hands control to [`cli::run`] and turns its
//! result into an exit code. See the library docs for the architecture.

mod cli;

fn main() {
    std::process::exit(cli::run());
}
