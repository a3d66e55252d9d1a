use std::process::ExitCode;

fn main() -> ExitCode {
    gopherdoc::cli::run()
}
