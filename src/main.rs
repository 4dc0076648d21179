use std::process::ExitCode;

fn main() -> ExitCode {
    stylegen::cli::run()
}
