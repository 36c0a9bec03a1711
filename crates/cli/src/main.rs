use std::process::ExitCode;

fn main() -> ExitCode {
    retention_cli::run()
}
