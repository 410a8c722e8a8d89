use std::process::ExitCode;

fn main() -> ExitCode {
    linkgrid_cli::run()
}
