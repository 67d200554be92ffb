use std::process::ExitCode;

fn main() -> anyhow::Result<ExitCode> {
    let matches = artifex_cli::build_cli().get_matches();
    artifex_cli::run(&matches)
}
