// src/main.rs

use std::process::ExitCode;

fn main() -> ExitCode {
    path_indexer::commands::run_cli()
}
