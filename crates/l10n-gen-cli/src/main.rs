#![forbid(unsafe_code)]

mod cli;
mod codegen;
mod compile;
mod decode;
mod source;
mod sources;

use std::process::ExitCode;

fn main() -> ExitCode {
    match cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
