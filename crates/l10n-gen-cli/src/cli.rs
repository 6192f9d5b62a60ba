use std::path::PathBuf;

use thiserror::Error;

use crate::compile::{run_compile, CompileError, CompileOptions};

const DEFAULT_PATTERN: &str = r"([a-z_]+)\.([a-z_]+)\.(yaml|yml|json|toml)";

#[derive(Debug, Error)]
pub enum CliAppError {
    #[error("{0}")]
    Usage(String),
    #[error(transparent)]
    Compile(#[from] CompileError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum CliCommand {
    Compile(CompileOptions),
    Version,
}

pub fn run() -> Result<(), CliAppError> {
    match parse_command(std::env::args().skip(1).collect())? {
        CliCommand::Compile(options) => {
            run_compile(&options)?;
            Ok(())
        }
        CliCommand::Version => {
            println!("l10n-gen {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn parse_command(args: Vec<String>) -> Result<CliCommand, CliAppError> {
    let mut dir = None;
    let mut out_dir = None;
    let mut pattern = DEFAULT_PATTERN.to_string();
    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--dir" | "-d" => dir = Some(PathBuf::from(next_value("--dir", &mut iter)?)),
            "--out" | "-o" => out_dir = Some(PathBuf::from(next_value("--out", &mut iter)?)),
            "--pattern" | "-p" => pattern = next_value("--pattern", &mut iter)?,
            "--version" | "-v" => return Ok(CliCommand::Version),
            "--help" | "-h" => return Err(CliAppError::Usage(usage())),
            _ => return Err(CliAppError::Usage(usage())),
        }
    }

    let dir = dir.ok_or_else(|| CliAppError::Usage(usage()))?;
    let out_dir = out_dir.ok_or_else(|| CliAppError::Usage(usage()))?;

    Ok(CliCommand::Compile(CompileOptions {
        dir,
        out_dir,
        pattern,
    }))
}

fn next_value(flag: &str, iter: &mut impl Iterator<Item = String>) -> Result<String, CliAppError> {
    iter.next()
        .ok_or_else(|| CliAppError::Usage(format!("{flag} requires a value\n\n{}", usage())))
}

fn usage() -> String {
    format!(
        "usage: l10n-gen --dir <dir> --out <dir> [--pattern <regexp>]\n\n\
         Compiles localization files into Rust message accessors.\n\n\
         options:\n  \
         -d, --dir <dir>         directory with localization files\n  \
         -o, --out <dir>         output directory for generated sources\n  \
         -p, --pattern <regexp>  localization filename pattern (default: {DEFAULT_PATTERN})\n  \
         -v, --version           print version number\n  \
         -h, --help              show this help"
    )
}
