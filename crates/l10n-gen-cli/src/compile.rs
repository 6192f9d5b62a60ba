use std::fs;
use std::path::PathBuf;

use l10n_gen_core::{
    resolve_messages, unmarshal_messages, LocalizationError, LocalizationSet, ResolveError,
    SpecifierTable, UnmarshalError,
};
use thiserror::Error;

use crate::codegen::generate_localizations;
use crate::decode::{decode_messages, DecodeError};
use crate::sources::{find_localization_files, SourceError};

#[derive(Debug, Error)]
pub enum CompileError {
    #[error(transparent)]
    Sources(#[from] SourceError),
    #[error("could not read file {filename:?}: {source}")]
    Read {
        filename: String,
        source: std::io::Error,
    },
    #[error("could not decode file {filename:?}: {source}")]
    Decode {
        filename: String,
        source: DecodeError,
    },
    #[error("could not unmarshal file {filename:?}: {source}")]
    Unmarshal {
        filename: String,
        source: UnmarshalError,
    },
    #[error("could not resolve file {filename:?}: {source}")]
    Resolve {
        filename: String,
        source: ResolveError,
    },
    #[error(transparent)]
    Localization(#[from] LocalizationError),
    #[error("could not write file {filename:?}: {source}")]
    Write {
        filename: String,
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileOptions {
    pub dir: PathBuf,
    pub out_dir: PathBuf,
    pub pattern: String,
}

pub fn run_compile(options: &CompileOptions) -> Result<(), CompileError> {
    let table = SpecifierTable::default();
    let files = find_localization_files(&options.dir, &options.pattern)?;

    let mut set = LocalizationSet::new();
    for file in files {
        let contents = fs::read_to_string(&file.path).map_err(|source| CompileError::Read {
            filename: file.filename.clone(),
            source,
        })?;
        let entries =
            decode_messages(&file.ext, &contents).map_err(|source| CompileError::Decode {
                filename: file.filename.clone(),
                source,
            })?;
        let messages =
            unmarshal_messages(&entries, &table).map_err(|source| CompileError::Unmarshal {
                filename: file.filename.clone(),
                source,
            })?;
        let scopes =
            resolve_messages(messages, &table).map_err(|source| CompileError::Resolve {
                filename: file.filename.clone(),
                source,
            })?;
        set.add(&file.name, file.lang, scopes)?;
    }

    let localizations = set.finish()?;
    let generated = generate_localizations(&localizations);

    fs::create_dir_all(&options.out_dir).map_err(|source| CompileError::Write {
        filename: options.out_dir.display().to_string(),
        source,
    })?;
    for file in generated {
        fs::write(options.out_dir.join(&file.filename), &file.contents).map_err(|source| {
            CompileError::Write {
                filename: file.filename.clone(),
                source,
            }
        })?;
    }

    Ok(())
}
