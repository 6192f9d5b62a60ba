use std::fs;
use std::path::{Path, PathBuf};

use l10n_gen_core::{LanguageTag, LanguageTagError};
use regex::Regex;
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct LocalizationFile {
    pub path: PathBuf,
    pub filename: String,
    pub name: String,
    pub lang: LanguageTag,
    pub ext: String,
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid pattern {pattern:?}: {source}")]
    Pattern {
        pattern: String,
        source: regex::Error,
    },
    #[error("invalid pattern {pattern:?}: expected 3 capture groups (name, language, extension)")]
    PatternGroups { pattern: String },
    #[error("invalid filename {filename:?}: doesn't match the pattern")]
    FilenameMismatch { filename: String },
    #[error("invalid language {value:?}: {source}")]
    Language {
        value: String,
        source: LanguageTagError,
    },
}

pub fn find_localization_files(
    dir: &Path,
    pattern: &str,
) -> Result<Vec<LocalizationFile>, SourceError> {
    let regex = Regex::new(pattern).map_err(|source| SourceError::Pattern {
        pattern: pattern.to_string(),
        source,
    })?;
    // Whole match plus three groups.
    if regex.captures_len() != 4 {
        return Err(SourceError::PatternGroups {
            pattern: pattern.to_string(),
        });
    }

    let mut entries = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.path().is_dir() {
            continue;
        }
        entries.push(entry.path());
    }
    entries.sort();

    let mut files = Vec::with_capacity(entries.len());
    for path in entries {
        let filename = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default()
            .to_string();

        let Some(captures) = regex.captures(&filename) else {
            return Err(SourceError::FilenameMismatch { filename });
        };

        let name = capture(&captures, 1);
        let lang_text = capture(&captures, 2);
        let ext = capture(&captures, 3);

        let lang = LanguageTag::parse(&lang_text).map_err(|source| SourceError::Language {
            value: lang_text.clone(),
            source,
        })?;

        files.push(LocalizationFile {
            path,
            filename,
            name,
            lang,
            ext,
        });
    }

    Ok(files)
}

fn capture(captures: &regex::Captures<'_>, group: usize) -> String {
    captures
        .get(group)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}
