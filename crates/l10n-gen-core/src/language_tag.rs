use core::fmt;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LanguageTagError {
    #[error("language tag is empty")]
    Empty,
    #[error("language tag has empty subtag")]
    EmptySubtag,
    #[error("invalid language subtag {value:?}")]
    InvalidSubtag { value: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LanguageTag {
    original: String,
    normalized: String,
}

impl LanguageTag {
    pub fn parse(input: &str) -> Result<Self, LanguageTagError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(LanguageTagError::Empty);
        }

        let subtags: Vec<&str> = trimmed.split('-').collect();
        if subtags.iter().any(|part| part.is_empty()) {
            return Err(LanguageTagError::EmptySubtag);
        }

        let mut normalized_parts = Vec::with_capacity(subtags.len());
        let mut script_seen = false;
        let mut region_seen = false;

        for (idx, part) in subtags.iter().enumerate() {
            if idx == 0 {
                if !is_alpha(part) || !(2..=8).contains(&part.len()) {
                    return Err(LanguageTagError::InvalidSubtag {
                        value: part.to_string(),
                    });
                }
                normalized_parts.push(part.to_ascii_lowercase());
                continue;
            }

            // Singletons start extension/private-use sequences; everything
            // from there on keeps lowercase.
            if part.len() == 1 {
                script_seen = true;
                region_seen = true;
                normalized_parts.push(part.to_ascii_lowercase());
                continue;
            }

            let normalized = if !script_seen && part.len() == 4 && is_alpha(part) {
                script_seen = true;
                titlecase(part)
            } else if !region_seen && is_region(part) {
                region_seen = true;
                part.to_ascii_uppercase()
            } else {
                part.to_ascii_lowercase()
            };
            normalized_parts.push(normalized);
        }

        Ok(Self {
            original: trimmed.to_string(),
            normalized: normalized_parts.join("-"),
        })
    }

    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn normalized(&self) -> &str {
        &self.normalized
    }
}

impl fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.normalized)
    }
}

fn is_alpha(value: &str) -> bool {
    value.chars().all(|ch| ch.is_ascii_alphabetic())
}

fn is_region(value: &str) -> bool {
    (value.len() == 2 && is_alpha(value))
        || (value.len() == 3 && value.chars().all(|ch| ch.is_ascii_digit()))
}

fn titlecase(value: &str) -> String {
    let mut chars = value.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let mut output = String::with_capacity(value.len());
    output.push(first.to_ascii_uppercase());
    for ch in chars {
        output.push(ch.to_ascii_lowercase());
    }
    output
}
