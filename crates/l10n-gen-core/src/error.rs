use core::fmt;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expected {
    Chars(Vec<char>),
    Strs(Vec<&'static str>),
}

impl Expected {
    pub fn chars(chars: impl IntoIterator<Item = char>) -> Self {
        Self::Chars(chars.into_iter().collect())
    }

    pub fn strs(strs: impl IntoIterator<Item = &'static str>) -> Self {
        Self::Strs(strs.into_iter().collect())
    }
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expected::Chars(chars) => {
                if chars.len() > 1 {
                    write!(f, "any of ")?;
                }
                for (idx, ch) in chars.iter().enumerate() {
                    if idx != 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{ch:?}")?;
                }
                Ok(())
            }
            Expected::Strs(strs) => {
                if strs.len() > 1 {
                    write!(f, "any of ")?;
                }
                for (idx, value) in strs.iter().enumerate() {
                    if idx != 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{value:?}")?;
                }
                Ok(())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unexpected end of format at position {pos}, expected {expected}")]
    UnexpectedEnd { pos: usize, expected: Expected },
    #[error("unexpected char {ch:?} at position {pos}, expected {expected}")]
    UnexpectedChar {
        ch: char,
        pos: usize,
        expected: Expected,
    },
    #[error("no closing bracket at position {pos}")]
    NoClosingBracket { pos: usize },
    #[error("invalid width {value:?} at position {pos}")]
    InvalidWidth { value: String, pos: usize },
    #[error("invalid precision {value:?} at position {pos}")]
    InvalidPrecision { value: String, pos: usize },
    #[error("invalid specifier {ch:?} at position {pos}")]
    InvalidSpecifier { ch: char, pos: usize },
    #[error("unexpected text at position {pos}")]
    UnexpectedText { pos: usize },
    #[error("no argument name at position {pos}")]
    NoArgumentName { pos: usize },
    #[error("invalid argument name {name:?} at position {pos}")]
    InvalidArgumentName { name: String, pos: usize },
    #[error("no variable name at position {pos}")]
    NoVariableName { pos: usize },
    #[error("invalid variable name {name:?} at position {pos}")]
    InvalidVariableName { name: String, pos: usize },
}

impl ParseError {
    pub fn position(&self) -> usize {
        match self {
            ParseError::UnexpectedEnd { pos, .. }
            | ParseError::UnexpectedChar { pos, .. }
            | ParseError::NoClosingBracket { pos }
            | ParseError::InvalidWidth { pos, .. }
            | ParseError::InvalidPrecision { pos, .. }
            | ParseError::InvalidSpecifier { pos, .. }
            | ParseError::UnexpectedText { pos }
            | ParseError::NoArgumentName { pos }
            | ParseError::InvalidArgumentName { pos, .. }
            | ParseError::NoVariableName { pos }
            | ParseError::InvalidVariableName { pos, .. } => *pos,
        }
    }

    pub(crate) fn at_offset(mut self, offset: usize) -> Self {
        match &mut self {
            ParseError::UnexpectedEnd { pos, .. }
            | ParseError::UnexpectedChar { pos, .. }
            | ParseError::NoClosingBracket { pos }
            | ParseError::InvalidWidth { pos, .. }
            | ParseError::InvalidPrecision { pos, .. }
            | ParseError::InvalidSpecifier { pos, .. }
            | ParseError::UnexpectedText { pos }
            | ParseError::NoArgumentName { pos }
            | ParseError::InvalidArgumentName { pos, .. }
            | ParseError::NoVariableName { pos }
            | ParseError::InvalidVariableName { pos, .. } => *pos += offset,
        }
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("could not unmarshal {path}: {kind}")]
pub struct UnmarshalError {
    pub path: String,
    pub kind: UnmarshalErrorKind,
}

impl UnmarshalError {
    pub(crate) fn new(field: impl Into<String>, kind: UnmarshalErrorKind) -> Self {
        Self {
            path: field.into(),
            kind,
        }
    }

    pub(crate) fn in_field(mut self, field: &str) -> Self {
        self.path = format!("{field}.{}", self.path);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnmarshalErrorKind {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("invalid field type {found}, expected {expected}")]
    InvalidFieldType {
        found: &'static str,
        expected: Expected,
    },
    #[error("unknown field, expected {expected}")]
    UnknownField { expected: Expected },
    #[error("no argument name")]
    NoArgumentName,
    #[error("invalid argument name {name:?}")]
    InvalidArgumentName { name: String },
    #[error("no variable name")]
    NoVariableName,
    #[error("invalid variable name {name:?}")]
    InvalidVariableName { name: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("could not resolve {path}: {kind}")]
pub struct ResolveError {
    pub path: String,
    pub kind: ResolveErrorKind,
}

impl ResolveError {
    pub(crate) fn new(field: impl Into<String>, kind: ResolveErrorKind) -> Self {
        Self {
            path: field.into(),
            kind,
        }
    }

    pub fn in_field(mut self, field: &str) -> Self {
        self.path = format!("{field}.{}", self.path);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ResolveErrorKind {
    #[error("field not specified")]
    FieldNotSpecified,
    #[error("fields not specified")]
    FieldsNotSpecified,
    #[error("fields can't be specified at the same time")]
    FieldsConflict,
    #[error("types don't match")]
    TypeMismatch,
    #[error("variable not specified")]
    VariableNotSpecified,
    #[error("variable reference cycle")]
    VariableCycle,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocalizationError {
    #[error("no localizations found")]
    Empty,
    #[error("invalid localization {lang:?}: duplicate message {message:?}")]
    DuplicateMessage { lang: String, message: String },
    #[error("invalid localization {lang:?}: message {message:?} not specified")]
    MissingMessage { lang: String, message: String },
}

#[cfg(test)]
mod tests {
    use super::{Expected, ParseError, ResolveError, ResolveErrorKind, UnmarshalError, UnmarshalErrorKind};

    #[test]
    fn expected_formats_single_char() {
        assert_eq!(Expected::chars(['{']).to_string(), "'{'");
    }

    #[test]
    fn expected_formats_alternatives() {
        assert_eq!(Expected::chars(['$', '{']).to_string(), "any of '$', '{'");
        assert_eq!(
            Expected::strs(["string", "table"]).to_string(),
            "any of \"string\", \"table\""
        );
    }

    #[test]
    fn parse_error_rebases_position() {
        let err = ParseError::NoArgumentName { pos: 2 }.at_offset(7);
        assert_eq!(err.position(), 9);
    }

    #[test]
    fn resolve_error_builds_dotted_path() {
        let err = ResolveError::new("other", ResolveErrorKind::TypeMismatch)
            .in_field("plural")
            .in_field("greeting");
        assert_eq!(
            err.to_string(),
            "could not resolve greeting.plural.other: types don't match"
        );
    }

    #[test]
    fn unmarshal_error_builds_dotted_path() {
        let err = UnmarshalError::new(
            "count",
            UnmarshalErrorKind::InvalidFieldType {
                found: "array",
                expected: Expected::strs(["string"]),
            },
        )
        .in_field("plural")
        .in_field("apples");
        assert_eq!(
            err.to_string(),
            "could not unmarshal apples.plural.count: invalid field type array, expected \"string\""
        );
    }
}
