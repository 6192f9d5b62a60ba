#![forbid(unsafe_code)]

mod ast;
mod config;
mod error;
mod format;
mod format_spec;
mod language_tag;
mod localization;
mod node;
mod scope;
mod unmarshal;

pub use ast::{argument_names, ArgRef, Flag, FormatPart, FormatSpec, Message, Plural, VarRef, Variable};
pub use config::{SemanticType, SpecifierTable};
pub use error::{
    Expected, LocalizationError, ParseError, ResolveError, ResolveErrorKind, UnmarshalError,
    UnmarshalErrorKind,
};
pub use format::parse_format;
pub use format_spec::parse_format_spec;
pub use language_tag::{LanguageTag, LanguageTagError};
pub use localization::{build_localizations, Localization, LocalizationSet};
pub use node::Node;
pub use scope::{resolve_message, resolve_messages, Argument, Body, MessageScope, VariableScope};
pub use unmarshal::unmarshal_messages;
