use crate::ast::{ArgRef, FormatPart, VarRef};
use crate::config::SpecifierTable;
use crate::error::{Expected, ParseError};
use crate::format_spec::parse_format_spec;

pub fn parse_format(template: &str, table: &SpecifierTable) -> Result<Vec<FormatPart>, ParseError> {
    let mut parts = Vec::new();
    let mut rest = template;
    let mut pos = 0;

    while !rest.is_empty() {
        let Some((idx, marker)) = find_marker(rest, &mut pos) else {
            push_text(&mut parts, rest);
            break;
        };

        let text = &rest[..idx];
        rest = &rest[idx + marker.len_utf8()..];

        let Some(next) = rest.chars().next() else {
            return Err(ParseError::UnexpectedEnd {
                pos,
                expected: Expected::chars([marker, '{']),
            });
        };
        pos += 1;

        if next == marker {
            // Escape: the literal text keeps one copy of the marker.
            push_text(&mut parts, text);
            push_char(&mut parts, marker);
            rest = &rest[next.len_utf8()..];
            pos += 1;
            continue;
        }

        if next != '{' {
            return Err(ParseError::UnexpectedChar {
                ch: next,
                pos,
                expected: Expected::chars([marker, '{']),
            });
        }

        push_text(&mut parts, text);
        rest = &rest[1..];
        pos += 1;

        let body_start = pos;
        let idx = find_closing_bracket(rest, &mut pos)?;
        let body = &rest[..idx];

        match marker {
            '$' => {
                let arg =
                    parse_argument(body, table).map_err(|err| err.at_offset(body_start))?;
                parts.push(FormatPart::Arg(arg));
            }
            _ => {
                let var = parse_variable(body).map_err(|err| err.at_offset(body_start))?;
                parts.push(FormatPart::Var(var));
            }
        }

        rest = &rest[idx + 1..];
        pos += 1;
    }

    Ok(parts)
}

fn find_marker(rest: &str, pos: &mut usize) -> Option<(usize, char)> {
    for (idx, ch) in rest.char_indices() {
        if ch == '$' || ch == '&' {
            return Some((idx, ch));
        }
        *pos += 1;
    }
    None
}

fn find_closing_bracket(rest: &str, pos: &mut usize) -> Result<usize, ParseError> {
    for (idx, ch) in rest.char_indices() {
        if ch == '}' {
            return Ok(idx);
        }
        *pos += 1;
    }
    Err(ParseError::NoClosingBracket { pos: *pos })
}

// Adjacent literals are folded into one part, so escapes do not split the
// surrounding text.
fn push_text(parts: &mut Vec<FormatPart>, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(FormatPart::Text(last)) = parts.last_mut() {
        last.push_str(text);
    } else {
        parts.push(FormatPart::Text(text.to_string()));
    }
}

fn push_char(parts: &mut Vec<FormatPart>, ch: char) {
    if let Some(FormatPart::Text(last)) = parts.last_mut() {
        last.push(ch);
    } else {
        parts.push(FormatPart::Text(ch.to_string()));
    }
}

fn parse_argument(body: &str, table: &SpecifierTable) -> Result<ArgRef, ParseError> {
    let (spec, name, name_pos) = match body.find(':') {
        Some(colon) => {
            let spec_text = &body[..colon];
            let spec = parse_format_spec(spec_text, table)?;
            let spec_len = spec_text.chars().count();
            let name_pos = if spec_len != 0 { spec_len + 1 } else { 0 };
            (spec, &body[colon + 1..], name_pos)
        }
        None => (Default::default(), body, 0),
    };

    match check_argument_name(name) {
        Err(NameError::Empty) => return Err(ParseError::NoArgumentName { pos: name_pos }),
        Err(NameError::InvalidChar) => {
            return Err(ParseError::InvalidArgumentName {
                name: name.to_string(),
                pos: name_pos,
            });
        }
        Ok(()) => {}
    }

    Ok(ArgRef {
        name: name.to_string(),
        spec,
    })
}

fn parse_variable(body: &str) -> Result<VarRef, ParseError> {
    match check_variable_name(body) {
        Err(NameError::Empty) => Err(ParseError::NoVariableName { pos: 0 }),
        Err(NameError::InvalidChar) => Err(ParseError::InvalidVariableName {
            name: body.to_string(),
            pos: 0,
        }),
        Ok(()) => Ok(VarRef {
            name: body.to_string(),
        }),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NameError {
    Empty,
    InvalidChar,
}

pub(crate) fn check_argument_name(name: &str) -> Result<(), NameError> {
    if name.is_empty() {
        return Err(NameError::Empty);
    }
    if name.bytes().all(|b| b.is_ascii_alphabetic()) {
        Ok(())
    } else {
        Err(NameError::InvalidChar)
    }
}

pub(crate) fn check_variable_name(name: &str) -> Result<(), NameError> {
    if name.is_empty() {
        return Err(NameError::Empty);
    }
    if name.bytes().all(|b| b.is_ascii_alphabetic() || b == b'_') {
        Ok(())
    } else {
        Err(NameError::InvalidChar)
    }
}
