use crate::ast::{Flag, FormatSpec};
use crate::config::SpecifierTable;
use crate::error::ParseError;

pub fn parse_format_spec(input: &str, table: &SpecifierTable) -> Result<FormatSpec, ParseError> {
    let mut spec = FormatSpec::default();
    let mut rest = input;
    let mut pos = 0;

    // Flags, greedily, dropping duplicates.
    while let Some(ch) = rest.chars().next() {
        let Some(flag) = Flag::from_char(ch) else {
            break;
        };
        if !spec.flags.contains(&flag) {
            spec.flags.push(flag);
        }
        rest = &rest[ch.len_utf8()..];
        pos += 1;
    }

    // Width: a maximal digit run.
    if rest.starts_with(|ch: char| ch.is_ascii_digit()) {
        let digits = leading_digits(rest);
        let value = digits.parse::<usize>().map_err(|_| ParseError::InvalidWidth {
            value: digits.to_string(),
            pos,
        })?;
        spec.width = Some(value);
        rest = &rest[digits.len()..];
        pos += digits.len();
    }

    // Precision: a dot plus a possibly empty digit run.
    if let Some(after_dot) = rest.strip_prefix('.') {
        let digits = leading_digits(after_dot);
        let value = if digits.is_empty() {
            0
        } else {
            digits
                .parse::<usize>()
                .map_err(|_| ParseError::InvalidPrecision {
                    value: rest[..1 + digits.len()].to_string(),
                    pos,
                })?
        };
        spec.precision = Some(value);
        rest = &rest[1 + digits.len()..];
        pos += 1 + digits.len();
    }

    // Specifier: one rune, drawn from the configured alphabet.
    if let Some(ch) = rest.chars().next() {
        if !table.contains(ch) {
            return Err(ParseError::InvalidSpecifier { ch, pos });
        }
        spec.specifier = Some(ch);
        rest = &rest[ch.len_utf8()..];
        pos += 1;
    }

    // Modifier: one more rune, taken verbatim as the rendering character.
    if let Some(ch) = rest.chars().next() {
        spec.modifier = Some(ch);
        rest = &rest[ch.len_utf8()..];
        pos += 1;
    }

    if !rest.is_empty() {
        return Err(ParseError::UnexpectedText { pos });
    }

    Ok(spec)
}

fn leading_digits(text: &str) -> &str {
    let end = text
        .find(|ch: char| !ch.is_ascii_digit())
        .unwrap_or(text.len());
    &text[..end]
}

#[cfg(test)]
mod tests {
    use super::parse_format_spec;
    use crate::ast::{Flag, FormatSpec};
    use crate::config::SpecifierTable;
    use crate::error::ParseError;

    fn parse(input: &str) -> Result<FormatSpec, ParseError> {
        parse_format_spec(input, &SpecifierTable::default())
    }

    #[test]
    fn empty_spec_is_empty() {
        let spec = parse("").expect("parse");
        assert_eq!(spec, FormatSpec::default());
    }

    #[test]
    fn parses_all_stages() {
        let spec = parse("+-8.3fx").expect("parse");
        assert_eq!(spec.flags, vec![Flag::Plus, Flag::Minus]);
        assert_eq!(spec.width, Some(8));
        assert_eq!(spec.precision, Some(3));
        assert_eq!(spec.specifier, Some('f'));
        assert_eq!(spec.modifier, Some('x'));
    }

    #[test]
    fn duplicate_flags_collapse() {
        let spec = parse("++--").expect("parse");
        assert_eq!(spec.flags, vec![Flag::Plus, Flag::Minus]);
    }

    #[test]
    fn leading_zero_is_a_flag_not_width() {
        let spec = parse("05d").expect("parse");
        assert_eq!(spec.flags, vec![Flag::Zero]);
        assert_eq!(spec.width, Some(5));
        assert_eq!(spec.specifier, Some('d'));
    }

    #[test]
    fn bare_dot_means_zero_precision() {
        let spec = parse(".s").expect("parse");
        assert_eq!(spec.precision, Some(0));
        assert_eq!(spec.specifier, Some('s'));
    }

    #[test]
    fn unknown_specifier_fails_at_its_position() {
        let err = parse("8.2q").expect_err("should fail");
        assert_eq!(err, ParseError::InvalidSpecifier { ch: 'q', pos: 3 });
    }

    #[test]
    fn trailing_text_fails() {
        let err = parse("dxy").expect_err("should fail");
        assert_eq!(err, ParseError::UnexpectedText { pos: 2 });
    }

    #[test]
    fn oversized_width_fails() {
        let err = parse("99999999999999999999d").expect_err("should fail");
        match err {
            ParseError::InvalidWidth { value, pos } => {
                assert_eq!(value, "99999999999999999999");
                assert_eq!(pos, 0);
            }
            err => panic!("unexpected error {err:?}"),
        }
    }

    #[test]
    fn specifier_alphabet_is_configurable() {
        let table = SpecifierTable::new([('q', crate::config::SemanticType::Str)]);
        let spec = parse_format_spec("q", &table).expect("parse");
        assert_eq!(spec.specifier, Some('q'));

        let err = parse_format_spec("d", &table).expect_err("should fail");
        assert_eq!(err, ParseError::InvalidSpecifier { ch: 'd', pos: 0 });
    }
}
