use crate::ast::{FormatPart, Message, Plural, Variable};
use crate::config::SpecifierTable;
use crate::error::{Expected, UnmarshalError, UnmarshalErrorKind};
use crate::format::{check_argument_name, check_variable_name, parse_format, NameError};
use crate::node::Node;

pub fn unmarshal_messages(
    entries: &[(String, Node)],
    table: &SpecifierTable,
) -> Result<Vec<Message>, UnmarshalError> {
    let mut messages = Vec::with_capacity(entries.len());

    for (name, value) in entries {
        match value {
            Node::Str(template) => {
                let parts = parse_template(template, table, name)?;
                messages.push(Message {
                    name: name.clone(),
                    variables: Vec::new(),
                    plural: None,
                    string: Some(parts),
                });
            }
            Node::Table(fields) => {
                let mut message = map_message(fields, table).map_err(|err| err.in_field(name))?;
                message.name = name.clone();
                message.variables.sort_by(|a, b| a.name.cmp(&b.name));
                messages.push(message);
            }
            other => {
                return Err(UnmarshalError::new(
                    name,
                    UnmarshalErrorKind::InvalidFieldType {
                        found: other.kind(),
                        expected: Expected::strs(["string", "table"]),
                    },
                ));
            }
        }
    }

    messages.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(messages)
}

fn map_message(
    fields: &[(String, Node)],
    table: &SpecifierTable,
) -> Result<Message, UnmarshalError> {
    let mut message = Message {
        name: String::new(),
        variables: Vec::new(),
        plural: None,
        string: None,
    };

    for (key, value) in fields {
        match key.as_str() {
            "variables" => match value {
                Node::Table(entries) => {
                    message.variables =
                        map_variables(entries, table).map_err(|err| err.in_field(key))?;
                }
                other => return Err(invalid_type(key, other, &["table"])),
            },
            "plural" => match value {
                Node::Table(entries) => {
                    message.plural =
                        Some(map_plural(entries, table).map_err(|err| err.in_field(key))?);
                }
                other => return Err(invalid_type(key, other, &["table"])),
            },
            "string" => match value {
                Node::Str(template) => {
                    message.string = Some(parse_template(template, table, key)?);
                }
                other => return Err(invalid_type(key, other, &["string"])),
            },
            _ => {
                return Err(UnmarshalError::new(
                    key,
                    UnmarshalErrorKind::UnknownField {
                        expected: Expected::strs(["variables", "plural", "string"]),
                    },
                ));
            }
        }
    }

    Ok(message)
}

fn map_variables(
    entries: &[(String, Node)],
    table: &SpecifierTable,
) -> Result<Vec<Variable>, UnmarshalError> {
    let mut variables = Vec::with_capacity(entries.len());

    for (key, value) in entries {
        if let Err(err) = check_variable_name(key) {
            let kind = match err {
                NameError::Empty => UnmarshalErrorKind::NoVariableName,
                NameError::InvalidChar => UnmarshalErrorKind::InvalidVariableName {
                    name: key.clone(),
                },
            };
            return Err(UnmarshalError::new(key, kind));
        }

        match value {
            Node::Str(template) => {
                variables.push(Variable {
                    name: key.clone(),
                    plural: None,
                    string: Some(parse_template(template, table, key)?),
                });
            }
            Node::Table(fields) => {
                let mut variable =
                    map_variable(fields, table).map_err(|err| err.in_field(key))?;
                variable.name = key.clone();
                variables.push(variable);
            }
            other => return Err(invalid_type(key, other, &["string", "table"])),
        }
    }

    Ok(variables)
}

fn map_variable(
    fields: &[(String, Node)],
    table: &SpecifierTable,
) -> Result<Variable, UnmarshalError> {
    let mut variable = Variable {
        name: String::new(),
        plural: None,
        string: None,
    };

    for (key, value) in fields {
        match key.as_str() {
            "plural" => match value {
                Node::Table(entries) => {
                    variable.plural =
                        Some(map_plural(entries, table).map_err(|err| err.in_field(key))?);
                }
                other => return Err(invalid_type(key, other, &["table"])),
            },
            "string" => match value {
                Node::Str(template) => {
                    variable.string = Some(parse_template(template, table, key)?);
                }
                other => return Err(invalid_type(key, other, &["string"])),
            },
            _ => {
                return Err(UnmarshalError::new(
                    key,
                    UnmarshalErrorKind::UnknownField {
                        expected: Expected::strs(["plural", "string"]),
                    },
                ));
            }
        }
    }

    Ok(variable)
}

fn map_plural(
    entries: &[(String, Node)],
    table: &SpecifierTable,
) -> Result<Plural, UnmarshalError> {
    let mut plural = Plural::default();

    for (key, value) in entries {
        let Node::Str(text) = value else {
            return Err(invalid_type(key, value, &["string"]));
        };

        if key == "arg" {
            if let Err(err) = check_argument_name(text) {
                let kind = match err {
                    NameError::Empty => UnmarshalErrorKind::NoArgumentName,
                    NameError::InvalidChar => UnmarshalErrorKind::InvalidArgumentName {
                        name: text.clone(),
                    },
                };
                return Err(UnmarshalError::new(key, kind));
            }
            plural.arg = text.clone();
            continue;
        }

        let parts = parse_template(text, table, key)?;
        match key.as_str() {
            "zero" => plural.zero = parts,
            "one" => plural.one = parts,
            "many" => plural.many = parts,
            "other" => plural.other = parts,
            _ => {
                return Err(UnmarshalError::new(
                    key,
                    UnmarshalErrorKind::UnknownField {
                        expected: Expected::strs(["arg", "zero", "one", "many", "other"]),
                    },
                ));
            }
        }
    }

    Ok(plural)
}

fn parse_template(
    template: &str,
    table: &SpecifierTable,
    field: &str,
) -> Result<Vec<FormatPart>, UnmarshalError> {
    parse_format(template, table)
        .map_err(|err| UnmarshalError::new(field, UnmarshalErrorKind::Parse(err)))
}

fn invalid_type(field: &str, found: &Node, expected: &[&'static str]) -> UnmarshalError {
    UnmarshalError::new(
        field,
        UnmarshalErrorKind::InvalidFieldType {
            found: found.kind(),
            expected: Expected::strs(expected.iter().copied()),
        },
    )
}
