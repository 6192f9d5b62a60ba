use crate::ast::{argument_names, FormatPart, Message, Plural};
use crate::config::{SemanticType, SpecifierTable};
use crate::error::{ResolveError, ResolveErrorKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    Plural(Plural),
    Pattern(Vec<FormatPart>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argument {
    pub name: String,
    pub ty: SemanticType,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableScope {
    pub name: String,
    pub body: Body,
    pub argument_names: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageScope {
    pub name: String,
    pub variables: Vec<VariableScope>,
    pub body: Body,
    pub arguments: Vec<Argument>,
}

impl MessageScope {
    pub fn is_simple(&self) -> bool {
        self.arguments.is_empty() && self.variables.is_empty()
    }

    pub fn argument(&self, name: &str) -> Option<&Argument> {
        self.arguments.iter().find(|arg| arg.name == name)
    }

    pub fn variable(&self, name: &str) -> Option<&VariableScope> {
        self.variables.iter().find(|var| var.name == name)
    }
}

pub fn resolve_messages(
    messages: Vec<Message>,
    table: &SpecifierTable,
) -> Result<Vec<MessageScope>, ResolveError> {
    messages
        .into_iter()
        .map(|message| {
            let name = message.name.clone();
            resolve_message(message, table).map_err(|err| err.in_field(&name))
        })
        .collect()
}

pub fn resolve_message(
    message: Message,
    table: &SpecifierTable,
) -> Result<MessageScope, ResolveError> {
    let Message {
        name,
        variables,
        plural,
        string,
    } = message;

    let body = select_body(plural, string)?;

    let mut variable_scopes = Vec::with_capacity(variables.len());
    for variable in variables {
        let variable_name = variable.name;
        let variable_body = select_body(variable.plural, variable.string)
            .map_err(|err| err.in_field(&variable_name))?;
        let argument_names = body_argument_names(&variable_body);
        variable_scopes.push(VariableScope {
            name: variable_name,
            body: variable_body,
            argument_names,
        });
    }

    let mut resolver = Resolver {
        table,
        arguments: Vec::new(),
    };

    for idx in 0..variable_scopes.len() {
        resolver
            .walk_body(&variable_scopes[idx].body, &variable_scopes)
            .map_err(|err| err.in_field(&variable_scopes[idx].name))?;
    }

    check_variable_cycles(&variable_scopes)?;

    resolver.walk_body(&body, &variable_scopes)?;

    let arguments = resolver
        .arguments
        .into_iter()
        .map(|pending| Argument {
            name: pending.name,
            ty: pending.ty.unwrap_or_else(|| table.string_type()),
        })
        .collect();

    Ok(MessageScope {
        name,
        variables: variable_scopes,
        body,
        arguments,
    })
}

fn select_body(
    plural: Option<Plural>,
    string: Option<Vec<FormatPart>>,
) -> Result<Body, ResolveError> {
    let plural = plural.filter(|plural| !plural.is_empty());
    let string = string.filter(|parts| !parts.is_empty());

    match (plural, string) {
        (Some(_), Some(_)) => Err(ResolveError::new(
            "[plural,string]",
            ResolveErrorKind::FieldsConflict,
        )),
        (Some(plural), None) => Ok(Body::Plural(plural)),
        (None, Some(parts)) => Ok(Body::Pattern(parts)),
        (None, None) => Err(ResolveError::new(
            "[plural,string]",
            ResolveErrorKind::FieldsNotSpecified,
        )),
    }
}

fn body_argument_names(body: &Body) -> Vec<String> {
    match body {
        Body::Plural(plural) => plural.argument_names(),
        Body::Pattern(parts) => argument_names(parts),
    }
}

fn body_variable_names(body: &Body) -> Vec<String> {
    fn collect(parts: &[FormatPart], names: &mut Vec<String>) {
        for part in parts {
            if let FormatPart::Var(var) = part {
                if !names.contains(&var.name) {
                    names.push(var.name.clone());
                }
            }
        }
    }

    let mut names = Vec::new();
    match body {
        Body::Plural(plural) => {
            for (_, parts) in plural.arms() {
                collect(parts, &mut names);
            }
        }
        Body::Pattern(parts) => collect(parts, &mut names),
    }
    names
}

fn check_variable_cycles(variables: &[VariableScope]) -> Result<(), ResolveError> {
    const UNSEEN: u8 = 0;
    const ON_PATH: u8 = 1;
    const DONE: u8 = 2;

    fn visit(
        idx: usize,
        variables: &[VariableScope],
        edges: &[Vec<usize>],
        states: &mut [u8],
    ) -> Result<(), ResolveError> {
        states[idx] = ON_PATH;
        for &next in &edges[idx] {
            match states[next] {
                ON_PATH => {
                    return Err(ResolveError::new(
                        variables[next].name.clone(),
                        ResolveErrorKind::VariableCycle,
                    ));
                }
                UNSEEN => visit(next, variables, edges, states)?,
                _ => {}
            }
        }
        states[idx] = DONE;
        Ok(())
    }

    let edges: Vec<Vec<usize>> = variables
        .iter()
        .map(|variable| {
            body_variable_names(&variable.body)
                .iter()
                .filter_map(|name| variables.iter().position(|other| other.name == *name))
                .collect()
        })
        .collect();

    let mut states = vec![UNSEEN; variables.len()];
    for idx in 0..variables.len() {
        if states[idx] == UNSEEN {
            visit(idx, variables, &edges, &mut states)?;
        }
    }
    Ok(())
}

struct PendingArgument {
    name: String,
    ty: Option<SemanticType>,
}

struct Resolver<'a> {
    table: &'a SpecifierTable,
    arguments: Vec<PendingArgument>,
}

impl Resolver<'_> {
    fn walk_body(&mut self, body: &Body, variables: &[VariableScope]) -> Result<(), ResolveError> {
        match body {
            Body::Plural(plural) => self
                .walk_plural(plural, variables)
                .map_err(|err| err.in_field("plural")),
            Body::Pattern(parts) => self
                .walk_parts(parts, variables)
                .map_err(|err| err.in_field("string")),
        }
    }

    fn walk_plural(
        &mut self,
        plural: &Plural,
        variables: &[VariableScope],
    ) -> Result<(), ResolveError> {
        if plural.arg.is_empty() {
            return Err(ResolveError::new("arg", ResolveErrorKind::FieldNotSpecified));
        }

        self.register(&plural.arg, Some(self.table.integer_type()))
            .map_err(|err| err.in_field("arg"))?;

        for (field, parts) in plural.arms() {
            self.walk_parts(parts, variables)
                .map_err(|err| err.in_field(field))?;
        }
        Ok(())
    }

    fn walk_parts(
        &mut self,
        parts: &[FormatPart],
        variables: &[VariableScope],
    ) -> Result<(), ResolveError> {
        for part in parts {
            match part {
                FormatPart::Text(_) => {}
                FormatPart::Arg(arg) => {
                    let ty = arg
                        .spec
                        .specifier
                        .and_then(|specifier| self.table.get(specifier))
                        .cloned();
                    self.register(&arg.name, ty)?;
                }
                FormatPart::Var(var) => {
                    if !variables.iter().any(|variable| variable.name == var.name) {
                        return Err(ResolveError::new(
                            var.name.clone(),
                            ResolveErrorKind::VariableNotSpecified,
                        ));
                    }
                }
            }
        }
        Ok(())
    }

    fn register(&mut self, name: &str, ty: Option<SemanticType>) -> Result<(), ResolveError> {
        let Some(existing) = self
            .arguments
            .iter_mut()
            .find(|pending| pending.name == name)
        else {
            self.arguments.push(PendingArgument {
                name: name.to_string(),
                ty,
            });
            return Ok(());
        };

        let Some(ty) = ty else {
            return Ok(());
        };

        match &existing.ty {
            None => {
                existing.ty = Some(ty);
                Ok(())
            }
            Some(previous) if *previous == ty => Ok(()),
            Some(_) => Err(ResolveError::new(name, ResolveErrorKind::TypeMismatch)),
        }
    }
}
