use l10n_gen_core::{
    ArgRef, Body, Flag, FormatPart, FormatSpec, Localization, MessageScope, Plural, SemanticType,
    VariableScope,
};

use crate::source::{module_name, quote, type_name, SourceWriter};

const HEADER: &str = "// Code generated by l10n-gen. DO NOT EDIT.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub filename: String,
    pub contents: String,
}

pub fn generate_localizations(localizations: &[Localization]) -> Vec<GeneratedFile> {
    let mut files = vec![generate_root(localizations)];
    for localization in localizations {
        files.push(generate_messages(localization));
    }
    files
}

fn generate_root(localizations: &[Localization]) -> GeneratedFile {
    let mut w = SourceWriter::new();
    w.line(HEADER);
    w.blank();

    for localization in localizations {
        w.line(&format!(
            "mod {};",
            module_name(&localization.name, &localization.lang)
        ));
    }
    w.blank();
    for localization in localizations {
        w.line(&format!(
            "pub use {}::{};",
            module_name(&localization.name, &localization.lang),
            type_name(&localization.lang)
        ));
    }
    w.blank();

    w.open("pub trait Localizer {");
    w.line("fn language(&self) -> &'static str;");
    if let Some(base) = localizations.first() {
        for scope in &base.scopes {
            w.line(&format!(
                "fn {}({}) -> String;",
                scope.name,
                method_params(scope)
            ));
        }
    }
    w.close("}");
    w.blank();

    let tags: Vec<String> = localizations
        .iter()
        .map(|localization| quote(localization.lang.normalized()))
        .collect();
    w.line(&format!(
        "pub const SUPPORTED: &[&str] = &[{}];",
        tags.join(", ")
    ));
    w.blank();

    w.open("pub fn localizer(lang: &str) -> Option<&'static dyn Localizer> {");
    w.open("match lang {");
    for localization in localizations {
        w.line(&format!(
            "{} => Some(&{}::{}),",
            quote(localization.lang.normalized()),
            module_name(&localization.name, &localization.lang),
            type_name(&localization.lang)
        ));
    }
    w.line("_ => None,");
    w.close("}");
    w.close("}");

    GeneratedFile {
        filename: "mod.rs".to_string(),
        contents: w.finish(),
    }
}

fn generate_messages(localization: &Localization) -> GeneratedFile {
    let struct_name = type_name(&localization.lang);
    let mut w = SourceWriter::new();
    w.line(HEADER);
    w.blank();
    if localization.scopes.iter().any(scope_needs_write) {
        w.line("use std::fmt::Write as _;");
        w.blank();
    }

    w.line(&format!("pub struct {struct_name};"));
    w.blank();

    w.open(&format!("impl super::Localizer for {struct_name} {{"));
    w.open("fn language(&self) -> &'static str {");
    w.line(&quote(localization.lang.normalized()));
    w.close("}");
    for scope in &localization.scopes {
        w.blank();
        emit_message(&mut w, scope);
    }
    w.close("}");

    if localization
        .scopes
        .iter()
        .any(|scope| !scope.variables.is_empty())
    {
        w.blank();
        w.open(&format!("impl {struct_name} {{"));
        let mut first = true;
        for scope in &localization.scopes {
            for variable in &scope.variables {
                if !first {
                    w.blank();
                }
                first = false;
                emit_variable(&mut w, scope, variable);
            }
        }
        w.close("}");
    }

    GeneratedFile {
        filename: format!(
            "{}.rs",
            module_name(&localization.name, &localization.lang)
        ),
        contents: w.finish(),
    }
}

#[derive(Clone, Copy)]
enum CallSite {
    Message,
    Helper,
}

fn emit_message(w: &mut SourceWriter, scope: &MessageScope) {
    if scope.is_simple() {
        w.open(&format!("fn {}(&self) -> String {{", scope.name));
        w.line(&format!("{}.to_string()", quote(&literal_text(&scope.body))));
        w.close("}");
        return;
    }

    w.open(&format!(
        "fn {}({}) -> String {{",
        scope.name,
        method_params(scope)
    ));
    w.line("let mut out = String::new();");
    emit_body(w, &scope.body, scope, CallSite::Message);
    w.line("out");
    w.close("}");
}

fn emit_variable(w: &mut SourceWriter, scope: &MessageScope, variable: &VariableScope) {
    let mut params = String::from("&self, out: &mut String");
    for name in &helper_argument_names(scope, variable) {
        if let Some(argument) = scope.argument(name) {
            params.push_str(&format!(", {}: {}", name, param_type(&argument.ty)));
        }
    }
    w.open(&format!(
        "fn {}({}) {{",
        helper_name(scope, variable),
        params
    ));
    emit_body(w, &variable.body, scope, CallSite::Helper);
    w.close("}");
}

fn emit_body(w: &mut SourceWriter, body: &Body, scope: &MessageScope, site: CallSite) {
    match body {
        Body::Plural(plural) => emit_plural(w, plural, scope, site),
        Body::Pattern(parts) => emit_parts(w, parts, scope, site),
    }
}

fn emit_plural(w: &mut SourceWriter, plural: &Plural, scope: &MessageScope, site: CallSite) {
    w.open(&format!("match {} {{", plural.arg));
    if !plural.zero.is_empty() {
        w.open("0 => {");
        emit_parts(w, &plural.zero, scope, site);
        w.close("}");
    }
    if !plural.one.is_empty() {
        w.open("1 => {");
        emit_parts(w, &plural.one, scope, site);
        w.close("}");
    }
    if !plural.many.is_empty() {
        w.open("n if n > 1 => {");
        emit_parts(w, &plural.many, scope, site);
        w.close("}");
    }
    if plural.other.is_empty() {
        w.line("_ => {}");
    } else {
        w.open("_ => {");
        emit_parts(w, &plural.other, scope, site);
        w.close("}");
    }
    w.close("}");
}

fn emit_parts(w: &mut SourceWriter, parts: &[FormatPart], scope: &MessageScope, site: CallSite) {
    for part in parts {
        match part {
            FormatPart::Text(text) => {
                w.line(&format!("out.push_str({});", quote(text)));
            }
            FormatPart::Arg(arg) => emit_argument(w, arg, scope),
            FormatPart::Var(var) => {
                if let Some(variable) = scope.variable(&var.name) {
                    let mut call_args = match site {
                        CallSite::Message => String::from("&mut out"),
                        CallSite::Helper => String::from("out"),
                    };
                    for name in &helper_argument_names(scope, variable) {
                        call_args.push_str(", ");
                        call_args.push_str(name);
                    }
                    w.line(&format!(
                        "self.{}({});",
                        helper_name(scope, variable),
                        call_args
                    ));
                }
            }
        }
    }
}

fn emit_argument(w: &mut SourceWriter, arg: &ArgRef, scope: &MessageScope) {
    let Some(argument) = scope.argument(&arg.name) else {
        return;
    };

    if arg.spec.has_options() {
        let format = render_format(&arg.spec, &argument.ty);
        w.line(&format!("let _ = write!(out, \"{format}\", {});", arg.name));
        return;
    }

    match &argument.ty {
        SemanticType::Str => w.line(&format!("out.push_str({});", arg.name)),
        SemanticType::Debug => {
            w.line(&format!("let _ = write!(out, \"{{:?}}\", {});", arg.name));
        }
        _ => w.line(&format!("let _ = write!(out, \"{{}}\", {});", arg.name)),
    }
}

// The space flag has no counterpart in Rust format strings and is dropped.
fn render_format(spec: &FormatSpec, ty: &SemanticType) -> String {
    let mut out = String::from("{:");
    if spec.flags.contains(&Flag::Minus) {
        out.push('<');
    }
    if spec.flags.contains(&Flag::Plus) {
        out.push('+');
    }
    if spec.flags.contains(&Flag::Alt) {
        out.push('#');
    }
    if spec.flags.contains(&Flag::Zero) {
        out.push('0');
    }
    if let Some(width) = spec.width {
        out.push_str(&width.to_string());
    }
    if let Some(precision) = spec.precision {
        out.push('.');
        out.push_str(&precision.to_string());
    }
    match spec.modifier {
        Some(modifier) => out.push(modifier),
        None => {
            if matches!(ty, SemanticType::Debug) {
                out.push('?');
            }
        }
    }
    out.push('}');
    out
}

fn method_params(scope: &MessageScope) -> String {
    let mut params = String::from("&self");
    for argument in &scope.arguments {
        params.push_str(&format!(", {}: {}", argument.name, param_type(&argument.ty)));
    }
    params
}

fn param_type(ty: &SemanticType) -> String {
    match ty {
        SemanticType::Str => "&str".to_string(),
        SemanticType::Int => "i64".to_string(),
        SemanticType::Float => "f64".to_string(),
        SemanticType::Display => "&dyn std::fmt::Display".to_string(),
        SemanticType::Debug => "&dyn std::fmt::Debug".to_string(),
        SemanticType::Custom(path) => path.clone(),
    }
}

fn helper_name(scope: &MessageScope, variable: &VariableScope) -> String {
    format!("{}_{}", scope.name, variable.name)
}

fn helper_argument_names(scope: &MessageScope, variable: &VariableScope) -> Vec<String> {
    fn collect(
        scope: &MessageScope,
        variable: &VariableScope,
        names: &mut Vec<String>,
        seen: &mut Vec<String>,
    ) {
        if seen.contains(&variable.name) {
            return;
        }
        seen.push(variable.name.clone());
        for name in &variable.argument_names {
            if !names.contains(name) {
                names.push(name.clone());
            }
        }
        for called in called_variables(&variable.body) {
            if let Some(called) = scope.variable(&called) {
                collect(scope, called, names, seen);
            }
        }
    }

    let mut names = Vec::new();
    let mut seen = Vec::new();
    collect(scope, variable, &mut names, &mut seen);
    names
}

fn called_variables(body: &Body) -> Vec<String> {
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

fn literal_text(body: &Body) -> String {
    match body {
        Body::Pattern(parts) => parts
            .iter()
            .filter_map(|part| match part {
                FormatPart::Text(text) => Some(text.as_str()),
                _ => None,
            })
            .collect(),
        Body::Plural(_) => String::new(),
    }
}

fn scope_needs_write(scope: &MessageScope) -> bool {
    if scope.is_simple() {
        return false;
    }

    fn parts_need_write(parts: &[FormatPart], scope: &MessageScope) -> bool {
        parts.iter().any(|part| match part {
            FormatPart::Arg(arg) => {
                if arg.spec.has_options() {
                    return true;
                }
                !matches!(
                    scope.argument(&arg.name),
                    Some(l10n_gen_core::Argument {
                        ty: SemanticType::Str,
                        ..
                    })
                )
            }
            _ => false,
        })
    }

    fn body_needs_write(body: &Body, scope: &MessageScope) -> bool {
        match body {
            Body::Plural(plural) => plural
                .arms()
                .iter()
                .any(|(_, parts)| parts_need_write(parts, scope)),
            Body::Pattern(parts) => parts_need_write(parts, scope),
        }
    }

    body_needs_write(&scope.body, scope)
        || scope
            .variables
            .iter()
            .any(|variable| body_needs_write(&variable.body, scope))
}

#[cfg(test)]
mod tests {
    use super::generate_localizations;
    use l10n_gen_core::{
        resolve_messages, unmarshal_messages, LanguageTag, Localization, Node, SpecifierTable,
    };

    fn localization(lang: &str, entries: Vec<(&str, Node)>) -> Localization {
        let table = SpecifierTable::default();
        let entries: Vec<(String, Node)> = entries
            .into_iter()
            .map(|(key, value)| (key.to_string(), value))
            .collect();
        let messages = unmarshal_messages(&entries, &table).expect("unmarshal");
        let scopes = resolve_messages(messages, &table).expect("resolve");
        Localization {
            name: "messages".to_string(),
            lang: LanguageTag::parse(lang).expect("tag"),
            scopes,
        }
    }

    fn str_node(value: &str) -> Node {
        Node::Str(value.to_string())
    }

    fn table_node(entries: Vec<(&str, Node)>) -> Node {
        Node::Table(
            entries
                .into_iter()
                .map(|(key, value)| (key.to_string(), value))
                .collect(),
        )
    }

    #[test]
    fn root_file_declares_trait_and_lookup() {
        let locs = vec![
            localization("en", vec![("hello", str_node("Hi ${name}"))]),
            localization("de", vec![("hello", str_node("Hallo ${name}"))]),
        ];
        let files = generate_localizations(&locs);
        assert_eq!(files.len(), 3);

        let root = &files[0];
        assert_eq!(root.filename, "mod.rs");
        assert!(root.contents.contains("mod messages_en;"));
        assert!(root.contents.contains("mod messages_de;"));
        assert!(root.contents.contains("pub trait Localizer {"));
        assert!(root
            .contents
            .contains("fn hello(&self, name: &str) -> String;"));
        assert!(root
            .contents
            .contains("pub const SUPPORTED: &[&str] = &[\"en\", \"de\"];"));
        assert!(root
            .contents
            .contains("\"de\" => Some(&messages_de::De),"));
    }

    #[test]
    fn simple_message_returns_a_constant() {
        let locs = vec![localization("en", vec![("title", str_node("Settings"))])];
        let files = generate_localizations(&locs);
        let messages = &files[1];
        assert_eq!(messages.filename, "messages_en.rs");
        assert!(messages.contents.contains("fn title(&self) -> String {"));
        assert!(messages.contents.contains("\"Settings\".to_string()"));
        // No builder, no write import.
        assert!(!messages.contents.contains("use std::fmt::Write"));
    }

    #[test]
    fn string_argument_uses_push_str() {
        let locs = vec![localization("en", vec![("hello", str_node("Hi ${name}!"))])];
        let files = generate_localizations(&locs);
        let contents = &files[1].contents;
        assert!(contents.contains("fn hello(&self, name: &str) -> String {"));
        assert!(contents.contains("out.push_str(\"Hi \");"));
        assert!(contents.contains("out.push_str(name);"));
        assert!(contents.contains("out.push_str(\"!\");"));
    }

    #[test]
    fn formatted_argument_uses_write() {
        let locs = vec![localization(
            "en",
            vec![("price", str_node("total: ${08.2f:amount}"))],
        )];
        let files = generate_localizations(&locs);
        let contents = &files[1].contents;
        assert!(contents.contains("use std::fmt::Write as _;"));
        assert!(contents.contains("fn price(&self, amount: f64) -> String {"));
        assert!(contents.contains("let _ = write!(out, \"{:08.2}\", amount);"));
    }

    #[test]
    fn plural_lowers_to_match() {
        let locs = vec![localization(
            "en",
            vec![(
                "apples",
                table_node(vec![(
                    "plural",
                    table_node(vec![
                        ("arg", str_node("count")),
                        ("zero", str_node("no apples")),
                        ("one", str_node("one apple")),
                        ("many", str_node("${count} apples")),
                        ("other", str_node("some apples")),
                    ]),
                )]),
            )],
        )];
        let files = generate_localizations(&locs);
        let contents = &files[1].contents;
        assert!(contents.contains("fn apples(&self, count: i64) -> String {"));
        assert!(contents.contains("match count {"));
        assert!(contents.contains("0 => {"));
        assert!(contents.contains("1 => {"));
        assert!(contents.contains("n if n > 1 => {"));
        assert!(contents.contains("_ => {"));
        assert!(contents.contains("let _ = write!(out, \"{}\", count);"));
    }

    #[test]
    fn missing_other_arm_falls_through_empty() {
        let locs = vec![localization(
            "en",
            vec![(
                "apples",
                table_node(vec![(
                    "plural",
                    table_node(vec![("arg", str_node("count")), ("one", str_node("one"))]),
                )]),
            )],
        )];
        let files = generate_localizations(&locs);
        assert!(files[1].contents.contains("_ => {}"));
    }

    #[test]
    fn variable_becomes_helper_method() {
        let locs = vec![localization(
            "en",
            vec![(
                "greeting",
                table_node(vec![
                    ("string", str_node("&{salutation}, welcome!")),
                    (
                        "variables",
                        table_node(vec![("salutation", str_node("Dear ${name}"))]),
                    ),
                ]),
            )],
        )];
        let files = generate_localizations(&locs);
        let contents = &files[1].contents;
        assert!(contents.contains("self.greeting_salutation(&mut out, name);"));
        assert!(contents
            .contains("fn greeting_salutation(&self, out: &mut String, name: &str) {"));
        assert!(contents.contains("out.push_str(\"Dear \");"));
    }

    #[test]
    fn nested_variable_calls_forward_arguments() {
        let locs = vec![localization(
            "en",
            vec![(
                "m",
                table_node(vec![
                    ("string", str_node("&{outer}")),
                    (
                        "variables",
                        table_node(vec![
                            ("inner", str_node("${name}")),
                            ("outer", str_node("<&{inner}>")),
                        ]),
                    ),
                ]),
            )],
        )];
        let files = generate_localizations(&locs);
        let contents = &files[1].contents;
        // The outer helper takes the inner helper's argument and passes it on.
        assert!(contents.contains("fn m_outer(&self, out: &mut String, name: &str) {"));
        assert!(contents.contains("self.m_inner(out, name);"));
        assert!(contents.contains("self.m_outer(&mut out, name);"));
    }

    #[test]
    fn escaped_text_stays_literal() {
        let locs = vec![localization("en", vec![("cost", str_node("100$$"))])];
        let files = generate_localizations(&locs);
        assert!(files[1].contents.contains("\"100$\".to_string()"));
    }

    #[test]
    fn language_method_returns_tag() {
        let locs = vec![localization("pt-br", vec![("hi", str_node("oi"))])];
        let files = generate_localizations(&locs);
        let contents = &files[1].contents;
        assert!(contents.contains("fn language(&self) -> &'static str {"));
        assert!(contents.contains("\"pt-BR\""));
        assert_eq!(files[1].filename, "messages_pt_br.rs");
        assert!(contents.contains("pub struct PtBr;"));
    }
}
