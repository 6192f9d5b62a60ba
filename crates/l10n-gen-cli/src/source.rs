use l10n_gen_core::LanguageTag;

#[derive(Debug, Default)]
pub struct SourceWriter {
    out: String,
    indent: usize,
}

impl SourceWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line(&mut self, text: &str) {
        for _ in 0..self.indent {
            self.out.push_str("    ");
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    pub fn blank(&mut self) {
        self.out.push('\n');
    }

    pub fn open(&mut self, text: &str) {
        self.line(text);
        self.indent += 1;
    }

    pub fn close(&mut self, text: &str) {
        self.indent = self.indent.saturating_sub(1);
        self.line(text);
    }

    pub fn finish(self) -> String {
        self.out
    }
}

pub fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for ch in text.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            ch if ch.is_control() => {
                out.push_str(&format!("\\u{{{:x}}}", ch as u32));
            }
            ch => out.push(ch),
        }
    }
    out.push('"');
    out
}

pub fn type_name(lang: &LanguageTag) -> String {
    let mut out = String::new();
    let mut upper_next = true;
    for ch in lang.normalized().chars() {
        if ch == '-' {
            upper_next = true;
            continue;
        }
        if upper_next {
            out.push(ch.to_ascii_uppercase());
            upper_next = false;
        } else {
            out.push(ch.to_ascii_lowercase());
        }
    }
    out
}

pub fn module_name(name: &str, lang: &LanguageTag) -> String {
    let mut out = String::with_capacity(name.len() + lang.normalized().len() + 1);
    out.push_str(name);
    out.push('_');
    for ch in lang.normalized().chars() {
        if ch == '-' {
            out.push('_');
        } else {
            out.push(ch.to_ascii_lowercase());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{module_name, quote, type_name, SourceWriter};
    use l10n_gen_core::LanguageTag;

    #[test]
    fn writer_indents_blocks() {
        let mut writer = SourceWriter::new();
        writer.open("fn main() {");
        writer.line("let x = 1;");
        writer.close("}");
        assert_eq!(writer.finish(), "fn main() {\n    let x = 1;\n}\n");
    }

    #[test]
    fn quote_escapes_specials() {
        assert_eq!(quote("a\"b\\c\nd"), "\"a\\\"b\\\\c\\nd\"");
        assert_eq!(quote("plain"), "\"plain\"");
    }

    #[test]
    fn type_name_camelcases_subtags() {
        let lang = LanguageTag::parse("zh-hant-tw").expect("tag");
        assert_eq!(type_name(&lang), "ZhHantTw");
        let lang = LanguageTag::parse("en").expect("tag");
        assert_eq!(type_name(&lang), "En");
    }

    #[test]
    fn module_name_snakes_the_tag() {
        let lang = LanguageTag::parse("zh-hant-tw").expect("tag");
        assert_eq!(module_name("messages", &lang), "messages_zh_hant_tw");
    }
}
