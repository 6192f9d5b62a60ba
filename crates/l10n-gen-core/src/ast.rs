#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatPart {
    Text(String),
    Arg(ArgRef),
    Var(VarRef),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgRef {
    pub name: String,
    pub spec: FormatSpec,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarRef {
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flag {
    Plus,
    Minus,
    Space,
    Zero,
    Alt,
}

impl Flag {
    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            '+' => Some(Flag::Plus),
            '-' => Some(Flag::Minus),
            ' ' => Some(Flag::Space),
            '0' => Some(Flag::Zero),
            '#' => Some(Flag::Alt),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Flag::Plus => '+',
            Flag::Minus => '-',
            Flag::Space => ' ',
            Flag::Zero => '0',
            Flag::Alt => '#',
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormatSpec {
    pub flags: Vec<Flag>,
    pub width: Option<usize>,
    pub precision: Option<usize>,
    pub specifier: Option<char>,
    pub modifier: Option<char>,
}

impl FormatSpec {
    pub fn has_options(&self) -> bool {
        !self.flags.is_empty()
            || self.width.is_some()
            || self.precision.is_some()
            || self.modifier.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Plural {
    pub arg: String,
    pub zero: Vec<FormatPart>,
    pub one: Vec<FormatPart>,
    pub many: Vec<FormatPart>,
    pub other: Vec<FormatPart>,
}

impl Plural {
    pub fn is_empty(&self) -> bool {
        self.arg.is_empty()
            && self.zero.is_empty()
            && self.one.is_empty()
            && self.many.is_empty()
            && self.other.is_empty()
    }

    pub fn arms(&self) -> [(&'static str, &[FormatPart]); 4] {
        [
            ("zero", self.zero.as_slice()),
            ("one", self.one.as_slice()),
            ("many", self.many.as_slice()),
            ("other", self.other.as_slice()),
        ]
    }

    pub fn argument_names(&self) -> Vec<String> {
        let mut names = vec![self.arg.clone()];
        for (_, parts) in self.arms() {
            for name in argument_names(parts) {
                if !names.contains(&name) {
                    names.push(name);
                }
            }
        }
        names
    }
}

pub fn argument_names(parts: &[FormatPart]) -> Vec<String> {
    let mut names = Vec::new();
    for part in parts {
        if let FormatPart::Arg(arg) = part {
            if !names.contains(&arg.name) {
                names.push(arg.name.clone());
            }
        }
    }
    names
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    pub name: String,
    pub plural: Option<Plural>,
    pub string: Option<Vec<FormatPart>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub name: String,
    pub variables: Vec<Variable>,
    pub plural: Option<Plural>,
    pub string: Option<Vec<FormatPart>>,
}
