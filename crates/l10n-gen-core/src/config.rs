use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SemanticType {
    Str,
    Int,
    Float,
    Display,
    Debug,
    Custom(String),
}

#[derive(Debug, Clone)]
pub struct SpecifierTable {
    entries: BTreeMap<char, SemanticType>,
}

impl SpecifierTable {
    pub fn new(entries: impl IntoIterator<Item = (char, SemanticType)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    pub fn contains(&self, specifier: char) -> bool {
        self.entries.contains_key(&specifier)
    }

    pub fn get(&self, specifier: char) -> Option<&SemanticType> {
        self.entries.get(&specifier)
    }

    pub fn string_type(&self) -> SemanticType {
        self.get('s').cloned().unwrap_or(SemanticType::Str)
    }

    pub fn integer_type(&self) -> SemanticType {
        self.get('d').cloned().unwrap_or(SemanticType::Int)
    }
}

impl Default for SpecifierTable {
    fn default() -> Self {
        Self::new([
            ('s', SemanticType::Str),
            ('d', SemanticType::Int),
            ('f', SemanticType::Float),
            ('S', SemanticType::Display),
            ('D', SemanticType::Debug),
        ])
    }
}
