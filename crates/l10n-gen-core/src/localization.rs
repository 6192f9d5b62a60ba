use std::collections::BTreeSet;

use crate::error::LocalizationError;
use crate::language_tag::LanguageTag;
use crate::scope::MessageScope;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Localization {
    pub name: String,
    pub lang: LanguageTag,
    pub scopes: Vec<MessageScope>,
}

#[derive(Debug, Default)]
pub struct LocalizationSet {
    localizations: Vec<Localization>,
    names: Vec<BTreeSet<String>>,
}

impl LocalizationSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(
        &mut self,
        name: &str,
        lang: LanguageTag,
        scopes: Vec<MessageScope>,
    ) -> Result<(), LocalizationError> {
        let idx = match self
            .localizations
            .iter()
            .position(|loc| loc.lang.normalized() == lang.normalized())
        {
            Some(idx) => idx,
            None => {
                self.localizations.push(Localization {
                    name: name.to_string(),
                    lang,
                    scopes: Vec::new(),
                });
                self.names.push(BTreeSet::new());
                self.localizations.len() - 1
            }
        };

        for scope in &scopes {
            if !self.names[idx].insert(scope.name.clone()) {
                return Err(LocalizationError::DuplicateMessage {
                    lang: self.localizations[idx].lang.normalized().to_string(),
                    message: scope.name.clone(),
                });
            }
        }
        self.localizations[idx].scopes.extend(scopes);
        Ok(())
    }

    pub fn finish(mut self) -> Result<Vec<Localization>, LocalizationError> {
        if self.localizations.is_empty() {
            return Err(LocalizationError::Empty);
        }

        let base_names = &self.names[0];
        let base_lang = self.localizations[0].lang.normalized().to_string();

        for idx in 1..self.localizations.len() {
            for name in &self.names[idx] {
                if !base_names.contains(name) {
                    return Err(LocalizationError::MissingMessage {
                        lang: base_lang.clone(),
                        message: name.clone(),
                    });
                }
            }
            for name in base_names {
                if !self.names[idx].contains(name) {
                    return Err(LocalizationError::MissingMessage {
                        lang: self.localizations[idx].lang.normalized().to_string(),
                        message: name.clone(),
                    });
                }
            }
        }

        for localization in &mut self.localizations {
            localization.scopes.sort_by(|a, b| a.name.cmp(&b.name));
        }
        Ok(self.localizations)
    }
}

pub fn build_localizations(
    files: impl IntoIterator<Item = (String, LanguageTag, Vec<MessageScope>)>,
) -> Result<Vec<Localization>, LocalizationError> {
    let mut set = LocalizationSet::new();
    for (name, lang, scopes) in files {
        set.add(&name, lang, scopes)?;
    }
    set.finish()
}
