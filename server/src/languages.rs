//! In-memory catalog of programming languages behind `/api/languages`.

use parking_lot::RwLock;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    pub id: u32,
    pub name: String,
    pub creator: String,
    /// Stored as sent: a number for the seeded records, anything for added ones.
    pub year: Value,
    pub paradigm: String,
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct NewLanguage {
    pub name: String,
    #[serde(default)]
    pub creator: String,
    #[serde(default = "blank_year")]
    pub year: Value,
    #[serde(default)]
    pub paradigm: String,
    #[serde(default)]
    pub description: String,
}

fn blank_year() -> Value {
    Value::String(String::new())
}

/// `Some(Value::Null)` for an explicit `null`, `None` only when the key is absent.
fn present<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}

/// Fields present in an update replace the stored ones; absent fields are kept.
#[derive(Debug, Default, Deserialize)]
pub struct LanguagePatch {
    pub name: Option<String>,
    pub creator: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub year: Option<Value>,
    pub paradigm: Option<String>,
    pub description: Option<String>,
}

pub struct LanguageStore {
    languages: RwLock<Vec<Language>>,
}

impl LanguageStore {
    pub fn new(languages: Vec<Language>) -> Self {
        Self { languages: RwLock::new(languages) }
    }

    pub fn seeded() -> Self {
        let seed = [
            ("Python", "Guido van Rossum", 1991, "Object-oriented, Procedural", "High-level general-purpose programming language"),
            ("JavaScript", "Brendan Eich", 1995, "Event-driven, Functional, Imperative", "Scripting language for web pages"),
            ("Java", "James Gosling", 1995, "Object-oriented, Class-based, Concurrent", "Popular enterprise language"),
            ("C++", "Bjarne Stroustrup", 1985, "Procedural, Object-oriented, Generic", "Extension of C with object-oriented features"),
            ("C#", "Microsoft", 2000, "Object-oriented, Component-oriented", "Microsoft's Java-like language"),
            ("Ruby", "Yukihiro Matsumoto", 1995, "Object-oriented, Reflective, Dynamic", "Dynamic, reflective language"),
            ("Swift", "Apple Inc.", 2014, "Object-oriented, Protocol-oriented, Functional", "Apple's language for iOS development"),
            ("Go", "Robert Griesemer, Rob Pike, Ken Thompson", 2009, "Compiled, Concurrent, Procedural", "Google's systems programming language"),
            ("HTML", "Tim Berners-Lee", 1993, "Markup language", "Standard markup language for web pages"),
        ];
        let languages = seed
            .iter()
            .zip(1u32..)
            .map(|(&(name, creator, year, paradigm, description), id)| Language {
                id,
                name: name.into(),
                creator: creator.into(),
                year: Value::from(year),
                paradigm: paradigm.into(),
                description: description.into(),
            })
            .collect();
        Self::new(languages)
    }

    pub fn list(&self) -> Vec<Language> {
        self.languages.read().clone()
    }

    pub fn get(&self, id: u32) -> Option<Language> {
        self.languages.read().iter().find(|l| l.id == id).cloned()
    }

    /// Exact name match, ignoring case.
    pub fn find_by_name(&self, name: &str) -> Option<Language> {
        let needle = name.to_lowercase();
        self.languages.read().iter().find(|l| l.name.to_lowercase() == needle).cloned()
    }

    /// Append a language; its id is one past the last entry's id.
    pub fn insert(&self, new: NewLanguage) -> Language {
        let mut languages = self.languages.write();
        let id = languages.last().map_or(1, |l| l.id + 1);
        let language = Language {
            id,
            name: new.name,
            creator: new.creator,
            year: new.year,
            paradigm: new.paradigm,
            description: new.description,
        };
        languages.push(language.clone());
        language
    }

    pub fn update(&self, id: u32, patch: LanguagePatch) -> Option<Language> {
        let mut languages = self.languages.write();
        let language = languages.iter_mut().find(|l| l.id == id)?;
        if let Some(name) = patch.name {
            language.name = name;
        }
        if let Some(creator) = patch.creator {
            language.creator = creator;
        }
        if let Some(year) = patch.year {
            language.year = year;
        }
        if let Some(paradigm) = patch.paradigm {
            language.paradigm = paradigm;
        }
        if let Some(description) = patch.description {
            language.description = description;
        }
        Some(language.clone())
    }

    /// Returns false when no language had this id.
    pub fn remove(&self, id: u32) -> bool {
        let mut languages = self.languages.write();
        let before = languages.len();
        languages.retain(|l| l.id != id);
        languages.len() != before
    }
}

impl Default for LanguageStore {
    fn default() -> Self {
        Self::seeded()
    }
}
