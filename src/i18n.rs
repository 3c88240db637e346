//! Translation tables loaded from `assets/lang/{code}.json`

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum LanguageError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{} is not a JSON object of strings: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

const LANGUAGES: [(&str, &str); 9] = [
    ("English", "en"),
    ("Arabic", "ar"),
    ("French", "fr"),
    ("German", "de"),
    ("Italian", "it"),
    ("Portuguese", "pt"),
    ("Russian", "ru"),
    ("Spanish", "es"),
    ("Turkish", "tr"),
];

/// Language names accepted in the settings file.
pub fn language_names() -> impl Iterator<Item = &'static str> {
    LANGUAGES.iter().map(|(name, _)| *name)
}

/// ISO 639-1 code for a settings language name; unknown names map to English.
pub fn language_code(name: &str) -> &'static str {
    let name = name.trim();
    LANGUAGES
        .iter()
        .find(|(display, _)| display.eq_ignore_ascii_case(name))
        .map_or("en", |(_, code)| code)
}

pub fn read_table(path: &Path) -> Result<HashMap<String, String>, LanguageError> {
    let content = fs::read_to_string(path).map_err(|source| LanguageError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let raw: HashMap<String, Value> =
        serde_json::from_str(&content).map_err(|source| LanguageError::Json {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(raw
        .into_iter()
        .filter_map(|(key, value)| match value {
            Value::String(text) => Some((key, text)),
            _ => None,
        })
        .collect())
}

/// Owned translation table for one language.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Localization {
    code: String,
    table: HashMap<String, String>,
}

impl Localization {
    pub fn new(code: impl Into<String>, table: HashMap<String, String>) -> Self {
        Self {
            code: code.into(),
            table,
        }
    }

    /// Load the table for a language name, falling back to English and then
    /// to an empty table.
    pub fn load(lang_dir: &Path, language: &str) -> Self {
        let code = language_code(language);
        let mut candidates = vec![code];
        if code != "en" {
            candidates.push("en");
        }
        for candidate in candidates {
            let path = lang_dir.join(format!("{candidate}.json"));
            match read_table(&path) {
                Ok(table) if !table.is_empty() => return Self::new(candidate, table),
                Ok(_) => log::debug!("{} has no translations", path.display()),
                Err(err) => log::warn!("{}", err),
            }
        }
        Self::new(code, HashMap::new())
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Translation for `key`, or the key itself.
    pub fn t<'a>(&'a self, key: &'a str) -> &'a str {
        self.table.get(key).map_or(key, String::as_str)
    }

    /// Translation for `key`, or `default`.
    pub fn t_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.table.get(key).map_or(default, String::as_str)
    }

    /// Translate and substitute `{0}`-style positional and `{name}` placeholders.
    /// Placeholders without a value are left as written.
    pub fn format(&self, key: &str, default: &str, args: &[&str], named: &[(&str, &str)]) -> String {
        substitute(self.t_or(key, default), args, named)
    }
}

fn substitute(template: &str, args: &[&str], named: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let Some(end) = after.find('}') else {
            out.push_str(&rest[start..]);
            return out;
        };
        let name = &after[..end];
        let value = match name.parse::<usize>() {
            Ok(index) => args.get(index).copied(),
            Err(_) => named.iter().find(|(k, _)| *k == name).map(|(_, v)| *v),
        };
        match value {
            Some(value) => out.push_str(value),
            None => out.push_str(&rest[start..start + end + 2]),
        }
        rest = &after[end + 1..];
    }
    out.push_str(rest);
    out
}
