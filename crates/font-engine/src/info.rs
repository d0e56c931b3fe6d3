//! Read-only font attribute snapshot shared by all engines.

use serde::{Deserialize, Serialize};

/// One `(language, key, value)` entry of a font's name table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameEntry {
    pub language: String,
    pub key: String,
    pub value: String,
}

impl NameEntry {
    pub fn new(
        language: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self { language: language.into(), key: key.into(), value: value.into() }
    }
}

/// Simple attributes and name table of an opened font.
///
/// Field names match the JSON emitted by the FontForge inspection script.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontInfo {
    pub family_name: Option<String>,
    pub full_name: Option<String>,
    /// PostScript font name.
    pub font_name: Option<String>,
    pub weight: Option<String>,
    pub version: Option<String>,
    pub italic_angle: f64,
    pub copyright: Option<String>,
    pub comment: Option<String>,
    pub change_log: Option<String>,
    pub names: Vec<NameEntry>,
}

impl FontInfo {
    pub fn is_italic(&self) -> bool {
        self.italic_angle != 0.0
    }

    /// First name-table value whose key matches `key`, ignoring case.
    pub fn lookup_name(&self, key: &str) -> Option<&str> {
        self.names
            .iter()
            .find(|entry| entry.key.eq_ignore_ascii_case(key))
            .map(|entry| entry.value.as_str())
    }

    pub fn with_name(mut self, key: &str, value: &str) -> Self {
        self.names.push(NameEntry::new("English (US)", key, value));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_name_ignores_case_and_returns_first() {
        let info = FontInfo::default()
            .with_name("Designer", "Ana")
            .with_name("DESIGNER", "Bruno")
            .with_name("License URL", "https://openfontlicense.org");

        assert_eq!(info.lookup_name("designer"), Some("Ana"));
        assert_eq!(info.lookup_name("license url"), Some("https://openfontlicense.org"));
        assert_eq!(info.lookup_name("Trademark"), None);
    }

    #[test]
    fn test_italic_from_angle() {
        let mut info = FontInfo::default();
        assert!(!info.is_italic());
        info.italic_angle = -12.0;
        assert!(info.is_italic());
    }

    #[test]
    fn test_deserialize_partial_json() {
        let info: FontInfo =
            serde_json::from_str(r#"{"family_name": "Sample", "comment": null}"#).unwrap();
        assert_eq!(info.family_name.as_deref(), Some("Sample"));
        assert_eq!(info.comment, None);
        assert!(info.names.is_empty());
    }
}
