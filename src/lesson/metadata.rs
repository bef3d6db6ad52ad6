//! Lesson metadata
//!
//! `Metadati` is the typed projection of the frontmatter. The two closed
//! enumerations (`Materia`, `LivelloScolastico`) are hard validation gates:
//! a value outside either set fails the whole document. The optional fields
//! are passed through from the frontmatter without further validation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The subject a lesson belongs to (closed set)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Materia {
    Matematica,
    Fisica,
}

impl Materia {
    /// Parse the frontmatter spelling, `None` when outside the closed set
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "matematica" => Some(Materia::Matematica),
            "fisica" => Some(Materia::Fisica),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Materia::Matematica => "matematica",
            Materia::Fisica => "fisica",
        }
    }

    /// All accepted spellings, for validation messages
    pub fn accepted() -> &'static [&'static str] {
        &["matematica", "fisica"]
    }
}

impl fmt::Display for Materia {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The school level a lesson targets (closed set)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LivelloScolastico {
    Primaria,
    SecondariaPrimoGrado,
    SecondariaSecondoGrado,
    Universita,
}

impl LivelloScolastico {
    /// Parse the frontmatter spelling, `None` when outside the closed set
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "primaria" => Some(LivelloScolastico::Primaria),
            "secondaria-primo-grado" => Some(LivelloScolastico::SecondariaPrimoGrado),
            "secondaria-secondo-grado" => Some(LivelloScolastico::SecondariaSecondoGrado),
            "universita" => Some(LivelloScolastico::Universita),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LivelloScolastico::Primaria => "primaria",
            LivelloScolastico::SecondariaPrimoGrado => "secondaria-primo-grado",
            LivelloScolastico::SecondariaSecondoGrado => "secondaria-secondo-grado",
            LivelloScolastico::Universita => "universita",
        }
    }

    /// All accepted spellings, for validation messages
    pub fn accepted() -> &'static [&'static str] {
        &[
            "primaria",
            "secondaria-primo-grado",
            "secondaria-secondo-grado",
            "universita",
        ]
    }
}

impl fmt::Display for LivelloScolastico {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated lesson metadata
///
/// The optional fields keep whatever JSON value the author wrote; they are
/// not structurally load-bearing for the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadati {
    pub id: String,
    pub titolo: String,
    pub materia: Materia,
    pub argomento: String,
    pub livello: LivelloScolastico,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sottotitolo: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub durata: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autore: Option<serde_json::Value>,
    #[serde(
        default,
        rename = "dataCreazione",
        skip_serializing_if = "Option::is_none"
    )]
    pub data_creazione: Option<serde_json::Value>,
    #[serde(
        default,
        rename = "dataModifica",
        skip_serializing_if = "Option::is_none"
    )]
    pub data_modifica: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub versione: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prerequisiti: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub obiettivi: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_materia_closed_set() {
        assert_eq!(Materia::parse("matematica"), Some(Materia::Matematica));
        assert_eq!(Materia::parse("fisica"), Some(Materia::Fisica));
        assert_eq!(Materia::parse("chimica"), None);
        assert_eq!(Materia::parse("Matematica"), None);
    }

    #[test]
    fn test_livello_serializes_kebab_case() {
        let json = serde_json::to_string(&LivelloScolastico::SecondariaPrimoGrado).unwrap();
        assert_eq!(json, r#""secondaria-primo-grado""#);
    }

    #[test]
    fn test_livello_parse_matches_serde_names() {
        for name in LivelloScolastico::accepted() {
            let parsed = LivelloScolastico::parse(name).expect("accepted spelling must parse");
            assert_eq!(parsed.as_str(), *name);
        }
    }
}
