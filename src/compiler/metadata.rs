//! Frontmatter validation
//!
//! The one fail-fast component: any diagnostic reported here aborts the
//! whole document. Required fields are checked first and reported as a
//! single aggregated `E002`; the two closed enumerations are then validated
//! independently under `E009`. The remaining optional fields pass through
//! untouched.

use crate::ast::Frontmatter;
use crate::compiler::diagnostics::{CompilerError, Diagnostics, ErrorCode};
use crate::lesson::{LivelloScolastico, Materia, Metadati};
use serde_json::Value;

/// Frontmatter keys that must be present and truthy
const REQUIRED_FIELDS: [&str; 5] = ["id", "title", "subject", "topic", "level"];

/// JavaScript-style truthiness, the contract inherited from the authoring
/// pipeline: empty strings, zero, null and false all count as missing.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.trim().is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn string_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Validate the frontmatter and project it into [`Metadati`]
///
/// Returns `None` after reporting when validation fails; the caller must
/// then abort the document.
pub fn validate_metadata(
    frontmatter: &Frontmatter,
    diagnostics: &mut Diagnostics,
) -> Option<Metadati> {
    let missing: Vec<&str> = REQUIRED_FIELDS
        .iter()
        .copied()
        .filter(|field| !frontmatter.get(field).map(is_truthy).unwrap_or(false))
        .collect();

    if !missing.is_empty() {
        diagnostics.error(
            CompilerError::new(
                ErrorCode::E002,
                format!(
                    "Campi obbligatori mancanti nel frontmatter: {}",
                    missing.join(", ")
                ),
            )
            .with_location(frontmatter.location)
            .with_help("Ogni lezione richiede id, title, subject, topic e level"),
        );
        return None;
    }

    // All required fields are present past this point
    let subject = string_value(frontmatter.get("subject")?);
    let materia = match Materia::parse(&subject) {
        Some(materia) => materia,
        None => {
            diagnostics.error(
                CompilerError::new(
                    ErrorCode::E009,
                    format!("Materia non valida: '{subject}'"),
                )
                .with_location(frontmatter.location)
                .with_help(format!("Valori ammessi: {}", Materia::accepted().join(", "))),
            );
            return None;
        }
    };

    let level = string_value(frontmatter.get("level")?);
    let livello = match LivelloScolastico::parse(&level) {
        Some(livello) => livello,
        None => {
            diagnostics.error(
                CompilerError::new(
                    ErrorCode::E009,
                    format!("Livello scolastico non valido: '{level}'"),
                )
                .with_location(frontmatter.location)
                .with_help(format!(
                    "Valori ammessi: {}",
                    LivelloScolastico::accepted().join(", ")
                )),
            );
            return None;
        }
    };

    Some(Metadati {
        id: string_value(frontmatter.get("id")?),
        titolo: string_value(frontmatter.get("title")?),
        materia,
        argomento: string_value(frontmatter.get("topic")?),
        livello,
        sottotitolo: frontmatter.get("subtitle").cloned(),
        durata: frontmatter.get("duration").cloned(),
        autore: frontmatter.get("author").cloned(),
        data_creazione: frontmatter.get("created").cloned(),
        data_modifica: frontmatter.get("updated").cloned(),
        versione: frontmatter.get("version").cloned(),
        tags: frontmatter.get("tags").cloned(),
        prerequisiti: frontmatter.get("prerequisites").cloned(),
        obiettivi: frontmatter.get("objectives").cloned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn frontmatter(pairs: &[(&str, Value)]) -> Frontmatter {
        Frontmatter {
            values: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
            location: None,
        }
    }

    fn valid_frontmatter() -> Frontmatter {
        frontmatter(&[
            ("id", json!("frazioni-01")),
            ("title", json!("Le frazioni")),
            ("subject", json!("matematica")),
            ("topic", json!("aritmetica")),
            ("level", json!("secondaria-primo-grado")),
        ])
    }

    #[test]
    fn test_valid_frontmatter_projects() {
        let mut diagnostics = Diagnostics::new();
        let metadati = validate_metadata(&valid_frontmatter(), &mut diagnostics).unwrap();
        assert_eq!(metadati.id, "frazioni-01");
        assert_eq!(metadati.materia, Materia::Matematica);
        assert_eq!(metadati.livello, LivelloScolastico::SecondariaPrimoGrado);
        assert!(!diagnostics.has_errors());
    }

    #[test]
    fn test_missing_fields_aggregate_into_one_e002() {
        let mut diagnostics = Diagnostics::new();
        let fm = frontmatter(&[
            ("id", json!("x")),
            ("title", json!("y")),
            ("topic", json!("z")),
        ]);
        assert!(validate_metadata(&fm, &mut diagnostics).is_none());

        let (errors, _) = diagnostics.into_parts();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code, ErrorCode::E002);
        assert!(errors[0].message.contains("subject"));
        assert!(errors[0].message.contains("level"));
        assert!(!errors[0].message.contains("topic"));
    }

    #[test]
    fn test_empty_string_counts_as_missing() {
        let mut diagnostics = Diagnostics::new();
        let mut fm = valid_frontmatter();
        fm.values.insert("title".into(), json!("   "));
        assert!(validate_metadata(&fm, &mut diagnostics).is_none());
        let (errors, _) = diagnostics.into_parts();
        assert_eq!(errors[0].code, ErrorCode::E002);
        assert!(errors[0].message.contains("title"));
    }

    #[test]
    fn test_invalid_subject_is_e009() {
        let mut diagnostics = Diagnostics::new();
        let mut fm = valid_frontmatter();
        fm.values.insert("subject".into(), json!("chimica"));
        assert!(validate_metadata(&fm, &mut diagnostics).is_none());
        let (errors, _) = diagnostics.into_parts();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code, ErrorCode::E009);
        assert!(errors[0].message.contains("chimica"));
    }

    #[test]
    fn test_invalid_level_is_e009() {
        let mut diagnostics = Diagnostics::new();
        let mut fm = valid_frontmatter();
        fm.values.insert("level".into(), json!("dottorato"));
        assert!(validate_metadata(&fm, &mut diagnostics).is_none());
        let (errors, _) = diagnostics.into_parts();
        assert_eq!(errors[0].code, ErrorCode::E009);
    }

    #[test]
    fn test_optional_fields_pass_through_untyped() {
        let mut diagnostics = Diagnostics::new();
        let mut fm = valid_frontmatter();
        fm.values.insert("tags".into(), json!(["frazioni", "base"]));
        fm.values.insert("duration".into(), json!(45));
        let metadati = validate_metadata(&fm, &mut diagnostics).unwrap();
        assert_eq!(metadati.tags, Some(json!(["frazioni", "base"])));
        assert_eq!(metadati.durata, Some(json!(45)));
        assert_eq!(metadati.sottotitolo, None);
    }
}
