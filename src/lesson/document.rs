//! Lesson document root
//!
//! `Lezione` is the compiled document handed to the renderer: validated
//! metadata, one output section per input section (order preserved), and the
//! optional introduction/conclusion/resource lists, present only when the
//! corresponding input was non-empty.

use super::block::Blocco;
use super::metadata::Metadati;
use serde::{Deserialize, Serialize};

/// A projected resource entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Risorsa {
    pub tipo: String,
    pub titolo: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descrizione: Option<String>,
}

/// One compiled section
///
/// `id` and `titolo` fall back to the positional defaults `sezione-N` /
/// `Sezione N` (1-based) when the author wrote neither.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sezione {
    pub id: String,
    pub titolo: String,
    pub blocchi: Vec<Blocco>,
}

/// The compiled lesson document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lezione {
    pub metadati: Metadati,
    pub sezioni: Vec<Sezione>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub introduzione: Option<Vec<Blocco>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conclusione: Option<Vec<Blocco>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risorse: Option<Vec<Risorsa>>,
}
