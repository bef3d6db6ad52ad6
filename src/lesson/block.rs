//! Output block union
//!
//! `Blocco` is the closed tagged union the renderer consumes; the `tipo`
//! field discriminates the variant on the wire. Shapes are fixed by the
//! directive compilers: a variant documented as `blocchi` carries fragment
//! parsed body content, the others carry scalar fields projected from
//! directive attributes.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Note style (closed set, defaults to `info`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VarianteNota {
    Info,
    Suggerimento,
    Attenzione,
    Importante,
}

/// Callout style (closed set, defaults to `ricorda`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VarianteCallout {
    Obiettivo,
    Ricorda,
    Curiosita,
    Sfida,
}

/// One multiple-choice quiz option
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpzioneQuiz {
    pub testo: String,
    pub corretta: bool,
}

/// One step of a sequence
///
/// `transitions` is either absent or a non-empty, strictly ascending list of
/// indices into `blocchi`; index `i` means "pause immediately before block
/// `i`" (an index equal to `blocchi.len()` is a trailing pause).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequenzaStep {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub titolo: Option<String>,
    pub blocchi: Vec<Blocco>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transitions: Option<Vec<usize>>,
}

/// A renderer-facing content block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "tipo", rename_all = "lowercase")]
pub enum Blocco {
    Testo {
        testo: String,
    },
    Titolo {
        testo: String,
        livello: u8,
    },
    Formula {
        latex: String,
        display: bool,
    },
    Elenco {
        ordinato: bool,
        elementi: Vec<String>,
    },
    Immagine {
        url: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        alt: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        didascalia: Option<String>,
    },
    Nota {
        variante: VarianteNota,
        blocchi: Vec<Blocco>,
    },
    Callout {
        variante: VarianteCallout,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        titolo: Option<String>,
        blocchi: Vec<Blocco>,
    },
    Definizione {
        termine: String,
        blocchi: Vec<Blocco>,
    },
    Teorema {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        nome: Option<String>,
        enunciato: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        dimostrazione: Option<Vec<Blocco>>,
    },
    Esempio {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        titolo: Option<String>,
        blocchi: Vec<Blocco>,
    },
    Attivita {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        titolo: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        durata: Option<String>,
        blocchi: Vec<Blocco>,
    },
    Question {
        domanda: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        suggerimento: Option<String>,
        blocchi: Vec<Blocco>,
    },
    Brainstorming {
        domanda: String,
        blocchi: Vec<Blocco>,
    },
    Quiz {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        domanda: Option<String>,
        opzioni: Vec<OpzioneQuiz>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        spiegazione: Option<String>,
    },
    Video {
        url: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        titolo: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        durata: Option<String>,
    },
    Demo {
        nome: String,
        #[serde(default)]
        parametri: BTreeMap<String, String>,
    },
    Tabella {
        intestazione: Vec<String>,
        righe: Vec<Vec<String>>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        didascalia: Option<String>,
    },
    Codice {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        linguaggio: Option<String>,
        codice: String,
    },
    Citazione {
        testo: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        fonte: Option<String>,
    },
    Collegamento {
        url: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        testo: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        descrizione: Option<String>,
    },
    Separatore,
    Sequenza {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        titolo: Option<String>,
        #[serde(rename = "showProgress")]
        show_progress: bool,
        #[serde(rename = "allowJump")]
        allow_jump: bool,
        steps: Vec<SequenzaStep>,
    },
}

impl Blocco {
    /// The wire tag of this block (the serialized `tipo` value)
    pub fn tipo(&self) -> &'static str {
        match self {
            Blocco::Testo { .. } => "testo",
            Blocco::Titolo { .. } => "titolo",
            Blocco::Formula { .. } => "formula",
            Blocco::Elenco { .. } => "elenco",
            Blocco::Immagine { .. } => "immagine",
            Blocco::Nota { .. } => "nota",
            Blocco::Callout { .. } => "callout",
            Blocco::Definizione { .. } => "definizione",
            Blocco::Teorema { .. } => "teorema",
            Blocco::Esempio { .. } => "esempio",
            Blocco::Attivita { .. } => "attivita",
            Blocco::Question { .. } => "question",
            Blocco::Brainstorming { .. } => "brainstorming",
            Blocco::Quiz { .. } => "quiz",
            Blocco::Video { .. } => "video",
            Blocco::Demo { .. } => "demo",
            Blocco::Tabella { .. } => "tabella",
            Blocco::Codice { .. } => "codice",
            Blocco::Citazione { .. } => "citazione",
            Blocco::Collegamento { .. } => "collegamento",
            Blocco::Separatore => "separatore",
            Blocco::Sequenza { .. } => "sequenza",
        }
    }

    pub fn is_sequenza(&self) -> bool {
        matches!(self, Blocco::Sequenza { .. })
    }
}
