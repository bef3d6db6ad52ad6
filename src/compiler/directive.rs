//! Directive compiler registry
//!
//! A fixed lookup table from directive name to compiler function. Adding a
//! directive is a table insertion, not a new branch through the compiler.
//! Shared policy: every attribute accepts an English and an Italian
//! spelling (English first), missing required fields report `E005` and drop
//! the block, and an unrecognized directive name is only a `W001` warning.

use super::block::Compiled;
use super::diagnostics::{CompilerError, CompilerWarning, Diagnostics, ErrorCode, WarningCode};
use super::fragment::parse_fragment;
use super::steps::parse_step_content;
use crate::ast::Location;
use crate::lesson::{Blocco, OpzioneQuiz, VarianteCallout, VarianteNota};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};

/// A quiz option line: `- [ ] testo` or `- [x] testo`
static QUIZ_OPTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-\s*\[(?P<mark>[ xX])\]\s*(?P<text>.*)$").unwrap());

/// Everything a directive compiler gets to see
#[derive(Debug, Clone, Copy)]
pub struct DirectiveInput<'a> {
    pub name: &'a str,
    pub attributes: &'a BTreeMap<String, String>,
    pub content: &'a str,
    /// Unparsed full body; only the sequence directive reads it
    pub raw_content: Option<&'a str>,
    pub location: Option<Location>,
}

impl<'a> DirectiveInput<'a> {
    /// Bilingual attribute lookup: first non-blank value wins
    fn attr(&self, keys: &[&str]) -> Option<&'a str> {
        keys.iter().find_map(|key| {
            self.attributes
                .get(*key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
        })
    }

    fn attr_string(&self, keys: &[&str]) -> Option<String> {
        self.attr(keys).map(str::to_string)
    }

    /// `true`/`false` attribute with a default for anything else
    fn attr_bool(&self, keys: &[&str], default: bool) -> bool {
        match self.attr(keys) {
            Some("true") => true,
            Some("false") => false,
            _ => default,
        }
    }

    /// Fragment-parse the attribute-stripped body
    fn body_blocks(&self) -> Vec<Blocco> {
        parse_fragment(self.content)
    }
}

type DirectiveFn = fn(&DirectiveInput, &mut Diagnostics) -> Compiled;

/// Directive name -> compiler, both spellings registered where both exist
static REGISTRY: Lazy<HashMap<&'static str, DirectiveFn>> = Lazy::new(|| {
    let mut table: HashMap<&'static str, DirectiveFn> = HashMap::new();
    let mut register = |names: &[&'static str], compiler: DirectiveFn| {
        for name in names.iter().copied() {
            table.insert(name, compiler);
        }
    };
    register(&["note", "nota"], compile_nota);
    register(&["callout"], compile_callout);
    register(&["definition", "definizione"], compile_definizione);
    register(&["theorem", "teorema"], compile_teorema);
    register(&["example", "esempio"], compile_esempio);
    register(&["activity", "attivita"], compile_attivita);
    register(&["question"], compile_question);
    register(&["brainstorming"], compile_brainstorming);
    register(&["quiz"], compile_quiz);
    register(&["image", "immagine"], compile_immagine);
    register(&["video"], compile_video);
    register(&["demo"], compile_demo);
    register(&["table", "tabella"], compile_tabella);
    register(&["code", "codice"], compile_codice);
    register(&["quote", "citazione"], compile_citazione);
    register(&["link", "collegamento"], compile_collegamento);
    register(&["separator", "separatore"], compile_separatore);
    register(&["sequence", "sequenza"], compile_sequenza);
    register(&["json"], compile_json);
    table
});

/// Whether a directive name selects the sequence strategy for its region
pub fn is_sequence_directive(name: &str) -> bool {
    name == "sequenza" || name == "sequence"
}

/// Compile one directive via the registry
///
/// Unknown names produce a `W001` warning and no output; they never fail
/// the document.
pub fn compile_directive(input: &DirectiveInput, diagnostics: &mut Diagnostics) -> Compiled {
    match REGISTRY.get(input.name) {
        Some(compiler) => compiler(input, diagnostics),
        None => {
            diagnostics.warning(
                CompilerWarning::new(
                    WarningCode::W001,
                    format!("Direttiva non riconosciuta: '{}'", input.name),
                )
                .with_location(input.location)
                .with_help("Il blocco è stato ignorato"),
            );
            Compiled::None
        }
    }
}

/// Report `E005` for a missing required field and drop the block
fn missing_field(input: &DirectiveInput, field: &str, diagnostics: &mut Diagnostics) -> Compiled {
    diagnostics.error(
        CompilerError::new(
            ErrorCode::E005,
            format!(
                "La direttiva '{}' richiede il campo '{}'",
                input.name, field
            ),
        )
        .with_location(input.location)
        .with_help(format!("Aggiungi l'attributo '{field}' alla direttiva")),
    );
    Compiled::None
}

fn compile_nota(input: &DirectiveInput, _diagnostics: &mut Diagnostics) -> Compiled {
    let variante = match input.attr(&["type", "tipo"]).unwrap_or("") {
        "tip" | "suggerimento" => VarianteNota::Suggerimento,
        "warning" | "attenzione" => VarianteNota::Attenzione,
        "important" | "importante" => VarianteNota::Importante,
        _ => VarianteNota::Info,
    };
    Compiled::One(Blocco::Nota {
        variante,
        blocchi: input.body_blocks(),
    })
}

fn compile_callout(input: &DirectiveInput, _diagnostics: &mut Diagnostics) -> Compiled {
    let variante = match input.attr(&["type", "tipo"]).unwrap_or("") {
        "goal" | "obiettivo" => VarianteCallout::Obiettivo,
        "curiosity" | "curiosita" => VarianteCallout::Curiosita,
        "challenge" | "sfida" => VarianteCallout::Sfida,
        _ => VarianteCallout::Ricorda,
    };
    Compiled::One(Blocco::Callout {
        variante,
        titolo: input.attr_string(&["title", "titolo"]),
        blocchi: input.body_blocks(),
    })
}

fn compile_definizione(input: &DirectiveInput, diagnostics: &mut Diagnostics) -> Compiled {
    let Some(termine) = input.attr_string(&["term", "termine"]) else {
        return missing_field(input, "termine", diagnostics);
    };
    Compiled::One(Blocco::Definizione {
        termine,
        blocchi: input.body_blocks(),
    })
}

fn compile_teorema(input: &DirectiveInput, diagnostics: &mut Diagnostics) -> Compiled {
    let Some(enunciato) = input.attr_string(&["statement", "enunciato"]) else {
        return missing_field(input, "enunciato", diagnostics);
    };
    let dimostrazione = if input.content.trim().is_empty() {
        None
    } else {
        Some(input.body_blocks())
    };
    Compiled::One(Blocco::Teorema {
        nome: input.attr_string(&["name", "nome"]),
        enunciato,
        dimostrazione,
    })
}

fn compile_esempio(input: &DirectiveInput, diagnostics: &mut Diagnostics) -> Compiled {
    if input.content.trim().is_empty() {
        return missing_field(input, "contenuto", diagnostics);
    }
    Compiled::One(Blocco::Esempio {
        titolo: input.attr_string(&["title", "titolo"]),
        blocchi: input.body_blocks(),
    })
}

fn compile_attivita(input: &DirectiveInput, _diagnostics: &mut Diagnostics) -> Compiled {
    Compiled::One(Blocco::Attivita {
        titolo: input.attr_string(&["title", "titolo"]),
        durata: input.attr_string(&["duration", "durata"]),
        blocchi: input.body_blocks(),
    })
}

fn compile_question(input: &DirectiveInput, diagnostics: &mut Diagnostics) -> Compiled {
    let Some(domanda) = input.attr_string(&["prompt", "domanda"]) else {
        return missing_field(input, "domanda", diagnostics);
    };
    Compiled::One(Blocco::Question {
        domanda,
        suggerimento: input.attr_string(&["hint", "suggerimento"]),
        blocchi: input.body_blocks(),
    })
}

fn compile_brainstorming(input: &DirectiveInput, diagnostics: &mut Diagnostics) -> Compiled {
    let Some(domanda) = input.attr_string(&["question", "domanda"]) else {
        return missing_field(input, "domanda", diagnostics);
    };
    Compiled::One(Blocco::Brainstorming {
        domanda,
        blocchi: input.body_blocks(),
    })
}

fn compile_quiz(input: &DirectiveInput, diagnostics: &mut Diagnostics) -> Compiled {
    let opzioni: Vec<OpzioneQuiz> = input
        .content
        .lines()
        .filter_map(|line| {
            QUIZ_OPTION.captures(line.trim()).map(|caps| OpzioneQuiz {
                testo: caps["text"].trim().to_string(),
                corretta: !caps["mark"].trim().is_empty(),
            })
        })
        .collect();

    if opzioni.is_empty() {
        return missing_field(input, "opzioni", diagnostics);
    }

    // zero or several [x] marks are accepted as authored
    Compiled::One(Blocco::Quiz {
        domanda: input.attr_string(&["question", "domanda"]),
        opzioni,
        spiegazione: input.attr_string(&["explanation", "spiegazione"]),
    })
}

fn compile_immagine(input: &DirectiveInput, diagnostics: &mut Diagnostics) -> Compiled {
    let Some(url) = input.attr_string(&["src", "url"]) else {
        return missing_field(input, "url", diagnostics);
    };
    Compiled::One(Blocco::Immagine {
        url,
        alt: input.attr_string(&["alt"]),
        didascalia: input.attr_string(&["caption", "didascalia"]),
    })
}

fn compile_video(input: &DirectiveInput, diagnostics: &mut Diagnostics) -> Compiled {
    let Some(url) = input.attr_string(&["src", "url"]) else {
        return missing_field(input, "url", diagnostics);
    };
    Compiled::One(Blocco::Video {
        url,
        titolo: input.attr_string(&["title", "titolo"]),
        durata: input.attr_string(&["duration", "durata"]),
    })
}

fn compile_demo(input: &DirectiveInput, diagnostics: &mut Diagnostics) -> Compiled {
    let Some(nome) = input.attr_string(&["name", "nome"]) else {
        return missing_field(input, "nome", diagnostics);
    };
    // every other attribute is forwarded to the demo component untouched
    let parametri: BTreeMap<String, String> = input
        .attributes
        .iter()
        .filter(|(key, _)| key.as_str() != "name" && key.as_str() != "nome")
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();
    Compiled::One(Blocco::Demo { nome, parametri })
}

/// The body of a `table` directive is a JSON payload
#[derive(Debug, Default, Deserialize)]
struct TablePayload {
    #[serde(default)]
    header: Vec<String>,
    #[serde(default)]
    rows: Vec<Vec<String>>,
}

fn compile_tabella(input: &DirectiveInput, _diagnostics: &mut Diagnostics) -> Compiled {
    // malformed JSON degrades to an empty table rather than erroring
    let payload: TablePayload = serde_json::from_str(input.content).unwrap_or_default();
    Compiled::One(Blocco::Tabella {
        intestazione: payload.header,
        righe: payload.rows,
        didascalia: input.attr_string(&["caption", "didascalia"]),
    })
}

fn compile_codice(input: &DirectiveInput, _diagnostics: &mut Diagnostics) -> Compiled {
    Compiled::One(Blocco::Codice {
        linguaggio: input.attr_string(&["lang", "linguaggio"]),
        codice: input.content.trim_matches('\n').to_string(),
    })
}

fn compile_citazione(input: &DirectiveInput, _diagnostics: &mut Diagnostics) -> Compiled {
    Compiled::One(Blocco::Citazione {
        testo: input.content.trim().to_string(),
        fonte: input.attr_string(&["source", "fonte"]),
    })
}

fn compile_collegamento(input: &DirectiveInput, diagnostics: &mut Diagnostics) -> Compiled {
    let Some(url) = input.attr_string(&["href", "url"]) else {
        return missing_field(input, "url", diagnostics);
    };
    Compiled::One(Blocco::Collegamento {
        url,
        testo: input.attr_string(&["text", "testo"]),
        descrizione: input.attr_string(&["description", "descrizione"]),
    })
}

fn compile_separatore(_input: &DirectiveInput, _diagnostics: &mut Diagnostics) -> Compiled {
    Compiled::One(Blocco::Separatore)
}

fn compile_sequenza(input: &DirectiveInput, _diagnostics: &mut Diagnostics) -> Compiled {
    // the sequence mini-syntax lives in the unparsed body
    let raw = input.raw_content.unwrap_or(input.content);
    Compiled::One(Blocco::Sequenza {
        titolo: input.attr_string(&["title", "titolo"]),
        show_progress: input.attr_bool(&["progress", "progresso"], true),
        allow_jump: input.attr_bool(&["jump", "salto"], false),
        steps: parse_step_content(raw),
    })
}

fn compile_json(input: &DirectiveInput, diagnostics: &mut Diagnostics) -> Compiled {
    let report = |message: String, diagnostics: &mut Diagnostics| {
        diagnostics.error(
            CompilerError::new(
                ErrorCode::E006,
                format!("Contenuto JSON non valido: {message}"),
            )
            .with_location(input.location)
            .with_help("Il corpo della direttiva 'json' deve essere un blocco (o una lista di blocchi) in formato JSON"),
        );
        Compiled::None
    };

    let value: serde_json::Value = match serde_json::from_str(input.content) {
        Ok(value) => value,
        Err(err) => return report(err.to_string(), diagnostics),
    };

    if value.is_array() {
        match serde_json::from_value::<Vec<Blocco>>(value) {
            Ok(blocks) => Compiled::Many(blocks),
            Err(err) => report(err.to_string(), diagnostics),
        }
    } else {
        match serde_json::from_value::<Blocco>(value) {
            Ok(block) => Compiled::One(block),
            Err(err) => report(err.to_string(), diagnostics),
        }
    }
}
