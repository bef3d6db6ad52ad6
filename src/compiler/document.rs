//! Top-level document compiler
//!
//! Orchestrates one `compile()` call: seed the diagnostics sink from the
//! AST, validate metadata (fail fast), compile each section region, then
//! the introduction/conclusion and resources, and derive the outcome from
//! the final error list. `success` is never a control-flow flag: it is
//! `errors.is_empty()`, and `lesson` is non-null exactly when it holds.

use super::diagnostics::{CompilerError, CompilerWarning, Diagnostics, ErrorCode};
use super::{metadata, sequence};
use crate::ast::{AstDocument, AstResource};
use crate::lesson::{Lezione, Risorsa, Sezione};
use serde::{Deserialize, Serialize};

/// Compiler configuration
///
/// No options are recognized yet; the struct is the extension point the
/// public constructor is committed to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompilerOptions {}

/// The result of one `compile()` call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompilerOutput {
    pub success: bool,
    pub lesson: Option<Lezione>,
    pub errors: Vec<CompilerError>,
    pub warnings: Vec<CompilerWarning>,
}

impl CompilerOutput {
    fn from_diagnostics(lesson: Option<Lezione>, diagnostics: Diagnostics) -> Self {
        let (errors, warnings) = diagnostics.into_parts();
        let success = errors.is_empty();
        Self {
            success,
            lesson: if success { lesson } else { None },
            errors,
            warnings,
        }
    }
}

/// The lez document compiler
///
/// Stateless across calls: every `compile()` owns a fresh diagnostics sink,
/// so compiling two documents with one instance cannot leak diagnostics
/// between them.
#[derive(Debug, Clone, Default)]
pub struct Compiler {
    #[allow(dead_code)]
    options: CompilerOptions,
}

impl Compiler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: CompilerOptions) -> Self {
        Self { options }
    }

    /// Compile one document
    pub fn compile(&self, ast: &AstDocument) -> CompilerOutput {
        let mut diagnostics =
            Diagnostics::seeded(ast.errors.clone(), ast.warnings.clone());

        let Some(frontmatter) = &ast.frontmatter else {
            diagnostics.error(
                CompilerError::new(ErrorCode::E001, "Frontmatter mancante")
                    .with_help("Ogni lezione inizia con un blocco di metadati tra '---'"),
            );
            return CompilerOutput::from_diagnostics(None, diagnostics);
        };

        let Some(metadati) = metadata::validate_metadata(frontmatter, &mut diagnostics) else {
            return CompilerOutput::from_diagnostics(None, diagnostics);
        };

        let sezioni: Vec<Sezione> = ast
            .sections
            .iter()
            .enumerate()
            .map(|(index, section)| Sezione {
                id: section
                    .id
                    .clone()
                    .unwrap_or_else(|| format!("sezione-{}", index + 1)),
                titolo: section
                    .title
                    .clone()
                    .unwrap_or_else(|| format!("Sezione {}", index + 1)),
                blocchi: sequence::build_region(&section.blocks, &mut diagnostics),
            })
            .collect();

        let introduzione = if ast.introduction.is_empty() {
            None
        } else {
            Some(sequence::build_region(&ast.introduction, &mut diagnostics))
        };
        let conclusione = if ast.conclusion.is_empty() {
            None
        } else {
            Some(sequence::build_region(&ast.conclusion, &mut diagnostics))
        };

        let risorse = if ast.resources.is_empty() {
            None
        } else {
            Some(ast.resources.iter().map(project_resource).collect())
        };

        let lesson = Lezione {
            metadati,
            sezioni,
            introduzione,
            conclusione,
            risorse,
        };
        CompilerOutput::from_diagnostics(Some(lesson), diagnostics)
    }
}

fn project_resource(resource: &AstResource) -> Risorsa {
    Risorsa {
        tipo: resource.kind.clone(),
        titolo: resource.title.clone(),
        url: resource.url.clone(),
        descrizione: resource.description.clone(),
    }
}
