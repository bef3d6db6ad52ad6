//! Per-block dispatch
//!
//! A pure mapping from one input AST block to its output constructor.
//! Non-directive blocks have a fixed 1:1 mapping; directives go through the
//! registry. Transitions are handled by the sequence builder before they
//! reach this function, and unknown node kinds compile to nothing.

use super::diagnostics::Diagnostics;
use super::directive::{self, DirectiveInput};
use crate::ast::AstBlock;
use crate::lesson::Blocco;

/// Result of compiling one AST block
#[derive(Debug, Clone, PartialEq)]
pub enum Compiled {
    /// Nothing produced (dropped block, failed directive, unknown node)
    None,
    One(Blocco),
    /// A `json` escape hatch may expand into several blocks
    Many(Vec<Blocco>),
}

impl Compiled {
    /// Number of output blocks this result contributes
    pub fn len(&self) -> usize {
        match self {
            Compiled::None => 0,
            Compiled::One(_) => 1,
            Compiled::Many(blocks) => blocks.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn append_to(self, out: &mut Vec<Blocco>) {
        match self {
            Compiled::None => {}
            Compiled::One(block) => out.push(block),
            Compiled::Many(blocks) => out.extend(blocks),
        }
    }
}

/// Compile one AST block into zero, one or many output blocks
pub fn compile_block(block: &AstBlock, diagnostics: &mut Diagnostics) -> Compiled {
    match block {
        AstBlock::Heading { depth, text, .. } => Compiled::One(Blocco::Titolo {
            testo: text.clone(),
            // author headings render two levels below the lesson title
            livello: (*depth).clamp(2, 4),
        }),
        AstBlock::Paragraph { text, .. } => Compiled::One(Blocco::Testo {
            testo: text.clone(),
        }),
        AstBlock::LatexDisplay { latex, .. } => Compiled::One(Blocco::Formula {
            latex: latex.clone(),
            display: true,
        }),
        AstBlock::List { ordered, items, .. } => Compiled::One(Blocco::Elenco {
            ordinato: *ordered,
            elementi: items.clone(),
        }),
        AstBlock::Image {
            url, alt, caption, ..
        } => Compiled::One(Blocco::Immagine {
            url: url.clone(),
            alt: alt.clone(),
            didascalia: caption.clone(),
        }),
        AstBlock::Directive {
            name,
            attributes,
            content,
            raw_content,
            location,
        } => directive::compile_directive(
            &DirectiveInput {
                name,
                attributes,
                content,
                raw_content: raw_content.as_deref(),
                location: *location,
            },
            diagnostics,
        ),
        // transitions are boundary markers, never content
        AstBlock::Transition { .. } => Compiled::None,
        AstBlock::Unknown => Compiled::None,
    }
}
