//! Sequence builder
//!
//! Decides, per content region (a section's blocks, or the introduction or
//! conclusion), which of the four mutually exclusive strategies applies,
//! first match wins:
//!
//! 1. an explicit `sequenza` directive anywhere in the region
//! 2. implicit steps split on author-level `##` headings
//! 3. a single step split only by bare transition markers
//! 4. a flat block list (transitions skipped)
//!
//! A region therefore compiles to either a flat list of non-sequence blocks
//! or a singleton list holding exactly one sequence, never a mix.

use super::block::{compile_block, Compiled};
use super::diagnostics::Diagnostics;
use super::directive::{self, DirectiveInput};
use super::steps::StepAccumulator;
use crate::ast::AstBlock;
use crate::lesson::{Blocco, SequenzaStep};

/// Compile one content region into its output block list
pub fn build_region(blocks: &[AstBlock], diagnostics: &mut Diagnostics) -> Vec<Blocco> {
    // 1. explicit sequence directive wins outright; when its compilation
    //    fails the region degrades to empty, never to another strategy
    if let Some(block) = blocks
        .iter()
        .find(|b| b.directive_name().is_some_and(directive::is_sequence_directive))
    {
        if let AstBlock::Directive {
            name,
            attributes,
            content,
            raw_content,
            location,
        } = block
        {
            let mut out = Vec::new();
            directive::compile_directive(
                &DirectiveInput {
                    name,
                    attributes,
                    content,
                    raw_content: raw_content.as_deref(),
                    location: *location,
                },
                diagnostics,
            )
            .append_to(&mut out);
            return out;
        }
        unreachable!("directive_name() only matches directive blocks");
    }

    // 2. implicit sequence from ## headings
    if blocks.iter().any(AstBlock::is_step_heading) {
        let steps = build_steps(blocks, true, diagnostics);
        return vec![wrap_steps(steps)];
    }

    // 3. bare transitions: one step, pauses only
    if blocks.iter().any(AstBlock::is_transition) {
        let steps = build_steps(blocks, false, diagnostics);
        return vec![wrap_steps(steps)];
    }

    // 4. flat list
    let mut out = Vec::new();
    for block in blocks {
        if block.is_transition() {
            continue;
        }
        compile_block(block, diagnostics).append_to(&mut out);
    }
    out
}

/// The shared step-building walk over a region's blocks
///
/// With `split_on_headings` every `##` heading flushes the current step and
/// opens a new one titled by the heading text; without it the whole region
/// accumulates into a single step. Transitions mark pauses either way.
fn build_steps(
    blocks: &[AstBlock],
    split_on_headings: bool,
    diagnostics: &mut Diagnostics,
) -> Vec<SequenzaStep> {
    let mut steps = Vec::new();
    let mut accumulator = StepAccumulator::new(None);

    for block in blocks {
        if split_on_headings && block.is_step_heading() {
            let title = match block {
                AstBlock::Heading { text, .. } => Some(text.clone()),
                _ => None,
            };
            let previous = std::mem::replace(&mut accumulator, StepAccumulator::new(title));
            steps.extend(previous.finish());
            continue;
        }
        if block.is_transition() {
            accumulator.mark_transition();
            continue;
        }
        match compile_block(block, diagnostics) {
            Compiled::None => {}
            Compiled::One(blocco) => accumulator.push(blocco),
            Compiled::Many(blocchi) => accumulator.extend(blocchi),
        }
    }

    steps.extend(accumulator.finish());
    steps
}

fn wrap_steps(steps: Vec<SequenzaStep>) -> Blocco {
    Blocco::Sequenza {
        titolo: None,
        show_progress: true,
        allow_jump: false,
        steps,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paragraph(text: &str) -> AstBlock {
        AstBlock::Paragraph {
            text: text.into(),
            location: None,
        }
    }

    fn heading(depth: u8, text: &str) -> AstBlock {
        AstBlock::Heading {
            depth,
            text: text.into(),
            location: None,
        }
    }

    fn transition() -> AstBlock {
        AstBlock::Transition { location: None }
    }

    fn sequence_directive(raw: &str) -> AstBlock {
        AstBlock::Directive {
            name: "sequenza".into(),
            attributes: Default::default(),
            content: String::new(),
            raw_content: Some(raw.into()),
            location: None,
        }
    }

    #[test]
    fn test_flat_region_compiles_in_order() {
        let mut diagnostics = Diagnostics::new();
        let blocks = vec![paragraph("uno"), heading(3, "sotto"), paragraph("due")];
        let out = build_region(&blocks, &mut diagnostics);
        assert_eq!(out.len(), 3);
        assert!(out.iter().all(|b| !b.is_sequenza()));
    }

    #[test]
    fn test_flat_region_skips_unknown_nodes() {
        let mut diagnostics = Diagnostics::new();
        let blocks = vec![paragraph("uno"), AstBlock::Unknown, paragraph("due")];
        let out = build_region(&blocks, &mut diagnostics);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn test_headings_promote_region_to_sequence() {
        let mut diagnostics = Diagnostics::new();
        let blocks = vec![
            heading(2, "Primo"),
            paragraph("contenuto uno"),
            heading(2, "Secondo"),
            paragraph("contenuto due"),
        ];
        let out = build_region(&blocks, &mut diagnostics);
        assert_eq!(out.len(), 1);
        match &out[0] {
            Blocco::Sequenza { steps, .. } => {
                assert_eq!(steps.len(), 2);
                assert_eq!(steps[0].titolo.as_deref(), Some("Primo"));
                assert_eq!(steps[1].titolo.as_deref(), Some("Secondo"));
                assert_eq!(steps[0].blocchi.len(), 1);
                assert_eq!(steps[0].transitions, None);
            }
            other => panic!("expected sequenza, got {other:?}"),
        }
    }

    #[test]
    fn test_heading_consumed_as_title_not_block() {
        let mut diagnostics = Diagnostics::new();
        let blocks = vec![heading(2, "Solo titolo"), paragraph("testo")];
        let out = build_region(&blocks, &mut diagnostics);
        match &out[0] {
            Blocco::Sequenza { steps, .. } => {
                assert!(!steps[0]
                    .blocchi
                    .iter()
                    .any(|b| matches!(b, Blocco::Titolo { .. })));
            }
            other => panic!("expected sequenza, got {other:?}"),
        }
    }

    #[test]
    fn test_deeper_headings_stay_inside_steps() {
        let mut diagnostics = Diagnostics::new();
        let blocks = vec![
            heading(2, "Passo"),
            heading(3, "Dettaglio"),
            paragraph("testo"),
        ];
        let out = build_region(&blocks, &mut diagnostics);
        match &out[0] {
            Blocco::Sequenza { steps, .. } => {
                assert_eq!(steps.len(), 1);
                assert_eq!(steps[0].blocchi.len(), 2);
                assert!(matches!(steps[0].blocchi[0], Blocco::Titolo { .. }));
            }
            other => panic!("expected sequenza, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_steps_are_dropped() {
        let mut diagnostics = Diagnostics::new();
        let blocks = vec![
            heading(2, "Vuoto"),
            heading(2, "Solo transizioni"),
            transition(),
            heading(2, "Pieno"),
            paragraph("testo"),
        ];
        let out = build_region(&blocks, &mut diagnostics);
        match &out[0] {
            Blocco::Sequenza { steps, .. } => {
                assert_eq!(steps.len(), 1);
                assert_eq!(steps[0].titolo.as_deref(), Some("Pieno"));
            }
            other => panic!("expected sequenza, got {other:?}"),
        }
    }

    #[test]
    fn test_transitions_record_offsets_within_step() {
        let mut diagnostics = Diagnostics::new();
        let blocks = vec![
            heading(2, "Passo"),
            paragraph("a"),
            transition(),
            paragraph("b"),
            paragraph("c"),
            transition(),
            paragraph("d"),
        ];
        let out = build_region(&blocks, &mut diagnostics);
        match &out[0] {
            Blocco::Sequenza { steps, .. } => {
                assert_eq!(steps[0].blocchi.len(), 4);
                assert_eq!(steps[0].transitions, Some(vec![1, 3]));
            }
            other => panic!("expected sequenza, got {other:?}"),
        }
    }

    #[test]
    fn test_bare_transitions_make_single_step_sequence() {
        let mut diagnostics = Diagnostics::new();
        let blocks = vec![paragraph("a"), transition(), paragraph("b")];
        let out = build_region(&blocks, &mut diagnostics);
        assert_eq!(out.len(), 1);
        match &out[0] {
            Blocco::Sequenza { steps, .. } => {
                assert_eq!(steps.len(), 1);
                assert_eq!(steps[0].titolo, None);
                assert_eq!(steps[0].blocchi.len(), 2);
                assert_eq!(steps[0].transitions, Some(vec![1]));
            }
            other => panic!("expected sequenza, got {other:?}"),
        }
    }

    #[test]
    fn test_sequence_directive_beats_headings() {
        let mut diagnostics = Diagnostics::new();
        let blocks = vec![
            heading(2, "Ignorato"),
            paragraph("ignorato"),
            sequence_directive("== Esplicito ==\ncontenuto"),
        ];
        let out = build_region(&blocks, &mut diagnostics);
        assert_eq!(out.len(), 1);
        match &out[0] {
            Blocco::Sequenza { steps, .. } => {
                assert_eq!(steps.len(), 1);
                assert_eq!(steps[0].titolo.as_deref(), Some("Esplicito"));
            }
            other => panic!("expected sequenza, got {other:?}"),
        }
    }

    #[test]
    fn test_english_sequence_name_also_selects_directive_strategy() {
        let mut diagnostics = Diagnostics::new();
        let blocks = vec![AstBlock::Directive {
            name: "sequence".into(),
            attributes: Default::default(),
            content: String::new(),
            raw_content: Some("solo testo".into()),
            location: None,
        }];
        let out = build_region(&blocks, &mut diagnostics);
        assert_eq!(out.len(), 1);
        assert!(out[0].is_sequenza());
    }

    #[test]
    fn test_region_never_mixes_sequence_and_flat_blocks() {
        let mut diagnostics = Diagnostics::new();
        let blocks = vec![
            paragraph("prima"),
            sequence_directive("== Uno ==\ntesto"),
            paragraph("dopo"),
        ];
        let out = build_region(&blocks, &mut diagnostics);
        assert_eq!(out.len(), 1);
        assert!(out[0].is_sequenza());
    }
}
