//! Step accumulation and the sequence-directive body parser
//!
//! Both sequence strategies share one primitive: accumulate blocks into a
//! step, track pause offsets, flush on a boundary. The implicit builder in
//! `sequence` feeds it compiled AST blocks; [`parse_step_content`] feeds it
//! fragment-parsed text split on `== Title ==` and `>>>` marker lines.

use super::fragment::parse_fragment;
use crate::lesson::{Blocco, SequenzaStep};
use once_cell::sync::Lazy;
use regex::Regex;

/// A `== Title ==` step marker on its own line
static STEP_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]*==[ \t]*(.+?)[ \t]*==[ \t]*$").unwrap());

/// Accumulates blocks and transition offsets for one step under
/// construction
///
/// A transition offset records "pause immediately before block index N".
/// Offsets are deduplicated so consecutive markers collapse into one pause,
/// keeping the serialized list strictly ascending.
#[derive(Debug, Default)]
pub struct StepAccumulator {
    titolo: Option<String>,
    blocchi: Vec<Blocco>,
    transitions: Vec<usize>,
}

impl StepAccumulator {
    pub fn new(titolo: Option<String>) -> Self {
        Self {
            titolo,
            blocchi: Vec::new(),
            transitions: Vec::new(),
        }
    }

    pub fn push(&mut self, blocco: Blocco) {
        self.blocchi.push(blocco);
    }

    pub fn extend(&mut self, blocchi: Vec<Blocco>) {
        self.blocchi.extend(blocchi);
    }

    /// Record a pause at the current cursor position
    pub fn mark_transition(&mut self) {
        let cursor = self.blocchi.len();
        if self.transitions.last() != Some(&cursor) {
            self.transitions.push(cursor);
        }
    }

    /// Flush into a step; steps with zero blocks are dropped and an empty
    /// transition list is omitted rather than serialized
    pub fn finish(self) -> Option<SequenzaStep> {
        if self.blocchi.is_empty() {
            return None;
        }
        let transitions = if self.transitions.is_empty() {
            None
        } else {
            Some(self.transitions)
        };
        Some(SequenzaStep {
            titolo: self.titolo,
            blocchi: self.blocchi,
            transitions,
        })
    }
}

/// Parse a sequence directive's raw body into steps
///
/// Two-level split: `== Title ==` lines partition the body into titled
/// steps, then `>>>` lines inside each body mark pause points. Text before
/// the first marker (or the whole body when there is no marker) becomes an
/// untitled step.
pub fn parse_step_content(raw: &str) -> Vec<SequenzaStep> {
    let mut pairs: Vec<(Option<String>, &str)> = Vec::new();

    let markers: Vec<(usize, usize, String)> = STEP_MARKER
        .captures_iter(raw)
        .map(|caps| {
            let whole = caps.get(0).unwrap();
            (whole.start(), whole.end(), caps[1].trim().to_string())
        })
        .collect();

    if markers.is_empty() {
        pairs.push((None, raw));
    } else {
        let first_start = markers[0].0;
        if !raw[..first_start].trim().is_empty() {
            pairs.push((None, &raw[..first_start]));
        }
        for (idx, (_, end, title)) in markers.iter().enumerate() {
            let body_end = markers.get(idx + 1).map(|m| m.0).unwrap_or(raw.len());
            pairs.push((Some(title.clone()), &raw[*end..body_end]));
        }
    }

    pairs
        .into_iter()
        .filter_map(|(titolo, body)| build_step(titolo, body))
        .collect()
}

/// Build one step from its body text, splitting on `>>>` lines
fn build_step(titolo: Option<String>, body: &str) -> Option<SequenzaStep> {
    let mut accumulator = StepAccumulator::new(titolo);

    for (index, fragment) in split_on_transition_lines(body).into_iter().enumerate() {
        if index > 0 {
            accumulator.mark_transition();
        }
        let trimmed = fragment.trim();
        if trimmed.is_empty() {
            continue;
        }
        accumulator.extend(parse_fragment(trimmed));
    }

    accumulator.finish()
}

/// Split on lines that are exactly `>>>` (their own line, nothing else)
fn split_on_transition_lines(body: &str) -> Vec<String> {
    let mut fragments = vec![String::new()];
    for line in body.lines() {
        if line.trim() == ">>>" {
            fragments.push(String::new());
        } else {
            let current = fragments.last_mut().unwrap();
            if !current.is_empty() {
                current.push('\n');
            }
            current.push_str(line);
        }
    }
    fragments
}
