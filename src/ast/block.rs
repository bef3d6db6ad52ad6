//! Block-level AST nodes
//!
//! `AstBlock` is the tagged union the upstream parser produces for every
//! block-level construct. Directives carry their attribute map plus both the
//! attribute-parsed `content` and, for the sequence directive, the unparsed
//! `rawContent` body. A `Transition` is a zero-content marker: it never
//! becomes output on its own, it only moves step boundaries.

use super::location::Location;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A block-level node in the input AST
///
/// Unrecognized node types deserialize as [`AstBlock::Unknown`] and compile
/// to nothing, so a newer upstream parser cannot break older compilers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum AstBlock {
    Heading {
        depth: u8,
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        location: Option<Location>,
    },
    Paragraph {
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        location: Option<Location>,
    },
    LatexDisplay {
        latex: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        location: Option<Location>,
    },
    List {
        ordered: bool,
        #[serde(default)]
        items: Vec<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        location: Option<Location>,
    },
    Image {
        url: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        alt: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        caption: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        location: Option<Location>,
    },
    Directive {
        name: String,
        #[serde(default)]
        attributes: BTreeMap<String, String>,
        #[serde(default)]
        content: String,
        #[serde(
            default,
            rename = "rawContent",
            skip_serializing_if = "Option::is_none"
        )]
        raw_content: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        location: Option<Location>,
    },
    Transition {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        location: Option<Location>,
    },
    #[serde(other)]
    Unknown,
}

impl AstBlock {
    /// The source range of this node, when the parser recorded one
    pub fn location(&self) -> Option<Location> {
        match self {
            AstBlock::Heading { location, .. }
            | AstBlock::Paragraph { location, .. }
            | AstBlock::LatexDisplay { location, .. }
            | AstBlock::List { location, .. }
            | AstBlock::Image { location, .. }
            | AstBlock::Directive { location, .. }
            | AstBlock::Transition { location } => *location,
            AstBlock::Unknown => None,
        }
    }

    pub fn is_transition(&self) -> bool {
        matches!(self, AstBlock::Transition { .. })
    }

    /// True for an author-level `##` heading, the implicit step boundary
    pub fn is_step_heading(&self) -> bool {
        matches!(self, AstBlock::Heading { depth: 2, .. })
    }

    pub fn directive_name(&self) -> Option<&str> {
        match self {
            AstBlock::Directive { name, .. } => Some(name),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_heading() {
        let block: AstBlock =
            serde_json::from_str(r#"{"type": "heading", "depth": 2, "text": "Primo passo"}"#)
                .unwrap();
        assert!(block.is_step_heading());
        assert_eq!(block.location(), None);
    }

    #[test]
    fn test_deserialize_latex_display_tag() {
        let block: AstBlock =
            serde_json::from_str(r#"{"type": "latex-display", "latex": "x^2"}"#).unwrap();
        assert!(matches!(block, AstBlock::LatexDisplay { .. }));
    }

    #[test]
    fn test_deserialize_directive_defaults() {
        let block: AstBlock =
            serde_json::from_str(r#"{"type": "directive", "name": "nota"}"#).unwrap();
        match block {
            AstBlock::Directive {
                name,
                attributes,
                content,
                raw_content,
                ..
            } => {
                assert_eq!(name, "nota");
                assert!(attributes.is_empty());
                assert!(content.is_empty());
                assert!(raw_content.is_none());
            }
            other => panic!("expected directive, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_block_type_is_tolerated() {
        let block: AstBlock = serde_json::from_str(r#"{"type": "hologram"}"#).unwrap();
        assert_eq!(block, AstBlock::Unknown);
    }
}
