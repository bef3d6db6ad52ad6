//! Fragment parser
//!
//! A minimal, line-driven parser for raw text that is already isolated
//! inside a directive or step body. It recognizes display formulas, lists
//! and paragraphs and nothing else: headings, directives, images and nested
//! sequences belong to the top-level grammar, not here.

use crate::lesson::Blocco;
use once_cell::sync::Lazy;
use regex::Regex;

/// Ordered list marker: `1. item`
static ORDERED_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.\s+").unwrap());

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Either marker kind continues an open list; the first line fixes the type
fn is_list_marker(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.starts_with("- ") || ORDERED_MARKER.is_match(trimmed)
}

fn strip_list_marker(line: &str) -> String {
    let trimmed = line.trim_start();
    if let Some(rest) = trimmed.strip_prefix("- ") {
        return rest.trim().to_string();
    }
    if let Some(m) = ORDERED_MARKER.find(trimmed) {
        return trimmed[m.end()..].trim().to_string();
    }
    trimmed.trim().to_string()
}

/// A `$$` line opens (or closes) a formula construct
fn is_formula_line(line: &str) -> bool {
    line.trim().starts_with("$$")
}

/// Parse an isolated text fragment into primitive blocks
///
/// Blank lines separate constructs and never produce blocks themselves.
pub fn parse_fragment(text: &str) -> Vec<Blocco> {
    let lines: Vec<&str> = text.lines().collect();
    let mut blocks = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i].trim();

        if line.is_empty() {
            i += 1;
            continue;
        }

        // Single-line display formula: $$...$$
        if line.len() > 4 && line.starts_with("$$") && line.ends_with("$$") {
            let latex = line[2..line.len() - 2].trim().to_string();
            blocks.push(Blocco::Formula { latex, display: true });
            i += 1;
            continue;
        }

        // Multi-line display formula: bare $$ opens, bare $$ closes
        if line == "$$" {
            let mut body = Vec::new();
            i += 1;
            while i < lines.len() && lines[i].trim() != "$$" {
                body.push(lines[i]);
                i += 1;
            }
            // consume the closing marker if the input did not just end
            if i < lines.len() {
                i += 1;
            }
            blocks.push(Blocco::Formula {
                latex: body.join("\n").trim().to_string(),
                display: true,
            });
            continue;
        }

        // List: consecutive marker lines, type fixed by the first marker
        if is_list_marker(line) {
            let ordinato = ORDERED_MARKER.is_match(line);
            let mut elementi = Vec::new();
            while i < lines.len() && is_list_marker(lines[i].trim_start()) {
                elementi.push(strip_list_marker(lines[i]));
                i += 1;
            }
            blocks.push(Blocco::Elenco { ordinato, elementi });
            continue;
        }

        // Paragraph: everything until a blank, formula or list line
        let mut paragraph = vec![line.to_string()];
        i += 1;
        while i < lines.len() {
            let next = lines[i].trim();
            if next.is_empty() || is_formula_line(next) || is_list_marker(next) {
                break;
            }
            paragraph.push(next.to_string());
            i += 1;
        }
        blocks.push(Blocco::Testo {
            testo: paragraph.join("\n"),
        });
    }

    blocks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_fragment_yields_nothing() {
        assert!(parse_fragment("").is_empty());
        assert!(parse_fragment("\n\n   \n").is_empty());
    }

    #[test]
    fn test_single_paragraph() {
        let blocks = parse_fragment("Una frazione rappresenta una parte di un intero.");
        assert_eq!(
            blocks,
            vec![Blocco::Testo {
                testo: "Una frazione rappresenta una parte di un intero.".into()
            }]
        );
    }

    #[test]
    fn test_paragraph_joins_consecutive_lines() {
        let blocks = parse_fragment("Prima riga.\nSeconda riga.\n\nAltro paragrafo.");
        assert_eq!(blocks.len(), 2);
        assert_eq!(
            blocks[0],
            Blocco::Testo {
                testo: "Prima riga.\nSeconda riga.".into()
            }
        );
    }

    #[test]
    fn test_one_line_formula() {
        let blocks = parse_fragment("$$ \\frac{a}{b} $$");
        assert_eq!(
            blocks,
            vec![Blocco::Formula {
                latex: "\\frac{a}{b}".into(),
                display: true
            }]
        );
    }

    #[test]
    fn test_multiline_formula() {
        let blocks = parse_fragment("$$\nx^2 + y^2\n= z^2\n$$\ndopo");
        assert_eq!(blocks.len(), 2);
        assert_eq!(
            blocks[0],
            Blocco::Formula {
                latex: "x^2 + y^2\n= z^2".into(),
                display: true
            }
        );
        assert_eq!(blocks[1], Blocco::Testo { testo: "dopo".into() });
    }

    #[test]
    fn test_unclosed_formula_runs_to_end_of_input() {
        let blocks = parse_fragment("$$\na + b");
        assert_eq!(
            blocks,
            vec![Blocco::Formula {
                latex: "a + b".into(),
                display: true
            }]
        );
    }

    #[test]
    fn test_unordered_list() {
        let blocks = parse_fragment("- uno\n- due\n- tre");
        assert_eq!(
            blocks,
            vec![Blocco::Elenco {
                ordinato: false,
                elementi: vec!["uno".into(), "due".into(), "tre".into()]
            }]
        );
    }

    #[test]
    fn test_ordered_list_type_fixed_by_first_marker() {
        let blocks = parse_fragment("1. primo\n2. secondo\n- terzo");
        assert_eq!(
            blocks,
            vec![Blocco::Elenco {
                ordinato: true,
                elementi: vec!["primo".into(), "secondo".into(), "terzo".into()]
            }]
        );
    }

    #[test]
    fn test_blank_line_ends_list() {
        let blocks = parse_fragment("- uno\n\n- due");
        assert_eq!(blocks.len(), 2);
        assert!(matches!(blocks[0], Blocco::Elenco { .. }));
        assert!(matches!(blocks[1], Blocco::Elenco { .. }));
    }

    #[test]
    fn test_list_marker_interrupts_paragraph() {
        let blocks = parse_fragment("Testo introduttivo\n- elemento");
        assert_eq!(blocks.len(), 2);
        assert_eq!(
            blocks[0],
            Blocco::Testo {
                testo: "Testo introduttivo".into()
            }
        );
        assert!(matches!(blocks[1], Blocco::Elenco { .. }));
    }

    #[test]
    fn test_formula_interrupts_paragraph() {
        let blocks = parse_fragment("Considera:\n$$ x $$");
        assert_eq!(blocks.len(), 2);
        assert!(matches!(blocks[1], Blocco::Formula { .. }));
    }

    #[test]
    fn test_mixed_fragment() {
        let text = "Introduzione.\n\n$$ e^{i\\pi} = -1 $$\n\n- punto uno\n- punto due\n\nChiusura.";
        let blocks = parse_fragment(text);
        assert_eq!(blocks.len(), 4);
        assert!(matches!(blocks[0], Blocco::Testo { .. }));
        assert!(matches!(blocks[1], Blocco::Formula { .. }));
        assert!(matches!(blocks[2], Blocco::Elenco { .. }));
        assert!(matches!(blocks[3], Blocco::Testo { .. }));
    }
}
