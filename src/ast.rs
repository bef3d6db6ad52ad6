//! Input AST for the lez compiler
//!
//! These types mirror the JSON the upstream parser emits: a document with
//! optional frontmatter, ordered sections, introduction/conclusion/resource
//! lists, and any diagnostics the parser already collected. The compiler
//! treats the whole tree as immutable input.
//!
//! ## Modules
//!
//! - `location` - source positions and ranges, passed through unchanged
//! - `block` - the tagged block union (headings, paragraphs, directives, ...)
//! - `document` - sections, frontmatter, resources and the document root

pub mod block;
pub mod document;
pub mod location;

pub use block::AstBlock;
pub use document::{AstDocument, AstResource, AstSection, Frontmatter};
pub use location::{Location, Position};
