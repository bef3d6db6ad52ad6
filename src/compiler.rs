//! The lez document compiler
//!
//! Turns an [`crate::ast::AstDocument`] into a validated
//! [`crate::lesson::Lezione`]. The compiler is a pure, synchronous
//! transformation: all authoring problems are accumulated in a
//! [`Diagnostics`] sink and frozen into the final [`CompilerOutput`], never
//! raised as errors. Metadata failures abort the document; block and
//! directive failures only drop the offending block.
//!
//! ## Modules
//!
//! - `diagnostics` - error/warning taxonomy and the append-only sink
//! - `metadata` - frontmatter validation (fail fast)
//! - `block` - per-block dispatch to output block constructors
//! - `directive` - the directive name -> compiler function registry
//! - `sequence` - flat-vs-sequence decision per content region
//! - `steps` - shared step accumulator and the `== Title ==` body parser
//! - `fragment` - the minimal Markdown-subset parser for directive bodies
//! - `document` - the top-level orchestrator

pub mod block;
pub mod diagnostics;
pub mod directive;
pub mod document;
pub mod fragment;
pub mod metadata;
pub mod sequence;
pub mod steps;

pub use diagnostics::{CompilerError, CompilerWarning, Diagnostics, ErrorCode, WarningCode};
pub use document::{Compiler, CompilerOptions, CompilerOutput};
