//! # lez
//!
//! A compiler for the lez lesson format.
//!
//! The upstream parser turns authored lez markup into an [`ast::AstDocument`];
//! this crate compiles that AST into a validated [`lesson::Lezione`] document
//! that the renderer consumes as JSON. Authoring problems never surface as
//! `Err` values: the compiler accumulates [`compiler::CompilerError`] and
//! [`compiler::CompilerWarning`] records and derives the overall outcome from
//! the final error list.
//!
//! ## Modules
//!
//! - `ast` - the input AST produced by the upstream parser (read-only here)
//! - `lesson` - the compiled lesson document and its typed block union
//! - `compiler` - the multi-pass compiler itself

pub mod ast;
pub mod compiler;
pub mod lesson;

pub use compiler::{Compiler, CompilerOptions, CompilerOutput};
