//! Compiled lesson document
//!
//! The renderer-facing output of the compiler. Field and tag names here are
//! the wire contract (Italian, camelCase where the renderer expects it), so
//! every type in this module derives `Serialize`/`Deserialize` and optional
//! fields are omitted from the JSON when absent.
//!
//! ## Modules
//!
//! - `metadata` - validated lesson metadata and its closed enumerations
//! - `block` - the `Blocco` tagged union and the sequence step types
//! - `document` - sections, resources and the `Lezione` root

pub mod block;
pub mod document;
pub mod metadata;

pub use block::{Blocco, OpzioneQuiz, SequenzaStep, VarianteCallout, VarianteNota};
pub use document::{Lezione, Risorsa, Sezione};
pub use metadata::{LivelloScolastico, Materia, Metadati};
