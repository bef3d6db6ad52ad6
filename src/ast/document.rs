//! Document-level AST nodes
//!
//! The document root groups frontmatter, the ordered section list, the
//! introduction/conclusion/resource lists and any diagnostics the upstream
//! parser already emitted. The compiler seeds its own diagnostics sink from
//! the carried `errors`/`warnings` so nothing reported upstream is lost.

use super::block::AstBlock;
use super::location::Location;
use crate::compiler::{CompilerError, CompilerWarning};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Frontmatter key/value data plus the range of the frontmatter section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Frontmatter {
    #[serde(default)]
    pub values: BTreeMap<String, serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

impl Frontmatter {
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.values.get(key)
    }
}

/// A resource entry from the document's resource list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AstResource {
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// One authored section: optional id/title and its ordered block list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AstSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub blocks: Vec<AstBlock>,
}

/// The root of the input AST
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AstDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frontmatter: Option<Frontmatter>,
    #[serde(default)]
    pub sections: Vec<AstSection>,
    #[serde(default)]
    pub introduction: Vec<AstBlock>,
    #[serde(default)]
    pub conclusion: Vec<AstBlock>,
    #[serde(default)]
    pub resources: Vec<AstResource>,
    /// Diagnostics carried over from upstream parsing
    #[serde(default)]
    pub errors: Vec<CompilerError>,
    #[serde(default)]
    pub warnings: Vec<CompilerWarning>,
}

impl AstDocument {
    pub fn new() -> Self {
        Self::default()
    }
}
