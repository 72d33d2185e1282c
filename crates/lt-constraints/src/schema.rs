//! Declarative constraint records and tolerant file loaders.
//!
//! A constraint file is a sequence of records:
//!
//! ```json
//! [
//!   {"name": "M", "type": "discrete", "values": [0, 1, 2]},
//!   {"name": "N", "type": "discrete_range", "minval": 1, "maxval": 1000},
//!   {"name": "L1", "type": "floating", "minval": -1.0, "maxval": 1.0}
//! ]
//! ```
//!
//! Each record is decoded independently so a single malformed entry cannot
//! poison the rest of the file: malformed records are reported as
//! `LoadIssue`s and skipped, records with unknown `type` tags are skipped
//! quietly, and the build continues.

use crate::registry::Registry;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// One declarative constraint record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConstraintDecl {
    /// Channel name the constraint is registered under.
    pub name: String,
    #[serde(flatten)]
    pub kind: ConstraintKindDecl,
}

/// Variant-specific parameters, tagged by `type`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConstraintKindDecl {
    /// Integer list of admissible values.
    Discrete { values: Vec<i64> },
    /// Closed integer interval.
    DiscreteRange { minval: i64, maxval: i64 },
    /// Closed real interval.
    Floating { minval: f64, maxval: f64 },
}

const KNOWN_KINDS: &[&str] = &["discrete", "discrete_range", "floating"];

/// Per-record diagnostic from a tolerant load. Never fatal to the load.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadIssue {
    /// Zero-based index of the record in the declaration sequence.
    pub entry: usize,
    /// Channel name, when the record got far enough to name one.
    pub name: Option<String>,
    pub reason: String,
}

impl fmt::Display for LoadIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "entry {} ('{}'): {}", self.entry, name, self.reason),
            None => write!(f, "entry {}: {}", self.entry, self.reason),
        }
    }
}

/// Fatal load failure: the file itself is unreadable or not a sequence.
#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Constraint file must contain a sequence of declaration records")]
    NotASequence,
}

/// Load a constraint registry from a JSON file.
pub fn load_json(path: &Path) -> Result<(Registry, Vec<LoadIssue>), LoadError> {
    let content = std::fs::read_to_string(path)?;
    from_json_str(&content)
}

/// Load a constraint registry from a YAML file.
pub fn load_yaml(path: &Path) -> Result<(Registry, Vec<LoadIssue>), LoadError> {
    let content = std::fs::read_to_string(path)?;
    from_yaml_str(&content)
}

/// Decode a JSON document into a registry, skip-and-report per record.
pub fn from_json_str(content: &str) -> Result<(Registry, Vec<LoadIssue>), LoadError> {
    let doc: serde_json::Value = serde_json::from_str(content)?;
    let entries = doc.as_array().ok_or(LoadError::NotASequence)?;

    let mut decls = Vec::new();
    let mut issues = Vec::new();
    for (i, raw) in entries.iter().enumerate() {
        match decode_entry(i, raw.clone()) {
            Decoded::Decl(decl) => decls.push(decl),
            Decoded::Skipped => {}
            Decoded::Issue(issue) => issues.push(issue),
        }
    }

    let (registry, mut build_issues) = Registry::build(decls);
    issues.append(&mut build_issues);
    Ok((registry, issues))
}

/// Decode a YAML document into a registry, skip-and-report per record.
pub fn from_yaml_str(content: &str) -> Result<(Registry, Vec<LoadIssue>), LoadError> {
    // Route through the JSON value model so both formats share one decoder.
    let doc: serde_json::Value = serde_yaml::from_str(content)?;
    let rendered = serde_json::to_string(&doc)?;
    from_json_str(&rendered)
}

enum Decoded {
    Decl(ConstraintDecl),
    Skipped,
    Issue(LoadIssue),
}

fn decode_entry(entry: usize, raw: serde_json::Value) -> Decoded {
    let name = raw
        .get("name")
        .and_then(|n| n.as_str())
        .map(|s| s.to_string());

    let Some(kind) = raw.get("type").and_then(|t| t.as_str()) else {
        return Decoded::Issue(LoadIssue {
            entry,
            name,
            reason: "missing or non-string 'type' field".to_string(),
        });
    };

    // Unknown variant tags are forward-compatible: skip without complaint.
    if !KNOWN_KINDS.contains(&kind) {
        tracing::debug!(entry, kind, "skipping declaration with unknown type");
        return Decoded::Skipped;
    }

    match serde_json::from_value::<ConstraintDecl>(raw) {
        Ok(decl) => Decoded::Decl(decl),
        Err(e) => Decoded::Issue(LoadIssue {
            entry,
            name,
            reason: e.to_string(),
        }),
    }
}
