//! Tuning configuration: schema, tolerant loading, constraint validation.
//!
//! The file shape matches the operator-facing JSON:
//!
//! ```json
//! {"M1": 0, "M2": 1, "L": 2, "J": 3, "N": 100,
//!  "B": [0, 0, 0, 1, 0, 0], "Y": 5.0}
//! ```
//!
//! Loading is per-field partial-success: a missing or mistyped field is
//! reported as a `FieldIssue` and keeps its zero default. A zero-defaulted
//! config is a documented degraded mode; `Config::validate` is the gate that
//! turns it into actionable diagnostics before any trial runs.

use lt_constraints::Registry;
use lt_plant::Channel;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::schema_util;

/// Number of control-law coefficients.
pub const NUM_COEFFS: usize = 6;

/// Operator-supplied tuning configuration.
///
/// The coefficient array is the one piece of mutable state in the system:
/// `search_coefficient` overwrites one entry per grid point and leaves the
/// winner in place. Everything else is fixed after load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    /// First measured-input channel selector.
    #[serde(rename = "M1")]
    pub m1: u32,
    /// Second measured-input channel selector; must differ from `m1`.
    #[serde(rename = "M2")]
    pub m2: u32,
    /// Control-output channel selector.
    #[serde(rename = "L")]
    pub l: u32,
    /// Feedback measurement channel selector.
    #[serde(rename = "J")]
    pub j: u32,
    /// Trials per run.
    #[serde(rename = "N")]
    pub n: u32,
    /// Control-law coefficients b0..b5.
    #[serde(rename = "B")]
    pub b: [f64; NUM_COEFFS],
    /// Target output the loop tracks.
    #[serde(rename = "Y")]
    pub target_y: f64,
}

/// Per-field diagnostic from loading or validation. Never fatal by itself.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldIssue {
    pub field: &'static str,
    pub reason: String,
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

impl Config {
    /// Load from a JSON file, per-field partial-success.
    pub fn load_json(path: &Path) -> Result<(Self, Vec<FieldIssue>), lt_constraints::LoadError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Load from a YAML file, per-field partial-success.
    pub fn load_yaml(path: &Path) -> Result<(Self, Vec<FieldIssue>), lt_constraints::LoadError> {
        let content = std::fs::read_to_string(path)?;
        let doc: serde_json::Value = serde_yaml::from_str(&content)?;
        Ok(Self::from_value(&doc))
    }

    /// Decode from a JSON document, per-field partial-success.
    pub fn from_json_str(content: &str) -> Result<(Self, Vec<FieldIssue>), lt_constraints::LoadError> {
        let doc: serde_json::Value = serde_json::from_str(content)?;
        Ok(Self::from_value(&doc))
    }

    fn from_value(doc: &serde_json::Value) -> (Self, Vec<FieldIssue>) {
        let mut cfg = Self::default();
        let mut issues = Vec::new();

        if !doc.is_object() {
            issues.push(FieldIssue {
                field: "config",
                reason: "document is not an object".to_string(),
            });
            return (cfg, issues);
        }

        schema_util::take_u32(doc, "M1", &mut cfg.m1, &mut issues);
        schema_util::take_u32(doc, "M2", &mut cfg.m2, &mut issues);
        schema_util::take_u32(doc, "L", &mut cfg.l, &mut issues);
        schema_util::take_u32(doc, "J", &mut cfg.j, &mut issues);
        schema_util::take_u32(doc, "N", &mut cfg.n, &mut issues);
        schema_util::take_f64(doc, "Y", &mut cfg.target_y, &mut issues);
        schema_util::take_coeffs(doc, "B", &mut cfg.b, &mut issues);

        for issue in &issues {
            tracing::warn!(field = issue.field, reason = %issue.reason,
                "config field kept at its zero default");
        }
        (cfg, issues)
    }

    /// Check every constrained field against its named constraint.
    ///
    /// Selector fields use the registry entries `M`, `L`, `J`; the trial
    /// count uses `N`. Validation only ever uses `check`; a failing value is
    /// reported, never silently replaced by a fitted one. Also enforces the
    /// `m1 != m2` invariant.
    pub fn validate(&self, registry: &Registry) -> Vec<FieldIssue> {
        let mut issues = Vec::new();
        check_field(registry, "M", "M1", self.m1 as f64, &mut issues);
        check_field(registry, "M", "M2", self.m2 as f64, &mut issues);
        check_field(registry, "L", "L", self.l as f64, &mut issues);
        check_field(registry, "J", "J", self.j as f64, &mut issues);
        check_field(registry, "N", "N", self.n as f64, &mut issues);

        if self.m1 == self.m2 {
            issues.push(FieldIssue {
                field: "M2",
                reason: format!("M1 and M2 must be distinct (both are {})", self.m1),
            });
        }
        issues
    }

    /// Registry key of the constraint governing the active control output.
    pub fn output_constraint_key(&self) -> String {
        format!("L{}", self.l)
    }

    pub fn m1_channel(&self) -> Channel {
        Channel(self.m1)
    }

    pub fn m2_channel(&self) -> Channel {
        Channel(self.m2)
    }

    pub fn output_channel(&self) -> Channel {
        Channel(self.l)
    }

    pub fn feedback_channel(&self) -> Channel {
        Channel(self.j)
    }
}

fn check_field(
    registry: &Registry,
    constraint_name: &str,
    field: &'static str,
    value: f64,
    issues: &mut Vec<FieldIssue>,
) {
    match registry.lookup(constraint_name) {
        Ok(constraint) => {
            if !constraint.check(value) {
                issues.push(FieldIssue {
                    field,
                    reason: format!("{value} is not admissible: {}", constraint.describe()),
                });
            }
        }
        Err(e) => issues.push(FieldIssue {
            field,
            reason: e.to_string(),
        }),
    }
}
