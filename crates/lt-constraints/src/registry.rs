//! Registry: channel name to constraint, built once, read-only after.

use crate::constraint::Constraint;
use crate::error::{ConstraintError, ConstraintResult};
use crate::schema::{ConstraintDecl, ConstraintKindDecl, LoadIssue};
use std::collections::HashMap;

/// Immutable mapping from channel name to its constraint.
///
/// The registry exclusively owns its constraints. Duplicate names follow
/// last-inserted-wins, matching simple insertion semantics.
#[derive(Debug, Default, Clone)]
pub struct Registry {
    map: HashMap<String, Constraint>,
}

impl Registry {
    /// Build a registry from an ordered sequence of declarations.
    ///
    /// Per-entry construction failures (empty set, inverted range) are
    /// reported as issues and skipped; the rest of the sequence still
    /// loads. The build itself never fails.
    pub fn build(decls: impl IntoIterator<Item = ConstraintDecl>) -> (Self, Vec<LoadIssue>) {
        let mut map = HashMap::new();
        let mut issues = Vec::new();
        for (i, decl) in decls.into_iter().enumerate() {
            match construct(decl.kind) {
                Ok(constraint) => {
                    map.insert(decl.name, constraint);
                }
                Err(e) => {
                    tracing::warn!(entry = i, name = %decl.name, error = %e,
                        "skipping invalid constraint declaration");
                    issues.push(LoadIssue {
                        entry: i,
                        name: Some(decl.name),
                        reason: e.to_string(),
                    });
                }
            }
        }
        (Self { map }, issues)
    }

    /// Look up the constraint for a channel name.
    ///
    /// Absence is an error, not a pass-through: every clamped channel must
    /// have a declared admissible set.
    pub fn lookup(&self, name: &str) -> ConstraintResult<&Constraint> {
        self.map.get(name).ok_or_else(|| ConstraintError::NotFound {
            name: name.to_string(),
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Iterate over registered channel names (arbitrary order).
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.map.keys().map(String::as_str)
    }
}

fn construct(kind: ConstraintKindDecl) -> ConstraintResult<Constraint> {
    match kind {
        ConstraintKindDecl::Discrete { values } => Constraint::discrete_set(values),
        ConstraintKindDecl::DiscreteRange { minval, maxval } => {
            Constraint::discrete_range(minval, maxval)
        }
        ConstraintKindDecl::Floating { minval, maxval } => {
            Constraint::continuous_range(minval, maxval)
        }
    }
}
