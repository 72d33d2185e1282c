//! lt-constraints: admissible-value constraints for channels and fields.
//!
//! A `Constraint` validates (`check`), projects (`fit`) and describes
//! (`describe`) the admissible values of one named numeric channel. The
//! `Registry` maps channel names to constraints and is built once from
//! declarative JSON/YAML records, tolerating malformed entries on a
//! skip-and-report basis.

pub mod constraint;
pub mod error;
pub mod registry;
pub mod schema;

pub use constraint::Constraint;
pub use error::{ConstraintError, ConstraintResult};
pub use registry::Registry;
pub use schema::{ConstraintDecl, ConstraintKindDecl, LoadError, LoadIssue};
