//! The result taxonomy for link insertion.
//!
//! A rejected link is a normal negative answer from the store, not a fault,
//! so [`InsertOutcome`] is an ordinary enum rather than an error type. The
//! self-loop and general-cycle cases are distinct variants even though a
//! presentation layer may choose to report them identically: a self-loop is
//! rejected by fixed policy without consulting the relation, while a cycle
//! rejection is the result of an ancestor lookup.

use serde::Serialize;

/// The decision the [`crate::LinkStore`] reaches for one proposed link.
///
/// Exactly one variant is returned per [`crate::LinkStore::insert_link`]
/// call; the store is left fully consistent in every case, and only
/// [`InsertOutcome::Accepted`] mutates it.
///
/// Serializes as an internally tagged object
/// (`{"outcome":"rejected_out_of_range","value":70000}`) so callers can emit
/// it directly in structured output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum InsertOutcome {
    /// The link closes no cycle and has been folded into the relation.
    Accepted,
    /// The destination already reaches the origin; inserting the link would
    /// close a directed cycle. No state change.
    RejectedCycle,
    /// Origin and destination are the same node. A self-loop is a length-1
    /// cycle by definition and is rejected without a relation lookup.
    /// No state change.
    RejectedSelfLoop,
    /// An endpoint lies outside the configured node universe.
    /// No state change.
    RejectedOutOfRange {
        /// The first offending identifier, in origin-then-destination order.
        value: i64,
    },
}

impl InsertOutcome {
    /// Returns `true` if the link was inserted.
    pub fn is_accepted(&self) -> bool {
        matches!(self, InsertOutcome::Accepted)
    }

    /// Returns `true` for any of the three rejection variants.
    pub fn is_rejected(&self) -> bool {
        !self.is_accepted()
    }
}

impl std::fmt::Display for InsertOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InsertOutcome::Accepted => f.write_str("accepted"),
            InsertOutcome::RejectedCycle => f.write_str("rejected: closes a cycle"),
            InsertOutcome::RejectedSelfLoop => f.write_str("rejected: self-loop"),
            InsertOutcome::RejectedOutOfRange { value } => {
                write!(f, "rejected: {value} is out of range")
            }
        }
    }
}
