//! MapError: Unified error type for lanelet-roundabout public APIs
//!
//! Construction of typed regulatory elements, registry operations and map
//! arena insertions all report failures through this type instead of
//! panicking.

use thiserror::Error;

use crate::primitives::id::Id;

/// Unified error type for map and regulatory-element operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MapError {
    /// Attempted to construct an id with a zero value (invalid).
    #[error("Id must be non-zero (0 is reserved as invalid/sentinel)")]
    InvalidId,
    /// A regulatory element record lacks a role its kind requires.
    #[error("Regulatory element {id}: missing required role `{role}`")]
    MissingRole { id: Id, role: String },
    /// A role holds a parameter of the wrong primitive kind.
    #[error("Regulatory element {id}: role `{role}` expects {expected}, found {found}")]
    WrongParameterKind {
        id: Id,
        role: String,
        expected: &'static str,
        found: &'static str,
    },
    /// A role holds the wrong number of parameters.
    #[error("Regulatory element {id}: role `{role}` expects {expected} parameter(s), found {found}")]
    RoleCardinality {
        id: Id,
        role: String,
        expected: usize,
        found: usize,
    },
    /// A role lists the same primitive more than once.
    #[error("Regulatory element {id}: role `{role}` lists {param} more than once")]
    DuplicateParameter { id: Id, role: String, param: Id },
    /// A record carries a kind label with no registered factory.
    #[error("No regulatory element registered for rule name `{0}`")]
    UnknownRuleName(String),
    /// A record carries no `subtype` attribute to dispatch on.
    #[error("Regulatory element {0} has no rule name (missing `subtype` attribute)")]
    MissingRuleName(Id),
    /// A factory was registered twice under the same rule name.
    #[error("Rule name `{0}` is already registered")]
    DuplicateRuleName(String),
    /// The process-wide registry was installed more than once.
    #[error("The process-wide regulatory element registry is already installed")]
    RegistryAlreadyInstalled,
    /// The process-wide registry was queried before installation.
    #[error("The process-wide regulatory element registry is not installed")]
    RegistryNotInstalled,
    /// A primitive with this id already exists in the map.
    #[error("Duplicate {kind} id {id} in map")]
    DuplicateId { kind: &'static str, id: Id },
    /// No primitive of this kind and id exists in the map.
    #[error("No {kind} with id {id} in map")]
    NotFound { kind: &'static str, id: Id },
    /// A primitive references another primitive absent from the map.
    #[error("{owner_kind} {owner} references unknown {kind} {id}")]
    DanglingReference {
        owner_kind: &'static str,
        owner: Id,
        kind: &'static str,
        id: Id,
    },
    /// Typed retrieval asked for a kind the stored element is not.
    #[error("Regulatory element {id} is a `{actual}`, not a `{requested}`")]
    KindMismatch {
        id: Id,
        requested: &'static str,
        actual: String,
    },
}
