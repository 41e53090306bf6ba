//! Error types used in the library.
//!
//! - Some of these are contract violations --- e.g. an equation whose left side is an existential restriction, or a clause containing the reserved literal `0`.
//! - Some are internally expected --- e.g. BCP errors are used to control the flow of a solve within the [internal solver](crate::solver::internal).
//! - Some are external --- e.g. a solver process which could not be started.
//!   During enumeration these are [downgraded](crate::enumerate) to the end of the enumeration, and kept as a diagnostic.
//!
//! Names of the error enums --- for the most part --- overlap with corresponding structs.
//  As such, throughout the library err::{self} is often used to prefix use of the types with `err::`.

use crate::structures::atom::{AtomId, ConceptId, RoleId};

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    AtomDB(AtomDBError),
    Goal(GoalError),
    ClauseSet(ClauseSetError),
    BCP(BCPError),
    Solver(SolverError),
    Unifier(UnifierError),
    Enumeration(EnumerationError),
}

/// Noted errors when interning or reading atoms.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum AtomDBError {
    /// No atom has the given id.
    UnknownAtomId(AtomId),

    /// No concept name has the given id.
    UnknownConcept(ConceptId),

    /// No role name has the given id.
    UnknownRole(RoleId),

    /// The name has not been interned.
    UnknownName(String),

    /// A concept name was required, though the atom is an existential restriction.
    NotConceptName(AtomId),
}

impl From<AtomDBError> for ErrorKind {
    fn from(e: AtomDBError) -> Self {
        ErrorKind::AtomDB(e)
    }
}

/// Noted errors when building a goal.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum GoalError {
    /// The left side of an equation must be a concept name.
    ExistentialLeft(AtomId),
}

impl From<GoalError> for ErrorKind {
    fn from(e: GoalError) -> Self {
        ErrorKind::Goal(e)
    }
}

/// Noted errors when adding to a clause set.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ClauseSetError {
    /// An empty clause was given, which would make any clause set unsatisfiable.
    EmptyClause,

    /// The literal `0` was used, though `0` is reserved as the clause terminator.
    ReservedLiteral,
}

impl From<ClauseSetError> for ErrorKind {
    fn from(e: ClauseSetError) -> Self {
        ErrorKind::ClauseSet(e)
    }
}

/// Noted errors during boolean constraint propagation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BCPError {
    /// A conflict was found, in the clause at the given index.
    /// This is expected from time to time, and leads to a backtrack.
    Conflict(usize),
}

impl From<BCPError> for ErrorKind {
    fn from(e: BCPError) -> Self {
        ErrorKind::BCP(e)
    }
}

/// Noted errors when asking a solver for a model.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SolverError {
    /// The solver could not be reached, with a note on why.
    Unavailable(String),

    /// The solve was cut short, by a time limit or the solver process being stopped.
    Interrupted,

    /// The output of the solver could not be read, with the offending line.
    UnexpectedOutput(String),

    /// The solver was asked to continue after being released.
    Released,
}

impl std::fmt::Display for SolverError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable(note) => write!(f, "solver unavailable: {note}"),
            Self::Interrupted => write!(f, "solve interrupted"),
            Self::UnexpectedOutput(line) => write!(f, "unexpected solver output: {line}"),
            Self::Released => write!(f, "solver released"),
        }
    }
}

impl From<SolverError> for ErrorKind {
    fn from(e: SolverError) -> Self {
        ErrorKind::Solver(e)
    }
}

/// Noted errors when reading a unifier from a model.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum UnifierError {
    /// The substitution read from a model is cyclic, with a variable on the cycle.
    /// A sound encoding excludes such models.
    Cyclic(AtomId),
}

impl From<UnifierError> for ErrorKind {
    fn from(e: UnifierError) -> Self {
        ErrorKind::Unifier(e)
    }
}

/// Noted errors when using an enumerator through a [session](crate::enumerate::session).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EnumerationError {
    /// A unifier was requested, though the enumeration is exhausted.
    NoMoreUnifiers,

    /// The handle does not refer to a live enumerator.
    UnknownHandle,
}

impl From<EnumerationError> for ErrorKind {
    fn from(e: EnumerationError) -> Self {
        ErrorKind::Enumeration(e)
    }
}
