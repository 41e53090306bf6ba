/*!
Miscelanous items related to [logging](log).

Calls to the log macro are made throughout the library, at one of the targets below.
For the most part logs are at the trace or debug level, with info reserved for the outcome of a solve and warnings for conditions which are handled but likely unintended, such as an ambiguous definition.

Note, no log implementation is provided.
For more details, see [log].
*/

/// Targets to be used within a [log]! macro.
pub mod targets {
    /// Logs related to the [atom database](crate::db::atom)
    pub const ATOM_DB: &str = "atom_db";

    /// Logs related to [goal](crate::goal) construction
    pub const GOAL: &str = "goal";

    /// Logs related to the [encoder](crate::encoding)
    pub const ENCODING: &str = "encoding";

    /// Logs related to the [clause set](crate::cnf)
    pub const CLAUSE_SET: &str = "clause_set";

    /// Logs related to [solvers](crate::solver)
    pub const SOLVER: &str = "solver";

    /// Logs related to [enumeration](crate::enumerate)
    pub const ENUMERATION: &str = "enumeration";

    /// Logs related to [unifiers](crate::unifier)
    pub const UNIFIER: &str = "unifier";
}
