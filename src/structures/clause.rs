//! Clauses, aka. a collection of literals, interpreted as the disjunction of those literals.
//!
//! The canonical representation of a clause is as a vector of literals.
//!
//! ```rust
//! # use otter_uel::structures::clause::Clause;
//! let clause = vec![23, -41, 3];
//!
//! assert_eq!(clause.as_dimacs(true), "23 -41 3 0");
//! assert_eq!(clause.as_dimacs(false), "23 -41 3");
//! assert_eq!(clause.ids().collect::<Vec<_>>(), vec![23, 41, 3]);
//! ```
//!
//! - The empty clause is always false (never true).
//! - Single literals are identified with the clause containing that literal (aka. a 'unit' clause --- where the 'unit' is the literal).

use crate::structures::literal::{CLiteral, Literal, LiteralId};

/// The canonical representation of a clause.
pub type CClause = Vec<CLiteral>;

/// The clause trait.
pub trait Clause {
    /// A string of the clause in DIMACS form, with the terminating `0` as optional.
    fn as_dimacs(&self, zero: bool) -> String;

    /// An iterator over the proposition ids of the clause.
    fn ids(&self) -> impl Iterator<Item = LiteralId>;
}

impl Clause for [CLiteral] {
    fn as_dimacs(&self, zero: bool) -> String {
        let mut dimacs = String::default();
        for literal in self {
            dimacs.push_str(&format!("{literal} "));
        }
        if zero {
            dimacs.push('0');
        } else {
            dimacs.pop();
        }
        dimacs
    }

    fn ids(&self) -> impl Iterator<Item = LiteralId> {
        self.iter().map(|literal| literal.id())
    }
}
