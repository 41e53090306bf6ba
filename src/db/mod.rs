/*!
Databases for holding information relevant to unification.

- The [name database](names) interns concept and role names.
- The [atom database](atom) interns atoms over those names, and is the single source of truth for atom ids.

The propositions of an encoding are interned separately, in a [PropositionDB](crate::encoding::proposition::PropositionDB), as each encoding has its own.
*/

pub mod atom;
pub mod names;
