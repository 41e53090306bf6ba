/*!
Atoms, the flat building blocks of EL concept descriptions.

An atom is either:
- A concept name, e.g. `A`, which may be marked as a variable.
- An existential restriction `∃r.A` whose filler `A` is a concept name.

Conjunctions of atoms are represented as sets of atoms, and arbitrary EL concept terms are [flattened](crate::goal::flatten) to such sets by naming nested fillers with fresh variables.

Atoms, and the concept and role names they use, are interned in an [AtomDB](crate::db::atom::AtomDB) and referred to by id throughout the library.
*/

use serde::{Deserialize, Serialize};

/// The id of an atom, an index into the atom database.
pub type AtomId = usize;

/// The id of a concept name.
pub type ConceptId = usize;

/// The id of a role name.
pub type RoleId = usize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Atom {
    /// A concept name.
    ConceptName {
        concept: ConceptId,

        /// Whether the name is a variable, i.e. may be substituted.
        variable: bool,

        /// Whether the name is a variable the user asked for a substitution of.
        user_variable: bool,
    },

    /// An existential restriction with a concept name as filler.
    ExistentialRestriction { role: RoleId, child: AtomId },
}

impl Atom {
    pub fn is_concept_name(&self) -> bool {
        matches!(self, Atom::ConceptName { .. })
    }

    pub fn is_existential(&self) -> bool {
        matches!(self, Atom::ExistentialRestriction { .. })
    }

    /// True exactly when the atom is a concept name marked as a variable.
    pub fn is_variable(&self) -> bool {
        matches!(self, Atom::ConceptName { variable: true, .. })
    }

    pub fn is_user_variable(&self) -> bool {
        matches!(
            self,
            Atom::ConceptName {
                user_variable: true,
                ..
            }
        )
    }

    /// The filler of an existential restriction.
    pub fn child(&self) -> Option<AtomId> {
        match self {
            Atom::ExistentialRestriction { child, .. } => Some(*child),
            Atom::ConceptName { .. } => None,
        }
    }

    pub fn role(&self) -> Option<RoleId> {
        match self {
            Atom::ExistentialRestriction { role, .. } => Some(*role),
            Atom::ConceptName { .. } => None,
        }
    }
}
