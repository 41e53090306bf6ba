//! Concept terms of EL, before flattening.

use serde::{Deserialize, Serialize};

use super::atom::{AtomId, RoleId};

/// A concept term, whose concept names are atoms of some [AtomDB](crate::db::atom::AtomDB).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Concept {
    /// The top concept, ⊤.
    Top,

    /// A concept name.
    Name(AtomId),

    /// A conjunction, where the empty conjunction is ⊤.
    And(Vec<Concept>),

    /// An existential restriction, with an arbitrary filler.
    Exists(RoleId, Box<Concept>),
}

impl Concept {
    pub fn name(atom: AtomId) -> Self {
        Concept::Name(atom)
    }

    pub fn and(conjuncts: impl IntoIterator<Item = Concept>) -> Self {
        Concept::And(conjuncts.into_iter().collect())
    }

    pub fn exists(role: RoleId, filler: Concept) -> Self {
        Concept::Exists(role, Box::new(filler))
    }

    /// The atom of a term which is exactly a concept name.
    pub fn as_name(&self) -> Option<AtomId> {
        match self {
            Concept::Name(atom) => Some(*atom),
            _ => None,
        }
    }
}
