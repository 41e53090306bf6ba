/*!
Equations, dissubsumptions, and disequations over flat atoms.

An [Equation] relates a concept name on the left to a conjunction of atoms on the right:
- `left ≡ ⊓right`, in general.
- `left ⊑ ⊓right`, if the equation is primitive.

The right side of an equation is a set, and so an equation has a canonical form: two equations are equal exactly when their left sides, right sides, and primitive flags are.
*/

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::atom::AtomId;

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Equation {
    /// A concept name.
    pub left: AtomId,

    /// The conjuncts of the right side, where the empty set is ⊤.
    pub right: BTreeSet<AtomId>,

    /// Whether the equation only asserts `left ⊑ ⊓right`.
    pub is_primitive: bool,
}

impl Equation {
    pub fn new(left: AtomId, right: impl IntoIterator<Item = AtomId>) -> Self {
        Equation {
            left,
            right: right.into_iter().collect(),
            is_primitive: false,
        }
    }

    pub fn primitive(left: AtomId, right: impl IntoIterator<Item = AtomId>) -> Self {
        Equation {
            left,
            right: right.into_iter().collect(),
            is_primitive: true,
        }
    }

    /// The atoms of the equation, left first.
    pub fn atoms(&self) -> impl Iterator<Item = AtomId> + '_ {
        std::iter::once(self.left).chain(self.right.iter().copied())
    }
}

/// The constraint `⊓left ⋢ ⊓right`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Dissubsumption {
    pub left: BTreeSet<AtomId>,
    pub right: BTreeSet<AtomId>,
}

impl Dissubsumption {
    pub fn new(
        left: impl IntoIterator<Item = AtomId>,
        right: impl IntoIterator<Item = AtomId>,
    ) -> Self {
        Dissubsumption {
            left: left.into_iter().collect(),
            right: right.into_iter().collect(),
        }
    }

    pub fn atoms(&self) -> impl Iterator<Item = AtomId> + '_ {
        self.left.iter().chain(self.right.iter()).copied()
    }
}

/// The constraint `⊓left ≢ ⊓right`, i.e. a dissubsumption in at least one direction.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Disequation {
    pub left: BTreeSet<AtomId>,
    pub right: BTreeSet<AtomId>,
}

impl Disequation {
    pub fn new(
        left: impl IntoIterator<Item = AtomId>,
        right: impl IntoIterator<Item = AtomId>,
    ) -> Self {
        Disequation {
            left: left.into_iter().collect(),
            right: right.into_iter().collect(),
        }
    }

    pub fn atoms(&self) -> impl Iterator<Item = AtomId> + '_ {
        self.left.iter().chain(self.right.iter()).copied()
    }
}
