/*!
Propositions of an encoding, and their interning.

Each proposition of the [encoder](crate::encoding) is a tagged value over atoms, and is identified in clauses by a positive integer id.
Ids are assigned by a [PropositionDB] in order of first use, starting from 1, and the database maps ids back to propositions when a model is [decoded](crate::unifier::decode).
*/

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::{
    solver::Model,
    structures::{
        atom::AtomId,
        literal::{CLiteral, Literal, LiteralId},
    },
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Proposition {
    /// The substitution of `sub` is subsumed by the substitution of `sup`, `σ(sub) ⊑ σ(sup)`.
    ///
    /// When `sub` is a variable and `sup` a non-variable atom, `sup` is a conjunct of the substitution of `sub`.
    Subsumption { sub: AtomId, sup: AtomId },

    /// `σ(sub) ⋢ σ(sup)`.
    Dissubsumption { sub: AtomId, sup: AtomId },

    /// `greater` is strictly above `lesser` in the order used to keep substitutions acyclic.
    Order { greater: AtomId, lesser: AtomId },

    /// `witness` is a conjunct of the substitution of `variable` which `atom` fails to be subsumed by.
    Match {
        atom: AtomId,
        variable: AtomId,
        witness: AtomId,
    },

    /// A bit of the binary index of a choice.
    Choice { choice: u32, bit: u32 },

    /// A proposition forced false.
    Absurd,
}

/// The interned propositions of an encoding.
#[derive(Clone, Debug, Default)]
pub struct PropositionDB {
    propositions: IndexSet<Proposition>,
}

impl PropositionDB {
    /// The id of `proposition`, interning the proposition if required.
    pub fn id(&mut self, proposition: Proposition) -> LiteralId {
        self.propositions.insert_full(proposition).0 as LiteralId + 1
    }

    /// The positive literal of `proposition`.
    pub fn literal(&mut self, proposition: Proposition) -> CLiteral {
        CLiteral::new(self.id(proposition), true)
    }

    /// The id of `proposition`, if interned.
    pub fn lookup(&self, proposition: &Proposition) -> Option<LiteralId> {
        self.propositions
            .get_index_of(proposition)
            .map(|index| index as LiteralId + 1)
    }

    /// Whether `Sub(sub, sup)` is interned and true on `model`.
    pub fn holds_on(&self, sub: AtomId, sup: AtomId, model: &Model) -> bool {
        self.lookup(&Proposition::Subsumption { sub, sup })
            .is_some_and(|id| model.contains(&id))
    }

    /// The proposition with id `id`.
    pub fn get(&self, id: LiteralId) -> Option<&Proposition> {
        match id {
            0 => None,
            _ => self.propositions.get_index(id as usize - 1),
        }
    }

    pub fn count(&self) -> usize {
        self.propositions.len()
    }

    /// Pairs of ids and propositions, in order of id.
    pub fn iter(&self) -> impl Iterator<Item = (LiteralId, &Proposition)> {
        self.propositions
            .iter()
            .enumerate()
            .map(|(index, proposition)| (index as LiteralId + 1, proposition))
    }
}

#[cfg(test)]
mod proposition_tests {
    use super::*;

    #[test]
    fn ids_start_at_one() {
        let mut propositions = PropositionDB::default();
        let sub = Proposition::Subsumption { sub: 0, sup: 1 };
        let order = Proposition::Order {
            greater: 0,
            lesser: 1,
        };

        assert_eq!(propositions.id(sub), 1);
        assert_eq!(propositions.literal(order), 2);
        assert_eq!(propositions.id(sub), 1);

        assert_eq!(propositions.lookup(&order), Some(2));
        assert_eq!(propositions.lookup(&Proposition::Absurd), None);
        assert_eq!(propositions.get(1), Some(&sub));
        assert_eq!(propositions.get(0), None);
        assert_eq!(propositions.count(), 2);
    }
}
