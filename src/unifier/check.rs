//! Checking a unifier against a goal.
//!
//! The check applies the substitution to each atom of the goal, giving a ground description, and decides subsumption between ground descriptions structurally: `C ⊑ D` exactly when every concept name of `D` is a concept name of `C` and every existential restriction `∃r.D'` of `D` has an existential restriction `∃r.C'` of `C` with `C' ⊑ D'`.
//!
//! The check is independent of the encoding, and so is a check on the soundness of the encoding.

use std::collections::{BTreeSet, HashMap};

use crate::{
    db::atom::AtomDB,
    goal::Goal,
    structures::atom::{Atom, AtomId, RoleId},
    types::err::{self},
    unifier::Unifier,
};

/// A ground EL description: constants, and existential restrictions over descriptions.
#[derive(Clone, Debug, Default)]
struct Description {
    names: BTreeSet<AtomId>,
    existentials: Vec<(RoleId, Description)>,
}

impl Description {
    fn merge(&mut self, other: &Description) {
        self.names.extend(other.names.iter().copied());
        self.existentials.extend(other.existentials.iter().cloned());
    }

    /// Whether `self ⊑ other`.
    fn subsumed_by(&self, other: &Description) -> bool {
        other.names.is_subset(&self.names)
            && other.existentials.iter().all(|(other_role, other_filler)| {
                self.existentials
                    .iter()
                    .any(|(role, filler)| role == other_role && filler.subsumed_by(other_filler))
            })
    }
}

struct Grounder<'a> {
    atoms: &'a AtomDB,
    unifier: &'a Unifier,
    cache: HashMap<AtomId, Description>,
}

impl Grounder<'_> {
    fn ground_atom(&mut self, atom: AtomId) -> Result<Description, err::ErrorKind> {
        if let Some(description) = self.cache.get(&atom) {
            return Ok(description.clone());
        }

        let description = match *self.atoms.get(atom)? {
            Atom::ConceptName { .. } => match self.unifier.substitution(atom) {
                Some(conjuncts) => self.ground_conjunction(conjuncts)?,
                None => Description {
                    names: BTreeSet::from([atom]),
                    existentials: Vec::default(),
                },
            },

            Atom::ExistentialRestriction { role, child } => Description {
                names: BTreeSet::default(),
                existentials: vec![(role, self.ground_atom(child)?)],
            },
        };

        self.cache.insert(atom, description.clone());
        Ok(description)
    }

    fn ground_conjunction(&mut self, conjuncts: &BTreeSet<AtomId>) -> Result<Description, err::ErrorKind> {
        let mut description = Description::default();
        for &conjunct in conjuncts {
            description.merge(&self.ground_atom(conjunct)?);
        }
        Ok(description)
    }
}

impl Unifier {
    /// Whether the unifier solves every equation, dissubsumption, and disequation of `goal`.
    pub fn solves(&self, atoms: &AtomDB, goal: &Goal) -> Result<bool, err::ErrorKind> {
        let mut grounder = Grounder {
            atoms,
            unifier: self,
            cache: HashMap::default(),
        };

        for equation in goal.equations() {
            let left = grounder.ground_atom(equation.left)?;
            let right = grounder.ground_conjunction(&equation.right)?;
            if !left.subsumed_by(&right) {
                return Ok(false);
            }
            if !equation.is_primitive && !right.subsumed_by(&left) {
                return Ok(false);
            }
        }

        for dissubsumption in goal.dissubsumptions() {
            let left = grounder.ground_conjunction(&dissubsumption.left)?;
            let right = grounder.ground_conjunction(&dissubsumption.right)?;
            if left.subsumed_by(&right) {
                return Ok(false);
            }
        }

        for disequation in goal.disequations() {
            let left = grounder.ground_conjunction(&disequation.left)?;
            let right = grounder.ground_conjunction(&disequation.right)?;
            if left.subsumed_by(&right) && right.subsumed_by(&left) {
                return Ok(false);
            }
        }

        Ok(true)
    }
}
