/*!
Unification goals.

A goal is a collection of flat equations (together with any dissubsumptions and disequations) closed under the definitions of the concept names it uses.
Alongside its constraints, a goal records every atom it uses, in first-seen order, and a classification of those atoms as:
- Variables, which may be substituted.
  The user variables are those the user asked for a substitution of, while the remaining variables are auxiliary --- e.g. introduced by flattening, or defined concept names.
- Constants, the concept names which are not variables.
- Existential restrictions.

Constants and existential restrictions together are the non-variable atoms, and are always listed constants first.
These lists fix the order in which the [encoder](crate::encoding) allocates propositions, and so the encoding of a goal is deterministic.

Goals are built with a [GoalBuilder], or [build_goal] for the common case of a list of equations.
*/

mod builder;
pub use builder::{build_goal, GoalBuilder};

pub mod definitions;
pub mod flatten;

use std::collections::{HashMap, HashSet};

use indexmap::IndexSet;

use crate::structures::{
    atom::AtomId,
    equation::{Disequation, Dissubsumption, Equation},
};

/// A unification goal.
#[derive(Clone, Debug, Default)]
pub struct Goal {
    /// Equations, given and from definitions, without duplicates.
    equations: Vec<Equation>,

    dissubsumptions: Vec<Dissubsumption>,

    disequations: Vec<Disequation>,

    /// Every atom of the goal, in first-seen order.
    atoms: Vec<AtomId>,

    variables: Vec<AtomId>,

    user_variables: Vec<AtomId>,

    constants: Vec<AtomId>,

    existentials: Vec<AtomId>,

    /// Constants followed by existential restrictions.
    nonvariables: Vec<AtomId>,

    variable_set: HashSet<AtomId>,

    user_variable_set: HashSet<AtomId>,

    /// The filler of each existential restriction.
    children: HashMap<AtomId, AtomId>,

    /// The atom read as the top concept, if any.
    top: Option<AtomId>,
}

impl Goal {
    pub fn equations(&self) -> &[Equation] {
        &self.equations
    }

    pub fn dissubsumptions(&self) -> &[Dissubsumption] {
        &self.dissubsumptions
    }

    pub fn disequations(&self) -> &[Disequation] {
        &self.disequations
    }

    pub fn atoms(&self) -> &[AtomId] {
        &self.atoms
    }

    /// All variables, user and auxiliary.
    pub fn variables(&self) -> &[AtomId] {
        &self.variables
    }

    pub fn user_variables(&self) -> &[AtomId] {
        &self.user_variables
    }

    pub fn constants(&self) -> &[AtomId] {
        &self.constants
    }

    pub fn existentials(&self) -> &[AtomId] {
        &self.existentials
    }

    /// Constants followed by existential restrictions.
    pub fn nonvariables(&self) -> &[AtomId] {
        &self.nonvariables
    }

    pub fn is_variable(&self, atom: AtomId) -> bool {
        self.variable_set.contains(&atom)
    }

    pub fn is_user_variable(&self, atom: AtomId) -> bool {
        self.user_variable_set.contains(&atom)
    }

    /// The filler of `atom`, if `atom` is an existential restriction of the goal.
    pub fn child_of(&self, atom: AtomId) -> Option<AtomId> {
        self.children.get(&atom).copied()
    }

    pub fn top(&self) -> Option<AtomId> {
        self.top
    }

    /// The user variables, followed by every variable reached from them through the filler of some conjunct.
    ///
    /// `conjunct(x, h)` holds when the existential restriction `h` is a conjunct of the substitution for `x`.
    /// These are the variables whose substitutions are visible in the substitutions of the user variables.
    pub fn visible_variables(&self, mut conjunct: impl FnMut(AtomId, AtomId) -> bool) -> Vec<AtomId> {
        let mut visible = self.user_variables.iter().copied().collect::<IndexSet<_>>();

        let mut index = 0;
        while let Some(&variable) = visible.get_index(index) {
            for &existential in &self.existentials {
                let Some(child) = self.child_of(existential) else {
                    continue;
                };
                if self.is_variable(child) && conjunct(variable, existential) {
                    visible.insert(child);
                }
            }
            index += 1;
        }

        visible.into_iter().collect()
    }
}
