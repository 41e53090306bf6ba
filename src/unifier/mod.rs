/*!
Unifiers, as read from models of an encoding.

A unifier is a substitution for the variables of a goal, given as one definition `x ≡ ⊓S` for each variable `x`, where `S` is a set of non-variable atoms of the goal.
Definitions are in the order of the variables of the goal.

Only some definitions are seen by the user: those of the user variables, and those of the variables which occur in the substitutions of visible variables (through the filler of some existential restriction).
The remaining definitions are of auxiliary variables which play no part in the substitution of a user variable, and two unifiers of the same goal are equal exactly when their visible definitions are equal.

- A unifier is [decoded](decode) from a model.
- A unifier may be [checked](Unifier::solves) against a goal, directly and without reference to the encoding.
- A unifier is [rendered](render) as concept definitions over the names of the user variables.
*/

pub mod check;
pub mod decode;
pub mod render;

use std::{
    collections::BTreeSet,
    hash::{Hash, Hasher},
};

use serde::{Deserialize, Serialize};

use crate::structures::{atom::AtomId, equation::Equation};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Unifier {
    /// A definition of each variable of the goal, in goal order.
    definitions: Vec<Equation>,

    user_variables: BTreeSet<AtomId>,

    /// The user variables, and the variables occurring in the substitution of a visible variable.
    visible: BTreeSet<AtomId>,
}

impl PartialEq for Unifier {
    fn eq(&self, other: &Self) -> bool {
        self.user_variables == other.user_variables
            && self.visible_equations().eq(other.visible_equations())
    }
}

impl Eq for Unifier {}

impl Hash for Unifier {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.user_variables.hash(state);
        for definition in self.visible_equations() {
            definition.hash(state);
        }
    }
}

impl Unifier {
    /// A unifier from `definitions`, of which those of `visible` are seen by the user.
    ///
    /// Every user variable is visible, regardless of `visible`.
    pub fn new(
        definitions: Vec<Equation>,
        user_variables: BTreeSet<AtomId>,
        mut visible: BTreeSet<AtomId>,
    ) -> Self {
        visible.extend(user_variables.iter().copied());
        Unifier {
            definitions,
            user_variables,
            visible,
        }
    }

    /// The definitions of every variable.
    pub fn equations(&self) -> &[Equation] {
        &self.definitions
    }

    /// The definitions of the user variables.
    pub fn user_equations(&self) -> impl Iterator<Item = &Equation> {
        self.definitions
            .iter()
            .filter(|definition| self.user_variables.contains(&definition.left))
    }

    /// The definitions of the visible variables, in goal order.
    pub fn visible_equations(&self) -> impl Iterator<Item = &Equation> {
        self.definitions
            .iter()
            .filter(|definition| self.visible.contains(&definition.left))
    }

    pub fn is_user_variable(&self, atom: AtomId) -> bool {
        self.user_variables.contains(&atom)
    }

    pub fn definition_of(&self, variable: AtomId) -> Option<&Equation> {
        self.definitions
            .iter()
            .find(|definition| definition.left == variable)
    }

    /// The conjuncts substituted for `variable`, if `variable` is defined.
    pub fn substitution(&self, variable: AtomId) -> Option<&BTreeSet<AtomId>> {
        self.definition_of(variable)
            .map(|definition| &definition.right)
    }
}

#[cfg(test)]
mod unifier_tests {
    use super::*;

    use std::collections::HashSet;

    /// X ≡ ∃r.V, with V visible through X, and W an auxiliary variable seen by nothing.
    fn unifier(v: &[AtomId], w: &[AtomId]) -> Unifier {
        let (x, v_id, w_id, some_v) = (0, 1, 2, 3);
        let definitions = vec![
            Equation::new(x, [some_v]),
            Equation::new(v_id, v.iter().copied()),
            Equation::new(w_id, w.iter().copied()),
        ];
        Unifier::new(definitions, BTreeSet::from([x]), BTreeSet::from([v_id]))
    }

    #[test]
    fn hidden_definitions_are_ignored() {
        let a = 4;
        assert_eq!(unifier(&[a], &[]), unifier(&[a], &[a]));
        assert_ne!(unifier(&[a], &[]), unifier(&[], &[]));

        let distinct = [unifier(&[a], &[]), unifier(&[a], &[a]), unifier(&[], &[a])]
            .into_iter()
            .collect::<HashSet<_>>();
        assert_eq!(distinct.len(), 2);
    }

    #[test]
    fn user_variables_are_visible() {
        let unifier = Unifier::new(
            vec![Equation::new(0, []), Equation::new(1, [])],
            BTreeSet::from([1]),
            BTreeSet::default(),
        );
        let visible = unifier
            .visible_equations()
            .map(|definition| definition.left)
            .collect::<Vec<_>>();
        assert_eq!(visible, vec![1]);
    }
}
