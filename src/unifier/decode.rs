//! Reading a unifier from a model.
//!
//! The substitution of a variable `x` is the conjunction of each non-variable atom `h` for which the proposition `Sub(x, h)` is true on the model.
//! Every other proposition of the model is ignored.
//!
//! The substitution read must be acyclic: no variable may occur, through the fillers of existential restrictions, in its own substitution.
//! This is checked by sorting the variables topologically, and a cycle is reported as an error.

use std::collections::BTreeSet;

use petgraph::{algo::toposort, graphmap::DiGraphMap};

use crate::{
    encoding::proposition::PropositionDB,
    goal::Goal,
    misc::log::targets::{self},
    solver::Model,
    structures::{atom::AtomId, equation::Equation},
    types::err::{self},
    unifier::Unifier,
};

/// The unifier of `model`, for the encoding of `goal` with propositions `propositions`.
pub fn decode(
    goal: &Goal,
    propositions: &PropositionDB,
    model: &Model,
) -> Result<Unifier, err::ErrorKind> {
    let mut definitions = Vec::with_capacity(goal.variables().len());
    let mut dependencies = DiGraphMap::<AtomId, ()>::new();

    for &variable in goal.variables() {
        dependencies.add_node(variable);

        let conjuncts = goal
            .nonvariables()
            .iter()
            .copied()
            .filter(|&atom| propositions.holds_on(variable, atom, model))
            .collect::<BTreeSet<_>>();

        for &conjunct in &conjuncts {
            if let Some(child) = goal.child_of(conjunct) {
                if goal.is_variable(child) {
                    dependencies.add_edge(variable, child, ());
                }
            }
        }

        definitions.push(Equation::new(variable, conjuncts));
    }

    if let Err(cycle) = toposort(&dependencies, None) {
        log::warn!(target: targets::UNIFIER, "Cyclic substitution through {}", cycle.node_id());
        return Err(err::UnifierError::Cyclic(cycle.node_id()).into());
    }

    let visible = goal.visible_variables(|sub, sup| propositions.holds_on(sub, sup, model));

    let unifier = Unifier::new(
        definitions,
        goal.user_variables().iter().copied().collect(),
        visible.into_iter().collect(),
    );
    log::trace!(target: targets::UNIFIER, "Decoded: {:?}", unifier.equations());
    Ok(unifier)
}
