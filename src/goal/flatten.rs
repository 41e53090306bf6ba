/*!
Flattening of concept terms to sets of atoms.

A concept term is flattened to the set of its top-level conjuncts, with nested conjunctions merged.
The filler of an existential restriction must be a concept name, and so a filler which is not is named by a fresh variable `V` together with the equation `V ≡ filler`.

For example, `A ⊓ ∃r.(B ⊓ ∃s.C)` is flattened to `{A, ∃r.V}` with the equation `V ≡ B ⊓ ∃s.C`, itself flattened to `V ≡ {B, ∃s.C}`.
*/

use std::collections::BTreeSet;

use crate::{
    db::atom::AtomDB,
    misc::log::targets::{self},
    structures::{
        atom::AtomId,
        concept::Concept,
        equation::Equation,
    },
    types::err::{self},
};

/// The atoms of `concept`, where any equation required to name a filler is pushed to `equations`.
pub fn flatten(
    atoms: &mut AtomDB,
    concept: &Concept,
    equations: &mut Vec<Equation>,
) -> Result<BTreeSet<AtomId>, err::ErrorKind> {
    let mut conjuncts = BTreeSet::default();
    flatten_into(atoms, concept, equations, &mut conjuncts)?;
    Ok(conjuncts)
}

fn flatten_into(
    atoms: &mut AtomDB,
    concept: &Concept,
    equations: &mut Vec<Equation>,
    conjuncts: &mut BTreeSet<AtomId>,
) -> Result<(), err::ErrorKind> {
    match concept {
        Concept::Top => {}

        Concept::Name(atom) => {
            if !atoms.get(*atom)?.is_concept_name() {
                return Err(err::AtomDBError::NotConceptName(*atom).into());
            }
            conjuncts.insert(*atom);
        }

        Concept::And(parts) => {
            for part in parts {
                flatten_into(atoms, part, equations, conjuncts)?;
            }
        }

        Concept::Exists(role, filler) => {
            let child = match filler.as_name() {
                Some(name) => {
                    if !atoms.get(name)?.is_concept_name() {
                        return Err(err::AtomDBError::NotConceptName(name).into());
                    }
                    name
                }
                None => {
                    let filler_conjuncts = flatten(atoms, filler, equations)?;
                    let fresh = atoms.fresh_variable();
                    log::trace!(target: targets::GOAL, "Filler of role {role} named by {fresh}");
                    equations.push(Equation::new(fresh, filler_conjuncts));
                    fresh
                }
            };
            conjuncts.insert(atoms.make_existential(*role, child)?);
        }
    }
    Ok(())
}

#[cfg(test)]
mod flatten_tests {
    use super::*;

    #[test]
    fn nested_fillers_are_named() {
        let mut atoms = AtomDB::default();
        let a = atoms.constant("A");
        let b = atoms.constant("B");
        let c = atoms.constant("C");
        let r = atoms.intern_role("r");
        let s = atoms.intern_role("s");

        let term = Concept::and([
            Concept::name(a),
            Concept::exists(
                r,
                Concept::and([Concept::name(b), Concept::exists(s, Concept::name(c))]),
            ),
        ]);

        let mut equations = Vec::default();
        let conjuncts = flatten(&mut atoms, &term, &mut equations).unwrap();

        assert_eq!(equations.len(), 1);
        let fresh = equations[0].left;
        assert!(atoms.get(fresh).unwrap().is_variable());

        let s_c = atoms.existential("s", c).unwrap();
        assert_eq!(equations[0].right, BTreeSet::from([b, s_c]));

        let r_fresh = atoms.existential("r", fresh).unwrap();
        assert_eq!(conjuncts, BTreeSet::from([a, r_fresh]));
    }

    #[test]
    fn top_is_empty() {
        let mut atoms = AtomDB::default();
        let mut equations = Vec::default();
        let conjuncts = flatten(&mut atoms, &Concept::Top, &mut equations).unwrap();
        assert!(conjuncts.is_empty());
        assert!(equations.is_empty());
    }

    #[test]
    fn existential_names_rejected() {
        let mut atoms = AtomDB::default();
        let a = atoms.constant("A");
        let r_a = atoms.existential("r", a).unwrap();
        let mut equations = Vec::default();
        assert_eq!(
            flatten(&mut atoms, &Concept::name(r_a), &mut equations),
            Err(err::ErrorKind::AtomDB(err::AtomDBError::NotConceptName(r_a)))
        );
    }
}
