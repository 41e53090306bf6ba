/*!
Dissubsumptions, disequations, and their justification.

A dissubsumption `⊓C ⋢ ⊓D` holds under a substitution exactly when some conjunct of σ(⊓D) fails to subsume σ(⊓C).
Such a conjunct is either:
- A non-variable atom `B` of `D`.
- A conjunct `H` of σ(`B`) for a variable `B` of `D`.

Each such alternative is given an index, and a [choice](crate::encoding::choice) among the alternatives is made.
The chosen alternative `(B, H)` requires `Sub(B, H)` (when `B` is a variable) and `Dis(A, H)` for each `A ∈ C`.

Each `Dis(a, b)` used is then justified, so that it holds only if `σ(a) ⋢ σ(b)`:
- `¬Dis(a, b) ∨ ¬Sub(a, b)`, if `Sub(a, b)` is a proposition.
- `¬Dis(a, a)`.
- For a variable `b`, a choice of a conjunct `H` of σ(`b`) with `Dis(a, H)`, through a [Match](Proposition::Match) proposition.
- For a variable `a` and non-variable `b`, `Dis(g, b)` for every conjunct `g` of σ(`a`).
- For `∃r.c` and `∃r.d`, `Dis(c, d)`.

Other pairs of non-variable atoms are fixed by the structure of the atoms, and so need no further justification.

A disequation `C ≢ D` is the choice of one of `C ⋢ D` and `D ⋢ C`.
*/

use std::collections::BTreeSet;

use crate::{
    encoding::{proposition::Proposition, Encoder},
    misc::log::targets::{self},
    structures::{
        atom::{Atom, AtomId},
        literal::CLiteral,
    },
    types::err::{self},
};

impl Encoder<'_> {
    /// Asserts each dissubsumption and disequation of the goal, and justifies each dissubsumption proposition used.
    pub fn encode_dissubsumptions(&mut self) -> Result<(), err::ErrorKind> {
        let goal = self.goal;

        for dissubsumption in goal.dissubsumptions() {
            self.assert_dissubsumption(&[], &dissubsumption.left, &dissubsumption.right)?;
        }

        for disequation in goal.disequations() {
            let direction = self.choice(2)?;
            let forward = direction.guard(0);
            self.assert_dissubsumption(&forward, &disequation.left, &disequation.right)?;
            let backward = direction.guard(1);
            self.assert_dissubsumption(&backward, &disequation.right, &disequation.left)?;
        }

        // Justification may use further dissubsumptions, which are noted after those justified.
        let mut justified = 0;
        while let Some(&(sub, sup)) = self.dissubsumptions.get_index(justified) {
            self.justify_dissubsumption(sub, sup)?;
            justified += 1;
        }

        log::debug!(target: targets::ENCODING, "{justified} dissubsumptions justified");
        Ok(())
    }

    /// Clauses, each extended by `guard`, asserting `⊓left ⋢ ⊓right`.
    fn assert_dissubsumption(
        &mut self,
        guard: &[CLiteral],
        left: &BTreeSet<AtomId>,
        right: &BTreeSet<AtomId>,
    ) -> Result<(), err::ErrorKind> {
        let goal = self.goal;

        let mut alternatives = Vec::default();
        for &conjunct in right {
            if goal.is_variable(conjunct) {
                for &atom in goal.nonvariables() {
                    alternatives.push((conjunct, atom));
                }
            } else {
                alternatives.push((conjunct, conjunct));
            }
        }

        if alternatives.is_empty() {
            // Nothing fails to subsume, as σ(⊓right) is ⊤.
            let mut clause = guard.to_vec();
            if clause.is_empty() {
                clause.push(self.absurd()?);
            }
            return self.clause(clause);
        }

        let choice = self.choice(alternatives.len())?;
        for (index, &(conjunct, witness)) in alternatives.iter().enumerate() {
            let mut base = guard.to_vec();
            base.extend(choice.guard(index));

            if conjunct != witness {
                let mut clause = base.clone();
                clause.push(self.subsumption(conjunct, witness));
                self.clause(clause)?;
            }

            for &atom in left {
                let mut clause = base.clone();
                clause.push(self.dissubsumption(atom, witness));
                self.clause(clause)?;
            }
        }
        Ok(())
    }

    /// Clauses which hold `Dis(sub, sup)` false unless `σ(sub) ⋢ σ(sup)`.
    fn justify_dissubsumption(&mut self, sub: AtomId, sup: AtomId) -> Result<(), err::ErrorKind> {
        let goal = self.goal;
        let dissubsumption = self
            .propositions
            .literal(Proposition::Dissubsumption { sub, sup });

        if let Some(id) = self
            .propositions
            .lookup(&Proposition::Subsumption { sub, sup })
        {
            self.clause(vec![-dissubsumption, -(id as CLiteral)])?;
        }

        if sub == sup {
            return self.clause(vec![-dissubsumption]);
        }

        if goal.is_variable(sup) {
            let witnesses = goal.nonvariables();
            if witnesses.is_empty() {
                return self.clause(vec![-dissubsumption]);
            }

            let choice = self.choice(witnesses.len())?;
            for (index, &witness) in witnesses.iter().enumerate() {
                let matched = self.propositions.literal(Proposition::Match {
                    atom: sub,
                    variable: sup,
                    witness,
                });

                let mut clause = vec![-dissubsumption];
                clause.extend(choice.guard(index));
                clause.push(matched);
                self.clause(clause)?;

                let conjunct = self.subsumption(sup, witness);
                self.clause(vec![-matched, conjunct])?;

                let fails = self.dissubsumption(sub, witness);
                self.clause(vec![-matched, fails])?;
            }
            return Ok(());
        }

        if goal.is_variable(sub) {
            for &conjunct in goal.nonvariables() {
                let has_conjunct = self.subsumption(sub, conjunct);
                let fails = self.dissubsumption(conjunct, sup);
                self.clause(vec![-dissubsumption, -has_conjunct, fails])?;
            }
            return Ok(());
        }

        if let (
            Atom::ExistentialRestriction {
                role: sub_role,
                child: sub_child,
            },
            Atom::ExistentialRestriction {
                role: sup_role,
                child: sup_child,
            },
        ) = (self.atom(sub)?, self.atom(sup)?)
        {
            if sub_role == sup_role {
                let children = self.dissubsumption(sub_child, sup_child);
                self.clause(vec![-dissubsumption, children])?;
            }
        }
        Ok(())
    }
}
