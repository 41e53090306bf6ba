use crate::{
    encoding::Encoder,
    misc::log::targets::{self},
    structures::atom::{Atom, AtomId},
    types::err::{self},
};

impl Encoder<'_> {
    /// Fixes `Sub(a, b)` for all non-variable atoms `a` and `b`.
    ///
    /// - `Sub(a, a)` holds.
    /// - `Sub(∃r.c, ∃r.d)` holds exactly when `Sub(c, d)` does.
    /// - Otherwise, `Sub(a, b)` fails.
    pub fn encode_structure(&mut self) -> Result<(), err::ErrorKind> {
        let goal = self.goal;
        for &sub in goal.nonvariables() {
            for &sup in goal.nonvariables() {
                let subsumption = self.subsumption(sub, sup);
                if sub == sup {
                    self.clause(vec![subsumption])?;
                    continue;
                }

                match (self.atom(sub)?, self.atom(sup)?) {
                    (
                        Atom::ExistentialRestriction {
                            role: sub_role,
                            child: sub_child,
                        },
                        Atom::ExistentialRestriction {
                            role: sup_role,
                            child: sup_child,
                        },
                    ) if sub_role == sup_role => {
                        let children = self.subsumption(sub_child, sup_child);
                        self.clause(vec![-subsumption, children])?;
                        self.clause(vec![-children, subsumption])?;
                        if goal.is_variable(sup_child) {
                            self.note_variable_subsumption(sub_child, sup_child);
                        }
                    }

                    _ => self.clause(vec![-subsumption])?,
                }
            }
        }
        log::debug!(target: targets::ENCODING, "Structure encoded, {} clauses", self.input.clause_count());
        Ok(())
    }

    /// Transitivity through the conjuncts of a variable, for each noted `Sub(a, y)`.
    ///
    /// `¬Sub(a, y) ∨ ¬Sub(y, h) ∨ Sub(a, h)`, for each non-variable atom `h`.
    pub fn encode_transitivity(&mut self) -> Result<(), err::ErrorKind> {
        let goal = self.goal;
        let pairs = std::mem::take(&mut self.variable_subsumptions);
        for &(sub, variable) in &pairs {
            let through = self.subsumption(sub, variable);
            for &atom in goal.nonvariables() {
                let conjunct = self.subsumption(variable, atom);
                let transitive = self.subsumption(sub, atom);
                self.clause(vec![-through, -conjunct, transitive])?;
            }
        }
        log::debug!(target: targets::ENCODING, "Transitivity through {} subsumptions", pairs.len());
        self.variable_subsumptions = pairs;
        Ok(())
    }

    fn note_variable_subsumption(&mut self, sub: AtomId, variable: AtomId) {
        self.variable_subsumptions.insert((sub, variable));
    }
}
