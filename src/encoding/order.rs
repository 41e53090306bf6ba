use crate::{
    encoding::Encoder,
    misc::log::targets::{self},
    types::err::{self},
};

impl Encoder<'_> {
    /// A strict order over the variables of the goal, compatible with the substitution.
    ///
    /// - `¬Ord(x, x)`.
    /// - `¬Ord(x, y) ∨ ¬Ord(y, z) ∨ Ord(x, z)`.
    /// - `¬Sub(x, ∃r.y) ∨ Ord(x, y)`, for each variable filler `y`.
    ///
    /// As the order is strict, no variable may (indirectly) occur in its own substitution.
    pub fn encode_order(&mut self) -> Result<(), err::ErrorKind> {
        let goal = self.goal;
        let variables = goal.variables();

        for &x in variables {
            let reflexive = self.order(x, x);
            self.clause(vec![-reflexive])?;
        }

        for &x in variables {
            for &y in variables {
                if x == y {
                    continue;
                }
                for &z in variables {
                    if y == z {
                        continue;
                    }
                    let xy = self.order(x, y);
                    let yz = self.order(y, z);
                    let xz = self.order(x, z);
                    self.clause(vec![-xy, -yz, xz])?;
                }
            }
        }

        for &x in variables {
            for &existential in goal.existentials() {
                let Some(y) = goal.child_of(existential) else {
                    continue;
                };
                if goal.is_variable(y) {
                    let conjunct = self.subsumption(x, existential);
                    let ordered = self.order(x, y);
                    self.clause(vec![-conjunct, ordered])?;
                }
            }
        }

        log::debug!(target: targets::ENCODING, "Order encoded, {} clauses", self.input.clause_count());
        Ok(())
    }
}
