use crate::{
    encoding::Encoder,
    misc::log::targets::{self},
    types::err::{self},
};

impl Encoder<'_> {
    /// Clauses relating the conjuncts of each side of each equation of the goal.
    ///
    /// For an equation `l ≡ ⊓R` and a non-variable atom `H`:
    /// - `¬Sub(b, H) ∨ Sub(l, H)`, for each `b ∈ R`.
    /// - `¬Sub(l, H) ∨ ⋁ Sub(b, H)`, unless the equation is primitive.
    ///
    /// With `R` empty and the equation not primitive, the second clause is the unit `¬Sub(l, H)`.
    pub fn encode_equations(&mut self) -> Result<(), err::ErrorKind> {
        let goal = self.goal;
        for equation in goal.equations() {
            for &atom in goal.nonvariables() {
                let left = self.subsumption(equation.left, atom);

                for &conjunct in &equation.right {
                    let right = self.subsumption(conjunct, atom);
                    self.clause(vec![-right, left])?;
                }

                if !equation.is_primitive {
                    let mut clause = vec![-left];
                    for &conjunct in &equation.right {
                        clause.push(self.subsumption(conjunct, atom));
                    }
                    self.clause(clause)?;
                }
            }
        }
        log::debug!(target: targets::ENCODING, "Equations encoded, {} clauses", self.input.clause_count());
        Ok(())
    }
}
