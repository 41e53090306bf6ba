//! Chronological backtracking.
//!
//! A backtrack removes the most recent level whose decision has already been flipped, repeatedly, and then flips the decision of the most recent remaining level.
//! The flipped decision is kept as a level of its own, so the search is exhaustive.

use crate::{
    solver::internal::{GenericContext, Level},
    structures::literal::Literal,
};

impl<R: rand::Rng> GenericContext<R> {
    /// Backtracks to the most recent decision not yet flipped, and flips the decision.
    ///
    /// Returns false if every decision has been flipped, in which case the search is complete.
    pub fn backtrack(&mut self) -> bool {
        while let Some(level) = self.levels.pop() {
            self.unwind(level.start);
            if !level.flipped {
                let flipped = level.decision.negate();
                self.levels.push(Level {
                    start: self.trail.len(),
                    decision: flipped,
                    flipped: true,
                });
                self.assign(flipped);
                return true;
            }
        }
        false
    }

    /// Removes every assignment from index `start` of the trail.
    fn unwind(&mut self, start: usize) {
        while self.trail.len() > start {
            if let Some(literal) = self.trail.pop() {
                let id = literal.id() as usize;
                self.valuation[id] = None;
                if literal.polarity() && self.minimize[id] {
                    self.cost -= 1;
                }
            }
        }
        self.q_head = self.q_head.min(start);
    }
}
