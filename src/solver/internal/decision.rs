//! Decisions on propositions without a value.
//!
//! The proposition decided on is the first without a value, in order of id.
//! As the [encoder](crate::encoding) allocates substitution propositions first, decisions are made on the substitution before anything else.
//!
//! The polarity of a decision is:
//! - False, for a proposition to be minimized.
//! - Otherwise, true with probability given by the configured polarity lean.

use crate::{
    config::defaults,
    solver::internal::{GenericContext, Level},
    structures::{
        literal::{CLiteral, Literal},
        valuation::Valuation,
    },
};

/// Ok results of a decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecisionOk {
    /// A decision was made.
    Made,

    /// Every proposition has a value, and so no decision could be made.
    Exhausted,
}

impl<R: rand::Rng> GenericContext<R> {
    /// Makes a decision, if some proposition is without a value.
    pub fn make_decision(&mut self) -> DecisionOk {
        let Some(id) = self.valuation.unvalued_ids().next() else {
            return DecisionOk::Exhausted;
        };

        let polarity = match self.minimize[id as usize] {
            true => false,
            false => {
                let lean = match self.config.polarity_lean {
                    lean if lean.is_nan() => defaults::POLARITY_LEAN,
                    lean => lean.clamp(0.0, 1.0),
                };
                self.rng.gen_bool(lean)
            }
        };

        let decision = CLiteral::new(id, polarity);
        self.counters.total_decisions += 1;
        self.levels.push(Level {
            start: self.trail.len(),
            decision,
            flipped: false,
        });
        self.assign(decision);
        DecisionOk::Made
    }
}
