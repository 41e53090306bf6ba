//! Boolean constraint propagation.
//!
//! Each clause of two or more literals watches two of its literals, kept at indices `0` and `1`.
//! While some literal of a clause other than the watched literals could be true, at least one watched literal could be true, and so a clause need only be inspected when a watched literal becomes false.
//!
//! On inspection, the clause either:
//! - Is satisfied by its other watched literal.
//! - Finds some other literal which is not false to watch instead.
//! - Asserts its other watched literal, if that literal has no value.
//! - Is in conflict with the valuation, if the other watched literal is false.
//!
//! As watches need not be restored on backtracking, watches are never revised except during propagation.

use crate::{
    solver::internal::{watch_index, GenericContext},
    structures::{
        literal::{CLiteral, Literal},
        valuation::Valuation,
    },
    types::err::{self},
};

impl<R: rand::Rng> GenericContext<R> {
    /// Propagates every literal on the trail which has not been propagated.
    ///
    /// Returns the index of a clause in conflict with the valuation, if one is found.
    pub fn propagate(&mut self) -> Result<(), err::BCPError> {
        while self.q_head < self.trail.len() {
            let falsified: CLiteral = self.trail[self.q_head].negate();
            self.q_head += 1;

            let index = watch_index(falsified);
            let watching = std::mem::take(&mut self.watches[index]);
            let mut kept = Vec::with_capacity(watching.len());
            let mut conflict = None;

            for (position, &key) in watching.iter().enumerate() {
                if conflict.is_some() {
                    kept.extend_from_slice(&watching[position..]);
                    break;
                }

                let clause = &mut self.clauses[key];
                if clause[0] == falsified {
                    clause.swap(0, 1);
                }

                let other = clause[0];
                let other_value = self.valuation.value_of(other.id()).flatten();
                if other_value == Some(other.polarity()) {
                    kept.push(key);
                    continue;
                }

                let replacement = (2..clause.len()).find(|&k| {
                    self.valuation.value_of(clause[k].id()).flatten() != Some(!clause[k].polarity())
                });
                if let Some(k) = replacement {
                    clause.swap(1, k);
                    let watched = clause[1];
                    self.watches[watch_index(watched)].push(key);
                    continue;
                }

                kept.push(key);
                match other_value {
                    None => self.assign(other),
                    Some(_) => conflict = Some(key),
                }
            }

            self.watches[index] = kept;
            if let Some(key) = conflict {
                return Err(err::BCPError::Conflict(key));
            }
        }
        Ok(())
    }
}
