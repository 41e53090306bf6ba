//! Determines the satisfiability of the clauses in a context.
//!
//! Roughly, a solve is:
//!
//! ```rust,ignore
//! loop {
//!     if self.propagate().is_err() {
//!         match self.backtrack() {
//!             true => continue,
//!             false => break,
//!         }
//!     }
//!
//!     match self.make_decision() {
//!         DecisionOk::Made => continue,
//!         DecisionOk::Exhausted => {
//!             // Note the model, and continue past the model only if minimizing.
//!         }
//!     }
//! }
//! ```
//!
//! When minimizing, a branch is abandoned as soon as the count of true minimized propositions reaches the count on the best model found so far.

use std::time::Instant;

use crate::{
    misc::log::targets::{self},
    solver::{
        internal::{decision::DecisionOk, ContextState, GenericContext},
        report::Report,
    },
    structures::{literal::Literal, valuation::Valuation},
    types::err::{self},
};

impl<R: rand::Rng> GenericContext<R> {
    /// Determines the satisfiability of the clauses of the context, from an empty valuation.
    pub fn solve(&mut self) -> Result<Report, err::SolverError> {
        if self.state == ContextState::Released {
            return Err(err::SolverError::Released);
        }

        let start = Instant::now();
        self.reset_valuation();
        self.best = None;
        self.counters.models = 0;

        for index in 0..self.units.len() {
            let unit = self.units[index];
            match self.valuation.value_of(unit.id()).flatten() {
                None => self.assign(unit),
                Some(value) if value != unit.polarity() => {
                    log::debug!(target: targets::SOLVER, "Conflicting unit clauses on {}", unit.id());
                    self.state = ContextState::Unsatisfiable;
                    self.counters.time = start.elapsed();
                    return Ok(Report::Unsatisfiable);
                }
                Some(_) => {}
            }
        }

        let minimizing = self.minimize.iter().any(|minimized| *minimized);

        'search: loop {
            self.counters.total_iterations += 1;

            if let Some(limit) = self.config.time_limit {
                if start.elapsed() > limit {
                    self.counters.time = start.elapsed();
                    log::info!(target: targets::SOLVER, "Time limit reached");
                    self.state = ContextState::Input;
                    return Err(err::SolverError::Interrupted);
                }
            }

            if let Err(err::BCPError::Conflict(key)) = self.propagate() {
                self.counters.total_conflicts += 1;
                log::trace!(target: targets::SOLVER, "Conflict in clause {key}");
                match self.backtrack() {
                    true => continue 'search,
                    false => break 'search,
                }
            }

            if let Some((_, bound)) = &self.best {
                if self.cost >= *bound {
                    match self.backtrack() {
                        true => continue 'search,
                        false => break 'search,
                    }
                }
            }

            match self.make_decision() {
                DecisionOk::Made => continue 'search,

                DecisionOk::Exhausted => {
                    self.counters.models += 1;
                    log::debug!(target: targets::SOLVER, "Model with cost {}", self.cost);
                    self.best = Some((self.valuation.clone(), self.cost));

                    if !minimizing || self.cost == 0 || !self.backtrack() {
                        break 'search;
                    }
                }
            }
        }

        self.counters.time = start.elapsed();
        self.state = match self.best {
            Some(_) => ContextState::Satisfiable,
            None => ContextState::Unsatisfiable,
        };
        Ok(self.report())
    }
}
