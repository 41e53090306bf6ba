/*!
Solvers, behind a common adapter contract.

A [SatSolver] determines the satisfiability of a [clause set](SatInput), returning a [model](Model) if the clause set is satisfiable.
After a first solve, clauses may be added with [update](SatSolver::update), which returns the outcome of the clause set with the clause added --- and so a sequence of models may be found by blocking each model in turn.

Two solvers are provided:
- The [internal] solver, in process.
- An [external] solver, in some other process, given (W)CNF on stdin.

If the clause set has literals to minimize the solver must return, among the models of the clause set, one which minimizes the number of true literals to minimize.

```rust
# use otter_uel::cnf::SatInput;
# use otter_uel::config::Config;
# use otter_uel::solver::{self, SatOutcome};
let mut input = SatInput::default();
input.add_clause([1, 2]).unwrap();
input.add_clause([-1]).unwrap();

let mut solver = solver::from_config(&Config::default());
assert_eq!(solver.solve(&input), Ok(SatOutcome::Satisfiable([2].into())));
assert_eq!(solver.update(&[-2]), Ok(SatOutcome::Unsatisfiable));
solver.cleanup();
```
*/

pub mod external;
pub mod internal;
pub mod report;

use std::collections::BTreeSet;

use crate::{
    cnf::SatInput,
    config::{Backend, Config},
    structures::literal::{CLiteral, LiteralId},
    types::err::{self},
};

/// A model, as the set of ids of the propositions true on the model.
///
/// Any proposition not in the set is false.
pub type Model = BTreeSet<LiteralId>;

/// The outcome of a solve.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SatOutcome {
    Unsatisfiable,

    Satisfiable(Model),
}

/// The adapter contract of a solver.
///
/// Errors of kind [Solver](err::ErrorKind::Solver) concern the solver itself (e.g. an unavailable process), while other errors are violations of the contract by the caller (e.g. an empty clause).
pub trait SatSolver {
    /// The outcome of `input`, replacing any clauses from a previous solve.
    fn solve(&mut self, input: &SatInput) -> Result<SatOutcome, err::ErrorKind>;

    /// Adds `clause` to the clauses of the last solve, and returns the outcome of the result.
    fn update(&mut self, clause: &[CLiteral]) -> Result<SatOutcome, err::ErrorKind>;

    /// Releases any resources held by the solver.
    ///
    /// Cleanup is idempotent, and after cleanup the solver should not be used.
    fn cleanup(&mut self);
}

/// The solver of the backend of `config`.
pub fn from_config(config: &Config) -> Box<dyn SatSolver> {
    match &config.backend {
        Backend::Internal => Box::new(internal::InternalSolver::from_config(config)),
        Backend::External(command) => Box::new(external::ExternalSolver::new(
            command.clone(),
            config.hard_weight,
        )),
    }
}
