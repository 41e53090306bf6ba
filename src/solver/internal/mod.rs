/*!
An in-process solver.

The solver is a [GenericContext], to which clauses are added and within which solves take place.
The context is generic over its source of randomness, and [Context] fixes the source to [MinimalPCG32].

A solve is a depth-first search over valuations, with:
- [Boolean constraint propagation](crate::solver::internal::bcp) through two watched literals in each clause.
- [Decisions](crate::solver::internal::decision) on the first proposition without a value.
- Chronological [backtracking](crate::solver::internal::backtrack), flipping the most recent decision not yet flipped.

If some propositions are to be minimized, the search continues past the first model found, with branches pruned once as many minimized propositions are true as on the best model so far --- and so the model returned is minimal.

Each solve starts from an empty valuation, and so adding a clause and solving again returns a model of the extended clauses.

# Example

```rust
# use otter_uel::config::InternalConfig;
# use otter_uel::solver::internal::Context;
# use otter_uel::solver::report::Report;
let mut the_context = Context::from_config(&InternalConfig::default());

assert!(the_context.add_clause([1, 2]).is_ok());
assert!(the_context.add_clause([-1]).is_ok());

assert_eq!(the_context.solve(), Ok(Report::Satisfiable));
assert_eq!(the_context.value_of(1), Some(false));
assert_eq!(the_context.value_of(2), Some(true));
```
*/

mod backtrack;
mod bcp;
mod decision;
mod solve;

pub use decision::DecisionOk;

use rand::SeedableRng;

use crate::{
    cnf::SatInput,
    config::{Config, InternalConfig},
    generic::minimal_pcg::MinimalPCG32,
    misc::log::targets::{self},
    solver::{report::Report, Model, SatOutcome, SatSolver},
    structures::{
        clause::CClause,
        literal::{CLiteral, Literal, LiteralId},
        valuation::Valuation,
    },
    types::err::{self},
};

/// The state of a context.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContextState {
    /// The context allows input, and the satisfiability of its clauses is unknown.
    Input,

    /// A model of the clauses has been found.
    Satisfiable,

    /// The clauses are known to be unsatisfiable.
    Unsatisfiable,

    /// The clauses of the context have been released.
    Released,
}

/// Ok results when adding a clause.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClauseOk {
    /// The clause was added.
    Added,

    /// The clause contains some literal and its negation, and so was not added.
    Tautology,
}

/// Counts for various things which count, roughly.
#[derive(Clone, Debug, Default)]
pub struct Counters {
    /// A count of every conflict seen during a solve.
    pub total_conflicts: usize,

    /// A count of all decisions made.
    pub total_decisions: usize,

    /// The total number of iterations through a solve.
    pub total_iterations: usize,

    /// A count of models found during a solve, with each model better than the last.
    pub models: usize,

    /// The time taken during a solve.
    pub time: std::time::Duration,
}

/// A decision, and where the assignments made from the decision start on the trail.
#[derive(Clone, Copy, Debug)]
struct Level {
    start: usize,
    decision: CLiteral,
    flipped: bool,
}

/// A generic context, paramaterised to a source of randomness.
pub struct GenericContext<R: rand::Rng> {
    /// The configuration of a context.
    pub config: InternalConfig,

    /// Counters related to a context/solve.
    pub counters: Counters,

    /// The status of the context.
    pub state: ContextState,

    /// Clauses of two or more literals, with the watched literals at indices `0` and `1`.
    clauses: Vec<CClause>,

    /// Clauses of one literal.
    units: Vec<CLiteral>,

    /// For each literal, the clauses watching the literal, indexed by [watch_index].
    watches: Vec<Vec<usize>>,

    /// The current valuation, indexed by proposition id.
    valuation: Vec<Option<bool>>,

    /// Whether each proposition is to be minimized, indexed by proposition id.
    minimize: Vec<bool>,

    /// Literals assigned true, in order of assignment.
    trail: Vec<CLiteral>,

    levels: Vec<Level>,

    /// The index of the next literal on the trail to propagate.
    q_head: usize,

    /// The count of minimized propositions true on the current valuation.
    cost: usize,

    /// The best valuation found, together with its cost.
    best: Option<(Vec<Option<bool>>, usize)>,

    /// The source of rng.
    rng: R,
}

/// A context which uses [MinimalPCG32] as a source of randomness.
pub type Context = GenericContext<MinimalPCG32>;

impl Context {
    pub fn from_config(config: &InternalConfig) -> Self {
        let rng = MinimalPCG32::seed_from_u64(config.rng_seed);
        GenericContext::new(config.clone(), rng)
    }
}

/// The index of the watch list of `literal`.
fn watch_index(literal: CLiteral) -> usize {
    2 * literal.id() as usize + literal.polarity() as usize
}

impl<R: rand::Rng> GenericContext<R> {
    pub fn new(config: InternalConfig, rng: R) -> Self {
        GenericContext {
            config,
            counters: Counters::default(),
            state: ContextState::Input,
            clauses: Vec::default(),
            units: Vec::default(),
            watches: vec![Vec::default(); 2],
            valuation: vec![None],
            minimize: vec![false],
            trail: Vec::default(),
            levels: Vec::default(),
            q_head: 0,
            cost: 0,
            best: None,
            rng,
        }
    }

    /// A report on the state of the context.
    pub fn report(&self) -> Report {
        match self.state {
            ContextState::Satisfiable => Report::Satisfiable,
            ContextState::Unsatisfiable => Report::Unsatisfiable,
            ContextState::Input | ContextState::Released => Report::Unknown,
        }
    }

    /// Adds `clause` to the context.
    pub fn add_clause(
        &mut self,
        clause: impl IntoIterator<Item = CLiteral>,
    ) -> Result<ClauseOk, err::ClauseSetError> {
        let mut clause: CClause = clause.into_iter().collect();
        if clause.is_empty() {
            return Err(err::ClauseSetError::EmptyClause);
        }
        if clause.contains(&0) {
            return Err(err::ClauseSetError::ReservedLiteral);
        }

        clause.sort_unstable_by_key(|literal| (literal.id(), literal.polarity()));
        clause.dedup();
        if clause.windows(2).any(|pair| pair[0].id() == pair[1].id()) {
            return Ok(ClauseOk::Tautology);
        }

        for literal in &clause {
            self.ensure_id(literal.id());
        }
        self.state = ContextState::Input;

        match clause.as_slice() {
            [unit] => self.units.push(*unit),
            _ => {
                let key = self.clauses.len();
                self.watches[watch_index(clause[0])].push(key);
                self.watches[watch_index(clause[1])].push(key);
                self.clauses.push(clause);
            }
        }
        Ok(ClauseOk::Added)
    }

    /// Notes `id` as a proposition to minimize.
    pub fn add_minimize_literal(&mut self, id: LiteralId) -> Result<(), err::ClauseSetError> {
        if id == 0 {
            return Err(err::ClauseSetError::ReservedLiteral);
        }
        self.ensure_id(id);
        self.minimize[id as usize] = true;
        self.state = ContextState::Input;
        Ok(())
    }

    /// The value of `id` on the model found by the last solve, if any.
    pub fn value_of(&self, id: LiteralId) -> Option<bool> {
        match &self.best {
            Some((valuation, _)) => valuation.value_of(id).flatten(),
            None => None,
        }
    }

    /// The model found by the last solve, if any.
    pub fn model(&self) -> Option<Model> {
        self.best
            .as_ref()
            .map(|(valuation, _)| valuation.true_ids().collect())
    }

    /// The count of minimized propositions true on the model found by the last solve, if any.
    pub fn cost(&self) -> Option<usize> {
        self.best.as_ref().map(|(_, cost)| *cost)
    }

    /// Removes all clauses and propositions to minimize.
    pub fn clear(&mut self) {
        self.clauses.clear();
        self.units.clear();
        self.watches = vec![Vec::default(); 2];
        self.valuation = vec![None];
        self.minimize = vec![false];
        self.reset_valuation();
        self.best = None;
        self.state = ContextState::Input;
    }

    /// Clears the context, and marks the context as released.
    pub fn release(&mut self) {
        self.clear();
        self.clauses.shrink_to_fit();
        self.watches.shrink_to_fit();
        self.state = ContextState::Released;
    }

    fn ensure_id(&mut self, id: LiteralId) {
        let required = id as usize + 1;
        if self.valuation.len() < required {
            self.valuation.resize(required, None);
            self.minimize.resize(required, false);
            self.watches.resize(2 * required, Vec::default());
        }
    }

    /// Forgets every assignment.
    fn reset_valuation(&mut self) {
        self.valuation.iter_mut().for_each(|value| *value = None);
        self.trail.clear();
        self.levels.clear();
        self.q_head = 0;
        self.cost = 0;
    }

    /// Assigns `literal` true, and places the literal on the trail.
    fn assign(&mut self, literal: CLiteral) {
        let id = literal.id() as usize;
        self.valuation[id] = Some(literal.polarity());
        if literal.polarity() && self.minimize[id] {
            self.cost += 1;
        }
        self.trail.push(literal);
    }
}

/// The [SatSolver] adapter of a [Context].
pub struct InternalSolver {
    context: Context,
}

impl InternalSolver {
    pub fn from_config(config: &Config) -> Self {
        InternalSolver {
            context: Context::from_config(&config.internal),
        }
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    fn outcome(&mut self) -> Result<SatOutcome, err::ErrorKind> {
        let report = self.context.solve()?;
        log::info!(target: targets::SOLVER,
            "{report} after {} decisions, {} conflicts, {:?}",
            self.context.counters.total_decisions,
            self.context.counters.total_conflicts,
            self.context.counters.time);

        match report {
            Report::Satisfiable => Ok(SatOutcome::Satisfiable(
                self.context.model().unwrap_or_default(),
            )),
            Report::Unsatisfiable => Ok(SatOutcome::Unsatisfiable),
            Report::Unknown => Err(err::SolverError::Interrupted.into()),
        }
    }
}

impl SatSolver for InternalSolver {
    fn solve(&mut self, input: &SatInput) -> Result<SatOutcome, err::ErrorKind> {
        self.context.clear();
        for clause in input.clauses() {
            self.context.add_clause(clause.iter().copied())?;
        }
        for id in input.minimize_literals() {
            self.context.add_minimize_literal(*id)?;
        }
        self.outcome()
    }

    fn update(&mut self, clause: &[CLiteral]) -> Result<SatOutcome, err::ErrorKind> {
        if self.context.state == ContextState::Released {
            return Err(err::SolverError::Released.into());
        }
        self.context.add_clause(clause.iter().copied())?;
        self.outcome()
    }

    fn cleanup(&mut self) {
        if self.context.state != ContextState::Released {
            log::debug!(target: targets::SOLVER, "Internal solver released");
            self.context.release();
        }
    }
}

#[cfg(test)]
mod context_tests {
    use super::*;

    #[test]
    fn tautologies_are_skipped() {
        let mut context = Context::from_config(&InternalConfig::default());
        assert_eq!(context.add_clause([1, -1, 2]), Ok(ClauseOk::Tautology));
        assert_eq!(context.add_clause([2, 1, 2]), Ok(ClauseOk::Added));
        assert_eq!(
            context.add_clause(Vec::<CLiteral>::new()),
            Err(err::ClauseSetError::EmptyClause)
        );
    }

    #[test]
    fn conflicting_units() {
        let mut context = Context::from_config(&InternalConfig::default());
        context.add_clause([3]).unwrap();
        context.add_clause([-3]).unwrap();
        assert_eq!(context.solve(), Ok(Report::Unsatisfiable));
        assert_eq!(context.model(), None);
    }

    #[test]
    fn pigeons_do_not_fit() {
        // Three pigeons, two holes, with p(i, j) = 2i + j + 1.
        let mut context = Context::from_config(&InternalConfig::default());
        for pigeon in 0..3 {
            context.add_clause([2 * pigeon + 1, 2 * pigeon + 2]).unwrap();
        }
        for hole in 0..2 {
            for first in 0..3 {
                for second in (first + 1)..3 {
                    context
                        .add_clause([-(2 * first + hole + 1), -(2 * second + hole + 1)])
                        .unwrap();
                }
            }
        }
        assert_eq!(context.solve(), Ok(Report::Unsatisfiable));
    }

    #[test]
    fn models_satisfy_every_clause() {
        let clauses = vec![
            vec![1, 2, 3],
            vec![-1, -2],
            vec![-1, -3],
            vec![-2, -3],
            vec![2, 4],
            vec![-4, 5],
            vec![-5, -2, 6],
        ];
        let mut context = Context::from_config(&InternalConfig::default());
        for clause in &clauses {
            context.add_clause(clause.iter().copied()).unwrap();
        }
        assert_eq!(context.solve(), Ok(Report::Satisfiable));
        for clause in &clauses {
            assert!(clause
                .iter()
                .any(|literal| context.value_of(literal.id()) == Some(literal.polarity())));
        }
    }

    #[test]
    fn minimal_model() {
        // At least one of 1, 2, 3, where 1 forces 2 and 3.
        let mut context = Context::from_config(&InternalConfig {
            polarity_lean: 1.0,
            ..Default::default()
        });
        context.add_clause([1, 2, 3]).unwrap();
        context.add_clause([-1, 2]).unwrap();
        context.add_clause([-1, 3]).unwrap();
        for id in 1..=3 {
            context.add_minimize_literal(id).unwrap();
        }
        assert_eq!(context.solve(), Ok(Report::Satisfiable));
        assert_eq!(context.cost(), Some(1));
        assert_eq!(context.value_of(1), Some(false));
    }

    #[test]
    fn released_updates_fail() {
        let mut solver = InternalSolver::from_config(&Config::default());
        let mut input = SatInput::default();
        input.add_clause([1]).unwrap();
        assert!(solver.solve(&input).is_ok());
        solver.cleanup();
        solver.cleanup();
        assert_eq!(
            solver.update(&[2]),
            Err(err::ErrorKind::Solver(err::SolverError::Released))
        );
    }
}
