/*!
Enumeration of the unifiers of a goal.

A [UnifierEnumerator] drives the solve, decode, block loop over the [encoding](crate::encoding) of a goal.

# States

An enumerator is in one of the [states](EnumeratorState):
- [Fresh](EnumeratorState::Fresh), once the goal has been encoded, and before any solve.
- [Ready](EnumeratorState::Ready), after the first solve, holding its outcome.
- [Solved](EnumeratorState::Solved), after a unifier has been found, holding the outcome of the solve with that unifier blocked.
- [Exhausted](EnumeratorState::Exhausted), after an unsatisfiable outcome, and from then on.

[compute_next](UnifierEnumerator::compute_next) takes the held outcome (solving first, if fresh).
If the outcome is satisfiable the model is decoded to a unifier, the unifier is blocked, and `true` is returned.
Otherwise, the solver is released and `false` is returned.

The [blocking clause](crate::encoding::Encoding::blocking_clause) of a model is over the substitution propositions of the [visible](crate::goal::Goal::visible_variables) variables of the model only.
So, the clause excludes every model with the same user-visible unifier, and no other, and no unifier is returned twice.

# Solver failures

A failure of the solver itself --- an error of kind [Solver](err::ErrorKind::Solver) --- ends the enumeration as though the clause set were unsatisfiable.
The failure is kept, and may be read with [diagnostic](UnifierEnumerator::diagnostic).
Any other error is propagated, after the solver is released.

# Example

```rust
# use otter_uel::config::Config;
# use otter_uel::db::atom::AtomDB;
# use otter_uel::enumerate::{EnumeratorState, UnifierEnumerator};
# use otter_uel::goal::{build_goal, definitions::NoDefinitions};
# use otter_uel::structures::equation::Equation;
# use std::rc::Rc;
let mut atoms = AtomDB::default();
let x = atoms.user_variable("X");
let a = atoms.constant("A");
let c = atoms.constant("C");
let d = atoms.constant("D");

// X ⊓ A ≡ C and X ⊓ A ≡ D have no unifier, as C and D are distinct constants.
let left = atoms.variable("L");
let equations = [
    Equation::new(left, [x, a]),
    Equation::new(left, [c]),
    Equation::new(left, [d]),
];
let goal = Rc::new(build_goal(&mut atoms, equations, &NoDefinitions).unwrap());

let mut enumerator = UnifierEnumerator::new(&atoms, goal, &Config::default()).unwrap();
assert_eq!(enumerator.state(), EnumeratorState::Fresh);
assert_eq!(enumerator.compute_next(), Ok(false));
assert_eq!(enumerator.state(), EnumeratorState::Exhausted);
assert_eq!(enumerator.count(), 0);
```
*/

pub mod session;
pub use session::{EnumeratorKey, Session};

use std::rc::Rc;

use crate::{
    config::Config,
    db::atom::AtomDB,
    encoding::{encode, Encoding},
    goal::Goal,
    misc::log::targets::{self},
    solver::{self, SatOutcome, SatSolver},
    types::err::{self},
    unifier::{decode::decode, Unifier},
};

/// The states of an enumerator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnumeratorState {
    Fresh,

    Ready,

    Solved,

    Exhausted,
}

impl std::fmt::Display for EnumeratorState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fresh => write!(f, "Fresh"),
            Self::Ready => write!(f, "Ready"),
            Self::Solved => write!(f, "Solved"),
            Self::Exhausted => write!(f, "Exhausted"),
        }
    }
}

pub struct UnifierEnumerator {
    goal: Rc<Goal>,

    encoding: Encoding,

    solver: Box<dyn SatSolver>,

    state: EnumeratorState,

    /// The outcome of the most recent solve, until taken by [compute_next](UnifierEnumerator::compute_next).
    outcome: Option<SatOutcome>,

    /// The most recent unifier, until taken.
    unifier: Option<Unifier>,

    /// A count of unifiers found.
    count: usize,

    /// The solver failure which ended the enumeration, if any.
    diagnostic: Option<err::SolverError>,

    released: bool,
}

impl UnifierEnumerator {
    /// An enumerator for `goal`, with the solver of the backend of `config`.
    pub fn new(atoms: &AtomDB, goal: Rc<Goal>, config: &Config) -> Result<Self, err::ErrorKind> {
        Self::with_solver(atoms, goal, config, solver::from_config(config))
    }

    /// An enumerator for `goal`, with the given solver.
    pub fn with_solver(
        atoms: &AtomDB,
        goal: Rc<Goal>,
        config: &Config,
        solver: Box<dyn SatSolver>,
    ) -> Result<Self, err::ErrorKind> {
        let encoding = encode(atoms, &goal, config)?;

        Ok(UnifierEnumerator {
            goal,
            encoding,
            solver,
            state: EnumeratorState::Fresh,
            outcome: None,
            unifier: None,
            count: 0,
            diagnostic: None,
            released: false,
        })
    }

    /// Solves the encoding, if fresh.
    pub fn initialize(&mut self) -> Result<(), err::ErrorKind> {
        if self.state != EnumeratorState::Fresh {
            return Ok(());
        }

        log::debug!(target: targets::ENUMERATION,
            "Initial solve over {} clauses",
            self.encoding.input().clause_count());

        match self.solver.solve(self.encoding.input()) {
            Ok(outcome) => {
                self.outcome = Some(outcome);
                self.state = EnumeratorState::Ready;
                Ok(())
            }

            Err(err::ErrorKind::Solver(e)) => {
                self.note_failure(e);
                self.exhaust();
                Ok(())
            }

            Err(e) => {
                self.exhaust();
                Err(e)
            }
        }
    }

    /// Computes the next unifier, returning whether there was one.
    ///
    /// The unifier is available from [unifier](UnifierEnumerator::unifier) until the next call.
    pub fn compute_next(&mut self) -> Result<bool, err::ErrorKind> {
        match self.state {
            EnumeratorState::Exhausted => return Ok(false),
            EnumeratorState::Fresh => self.initialize()?,
            EnumeratorState::Ready | EnumeratorState::Solved => {}
        }

        self.unifier = None;

        let model = match self.outcome.take() {
            Some(SatOutcome::Satisfiable(model)) => model,
            Some(SatOutcome::Unsatisfiable) | None => {
                log::info!(target: targets::ENUMERATION, "Enumeration exhausted after {} unifiers", self.count);
                self.exhaust();
                return Ok(false);
            }
        };

        let unifier = match decode(&self.goal, self.encoding.propositions(), &model) {
            Ok(unifier) => unifier,
            Err(e) => {
                self.exhaust();
                return Err(e);
            }
        };
        self.count += 1;
        log::info!(target: targets::ENUMERATION, "Unifier {} found", self.count);

        let blocking = self.encoding.blocking_clause(&self.goal, &model);
        let next = match blocking.is_empty() {
            true => SatOutcome::Unsatisfiable,
            false => match self.solver.update(&blocking) {
                Ok(outcome) => outcome,

                Err(err::ErrorKind::Solver(e)) => {
                    self.note_failure(e);
                    SatOutcome::Unsatisfiable
                }

                Err(e) => {
                    self.exhaust();
                    return Err(e);
                }
            },
        };

        self.unifier = Some(unifier);
        self.outcome = Some(next);
        self.state = EnumeratorState::Solved;
        Ok(true)
    }

    /// The unifier found by the last call to [compute_next](UnifierEnumerator::compute_next), if any.
    pub fn unifier(&self) -> Option<&Unifier> {
        self.unifier.as_ref()
    }

    /// Takes ownership of the unifier found by the last call to [compute_next](UnifierEnumerator::compute_next), if any.
    pub fn take_unifier(&mut self) -> Option<Unifier> {
        self.unifier.take()
    }

    pub fn state(&self) -> EnumeratorState {
        self.state
    }

    /// The solver failure which ended the enumeration, if any.
    pub fn diagnostic(&self) -> Option<&err::SolverError> {
        self.diagnostic.as_ref()
    }

    /// A count of the unifiers found.
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn encoding(&self) -> &Encoding {
        &self.encoding
    }

    pub fn goal(&self) -> &Goal {
        &self.goal
    }

    /// Releases the solver, and ends the enumeration.
    ///
    /// Cleanup is idempotent, and is made on drop.
    pub fn cleanup(&mut self) {
        self.exhaust();
    }

    fn note_failure(&mut self, e: err::SolverError) {
        log::warn!(target: targets::ENUMERATION, "Solver failure ends the enumeration: {e}");
        self.diagnostic = Some(e);
    }

    fn exhaust(&mut self) {
        self.state = EnumeratorState::Exhausted;
        self.outcome = None;
        if !self.released {
            self.solver.cleanup();
            self.released = true;
        }
    }
}

impl Drop for UnifierEnumerator {
    fn drop(&mut self) {
        if !self.released {
            self.solver.cleanup();
            self.released = true;
        }
    }
}
