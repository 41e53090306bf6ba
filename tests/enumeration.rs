use std::{
    collections::{BTreeSet, HashSet},
    rc::Rc,
};

use otter_uel::{
    cnf::SatInput,
    config::{Algorithm, Backend, Config, ExternalCommand, Objective},
    db::atom::AtomDB,
    enumerate::{EnumeratorState, Session, UnifierEnumerator},
    goal::{build_goal, definitions::NoDefinitions, Goal, GoalBuilder},
    solver::{SatOutcome, SatSolver},
    structures::{concept::Concept, equation::Equation, literal::CLiteral},
    types::err::{EnumerationError, ErrorKind, SolverError},
    unifier::render::Renderer,
};

/// X ⊓ A ≡ A, with X either ⊤ or A.
fn optional_conjunct(atoms: &mut AtomDB) -> Goal {
    let x = atoms.user_variable("X");
    let a = atoms.constant("A");
    let left = atoms.variable("L");
    let equations = [Equation::new(left, [x, a]), Equation::new(left, [a])];
    build_goal(atoms, equations, &NoDefinitions).unwrap()
}

/// A solver which fails on each solve, counting cleanups.
struct FailingSolver {
    cleanups: Rc<std::cell::Cell<usize>>,
}

impl SatSolver for FailingSolver {
    fn solve(&mut self, _input: &SatInput) -> Result<SatOutcome, ErrorKind> {
        Err(SolverError::Interrupted.into())
    }

    fn update(&mut self, _clause: &[CLiteral]) -> Result<SatOutcome, ErrorKind> {
        Err(SolverError::Interrupted.into())
    }

    fn cleanup(&mut self) {
        self.cleanups.set(self.cleanups.get() + 1);
    }
}

mod state_machine {
    use super::*;

    #[test]
    fn states_in_order() {
        let mut atoms = AtomDB::default();
        let goal = Rc::new(optional_conjunct(&mut atoms));
        let mut enumerator = UnifierEnumerator::new(&atoms, goal, &Config::default()).unwrap();

        assert_eq!(enumerator.state(), EnumeratorState::Fresh);
        enumerator.initialize().unwrap();
        assert_eq!(enumerator.state(), EnumeratorState::Ready);
        assert!(enumerator.unifier().is_none());

        assert_eq!(enumerator.compute_next(), Ok(true));
        assert_eq!(enumerator.state(), EnumeratorState::Solved);
        assert!(enumerator.unifier().is_some());

        assert_eq!(enumerator.compute_next(), Ok(true));
        assert_eq!(enumerator.compute_next(), Ok(false));
        assert_eq!(enumerator.state(), EnumeratorState::Exhausted);
        assert!(enumerator.unifier().is_none());
        assert_eq!(enumerator.count(), 2);

        // Exhaustion is final.
        assert_eq!(enumerator.compute_next(), Ok(false));
        assert_eq!(enumerator.count(), 2);
    }

    #[test]
    fn no_repetition() {
        let mut atoms = AtomDB::default();
        let x = atoms.user_variable("X");
        let y = atoms.user_variable("Y");
        let a = atoms.constant("A");
        let b = atoms.constant("B");
        let c = atoms.constant("C");
        let left = atoms.variable("L");

        // X ⊓ Y ≡ A ⊓ B ⊓ C
        let equations = [Equation::new(left, [x, y]), Equation::new(left, [a, b, c])];
        let goal = Rc::new(build_goal(&mut atoms, equations, &NoDefinitions).unwrap());
        let mut enumerator = UnifierEnumerator::new(&atoms, goal.clone(), &Config::default()).unwrap();

        let mut seen = HashSet::new();
        while enumerator.compute_next().unwrap() {
            let unifier = enumerator.take_unifier().unwrap();
            assert!(unifier.solves(&atoms, &goal).unwrap());
            assert!(seen.insert(unifier));
        }

        // Each of A, B, and C is a conjunct of X, of Y, or of both.
        assert_eq!(seen.len(), 27);
        assert_eq!(enumerator.count(), 27);
    }

    #[test]
    fn auxiliary_freedom_is_not_repeated() {
        let mut atoms = AtomDB::default();
        let x = atoms.user_variable("X");
        let y = atoms.user_variable("Y");
        let b = atoms.constant("B");
        let r = atoms.intern_role("r");

        // ∃r.B ⊑ X, and ∃r.Y ⋢ ∃r.B
        let mut builder = GoalBuilder::new(&mut atoms);
        builder
            .add_term_subsumption(&Concept::exists(r, Concept::name(b)), &Concept::name(x))
            .unwrap();
        builder
            .add_term_dissubsumption(
                &Concept::exists(r, Concept::name(y)),
                &Concept::exists(r, Concept::name(b)),
            )
            .unwrap();
        let goal = Rc::new(builder.build(&NoDefinitions).unwrap());
        assert_eq!(goal.variables().len(), 3);

        let mut enumerator = UnifierEnumerator::new(&atoms, goal.clone(), &Config::default()).unwrap();
        let renderer = Renderer::new(&atoms);

        let mut seen = HashSet::new();
        let mut rendered = HashSet::new();
        while enumerator.compute_next().unwrap() {
            let unifier = enumerator.take_unifier().unwrap();
            assert!(unifier.solves(&atoms, &goal).unwrap());
            assert!(rendered.insert(renderer.render_unifier(&unifier).unwrap()));
            assert!(seen.insert(unifier));
        }

        // Y is ⊤ or ∃r.B, and the conjuncts of X are among ∃r.B and ∃r.Y, where ∃r.Y requires Y to be ⊤.
        assert_eq!(seen.len(), 6);
        assert!(rendered.contains("(define-concept X top)\n(define-concept Y top)"));
        assert!(enumerator.diagnostic().is_none());
    }

    #[test]
    fn cleanup_ends_the_enumeration() {
        let mut atoms = AtomDB::default();
        let goal = Rc::new(optional_conjunct(&mut atoms));
        let mut enumerator = UnifierEnumerator::new(&atoms, goal, &Config::default()).unwrap();

        assert_eq!(enumerator.compute_next(), Ok(true));
        enumerator.cleanup();
        enumerator.cleanup();
        assert_eq!(enumerator.state(), EnumeratorState::Exhausted);
        assert_eq!(enumerator.compute_next(), Ok(false));
        assert!(enumerator.diagnostic().is_none());
    }
}

mod failures {
    use super::*;

    #[test]
    fn solver_failures_end_the_enumeration() {
        let mut atoms = AtomDB::default();
        let goal = Rc::new(optional_conjunct(&mut atoms));
        let cleanups = Rc::new(std::cell::Cell::new(0));
        let solver = Box::new(FailingSolver {
            cleanups: cleanups.clone(),
        });

        let mut enumerator =
            UnifierEnumerator::with_solver(&atoms, goal, &Config::default(), solver).unwrap();
        assert_eq!(enumerator.compute_next(), Ok(false));
        assert_eq!(enumerator.state(), EnumeratorState::Exhausted);
        assert_eq!(enumerator.diagnostic(), Some(&SolverError::Interrupted));
        assert_eq!(cleanups.get(), 1);

        drop(enumerator);
        assert_eq!(cleanups.get(), 1);
    }

    #[test]
    fn abandoned_enumerators_release_on_drop() {
        let mut atoms = AtomDB::default();
        let goal = Rc::new(optional_conjunct(&mut atoms));
        let cleanups = Rc::new(std::cell::Cell::new(0));
        let solver = Box::new(FailingSolver {
            cleanups: cleanups.clone(),
        });

        let enumerator =
            UnifierEnumerator::with_solver(&atoms, goal, &Config::default(), solver).unwrap();
        assert_eq!(enumerator.state(), EnumeratorState::Fresh);
        drop(enumerator);
        assert_eq!(cleanups.get(), 1);
    }

    #[test]
    fn unavailable_external_solver() {
        let mut atoms = AtomDB::default();
        let goal = Rc::new(optional_conjunct(&mut atoms));
        let config = Config {
            backend: Backend::External(ExternalCommand::new(
                "a-solver-which-does-not-exist",
                Vec::<String>::new(),
            )),
            ..Default::default()
        };

        let mut enumerator = UnifierEnumerator::new(&atoms, goal, &config).unwrap();
        assert_eq!(enumerator.compute_next(), Ok(false));
        assert!(matches!(
            enumerator.diagnostic(),
            Some(SolverError::Unavailable(_))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn external_unsatisfiable() {
        let mut atoms = AtomDB::default();
        let goal = Rc::new(optional_conjunct(&mut atoms));
        let config = Config {
            backend: Backend::External(ExternalCommand::new(
                "sh",
                ["-c", "cat > /dev/null; echo 's UNSATISFIABLE'"],
            )),
            ..Default::default()
        };

        let mut enumerator = UnifierEnumerator::new(&atoms, goal, &config).unwrap();
        assert_eq!(enumerator.compute_next(), Ok(false));
        assert!(enumerator.diagnostic().is_none());
    }
}

mod minimal {
    use super::*;

    #[test]
    fn smallest_unifier_first() {
        let mut atoms = AtomDB::default();
        let goal = Rc::new(optional_conjunct(&mut atoms));
        let x = atoms.user_variable("X");
        let a = atoms.constant("A");

        let config = Config {
            algorithm: Algorithm::MinimalSat,
            ..Default::default()
        };
        let mut enumerator = UnifierEnumerator::new(&atoms, goal.clone(), &config).unwrap();
        assert!(enumerator.encoding().input().is_weighted());

        assert_eq!(enumerator.compute_next(), Ok(true));
        let first = enumerator.take_unifier().unwrap();
        assert!(first.substitution(x).unwrap().is_empty());

        assert_eq!(enumerator.compute_next(), Ok(true));
        let second = enumerator.take_unifier().unwrap();
        assert_eq!(second.substitution(x), Some(&BTreeSet::from([a])));

        assert_eq!(enumerator.compute_next(), Ok(false));
    }

    #[test]
    fn existential_objective() {
        let mut atoms = AtomDB::default();
        let x = atoms.user_variable("X");
        let a = atoms.constant("A");
        let some_a = atoms.existential("r", a).unwrap();
        let goal = build_goal(&mut atoms, [Equation::new(x, [a, some_a])], &NoDefinitions).unwrap();

        let config = Config {
            algorithm: Algorithm::MinimalSat,
            objective: Objective::Existentials,
            ..Default::default()
        };
        let mut enumerator = UnifierEnumerator::new(&atoms, Rc::new(goal), &config).unwrap();

        // Only Sub(X, ∃r.A) is minimized.
        assert_eq!(enumerator.encoding().input().minimize_literals().len(), 1);
        assert_eq!(enumerator.compute_next(), Ok(true));
        assert_eq!(enumerator.compute_next(), Ok(false));
    }
}

mod sessions {
    use super::*;

    #[test]
    fn handles() {
        let mut atoms = AtomDB::default();
        let goal = Rc::new(optional_conjunct(&mut atoms));

        let mut session = Session::default();
        let first = session.initialize(&atoms, goal.clone(), &Config::default()).unwrap();
        let second = session.initialize(&atoms, goal, &Config::default()).unwrap();
        assert_eq!(session.count(), 2);

        let mut unifiers = Vec::default();
        while session.has_next(first).unwrap() {
            unifiers.push(session.next(first).unwrap());
        }
        assert_eq!(unifiers.len(), 2);
        assert_eq!(
            session.next(first),
            Err(ErrorKind::Enumeration(EnumerationError::NoMoreUnifiers))
        );

        // Enumerators of a session are independent.
        assert_eq!(session.enumerator(second).unwrap().count(), 0);
        assert!(session.next(second).is_ok());
        assert_eq!(session.enumerator(second).unwrap().count(), 1);

        session.cleanup(first).unwrap();
        assert_eq!(
            session.has_next(first),
            Err(ErrorKind::Enumeration(EnumerationError::UnknownHandle))
        );
        assert!(session.enumerator(first).is_err());
        assert_eq!(session.count(), 1);
    }
}
