use otter_uel::{
    cnf::SatInput,
    config::{Config, ExternalCommand, InternalConfig},
    solver::{
        self,
        external::ExternalSolver,
        internal::{Context, InternalSolver},
        report::Report,
        SatOutcome, SatSolver,
    },
    types::err::{ErrorKind, SolverError},
};

fn input_of(clauses: &[&[i32]]) -> SatInput {
    let mut input = SatInput::default();
    for clause in clauses {
        input.add_clause(clause.iter().copied()).unwrap();
    }
    input
}

mod internal {
    use super::*;

    #[test]
    fn one_literal() {
        let mut the_context = Context::from_config(&InternalConfig::default());
        assert!(the_context.add_clause([1]).is_ok());
        assert_eq!(the_context.solve(), Ok(Report::Satisfiable));
        assert_eq!(the_context.value_of(1), Some(true));
    }

    #[test]
    fn conflict() {
        let mut the_context = Context::from_config(&InternalConfig::default());
        assert!(the_context.add_clause([1, 2]).is_ok());
        assert!(the_context.add_clause([-1, -2]).is_ok());
        assert!(the_context.add_clause([1, -2]).is_ok());
        assert!(the_context.add_clause([-1, 2]).is_ok());
        assert_eq!(the_context.solve(), Ok(Report::Unsatisfiable));
    }

    #[test]
    fn updates_block_models() {
        let mut solver = InternalSolver::from_config(&Config::default());
        let input = input_of(&[&[1, 2, 3]]);

        let mut models = Vec::default();
        let mut outcome = solver.solve(&input).unwrap();
        while let SatOutcome::Satisfiable(model) = outcome {
            let blocking = (1..=3)
                .map(|id| match model.contains(&id) {
                    true => -(id as i32),
                    false => id as i32,
                })
                .collect::<Vec<_>>();
            assert!(!models.contains(&model));
            models.push(model);
            outcome = solver.update(&blocking).unwrap();
        }
        assert_eq!(models.len(), 7);
    }

    #[test]
    fn minimal_models() {
        let mut input = input_of(&[&[1, 2], &[1, 3], &[1, 4], &[2]]);
        for id in 1..=4 {
            input.add_minimize_literal(id).unwrap();
        }

        let mut solver = solver::from_config(&Config::default());
        assert_eq!(
            solver.solve(&input),
            Ok(SatOutcome::Satisfiable([1, 2].into()))
        );
    }

    #[test]
    fn minimal_models_after_update() {
        let mut input = input_of(&[&[1, 2], &[1, 3]]);
        for id in 1..=3 {
            input.add_minimize_literal(id).unwrap();
        }

        let mut solver = InternalSolver::from_config(&Config::default());
        assert_eq!(
            solver.solve(&input),
            Ok(SatOutcome::Satisfiable([1].into()))
        );
        assert_eq!(
            solver.update(&[-1]),
            Ok(SatOutcome::Satisfiable([2, 3].into()))
        );
        assert_eq!(solver.context().cost(), Some(2));
    }

    #[test]
    fn released_solvers_refuse_updates() {
        let mut solver = InternalSolver::from_config(&Config::default());
        solver.solve(&input_of(&[&[1]])).unwrap();
        solver.cleanup();
        solver.cleanup();
        assert_eq!(
            solver.update(&[2]),
            Err(ErrorKind::Solver(SolverError::Released))
        );
    }
}

#[cfg(unix)]
mod external {
    use super::*;

    /// A solver which answers from the header line of its input.
    fn header_solver() -> ExternalSolver {
        let script = r#"read header
case "$header" in
  "p cnf 2 1") echo "s SATISFIABLE"; echo "v -1 2 0" ;;
  "p wcnf"*) echo "o 1"; echo "s OPTIMUM FOUND"; echo "v 01" ;;
  *) echo "s UNSATISFIABLE" ;;
esac"#;
        ExternalSolver::new(ExternalCommand::new("sh", ["-c", script]), None)
    }

    #[test]
    fn cnf_input() {
        let mut solver = header_solver();
        assert_eq!(
            solver.solve(&input_of(&[&[1, 2]])),
            Ok(SatOutcome::Satisfiable([2].into()))
        );
        // The update extends the clause set, and so the header changes.
        assert_eq!(solver.update(&[-2]), Ok(SatOutcome::Unsatisfiable));
    }

    #[test]
    fn wcnf_input() {
        let mut input = input_of(&[&[1, 2]]);
        input.add_minimize_literal(1).unwrap();

        let mut solver = header_solver();
        assert_eq!(
            solver.solve(&input),
            Ok(SatOutcome::Satisfiable([2].into()))
        );
    }

    #[test]
    fn exit_codes_are_not_read() {
        let script = "cat > /dev/null; echo UNSAT; exit 20";
        let mut solver = ExternalSolver::new(ExternalCommand::new("sh", ["-c", script]), None);
        assert_eq!(
            solver.solve(&input_of(&[&[1]])),
            Ok(SatOutcome::Unsatisfiable)
        );
    }

    #[test]
    fn output_before_input_is_read() {
        // Each of the output and the input is larger than a pipe buffer.
        let script = "yes 'c waiting' | head -n 50000; cat > /dev/null; echo UNSAT";
        let mut solver = ExternalSolver::new(ExternalCommand::new("sh", ["-c", script]), None);

        let mut input = SatInput::default();
        for id in 1..20_000 {
            input.add_clause([id, -(id + 1)]).unwrap();
        }
        assert_eq!(solver.solve(&input), Ok(SatOutcome::Unsatisfiable));
    }

    #[test]
    fn unknown_status() {
        let script = "cat > /dev/null; echo 's UNKNOWN'";
        let mut solver = ExternalSolver::new(ExternalCommand::new("sh", ["-c", script]), None);
        assert_eq!(
            solver.solve(&input_of(&[&[1]])),
            Err(ErrorKind::Solver(SolverError::Interrupted))
        );
    }

    #[test]
    fn released_solvers_refuse_input() {
        let mut solver = header_solver();
        solver.cleanup();
        assert_eq!(
            solver.solve(&input_of(&[&[1]])),
            Err(ErrorKind::Solver(SolverError::Released))
        );
    }
}
