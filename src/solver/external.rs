/*!
A solver in some other process.

For each solve the configured program is started, the clause set is written to its stdin --- as DIMACS CNF, or as WCNF if there are literals to minimize --- and the output of the program is read from its stdout.
An update adds the clause to the clauses of the last solve, and solves again.

Output is read line by line.
Two forms are understood:
- A status line `SAT` or `UNSAT`, with the model on a following line as a list of non-zero literals (optionally terminated by `0`).
- The form of SAT (and MaxSAT) competitions, with status lines `s SATISFIABLE`, `s OPTIMUM FOUND`, or `s UNSATISFIABLE`, and the model on lines `v …`, terminated by `0`.
  A model may also be given as a single string of `0`s and `1`s, where the character at index *i* is the value of proposition *i + 1*.

Comment lines, starting `c`, MaxSAT cost lines, starting `o`, and any other line before a status line are ignored.
As solvers commonly exit with codes `10` and `20`, the exit code of the program is not read, though a program stopped by a signal is an interrupted solve.

```rust
# use otter_uel::solver::{external::parse_output, SatOutcome};
let output = "c some comment\ns SATISFIABLE\nv -1 2 -3\nv 4 0\n";
assert_eq!(parse_output(output), Ok(SatOutcome::Satisfiable([2, 4].into())));

assert_eq!(parse_output("UNSAT\n"), Ok(SatOutcome::Unsatisfiable));
```
*/

use std::{
    io::Write,
    process::{Command, Stdio},
    thread,
};

use crate::{
    cnf::SatInput,
    config::ExternalCommand,
    misc::log::targets::{self},
    solver::{Model, SatOutcome, SatSolver},
    structures::literal::{CLiteral, LiteralId},
    types::err::{self},
};

pub struct ExternalSolver {
    command: ExternalCommand,

    /// The weight of hard clauses, if configured.
    hard_weight: Option<u64>,

    /// The clauses of the last solve, extended by any updates.
    input: SatInput,

    released: bool,
}

impl ExternalSolver {
    pub fn new(command: ExternalCommand, hard_weight: Option<u64>) -> Self {
        ExternalSolver {
            command,
            hard_weight,
            input: SatInput::default(),
            released: false,
        }
    }

    /// The clause set as given to the program.
    fn rendered_input(&self) -> String {
        match self.input.is_weighted() {
            true => {
                let weight = self
                    .hard_weight
                    .unwrap_or_else(|| self.input.default_hard_weight());
                self.input.to_wcnf(weight)
            }
            false => self.input.to_cnf(),
        }
    }

    fn run(&mut self) -> Result<SatOutcome, err::ErrorKind> {
        let rendered = self.rendered_input();
        log::debug!(target: targets::SOLVER,
            "Running {} on {} clauses",
            self.command.program,
            self.input.clause_count());

        let mut child = Command::new(&self.command.program)
            .args(&self.command.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| err::SolverError::Unavailable(format!("{}: {e}", self.command.program)))?;

        // The program may write output before reading all of its input.
        let writer = child.stdin.take().map(|mut stdin| {
            let program = self.command.program.clone();
            thread::spawn(move || {
                // A program may exit before reading its input, e.g. on a trivial formula.
                if let Err(e) = stdin.write_all(rendered.as_bytes()) {
                    log::debug!(target: targets::SOLVER, "Writing to {program} failed: {e}");
                }
            })
        });

        let output = child.wait_with_output();
        if let Some(writer) = writer {
            if writer.join().is_err() {
                log::warn!(target: targets::SOLVER, "Writer to {} panicked", self.command.program);
            }
        }
        let output = output.map_err(|e| err::SolverError::Unavailable(e.to_string()))?;

        if output.status.code().is_none() {
            return Err(err::SolverError::Interrupted.into());
        }

        let outcome = parse_output(&String::from_utf8_lossy(&output.stdout))?;
        log::info!(target: targets::SOLVER, "{} reports {}", self.command.program, match outcome {
            SatOutcome::Satisfiable(_) => "SAT",
            SatOutcome::Unsatisfiable => "UNSAT",
        });
        Ok(outcome)
    }
}

impl SatSolver for ExternalSolver {
    fn solve(&mut self, input: &SatInput) -> Result<SatOutcome, err::ErrorKind> {
        if self.released {
            return Err(err::SolverError::Released.into());
        }
        self.input = input.clone();
        self.run()
    }

    fn update(&mut self, clause: &[CLiteral]) -> Result<SatOutcome, err::ErrorKind> {
        if self.released {
            return Err(err::SolverError::Released.into());
        }
        self.input.add_clause(clause.iter().copied())?;
        self.run()
    }

    fn cleanup(&mut self) {
        if !self.released {
            log::debug!(target: targets::SOLVER, "External solver released");
            self.input.clear();
            self.released = true;
        }
    }
}

/// Reads the outcome of a solve from the output of a solver.
pub fn parse_output(output: &str) -> Result<SatOutcome, err::SolverError> {
    let mut status = None;
    let mut model = Model::default();

    for line in output.lines() {
        let line = line.trim();
        match line {
            "" => {}

            "SAT" | "s SATISFIABLE" | "s OPTIMUM FOUND" => status = Some(true),

            "UNSAT" | "s UNSATISFIABLE" => status = Some(false),

            "s UNKNOWN" | "UNKNOWN" => return Err(err::SolverError::Interrupted),

            _ if line.starts_with('c') || line.starts_with('o') => {}

            _ if status == Some(true) => {
                let values = line.strip_prefix("v ").unwrap_or(line);
                if line.starts_with("v ") && is_binary_model(values) {
                    for (index, value) in values.chars().enumerate() {
                        if value == '1' {
                            model.insert(index as LiteralId + 1);
                        }
                    }
                    continue;
                }
                for token in values.split_whitespace() {
                    let literal: CLiteral = token
                        .parse()
                        .map_err(|_| err::SolverError::UnexpectedOutput(line.to_string()))?;
                    match literal {
                        0 => break,
                        positive if positive > 0 => {
                            model.insert(positive.unsigned_abs());
                        }
                        _ => {}
                    }
                }
            }

            _ => log::trace!(target: targets::SOLVER, "Ignored output: {line}"),
        }
    }

    match status {
        Some(true) => Ok(SatOutcome::Satisfiable(model)),
        Some(false) => Ok(SatOutcome::Unsatisfiable),
        None => Err(err::SolverError::UnexpectedOutput(String::default())),
    }
}

/// True if the values of a `v` line are a single string of `0`s and `1`s, as in recent MaxSAT evaluations.
///
/// A string of length one is read as a literal.
fn is_binary_model(values: &str) -> bool {
    values.len() > 1 && values.chars().all(|value| value == '0' || value == '1')
}

#[cfg(test)]
mod external_tests {
    use super::*;

    #[test]
    fn plain_forms() {
        assert_eq!(
            parse_output("SAT\n1 -2 3\n"),
            Ok(SatOutcome::Satisfiable([1, 3].into()))
        );
        assert_eq!(
            parse_output("SAT\n1 -2 3 0\n"),
            Ok(SatOutcome::Satisfiable([1, 3].into()))
        );
        assert_eq!(parse_output("UNSAT"), Ok(SatOutcome::Unsatisfiable));
    }

    #[test]
    fn competition_forms() {
        let maxsat = "c MaxSAT\no 2\ns OPTIMUM FOUND\nv 1 -2 0\n";
        assert_eq!(
            parse_output(maxsat),
            Ok(SatOutcome::Satisfiable([1].into()))
        );
        assert_eq!(
            parse_output("s OPTIMUM FOUND\nv 0110\n"),
            Ok(SatOutcome::Satisfiable([2, 3].into()))
        );
        assert_eq!(
            parse_output("s UNSATISFIABLE\n"),
            Ok(SatOutcome::Unsatisfiable)
        );
        assert_eq!(
            parse_output("s UNKNOWN\n"),
            Err(err::SolverError::Interrupted)
        );
    }

    #[test]
    fn unexpected_output() {
        assert_eq!(
            parse_output(""),
            Err(err::SolverError::UnexpectedOutput(String::default()))
        );
        assert_eq!(
            parse_output("SAT\n1 x 0\n"),
            Err(err::SolverError::UnexpectedOutput("1 x 0".to_string()))
        );
        assert_eq!(
            parse_output("maybe\n"),
            Err(err::SolverError::UnexpectedOutput(String::default()))
        );
    }

    #[test]
    fn missing_program() {
        let mut solver = ExternalSolver::new(
            ExternalCommand::new("a-program-which-does-not-exist", Vec::<String>::new()),
            None,
        );
        let mut input = SatInput::default();
        input.add_clause([1]).unwrap();
        assert!(matches!(
            solver.solve(&input),
            Err(err::ErrorKind::Solver(err::SolverError::Unavailable(_)))
        ));
    }
}
