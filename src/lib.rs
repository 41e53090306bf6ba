//! A library for computing unifiers of concept descriptions in the description logic EL.
//!
//! Given a collection of equations between concept descriptions, some of whose concept names are marked as variables, a unifier is a substitution for those variables which makes each equation hold (with respect to the semantics of EL).
//! Unifiers are found by reduction to propositional satisfiability: a [goal] is [encoded](crate::encoding) as a [clause set](crate::cnf::SatInput), each model found by a [solver](crate::solver) is [decoded](crate::unifier::decode) to a [unifier](crate::unifier::Unifier), and the model is then blocked so the next solve finds a different unifier.
//!
//! # Orientation
//!
//! The pieces of the library, in the order data flows through them:
//! - The [atom database](crate::db::atom) interns concept and role names, and 'flat' atoms --- concept names and existential restrictions over a concept name.
//! - A [goal] is built from equations over atoms, together with any definitions reachable from those equations.
//! - The [encoder](crate::encoding) translates a goal to clauses over [propositions](crate::encoding::proposition) such as 'this atom is a conjunct of the substitution for this variable'.
//! - A [solver](crate::solver) determines the satisfiability of the clauses, either [in-process](crate::solver::internal) or through some [external](crate::solver::external) program.
//! - An [enumerator](crate::enumerate) drives the solve, decode, block loop.
//! - A [renderer](crate::unifier::render) writes unifiers as concept definitions.
//!
//! # Example
//!
//! ```rust
//! # use otter_uel::config::Config;
//! # use otter_uel::db::atom::AtomDB;
//! # use otter_uel::enumerate::UnifierEnumerator;
//! # use otter_uel::goal::{GoalBuilder, definitions::NoDefinitions};
//! # use otter_uel::structures::equation::Equation;
//! # use otter_uel::unifier::render::Renderer;
//! # use std::rc::Rc;
//! let mut atoms = AtomDB::default();
//! let x = atoms.user_variable("X");
//! let a = atoms.constant("A");
//! let b = atoms.constant("B");
//!
//! let mut builder = GoalBuilder::new(&mut atoms);
//! builder.add_equation(Equation::new(x, [a, b])).unwrap();
//! let goal = Rc::new(builder.build(&NoDefinitions).unwrap());
//!
//! let config = Config::default();
//! let mut enumerator = UnifierEnumerator::new(&atoms, goal, &config).unwrap();
//!
//! assert_eq!(enumerator.compute_next(), Ok(true));
//! let unifier = enumerator.take_unifier().unwrap();
//! let rendered = Renderer::new(&atoms).render_unifier(&unifier).unwrap();
//! assert_eq!(rendered, "(define-concept X (and A B))");
//!
//! assert_eq!(enumerator.compute_next(), Ok(false));
//! ```
//!
//! # Logs
//!
//! Calls to [log!](log) are made throughout, with targets listed in [misc::log].
//! For example, with [env_logger](https://docs.rs/env_logger/latest/env_logger/), logs from the encoder can be seen with `RUST_LOG=encoding …`.

#![allow(clippy::single_match)]
#![allow(clippy::collapsible_else_if)]

pub mod config;
pub mod types;

pub mod generic;
pub mod misc;
pub mod structures;

pub mod db;
pub mod goal;

pub mod cnf;
pub mod encoding;

pub mod solver;

pub mod enumerate;
pub mod unifier;
