//! Structures used throughout the library.
//!
//! Two families of structure are present:
//! - Those of the description logic: [atoms](atom), [concept terms](concept), and [equations](equation).
//! - Those of propositional logic: [literals](literal), [clauses](clause), and [valuations](valuation).
//!
//! The two are bridged by the [encoder](crate::encoding).

pub mod atom;
pub mod concept;
pub mod equation;

pub mod clause;
pub mod literal;
pub mod valuation;
