//! Generic structures, not specific to unification.

pub mod minimal_pcg;
