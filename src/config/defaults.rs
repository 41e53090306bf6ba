//! Default values of [configuration](crate::config) options.

use super::{Algorithm, Objective, PolarityLean};

/// Any unifier.
pub const ALGORITHM: Algorithm = Algorithm::Sat;

/// All substitution propositions.
pub const OBJECTIVE: Objective = Objective::Conjuncts;

/// Always decide `false` first, which favours small substitutions.
pub const POLARITY_LEAN: PolarityLean = 0.0;

pub const RNG_SEED: u64 = 0;
