/*!
Configuration of unification.

All configuration is contained within [Config], which is read when a [goal](crate::goal) is built, when a goal is [encoded](crate::encoding), and when a [solver](crate::solver) is made.
Default values are collected in [defaults].

A configuration may be (de)serialized with [serde], e.g. to keep the settings of a run alongside its results.
*/

use serde::{Deserialize, Serialize};

pub mod defaults;

mod algorithm;
pub use algorithm::{Algorithm, Objective};

mod backend;
pub use backend::{Backend, ExternalCommand};

/// Representation for the probability of choosing `true` when deciding on a proposition.
pub type PolarityLean = f64;

/// The primary configuration structure.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Whether to ask for any unifier, or for unifiers minimal with respect to [objective](Config::objective).
    pub algorithm: Algorithm,

    /// The propositions to minimize, when the algorithm is [MinimalSat](Algorithm::MinimalSat).
    pub objective: Objective,

    /// A concept name to be read as the top concept, if any.
    pub top_alias: Option<String>,

    /// The solver used to find models.
    pub backend: Backend,

    /// The weight of hard clauses in weighted output.
    /// If not set, one more than the number of soft clauses is used.
    pub hard_weight: Option<u64>,

    /// Configuration of the in-process solver.
    pub internal: InternalConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            algorithm: defaults::ALGORITHM,
            objective: defaults::OBJECTIVE,
            top_alias: None,
            backend: Backend::Internal,
            hard_weight: None,
            internal: InternalConfig::default(),
        }
    }
}

/// Configuration of the [internal solver](crate::solver::internal).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InternalConfig {
    /// The probability of assigning positive polarity to a proposition when freely deciding on the proposition.
    ///
    /// Propositions to be minimized are always first decided negatively.
    pub polarity_lean: PolarityLean,

    /// The time limit for a solve.
    pub time_limit: Option<std::time::Duration>,

    /// The seed of the source of randomness.
    pub rng_seed: u64,
}

impl Default for InternalConfig {
    fn default() -> Self {
        InternalConfig {
            polarity_lean: defaults::POLARITY_LEAN,
            time_limit: None,
            rng_seed: defaults::RNG_SEED,
        }
    }
}
