use serde::{Deserialize, Serialize};

/// Which unifiers to search for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Algorithm {
    /// Every unifier which corresponds to some model of the encoding.
    Sat,

    /// Each model found minimizes the number of true [objective](Objective) propositions, among the models not yet blocked.
    MinimalSat,
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sat => write!(f, "SAT"),
            Self::MinimalSat => write!(f, "MinimalSAT"),
        }
    }
}

/// The propositions counted when minimizing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Objective {
    /// Every proposition that an atom is a conjunct of the substitution for a variable.
    Conjuncts,

    /// Only those propositions whose atom is an existential restriction.
    Existentials,
}

impl std::fmt::Display for Objective {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Conjuncts => write!(f, "conjuncts"),
            Self::Existentials => write!(f, "existentials"),
        }
    }
}
