use serde::{Deserialize, Serialize};

/// The solver used to find models.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Backend {
    /// The in-process solver.
    Internal,

    /// Some external program, given (W)CNF on stdin.
    External(ExternalCommand),
}

/// A program and its arguments.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl ExternalCommand {
    pub fn new(program: impl Into<String>, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        ExternalCommand {
            program: program.into(),
            args: args.into_iter().map(|arg| arg.into()).collect(),
        }
    }
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Internal => write!(f, "internal"),
            Self::External(command) => write!(f, "{}", command.program),
        }
    }
}
