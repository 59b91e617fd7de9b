use thiserror::Error;

/// A compilation kind requested of [`crate::compile`]. Other kinds (grounding, up-casting, ...)
/// exist in the wider compiler ecosystem this crate plugs into but are not implemented here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompilationKind {
    TrajectoryConstraintsRemoving,
    Other,
}

/// The distinguished reason an `always` or `sometime-before` constraint can never be satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationKind {
    Always,
    SometimeBefore,
}

impl std::fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ViolationKind::Always => write!(f, "always"),
            ViolationKind::SometimeBefore => write!(f, "sometime-before"),
        }
    }
}

/// Every way `compile` can fail. All variants are fatal: the call aborts with no partial result.
#[derive(Error, Debug)]
pub enum CompileError {
    #[error("unsupported compilation kind: only TRAJECTORY_CONSTRAINTS_REMOVING is supported")]
    UnsupportedCompilationKind,
    #[error("trajectory constraint uses an existential quantifier, which is not supported")]
    UnsupportedConstraint,
    #[error("regression encountered a formula shape it cannot handle: {0}")]
    UnsupportedFormula(String),
    #[error("problem is unsatisfiable: {0} is violated in the initial state")]
    InitialStateViolation(ViolationKind),
    #[error("grounding failed: {0}")]
    GroundingFailed(#[from] tcmodel::GroundingError),
}
