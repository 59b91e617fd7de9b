use crate::env::In;
use crate::*;

/// A trajectory constraint: a temporal-modal assertion over the sequence of states a plan
/// visits, as opposed to a plain goal (a condition required only in the final state).
#[derive(Clone, Debug)]
pub enum TrajectoryConstraint {
    /// `phi` must hold in every state of the trajectory.
    Always(Formula),
    /// `phi` must hold in at least one state.
    Sometime(Formula),
    /// `phi`'s truth spans a single contiguous interval: once false, it may never become
    /// true again.
    AtMostOnce(Formula),
    /// If `phi` ever becomes true, `psi` must have been true in some strictly earlier state.
    SometimeBefore { phi: Formula, psi: Formula },
    /// Whenever `phi` holds, `psi` must hold in that state or some later one.
    SometimeAfter { phi: Formula, psi: Formula },
}

impl TrajectoryConstraint {
    pub fn is_always(&self) -> bool {
        matches!(self, TrajectoryConstraint::Always(_))
    }
    pub fn is_sometime(&self) -> bool {
        matches!(self, TrajectoryConstraint::Sometime(_))
    }
    pub fn is_at_most_once(&self) -> bool {
        matches!(self, TrajectoryConstraint::AtMostOnce(_))
    }
    pub fn is_sometime_before(&self) -> bool {
        matches!(self, TrajectoryConstraint::SometimeBefore { .. })
    }
    pub fn is_sometime_after(&self) -> bool {
        matches!(self, TrajectoryConstraint::SometimeAfter { .. })
    }

    /// A landmark constraint requires its monitoring atom to be asserted by the final state.
    pub fn is_landmark(&self) -> bool {
        self.is_sometime() || self.is_sometime_after()
    }

    /// Replaces every [`Term::Var`] reference with the object bound to it. Used to eliminate the
    /// universal quantification that wraps a constraint in the input problem.
    pub fn substitute_terms(&self, bindings: &hashbrown::HashMap<Sym, Object>) -> TrajectoryConstraint {
        match self {
            TrajectoryConstraint::Always(phi) => TrajectoryConstraint::Always(phi.substitute_terms(bindings)),
            TrajectoryConstraint::Sometime(phi) => TrajectoryConstraint::Sometime(phi.substitute_terms(bindings)),
            TrajectoryConstraint::AtMostOnce(phi) => TrajectoryConstraint::AtMostOnce(phi.substitute_terms(bindings)),
            TrajectoryConstraint::SometimeBefore { phi, psi } => TrajectoryConstraint::SometimeBefore {
                phi: phi.substitute_terms(bindings),
                psi: psi.substitute_terms(bindings),
            },
            TrajectoryConstraint::SometimeAfter { phi, psi } => TrajectoryConstraint::SometimeAfter {
                phi: phi.substitute_terms(bindings),
                psi: psi.substitute_terms(bindings),
            },
        }
    }
}

/// A trajectory constraint universally quantified over a list of parameters, as it appears in
/// the input problem (e.g. PDDL's `(forall (?x - loc) (always (at ?x)))`). An empty `vars` is
/// the common case of an unquantified constraint.
#[derive(Clone, Debug)]
pub struct QuantifiedConstraint {
    pub vars: Vec<Param>,
    pub constraint: TrajectoryConstraint,
}

impl QuantifiedConstraint {
    pub fn new(constraint: TrajectoryConstraint) -> Self {
        Self { vars: Vec::new(), constraint }
    }

    pub fn forall(vars: Vec<Param>, constraint: TrajectoryConstraint) -> Self {
        Self { vars, constraint }
    }
}

impl<'a> std::fmt::Display for In<'a, &QuantifiedConstraint> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if !self.elem.vars.is_empty() {
            write!(f, "forall (")?;
            for (i, v) in self.elem.vars.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{v}")?;
            }
            write!(f, ") ")?;
        }
        write!(f, "{}", self.env / &self.elem.constraint)
    }
}

impl<'a> std::fmt::Display for In<'a, &TrajectoryConstraint> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.elem {
            TrajectoryConstraint::Always(phi) => write!(f, "always({})", self.env / phi),
            TrajectoryConstraint::Sometime(phi) => write!(f, "sometime({})", self.env / phi),
            TrajectoryConstraint::AtMostOnce(phi) => write!(f, "at-most-once({})", self.env / phi),
            TrajectoryConstraint::SometimeBefore { phi, psi } => {
                write!(f, "sometime-before({}, {})", self.env / phi, self.env / psi)
            }
            TrajectoryConstraint::SometimeAfter { phi, psi } => {
                write!(f, "sometime-after({}, {})", self.env / phi, self.env / psi)
            }
        }
    }
}
