use crate::*;

/// A lifted (un-grounded) instantaneous action schema, as it appears in the input problem.
/// Preconditions and effects may reference the action's own parameters through [`Term::Var`].
#[derive(Debug, Clone)]
pub struct LiftedAction {
    pub name: Sym,
    pub parameters: Vec<Param>,
    pub preconditions: Vec<Formula>,
    pub effects: Vec<Effect>,
}

impl LiftedAction {
    pub fn new(name: impl Into<Sym>, parameters: Vec<Param>) -> Self {
        Self {
            name: name.into(),
            parameters,
            preconditions: Vec::new(),
            effects: Vec::new(),
        }
    }

    pub fn with_precondition(mut self, cond: Formula) -> Self {
        self.preconditions.push(cond);
        self
    }

    pub fn with_effect(mut self, eff: Effect) -> Self {
        self.effects.push(eff);
        self
    }

    /// Parameter variables free in this action's preconditions and effects, in first-occurrence
    /// order, without duplicates.
    pub fn free_vars(&self) -> Vec<Sym> {
        let mut acc = Vec::new();
        for cond in &self.preconditions {
            for v in cond.free_vars() {
                if !acc.contains(&v) {
                    acc.push(v);
                }
            }
        }
        for eff in &self.effects {
            for t in &eff.args {
                if let Term::Var(v) = t
                    && !acc.contains(v)
                {
                    acc.push(v.clone());
                }
            }
            for v in eff.condition.free_vars().into_iter().chain(eff.value.free_vars()) {
                if !acc.contains(&v) {
                    acc.push(v);
                }
            }
        }
        acc
    }
}

/// A fully-instantiated action: every [`Term`] appearing in its preconditions and effects is a
/// concrete object, so each fluent application behaves as a distinct 0-arity atom.
#[derive(Debug, Clone)]
pub struct GroundAction {
    pub name: Sym,
    pub preconditions: Vec<Formula>,
    pub effects: Vec<Effect>,
}

impl GroundAction {
    pub fn new(name: impl Into<Sym>) -> Self {
        Self {
            name: name.into(),
            preconditions: Vec::new(),
            effects: Vec::new(),
        }
    }

    /// True if some precondition reduces to the literal `false`: such an action can never fire
    /// and is dropped from the compiled problem.
    pub fn is_infeasible(&self) -> bool {
        self.preconditions.iter().any(|p| p.is_false())
    }
}

impl<'a> std::fmt::Display for crate::env::In<'a, &LiftedAction> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let a = self.elem;
        write!(f, "{}(", a.name)?;
        for (i, p) in a.parameters.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{p}")?;
        }
        write!(f, "):\n    pre:")?;
        for p in &a.preconditions {
            write!(f, "\n      {}", self.env / p)?;
        }
        write!(f, "\n    eff:")?;
        for e in &a.effects {
            write!(f, "\n      {}", self.env / e)?;
        }
        Ok(())
    }
}

impl<'a> std::fmt::Display for crate::env::In<'a, &GroundAction> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let a = self.elem;
        write!(f, "{}:\n    pre:", a.name)?;
        for p in &a.preconditions {
            write!(f, "\n      {}", self.env / p)?;
        }
        write!(f, "\n    eff:")?;
        for e in &a.effects {
            write!(f, "\n      {}", self.env / e)?;
        }
        Ok(())
    }
}
