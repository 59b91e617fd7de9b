use crate::{utils::disp_iter, *};

/// A conditional assignment: when `condition` holds in the pre-action state, `fluent(args)` is
/// set to `value` by the action that carries this effect. Unconditional effects simply have
/// `condition = Formula::tru()`.
#[derive(Debug, Clone)]
pub struct Effect {
    pub condition: Formula,
    pub fluent: FluentId,
    pub args: Vec<Term>,
    pub value: Formula,
}

impl Effect {
    pub fn new(condition: Formula, fluent: FluentId, args: Vec<Term>, value: Formula) -> Self {
        Self {
            condition,
            fluent,
            args,
            value,
        }
    }

    pub fn unconditional(fluent: FluentId, args: Vec<Term>, value: Formula) -> Self {
        Self::new(Formula::tru(), fluent, args, value)
    }

    pub fn assign_true(fluent: FluentId, args: Vec<Term>) -> Self {
        Self::unconditional(fluent, args, Formula::tru())
    }

    pub fn assign_false(fluent: FluentId, args: Vec<Term>) -> Self {
        Self::unconditional(fluent, args, Formula::fal())
    }

    /// The literal this effect asserts when it fires: the fluent positively if `value` is
    /// `true`, negatively if `value` is `false`, or `None` for a non-boolean assignment.
    pub fn asserted_literal(&self) -> Option<(bool, FluentId, &[Term])> {
        match &self.value {
            Formula::Bool(b) => Some((*b, self.fluent, self.args.as_slice())),
            _ => None,
        }
    }

    pub fn atom(&self) -> (FluentId, Vec<Term>) {
        (self.fluent, self.args.clone())
    }
}

impl<'a> std::fmt::Display for crate::env::In<'a, &Effect> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let e = self.elem;
        write!(f, "when {} then {}(", self.env / &e.condition, self.env.fluents.get(e.fluent).name())?;
        disp_iter(f, &e.args, ", ")?;
        write!(f, ") := {}", self.env / &e.value)
    }
}
