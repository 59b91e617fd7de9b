use std::fmt::{Debug, Display};
use std::rc::Rc;

use crate::{env::In, utils::disp_iter, *};

/// An argument to a (possibly lifted) fluent application: either a concrete object or a
/// reference to a formal parameter, resolved once the surrounding action/quantifier is grounded.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Term {
    Obj(Object),
    Var(Sym),
}

impl Term {
    pub fn is_ground(&self) -> bool {
        matches!(self, Term::Obj(_))
    }
}

impl Display for Term {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Term::Obj(o) => write!(f, "{o}"),
            Term::Var(v) => write!(f, "?{v}"),
        }
    }
}

/// A logical formula over boolean fluent applications.
///
/// `Formula`s are immutable; every transformation (`simplify`, `substitute_terms`,
/// `substitute_truth`) returns a new value. Equality is structural, so it is only meaningful
/// as an "identical after simplification" test, not full logical equivalence.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Formula {
    Bool(bool),
    Fluent(FluentId, Vec<Term>),
    Not(Rc<Formula>),
    And(Vec<Formula>),
    Or(Vec<Formula>),
    Forall(Param, Rc<Formula>),
    Exists(Param, Rc<Formula>),
}

impl Formula {
    pub fn tru() -> Formula {
        Formula::Bool(true)
    }
    pub fn fal() -> Formula {
        Formula::Bool(false)
    }
    pub fn fluent(id: FluentId, args: Vec<Term>) -> Formula {
        Formula::Fluent(id, args)
    }
    pub fn atom(id: FluentId) -> Formula {
        Formula::Fluent(id, Vec::new())
    }
    #[allow(clippy::should_implement_trait)]
    pub fn not(f: Formula) -> Formula {
        Formula::Not(Rc::new(f))
    }
    pub fn and(fs: impl IntoIterator<Item = Formula>) -> Formula {
        Formula::And(fs.into_iter().collect())
    }
    pub fn or(fs: impl IntoIterator<Item = Formula>) -> Formula {
        Formula::Or(fs.into_iter().collect())
    }

    pub fn is_true(&self) -> bool {
        matches!(self, Formula::Bool(true))
    }
    pub fn is_false(&self) -> bool {
        matches!(self, Formula::Bool(false))
    }

    /// If this formula is a literal (a fluent application or its negation), returns the
    /// polarity (`true` for a positive literal) and the underlying atom.
    pub fn as_literal(&self) -> Option<(bool, FluentId, &[Term])> {
        match self {
            Formula::Fluent(id, args) => Some((true, *id, args.as_slice())),
            Formula::Not(inner) => match inner.as_ref() {
                Formula::Fluent(id, args) => Some((false, *id, args.as_slice())),
                _ => None,
            },
            _ => None,
        }
    }

    /// Structural simplification: flattens nested conjunctions/disjunctions, folds constants,
    /// cancels double negation and drops duplicate conjuncts/disjuncts. Does not eliminate
    /// quantifiers; see the normaliser for that.
    pub fn simplify(&self) -> Formula {
        match self {
            Formula::Bool(_) | Formula::Fluent(..) => self.clone(),
            Formula::Not(inner) => match inner.simplify() {
                Formula::Bool(b) => Formula::Bool(!b),
                Formula::Not(doubly) => (*doubly).clone(),
                other => Formula::not(other),
            },
            Formula::And(args) => {
                let mut flat: Vec<Formula> = Vec::with_capacity(args.len());
                for a in args {
                    match a.simplify() {
                        Formula::Bool(true) => {}
                        Formula::Bool(false) => return Formula::fal(),
                        Formula::And(inner) => {
                            for f in inner {
                                if !flat.contains(&f) {
                                    flat.push(f);
                                }
                            }
                        }
                        other => {
                            if !flat.contains(&other) {
                                flat.push(other);
                            }
                        }
                    }
                }
                match flat.len() {
                    0 => Formula::tru(),
                    1 => flat.into_iter().next().unwrap(),
                    _ => Formula::And(flat),
                }
            }
            Formula::Or(args) => {
                let mut flat: Vec<Formula> = Vec::with_capacity(args.len());
                for a in args {
                    match a.simplify() {
                        Formula::Bool(false) => {}
                        Formula::Bool(true) => return Formula::tru(),
                        Formula::Or(inner) => {
                            for f in inner {
                                if !flat.contains(&f) {
                                    flat.push(f);
                                }
                            }
                        }
                        other => {
                            if !flat.contains(&other) {
                                flat.push(other);
                            }
                        }
                    }
                }
                match flat.len() {
                    0 => Formula::fal(),
                    1 => flat.into_iter().next().unwrap(),
                    _ => Formula::Or(flat),
                }
            }
            Formula::Forall(p, body) => Formula::Forall(p.clone(), Rc::new(body.simplify())),
            Formula::Exists(p, body) => Formula::Exists(p.clone(), Rc::new(body.simplify())),
        }
    }

    /// Ground atoms (fluent applications) free in this formula, in first-occurrence order,
    /// without duplicates. Meaningful once quantifiers have been eliminated.
    pub fn free_atoms(&self) -> Vec<(FluentId, Vec<Term>)> {
        let mut acc = Vec::new();
        self.collect_atoms(&mut acc);
        acc
    }

    fn collect_atoms(&self, acc: &mut Vec<(FluentId, Vec<Term>)>) {
        match self {
            Formula::Bool(_) => {}
            Formula::Fluent(id, args) => {
                let key = (*id, args.clone());
                if !acc.contains(&key) {
                    acc.push(key);
                }
            }
            Formula::Not(inner) => inner.collect_atoms(acc),
            Formula::And(args) | Formula::Or(args) => {
                for a in args {
                    a.collect_atoms(acc);
                }
            }
            Formula::Forall(_, body) | Formula::Exists(_, body) => body.collect_atoms(acc),
        }
    }

    /// Parameter variables free in this formula (i.e. not bound by an enclosing quantifier), in
    /// first-occurrence order, without duplicates.
    pub fn free_vars(&self) -> Vec<Sym> {
        let mut acc = Vec::new();
        self.collect_vars(&mut acc);
        acc
    }

    fn collect_vars(&self, acc: &mut Vec<Sym>) {
        match self {
            Formula::Bool(_) => {}
            Formula::Fluent(_, args) => {
                for t in args {
                    if let Term::Var(v) = t
                        && !acc.contains(v)
                    {
                        acc.push(v.clone());
                    }
                }
            }
            Formula::Not(inner) => inner.collect_vars(acc),
            Formula::And(args) | Formula::Or(args) => {
                for a in args {
                    a.collect_vars(acc);
                }
            }
            Formula::Forall(p, body) | Formula::Exists(p, body) => {
                let mut inner = Vec::new();
                body.collect_vars(&mut inner);
                for v in inner {
                    if v != *p.name() && !acc.contains(&v) {
                        acc.push(v);
                    }
                }
            }
        }
    }

    /// Replaces parameter references with concrete objects: used both to ground an action's
    /// formulas and to instantiate a quantified sub-formula over one domain element.
    pub fn substitute_terms(&self, bindings: &hashbrown::HashMap<Sym, Object>) -> Formula {
        match self {
            Formula::Bool(b) => Formula::Bool(*b),
            Formula::Fluent(id, args) => Formula::Fluent(
                *id,
                args.iter()
                    .map(|t| match t {
                        Term::Var(v) => bindings.get(v).cloned().map(Term::Obj).unwrap_or_else(|| t.clone()),
                        Term::Obj(_) => t.clone(),
                    })
                    .collect(),
            ),
            Formula::Not(inner) => Formula::not(inner.substitute_terms(bindings)),
            Formula::And(args) => Formula::And(args.iter().map(|a| a.substitute_terms(bindings)).collect()),
            Formula::Or(args) => Formula::Or(args.iter().map(|a| a.substitute_terms(bindings)).collect()),
            Formula::Forall(p, body) => Formula::Forall(p.clone(), Rc::new(body.substitute_terms(bindings))),
            Formula::Exists(p, body) => Formula::Exists(p.clone(), Rc::new(body.substitute_terms(bindings))),
        }
    }

    /// Evaluates ground fluent atoms against a truth assignment (e.g. the initial state),
    /// leaving unassigned atoms untouched. Callers typically `simplify` the result immediately.
    pub fn substitute_truth(&self, assignment: &hashbrown::HashMap<(FluentId, Vec<Term>), bool>) -> Formula {
        match self {
            Formula::Bool(b) => Formula::Bool(*b),
            Formula::Fluent(id, args) => {
                let key = (*id, args.clone());
                match assignment.get(&key) {
                    Some(v) => Formula::Bool(*v),
                    None => self.clone(),
                }
            }
            Formula::Not(inner) => Formula::not(inner.substitute_truth(assignment)),
            Formula::And(args) => Formula::And(args.iter().map(|a| a.substitute_truth(assignment)).collect()),
            Formula::Or(args) => Formula::Or(args.iter().map(|a| a.substitute_truth(assignment)).collect()),
            // trajectory constraints are quantifier-free by the time initial values are evaluated
            Formula::Forall(..) | Formula::Exists(..) => self.clone(),
        }
    }

    /// Splits a top-level conjunction into its conjuncts; a non-conjunction is a singleton list.
    pub fn into_conjuncts(self) -> Vec<Formula> {
        match self {
            Formula::And(args) => args,
            other => vec![other],
        }
    }
}


impl<'a> Display for In<'a, &Formula> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.elem {
            Formula::Bool(b) => write!(f, "{b}"),
            Formula::Fluent(id, args) => {
                write!(f, "{}(", self.env.fluents.get(*id).name())?;
                disp_iter(f, args, ", ")?;
                write!(f, ")")
            }
            Formula::Not(inner) => write!(f, "(not {})", self.env / inner.as_ref()),
            Formula::And(args) => {
                write!(f, "(and")?;
                for a in args {
                    write!(f, " {}", self.env / a)?;
                }
                write!(f, ")")
            }
            Formula::Or(args) => {
                write!(f, "(or")?;
                for a in args {
                    write!(f, " {}", self.env / a)?;
                }
                write!(f, ")")
            }
            Formula::Forall(p, body) => write!(f, "(forall ({p}) {})", self.env / body.as_ref()),
            Formula::Exists(p, body) => write!(f, "(exists ({p}) {})", self.env / body.as_ref()),
        }
    }
}
