//! γ-regression: the weakest precondition of a formula with respect to a single grounded
//! action's conditional effects.

use tcmodel::*;

use crate::errors::CompileError;

/// `γ(ℓ, a)`: the formula expressing "action `a` makes literal `ℓ` true".
fn gamma(literal: &Formula, action: &GroundAction) -> Formula {
    let Some((polarity, id, args)) = literal.as_literal() else {
        unreachable!("gamma is only ever called with a literal");
    };
    let mut disjuncts = Vec::new();
    for eff in &action.effects {
        let Some((eff_polarity, eff_id, eff_args)) = eff.asserted_literal() else {
            continue;
        };
        if eff_polarity == polarity && eff_id == id && eff_args == args {
            if eff.condition.is_true() {
                return Formula::tru();
            }
            disjuncts.push(eff.condition.clone());
        }
    }
    if disjuncts.is_empty() {
        Formula::fal()
    } else {
        Formula::or(disjuncts)
    }
}

/// `γ-sub(ℓ, a) := γ(ℓ, a) ∨ (ℓ ∧ ¬γ(¬ℓ, a))`.
fn gamma_substitution(literal: &Formula, action: &GroundAction) -> Formula {
    let negated = Formula::not(literal.clone());
    let gamma1 = gamma(literal, action);
    let gamma2 = Formula::not(gamma(&negated, action));
    let conjunction = Formula::and([literal.clone(), gamma2]);
    Formula::or([gamma1, conjunction])
}

/// Computes the formula that must hold before `action` fires for `phi` to hold afterwards.
/// Every returned sub-formula is simplified, so structural equality against the original is a
/// meaningful "this action leaves `phi` unaffected" test.
pub fn regress(phi: &Formula, action: &GroundAction) -> Result<Formula, CompileError> {
    let r = match phi {
        Formula::Bool(_) => phi.clone(),
        Formula::Fluent(..) => gamma_substitution(phi, action),
        Formula::Not(inner) => Formula::not(regress(inner, action)?),
        Formula::And(args) => Formula::and(args.iter().map(|a| regress(a, action)).collect::<Result<Vec<_>, _>>()?),
        Formula::Or(args) => Formula::or(args.iter().map(|a| regress(a, action)).collect::<Result<Vec<_>, _>>()?),
        Formula::Forall(..) | Formula::Exists(..) => {
            return Err(CompileError::UnsupportedFormula(format!("{phi:?}")));
        }
    };
    Ok(r.simplify())
}
