//! Per-action, per-constraint rewriting: synthesises the precondition additions and conditional
//! effects that encode each relevant trajectory constraint into the action.

use hashbrown::HashMap;
use tcmodel::*;

use crate::errors::CompileError;
use crate::regress::regress;
use crate::relevancy::RelevancyIndex;

/// Adds `{cond: cond, set: literal}` to `effects` unless `cond` simplifies to `false`.
/// `literal` is a fluent atom (possibly negated) asserted when the effect fires.
fn add_cond_eff(effects: &mut Vec<Effect>, cond: Formula, literal: Formula) {
    let cond = cond.simplify();
    if cond.is_false() {
        return;
    }
    match literal.as_literal() {
        Some((true, id, args)) => effects.push(Effect::new(cond, id, args.to_vec(), Formula::tru())),
        Some((false, id, args)) => effects.push(Effect::new(cond, id, args.to_vec(), Formula::fal())),
        None => unreachable!("monitor assignment literal must be a fluent atom or its negation"),
    }
}

fn monitor_atom(m: FluentId) -> Formula {
    Formula::atom(m)
}

fn manage_always(phi: &Formula, action: &GroundAction) -> Result<Option<Formula>, CompileError> {
    let r = regress(phi, action)?;
    Ok(if &r == phi { None } else { Some(r) })
}

fn manage_amo(
    phi: &Formula,
    m: FluentId,
    action: &GroundAction,
    effects: &mut Vec<Effect>,
) -> Result<Option<Formula>, CompileError> {
    let r = regress(phi, action)?;
    if &r == phi {
        return Ok(None);
    }
    let rho = Formula::or([Formula::not(r.clone()), Formula::not(monitor_atom(m)), phi.clone()]).simplify();
    add_cond_eff(effects, r, monitor_atom(m));
    Ok(Some(rho))
}

fn manage_sometime_before(
    phi: &Formula,
    psi: &Formula,
    m: FluentId,
    action: &GroundAction,
    effects: &mut Vec<Effect>,
) -> Result<Option<Formula>, CompileError> {
    let r_phi = regress(phi, action)?;
    let precondition = if &r_phi == phi {
        None
    } else {
        Some(Formula::or([Formula::not(r_phi), monitor_atom(m)]).simplify())
    };
    let r_psi = regress(psi, action)?;
    if &r_psi != psi {
        add_cond_eff(effects, r_psi, monitor_atom(m));
    }
    Ok(precondition)
}

fn manage_sometime(phi: &Formula, m: FluentId, action: &GroundAction, effects: &mut Vec<Effect>) -> Result<(), CompileError> {
    let r = regress(phi, action)?;
    if &r != phi {
        add_cond_eff(effects, r, monitor_atom(m));
    }
    Ok(())
}

fn manage_sometime_after(
    phi: &Formula,
    psi: &Formula,
    m: FluentId,
    action: &GroundAction,
    effects: &mut Vec<Effect>,
) -> Result<(), CompileError> {
    let r_phi = regress(phi, action)?;
    let r_psi = regress(psi, action)?;
    if &r_phi != phi || &r_psi != psi {
        let cond = Formula::and([r_phi, Formula::not(r_psi.clone())]).simplify();
        add_cond_eff(effects, cond, Formula::not(monitor_atom(m)));
    }
    if &r_psi != psi {
        add_cond_eff(effects, r_psi, monitor_atom(m));
    }
    Ok(())
}

/// Rewrites a single grounded action in place against every constraint relevant to it.
/// Returns `false` if the action's rewritten preconditions contain the literal `false` (it must
/// be pruned from the output problem).
pub fn rewrite_action(
    action: &mut GroundAction,
    constraints: &[TrajectoryConstraint],
    monitors: &HashMap<usize, FluentId>,
    index: &RelevancyIndex,
) -> Result<bool, CompileError> {
    let relevant = index.relevant(action);
    let mut new_preconditions = Vec::new();
    let mut new_effects = Vec::new();

    for idx in relevant {
        let c = &constraints[idx];
        let precondition = match c {
            TrajectoryConstraint::Always(phi) => manage_always(phi, action)?,
            TrajectoryConstraint::AtMostOnce(phi) => {
                let m = monitors[&idx];
                manage_amo(phi, m, action, &mut new_effects)?
            }
            TrajectoryConstraint::SometimeBefore { phi, psi } => {
                let m = monitors[&idx];
                manage_sometime_before(phi, psi, m, action, &mut new_effects)?
            }
            TrajectoryConstraint::Sometime(phi) => {
                let m = monitors[&idx];
                manage_sometime(phi, m, action, &mut new_effects)?;
                None
            }
            TrajectoryConstraint::SometimeAfter { phi, psi } => {
                let m = monitors[&idx];
                manage_sometime_after(phi, psi, m, action, &mut new_effects)?;
                None
            }
        };
        if let Some(p) = precondition
            && !p.is_true()
        {
            new_preconditions.push(p);
        }
    }

    action.preconditions.extend(new_preconditions);
    action.effects.extend(new_effects);
    Ok(!action.is_infeasible())
}
