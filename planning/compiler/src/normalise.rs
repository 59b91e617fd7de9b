//! Flattens the problem's trajectory constraints into a flat list of ground constraint atoms,
//! eliminating universal quantification by expansion over the grounded problem's finite object
//! domains.

use hashbrown::HashMap;
use itertools::Itertools;
use tcmodel::*;

use crate::errors::CompileError;

/// Returns `true` if the root of `phi` is an existential quantifier: disallowed inside a
/// trajectory constraint.
fn is_existential(phi: &Formula) -> bool {
    matches!(phi, Formula::Exists(..))
}

fn check_no_existential(constraint: &TrajectoryConstraint) -> Result<(), CompileError> {
    let offending = match constraint {
        TrajectoryConstraint::Always(phi)
        | TrajectoryConstraint::Sometime(phi)
        | TrajectoryConstraint::AtMostOnce(phi) => is_existential(phi),
        TrajectoryConstraint::SometimeBefore { phi, psi } | TrajectoryConstraint::SometimeAfter { phi, psi } => {
            is_existential(phi) || is_existential(psi)
        }
    };
    if offending {
        Err(CompileError::UnsupportedConstraint)
    } else {
        Ok(())
    }
}

/// Expands every quantified constraint over `objects`' finite domains and returns the flat,
/// quantifier-free list of normalised constraint atoms (`C` in the component design).
pub fn normalise(constraints: &[QuantifiedConstraint], objects: &Objects) -> Result<Vec<TrajectoryConstraint>, CompileError> {
    let mut out = Vec::new();
    for qc in constraints {
        if qc.vars.is_empty() {
            check_no_existential(&qc.constraint)?;
            out.push(qc.constraint.clone());
            continue;
        }
        let domains: Vec<Vec<Object>> = qc
            .vars
            .iter()
            .map(|p| match p.tpe() {
                Type::User(tpe, _) => objects.domain_of(tpe),
                _ => Vec::new(),
            })
            .collect();
        for args in domains.into_iter().multi_cartesian_product() {
            let bindings: HashMap<Sym, Object> =
                qc.vars.iter().zip(args.iter()).map(|(p, o)| (p.name.clone(), o.clone())).collect();
            let grounded = qc.constraint.substitute_terms(&bindings);
            check_no_existential(&grounded)?;
            out.push(grounded);
        }
    }
    Ok(out)
}
