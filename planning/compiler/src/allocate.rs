//! Allocates a fresh boolean monitoring atom for each constraint that needs one, computes its
//! initial truth, and rejects inputs that are trivially unsatisfiable.

use hashbrown::HashMap;
use tcmodel::*;

use crate::errors::{CompileError, ViolationKind};

type Atom = (FluentId, Vec<Term>);

/// The partial ground initial state used to evaluate constraints: only fluents that are the
/// target of some action's effect *and* true in the full initial state are recorded. Atoms
/// outside this map are left symbolic rather than folded to `false`.
fn ground_initial_state(actions: &[GroundAction], init: &[Effect]) -> HashMap<Atom, bool> {
    let mut initially_true: HashMap<Atom, bool> = HashMap::new();
    for eff in init {
        if let Some((true, id, args)) = eff.asserted_literal() {
            initially_true.insert((id, args.to_vec()), true);
        }
    }
    let mut state = HashMap::new();
    for action in actions {
        for eff in &action.effects {
            let atom = eff.atom();
            if initially_true.contains_key(&atom) {
                state.insert(atom, true);
            }
        }
    }
    state
}

fn eval(phi: &Formula, i: &HashMap<Atom, bool>) -> Formula {
    phi.substitute_truth(i).simplify()
}

/// Result of allocation: the constraint -> monitor map, the monitors whose initial value is
/// `true`, and the list of newly-allocated fluents in allocation order.
pub struct Allocation {
    pub monitors: HashMap<usize, FluentId>,
    pub initially_true: Vec<FluentId>,
}

/// Iterates over the normalised constraints in order, allocating monitors and checking the two
/// trivially-unsatisfiable initial-state cases.
pub fn allocate(
    constraints: &[TrajectoryConstraint],
    actions: &[GroundAction],
    init: &[Effect],
    fluents: &mut Fluents,
) -> Result<Allocation, CompileError> {
    let i = ground_initial_state(actions, init);
    let mut monitors = HashMap::new();
    let mut initially_true = Vec::new();
    let mut counter = 0u32;

    for (idx, c) in constraints.iter().enumerate() {
        match c {
            TrajectoryConstraint::Always(phi) => {
                if eval(phi, &i).is_false() {
                    return Err(CompileError::InitialStateViolation(ViolationKind::Always));
                }
            }
            TrajectoryConstraint::Sometime(phi) => {
                let v0 = eval(phi, &i);
                let m = fluents.add_fresh_boolean(format!("hold-{counter}"));
                if v0.is_true() {
                    initially_true.push(m);
                }
                monitors.insert(idx, m);
                counter += 1;
            }
            TrajectoryConstraint::SometimeAfter { phi, psi } => {
                let v0 = Formula::or([eval(psi, &i), Formula::not(eval(phi, &i))]).simplify();
                let m = fluents.add_fresh_boolean(format!("hold-{counter}"));
                if v0.is_true() {
                    initially_true.push(m);
                }
                monitors.insert(idx, m);
                counter += 1;
            }
            TrajectoryConstraint::SometimeBefore { phi, psi } => {
                if eval(phi, &i).is_true() {
                    return Err(CompileError::InitialStateViolation(ViolationKind::SometimeBefore));
                }
                let v0 = eval(psi, &i);
                let m = fluents.add_fresh_boolean(format!("seen-psi-{counter}"));
                if v0.is_true() {
                    initially_true.push(m);
                }
                monitors.insert(idx, m);
                counter += 1;
            }
            TrajectoryConstraint::AtMostOnce(phi) => {
                let v0 = eval(phi, &i);
                let m = fluents.add_fresh_boolean(format!("seen-phi-{counter}"));
                if v0.is_true() {
                    initially_true.push(m);
                }
                monitors.insert(idx, m);
                counter += 1;
            }
        }
    }

    Ok(Allocation { monitors, initially_true })
}
