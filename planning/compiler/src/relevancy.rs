//! Maps each ground atom written by some action's effects to the constraints that mention it,
//! so that rewriting an action only considers constraints it can possibly affect.

use hashbrown::HashMap;
use tcmodel::*;

type Atom = (FluentId, Vec<Term>);

/// `atom -> ordered, deduplicated list of constraint indices (into the normalised constraint list)`.
#[derive(Default)]
pub struct RelevancyIndex {
    index: HashMap<Atom, Vec<usize>>,
}

impl RelevancyIndex {
    pub fn build(constraints: &[TrajectoryConstraint]) -> Self {
        let mut index: HashMap<Atom, Vec<usize>> = HashMap::new();
        for (i, c) in constraints.iter().enumerate() {
            for atom in free_atoms(c) {
                let list = index.entry(atom).or_default();
                if !list.contains(&i) {
                    list.push(i);
                }
            }
        }
        Self { index }
    }

    /// Ordered, deduplicated list of constraint indices relevant to `action`: every constraint
    /// mentioning an atom written by one of the action's effects, in first-occurrence order.
    pub fn relevant(&self, action: &GroundAction) -> Vec<usize> {
        let mut relevant = Vec::new();
        for eff in &action.effects {
            let atom = eff.atom();
            if let Some(list) = self.index.get(&atom) {
                for &c in list {
                    if !relevant.contains(&c) {
                        relevant.push(c);
                    }
                }
            }
        }
        relevant
    }
}

fn free_atoms(c: &TrajectoryConstraint) -> Vec<Atom> {
    match c {
        TrajectoryConstraint::Always(phi) | TrajectoryConstraint::Sometime(phi) | TrajectoryConstraint::AtMostOnce(phi) => {
            phi.free_atoms()
        }
        TrajectoryConstraint::SometimeBefore { phi, psi } | TrajectoryConstraint::SometimeAfter { phi, psi } => {
            let mut atoms = phi.free_atoms();
            for a in psi.free_atoms() {
                if !atoms.contains(&a) {
                    atoms.push(a);
                }
            }
            atoms
        }
    }
}
