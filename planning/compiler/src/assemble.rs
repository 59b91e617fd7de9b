//! Installs the allocated monitors, augmented goal and rewritten actions into the final
//! problem, and builds the plan-lifting map back to the original lifted problem.

use hashbrown::HashMap;
use tcmodel::*;

/// Maps a produced grounded action's name back to the lifted action and arguments it was
/// instantiated from.
pub struct PlanLifter {
    origin: HashMap<Sym, (Sym, Vec<Object>)>,
}

impl PlanLifter {
    pub fn new(origin: HashMap<Sym, (Sym, Vec<Object>)>) -> Self {
        Self { origin }
    }

    /// Returns the `(lifted action name, arguments)` a ground action instance came from, or
    /// `None` if the action is not one this compiler produced.
    pub fn lift(&self, ground_action_name: &Sym) -> Option<(&Sym, &[Object])> {
        self.origin.get(ground_action_name).map(|(name, args)| (name, args.as_slice()))
    }
}

#[allow(clippy::too_many_arguments)]
pub fn assemble(
    name: Sym,
    types: UserTypes,
    objects: Objects,
    fluents: Fluents,
    actions: Vec<GroundAction>,
    init: Vec<Effect>,
    goals: Vec<Formula>,
    landmark_monitors: Vec<FluentId>,
    initially_true_monitors: Vec<FluentId>,
) -> GroundedProblem {
    let mut goals = goals;
    goals.extend(landmark_monitors.into_iter().map(Formula::atom));
    let goal = Formula::and(goals).simplify();

    let mut init = init;
    for m in initially_true_monitors {
        init.push(Effect::assign_true(m, Vec::new()));
    }

    GroundedProblem {
        name,
        types,
        objects,
        fluents,
        actions,
        init,
        goals: goal.into_conjuncts(),
        trajectory_constraints: Vec::new(),
    }
}
