use crate::*;

/// A lifted trajectory-constraints planning problem, as given to the compiler.
pub struct Problem {
    pub name: Sym,
    pub types: UserTypes,
    pub objects: Objects,
    pub fluents: Fluents,
    pub actions: Vec<LiftedAction>,
    /// Effects asserted in the initial state.
    pub init: Vec<Effect>,
    pub goals: Vec<Formula>,
    pub trajectory_constraints: Vec<QuantifiedConstraint>,
}

impl Problem {
    pub fn new(types: UserTypes, objects: Objects, fluents: Fluents) -> Self {
        Self::named("problem", types, objects, fluents)
    }

    pub fn named(name: impl Into<Sym>, types: UserTypes, objects: Objects, fluents: Fluents) -> Self {
        Self {
            name: name.into(),
            types,
            objects,
            fluents,
            actions: Vec::new(),
            init: Vec::new(),
            goals: Vec::new(),
            trajectory_constraints: Vec::new(),
        }
    }

    pub fn env(&self) -> Env<'_> {
        Env::new(&self.fluents)
    }

    /// Looks up a lifted action by name.
    pub fn action(&self, name: &Sym) -> Result<&LiftedAction, ModelError> {
        self.actions
            .iter()
            .find(|a| &a.name == name)
            .ok_or_else(|| ModelError::UnknownAction(name.clone()))
    }

    pub fn with_action(mut self, action: LiftedAction) -> Self {
        self.actions.push(action);
        self
    }

    pub fn with_init(mut self, effect: Effect) -> Self {
        self.init.push(effect);
        self
    }

    pub fn with_goal(mut self, goal: Formula) -> Self {
        self.goals.push(goal);
        self
    }

    pub fn with_constraint(mut self, constraint: QuantifiedConstraint) -> Self {
        self.trajectory_constraints.push(constraint);
        self
    }

    /// Checks the problem is well-formed before it is handed to the grounder: no two actions
    /// share a name, and every variable referenced by an action's preconditions/effects is one
    /// of that action's own parameters.
    pub fn validate(&self) -> Result<(), ModelError> {
        let mut seen = hashbrown::HashSet::new();
        for action in &self.actions {
            if !seen.insert(&action.name) {
                return Err(ModelError::DuplicateAction(action.name.clone()));
            }
            let params: hashbrown::HashSet<&Sym> = action.parameters.iter().map(|p| p.name()).collect();
            for v in action.free_vars() {
                if !params.contains(&v) {
                    return Err(ModelError::UnboundParameter(v));
                }
            }
        }
        Ok(())
    }
}

impl std::fmt::Display for Problem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let env = self.env();
        writeln!(f, "problem {}", self.name)?;
        write!(f, "{}\n{}\n", self.objects, self.fluents)?;

        write!(f, "\nActions:")?;
        for a in &self.actions {
            write!(f, "\n\n  {}", env / a)?;
        }
        write!(f, "\n\nInit:")?;
        for ini in &self.init {
            write!(f, "\n  {}", env / ini)?;
        }

        write!(f, "\n\nGoals:")?;
        for g in &self.goals {
            write!(f, "\n  {}", env / g)?;
        }

        write!(f, "\n\nTrajectory constraints:")?;
        for c in &self.trajectory_constraints {
            write!(f, "\n  {}", env / c)?;
        }
        Ok(())
    }
}

/// A fully-grounded problem: every action is a [`GroundAction`] and no trajectory constraints
/// remain, having been compiled away into monitoring atoms, action effects and an augmented goal.
pub struct GroundedProblem {
    pub name: Sym,
    pub types: UserTypes,
    pub objects: Objects,
    pub fluents: Fluents,
    pub actions: Vec<GroundAction>,
    pub init: Vec<Effect>,
    pub goals: Vec<Formula>,
    pub trajectory_constraints: Vec<QuantifiedConstraint>,
}

impl std::fmt::Display for GroundedProblem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let env = Env::new(&self.fluents);
        writeln!(f, "problem {}", self.name)?;
        write!(f, "{}\n{}\n", self.objects, self.fluents)?;

        write!(f, "\nActions:")?;
        for a in &self.actions {
            write!(f, "\n\n  {}", env / a)?;
        }
        write!(f, "\n\nInit:")?;
        for ini in &self.init {
            write!(f, "\n  {}", env / ini)?;
        }

        write!(f, "\n\nGoals:")?;
        for g in &self.goals {
            write!(f, "\n  {}", env / g)?;
        }
        Ok(())
    }
}
