//! Instantiates lifted action schemas over their parameters' finite object domains.
//!
//! This is the external "grounder" collaborator referenced by the compiler: it is consumed as a
//! pre-pass and is not part of the compilation algorithm itself.

use hashbrown::HashMap;
use itertools::Itertools;

use crate::*;

/// A grounded action paired with the lifted action and argument tuple it was instantiated from,
/// so that a consumer holding only ground actions can recover the original lifted plan step.
pub struct GroundingResult {
    pub problem: GroundedProblem,
    /// Maps a ground action's name to `(lifted action name, arguments)`.
    pub origin: HashMap<Sym, (Sym, Vec<Object>)>,
}

#[derive(Debug, thiserror::Error)]
pub enum GroundingError {
    #[error("duplicate ground action name: {0}")]
    DuplicateGroundAction(Sym),
    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Instantiates every lifted action of `problem` over all legal parameter tuples, producing a
/// fully-grounded problem and the reverse `ground-action -> (lifted-action, arguments)` map.
pub fn ground(problem: &Problem) -> Result<GroundingResult, GroundingError> {
    problem.validate()?;

    let mut actions = Vec::new();
    let mut origin = HashMap::new();

    for action in &problem.actions {
        let domains: Vec<Vec<Object>> = action
            .parameters
            .iter()
            .map(|p| match p.tpe() {
                Type::User(tpe, _) => problem.objects.domain_of(tpe),
                _ => Vec::new(),
            })
            .collect();

        let tuples: Box<dyn Iterator<Item = Vec<Object>>> = if domains.is_empty() {
            Box::new(std::iter::once(Vec::new()))
        } else {
            Box::new(domains.into_iter().multi_cartesian_product())
        };

        for args in tuples {
            let bindings: HashMap<Sym, Object> = action
                .parameters
                .iter()
                .zip(args.iter())
                .map(|(p, o)| (p.name.clone(), o.clone()))
                .collect();

            let name = ground_action_name(&action.name, &args);
            if origin.contains_key(&name) {
                return Err(GroundingError::DuplicateGroundAction(name));
            }

            let mut ground = GroundAction::new(name.clone());
            for pre in &action.preconditions {
                ground.preconditions.push(pre.substitute_terms(&bindings).simplify());
            }
            for eff in &action.effects {
                ground.effects.push(Effect::new(
                    eff.condition.substitute_terms(&bindings).simplify(),
                    eff.fluent,
                    eff.args.iter().map(|t| substitute_term(t, &bindings)).collect(),
                    eff.value.substitute_terms(&bindings).simplify(),
                ));
            }
            origin.insert(name, (action.name.clone(), args));
            actions.push(ground);
        }
    }

    let grounded = GroundedProblem {
        name: problem.name.clone(),
        types: problem.types.clone(),
        objects: problem.objects.clone(),
        fluents: problem.fluents.clone(),
        actions,
        init: problem.init.clone(),
        goals: problem.goals.clone(),
        trajectory_constraints: problem.trajectory_constraints.clone(),
    };

    Ok(GroundingResult { problem: grounded, origin })
}

fn ground_action_name(base: &Sym, args: &[Object]) -> Sym {
    if args.is_empty() {
        return base.clone();
    }
    let mut s = base.as_str().to_string();
    for a in args {
        s.push('_');
        s.push_str(a.name().as_str());
    }
    Sym::from(s)
}

fn substitute_term(t: &Term, bindings: &HashMap<Sym, Object>) -> Term {
    match t {
        Term::Var(v) => bindings.get(v).cloned().map(Term::Obj).unwrap_or_else(|| t.clone()),
        Term::Obj(_) => t.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room_problem() -> (Problem, FluentId) {
        let mut objects = Objects::new();
        objects.declare_type("room", None);
        objects.add_object("r1", "room").unwrap();
        objects.add_object("r2", "room").unwrap();

        let room_type = Type::User(Sym::from("room"), std::sync::Arc::new(objects.types().clone()));

        let mut fluents = Fluents::new();
        let at = fluents.add_fluent("visited", vec![Param::new("r", room_type.clone())], Type::Bool).unwrap();

        let x = Param::new("r", room_type);
        let visit = LiftedAction::new("visit", vec![x.clone()]).with_effect(Effect::new(
            Formula::tru(),
            at,
            vec![Term::Var(x.name().clone())],
            Formula::tru(),
        ));

        (Problem::new(UserTypes::new(), objects, fluents).with_action(visit), at)
    }

    #[test]
    fn grounds_one_action_per_domain_element() {
        let (problem, _at) = room_problem();
        let result = ground(&problem).unwrap();
        let mut names: Vec<String> = result.problem.actions.iter().map(|a| a.name.as_str().to_string()).collect();
        names.sort();
        assert_eq!(names, vec!["visit_r1".to_string(), "visit_r2".to_string()]);
    }

    #[test]
    fn grounding_substitutes_parameters_in_effects() {
        let (problem, at) = room_problem();
        let result = ground(&problem).unwrap();
        let r1 = problem.objects.get("r1").unwrap();
        let visit_r1 = result.problem.actions.iter().find(|a| a.name.as_str() == "visit_r1").unwrap();
        assert!(visit_r1.effects.iter().any(|e| e.atom() == (at, vec![Term::Obj(r1.clone())])));
    }

    #[test]
    fn origin_map_recovers_lifted_action_and_arguments() {
        let (problem, _at) = room_problem();
        let result = ground(&problem).unwrap();
        let r2 = problem.objects.get("r2").unwrap();
        let (lifted, args) = result.origin.get(&Sym::from("visit_r2")).unwrap();
        assert_eq!(lifted.as_str(), "visit");
        assert_eq!(args, &vec![r2]);
    }

    #[test]
    fn nullary_action_grounds_to_itself() {
        let mut fluents = Fluents::new();
        let p = fluents.add_fluent("p", Vec::new(), Type::Bool).unwrap();
        let action = LiftedAction::new("noop", Vec::new()).with_effect(Effect::assign_true(p, Vec::new()));
        let problem = Problem::new(UserTypes::new(), Objects::new(), fluents).with_action(action);

        let result = ground(&problem).unwrap();
        assert_eq!(result.problem.actions.len(), 1);
        assert_eq!(result.problem.actions[0].name.as_str(), "noop");
    }

    #[test]
    fn ground_rejects_duplicate_action_names() {
        let mut fluents = Fluents::new();
        let p = fluents.add_fluent("p", Vec::new(), Type::Bool).unwrap();
        let problem = Problem::new(UserTypes::new(), Objects::new(), fluents)
            .with_action(LiftedAction::new("noop", Vec::new()).with_effect(Effect::assign_true(p, Vec::new())))
            .with_action(LiftedAction::new("noop", Vec::new()).with_effect(Effect::assign_false(p, Vec::new())));

        match ground(&problem) {
            Err(GroundingError::Model(ModelError::DuplicateAction(name))) => assert_eq!(name.as_str(), "noop"),
            other => panic!("expected a duplicate-action model error, got {}", other.is_ok()),
        }
    }

    #[test]
    fn ground_rejects_unbound_parameter() {
        let mut fluents = Fluents::new();
        let p = fluents.add_fluent("p", Vec::new(), Type::Bool).unwrap();
        let stray = Sym::from("stray");
        let action = LiftedAction::new("noop", Vec::new())
            .with_effect(Effect::new(Formula::fluent(p, vec![Term::Var(stray.clone())]), p, Vec::new(), Formula::tru()));
        let problem = Problem::new(UserTypes::new(), Objects::new(), fluents).with_action(action);

        match ground(&problem) {
            Err(GroundingError::Model(ModelError::UnboundParameter(v))) => assert_eq!(v, stray),
            other => panic!("expected an unbound-parameter model error, got {}", other.is_ok()),
        }
    }
}
