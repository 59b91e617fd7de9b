//! Trajectory-constraints compiler: rewrites a grounded planning problem so that every
//! trajectory constraint (`always`, `sometime`, `at-most-once`, `sometime-before`,
//! `sometime-after`) is encoded into monitoring atoms, action preconditions/effects and an
//! augmented goal, with no trajectory constraints left in the output.

mod allocate;
pub mod errors;
mod normalise;
mod regress;
mod relevancy;
mod rewrite;

mod assemble;

use tcmodel::*;
use tracing::debug;

pub use assemble::PlanLifter;
pub use errors::{CompilationKind, CompileError};
pub use regress::regress;
pub use relevancy::RelevancyIndex;

/// The name this compiler reports itself under in [`CompilerResult`].
pub const COMPILER_NAME: &str = "TrajectoryConstraintsRemover";

/// Result of a successful `compile` call.
pub struct CompilerResult {
    pub problem: GroundedProblem,
    pub plan_lifter: PlanLifter,
    pub compiler_name: &'static str,
}

/// Compiles `problem` by eliminating its trajectory constraints. `kind` must be
/// [`CompilationKind::TrajectoryConstraintsRemoving`]; anything else is rejected immediately.
pub fn compile(problem: &Problem, kind: CompilationKind) -> Result<CompilerResult, CompileError> {
    if kind != CompilationKind::TrajectoryConstraintsRemoving {
        return Err(CompileError::UnsupportedCompilationKind);
    }

    // 4.1 Grounding Adapter
    let grounding = tcmodel::ground(problem)?;
    let mut grounded = grounding.problem;
    grounded.name = Sym::from(format!("{COMPILER_NAME}_{}", grounded.name));
    debug!(actions = grounded.actions.len(), name = %grounded.name, "grounded problem before compilation");

    // 4.2 Constraint Normaliser
    let constraints = normalise::normalise(&grounded.trajectory_constraints, &grounded.objects)?;
    debug!(constraints = constraints.len(), "normalised trajectory constraints");

    // 4.3 Relevancy Index
    let index = RelevancyIndex::build(&constraints);

    // 4.5 Monitoring-Atom Allocator
    let allocation = allocate::allocate(&constraints, &grounded.actions, &grounded.init, &mut grounded.fluents)?;

    let landmark_monitors: Vec<FluentId> = constraints
        .iter()
        .enumerate()
        .filter(|(_, c)| c.is_landmark())
        .filter_map(|(i, _)| allocation.monitors.get(&i).copied())
        .collect();

    // 4.6 Per-Constraint Rewriter
    let mut kept_actions = Vec::new();
    for mut action in grounded.actions {
        let retained = rewrite::rewrite_action(&mut action, &constraints, &allocation.monitors, &index)?;
        if retained {
            kept_actions.push(action);
        } else {
            debug!(action = %action.name, "pruned action: rewritten preconditions contain false");
        }
    }

    // 4.7 Problem Assembler
    let new_problem = assemble::assemble(
        grounded.name,
        grounded.types,
        grounded.objects,
        grounded.fluents,
        kept_actions,
        grounded.init,
        grounded.goals,
        landmark_monitors,
        allocation.initially_true,
    );

    Ok(CompilerResult {
        problem: new_problem,
        plan_lifter: PlanLifter::new(grounding.origin),
        compiler_name: COMPILER_NAME,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_problem(fluent_names: &[&str]) -> (Problem, Vec<FluentId>) {
        let mut fluents = Fluents::new();
        let ids = fluent_names
            .iter()
            .map(|n| fluents.add_fluent(*n, Vec::new(), Type::Bool).unwrap())
            .collect();
        (Problem::new(UserTypes::new(), Objects::new(), fluents), ids)
    }

    fn action(name: &str, effects: Vec<Effect>) -> LiftedAction {
        effects.into_iter().fold(LiftedAction::new(name, Vec::new()), |a, e| a.with_effect(e))
    }

    fn goal_atoms(problem: &GroundedProblem) -> Vec<FluentId> {
        problem
            .goals
            .iter()
            .filter_map(|g| g.as_literal())
            .filter(|(pol, _, _)| *pol)
            .map(|(_, id, _)| id)
            .collect()
    }

    /// S1: `sometime(p)`, one action `op` with unconditional effect `p := true`.
    #[test]
    fn s1_sometime_landmark() {
        let (problem, ids) = empty_problem(&["p", "q"]);
        let p = ids[0];
        let problem = problem
            .with_action(action("op", vec![Effect::assign_true(p, Vec::new())]))
            .with_constraint(QuantifiedConstraint::new(TrajectoryConstraint::Sometime(Formula::atom(p))));

        let result = compile(&problem, CompilationKind::TrajectoryConstraintsRemoving).unwrap();
        let out = result.problem;

        let hold = out.fluents.get_by_name("hold-0").expect("monitor allocated");
        assert!(!out.init.iter().any(|e| e.asserted_literal() == Some((true, hold, &[]))));
        assert_eq!(goal_atoms(&out), vec![hold]);

        let op = &out.actions[0];
        assert!(op.effects.iter().any(|e| e.condition.is_true() && e.atom() == (hold, Vec::new())));
    }

    /// S2: `always(p)` with `p` true initially but an action that unconditionally falsifies it:
    /// the action must be pruned entirely.
    #[test]
    fn s2_always_prunes_violating_action() {
        let (problem, ids) = empty_problem(&["p"]);
        let p = ids[0];
        let problem = problem
            .with_init(Effect::assign_true(p, Vec::new()))
            .with_action(action("op", vec![Effect::assign_false(p, Vec::new())]))
            .with_constraint(QuantifiedConstraint::new(TrajectoryConstraint::Always(Formula::atom(p))));

        let result = compile(&problem, CompilationKind::TrajectoryConstraintsRemoving).unwrap();
        assert!(result.problem.actions.is_empty());
    }

    /// S3: `at-most-once(p)` over `turn_on`/`turn_off` actions.
    #[test]
    fn s3_at_most_once() {
        let (problem, ids) = empty_problem(&["p"]);
        let p = ids[0];
        let problem = problem
            .with_action(action("turn_on", vec![Effect::assign_true(p, Vec::new())]))
            .with_action(action("turn_off", vec![Effect::assign_false(p, Vec::new())]))
            .with_constraint(QuantifiedConstraint::new(TrajectoryConstraint::AtMostOnce(Formula::atom(p))));

        let result = compile(&problem, CompilationKind::TrajectoryConstraintsRemoving).unwrap();
        let out = result.problem;
        let m = out.fluents.get_by_name("seen-phi-0").unwrap();

        let turn_on = out.actions.iter().find(|a| a.name.as_str() == "turn_on").unwrap();
        // precondition simplifies to `not m or p`
        assert!(turn_on.preconditions.iter().any(|c| {
            matches!(c, Formula::Or(args) if args.len() == 2
                && args.contains(&Formula::not(Formula::atom(m)))
                && args.contains(&Formula::atom(p)))
        }));
        assert!(turn_on.effects.iter().any(|e| e.condition.is_true() && e.atom() == (m, Vec::new())));

        let turn_off = out.actions.iter().find(|a| a.name.as_str() == "turn_off").unwrap();
        assert!(turn_off.preconditions.iter().all(|c| !c.is_true()));
    }

    /// S4: `sometime-before(p, q)` over `mark_p`/`mark_q` actions.
    #[test]
    fn s4_sometime_before() {
        let (problem, ids) = empty_problem(&["p", "q"]);
        let (p, q) = (ids[0], ids[1]);
        let problem = problem
            .with_action(action("mark_p", vec![Effect::assign_true(p, Vec::new())]))
            .with_action(action("mark_q", vec![Effect::assign_true(q, Vec::new())]))
            .with_constraint(QuantifiedConstraint::new(TrajectoryConstraint::SometimeBefore {
                phi: Formula::atom(p),
                psi: Formula::atom(q),
            }));

        let result = compile(&problem, CompilationKind::TrajectoryConstraintsRemoving).unwrap();
        let out = result.problem;
        let m = out.fluents.get_by_name("seen-psi-0").unwrap();

        let mark_p = out.actions.iter().find(|a| a.name.as_str() == "mark_p").unwrap();
        assert!(mark_p.preconditions.iter().any(|c| c == &Formula::atom(m)));

        let mark_q = out.actions.iter().find(|a| a.name.as_str() == "mark_q").unwrap();
        assert!(mark_q.effects.iter().any(|e| e.condition.is_true() && e.atom() == (m, Vec::new())));

        assert!(goal_atoms(&out).is_empty());
    }

    /// S2 variant: `sometime-before(p, q)` with `p` already true at the initial state is
    /// trivially unsatisfiable.
    #[test]
    fn p3_sometime_before_initial_violation() {
        let (problem, ids) = empty_problem(&["p", "q"]);
        let p = ids[0];
        let problem = problem
            .with_init(Effect::assign_true(p, Vec::new()))
            .with_action(action("noop", vec![Effect::assign_true(p, Vec::new())]))
            .with_constraint(QuantifiedConstraint::new(TrajectoryConstraint::SometimeBefore {
                phi: Formula::atom(p),
                psi: Formula::atom(ids.get(1).copied().unwrap_or(p)),
            }));

        match compile(&problem, CompilationKind::TrajectoryConstraintsRemoving) {
            Err(CompileError::InitialStateViolation(errors::ViolationKind::SometimeBefore)) => {}
            other => panic!("expected sometime-before initial violation, got {}", other.is_ok()),
        }
    }

    /// S5: `sometime-after(p, q)` over `trigger_p`/`trigger_q` actions.
    #[test]
    fn s5_sometime_after() {
        let (problem, ids) = empty_problem(&["p", "q"]);
        let (p, q) = (ids[0], ids[1]);
        let problem = problem
            .with_action(action("trigger_p", vec![Effect::assign_true(p, Vec::new())]))
            .with_action(action("trigger_q", vec![Effect::assign_true(q, Vec::new())]))
            .with_constraint(QuantifiedConstraint::new(TrajectoryConstraint::SometimeAfter {
                phi: Formula::atom(p),
                psi: Formula::atom(q),
            }));

        let result = compile(&problem, CompilationKind::TrajectoryConstraintsRemoving).unwrap();
        let out = result.problem;

        let hold = out.fluents.get_by_name("hold-0").expect("monitor allocated");
        assert!(!out.init.iter().any(|e| e.asserted_literal() == Some((true, hold, &[]))));
        assert_eq!(goal_atoms(&out), vec![hold]);

        let trigger_p = out.actions.iter().find(|a| a.name.as_str() == "trigger_p").unwrap();
        assert!(
            trigger_p
                .effects
                .iter()
                .any(|e| e.atom() == (hold, Vec::new()) && e.value.is_false() && e.condition == Formula::not(Formula::atom(q)))
        );

        let trigger_q = out.actions.iter().find(|a| a.name.as_str() == "trigger_q").unwrap();
        assert!(
            trigger_q
                .effects
                .iter()
                .any(|e| e.condition.is_true() && e.atom() == (hold, Vec::new()) && e.value.is_true())
        );
    }

    /// P5: two co-relevant constraints touched by the same action are allocated distinct
    /// monitors.
    #[test]
    fn p5_monitors_are_injective_across_shared_actions() {
        let (problem, ids) = empty_problem(&["p", "q"]);
        let (p, q) = (ids[0], ids[1]);
        let problem = problem
            .with_action(action("op", vec![Effect::assign_true(p, Vec::new()), Effect::assign_true(q, Vec::new())]))
            .with_constraint(QuantifiedConstraint::new(TrajectoryConstraint::Sometime(Formula::atom(p))))
            .with_constraint(QuantifiedConstraint::new(TrajectoryConstraint::Sometime(Formula::atom(q))));

        let result = compile(&problem, CompilationKind::TrajectoryConstraintsRemoving).unwrap();
        let out = result.problem;

        let m0 = out.fluents.get_by_name("hold-0").expect("first monitor allocated");
        let m1 = out.fluents.get_by_name("hold-1").expect("second monitor allocated");
        assert_ne!(m0, m1);

        let op = &out.actions[0];
        assert!(op.effects.iter().any(|e| e.atom() == (m0, Vec::new())));
        assert!(op.effects.iter().any(|e| e.atom() == (m1, Vec::new())));
        assert_eq!(goal_atoms(&out).into_iter().collect::<std::collections::HashSet<_>>(), [m0, m1].into_iter().collect());
    }

    /// P1: a problem with no trajectory constraints is passed through unchanged (no new fluents).
    #[test]
    fn p1_empty_constraints_pass_through() {
        let (problem, ids) = empty_problem(&["p"]);
        let p = ids[0];
        let problem = problem
            .with_init(Effect::assign_true(p, Vec::new()))
            .with_action(action("op", vec![Effect::assign_false(p, Vec::new())]))
            .with_goal(Formula::atom(p));

        let result = compile(&problem, CompilationKind::TrajectoryConstraintsRemoving).unwrap();
        let out = result.problem;

        assert_eq!(out.fluents.iter().count(), 1);
        assert_eq!(out.actions.len(), 1);
        assert_eq!(out.init.len(), 1);
        assert_eq!(out.goals, vec![Formula::atom(p)]);
    }

    /// P2: `always(not p)` with `p` true at the initial state is immediately unsatisfiable.
    #[test]
    fn p2_always_initial_violation() {
        let (problem, ids) = empty_problem(&["p"]);
        let p = ids[0];
        let problem = problem
            .with_init(Effect::assign_true(p, Vec::new()))
            .with_action(action("noop", vec![Effect::assign_true(p, Vec::new())]))
            .with_constraint(QuantifiedConstraint::new(TrajectoryConstraint::Always(Formula::not(
                Formula::atom(p),
            ))));

        match compile(&problem, CompilationKind::TrajectoryConstraintsRemoving) {
            Err(CompileError::InitialStateViolation(errors::ViolationKind::Always)) => {}
            other => panic!("expected always initial violation, got {}", other.is_ok()),
        }
    }

    /// P6 / P7: an action that writes no fluent free in the constraint is neither pruned nor
    /// given any new precondition or effect (regression is a fixed point).
    #[test]
    fn p7_regression_fixed_point_on_unrelated_action() {
        let (problem, ids) = empty_problem(&["p", "q"]);
        let (p, q) = (ids[0], ids[1]);
        let problem = problem
            .with_action(action("touches_p", vec![Effect::assign_true(p, Vec::new())]))
            .with_action(action("unrelated", vec![Effect::assign_true(q, Vec::new())]))
            .with_constraint(QuantifiedConstraint::new(TrajectoryConstraint::Sometime(Formula::atom(p))));

        let result = compile(&problem, CompilationKind::TrajectoryConstraintsRemoving).unwrap();
        let out = result.problem;
        let unrelated = out.actions.iter().find(|a| a.name.as_str() == "unrelated").unwrap();
        assert!(unrelated.preconditions.is_empty());
        assert_eq!(unrelated.effects.len(), 1); // only its original effect on q
    }

    #[test]
    fn rejects_unsupported_compilation_kind() {
        let (problem, _ids) = empty_problem(&["p"]);
        match compile(&problem, CompilationKind::Other) {
            Err(CompileError::UnsupportedCompilationKind) => {}
            other => panic!("expected unsupported compilation kind, got {}", other.is_ok()),
        }
    }
}
