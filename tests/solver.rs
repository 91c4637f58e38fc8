use cdcl_rust::sat::{PartialResult, Solver, TotalResult};
use cdcl_rust::sat::cdcl::{CoreSolver, DecisionSettings, HeuristicMode, Settings};
use cdcl_rust::sat::cdcl::budget::Budget;
use cdcl_rust::sat::formula::{Lit, Var, VarMap};


fn solver(mode: HeuristicMode) -> CoreSolver {
    CoreSolver::new(Settings {
        heur: DecisionSettings {
            mode,
            ..Default::default()
        },
    })
}

fn new_vars(solver: &mut CoreSolver, n: usize) -> Vec<Var> {
    (0..n).map(|_| solver.new_var()).collect()
}

fn model_of(result: TotalResult) -> VarMap<bool> {
    match result {
        TotalResult::SAT(model) => model,
        TotalResult::UnSAT => panic!("expected SAT, got UNSAT"),
        TotalResult::Interrupted => panic!("expected SAT, got INDETERMINATE"),
    }
}

fn is_unsat(result: TotalResult) -> bool {
    match result {
        TotalResult::UnSAT => true,
        _ => false,
    }
}

fn satisfies(clauses: &[Vec<Lit>], model: &VarMap<bool>) -> bool {
    clauses.iter().all(|clause| {
        clause
            .iter()
            .any(|lit| model.get(&lit.var()) == Some(&!lit.sign()))
    })
}


#[test]
fn exclusive_pair_is_sat() {
    for &mode in &[HeuristicMode::Naive, HeuristicMode::Activity] {
        let mut s = solver(mode);
        let v = new_vars(&mut s, 2);
        assert!(s.add_clause(&[v[0].pos_lit(), v[1].pos_lit()]));
        assert!(s.add_clause(&[v[0].neg_lit(), v[1].neg_lit()]));

        let model = model_of(s.solve().unwrap());
        let a = *model.get(&v[0]).expect("total model");
        let b = *model.get(&v[1]).expect("total model");
        assert!(a != b, "exactly one of the two variables must be true");
    }
}

#[test]
fn contradicting_units_are_unsat() {
    for &mode in &[HeuristicMode::Naive, HeuristicMode::Activity] {
        let mut s = solver(mode);
        let v = new_vars(&mut s, 1);
        assert!(s.add_clause(&[v[0].pos_lit()]));
        assert!(s.add_clause(&[v[0].neg_lit()]));

        assert!(is_unsat(s.solve().unwrap()));
    }
}

// Guessing a=true propagates b and conflicts; the learned clause must force
// a=false after backtracking to the ground level.
#[test]
fn learned_clause_flips_the_guess() {
    let mut s = solver(HeuristicMode::Naive);
    let v = new_vars(&mut s, 2);
    assert!(s.add_clause(&[v[0].neg_lit(), v[1].pos_lit()]));
    assert!(s.add_clause(&[v[0].neg_lit(), v[1].neg_lit()]));

    let model = model_of(s.solve().unwrap());
    assert_eq!(model.get(&v[0]), Some(&false));

    let stats = s.stats();
    assert_eq!(stats.conflicts, 1);
    assert_eq!(stats.learnts, 1);
    assert_eq!(stats.learnt_literals, 1);
}

#[test]
fn empty_formula_is_sat() {
    let mut s = solver(HeuristicMode::Naive);
    let model = model_of(s.solve().unwrap());
    assert_eq!(model.len(), 0);
}

#[test]
fn empty_clause_is_unsat() {
    let mut s = solver(HeuristicMode::Naive);
    let _ = new_vars(&mut s, 1);
    assert!(!s.add_clause(&[]));
    assert!(is_unsat(s.solve().unwrap()));
}

#[test]
fn tautologies_and_duplicates_are_cleaned_up() {
    let mut s = solver(HeuristicMode::Naive);
    let v = new_vars(&mut s, 2);

    assert!(s.add_clause(&[v[0].pos_lit(), v[0].neg_lit()]));
    assert_eq!(s.n_clauses(), 0);

    assert!(s.add_clause(&[v[0].pos_lit(), v[0].pos_lit(), v[1].pos_lit()]));
    assert_eq!(s.n_clauses(), 1);
}

// Adding constraints to a solver that has already learned clauses is
// refused, and the refusal does not spoil the solved state.
#[test]
fn clauses_are_not_added_after_learning() {
    let mut s = solver(HeuristicMode::Naive);
    let v = new_vars(&mut s, 2);
    assert!(s.add_clause(&[v[0].neg_lit(), v[1].pos_lit()]));
    assert!(s.add_clause(&[v[0].neg_lit(), v[1].neg_lit()]));

    let model = model_of(s.solve().unwrap());
    assert_eq!(model.get(&v[0]), Some(&false));
    assert_eq!(s.stats().learnts, 1);

    assert!(!s.add_clause(&[v[0].pos_lit()]));
    assert_eq!(s.n_clauses(), 3);
    model_of(s.solve().unwrap());
}

fn pigeonhole_clauses(vars: &[Var], pigeons: usize, holes: usize) -> Vec<Vec<Lit>> {
    let p = |i: usize, j: usize| vars[i * holes + j];

    let mut clauses = Vec::new();
    for i in 0..pigeons {
        clauses.push((0..holes).map(|j| p(i, j).pos_lit()).collect());
    }
    for j in 0..holes {
        for i in 0..pigeons {
            for k in i + 1..pigeons {
                clauses.push(vec![p(i, j).neg_lit(), p(k, j).neg_lit()]);
            }
        }
    }
    clauses
}

#[test]
fn pigeonhole_is_unsat() {
    for &mode in &[HeuristicMode::Naive, HeuristicMode::Activity] {
        let mut s = solver(mode);
        let v = new_vars(&mut s, 3 * 2);
        for clause in pigeonhole_clauses(&v, 3, 2) {
            s.add_clause(&clause);
        }

        assert!(is_unsat(s.solve().unwrap()));

        let stats = s.stats();
        assert!(stats.conflicts > 0);
        assert!(stats.learnts > 0);
    }
}

#[test]
fn sat_model_satisfies_every_original_clause() {
    for &mode in &[HeuristicMode::Naive, HeuristicMode::Activity] {
        let mut s = solver(mode);
        let v = new_vars(&mut s, 5);
        let clauses = vec![
            vec![v[0].pos_lit(), v[1].pos_lit(), v[2].neg_lit()],
            vec![v[1].neg_lit(), v[3].pos_lit()],
            vec![v[2].pos_lit(), v[4].pos_lit()],
            vec![v[0].neg_lit(), v[3].neg_lit(), v[4].pos_lit()],
            vec![v[3].pos_lit(), v[4].neg_lit()],
            vec![v[0].pos_lit(), v[4].neg_lit()],
        ];
        for clause in clauses.iter() {
            assert!(s.add_clause(clause));
        }

        let model = model_of(s.solve().unwrap());
        assert!(satisfies(&clauses, &model), "model must satisfy the input");

        // SAT requires a total assignment.
        for var in v.iter() {
            assert!(model.get(var).is_some());
        }
    }
}

#[test]
fn exhausted_conflict_budget_interrupts() {
    let mut s = solver(HeuristicMode::Activity);
    let v = new_vars(&mut s, 3 * 2);
    for clause in pigeonhole_clauses(&v, 3, 2) {
        s.add_clause(&clause);
    }

    let mut budget = Budget::new();
    budget.set_conflict_budget(0);
    match s.solve_limited(&budget).unwrap() {
        PartialResult::Interrupted(_) => {}
        PartialResult::SAT(_) => panic!("budget of zero conflicts must interrupt"),
        PartialResult::UnSAT => panic!("budget of zero conflicts must interrupt"),
    }
}

#[test]
fn interrupt_flag_stops_the_search() {
    let mut s = solver(HeuristicMode::Activity);
    let v = new_vars(&mut s, 2);
    s.add_clause(&[v[0].pos_lit(), v[1].pos_lit()]);

    let budget = Budget::new();
    budget.interrupt();
    match s.solve_limited(&budget).unwrap() {
        PartialResult::Interrupted(_) => {}
        _ => panic!("interrupted budget must stop the search"),
    }
}

#[test]
fn solving_counts_decisions_and_propagations() {
    let mut s = solver(HeuristicMode::Naive);
    let v = new_vars(&mut s, 3);
    assert!(s.add_clause(&[v[0].pos_lit()]));
    assert!(s.add_clause(&[v[0].neg_lit(), v[1].pos_lit()]));

    let _ = model_of(s.solve().unwrap());
    let stats = s.stats();
    assert!(stats.propagations >= 2, "units must be found by propagation");
    assert_eq!(stats.decisions, 1, "only the free variable needs a guess");
    assert_eq!(stats.conflicts, 0);
}
