use std::io;

use cdcl_rust::sat::{dimacs, Solver, TotalResult};
use cdcl_rust::sat::cdcl::{CoreSolver, Settings};
use cdcl_rust::sat::formula::Var;


fn parse(input: &str, validate: bool) -> io::Result<(CoreSolver, cdcl_rust::sat::formula::VarMap<i32>)> {
    let mut solver = CoreSolver::new(Settings::default());
    let subst = dimacs::parse(&mut io::Cursor::new(input), &mut solver, validate)?;
    Ok((solver, subst))
}


#[test]
fn parses_header_comments_and_clauses() {
    let input = "c a tiny instance\np cnf 2 2\n1 2 0\nc in between\n-1 -2 0\n";
    let (solver, _) = parse(input, true).unwrap();

    assert_eq!(solver.n_vars(), 2);
    assert_eq!(solver.n_clauses(), 2);
}

#[test]
fn solves_parsed_instance_and_validates_model() {
    let input = "p cnf 2 2\n1 2 0\n-1 -2 0\n";
    let (mut solver, subst) = parse(input, true).unwrap();

    let model = match solver.solve().unwrap() {
        TotalResult::SAT(model) => model,
        _ => panic!("expected SAT"),
    };

    let valid = dimacs::validate_model(&mut io::Cursor::new(input), &subst, &model).unwrap();
    assert!(valid);
}

#[test]
fn variables_are_interned_in_first_occurrence_order() {
    let input = "p cnf 3 1\n3 -1 0\n";
    let (solver, subst) = parse(input, false).unwrap();

    assert_eq!(solver.n_vars(), 2);
    assert_eq!(subst[&Var::from_index(0)], 3);
    assert_eq!(subst[&Var::from_index(1)], 1);
}

#[test]
fn rejects_garbage_input() {
    assert!(parse("p cnf x y\n", false).is_err());
    assert!(parse("nonsense\n", false).is_err());
}

#[test]
fn rejects_out_of_range_numerals() {
    assert!(parse("p cnf 1 1\n99999999999999999999 0\n", false).is_err());
    assert!(parse("p cnf 1 1\n-99999999999999999999 0\n", false).is_err());
    assert!(parse("p cnf 1 1\n2147483648 0\n", false).is_err());
}

#[test]
fn strict_mode_checks_the_header() {
    let input = "p cnf 2 3\n1 0\n";
    assert!(parse(input, true).is_err());
    assert!(parse(input, false).is_ok());
}

#[test]
fn model_line_reports_dimacs_ids() {
    let input = "p cnf 2 2\n-1 0\n2 0\n";
    let (mut solver, subst) = parse(input, true).unwrap();

    let model = match solver.solve().unwrap() {
        TotalResult::SAT(model) => model,
        _ => panic!("expected SAT"),
    };

    let mut out = Vec::new();
    dimacs::write_model(&mut out, &subst, &model).unwrap();
    let line = String::from_utf8(out).unwrap();

    assert_eq!(line.trim(), "-1 2 0");
}
