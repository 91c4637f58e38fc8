use crate::sat::formula::Lit;
use crate::sat::formula::assignment::{Assignment, Reason};
use crate::sat::formula::clause::{ClauseDB, ClauseStatus};


/// Naive unit propagation: rescans the whole clause database after every
/// successful propagation until no clause is unit. There is no watch
/// indexing; a pass that assigns nothing is the fixpoint.
pub struct Propagator {
    pub propagations: u64,
}

impl Propagator {
    pub fn new() -> Propagator {
        Propagator { propagations: 0 }
    }

    /// Extends the assignment to fixpoint. On conflict, stops immediately
    /// and returns the negations of the conflicting clause's literals (all
    /// of them true under the current assignment).
    pub fn propagate(&mut self, db: &ClauseDB, assigns: &mut Assignment) -> Option<Box<[Lit]>> {
        'scan: loop {
            for clause in db.iter() {
                match clause.status(assigns) {
                    ClauseStatus::Satisfied | ClauseStatus::Undetermined => {}

                    ClauseStatus::Unit(unit) => {
                        let antecedents = clause
                            .lits()
                            .iter()
                            .filter(|&&q| q != unit)
                            .map(|&q| !q)
                            .collect();
                        assigns.assign_lit(unit, Reason::Derived(antecedents));
                        self.propagations += 1;
                        continue 'scan;
                    }

                    ClauseStatus::Conflicting => {
                        return Some(clause.lits().iter().map(|&q| !q).collect());
                    }
                }
            }

            return None;
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::formula::Var;
    use crate::sat::formula::assignment::LBool;

    fn vars(assigns: &mut Assignment, n: usize) -> Vec<Var> {
        (0..n).map(|_| assigns.new_var()).collect()
    }

    #[test]
    fn propagates_chain_to_fixpoint() {
        let mut assigns = Assignment::new();
        let v = vars(&mut assigns, 3);
        let mut db = ClauseDB::new();
        db.add_clause(Box::new([v[0].pos_lit()]));
        db.add_clause(Box::new([v[0].neg_lit(), v[1].pos_lit()]));
        db.add_clause(Box::new([v[1].neg_lit(), v[2].pos_lit()]));

        let mut prop = Propagator::new();
        assert!(prop.propagate(&db, &mut assigns).is_none());

        assert_eq!(assigns.of_lit(v[0].pos_lit()), LBool::True);
        assert_eq!(assigns.of_lit(v[1].pos_lit()), LBool::True);
        assert_eq!(assigns.of_lit(v[2].pos_lit()), LBool::True);
        assert_eq!(prop.propagations, 3);
    }

    #[test]
    fn derived_antecedents_are_the_forcing_literals() {
        let mut assigns = Assignment::new();
        let v = vars(&mut assigns, 2);
        let mut db = ClauseDB::new();
        db.add_clause(Box::new([v[0].neg_lit(), v[1].pos_lit()]));

        assigns.new_decision_level();
        assigns.assign_lit(v[0].pos_lit(), Reason::Guess);
        let mut prop = Propagator::new();
        assert!(prop.propagate(&db, &mut assigns).is_none());

        match assigns.vardata(v[1]).unwrap().reason {
            Reason::Derived(ref ants) => assert_eq!(&ants[..], &[v[0].pos_lit()]),
            Reason::Guess => panic!("propagated variable recorded as a guess"),
        }
    }

    #[test]
    fn conflict_reports_negated_clause_literals() {
        let mut assigns = Assignment::new();
        let v = vars(&mut assigns, 1);
        let mut db = ClauseDB::new();
        db.add_clause(Box::new([v[0].pos_lit()]));
        db.add_clause(Box::new([v[0].neg_lit()]));

        let mut prop = Propagator::new();
        let confl = prop.propagate(&db, &mut assigns).expect("conflict expected");
        assert_eq!(&confl[..], &[v[0].pos_lit()]);
    }

    #[test]
    fn no_unit_means_no_assignment() {
        let mut assigns = Assignment::new();
        let v = vars(&mut assigns, 2);
        let mut db = ClauseDB::new();
        db.add_clause(Box::new([v[0].pos_lit(), v[1].pos_lit()]));

        let mut prop = Propagator::new();
        assert!(prop.propagate(&db, &mut assigns).is_none());
        assert_eq!(assigns.number_of_assigns(), 0);
    }
}
