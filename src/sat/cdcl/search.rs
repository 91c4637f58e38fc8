use log::info;

use crate::sat;
use crate::sat::{PartialResult, SolverError};
use crate::sat::formula::{Lit, Var};
use crate::sat::formula::assignment::*;
use crate::sat::formula::clause::ClauseDB;
use super::budget::Budget;
use super::conflict::AnalyzeContext;
use super::decision::{self, DecisionHeuristic, DecisionSettings};
use super::propagation::Propagator;


#[derive(Default)]
struct SearchStats {
    decisions: u64,
    conflicts: u64,
}


pub enum AddClauseRes {
    UnSAT,
    Consumed,
    Added,
    Rejected,
}


/// The CDCL state machine: propagate to fixpoint, then either analyze a
/// conflict (learn, backtrack, re-propagate) or make a new guess. A conflict
/// with no guesses on the trail is UNSAT; a fixpoint with every variable
/// assigned is SAT.
pub struct Searcher {
    stats: SearchStats,
    db: ClauseDB,
    assigns: Assignment,
    propagator: Propagator,
    heur: Box<dyn DecisionHeuristic>,
    analyze: AnalyzeContext,
}

impl Searcher {
    pub fn new(heur_settings: DecisionSettings) -> Self {
        Searcher {
            stats: SearchStats::default(),
            db: ClauseDB::new(),
            assigns: Assignment::new(),
            propagator: Propagator::new(),
            heur: decision::create(heur_settings),
            analyze: AnalyzeContext::new(),
        }
    }

    pub fn number_of_vars(&self) -> usize {
        self.assigns.number_of_vars()
    }

    pub fn number_of_clauses(&self) -> usize {
        self.db.number_of_clauses()
    }

    pub fn new_var(&mut self) -> Var {
        let v = self.assigns.new_var();
        self.heur.init_var(v);
        self.analyze.init_var(v);
        v
    }

    pub fn add_clause(&mut self, clause: &[Lit]) -> AddClauseRes {
        // Once clauses have been learned the problem is fixed; refuse late
        // additions instead of interleaving them with learned clauses.
        if self.db.number_of_clauses() != self.db.number_of_original() {
            return AddClauseRes::Rejected;
        }

        let ps = {
            let mut ps = clause.to_vec();

            // Remove duplicate literals and consume tautologies:
            ps.sort();
            ps.dedup();

            let mut prev = None;
            for &lit in ps.iter() {
                if prev == Some(!lit) {
                    return AddClauseRes::Consumed;
                }
                prev = Some(lit);
            }

            ps.into_boxed_slice()
        };

        if ps.is_empty() {
            AddClauseRes::UnSAT
        } else {
            // Unit clauses go into the database like any other; the first
            // propagation pass picks them up.
            self.db.add_clause(ps);
            AddClauseRes::Added
        }
    }

    pub fn search(&mut self, budget: &Budget) -> Result<PartialResult, SolverError> {
        info!("============================[ Search Statistics ]==============================");
        info!("| Conflicts |     Vars  Clauses |   Learnts   Lit/Cl | Progress |");
        info!("===============================================================================");

        loop {
            if !budget.within(self.stats.conflicts, self.propagator.propagations) {
                let progress = progress_estimate(&self.assigns);
                self.cancel_until(GROUND_LEVEL);
                return Ok(PartialResult::Interrupted(progress));
            }

            match self.propagator.propagate(&self.db, &mut self.assigns) {
                Some(conflict) => {
                    self.stats.conflicts += 1;

                    if self.assigns.is_ground_level() {
                        return Ok(PartialResult::UnSAT);
                    }

                    let learned = self.analyze.analyze(&self.assigns, conflict)?;
                    self.heur.clause_learned(&learned.lits);
                    self.db.learn_clause(learned.lits);
                    self.cancel_until(learned.backtrack_level);

                    if self.stats.conflicts % 1024 == 0 {
                        info!(
                            "| {:9} | {:8} {:8} | {:9} {:8.1} | {:6.3} % |",
                            self.stats.conflicts,
                            self.assigns.number_of_vars(),
                            self.db.number_of_original(),
                            self.db.stats.num_learnts,
                            (self.db.stats.learnts_literals as f64)
                                / (self.db.stats.num_learnts as f64),
                            progress_estimate(&self.assigns) * 100.0
                        );
                    }
                }

                None => {
                    match self.heur.pick_branch_lit(&self.assigns) {
                        Some(next) => {
                            self.stats.decisions += 1;
                            self.assigns.new_decision_level();
                            self.assigns.assign_lit(next, Reason::Guess);
                        }

                        None => {
                            // Model found:
                            return Ok(PartialResult::SAT(extract_model(&self.assigns)));
                        }
                    }
                }
            }
        }
    }

    // Revert to the state at given level (keeping all assignments at
    // `target_level` but not beyond).
    fn cancel_until(&mut self, target_level: DecisionLevel) {
        let heur = &mut self.heur;
        self.assigns
            .rewind_until_level(target_level, |lit| heur.cancel(lit));
    }

    pub fn stats(&self) -> sat::Stats {
        sat::Stats {
            decisions: self.stats.decisions,
            conflicts: self.stats.conflicts,
            propagations: self.propagator.propagations,
            learnts: self.db.stats.num_learnts as u64,
            learnt_literals: self.db.stats.learnts_literals,
        }
    }

}
