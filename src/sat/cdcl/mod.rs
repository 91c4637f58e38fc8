use crate::sat::{PartialResult, Solver, SolverError, TotalResult};
use crate::sat::formula::{Lit, Var};
use self::budget::Budget;
use self::search::{AddClauseRes, Searcher};

pub mod budget;
mod conflict;
pub mod decision;
mod propagation;
mod search;

pub use self::decision::{DecisionSettings, HeuristicMode};


#[derive(Default)]
pub struct Settings {
    pub heur: DecisionSettings,
}


pub struct CoreSolver {
    // If false, the constraints are already unsatisfiable and search is
    // never entered.
    ok: bool,
    search: Searcher,
    budget: Budget,
}

impl Solver for CoreSolver {
    fn n_vars(&self) -> usize {
        self.search.number_of_vars()
    }

    fn n_clauses(&self) -> usize {
        self.search.number_of_clauses()
    }

    fn new_var(&mut self) -> Var {
        self.search.new_var()
    }

    fn add_clause(&mut self, clause: &[Lit]) -> bool {
        if !self.ok {
            return false;
        }
        match self.search.add_clause(clause) {
            AddClauseRes::UnSAT => {
                self.ok = false;
                false
            }
            AddClauseRes::Rejected => false,
            AddClauseRes::Consumed | AddClauseRes::Added => true,
        }
    }

    fn solve(&mut self) -> Result<TotalResult, SolverError> {
        self.budget.off();
        if !self.ok {
            return Ok(TotalResult::UnSAT);
        }

        let result = self.search.search(&self.budget)?;
        if let PartialResult::UnSAT = result {
            self.ok = false;
        }
        Ok(match result {
            PartialResult::UnSAT => TotalResult::UnSAT,
            PartialResult::SAT(model) => TotalResult::SAT(model),
            PartialResult::Interrupted(_) => TotalResult::Interrupted,
        })
    }

    fn stats(&self) -> crate::sat::Stats {
        self.search.stats()
    }
}

impl CoreSolver {
    pub fn new(settings: Settings) -> Self {
        CoreSolver {
            ok: true,
            search: Searcher::new(settings.heur),
            budget: Budget::new(),
        }
    }

    pub fn budget(&self) -> &Budget {
        &self.budget
    }

    pub fn solve_limited(&mut self, budget: &Budget) -> Result<PartialResult, SolverError> {
        if self.ok {
            let result = self.search.search(budget)?;
            if let PartialResult::UnSAT = result {
                self.ok = false;
            }
            Ok(result)
        } else {
            Ok(PartialResult::UnSAT)
        }
    }
}
