use std::{error, fmt};
use crate::sat::formula::{Lit, Var, VarMap};

pub mod cdcl;
pub mod dimacs;
pub mod formula;


pub enum PartialResult {
    UnSAT,
    SAT(VarMap<bool>),
    Interrupted(f64),
}

pub enum TotalResult {
    UnSAT,
    SAT(VarMap<bool>),
    Interrupted,
}


#[derive(Clone, Copy, Default, Debug)]
pub struct Stats {
    pub decisions: u64,
    pub conflicts: u64,
    pub propagations: u64,
    pub learnts: u64,
    pub learnt_literals: u64,
}


/// A broken trail/graph invariant observed during conflict analysis. These
/// signal an implementation bug; the solve is aborted rather than reported
/// as UNSAT.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum SolverError {
    NoDerivation(Var),
    NoUip,
    UnexpectedGuess(Var),
}

impl fmt::Display for SolverError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            SolverError::NoDerivation(v) => {
                write!(f, "no derivation graph node for assigned variable {:?}", v)
            }
            SolverError::NoUip => {
                write!(f, "backward trail walk exhausted without finding a UIP")
            }
            SolverError::UnexpectedGuess(v) => {
                write!(f, "guess node for {:?} where a derivation was expected", v)
            }
        }
    }
}

impl error::Error for SolverError {}


pub trait Solver {
    fn n_vars(&self) -> usize;
    fn n_clauses(&self) -> usize;
    fn new_var(&mut self) -> Var;
    fn add_clause(&mut self, clause: &[Lit]) -> bool;
    fn solve(&mut self) -> Result<TotalResult, SolverError>;
    fn stats(&self) -> Stats;
}
