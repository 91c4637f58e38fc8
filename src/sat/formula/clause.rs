use std::fmt;
use super::Lit;
use super::assignment::Assignment;


/// An immutable disjunction of literals.
pub struct Clause {
    lits: Box<[Lit]>,
}

/// How a clause looks under a partial assignment.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum ClauseStatus {
    /// At least one literal is true.
    Satisfied,
    /// No literal is true and exactly one is unassigned.
    Unit(Lit),
    /// Every literal is assigned false.
    Conflicting,
    /// No literal is true and two or more are unassigned.
    Undetermined,
}

impl Clause {
    pub fn new(lits: Box<[Lit]>) -> Clause {
        Clause { lits }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.lits.len()
    }

    #[inline]
    pub fn lits(&self) -> &[Lit] {
        &self.lits
    }

    pub fn status(&self, assigns: &Assignment) -> ClauseStatus {
        let mut unit = None;
        let mut unassigned = 0;
        for &lit in self.lits.iter() {
            if assigns.is_assigned_pos(lit) {
                return ClauseStatus::Satisfied;
            }
            if !assigns.is_assigned_neg(lit) {
                unassigned += 1;
                unit = Some(lit);
            }
        }

        match unassigned {
            0 => ClauseStatus::Conflicting,
            1 => ClauseStatus::Unit(unit.unwrap()),
            _ => ClauseStatus::Undetermined,
        }
    }
}

impl fmt::Debug for Clause {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "(")?;
        for (i, lit) in self.lits.iter().enumerate() {
            if i > 0 {
                write!(f, " ∨ ")?;
            }
            write!(f, "{:?}", lit)?;
        }
        write!(f, ")")
    }
}


#[derive(Clone, Copy, Default, Debug)]
pub struct ClauseDBStats {
    pub num_clauses: usize,
    pub num_learnts: usize,
    pub learnts_literals: u64,
}

/// Grow-only clause storage: original clauses first, then learned clauses in
/// learning order. Clauses are never removed during a solve.
pub struct ClauseDB {
    clauses: Vec<Clause>,
    original: usize,
    pub stats: ClauseDBStats,
}

impl ClauseDB {
    pub fn new() -> ClauseDB {
        ClauseDB {
            clauses: Vec::new(),
            original: 0,
            stats: ClauseDBStats::default(),
        }
    }

    pub fn add_clause(&mut self, lits: Box<[Lit]>) {
        assert_eq!(self.original, self.clauses.len());
        self.clauses.push(Clause::new(lits));
        self.original += 1;
        self.stats.num_clauses += 1;
    }

    pub fn learn_clause(&mut self, lits: Box<[Lit]>) {
        self.stats.num_learnts += 1;
        self.stats.learnts_literals += lits.len() as u64;
        self.clauses.push(Clause::new(lits));
        self.stats.num_clauses += 1;
    }

    #[inline]
    pub fn number_of_clauses(&self) -> usize {
        self.clauses.len()
    }

    #[inline]
    pub fn number_of_original(&self) -> usize {
        self.original
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Clause> {
        self.clauses.iter()
    }

    #[inline]
    pub fn original_clauses(&self) -> &[Clause] {
        &self.clauses[..self.original]
    }
}
