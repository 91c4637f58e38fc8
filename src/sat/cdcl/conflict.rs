use crate::sat::SolverError;
use crate::sat::formula::{Lit, Var, VarMap};
use crate::sat::formula::assignment::*;


pub struct LearnedClause {
    /// The asserting literal sits at index 0; it is the only literal of the
    /// clause assigned at the conflict's decision level.
    pub lits: Box<[Lit]>,
    pub backtrack_level: DecisionLevel,
}


pub struct AnalyzeContext {
    seen: VarMap<bool>,
}

impl AnalyzeContext {
    pub fn new() -> AnalyzeContext {
        AnalyzeContext {
            seen: VarMap::new(),
        }
    }

    pub fn init_var(&mut self, v: Var) {
        self.seen.insert(&v, false);
    }

    /// First-UIP conflict analysis. `conflict` is the conflicting clause
    /// re-expressed as its falsified literals' negations, i.e. a set of
    /// literals all true under the current assignment. Walks the trail
    /// backward (a topological order of the derivation graph), replacing
    /// current-level members by their antecedents until a single
    /// current-level literal remains; that literal is the UIP.
    ///
    /// Must not be called at ground level; a ground-level conflict is UNSAT,
    /// not material for learning.
    pub fn analyze(
        &mut self,
        assigns: &Assignment,
        conflict: Box<[Lit]>,
    ) -> Result<LearnedClause, SolverError> {
        let current_level = assigns.decision_level();
        debug_assert!(current_level > GROUND_LEVEL);

        let mut body = Vec::new();
        let mut backtrack_level = GROUND_LEVEL;
        let mut path_count = 0;
        let mut to_clear = Vec::new();
        let mut index = assigns.number_of_assigns();

        let mut pending: &[Lit] = &conflict;

        let learned = loop {
            // Merge the pending antecedent set into the frontier. Literals
            // below the current level go straight into the clause body;
            // ground-level facts need no justification and are dropped.
            for &p in pending.iter() {
                let v = p.var();
                if self.seen[&v] {
                    continue;
                }

                let vd = assigns.vardata(v).ok_or(SolverError::NoDerivation(v))?;
                if vd.level == current_level {
                    self.seen[&v] = true;
                    to_clear.push(v);
                    path_count += 1;
                } else if vd.level > GROUND_LEVEL {
                    self.seen[&v] = true;
                    to_clear.push(v);
                    body.push(!p);
                    if vd.level > backtrack_level {
                        backtrack_level = vd.level;
                    }
                }
            }

            // Next frontier variable in reverse trail order.
            let uip = loop {
                if index == 0 {
                    self.clear(&to_clear);
                    return Err(SolverError::NoUip);
                }
                index -= 1;
                let lit = assigns.assign_at(index);
                if self.seen[&lit.var()] {
                    break lit;
                }
            };

            self.seen[&uip.var()] = false;
            path_count -= 1;

            if path_count == 0 {
                body.insert(0, !uip);
                break body.into_boxed_slice();
            }

            match assigns.vardata(uip.var()) {
                None => {
                    self.clear(&to_clear);
                    return Err(SolverError::NoDerivation(uip.var()));
                }
                Some(vd) => match vd.reason {
                    Reason::Guess => {
                        self.clear(&to_clear);
                        return Err(SolverError::UnexpectedGuess(uip.var()));
                    }
                    Reason::Derived(ref antecedents) => {
                        pending = &antecedents[..];
                    }
                },
            }
        };

        self.clear(&to_clear);
        Ok(LearnedClause {
            lits: learned,
            backtrack_level,
        })
    }

    fn clear(&mut self, vars: &[Var]) {
        for v in vars.iter() {
            self.seen[v] = false;
        }
    }
}
