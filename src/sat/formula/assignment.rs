use std::fmt;
use super::{Lit, Var, VarMap};


#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug)]
pub struct DecisionLevel(usize);

pub const GROUND_LEVEL: DecisionLevel = DecisionLevel(0);

impl DecisionLevel {
    pub fn offset(&self) -> usize {
        self.0
    }
}


#[derive(PartialEq, Eq, Clone, Copy, Debug)]
#[repr(u8)]
pub enum LBool {
    Undef,
    False,
    True,
}

impl LBool {
    #[inline]
    fn is_undef(&self) -> bool {
        match *self {
            LBool::Undef => true,
            _ => false,
        }
    }
}


/// Why an assigned variable holds its value. `Derived` carries the literals
/// that jointly forced it, i.e. the negations of the forcing clause's
/// falsified literals; all of them are true under the assignment and sit
/// earlier on the trail.
#[derive(Clone, Debug)]
pub enum Reason {
    Guess,
    Derived(Box<[Lit]>),
}

#[derive(Debug)]
pub struct VarData {
    pub reason: Reason,
    pub level: DecisionLevel,
}


struct VarLine {
    assign: [LBool; 2],
    vd: Option<VarData>,
}

/// Assignment state plus the leveled trail and the derivation graph arena.
/// A variable carries a `VarData` node iff it has a defined value; the two
/// are set and cleared together, and the trail flattens to a topological
/// order of the graph.
pub struct Assignment {
    assignment: Vec<VarLine>,
    trail: Vec<Lit>,
    lim: Vec<usize>,
}

impl Assignment {
    pub fn new() -> Assignment {
        Assignment {
            assignment: Vec::new(),
            trail: Vec::new(),
            lim: Vec::new(),
        }
    }


    #[inline]
    pub fn number_of_vars(&self) -> usize {
        self.assignment.len()
    }

    #[inline]
    pub fn number_of_assigns(&self) -> usize {
        self.trail.len()
    }


    pub fn new_var(&mut self) -> Var {
        self.assignment.push(VarLine {
            assign: [LBool::Undef, LBool::Undef],
            vd: None,
        });
        Var::from_index(self.assignment.len() - 1)
    }


    #[inline]
    pub fn decision_level(&self) -> DecisionLevel {
        DecisionLevel(self.lim.len())
    }

    #[inline]
    pub fn is_ground_level(&self) -> bool {
        self.lim.is_empty()
    }

    #[inline]
    pub fn new_decision_level(&mut self) {
        self.lim.push(self.trail.len());
    }


    #[inline]
    pub fn assign_lit(&mut self, lit: Lit, reason: Reason) {
        let level = DecisionLevel(self.lim.len());
        let line = &mut self.assignment[lit.var_index()];

        assert!(line.assign[0].is_undef());
        line.assign[lit.sign_index()] = LBool::True;
        line.assign[lit.sign_index() ^ 1] = LBool::False;
        line.vd = Some(VarData { reason, level });
        self.trail.push(lit);
    }

    /// Pops whole decision-level frames until the current level is at most
    /// `target_level`, clearing each popped literal's value and graph node
    /// together. `f` sees every unassigned literal.
    #[inline]
    pub fn rewind_until_level<F: FnMut(Lit) -> ()>(
        &mut self,
        DecisionLevel(target_level): DecisionLevel,
        mut f: F,
    ) {
        while self.lim.len() > target_level {
            let bottom = self.lim.pop().unwrap();
            while self.trail.len() > bottom {
                let lit = self.trail.pop().unwrap();

                f(lit);

                let line = &mut self.assignment[lit.var_index()];
                line.assign = [LBool::Undef, LBool::Undef];
                line.vd = None;
            }
        }
    }


    #[inline]
    pub fn assign_at(&self, index: usize) -> Lit {
        self.trail[index]
    }

    #[inline]
    pub fn trail(&self) -> &[Lit] {
        &self.trail
    }


    #[inline]
    pub fn is_undef(&self, var: Var) -> bool {
        self.assignment[var.index()].assign[0].is_undef()
    }

    #[inline]
    pub fn is_assigned_pos(&self, p: Lit) -> bool {
        match self.of_lit(p) {
            LBool::True => true,
            _ => false,
        }
    }

    #[inline]
    pub fn is_assigned_neg(&self, p: Lit) -> bool {
        match self.of_lit(p) {
            LBool::False => true,
            _ => false,
        }
    }

    #[inline]
    pub fn of_lit(&self, lit: Lit) -> LBool {
        self.assignment[lit.var_index()].assign[lit.sign_index()]
    }

    #[inline]
    pub fn vardata(&self, var: Var) -> Option<&VarData> {
        self.assignment[var.index()].vd.as_ref()
    }
}

impl fmt::Debug for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for level in 0..1 + self.lim.len() {
            let l = if level > 0 { self.lim[level - 1] } else { 0 };
            let r = if level < self.lim.len() {
                self.lim[level]
            } else {
                self.trail.len()
            };

            if r > l {
                write!(f, "[{}:", level)?;
                for lit in self.trail[l..r].iter() {
                    write!(f, " {:?}", lit)?;
                }
                write!(f, " ]")?;
            }
        }

        Ok(())
    }
}


pub fn progress_estimate(assigns: &Assignment) -> f64 {
    if assigns.number_of_vars() == 0 {
        return 1.0;
    }

    let f = 1.0 / (assigns.number_of_vars() as f64);
    let mut progress = 0.0;

    let cl = assigns.lim.len();
    for level in 0..cl + 1 {
        let l = if level == 0 {
            0
        } else {
            assigns.lim[level - 1]
        };
        let r = if level == cl {
            assigns.trail.len()
        } else {
            assigns.lim[level]
        };
        progress += f.powi(level as i32) * ((r - l) as f64);
    }
    progress * f
}


pub fn extract_model(assigns: &Assignment) -> VarMap<bool> {
    let mut model = VarMap::new();
    for i in 0..assigns.assignment.len() {
        match assigns.assignment[i].assign[0] {
            LBool::Undef => {}
            LBool::False => {
                model.insert(&Var::from_index(i), false);
            }
            LBool::True => {
                model.insert(&Var::from_index(i), true);
            }
        }
    }
    model
}
