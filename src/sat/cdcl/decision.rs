use crate::sat::formula::{Lit, Var, VarHeap, VarMap};
use crate::sat::formula::assignment::Assignment;


#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum HeuristicMode {
    /// Lowest-indexed unassigned variable, polarity true.
    Naive,
    /// VSIDS-style activity scoring with periodic decay.
    Activity,
}

pub struct DecisionSettings {
    pub mode: HeuristicMode,
    pub var_decay: f64,      // Scores are multiplied by this on each decay.
    pub decay_interval: u64, // Number of conflicts between decays.
    pub phase_saving: bool,  // Reuse the last assigned polarity on re-decision.
}

impl Default for DecisionSettings {
    fn default() -> Self {
        DecisionSettings {
            mode: HeuristicMode::Activity,
            var_decay: 0.95,
            decay_interval: 1,
            phase_saving: true,
        }
    }
}


/// Picks the next guess. The solver loop reports every learned clause and
/// every literal unassigned by backtracking, so activity-based strategies see
/// the full conflict history, not only decision points.
pub trait DecisionHeuristic {
    fn init_var(&mut self, v: Var);
    fn clause_learned(&mut self, clause: &[Lit]);
    fn cancel(&mut self, lit: Lit);
    fn pick_branch_lit(&mut self, assigns: &Assignment) -> Option<Lit>;
}

pub fn create(settings: DecisionSettings) -> Box<dyn DecisionHeuristic> {
    match settings.mode {
        HeuristicMode::Naive => Box::new(NaiveHeuristic::new()),
        HeuristicMode::Activity => Box::new(ActivityHeuristic::new(settings)),
    }
}


pub struct NaiveHeuristic {
    n_vars: usize,
}

impl NaiveHeuristic {
    pub fn new() -> NaiveHeuristic {
        NaiveHeuristic { n_vars: 0 }
    }
}

impl DecisionHeuristic for NaiveHeuristic {
    fn init_var(&mut self, v: Var) {
        debug_assert_eq!(v.index(), self.n_vars);
        self.n_vars += 1;
    }

    fn clause_learned(&mut self, _clause: &[Lit]) {}

    fn cancel(&mut self, _lit: Lit) {}

    fn pick_branch_lit(&mut self, assigns: &Assignment) -> Option<Lit> {
        for index in 0..self.n_vars {
            let v = Var::from_index(index);
            if assigns.is_undef(v) {
                return Some(v.pos_lit());
            }
        }
        None
    }
}


pub struct ActivityHeuristic {
    settings: DecisionSettings,
    var_inc: f64, // Amount to bump next variable with.
    conflicts: u64,
    activity: VarMap<f64>,
    phase: VarMap<bool>, // Saved sign per variable.
    queue: VarHeap,      // Variables ordered by activity, ties to lowest index.
}

impl ActivityHeuristic {
    pub fn new(settings: DecisionSettings) -> ActivityHeuristic {
        ActivityHeuristic {
            settings,
            var_inc: 1.0,
            conflicts: 0,
            activity: VarMap::new(),
            phase: VarMap::new(),
            queue: VarHeap::new(),
        }
    }

    fn bump_activity(&mut self, v: &Var) {
        let new = self.activity[v] + self.var_inc;
        if new > 1e100 {
            // Rescale everything instead of overflowing.
            self.var_inc *= 1e-100;
            for (_, act) in self.activity.iter_mut() {
                *act *= 1e-100;
            }
            self.activity[v] = new * 1e-100;
        } else {
            self.activity[v] = new;
        }

        let act = &self.activity;
        self.queue.update(v, |a, b| before(act, a, b));
    }
}

#[inline]
fn before(act: &VarMap<f64>, a: &Var, b: &Var) -> bool {
    act[a] > act[b] || (act[a] == act[b] && a.index() < b.index())
}

impl DecisionHeuristic for ActivityHeuristic {
    fn init_var(&mut self, v: Var) {
        self.activity.insert(&v, 0.0);
        self.phase.insert(&v, false);
        let act = &self.activity;
        self.queue.insert(v, |a, b| before(act, a, b));
    }

    fn clause_learned(&mut self, clause: &[Lit]) {
        for lit in clause.iter() {
            self.bump_activity(&lit.var());
        }

        self.conflicts += 1;
        if self.conflicts % self.settings.decay_interval == 0 {
            // Growing the increment is equivalent to decaying every score.
            self.var_inc *= 1.0 / self.settings.var_decay;
        }
    }

    fn cancel(&mut self, lit: Lit) {
        if self.settings.phase_saving {
            self.phase[&lit.var()] = lit.sign();
        }
        let act = &self.activity;
        self.queue.insert(lit.var(), |a, b| before(act, a, b));
    }

    fn pick_branch_lit(&mut self, assigns: &Assignment) -> Option<Lit> {
        while let Some(v) = {
            let act = &self.activity;
            self.queue.pop(|a, b| before(act, a, b))
        } {
            if assigns.is_undef(v) {
                return Some(v.lit(self.phase[&v]));
            }
        }

        None
    }
}
