use std::sync::atomic;


// Resource constraints, checked once per solver loop iteration.
pub struct Budget {
    conflict_budget: i64,    // -1 means no budget.
    propagation_budget: i64, // -1 means no budget.
    asynch_interrupt: atomic::AtomicBool,
}

impl Budget {
    pub fn new() -> Budget {
        Budget {
            conflict_budget: -1,
            propagation_budget: -1,
            asynch_interrupt: atomic::AtomicBool::new(false),
        }
    }

    pub fn within(&self, conflicts: u64, propagations: u64) -> bool {
        !self.asynch_interrupt.load(atomic::Ordering::Relaxed)
            && (self.conflict_budget < 0 || conflicts < self.conflict_budget as u64)
            && (self.propagation_budget < 0 || propagations < self.propagation_budget as u64)
    }

    pub fn interrupted(&self) -> bool {
        self.asynch_interrupt.load(atomic::Ordering::Relaxed)
    }

    pub fn interrupt(&self) {
        self.asynch_interrupt.store(true, atomic::Ordering::Relaxed);
    }

    pub fn set_conflict_budget(&mut self, conflicts: i64) {
        self.conflict_budget = conflicts;
    }

    pub fn set_propagation_budget(&mut self, propagations: i64) {
        self.propagation_budget = propagations;
    }

    pub fn off(&mut self) {
        self.conflict_budget = -1;
        self.propagation_budget = -1;
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_budget_is_unlimited() {
        let budget = Budget::new();
        assert!(budget.within(1_000_000, 1_000_000));
        assert!(!budget.interrupted());
    }

    #[test]
    fn conflict_budget_is_enforced() {
        let mut budget = Budget::new();
        budget.set_conflict_budget(10);
        assert!(budget.within(9, 0));
        assert!(!budget.within(10, 0));
    }

    #[test]
    fn interrupt_flag_overrides_budgets() {
        let budget = Budget::new();
        budget.interrupt();
        assert!(!budget.within(0, 0));
    }
}
