//! Unlock policy
//!
//! Pure mapping from a gem total to the set of accessible zones. No I/O, no
//! state; the controller re-evaluates it after every completion and once at
//! startup from the persisted profile.

use crate::data::ModuleId;
use std::collections::{BTreeMap, BTreeSet};

/// Every module whose threshold is within reach of `gems`.
///
/// The starter module is always included, whatever the gem count says.
pub fn accessible_modules(gems: u32, thresholds: &BTreeMap<ModuleId, u32>) -> BTreeSet<ModuleId> {
    let mut open = BTreeSet::new();
    open.insert(ModuleId::starter());
    for (module, threshold) in thresholds {
        if *threshold <= gems {
            open.insert(*module);
        }
    }
    open
}

#[cfg(test)]
mod tests {
    use super::*;

    fn thresholds() -> BTreeMap<ModuleId, u32> {
        let mut t = BTreeMap::new();
        t.insert(ModuleId::PhonicsForest, 0);
        t.insert(ModuleId::SentenceSummit, 10);
        t.insert(ModuleId::StorySea, 20);
        t
    }

    #[test]
    fn starter_is_always_accessible() {
        for gems in [0, 1, 9, 10, 1000] {
            assert!(accessible_modules(gems, &thresholds()).contains(&ModuleId::PhonicsForest));
        }
        // Even with an empty threshold table.
        assert!(accessible_modules(0, &BTreeMap::new()).contains(&ModuleId::PhonicsForest));
    }

    #[test]
    fn thresholds_gate_exactly() {
        let t = thresholds();

        let at_9 = accessible_modules(9, &t);
        assert_eq!(at_9.len(), 1);
        assert!(at_9.contains(&ModuleId::PhonicsForest));

        let at_10 = accessible_modules(10, &t);
        assert_eq!(at_10.len(), 2);
        assert!(at_10.contains(&ModuleId::SentenceSummit));

        let at_25 = accessible_modules(25, &t);
        assert_eq!(at_25.len(), 3);
        assert!(at_25.contains(&ModuleId::StorySea));
    }

    #[test]
    fn access_is_monotone_in_gems() {
        let t = thresholds();
        let mut previous = accessible_modules(0, &t);
        for gems in 1..=40 {
            let current = accessible_modules(gems, &t);
            assert!(
                previous.is_subset(&current),
                "module became inaccessible at {gems} gems"
            );
            previous = current;
        }
    }
}
