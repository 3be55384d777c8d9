use std::collections::BTreeMap;

/// Ordered breakpoints of the coverage step function.
pub(crate) type RunMap = BTreeMap<i64, u32>;

/// Step-function value at `pos`: the count of the greatest key `<= pos`.
///
/// Returns `None` only when `pos` lies before the first key.
pub(crate) fn value_at(runs: &RunMap, pos: i64) -> Option<u32> {
    runs.range(..=pos).next_back().map(|(_, &count)| count)
}

/// Count of the greatest key strictly below `pos`.
pub(crate) fn value_before(runs: &RunMap, pos: i64) -> Option<u32> {
    runs.range(..pos).next_back().map(|(_, &count)| count)
}

/// Makes `pos` a breakpoint without changing the represented function.
///
/// Returns whether a new key was inserted. `pos` must not precede the first key.
pub(crate) fn split_at(runs: &mut RunMap, pos: i64) -> bool {
    if runs.contains_key(&pos) {
        return false;
    }
    match value_before(runs, pos) {
        Some(count) => {
            runs.insert(pos, count);
            true
        }
        None => false,
    }
}

/// Adds one (capped at `cap`) to every run starting in `[from, to)`.
pub(crate) fn bump_range(runs: &mut RunMap, from: i64, to: i64, cap: u32) {
    if from >= to {
        return;
    }
    for count in runs.range_mut(from..to).map(|(_, count)| count) {
        *count = count.saturating_add(1).min(cap);
    }
}

/// Forward pass over keys in `[from, to]` that drops every key whose count equals the live
/// count of its predecessor. Returns the number of keys removed.
pub(crate) fn merge_equal_neighbors(runs: &mut RunMap, from: i64, to: i64) -> usize {
    let mut prev = value_before(runs, from);
    let mut redundant = Vec::new();
    for (&key, &count) in runs.range(from..=to) {
        if prev == Some(count) {
            redundant.push(key);
        } else {
            prev = Some(count);
        }
    }
    for key in &redundant {
        runs.remove(key);
    }
    redundant.len()
}

/// Pops leading runs that reached `cap`. Returns how many were removed.
///
/// The tail run always holds `0`, so with `cap > 0` the map never empties.
pub(crate) fn drop_saturated_prefix(runs: &mut RunMap, cap: u32) -> usize {
    let mut removed = 0;
    while runs.len() > 1 {
        match runs.first_key_value() {
            Some((_, &count)) if count >= cap => {
                runs.pop_first();
                removed += 1;
            }
            _ => break,
        }
    }
    removed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(i64, u32)]) -> RunMap {
        pairs.iter().copied().collect()
    }

    #[test]
    fn lookups_respect_step_semantics() {
        let runs = map(&[(0, 1), (4, 2), (9, 0)]);
        assert_eq!(value_at(&runs, -1), None);
        assert_eq!(value_at(&runs, 0), Some(1));
        assert_eq!(value_at(&runs, 3), Some(1));
        assert_eq!(value_at(&runs, 4), Some(2));
        assert_eq!(value_at(&runs, 1_000), Some(0));
        assert_eq!(value_before(&runs, 4), Some(1));
        assert_eq!(value_before(&runs, 0), None);
    }

    #[test]
    fn split_keeps_function_intact() {
        let mut runs = map(&[(0, 1), (9, 0)]);
        assert!(split_at(&mut runs, 5));
        assert!(!split_at(&mut runs, 5));
        assert!(!split_at(&mut runs, -3));
        assert_eq!(runs, map(&[(0, 1), (5, 1), (9, 0)]));
    }

    #[test]
    fn bump_caps_each_run() {
        let mut runs = map(&[(0, 1), (3, 3), (6, 2), (9, 0)]);
        bump_range(&mut runs, 0, 9, 3);
        assert_eq!(runs, map(&[(0, 2), (3, 3), (6, 3), (9, 0)]));
    }

    #[test]
    fn merge_reads_live_predecessors() {
        let mut runs = map(&[(0, 2), (3, 2), (6, 2), (8, 1), (9, 0)]);
        let removed = merge_equal_neighbors(&mut runs, 3, 9);
        assert_eq!(removed, 2);
        assert_eq!(runs, map(&[(0, 2), (8, 1), (9, 0)]));
    }

    #[test]
    fn saturated_prefix_is_dropped_but_tail_survives() {
        let mut runs = map(&[(0, 3), (2, 3), (5, 1), (7, 0)]);
        assert_eq!(drop_saturated_prefix(&mut runs, 3), 2);
        assert_eq!(runs.first_key_value(), Some((&5, &1)));

        let mut tail_only = map(&[(0, 0)]);
        assert_eq!(drop_saturated_prefix(&mut tail_only, 1), 0);
        assert_eq!(tail_only.len(), 1);
    }
}
