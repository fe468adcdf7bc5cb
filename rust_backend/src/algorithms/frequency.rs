use serde::Serialize;
use std::collections::HashMap;
use std::hash::Hash;

/// A most-frequent value together with how often it occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ModeCount<T> {
    pub value: T,
    pub count: usize,
}

impl<T> ModeCount<T> {
    pub fn new(value: T, count: usize) -> Self {
        Self { value, count }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ModeCount<U> {
        ModeCount {
            value: f(self.value),
            count: self.count,
        }
    }
}

/// Occurrence counts that remember the order keys were first seen in.
///
/// Ties are always resolved in favour of the key encountered first, which
/// makes both [`mode`](Self::mode) and
/// [`into_distribution`](Self::into_distribution) deterministic without
/// sorting on the keys themselves.
#[derive(Debug, Clone)]
pub struct FrequencyTable<K> {
    positions: HashMap<K, usize>,
    entries: Vec<(K, usize)>,
}

impl<K: Eq + Hash + Clone> Default for FrequencyTable<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash + Clone> FrequencyTable<K> {
    pub fn new() -> Self {
        Self {
            positions: HashMap::new(),
            entries: Vec::new(),
        }
    }

    pub fn observe(&mut self, key: K) {
        self.observe_n(key, 1);
    }

    pub fn observe_n(&mut self, key: K, n: usize) {
        match self.positions.get(&key) {
            Some(&position) => self.entries[position].1 += n,
            None => {
                self.positions.insert(key.clone(), self.entries.len());
                self.entries.push((key, n));
            }
        }
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn count(&self, key: &K) -> usize {
        self.positions
            .get(key)
            .map(|&position| self.entries[position].1)
            .unwrap_or(0)
    }

    /// Highest-count key; the first-encountered one wins a tie
    pub fn mode(&self) -> Option<ModeCount<&K>> {
        let mut best: Option<&(K, usize)> = None;
        for entry in &self.entries {
            if best.map_or(true, |b| entry.1 > b.1) {
                best = Some(entry);
            }
        }
        best.map(|(key, count)| ModeCount::new(key, *count))
    }

    /// All keys by descending count, ties in first-encountered order
    pub fn into_distribution(self) -> Vec<(K, usize)> {
        let mut entries = self.entries;
        // stable sort keeps encounter order within equal counts
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        entries
    }
}

impl<K: Eq + Hash + Clone> FromIterator<K> for FrequencyTable<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut table = FrequencyTable::new();
        for key in iter {
            table.observe(key);
        }
        table
    }
}

/// Index of the largest count, preferring the lowest index on ties.
/// Returns `None` when every count is zero.
pub fn first_max_index(counts: &[usize]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (index, &count) in counts.iter().enumerate() {
        if count > 0 && best.map_or(true, |b| count > counts[b]) {
            best = Some(index);
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_prefers_first_encountered() {
        let table: FrequencyTable<&str> = ["b", "a", "a", "b", "c"].into_iter().collect();
        let mode = table.mode().unwrap();
        assert_eq!(*mode.value, "b");
        assert_eq!(mode.count, 2);
    }

    #[test]
    fn test_mode_of_empty_table() {
        let table: FrequencyTable<u32> = FrequencyTable::new();
        assert!(table.mode().is_none());
        assert!(table.is_empty());
    }

    #[test]
    fn test_distribution_order() {
        let table: FrequencyTable<&str> = ["x", "y", "z", "y", "z", "w", "w", "w"]
            .into_iter()
            .collect();
        assert_eq!(table.count(&"w"), 3);
        assert_eq!(table.count(&"missing"), 0);
        assert_eq!(
            table.into_distribution(),
            vec![("w", 3), ("y", 2), ("z", 2), ("x", 1)]
        );
    }

    #[test]
    fn test_observe_n() {
        let mut table = FrequencyTable::new();
        table.observe("a");
        table.observe_n("b", 4);
        table.observe_n("a", 2);
        assert_eq!(table.len(), 2);
        assert_eq!(table.mode().map(|m| (*m.value, m.count)), Some(("b", 4)));
    }

    #[test]
    fn test_first_max_index() {
        assert_eq!(first_max_index(&[0, 2, 0, 2]), Some(1));
        assert_eq!(first_max_index(&[1, 0, 3]), Some(2));
        assert_eq!(first_max_index(&[0, 0, 0]), None);
        assert_eq!(first_max_index(&[]), None);
    }
}
