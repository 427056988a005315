use ahash::AHashMap;

use crate::scan::LocalMapping;
use crate::stats::Statistics;

/// Run-wide key → statistics table. Keys are owned, so the mapping outlives
/// the input view it was built from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FinalMapping {
    stations: AHashMap<Box<[u8]>, Statistics>,
}

impl FinalMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    pub fn get(&self, key: &[u8]) -> Option<&Statistics> {
        self.stations.get(key)
    }

    /// Total number of lines folded into this mapping.
    pub fn rows(&self) -> u64 {
        self.stations.values().map(|s| s.count).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&[u8], &Statistics)> {
        self.stations.iter().map(|(k, v)| (&**k, v))
    }

    /// Entries in byte-wise ascending key order.
    pub fn sorted(&self) -> Vec<(&[u8], &Statistics)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
        entries
    }

    /// Folds one worker's table into this one.
    pub fn absorb(&mut self, local: LocalMapping<'_>) {
        for (station, stats) in local {
            match self.stations.get_mut(station) {
                Some(existing) => existing.merge(&stats),
                None => {
                    self.stations.insert(station.into(), stats);
                }
            }
        }
    }
}

/// Merges worker tables in the order given. The result does not depend on
/// that order.
pub fn merge_mappings<'a, I>(locals: I) -> FinalMapping
where
    I: IntoIterator<Item = LocalMapping<'a>>,
{
    locals.into_iter().fold(FinalMapping::new(), |mut global, local| {
        global.absorb(local);
        global
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::Decimal;

    fn local<'a>(rows: &[(&'a str, i64)]) -> LocalMapping<'a> {
        let mut map = LocalMapping::default();
        for &(key, scaled) in rows {
            let value = Decimal::from_scaled(scaled);
            map.entry(key.as_bytes())
                .and_modify(|s: &mut Statistics| s.record(value))
                .or_insert_with(|| Statistics::new(value));
        }
        map
    }

    #[test]
    fn combines_shared_keys() {
        let merged = merge_mappings([
            local(&[("a", 100), ("b", 200)]),
            local(&[("a", -300), ("c", 50)]),
        ]);
        assert_eq!(merged.len(), 3);
        assert_eq!(merged.rows(), 4);

        let a = merged.get(b"a").unwrap();
        assert_eq!(a.count, 2);
        assert_eq!(a.min, Decimal::from_scaled(-300));
        assert_eq!(a.max, Decimal::from_scaled(100));
        assert_eq!(a.sum, Decimal::from_scaled(-200));
    }

    #[test]
    fn order_of_locals_does_not_matter() {
        let parts = || {
            vec![
                local(&[("x", 1), ("y", 2), ("x", 3)]),
                local(&[]),
                local(&[("y", -7), ("z", 9)]),
                local(&[("x", 99_999), ("z", -99_999)]),
            ]
        };

        let forward = merge_mappings(parts());
        let backward = merge_mappings(parts().into_iter().rev());
        let mut rotated = parts();
        rotated.rotate_left(2);
        let rotated = merge_mappings(rotated);

        assert_eq!(forward, backward);
        assert_eq!(forward, rotated);
    }

    #[test]
    fn sorted_orders_by_raw_bytes() {
        let merged = merge_mappings([local(&[("b", 1), ("B", 1), ("a", 1), ("ä", 1)])]);
        let keys: Vec<_> = merged.sorted().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec![&b"B"[..], &b"a"[..], &b"b"[..], "ä".as_bytes()]);
    }

    #[test]
    fn no_locals_means_empty_mapping() {
        let merged = merge_mappings(Vec::<LocalMapping<'_>>::new());
        assert!(merged.is_empty());
        assert_eq!(merged.rows(), 0);
    }
}
