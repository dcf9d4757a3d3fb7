use indexmap::IndexMap;
use ordered_float::OrderedFloat;

/// Runtime metrics exposed by the tick label cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LabelCacheStats {
    pub hits: u64,
    pub misses: u64,
    pub size: usize,
}

/// Label text keyed by tick value, evicted oldest first.
#[derive(Debug, Default)]
pub(crate) struct LabelCache {
    entries: IndexMap<OrderedFloat<f64>, String>,
    hits: u64,
    misses: u64,
}

impl LabelCache {
    pub(crate) const MAX_ENTRIES: usize = 4096;

    pub(crate) fn get_or_insert_with(
        &mut self,
        value: f64,
        format: impl FnOnce(f64) -> String,
    ) -> String {
        let key = OrderedFloat(value);
        if let Some(text) = self.entries.get(&key) {
            self.hits = self.hits.saturating_add(1);
            return text.clone();
        }

        self.misses = self.misses.saturating_add(1);
        if self.entries.len() >= Self::MAX_ENTRIES {
            self.entries.shift_remove_index(0);
        }
        let text = format(value);
        self.entries.insert(key, text.clone());
        text
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    pub(crate) fn stats(&self) -> LabelCacheStats {
        LabelCacheStats {
            hits: self.hits,
            misses: self.misses,
            size: self.entries.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::LabelCache;

    #[test]
    fn repeated_values_hit_the_cache() {
        let mut cache = LabelCache::default();
        let mut calls = 0;
        for _ in 0..3 {
            let text = cache.get_or_insert_with(2.5, |v| {
                calls += 1;
                format!("{v}")
            });
            assert_eq!(text, "2.5");
        }
        assert_eq!(calls, 1);

        let stats = cache.stats();
        assert_eq!(stats.hits, 2);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.size, 1);
    }

    #[test]
    fn oldest_entry_is_evicted_at_capacity() {
        let mut cache = LabelCache::default();
        for i in 0..=LabelCache::MAX_ENTRIES {
            cache.get_or_insert_with(i as f64, |v| format!("{v}"));
        }
        assert_eq!(cache.stats().size, LabelCache::MAX_ENTRIES);

        cache.get_or_insert_with(0.0, |_| "again".to_owned());
        assert_eq!(cache.stats().hits, 0);
    }
}
