use std::collections::VecDeque;
use std::sync::Arc;

use kurbo::Rect;
use serde::Serialize;

use crate::composition::model::Composition;
use crate::cursor::resolver::{LayoutSurface, TargetLookup, resolve_all_targets};
use crate::foundation::hash::{ContentHash, StableHasher};

/// Sizing for [`TargetCache`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TargetCacheOpts {
    /// Maximum number of lookups kept (at least one is always kept).
    pub capacity: usize,
}

impl Default for TargetCacheOpts {
    fn default() -> Self {
        Self { capacity: 8 }
    }
}

/// Counters since construction (or the last [`TargetCache::clear`]).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TargetCacheStats {
    /// Lookups served from the cache.
    pub hits: u64,
    /// Lookups that had to be resolved.
    pub misses: u64,
    /// Entries dropped to stay within capacity.
    pub evictions: u64,
}

/// Owned cache of bulk cursor-target lookups.
///
/// Keys are content hashes of everything resolution depends on: the cursor keyframes, the
/// canvas, the preview rect and a caller-supplied layout revision. Bump the revision whenever
/// the host's layout changes. The least recently used entry is evicted first.
#[derive(Debug)]
pub struct TargetCache {
    opts: TargetCacheOpts,
    // front = least recently used
    entries: VecDeque<(ContentHash, Arc<TargetLookup>)>,
    stats: TargetCacheStats,
}

impl Default for TargetCache {
    fn default() -> Self {
        Self::new(TargetCacheOpts::default())
    }
}

impl TargetCache {
    /// Empty cache.
    pub fn new(opts: TargetCacheOpts) -> Self {
        Self {
            opts,
            entries: VecDeque::new(),
            stats: TargetCacheStats::default(),
        }
    }

    /// Cache key for resolving `comp` against a surface measured at `preview`.
    pub fn key(comp: &Composition, preview: Option<Rect>, layout_revision: u64) -> ContentHash {
        let mut h = StableHasher::new();
        h.write_u32(comp.width);
        h.write_u32(comp.height);
        match preview {
            Some(r) => {
                h.write_bool(true);
                for v in [r.x0, r.y0, r.x1, r.y1] {
                    h.write_f64(v);
                }
            }
            None => h.write_bool(false),
        }
        h.write_u64(layout_revision);

        for item in comp.cursor_items() {
            h.write_str(&item.id);
            let keys = item.cursor_keyframes();
            h.write_u64(keys.len() as u64);
            for k in keys {
                h.write_f64(k.frame);
                h.write_opt_str(k.target.as_deref());
                h.write_opt_f64(k.target_offset.map(|v| v.x));
                h.write_opt_f64(k.target_offset.map(|v| v.y));
                h.write_opt_f64(k.x);
                h.write_opt_f64(k.y);
            }
        }
        h.finish()
    }

    /// Cached lookup for `comp` on `surface`, resolving on a miss.
    pub fn get_or_resolve(
        &mut self,
        comp: &Composition,
        surface: &dyn LayoutSurface,
        layout_revision: u64,
    ) -> Arc<TargetLookup> {
        let key = Self::key(comp, surface.preview_rect(), layout_revision);
        self.get_or_insert_with(key, || resolve_all_targets(comp, surface))
    }

    /// Cached lookup for `key`, computing it with `resolve` on a miss.
    pub fn get_or_insert_with<F>(&mut self, key: ContentHash, resolve: F) -> Arc<TargetLookup>
    where
        F: FnOnce() -> TargetLookup,
    {
        if let Some(pos) = self.entries.iter().position(|(k, _)| *k == key)
            && let Some(entry) = self.entries.remove(pos)
        {
            self.stats.hits += 1;
            let lookup = Arc::clone(&entry.1);
            self.entries.push_back(entry);
            return lookup;
        }

        self.stats.misses += 1;
        let lookup = Arc::new(resolve());
        self.entries.push_back((key, Arc::clone(&lookup)));
        while self.entries.len() > self.opts.capacity.max(1) {
            if let Some((evicted, _)) = self.entries.pop_front() {
                self.stats.evictions += 1;
                tracing::debug!(key = ?evicted, "evicted cursor target lookup");
            }
        }
        lookup
    }

    /// Drop the entry for `key`. Returns whether it was present.
    pub fn invalidate(&mut self, key: ContentHash) -> bool {
        match self.entries.iter().position(|(k, _)| *k == key) {
            Some(pos) => {
                self.entries.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Drop every entry and reset the counters.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.stats = TargetCacheStats::default();
    }

    /// Number of cached lookups.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds nothing.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Hit, miss and eviction counters.
    pub fn stats(&self) -> TargetCacheStats {
        self.stats
    }
}

#[cfg(test)]
#[path = "../../tests/unit/cursor/cache.rs"]
mod tests;
