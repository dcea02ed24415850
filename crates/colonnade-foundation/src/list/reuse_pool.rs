//! Bounded per-identifier pools of recyclable view handles.
//!
//! Views that scroll off screen are detached from their item and
//! parked here under their reuse identifier, so the host can dequeue
//! them instead of building new ones.

use rustc_hash::FxHashMap;

use crate::view::ViewHandle;

/// Default number of handles kept per reuse identifier.
/// Matches RecyclerView's default cache size.
pub const DEFAULT_POOL_LIMIT: usize = 7;

/// Per-identifier stacks of detached view handles.
///
/// Checkout pops the most recently returned handle, favoring warm
/// views. Checkin pushes while the identifier's pool is under its
/// limit and discards otherwise; pools never grow past their limit.
#[derive(Debug)]
pub struct ReusePool {
    pools: FxHashMap<String, Vec<ViewHandle>>,
    default_limit: usize,
    limits: FxHashMap<String, usize>,
}

impl Default for ReusePool {
    fn default() -> Self {
        Self::new()
    }
}

impl ReusePool {
    pub fn new() -> Self {
        Self::with_default_limit(DEFAULT_POOL_LIMIT)
    }

    pub fn with_default_limit(limit: usize) -> Self {
        Self {
            pools: FxHashMap::default(),
            default_limit: limit,
            limits: FxHashMap::default(),
        }
    }

    /// Limit applying to an identifier: its override, or the global
    /// default.
    pub fn limit_for(&self, reuse_id: &str) -> usize {
        self.limits
            .get(reuse_id)
            .copied()
            .unwrap_or(self.default_limit)
    }

    /// Sets the global default limit and trims pools that now exceed
    /// theirs.
    pub fn set_default_limit(&mut self, limit: usize) {
        self.default_limit = limit;
        self.trim();
    }

    /// Overrides the limit for one identifier and trims its pool.
    pub fn set_limit(&mut self, reuse_id: &str, limit: usize) {
        self.limits.insert(reuse_id.to_owned(), limit);
        if let Some(pool) = self.pools.get_mut(reuse_id) {
            trim_pool(pool, limit);
        }
    }

    /// Most recently returned handle for the identifier, if any.
    pub fn checkout(&mut self, reuse_id: &str) -> Option<ViewHandle> {
        self.pools.get_mut(reuse_id)?.pop()
    }

    /// Parks a handle for reuse. Returns whether it was retained; a
    /// full pool discards the handle instead of growing.
    pub fn checkin(&mut self, reuse_id: &str, handle: ViewHandle) -> bool {
        let limit = self.limit_for(reuse_id);
        let pool = self.pools.entry(reuse_id.to_owned()).or_default();
        if pool.len() < limit {
            pool.push(handle);
            true
        } else {
            log::debug!(
                "reuse pool {:?} is at its limit of {}, discarding view {:?}",
                reuse_id,
                limit,
                handle.id
            );
            false
        }
    }

    /// Releases every pooled handle. Call on memory pressure.
    pub fn flush(&mut self) {
        self.pools.clear();
    }

    /// Number of handles pooled under the identifier.
    pub fn pooled(&self, reuse_id: &str) -> usize {
        self.pools.get(reuse_id).map_or(0, Vec::len)
    }

    pub fn total_pooled(&self) -> usize {
        self.pools.values().map(Vec::len).sum()
    }

    fn trim(&mut self) {
        let default_limit = self.default_limit;
        let limits = &self.limits;
        for (reuse_id, pool) in self.pools.iter_mut() {
            let limit = limits.get(reuse_id).copied().unwrap_or(default_limit);
            trim_pool(pool, limit);
        }
    }
}

/// Drops the oldest handles so the warm end of the stack survives.
fn trim_pool(pool: &mut Vec<ViewHandle>, limit: usize) {
    if pool.len() > limit {
        pool.drain(..pool.len() - limit);
    }
}
