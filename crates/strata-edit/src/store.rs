use std::collections::HashMap;

use strata_world::ChunkCoord;

#[derive(Default, Debug, Clone, Copy)]
pub struct EditStoreStats {
    pub edits: u64,
    pub rev_entries: usize,
    pub built_entries: usize,
    pub pending: usize,
}

/// Per-chunk change tracking: the latest edit stamp that touched a chunk and
/// the stamp its current mesh was built from.
#[derive(Default, Debug)]
pub struct EditStore {
    rev: HashMap<ChunkCoord, u64>,
    built: HashMap<ChunkCoord, u64>,
    counter: u64,
}

impl EditStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> EditStoreStats {
        let pending = self
            .rev
            .iter()
            .filter(|(c, r)| **r > self.get_built_rev(**c))
            .count();
        EditStoreStats {
            edits: self.counter,
            rev_entries: self.rev.len(),
            built_entries: self.built.len(),
            pending,
        }
    }

    /// Stamps every chunk in `coords` with a new monotonically increasing revision.
    pub fn bump(&mut self, coords: &[ChunkCoord]) -> u64 {
        self.counter = self.counter.wrapping_add(1).max(1);
        let stamp = self.counter;
        for &c in coords {
            self.rev.insert(c, stamp);
        }
        stamp
    }

    pub fn get_rev(&self, c: ChunkCoord) -> u64 {
        self.rev.get(&c).copied().unwrap_or(0)
    }

    pub fn mark_built(&mut self, c: ChunkCoord, rev: u64) {
        // Only update if this is a newer revision
        let e = self.built.entry(c).or_insert(0);
        if rev > *e {
            *e = rev;
        }
    }

    pub fn needs_rebuild(&self, c: ChunkCoord) -> bool {
        self.get_rev(c) > self.get_built_rev(c)
    }

    pub fn get_built_rev(&self, c: ChunkCoord) -> u64 {
        self.built.get(&c).copied().unwrap_or(0)
    }

    /// True once any edit has touched `c`.
    #[inline]
    pub fn is_edited(&self, c: ChunkCoord) -> bool {
        self.rev.contains_key(&c)
    }

    /// Chunks whose latest edit has not been built yet, sorted.
    pub fn pending(&self) -> Vec<ChunkCoord> {
        let mut out: Vec<ChunkCoord> = self
            .rev
            .keys()
            .copied()
            .filter(|&c| self.needs_rebuild(c))
            .collect();
        out.sort();
        out
    }

    pub fn clear(&mut self) {
        self.rev.clear();
        self.built.clear();
    }
}
