use std::collections::HashMap;

use rand::Rng;

/// Members of one labelled region.
///
/// `slots` answers membership and remembers where each index lives in
/// `members`, so removal is a swap with the last element. `members` is the
/// dense list used for iteration and uniform sampling. Both always hold the
/// same indices.
#[derive(Debug, Clone, Default)]
pub struct RegionTracker {
    slots: HashMap<usize, usize>,
    members: Vec<usize>,
}

impl RegionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        RegionTracker {
            slots: HashMap::with_capacity(capacity),
            members: Vec::with_capacity(capacity),
        }
    }

    pub fn full(count: usize) -> Self {
        let mut region = Self::with_capacity(count);
        for index in 0..count {
            region.insert(index);
        }
        region
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.slots.contains_key(&index)
    }

    pub fn insert(&mut self, index: usize) -> bool {
        if self.slots.contains_key(&index) {
            return false;
        }
        self.slots.insert(index, self.members.len());
        self.members.push(index);
        true
    }

    pub fn remove(&mut self, index: usize) -> bool {
        let Some(slot) = self.slots.remove(&index) else {
            return false;
        };
        self.members.swap_remove(slot);
        if let Some(&moved) = self.members.get(slot) {
            self.slots.insert(moved, slot);
        }
        true
    }

    pub fn sample(&self, rng: &mut impl Rng) -> Option<usize> {
        if self.members.is_empty() {
            return None;
        }
        Some(self.members[rng.gen_range(0..self.members.len())])
    }

    pub fn members(&self) -> &[usize] {
        &self.members
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.members.iter().copied()
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.members.clear();
    }

    /// Replaces the whole membership with every index from `all` that no
    /// `excluded` region claims.
    pub fn rebuild_from(&mut self, all: impl IntoIterator<Item = usize>, excluded: &[&RegionTracker]) {
        self.clear();
        for index in all {
            if !excluded.iter().any(|region| region.contains(index)) {
                self.insert(index);
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegionKind {
    Land,
    Sea,
    Lake,
}

#[derive(Debug, Clone, Default)]
pub struct Regions {
    pub land: RegionTracker,
    pub sea: RegionTracker,
    pub lake: RegionTracker,
}

impl Regions {
    pub fn get(&self, kind: RegionKind) -> &RegionTracker {
        match kind {
            RegionKind::Land => &self.land,
            RegionKind::Sea => &self.sea,
            RegionKind::Lake => &self.lake,
        }
    }

    pub fn get_mut(&mut self, kind: RegionKind) -> &mut RegionTracker {
        match kind {
            RegionKind::Land => &mut self.land,
            RegionKind::Sea => &mut self.sea,
            RegionKind::Lake => &mut self.lake,
        }
    }

    pub fn rebuild_land(&mut self, cell_count: usize) {
        let Regions { land, sea, lake } = self;
        land.rebuild_from(0..cell_count, &[&*sea, &*lake]);
    }
}
