//! Storage for the lines of one cache, organised as sets of ways

use super::AccessType;

/// One line slot of a set
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct Line {
    pub valid: bool,
    pub dirty: bool,

    pub tag: u64,

    /// Clock value of the latest reference, the LRU key
    pub prv_ref: u64,
}

/// `sets × ways` lines plus the logical clock used
/// to order references within this cache
pub struct SetStore {
    sets: Vec<Vec<Line>>,
    ref_counter: u64,
}

impl SetStore {
    pub fn make(num_sets: usize, ways: usize) -> Self {
        assert!(num_sets > 0 && ways > 0);
        Self {
            sets: vec![vec![Line::default(); ways]; num_sets],
            ref_counter: 0,
        }
    }

    pub fn num_sets(&self) -> usize {
        self.sets.len()
    }

    pub fn ways(&self) -> usize {
        self.sets[0].len()
    }

    /// Current value of the logical clock
    pub fn ref_counter(&self) -> u64 {
        self.ref_counter
    }

    pub fn get_line(&self, set: usize, way: usize) -> &Line {
        &self.sets[set][way]
    }

    /// Return the way holding a valid line with the given tag
    pub fn find(&self, set: usize, tag: u64) -> Option<usize> {
        self.sets[set]
            .iter()
            .position(|line| line.valid && line.tag == tag)
    }

    /// Reference the line with the given tag if present,
    /// refreshing its recency and marking it dirty on writes
    pub fn touch(&mut self, set: usize, tag: u64, access_type: AccessType) -> bool {
        let Some(way) = self.find(set, tag) else {
            return false;
        };

        self.ref_counter += 1;
        let line = &mut self.sets[set][way];
        line.prv_ref = self.ref_counter;
        if access_type == AccessType::Write {
            line.dirty = true;
        }
        true
    }

    /// Pick the way to fill in the given set:
    /// the first empty way, otherwise the least recently referenced one
    pub fn get_index_to_replace(&self, set: usize) -> usize {
        let lines = &self.sets[set];
        if let Some(way) = lines.iter().position(|line| !line.valid) {
            return way;
        }
        lines
            .iter()
            .enumerate()
            .min_by_key(|(_, line)| line.prv_ref)
            .map(|(way, _)| way)
            .unwrap_or(0)
    }

    /// Fill a way of the set with a new line
    /// and return the valid line it replaced, if any
    pub fn install(&mut self, set: usize, tag: u64, dirty: bool) -> Option<Line> {
        let way = self.get_index_to_replace(set);

        self.ref_counter += 1;
        let block = Line {
            valid: true,
            dirty,
            tag,
            prv_ref: self.ref_counter,
        };
        let replaced = std::mem::replace(&mut self.sets[set][way], block);

        replaced.valid.then_some(replaced)
    }

    /// Drop the line with the given tag.
    /// Returns whether it was dirty, or `None` if it was not present
    pub fn invalidate(&mut self, set: usize, tag: u64) -> Option<bool> {
        let way = self.find(set, tag)?;
        let line = &mut self.sets[set][way];
        let was_dirty = line.dirty;
        line.valid = false;
        line.dirty = false;
        Some(was_dirty)
    }

    /// Iterate over `(set, line)` for every valid line
    pub fn valid_lines(&self) -> impl Iterator<Item = (usize, &Line)> {
        self.sets.iter().enumerate().flat_map(|(set, lines)| {
            lines.iter().filter(|line| line.valid).map(move |line| (set, line))
        })
    }
}
