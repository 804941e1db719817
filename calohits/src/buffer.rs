use log::debug;
use rayon::prelude::*;

use crate::basehit::XyzeHit;
use crate::hit::Hit;

// Below this many hits a parallel sort costs more than it saves
pub const PARALLEL_SORT_THRESHOLD: usize = 4096;

/// Where a hit collection keeps its hits.
///
/// The default is a plain `Vec<Hit>`. Deployments that need hits in a
/// special memory region (for example one shared between simulation
/// processes) provide their own store and hand it to
/// [`HitBuffer::with_store`]; `Hit` itself does not change.
pub trait HitStore {
    fn push(&mut self, hit: Hit);
    fn as_slice(&self) -> &[Hit];
    fn as_mut_slice(&mut self) -> &mut [Hit];
    fn truncate(&mut self, len: usize);

    fn clear(&mut self) {
        self.truncate(0);
    }
}

impl HitStore for Vec<Hit> {
    fn push(&mut self, hit: Hit) {
        Vec::push(self, hit);
    }

    fn as_slice(&self) -> &[Hit] {
        self
    }

    fn as_mut_slice(&mut self) -> &mut [Hit] {
        self
    }

    fn truncate(&mut self, len: usize) {
        Vec::truncate(self, len);
    }

    fn clear(&mut self) {
        Vec::clear(self);
    }
}

/// Per-event collection of hits.
///
/// Hits are appended in transport order. Before digitization the buffer is
/// collapsed with [`HitBuffer::merge_duplicates`] so that every
/// (primary, detector cell) pair appears exactly once.
#[derive(Debug, Clone, Default)]
pub struct HitBuffer<S: HitStore = Vec<Hit>> {
    store: S,
}

impl HitBuffer {
    pub fn new() -> Self {
        HitBuffer { store: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        HitBuffer { store: Vec::with_capacity(capacity) }
    }

    /*
        Aggregation stage for per-worker buffers.
        Buffers are concatenated in the order given, so when two workers
        produced the same identity the earlier buffer's hit keeps its fields.
    */
    pub fn merge_all<I>(buffers: I) -> HitBuffer
    where
        I: IntoIterator<Item = HitBuffer>,
    {
        let mut merged = HitBuffer::new();
        for buffer in buffers {
            merged.append(buffer);
        }
        merged.merge_duplicates();
        merged
    }
}

impl<S: HitStore> HitBuffer<S> {
    pub fn with_store(store: S) -> Self {
        HitBuffer { store }
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn push(&mut self, hit: Hit) {
        self.store.push(hit);
    }

    pub fn append<T: HitStore>(&mut self, other: HitBuffer<T>) {
        for hit in other.hits() {
            self.store.push(*hit);
        }
    }

    pub fn len(&self) -> usize {
        self.store.as_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn hits(&self) -> &[Hit] {
        self.store.as_slice()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Hit> {
        self.hits().iter()
    }

    pub fn clear(&mut self) {
        self.store.clear();
    }

    pub fn total_energy_loss(&self) -> f64 {
        self.iter().map(|hit| hit.energy_loss()).sum()
    }

    /// Stable sort by (primary, detector id).
    pub fn sort(&mut self) {
        let hits = self.store.as_mut_slice();
        if hits.len() >= PARALLEL_SORT_THRESHOLD {
            hits.par_sort();
        }
        else {
            hits.sort();
        }
    }

    pub fn is_sorted(&self) -> bool {
        self.hits().windows(2).all(|pair| pair[0] <= pair[1])
    }

    /// Sorts the buffer and folds every run of equal hits into its first
    /// hit. Returns how many hits were removed.
    pub fn merge_duplicates(&mut self) -> usize {
        self.sort();

        let hits = self.store.as_mut_slice();
        let before = hits.len();
        if before == 0 {
            return 0;
        }

        let mut write = 0;
        for read in 1..before {
            if hits[read] == hits[write] {
                let rhs = hits[read];
                hits[write] += &rhs;
            }
            else {
                write += 1;
                hits[write] = hits[read];
            }
        }

        let after = write + 1;
        self.store.truncate(after);
        debug!("Merged {} hits into {} unique (primary, cell) deposits", before, after);

        before - after
    }
}

impl Extend<Hit> for HitBuffer {
    fn extend<I: IntoIterator<Item = Hit>>(&mut self, iter: I) {
        self.store.extend(iter);
    }
}

impl FromIterator<Hit> for HitBuffer {
    fn from_iter<I: IntoIterator<Item = Hit>>(iter: I) -> Self {
        HitBuffer { store: iter.into_iter().collect() }
    }
}

impl<'a, S: HitStore> IntoIterator for &'a HitBuffer<S> {
    type Item = &'a Hit;
    type IntoIter = std::slice::Iter<'a, Hit>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
