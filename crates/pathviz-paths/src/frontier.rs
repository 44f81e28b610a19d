//! Frontier containers: FIFO queue, LIFO stack, and a min-priority queue
//! that tolerates stale duplicates.
//!
//! Entries are plain value records. Whether a priority-queue entry is stale
//! is decided by the engine against its own cost table, never by identity.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};

use pathviz_core::PosKey;

/// A frontier entry: the key plus the costs known when it was inserted.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Entry {
    pub(crate) key: PosKey,
    /// Accumulated cost (hop count for unweighted searches).
    pub(crate) g: i32,
    /// Heuristic estimate at insertion time (0 unless A*).
    pub(crate) h: f64,
    /// Insertion counter; earlier entries win ties.
    seq: u64,
}

impl Entry {
    /// The priority-queue ordering key.
    #[inline]
    pub(crate) fn f(&self) -> f64 {
        f64::from(self.g) + self.h
    }

    fn rank_cmp(&self, other: &Self) -> Ordering {
        self.f().total_cmp(&other.f()).then(self.seq.cmp(&other.seq))
    }
}

/// Container discipline shared by all strategies.
pub(crate) trait Frontier {
    fn push(&mut self, key: PosKey, g: i32, h: f64);
    fn pop(&mut self) -> Option<Entry>;
    fn len(&self) -> usize;
    /// Entries in the order successive `pop`s would return them.
    fn ordered(&self) -> Vec<&Entry>;
}

// ---------------------------------------------------------------------------
// FIFO
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub(crate) struct Fifo {
    queue: VecDeque<Entry>,
    seq: u64,
}

impl Frontier for Fifo {
    fn push(&mut self, key: PosKey, g: i32, h: f64) {
        self.seq += 1;
        self.queue.push_back(Entry { key, g, h, seq: self.seq });
    }

    fn pop(&mut self) -> Option<Entry> {
        self.queue.pop_front()
    }

    fn len(&self) -> usize {
        self.queue.len()
    }

    fn ordered(&self) -> Vec<&Entry> {
        self.queue.iter().collect()
    }
}

// ---------------------------------------------------------------------------
// LIFO
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub(crate) struct Lifo {
    stack: Vec<Entry>,
    seq: u64,
}

impl Frontier for Lifo {
    fn push(&mut self, key: PosKey, g: i32, h: f64) {
        self.seq += 1;
        self.stack.push(Entry { key, g, h, seq: self.seq });
    }

    fn pop(&mut self) -> Option<Entry> {
        self.stack.pop()
    }

    fn len(&self) -> usize {
        self.stack.len()
    }

    /// Top of the stack first.
    fn ordered(&self) -> Vec<&Entry> {
        self.stack.iter().rev().collect()
    }
}

// ---------------------------------------------------------------------------
// Min-priority queue
// ---------------------------------------------------------------------------

/// Heap wrapper ordered so that `BinaryHeap` (a max-heap) pops the smallest
/// `f` first, breaking ties by insertion order.
#[derive(Debug)]
struct Queued(Entry);

impl PartialEq for Queued {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Queued {}

impl PartialOrd for Queued {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Queued {
    fn cmp(&self, other: &Self) -> Ordering {
        other.0.rank_cmp(&self.0)
    }
}

/// Lazy-deletion priority queue: decreasing a key pushes a fresh entry and
/// leaves the old one in place.
#[derive(Debug, Default)]
pub(crate) struct MinQueue {
    heap: BinaryHeap<Queued>,
    seq: u64,
}

impl Frontier for MinQueue {
    fn push(&mut self, key: PosKey, g: i32, h: f64) {
        self.seq += 1;
        self.heap.push(Queued(Entry { key, g, h, seq: self.seq }));
    }

    fn pop(&mut self) -> Option<Entry> {
        self.heap.pop().map(|q| q.0)
    }

    fn len(&self) -> usize {
        self.heap.len()
    }

    /// Ascending `f`, ties in insertion order.
    fn ordered(&self) -> Vec<&Entry> {
        let mut entries: Vec<&Entry> = self.heap.iter().map(|q| &q.0).collect();
        entries.sort_by(|a, b| a.rank_cmp(b));
        entries
    }
}
