use std::num::NonZeroUsize;
use std::ops::Range;

/// Half-open range `[begin, end)` of order positions assigned to one worker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Partition {
    pub worker: usize,
    pub begin: usize,
    pub end: usize,
}

impl Partition {
    pub fn len(&self) -> usize {
        self.end - self.begin
    }

    pub fn is_empty(&self) -> bool {
        self.begin == self.end
    }

    pub fn range(&self) -> Range<usize> {
        self.begin..self.end
    }
}

/// Split `[0, len)` into `workers` contiguous, disjoint ranges.
///
/// Every worker gets `len / workers` positions; the last one also takes the remainder so the final
/// range always ends at `len`. With more workers than positions the chunk size is zero, so every
/// range but the last is empty. Empty ranges are valid work units that scan nothing.
pub fn partition(len: usize, workers: NonZeroUsize) -> Vec<Partition> {
    let workers = workers.get();
    let chunk = len / workers;

    (0..workers)
        .map(|worker| {
            let begin = worker * chunk;
            let end = if worker + 1 == workers {
                len
            } else {
                begin + chunk
            };
            Partition { worker, begin, end }
        })
        .collect()
}
