use crate::worker::{PartialRevenue, RevenueByNation, ScanStats};
use std::sync::{Mutex, PoisonError};

/// Totals after every partial result has been merged.
#[derive(Clone, Debug, Default)]
pub struct MergedRevenue<'a> {
    pub revenue: RevenueByNation<'a>,
    pub stats: ScanStats,
    pub partials: usize,
}

impl<'a> MergedRevenue<'a> {
    fn absorb(&mut self, partial: PartialRevenue<'a>) {
        for (nation, amount) in partial.revenue {
            *self.revenue.entry(nation).or_insert(0.0) += amount;
        }
        self.stats += partial.stats;
        self.partials += 1;
    }
}

/// Shared accumulator that workers merge into as they finish.
///
/// One lock acquisition per worker, not per nation. The merger lives for a single query;
/// [`RevenueMerger::finish`] consumes it, so the totals can only be read once no worker holds a
/// reference anymore.
#[derive(Debug, Default)]
pub struct RevenueMerger<'a> {
    shared: Mutex<MergedRevenue<'a>>,
}

impl<'a> RevenueMerger<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn absorb(&self, partial: PartialRevenue<'a>) {
        let worker = partial.worker;
        let nations = partial.revenue.len();
        // A poisoned lock means another worker panicked; the scope re-raises that panic anyway.
        let mut shared = self.shared.lock().unwrap_or_else(PoisonError::into_inner);
        shared.absorb(partial);
        drop(shared);
        log::trace!("merged worker {worker} ({nations} nations)");
    }

    pub fn finish(self) -> MergedRevenue<'a> {
        self.shared
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// Merge partial results on the calling thread, without locking.
pub fn fold_partials<'a>(
    partials: impl IntoIterator<Item = PartialRevenue<'a>>,
) -> MergedRevenue<'a> {
    let mut merged = MergedRevenue::default();
    for partial in partials {
        merged.absorb(partial);
    }
    merged
}
