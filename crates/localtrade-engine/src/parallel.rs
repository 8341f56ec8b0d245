use crate::error::{EngineError, EngineResult};
use crate::index::JoinIndex;
use crate::merge::{fold_partials, MergedRevenue, RevenueMerger};
use crate::model::Tables;
use crate::partition::{partition, Partition};
use crate::query::RevenueQuery;
use crate::report::{rank, QueryOutcome};
use crate::worker::{aggregate_partition, ScanStats};
use rayon::ThreadPoolBuilder;
use std::num::NonZeroUsize;
use std::time::{Duration, Instant};

/// Answer `query` over `tables`, splitting the orders across `threads` workers.
///
/// The join index is built on the calling thread first. Workers then run on a pool dedicated to
/// this call (never Rayon's global pool) with exactly one task per partition; each scans its own
/// range into a private map and merges it into the shared totals once, when it finishes. The call
/// returns after every worker has merged.
pub fn execute(
    tables: &Tables,
    query: &RevenueQuery,
    threads: NonZeroUsize,
) -> EngineResult<QueryOutcome> {
    let index = JoinIndex::build(tables);
    let partitions = partition(tables.orders.len(), threads);

    let started = Instant::now();
    let pool = ThreadPoolBuilder::new()
        .num_threads(threads.get())
        .thread_name(|i| format!("localtrade-worker-{i}"))
        .build()
        .map_err(|source| EngineError::ThreadPool {
            threads: threads.get(),
            source,
        })?;

    let merger = RevenueMerger::new();
    pool.scope(|scope| {
        for part in &partitions {
            let (index, merger) = (&index, &merger);
            scope.spawn(move |_| {
                let partial = aggregate_partition(&tables.orders, *part, index, query);
                log_partial(part, &partial.stats, partial.revenue.len());
                merger.absorb(partial);
            });
        }
    });
    let merged = merger.finish();
    let elapsed = started.elapsed();

    Ok(outcome(merged, threads.get(), elapsed))
}

/// Same answer as [`execute`], computed by a single pass on the calling thread.
pub fn execute_sequential(tables: &Tables, query: &RevenueQuery) -> QueryOutcome {
    let index = JoinIndex::build(tables);
    let whole = Partition {
        worker: 0,
        begin: 0,
        end: tables.orders.len(),
    };

    let started = Instant::now();
    let partial = aggregate_partition(&tables.orders, whole, &index, query);
    log_partial(&whole, &partial.stats, partial.revenue.len());
    let merged = fold_partials([partial]);
    let elapsed = started.elapsed();

    outcome(merged, 1, elapsed)
}

fn log_partial(part: &Partition, stats: &ScanStats, nations: usize) {
    log::debug!(
        "worker {} scanned orders [{}, {}): {} contributing line items across {} nations",
        part.worker,
        part.begin,
        part.end,
        stats.items_contributing,
        nations
    );
}

fn outcome(merged: MergedRevenue<'_>, threads: usize, elapsed: Duration) -> QueryOutcome {
    let stats = merged.stats;
    log::debug!("scan breakdown: {stats:?}");
    if stats.items_malformed > 0 {
        log::warn!(
            "{} contributing line items had a price or discount that failed to parse; counted as -1",
            stats.items_malformed
        );
    }

    let outcome = QueryOutcome {
        ranking: rank(&merged.revenue),
        stats,
        threads,
        elapsed,
    };
    log::info!(
        "scanned {} orders with {threads} workers in {elapsed:?}: {} line items contributed {} \
         across {} nations",
        stats.orders_scanned,
        stats.items_contributing,
        outcome.total_revenue(),
        outcome.ranking.len()
    );
    outcome
}
