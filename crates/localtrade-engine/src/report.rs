use crate::worker::{RevenueByNation, ScanStats};
use ordered_float::OrderedFloat;
use std::cmp::Reverse;
use std::time::Duration;

/// One line of the final report.
#[derive(Clone, Debug, PartialEq)]
pub struct NationRevenue {
    pub nation: String,
    pub revenue: f64,
}

/// Nations ordered by descending revenue.
///
/// Equal revenues are ordered by nation name so the output is stable across runs.
pub fn rank(revenue: &RevenueByNation<'_>) -> Vec<NationRevenue> {
    let mut ranking: Vec<NationRevenue> = revenue
        .iter()
        .map(|(nation, revenue)| NationRevenue {
            nation: (*nation).to_string(),
            revenue: *revenue,
        })
        .collect();
    ranking.sort_by(|a, b| {
        (Reverse(OrderedFloat(a.revenue)), &a.nation)
            .cmp(&(Reverse(OrderedFloat(b.revenue)), &b.nation))
    });
    ranking
}

/// Everything a report sink needs from one query execution.
#[derive(Clone, Debug, PartialEq)]
pub struct QueryOutcome {
    pub ranking: Vec<NationRevenue>,
    pub stats: ScanStats,
    /// Worker count the orders were split across.
    pub threads: usize,
    /// Wall-clock time of the parallel phase (worker start to last merge).
    pub elapsed: Duration,
}

impl QueryOutcome {
    pub fn revenue_of(&self, nation: &str) -> Option<f64> {
        self.ranking
            .iter()
            .find(|entry| entry.nation == nation)
            .map(|entry| entry.revenue)
    }

    pub fn total_revenue(&self) -> f64 {
        self.ranking.iter().map(|entry| entry.revenue).sum()
    }
}
