/// Half-open order date window `[from, to)`.
///
/// Dates are ISO `YYYY-MM-DD` strings; byte-wise comparison of that format matches chronological
/// order, so no date parsing happens on the hot path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DateWindow {
    pub from: String,
    pub to: String,
}

impl DateWindow {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    pub fn contains(&self, date: &str) -> bool {
        self.from.as_str() <= date && date < self.to.as_str()
    }
}

/// The query answered by the engine: local-trade revenue per nation of `region`, for orders placed
/// within `window`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RevenueQuery {
    pub region: String,
    pub window: DateWindow,
}

impl RevenueQuery {
    pub fn new(region: impl Into<String>, from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            window: DateWindow::new(from, to),
        }
    }
}
