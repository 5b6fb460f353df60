//! Derived figures for the dashboard.
//!
//! Every aggregator is a pure pass over the transactions it is given. The
//! dashboard recomputes all of them from the store after each change; nothing
//! is cached between calls.

pub mod categories;
pub mod metrics;
pub mod monthly_trend;

use chrono::{Days, NaiveDate};

use crate::models::transaction::Transaction;

pub use categories::CategoryTotal;
pub use metrics::Metrics;
pub use monthly_trend::{MonthlyPoint, TrendOrder};

/// The reporting window the dashboard aggregates over.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Period {
    #[value(name = "7")]
    Last7Days,
    #[value(name = "30")]
    Last30Days,
    #[value(name = "90")]
    Last90Days,
    #[default]
    All,
}

impl Period {
    fn days(self) -> Option<u64> {
        match self {
            Period::Last7Days => Some(7),
            Period::Last30Days => Some(30),
            Period::Last90Days => Some(90),
            Period::All => None,
        }
    }

    /// Whether `date` falls inside the window ending on `today` (inclusive).
    pub fn contains(self, date: NaiveDate, today: NaiveDate) -> bool {
        let Some(days) = self.days() else {
            return true;
        };
        if date > today {
            return false;
        }
        match today.checked_sub_days(Days::new(days - 1)) {
            Some(start) => date >= start,
            None => true,
        }
    }

    pub fn cycle(self) -> Self {
        match self {
            Period::All => Period::Last7Days,
            Period::Last7Days => Period::Last30Days,
            Period::Last30Days => Period::Last90Days,
            Period::Last90Days => Period::All,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Period::Last7Days => "last 7 days",
            Period::Last30Days => "last 30 days",
            Period::Last90Days => "last 90 days",
            Period::All => "all time",
        }
    }
}

/// Everything the presentation layer needs to draw the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub period: Period,
    pub metrics: Metrics,
    pub monthly_trend: Vec<MonthlyPoint>,
    pub categories: Vec<CategoryTotal>,
    /// How many transactions fell inside the reporting window.
    pub transaction_count: usize,
}

impl Dashboard {
    pub fn compute(
        transactions: &[Transaction],
        period: Period,
        today: NaiveDate,
        order: TrendOrder,
    ) -> Self {
        let in_window: Vec<&Transaction> = transactions
            .iter()
            .filter(|t| period.contains(t.date, today))
            .collect();

        Self {
            period,
            metrics: metrics::compute(in_window.iter().copied()),
            monthly_trend: monthly_trend::compute_ordered(in_window.iter().copied(), order),
            categories: categories::compute(in_window.iter().copied()),
            transaction_count: in_window.len(),
        }
    }
}
